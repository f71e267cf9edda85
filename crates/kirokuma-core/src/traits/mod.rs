mod embedding;
mod storage;

pub use embedding::IEmbeddingGateway;
pub use storage::{IArtifactStore, IEpochStore, IRecordStore};
