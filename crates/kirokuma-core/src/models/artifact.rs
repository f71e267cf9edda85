use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The generated output tied 1:1 to an accepted record. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    pub user_id: String,
    pub epoch_id: String,
    pub record_id: String,
    /// Opaque reference owned by the rendering pipeline (e.g. an image URL).
    pub external_ref: String,
    pub created_at: DateTime<Utc>,
}

impl Artifact {
    pub fn for_record(record_id: &str, user_id: &str, epoch_id: &str, external_ref: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            epoch_id: epoch_id.to_string(),
            record_id: record_id.to_string(),
            external_ref: external_ref.to_string(),
            created_at: Utc::now(),
        }
    }
}
