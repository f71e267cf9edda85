//! KirokumaEngine: the four core operations plus record ingestion.

use std::sync::Arc;

use chrono::Utc;
use kirokuma_core::config::KirokumaConfig;
use kirokuma_core::errors::{KirokumaError, KirokumaResult};
use kirokuma_core::models::{
    Artifact, Epoch, GrowthStage, MealRecord, NewMealRecord, RecordWindow, TrendAnalysis,
    TrendSignals,
};
use kirokuma_core::traits::{IArtifactStore, IEmbeddingGateway, IEpochStore, IRecordStore};
use kirokuma_embeddings::build_gateway;
use kirokuma_epoch::EpochLifecycleManager;
use kirokuma_growth::GrowthStageEngine;
use kirokuma_storage::StorageEngine;
use kirokuma_trend::TrendEngine;
use tracing::{debug, info, warn};

/// The persistence handles the engine depends on.
#[derive(Clone)]
pub struct Stores {
    pub epochs: Arc<dyn IEpochStore>,
    pub records: Arc<dyn IRecordStore>,
    pub artifacts: Arc<dyn IArtifactStore>,
}

impl Stores {
    /// All three stores backed by one SQLite engine.
    pub fn sqlite(storage: Arc<StorageEngine>) -> Self {
        Self {
            epochs: storage.clone(),
            records: storage.clone(),
            artifacts: storage,
        }
    }
}

/// Result of accepting one record.
#[derive(Debug, Clone)]
pub struct AcceptedRecord {
    pub record: MealRecord,
    pub artifact: Artifact,
    /// First record of its epoch.
    pub is_first: bool,
    /// Growth stage including this record.
    pub stage: GrowthStage,
}

pub struct KirokumaEngine {
    epochs: EpochLifecycleManager,
    records: Arc<dyn IRecordStore>,
    artifacts: Arc<dyn IArtifactStore>,
    gateway: Arc<dyn IEmbeddingGateway>,
    trend: TrendEngine,
    growth: GrowthStageEngine,
    config: KirokumaConfig,
}

impl KirokumaEngine {
    /// Build everything `config` describes: SQLite stores and the gateway.
    pub fn open(config: KirokumaConfig) -> KirokumaResult<Self> {
        config.validate()?;
        let storage = Arc::new(StorageEngine::from_config(&config.storage)?);
        let gateway = build_gateway(&config.embedding)?;
        Self::new(Stores::sqlite(storage), gateway, config)
    }

    pub fn new(
        stores: Stores,
        gateway: Arc<dyn IEmbeddingGateway>,
        config: KirokumaConfig,
    ) -> KirokumaResult<Self> {
        config.validate()?;
        let trend = TrendEngine::new(&config.trend)?;
        let growth = GrowthStageEngine::from_config(&config.growth)?;
        Ok(Self {
            epochs: EpochLifecycleManager::new(stores.epochs),
            records: stores.records,
            artifacts: stores.artifacts,
            gateway,
            trend,
            growth,
            config,
        })
    }

    pub fn config(&self) -> &KirokumaConfig {
        &self.config
    }

    pub fn ensure_active_epoch(&self, user_id: &str) -> KirokumaResult<Epoch> {
        self.epochs.ensure_active(user_id)
    }

    pub fn reset_epoch(&self, user_id: &str) -> KirokumaResult<Epoch> {
        self.epochs.reset(user_id)
    }

    /// Every epoch of a user, newest first.
    pub fn epoch_history(&self, user_id: &str) -> KirokumaResult<Vec<Epoch>> {
        self.epochs.history(user_id)
    }

    /// Trend over the epoch's recent window under the configured strategy.
    pub fn compute_trend(&self, user_id: &str, epoch_id: &str) -> KirokumaResult<TrendAnalysis> {
        let records = self.window_records(user_id, epoch_id)?;
        let analysis = self.trend.analyze(epoch_id, &records, self.gateway.as_ref());
        info!(
            user_id,
            epoch_id,
            strength = %analysis.strength,
            sample_size = analysis.sample_size,
            "trend computed"
        );
        Ok(analysis)
    }

    /// Pairwise and cluster strengths side by side, unmerged.
    pub fn compute_trend_signals(
        &self,
        user_id: &str,
        epoch_id: &str,
    ) -> KirokumaResult<TrendSignals> {
        let records = self.window_records(user_id, epoch_id)?;
        Ok(self.trend.signals(epoch_id, &records, self.gateway.as_ref()))
    }

    pub fn compute_growth_stage(&self, user_id: &str, epoch_id: &str) -> KirokumaResult<GrowthStage> {
        self.epochs.owned_epoch(user_id, epoch_id)?;
        let count = self.records.count(user_id, epoch_id)?;
        let stage = self.growth.stage(count);
        debug!(user_id, epoch_id, count, stage = stage.value(), "growth stage computed");
        Ok(stage)
    }

    /// Store a record and its artifact in the user's active epoch.
    ///
    /// The primary label is embedded once here. If that fails the record is
    /// stored without an embedding and the gateway is asked again at trend time.
    pub fn accept_record(
        &self,
        user_id: &str,
        input: NewMealRecord,
        external_ref: &str,
    ) -> KirokumaResult<AcceptedRecord> {
        if input.primary_label.trim().is_empty() {
            return Err(KirokumaError::InvalidInput {
                reason: "primary label is empty".to_string(),
            });
        }

        let epoch = self.epochs.ensure_active(user_id)?;
        let before = self.records.count(user_id, &epoch.id)?;

        let embedding = match self.gateway.embed(&input.primary_label) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(
                    user_id,
                    label = %input.primary_label,
                    error = %e,
                    "storing record without embedding"
                );
                None
            }
        };

        let record = MealRecord::new(user_id, &epoch.id, input, embedding);
        let artifact = Artifact::for_record(&record.id, user_id, &epoch.id, external_ref);
        self.records.create(&record, &artifact)?;

        let accepted = AcceptedRecord {
            is_first: before == 0,
            stage: self.growth.stage(before + 1),
            record,
            artifact,
        };
        info!(
            user_id,
            epoch_id = %epoch.id,
            record_id = %accepted.record.id,
            is_first = accepted.is_first,
            stage = accepted.stage.value(),
            "record accepted"
        );
        Ok(accepted)
    }

    pub fn latest_artifact(&self, user_id: &str, epoch_id: &str) -> KirokumaResult<Option<Artifact>> {
        self.epochs.owned_epoch(user_id, epoch_id)?;
        self.artifacts.latest(user_id, epoch_id)
    }

    /// Newest-first artifacts of one epoch, at most `limit` (capped at 30).
    pub fn artifact_history(
        &self,
        user_id: &str,
        epoch_id: &str,
        limit: usize,
    ) -> KirokumaResult<Vec<Artifact>> {
        self.epochs.owned_epoch(user_id, epoch_id)?;
        self.artifacts.list_by_epoch(user_id, epoch_id, limit)
    }

    /// The configured window, after checking the epoch belongs to the user.
    fn window_records(&self, user_id: &str, epoch_id: &str) -> KirokumaResult<Vec<MealRecord>> {
        self.epochs.owned_epoch(user_id, epoch_id)?;
        let window = RecordWindow::recent(
            self.config.trend.window_limit,
            self.config.trend.window_cutoff_days(),
            Utc::now(),
        );
        self.records.list_by_epoch(user_id, epoch_id, window)
    }
}
