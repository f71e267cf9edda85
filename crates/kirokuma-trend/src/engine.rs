//! TrendEngine: resolves embeddings for one epoch's window and runs the
//! clusterer and classifier over whatever could be resolved.

use kirokuma_core::config::TrendConfig;
use kirokuma_core::errors::{KirokumaError, KirokumaResult};
use kirokuma_core::models::{MealRecord, TrendAnalysis, TrendSignals};
use kirokuma_core::traits::IEmbeddingGateway;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::classifier::TrendClassifier;
use crate::frequency::frequency_trend;
use crate::similarity::centroid;

/// Labels paired with usable vectors, plus how many records were dropped.
#[derive(Debug, Clone, Default)]
pub struct ResolvedEmbeddings {
    pub items: Vec<(String, Vec<f32>)>,
    pub excluded: usize,
}

/// Trend computation over a single epoch.
///
/// Embedding lookups run on a dedicated pool bounded by
/// `embed_concurrency`; classification starts only once every lookup has
/// either resolved or failed.
pub struct TrendEngine {
    classifier: TrendClassifier,
    pool: rayon::ThreadPool,
}

impl TrendEngine {
    pub fn new(config: &TrendConfig) -> KirokumaResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.embed_concurrency.max(1))
            .thread_name(|i| format!("kirokuma-embed-{i}"))
            .build()
            .map_err(|e| KirokumaError::InvalidInput {
                reason: format!("embedding pool: {e}"),
            })?;
        Ok(Self {
            classifier: TrendClassifier::from_config(config),
            pool,
        })
    }

    pub fn classifier(&self) -> &TrendClassifier {
        &self.classifier
    }

    /// Full analysis of `records` for `epoch_id` under the configured strategy.
    pub fn analyze(
        &self,
        epoch_id: &str,
        records: &[MealRecord],
        gateway: &dyn IEmbeddingGateway,
    ) -> TrendAnalysis {
        let records = same_epoch(epoch_id, records);
        let resolved = self.resolve_embeddings(&records, gateway);
        let summary = self.classifier.cluster(&resolved.items);
        let strength = self.classifier.classify(&resolved.items, &summary);

        let dominant_vectors: Vec<&[f32]> = summary
            .dominant_members()
            .iter()
            .map(|&i| resolved.items[i].1.as_slice())
            .collect();

        let analysis = TrendAnalysis {
            dominant_labels: summary.dominant_labels.clone(),
            strength,
            cluster_count: summary.cluster_count,
            dominant_ratio: summary.dominant_ratio,
            strategy: self.classifier.strategy,
            sample_size: resolved.items.len(),
            excluded: resolved.excluded,
            centroid: centroid(&dominant_vectors),
            frequency: frequency_trend(&records),
        };

        debug!(
            epoch_id,
            strength = %analysis.strength,
            clusters = analysis.cluster_count,
            dominant_ratio = analysis.dominant_ratio,
            sample_size = analysis.sample_size,
            excluded = analysis.excluded,
            "trend analyzed"
        );
        analysis
    }

    /// Both strategy signals for `records`, without merging them.
    pub fn signals(
        &self,
        epoch_id: &str,
        records: &[MealRecord],
        gateway: &dyn IEmbeddingGateway,
    ) -> TrendSignals {
        let records = same_epoch(epoch_id, records);
        let resolved = self.resolve_embeddings(&records, gateway);
        let summary = self.classifier.cluster(&resolved.items);
        self.classifier.signals(&resolved.items, &summary)
    }

    /// Stored embeddings are used as-is; the rest go to the gateway with
    /// bounded concurrency. A failed lookup drops that record only.
    /// Output keeps input order.
    pub fn resolve_embeddings(
        &self,
        records: &[&MealRecord],
        gateway: &dyn IEmbeddingGateway,
    ) -> ResolvedEmbeddings {
        let vectors: Vec<Option<Vec<f32>>> = self.pool.install(|| {
            records
                .par_iter()
                .map(|record| match &record.embedding {
                    Some(stored) if !stored.is_empty() => Some(stored.clone()),
                    _ => lookup(record, gateway),
                })
                .collect()
        });

        let mut resolved = ResolvedEmbeddings::default();
        for (record, vector) in records.iter().zip(vectors) {
            match vector {
                Some(v) => resolved.items.push((record.primary_label.clone(), v)),
                None => resolved.excluded += 1,
            }
        }
        resolved
    }
}

fn lookup(record: &MealRecord, gateway: &dyn IEmbeddingGateway) -> Option<Vec<f32>> {
    match gateway.embed(&record.primary_label) {
        Ok(v) if !v.is_empty() => Some(v),
        Ok(_) => {
            warn!(
                record_id = %record.id,
                provider = gateway.name(),
                "gateway returned an empty embedding, excluding record"
            );
            None
        }
        Err(e) => {
            warn!(
                record_id = %record.id,
                provider = gateway.name(),
                error = %e,
                "embedding unavailable, excluding record"
            );
            None
        }
    }
}

/// Records from any other epoch never take part in a computation.
fn same_epoch<'a>(epoch_id: &str, records: &'a [MealRecord]) -> Vec<&'a MealRecord> {
    let (kept, foreign): (Vec<&MealRecord>, Vec<&MealRecord>) =
        records.iter().partition(|r| r.epoch_id == epoch_id);
    if !foreign.is_empty() {
        warn!(
            epoch_id,
            dropped = foreign.len(),
            "records from another epoch were passed to trend analysis and ignored"
        );
    }
    kept
}
