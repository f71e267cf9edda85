use criterion::{criterion_group, criterion_main, Criterion};

use kirokuma_core::config::TrendConfig;
use kirokuma_core::errors::KirokumaResult;
use kirokuma_core::models::{MealRecord, NewMealRecord};
use kirokuma_core::traits::IEmbeddingGateway;
use kirokuma_trend::clustering::cluster_labels;
use kirokuma_trend::TrendEngine;

const DIMS: usize = 256;

/// Deterministic pseudo-embeddings seeded from the label hash.
fn seeded_vector(text: &str) -> Vec<f32> {
    let mut reader = blake3::Hasher::new().update(text.as_bytes()).finalize_xof();
    let mut bytes = vec![0u8; DIMS];
    reader.fill(&mut bytes);
    bytes.iter().map(|b| *b as f32 / 255.0 - 0.5).collect()
}

struct SeededGateway;

impl IEmbeddingGateway for SeededGateway {
    fn embed(&self, text: &str) -> KirokumaResult<Vec<f32>> {
        Ok(seeded_vector(text))
    }
    fn dimensions(&self) -> usize {
        DIMS
    }
    fn name(&self) -> &str {
        "seeded"
    }
    fn is_available(&self) -> bool {
        true
    }
}

/// A full window: 30 records over 6 distinct dishes.
fn window() -> Vec<MealRecord> {
    (0..30)
        .map(|i| {
            let label = format!("dish-{}", i % 6);
            MealRecord::new("U1", "E1", NewMealRecord::new(label), None)
        })
        .collect()
}

fn bench_cluster_window(c: &mut Criterion) {
    let items: Vec<(String, Vec<f32>)> = window()
        .into_iter()
        .map(|r| {
            let v = seeded_vector(&r.primary_label);
            (r.primary_label, v)
        })
        .collect();
    c.bench_function("cluster_30_records", |b| {
        b.iter(|| cluster_labels(&items, 0.75))
    });
}

fn bench_analyze_window(c: &mut Criterion) {
    let engine = TrendEngine::new(&TrendConfig::default()).unwrap();
    let records = window();
    c.bench_function("analyze_30_records_with_lookup", |b| {
        b.iter(|| engine.analyze("E1", &records, &SeededGateway))
    });
}

criterion_group!(benches, bench_cluster_window, bench_analyze_window);
criterion_main!(benches);
