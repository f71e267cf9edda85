use kirokuma_trend::classifier::{classify_cluster_ratio, pair_ratio};
use kirokuma_trend::clustering::cluster_labels;
use kirokuma_trend::cosine_similarity;
use kirokuma_core::models::TrendStrength;
use proptest::prelude::*;

fn arb_vector(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..1.0, dim)
}

fn arb_items() -> impl Strategy<Value = Vec<(String, Vec<f32>)>> {
    prop::collection::vec(
        ("[a-d]", arb_vector(4)),
        0..30,
    )
}

// ── similarity ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn cosine_is_symmetric(a in arb_vector(6), b in arb_vector(6)) {
        let ab = cosine_similarity(&a, &b);
        let ba = cosine_similarity(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn cosine_stays_in_range(a in arb_vector(6), b in arb_vector(6)) {
        let s = cosine_similarity(&a, &b);
        prop_assert!((-1.0..=1.0).contains(&s));
    }

    #[test]
    fn self_similarity_is_one_for_nonzero(a in arb_vector(6)) {
        let norm: f32 = a.iter().map(|x| x * x).sum();
        prop_assume!(norm > 1e-3);
        prop_assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
    }
}

// ── clustering ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn clusters_partition_every_item(items in arb_items(), threshold in 0.0f64..1.0) {
        let summary = cluster_labels(&items, threshold);
        let mut seen: Vec<usize> = summary.clusters.iter().flatten().copied().collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..items.len()).collect::<Vec<_>>());
        prop_assert_eq!(summary.cluster_count, summary.clusters.len());
    }

    #[test]
    fn dominant_is_a_largest_cluster(items in arb_items(), threshold in 0.0f64..1.0) {
        let summary = cluster_labels(&items, threshold);
        let largest = summary.clusters.iter().map(Vec::len).max().unwrap_or(0);
        prop_assert_eq!(summary.dominant_labels.len(), largest);
        if !items.is_empty() {
            let expected = largest as f64 / items.len() as f64;
            prop_assert!((summary.dominant_ratio - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn clustering_is_deterministic(items in arb_items(), threshold in 0.0f64..1.0) {
        prop_assert_eq!(cluster_labels(&items, threshold), cluster_labels(&items, threshold));
    }

    #[test]
    fn pair_ratio_is_a_fraction(items in arb_items(), threshold in 0.0f64..1.0) {
        let vectors: Vec<&[f32]> = items.iter().map(|(_, v)| v.as_slice()).collect();
        let r = pair_ratio(&vectors, threshold);
        prop_assert!((0.0..=1.0).contains(&r));
    }

    #[test]
    fn fewer_than_two_is_always_weak(n in 0usize..2, ratio in 0.0f64..=1.0) {
        prop_assert_eq!(classify_cluster_ratio(n, ratio), TrendStrength::Weak);
    }
}
