use kirokuma_core::traits::IEmbeddingGateway;
use kirokuma_embeddings::HashingProvider;
use proptest::prelude::*;

proptest! {
    #[test]
    fn hashing_vectors_have_configured_length(text in ".{0,40}", dims in 1usize..512) {
        let v = HashingProvider::new(dims).embed(&text).unwrap();
        prop_assert_eq!(v.len(), dims);
    }

    #[test]
    fn hashing_vectors_are_unit_or_zero(text in "[a-z ]{0,40}") {
        let v = HashingProvider::new(128).embed(&text).unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn hashing_is_deterministic(text in ".{0,40}") {
        let p = HashingProvider::new(96);
        prop_assert_eq!(p.embed(&text).unwrap(), p.embed(&text).unwrap());
    }
}
