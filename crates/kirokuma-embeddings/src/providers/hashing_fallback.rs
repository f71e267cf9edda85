//! Offline hashing provider.
//!
//! Hashes word tokens and character bigrams into fixed buckets with FNV-1a,
//! weights them by term frequency, and L2-normalizes. Bigrams let labels
//! without spaces (e.g. "カレーライス") still share buckets with related
//! labels. Deterministic and always available.

use std::collections::HashMap;

use kirokuma_core::errors::KirokumaResult;
use kirokuma_core::traits::IEmbeddingGateway;

const BIGRAM_WEIGHT: f32 = 0.5;

pub struct HashingProvider {
    dimensions: usize,
}

impl HashingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % dims as u64) as usize
    }

    fn terms(text: &str) -> HashMap<String, f32> {
        let mut weights: HashMap<String, f32> = HashMap::new();
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            let chars: Vec<char> = word.chars().collect();
            for pair in chars.windows(2) {
                let bigram: String = pair.iter().collect();
                *weights.entry(format!("#{bigram}")).or_default() += BIGRAM_WEIGHT;
            }
            *weights.entry(word).or_default() += 1.0;
        }
        weights
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dimensions];
        for (term, weight) in Self::terms(text) {
            v[Self::bucket(&term, self.dimensions)] += weight;
        }
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl IEmbeddingGateway for HashingProvider {
    fn embed(&self, text: &str) -> KirokumaResult<Vec<f32>> {
        Ok(self.vector(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }

    fn is_available(&self) -> bool {
        true
    }
}
