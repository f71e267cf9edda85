//! Cosine similarity and centroid helpers.

/// Cosine similarity between two vectors, in `[-1, 1]`.
///
/// Returns 0.0 for mismatched lengths, empty input, zero magnitude, or
/// non-finite components.
/// A degraded embedding therefore weakens a comparison instead of failing it.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom < f64::EPSILON {
        return 0.0;
    }
    let sim = dot / denom;
    if sim.is_finite() {
        sim.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Element-wise mean of equally sized vectors.
///
/// Vectors whose length differs from the first one are skipped.
/// Returns an empty vector for empty input.
pub fn centroid(vectors: &[&[f32]]) -> Vec<f32> {
    let Some(first) = vectors.first() else {
        return Vec::new();
    };
    let dim = first.len();
    let mut sum = vec![0.0f64; dim];
    let mut used = 0usize;
    for v in vectors.iter().filter(|v| v.len() == dim) {
        for (acc, x) in sum.iter_mut().zip(v.iter()) {
            *acc += *x as f64;
        }
        used += 1;
    }
    if used == 0 {
        return Vec::new();
    }
    sum.into_iter().map(|s| (s / used as f64) as f32).collect()
}
