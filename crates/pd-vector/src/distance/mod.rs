//! Vector math for document similarity.
//!
//! Products are accumulated in `f64` so that scores near the 0.99 threshold
//! are not decided by `f32` rounding.

/// Compute inner product (dot product) of two vectors.
#[inline]
pub fn inner_product(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(&x, &y)| x as f64 * y as f64).sum()
}

/// Euclidean norm.
#[inline]
pub fn l2_norm(v: &[f32]) -> f64 {
    v.iter().map(|&x| x as f64 * x as f64).sum::<f64>().sqrt()
}

/// Element-wise `acc += v`.
#[inline]
pub fn add_assign(acc: &mut [f32], v: &[f32]) {
    debug_assert_eq!(acc.len(), v.len());
    for (a, &x) in acc.iter_mut().zip(v.iter()) {
        *a += x;
    }
}

/// Cosine similarity from precomputed norms (returns value in [-1, 1]).
///
/// Callers must not pass a zero norm; signal-free documents are filtered
/// out before any pairwise comparison.
#[inline]
pub fn cosine_with_norms(a: &[f32], norm_a: f64, b: &[f32], norm_b: f64) -> f64 {
    debug_assert!(norm_a > 0.0 && norm_b > 0.0);
    inner_product(a, b) / (norm_a * norm_b)
}

/// Cosine similarity, computing both norms. Zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    cosine_with_norms(a, norm_a, b, norm_b)
}

/// Threshold test. Strict: a score equal to the threshold is not a match.
#[inline]
pub fn is_match(score: f64, threshold: f64) -> bool {
    score > threshold
}
