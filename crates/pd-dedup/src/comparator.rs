use pd_vector::{is_match, DocumentVector};

/// Threshold cosine test over precomputed document vectors.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityComparator<'a> {
    vectors: &'a [DocumentVector],
    threshold: f64,
}

impl<'a> SimilarityComparator<'a> {
    pub fn new(vectors: &'a [DocumentVector], threshold: f64) -> Self {
        Self { vectors, threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn vectors(&self) -> &'a [DocumentVector] {
        self.vectors
    }

    pub fn score(&self, a: usize, b: usize) -> f64 {
        self.vectors[a].cosine(&self.vectors[b])
    }

    pub fn matches(&self, a: usize, b: usize) -> bool {
        is_match(self.score(a, b), self.threshold)
    }
}
