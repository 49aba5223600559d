//! Document vectors: one summed embedding per document.

use crate::distance;
use pd_core::{validate_corpus, DedupError, Document, Result, Token};
use serde::Serialize;
use tracing::debug;

/// Summed embedding of a document's retained tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentVector {
    pub sum: Vec<f32>,
    pub norm: f64,
    /// Number of retained tokens. Used only as a blocking key.
    pub length: usize,
}

impl DocumentVector {
    /// No semantic signal survives filtering. Exact comparison, no epsilon.
    pub fn is_zero(&self) -> bool {
        self.norm == 0.0
    }

    pub fn cosine(&self, other: &DocumentVector) -> f64 {
        distance::cosine_with_norms(&self.sum, self.norm, &other.sum, other.norm)
    }
}

/// Sums retained token embeddings into document vectors.
#[derive(Debug, Clone, Copy)]
pub struct VectorAggregator {
    dimension: usize,
}

impl VectorAggregator {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn retained<'a>(tokens: &'a [Token]) -> impl Iterator<Item = &'a Token> + 'a {
        tokens.iter().filter(|t| !t.is_filtered())
    }

    pub fn aggregate(&self, document: &Document) -> Result<DocumentVector> {
        let mut sum = vec![0.0f32; self.dimension];
        let mut length = 0;
        for token in Self::retained(&document.tokens) {
            if token.vector.len() != self.dimension {
                return Err(DedupError::DimensionMismatch {
                    id: document.id.clone(),
                    expected: self.dimension,
                    got: token.vector.len(),
                });
            }
            distance::add_assign(&mut sum, &token.vector);
            length += 1;
        }
        let norm = distance::l2_norm(&sum);
        Ok(DocumentVector { sum, norm, length })
    }

    /// Validate the corpus and aggregate every document, in input order.
    pub fn aggregate_corpus(documents: &[Document]) -> Result<Vec<DocumentVector>> {
        let dimension = validate_corpus(documents)?.unwrap_or(0);
        let aggregator = Self::new(dimension);
        let vectors: Vec<DocumentVector> =
            documents.iter().map(|d| aggregator.aggregate(d)).collect::<Result<_>>()?;
        debug!(
            documents = vectors.len(),
            dimension,
            zero_signal = vectors.iter().filter(|v| v.is_zero()).count(),
            "aggregated corpus"
        );
        Ok(vectors)
    }
}
