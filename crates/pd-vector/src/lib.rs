//! Document vector aggregation and cosine similarity.

pub mod aggregate;
pub mod distance;

pub use aggregate::{DocumentVector, VectorAggregator};
pub use distance::{cosine_similarity, cosine_with_norms, is_match};
