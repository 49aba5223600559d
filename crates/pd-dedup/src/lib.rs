//! Near-duplicate removal for social-media posts.
//!
//! Stages:
//! 1. Aggregation: one summed embedding per document (`pd-vector`)
//! 2. Length blocking: non-zero documents bucketed by retained-token count
//! 3. Banded matching: intra-block, windowed cross-block and group-vs-group passes
//! 4. Resolution: earliest post of each group survives

pub mod blocks;
pub mod comparator;
pub mod matcher;
pub mod merger;
pub mod pipeline;
pub mod resolver;

pub use blocks::{LengthBlock, LengthBlockIndex};
pub use comparator::SimilarityComparator;
pub use matcher::{BandedMatcher, MatchOutcome, MatchStats, PassStats};
pub use merger::GroupMerger;
pub use pipeline::{remove_duplicates, DedupOutcome, DedupStats, Deduplicator};
pub use resolver::{DuplicateGroup, DuplicateResolver, ReportEntry, Resolution};
