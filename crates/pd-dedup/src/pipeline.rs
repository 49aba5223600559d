//! Dedup pipeline — aggregation, blocking, matching and resolution.

use crate::blocks::LengthBlockIndex;
use crate::comparator::SimilarityComparator;
use crate::matcher::{BandedMatcher, MatchOutcome, MatchStats};
use crate::resolver::{DuplicateGroup, DuplicateResolver};
use pd_core::{DedupConfig, Document, Post, Result, TokenVectorizer};
use pd_vector::{DocumentVector, VectorAggregator};
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

/// Dedup statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DedupStats {
    pub documents: usize,
    pub zero_signal: usize,
    pub blocks: usize,
    pub groups: usize,
    pub removed: usize,
    pub passes: MatchStats,
}

impl DedupStats {
    pub fn removal_pct(&self) -> f64 {
        if self.documents == 0 { return 0.0; }
        self.removed as f64 / self.documents as f64 * 100.0
    }
}

/// Result of a dedup run. Id lists are in ingestion order.
#[derive(Debug, Clone, Serialize)]
pub struct DedupOutcome {
    pub kept: Vec<String>,
    pub removed: Vec<String>,
    pub report: Vec<DuplicateGroup>,
    pub stats: DedupStats,
}

impl DedupOutcome {
    fn select<'d>(ids: &[String], documents: &'d [Document]) -> Vec<&'d Document> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        documents.iter().filter(|d| wanted.contains(d.id.as_str())).collect()
    }

    pub fn kept_documents<'d>(&self, documents: &'d [Document]) -> Vec<&'d Document> {
        Self::select(&self.kept, documents)
    }

    pub fn removed_documents<'d>(&self, documents: &'d [Document]) -> Vec<&'d Document> {
        Self::select(&self.removed, documents)
    }
}

/// The main dedup pipeline.
#[derive(Debug, Clone)]
pub struct Deduplicator {
    config: DedupConfig,
}

impl Deduplicator {
    pub fn new(config: DedupConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Group document vectors without resolving against documents.
    pub fn match_vectors(&self, vectors: &[DocumentVector]) -> (LengthBlockIndex, MatchOutcome) {
        let index = LengthBlockIndex::build(vectors);
        let comparator = SimilarityComparator::new(vectors, self.config.similarity_threshold);
        let outcome = BandedMatcher::new(comparator, &index)
            .with_window_radius(self.config.window_radius)
            .with_progress_interval(self.config.progress_interval)
            .run();
        (index, outcome)
    }

    pub fn run(&self, documents: &[Document]) -> Result<DedupOutcome> {
        let vectors = VectorAggregator::aggregate_corpus(documents)?;
        let (index, matched) = self.match_vectors(&vectors);
        info!(
            documents = documents.len(),
            zero_signal = index.zero_signal().len(),
            blocks = index.len(),
            "matching finished"
        );

        let resolution = DuplicateResolver::resolve(
            documents,
            &matched.merger,
            index.zero_signal(),
            self.config.remove_zero_signal,
        );
        let report = DuplicateResolver::report(documents, &resolution);
        let stats = DedupStats {
            documents: documents.len(),
            zero_signal: index.zero_signal().len(),
            blocks: index.len(),
            groups: report.len(),
            removed: resolution.removed.len(),
            passes: matched.stats,
        };
        info!(kept = resolution.kept.len(), removed = stats.removed, groups = stats.groups, "dedup finished");

        let ids = |positions: &[usize]| -> Vec<String> {
            positions.iter().map(|&i| documents[i].id.clone()).collect()
        };
        Ok(DedupOutcome {
            kept: ids(&resolution.kept),
            removed: ids(&resolution.removed),
            report,
            stats,
        })
    }

    /// Tokenize posts through `vectorizer`, then dedup them.
    pub fn run_posts(&self, posts: &[Post], vectorizer: &dyn TokenVectorizer) -> Result<DedupOutcome> {
        let documents = Document::from_posts(posts, vectorizer)?;
        self.run(&documents)
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self { config: DedupConfig::default() }
    }
}

/// Dedup `documents` with `config`.
pub fn remove_duplicates(documents: &[Document], config: &DedupConfig) -> Result<DedupOutcome> {
    Deduplicator::new(config.clone())?.run(documents)
}
