//! Three-pass banded matching over length blocks.
//!
//! 1. Intra-block: every unmatched document against the later unmatched
//!    documents of its own block.
//! 2. Window: the groups formed in block `i` by pass 1 against unmatched
//!    documents in the blocks `window_radius` positions either side.
//! 3. Cross-group: representatives against each other, absorbing whole groups.

use crate::blocks::LengthBlockIndex;
use crate::comparator::SimilarityComparator;
use crate::merger::GroupMerger;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// Work done by one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassStats {
    pub comparisons: u64,
    pub merges: u64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub intra_block: PassStats,
    pub window: PassStats,
    pub cross_group: PassStats,
}

impl MatchStats {
    pub fn comparisons(&self) -> u64 {
        self.intra_block.comparisons + self.window.comparisons + self.cross_group.comparisons
    }
}

#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub merger: GroupMerger,
    pub stats: MatchStats,
}

pub struct BandedMatcher<'a> {
    comparator: SimilarityComparator<'a>,
    index: &'a LengthBlockIndex,
    window_radius: usize,
    progress_interval: usize,
}

impl<'a> BandedMatcher<'a> {
    pub fn new(comparator: SimilarityComparator<'a>, index: &'a LengthBlockIndex) -> Self {
        Self { comparator, index, window_radius: 2, progress_interval: 1000 }
    }

    pub fn with_window_radius(mut self, radius: usize) -> Self {
        self.window_radius = radius;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Run all three passes in order.
    pub fn run(&self) -> MatchOutcome {
        let mut merger = GroupMerger::new(self.comparator.vectors().len());
        let intra_block = self.intra_block_pass(&mut merger);
        let window = self.window_pass(&mut merger);
        let cross_group = self.cross_group_pass(&mut merger);
        MatchOutcome { merger, stats: MatchStats { intra_block, window, cross_group } }
    }

    fn try_merge(&self, merger: &mut GroupMerger, anchor: usize, target: usize, stats: &mut PassStats) -> bool {
        stats.comparisons += 1;
        let score = self.comparator.score(anchor, target);
        if !pd_vector::is_match(score, self.comparator.threshold()) {
            return false;
        }
        if merger.merge(anchor, target) {
            stats.merges += 1;
            debug!(anchor, target, score, "merged");
        }
        true
    }

    pub fn intra_block_pass(&self, merger: &mut GroupMerger) -> PassStats {
        let start = Instant::now();
        let mut stats = PassStats::default();
        let total = self.index.len();
        for (round, block) in self.index.blocks().iter().enumerate() {
            let members = &block.members;
            for (i, &anchor) in members.iter().enumerate() {
                if merger.is_assigned(anchor) {
                    continue;
                }
                // Matched candidates become assigned and drop out of later sweeps.
                for &candidate in &members[i + 1..] {
                    if !merger.is_assigned(candidate) {
                        self.try_merge(merger, anchor, candidate, &mut stats);
                    }
                }
            }
            info!(
                pass = 1,
                round = round + 1,
                of = total,
                length = block.length,
                elapsed_s = start.elapsed().as_secs(),
                "intra-block round done"
            );
        }
        stats.elapsed_ms = start.elapsed().as_millis() as u64;
        info!(pass = 1, comparisons = stats.comparisons, merges = stats.merges, elapsed_ms = stats.elapsed_ms, "intra-block pass finished");
        stats
    }

    pub fn window_pass(&self, merger: &mut GroupMerger) -> PassStats {
        let start = Instant::now();
        let mut stats = PassStats::default();
        let blocks = self.index.blocks();
        let total = blocks.len();
        // Anchors are fixed before any window merge: groups that formed in
        // block `i`, represented by a member of block `i`.
        let anchors_by_block: Vec<Vec<usize>> = blocks
            .iter()
            .map(|b| b.members.iter().copied().filter(|&d| merger.is_representative(d)).collect())
            .collect();
        for (pos, (block, anchors)) in blocks.iter().zip(&anchors_by_block).enumerate() {
            for &anchor in anchors {
                for neighbour in self.index.window(pos, self.window_radius) {
                    for &candidate in &blocks[neighbour].members {
                        if !merger.is_assigned(candidate) {
                            self.try_merge(merger, anchor, candidate, &mut stats);
                        }
                    }
                }
            }
            info!(
                pass = 2,
                round = pos + 1,
                of = total,
                length = block.length,
                anchors = anchors.len(),
                elapsed_s = start.elapsed().as_secs(),
                "window round done"
            );
        }
        stats.elapsed_ms = start.elapsed().as_millis() as u64;
        info!(pass = 2, comparisons = stats.comparisons, merges = stats.merges, elapsed_ms = stats.elapsed_ms, "window pass finished");
        stats
    }

    pub fn cross_group_pass(&self, merger: &mut GroupMerger) -> PassStats {
        let start = Instant::now();
        let mut stats = PassStats::default();
        let reps = merger.representatives();
        let total = reps.len();
        let mut absorbed = vec![false; total];
        for (i, &rep) in reps.iter().enumerate() {
            if !absorbed[i] {
                for j in (i + 1)..total {
                    if !absorbed[j] && self.try_merge(merger, rep, reps[j], &mut stats) {
                        absorbed[j] = true;
                    }
                }
            }
            if (i + 1) % self.progress_interval == 0 || i + 1 == total {
                info!(
                    pass = 3,
                    round = i + 1,
                    of = total,
                    elapsed_s = start.elapsed().as_secs(),
                    "cross-group progress"
                );
            }
        }
        stats.elapsed_ms = start.elapsed().as_millis() as u64;
        info!(pass = 3, comparisons = stats.comparisons, merges = stats.merges, elapsed_ms = stats.elapsed_ms, "cross-group pass finished");
        stats
    }
}
