//! Turns final groups into kept / removed partitions and a duplicate report.

use crate::merger::GroupMerger;
use chrono::{DateTime, Utc};
use pd_core::Document;
use serde::Serialize;

/// One member row of the duplicate report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub kept: bool,
}

/// A group of two or more near-duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateGroup {
    /// Sequential group number, starting at 0.
    pub group: usize,
    /// Id of the member that survives (earliest timestamp).
    pub kept_id: String,
    /// Members in ingestion order.
    pub members: Vec<ReportEntry>,
}

/// Positional partition of a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub kept: Vec<usize>,
    pub removed: Vec<usize>,
    /// `(kept position, all member positions)` per group with at least two members.
    pub groups: Vec<(usize, Vec<usize>)>,
}

pub struct DuplicateResolver;

impl DuplicateResolver {
    /// Earliest timestamp wins; equal timestamps go to the earlier ingestion position.
    pub fn select_kept(documents: &[Document], members: &[usize]) -> Option<usize> {
        members.iter().copied().min_by_key(|&i| (documents[i].created_at, i))
    }

    pub fn resolve(
        documents: &[Document],
        merger: &GroupMerger,
        zero_signal: &[usize],
        remove_zero_signal: bool,
    ) -> Resolution {
        let mut removed_flag = vec![false; documents.len()];
        let mut groups = Vec::new();

        for (_, members) in merger.groups() {
            if members.len() < 2 {
                continue;
            }
            let Some(kept) = Self::select_kept(documents, &members) else { continue };
            for &m in &members {
                if m != kept {
                    removed_flag[m] = true;
                }
            }
            groups.push((kept, members));
        }

        if remove_zero_signal {
            for &z in zero_signal {
                removed_flag[z] = true;
            }
        }

        let (removed, kept): (Vec<usize>, Vec<usize>) =
            (0..documents.len()).partition(|&i| removed_flag[i]);
        Resolution { kept, removed, groups }
    }

    pub fn report(documents: &[Document], resolution: &Resolution) -> Vec<DuplicateGroup> {
        resolution
            .groups
            .iter()
            .enumerate()
            .map(|(group, (kept, members))| DuplicateGroup {
                group,
                kept_id: documents[*kept].id.clone(),
                members: members
                    .iter()
                    .map(|&m| ReportEntry {
                        id: documents[m].id.clone(),
                        text: documents[m].text.clone(),
                        created_at: documents[m].created_at,
                        kept: m == *kept,
                    })
                    .collect(),
            })
            .collect()
    }
}
