//! Length blocking: documents are only compared against documents of equal
//! or nearby retained-token count.

use pd_vector::DocumentVector;
use serde::Serialize;
use std::collections::BTreeMap;

/// All non-zero documents sharing one retained-token count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LengthBlock {
    pub length: usize,
    /// Document positions, in ingestion order.
    pub members: Vec<usize>,
}

/// Blocks sorted by ascending length, plus the signal-free documents set aside.
#[derive(Debug, Clone, Default)]
pub struct LengthBlockIndex {
    blocks: Vec<LengthBlock>,
    zero_signal: Vec<usize>,
}

impl LengthBlockIndex {
    pub fn build(vectors: &[DocumentVector]) -> Self {
        let mut by_length: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        let mut zero_signal = Vec::new();
        for (idx, v) in vectors.iter().enumerate() {
            if v.is_zero() {
                zero_signal.push(idx);
            } else {
                by_length.entry(v.length).or_default().push(idx);
            }
        }
        let blocks = by_length
            .into_iter()
            .map(|(length, members)| LengthBlock { length, members })
            .collect();
        Self { blocks, zero_signal }
    }

    pub fn blocks(&self) -> &[LengthBlock] {
        &self.blocks
    }

    pub fn zero_signal(&self) -> &[usize] {
        &self.zero_signal
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn position_of_length(&self, length: usize) -> Option<usize> {
        self.blocks.binary_search_by_key(&length, |b| b.length).ok()
    }

    /// Block positions within `radius` of `pos`, excluding `pos` itself.
    /// Clipped at both ends; nearer-below first, then above.
    pub fn window(&self, pos: usize, radius: usize) -> impl Iterator<Item = usize> {
        let lo = pos.saturating_sub(radius);
        let hi = pos.saturating_add(radius).min(self.blocks.len().saturating_sub(1));
        (lo..pos).chain((pos + 1)..=hi)
    }
}
