//! Group membership with eager propagation.
//!
//! Every assigned document points directly at its group's representative.
//! A merge repoints all members of the absorbed group at once, so there are
//! never representative chains to walk.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct GroupMerger {
    representative: Vec<Option<usize>>,
    /// representative -> members (the representative included), in assignment order.
    members: HashMap<usize, Vec<usize>>,
}

impl GroupMerger {
    pub fn new(documents: usize) -> Self {
        Self { representative: vec![None; documents], members: HashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.representative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.representative.is_empty()
    }

    pub fn representative_of(&self, doc: usize) -> Option<usize> {
        self.representative[doc]
    }

    pub fn is_assigned(&self, doc: usize) -> bool {
        self.representative[doc].is_some()
    }

    pub fn is_representative(&self, doc: usize) -> bool {
        self.representative[doc] == Some(doc)
    }

    pub fn members_of(&self, representative: usize) -> &[usize] {
        self.members.get(&representative).map(Vec::as_slice).unwrap_or(&[])
    }

    fn assign(&mut self, doc: usize, representative: usize) {
        self.representative[doc] = Some(representative);
        self.members.entry(representative).or_default().push(doc);
    }

    /// Put `other` (and everyone sharing its group) into `anchor`'s group.
    ///
    /// An unassigned anchor becomes its own representative. Returns false
    /// when both were already in the same group.
    pub fn merge(&mut self, anchor: usize, other: usize) -> bool {
        if anchor == other {
            return false;
        }
        let target = match self.representative[anchor] {
            Some(r) => r,
            None => {
                self.assign(anchor, anchor);
                anchor
            }
        };
        let source = self.representative[other].unwrap_or(other);
        if source == target {
            return false;
        }
        match self.members.remove(&source) {
            Some(followers) => {
                for doc in followers {
                    self.assign(doc, target);
                }
            }
            None => self.assign(other, target),
        }
        true
    }

    /// Current representatives, ascending.
    pub fn representatives(&self) -> Vec<usize> {
        let mut reps: Vec<usize> = self.members.keys().copied().collect();
        reps.sort_unstable();
        reps
    }

    /// `(representative, members ascending)` for every group, ascending by representative.
    pub fn groups(&self) -> Vec<(usize, Vec<usize>)> {
        self.representatives()
            .into_iter()
            .map(|r| {
                let mut members = self.members[&r].clone();
                members.sort_unstable();
                (r, members)
            })
            .collect()
    }

    pub fn group_count(&self) -> usize {
        self.members.len()
    }
}
