use std::collections::BTreeMap;

use serde::Serialize;

use crate::StickerId;

/// Sparse mapping from sticker id to owned count.
///
/// Absence of a key means "not owned"; every stored count is >= 1. A
/// count of zero is never representable, removal is the only way to
/// express it. Backed by a `BTreeMap` so all enumeration is ascending
/// by id, which keeps saves and reports deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    counts: BTreeMap<StickerId, u32>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct owned ids.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn contains(&self, id: StickerId) -> bool {
        self.counts.contains_key(&id)
    }

    /// Owned count for `id`, zero when absent.
    pub fn count_of(&self, id: StickerId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Set the count for `id`. A count of zero removes the entry,
    /// preserving the "absence means not owned" invariant.
    pub fn set_count(&mut self, id: StickerId, count: u32) {
        if count == 0 {
            self.counts.remove(&id);
        } else {
            self.counts.insert(id, count);
        }
    }

    /// Insert `id` with count 1 if absent. Returns true when newly added.
    pub fn add_one(&mut self, id: StickerId) -> bool {
        if self.counts.contains_key(&id) {
            false
        } else {
            self.counts.insert(id, 1);
            true
        }
    }

    /// Increment the count for an owned id (inserts with count 1 if absent).
    pub fn increment(&mut self, id: StickerId) {
        *self.counts.entry(id).or_insert(0) += 1;
    }

    /// Iterate `(id, count)` pairs ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = (StickerId, u32)> + '_ {
        self.counts.iter().map(|(&id, &count)| (id, count))
    }

    /// Owned ids ascending.
    pub fn owned_ids(&self) -> impl Iterator<Item = StickerId> + '_ {
        self.counts.keys().copied()
    }

    /// Ids in `[1, domain]` not present in the collection, ascending.
    pub fn missing_ids(&self, domain: u32) -> Vec<StickerId> {
        (1..=domain).filter(|id| !self.contains(*id)).collect()
    }

    /// `(id, count - 1)` for every id owned more than once, ascending.
    /// The exchangeable excess.
    pub fn duplicate_surplus(&self) -> Vec<(StickerId, u32)> {
        self.counts
            .iter()
            .filter(|(_, &count)| count > 1)
            .map(|(&id, &count)| (id, count - 1))
            .collect()
    }

    /// Drop ids outside `[1, domain]`. Externally supplied peer data is
    /// sanitized this way before reconciliation.
    pub fn retain_domain(&mut self, domain: u32) {
        self.counts.retain(|&id, _| (1..=domain).contains(&id));
    }

    pub fn stats(&self, domain: u32) -> CollectionStats {
        let owned = self.len();
        let duplicates = self.counts.values().filter(|&&c| c > 1).map(|c| c - 1).sum();
        CollectionStats {
            owned,
            missing: domain as usize - owned,
            total: domain,
            duplicates,
            progress_percent: 100.0 * owned as f64 / domain as f64,
        }
    }
}

impl FromIterator<(StickerId, u32)> for Collection {
    /// Builds a collection from `(id, count)` pairs, dropping pairs with
    /// a zero count.
    fn from_iter<I: IntoIterator<Item = (StickerId, u32)>>(iter: I) -> Self {
        let mut collection = Self::new();
        for (id, count) in iter {
            collection.set_count(id, count);
        }
        collection
    }
}

/// Single-collection completion summary. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionStats {
    /// Distinct ids owned.
    pub owned: usize,
    /// `domain - owned`.
    pub missing: usize,
    /// Domain size.
    pub total: u32,
    /// Total exchangeable excess, sum of `count - 1` over counts > 1.
    pub duplicates: u32,
    /// `100 * owned / total`. Rounding to one decimal happens at display
    /// time only.
    pub progress_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_means_absent() {
        let mut c = Collection::new();
        c.set_count(5, 2);
        c.set_count(5, 0);
        assert!(!c.contains(5));
        assert_eq!(c.count_of(5), 0);
        assert!(c.is_empty());
    }

    #[test]
    fn missing_is_complement_of_owned() {
        let c: Collection = [(1, 1), (2, 2), (3, 1)].into_iter().collect();
        assert_eq!(c.missing_ids(5), vec![4, 5]);
    }

    #[test]
    fn surplus_excludes_singletons() {
        let c: Collection = [(1, 1), (2, 2), (3, 1)].into_iter().collect();
        assert_eq!(c.duplicate_surplus(), vec![(2, 1)]);
    }

    #[test]
    fn empty_collection_misses_whole_domain() {
        let c = Collection::new();
        assert_eq!(c.missing_ids(5), vec![1, 2, 3, 4, 5]);
        assert!(c.duplicate_surplus().is_empty());
    }

    #[test]
    fn stats_scenario() {
        let c: Collection = [(1, 1), (2, 2), (3, 1)].into_iter().collect();
        let stats = c.stats(5);
        assert_eq!(stats.owned, 3);
        assert_eq!(stats.missing, 2);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.duplicates, 1);
        assert!((stats.progress_percent - 60.0).abs() < 1e-9);
    }

    #[test]
    fn retain_domain_drops_out_of_range() {
        let mut c: Collection = [(0, 1), (4, 2), (721, 3)].into_iter().collect();
        c.retain_domain(720);
        assert_eq!(c.owned_ids().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn iteration_is_ascending() {
        let c: Collection = [(9, 1), (1, 1), (5, 1)].into_iter().collect();
        assert_eq!(c.owned_ids().collect::<Vec<_>>(), vec![1, 5, 9]);
    }
}
