use crate::store::{Itemset, TransactionDb};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HighUtilityItemset {
    pub itemset: Itemset,
    pub utility: i64,
}

impl HighUtilityItemset {
    pub fn new(itemset: Itemset, utility: i64) -> Self {
        Self { itemset, utility }
    }

    /// Ranking order: utility descending, then canonical itemset order.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .utility
            .cmp(&self.utility)
            .then_with(|| self.itemset.cmp(&other.itemset))
    }
}

pub fn rank(results: &mut [HighUtilityItemset]) {
    results.sort_by(HighUtilityItemset::rank_cmp);
}

/// Output row with item labels resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinedItemset {
    pub items: Vec<String>,
    pub utility: i64,
}

impl MinedItemset {
    pub fn resolve(db: &TransactionDb, hui: &HighUtilityItemset) -> Self {
        Self {
            items: db.labels_of(&hui.itemset),
            utility: hui.utility,
        }
    }
}

/// Bounded best-k structure kept sorted by descending utility.
///
/// Among entries tied at the boundary, the one inserted first survives
/// eviction.
#[derive(Debug, Clone)]
pub struct TopK {
    k: usize,
    entries: Vec<HighUtilityItemset>,
}

impl TopK {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            entries: Vec::with_capacity(k + 1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.k
    }

    /// Inserts `hui`, evicting the minimum if over capacity.
    /// Returns whether `hui` is still held afterwards.
    pub fn insert(&mut self, hui: HighUtilityItemset) -> bool {
        let pos = self.entries.partition_point(|e| e.utility >= hui.utility);
        if pos >= self.k {
            return false;
        }
        self.entries.insert(pos, hui);
        if self.entries.len() > self.k {
            self.entries.pop();
        }
        true
    }

    /// Utility of the k-th best entry once the structure is full.
    pub fn kth_utility(&self) -> Option<i64> {
        if self.is_full() {
            self.entries.last().map(|e| e.utility)
        } else {
            None
        }
    }

    pub fn entries(&self) -> &[HighUtilityItemset] {
        &self.entries
    }

    /// Entries in final ranking order.
    pub fn into_ranked(self) -> Vec<HighUtilityItemset> {
        let mut v = self.entries;
        rank(&mut v);
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ItemId;

    fn hui(id: u32, utility: i64) -> HighUtilityItemset {
        HighUtilityItemset::new(Itemset::singleton(ItemId(id)), utility)
    }

    #[test]
    fn test_topk_keeps_best() {
        let mut top = TopK::new(2);
        assert_eq!(top.capacity(), 2);
        assert!(top.insert(hui(0, 5)));
        assert_eq!(top.kth_utility(), None);
        assert!(top.insert(hui(1, 9)));
        assert_eq!(top.kth_utility(), Some(5));
        assert!(top.insert(hui(2, 7)));
        assert_eq!(top.kth_utility(), Some(7));
        assert!(!top.insert(hui(3, 1)));
        let utils: Vec<i64> = top.entries().iter().map(|e| e.utility).collect();
        assert_eq!(utils, vec![9, 7]);
    }

    #[test]
    fn test_topk_first_seen_wins_ties() {
        let mut top = TopK::new(2);
        top.insert(hui(5, 10));
        top.insert(hui(4, 3));
        top.insert(hui(0, 3));
        let ids: Vec<u32> = top.entries().iter().map(|e| e.itemset.items()[0].0).collect();
        assert_eq!(ids, vec![5, 4]);
    }

    #[test]
    fn test_rank_breaks_ties_canonically() {
        let mut v = vec![hui(2, 4), hui(1, 4), hui(3, 8)];
        rank(&mut v);
        let ids: Vec<u32> = v.iter().map(|e| e.itemset.items()[0].0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
