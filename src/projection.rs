//! Projected databases.
//!
//! A projection at itemset X keeps only the transactions that contain X,
//! strips X's entries from them, and remembers u(X, T) as the prefix utility
//! of each kept transaction. Extension utilities can then be read from the
//! projection alone, without touching the full database again.

use crate::store::{Entry, ItemId, Itemset, TransactionDb};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedTransaction {
    tid_index: usize,
    prefix_utility: i64,
    entries: Vec<Entry>,
}

impl ProjectedTransaction {
    /// Index of the source transaction in the full database.
    pub fn tid_index(&self) -> usize {
        self.tid_index
    }

    /// Utility of the projection's base itemset in this transaction.
    pub fn prefix_utility(&self) -> i64 {
        self.prefix_utility
    }

    /// Remaining entries (base items removed), sorted by item id.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn position(&self, item: ItemId) -> Option<usize> {
        self.entries.binary_search_by(|e| e.item.cmp(&item)).ok()
    }

    pub fn utility_of(&self, item: ItemId) -> Option<i64> {
        self.position(item).map(|p| self.entries[p].utility)
    }

    /// Sum of positive-profit utility over the remaining entries, skipping `except`.
    pub fn positive_remaining_except(&self, except: ItemId) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.item != except && e.profit > 0)
            .map(|e| e.utility)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedDb {
    base: Itemset,
    transactions: Vec<ProjectedTransaction>,
}

impl ProjectedDb {
    /// Projection at the empty itemset: every transaction, prefix utility 0.
    pub fn root(db: &TransactionDb) -> Self {
        let transactions = db
            .transactions()
            .iter()
            .enumerate()
            .map(|(i, t)| ProjectedTransaction {
                tid_index: i,
                prefix_utility: 0,
                entries: t.entries().to_vec(),
            })
            .collect();
        Self {
            base: Itemset::empty(),
            transactions,
        }
    }

    /// Projection at `itemset`, built directly from the full database.
    pub fn build(db: &TransactionDb, itemset: &Itemset) -> Self {
        let transactions = db
            .transactions()
            .iter()
            .enumerate()
            .filter_map(|(i, t)| {
                let prefix_utility = t.itemset_utility(itemset)?;
                let entries = t
                    .entries()
                    .iter()
                    .filter(|e| !itemset.contains(e.item))
                    .copied()
                    .collect();
                Some(ProjectedTransaction {
                    tid_index: i,
                    prefix_utility,
                    entries,
                })
            })
            .collect();
        Self {
            base: itemset.clone(),
            transactions,
        }
    }

    /// Projection at `base ∪ {item}` derived from this projection.
    pub fn extend(&self, item: ItemId) -> Self {
        let transactions = self
            .transactions
            .iter()
            .filter_map(|pt| {
                let pos = pt.position(item)?;
                let mut entries = Vec::with_capacity(pt.entries.len() - 1);
                entries.extend_from_slice(&pt.entries[..pos]);
                entries.extend_from_slice(&pt.entries[pos + 1..]);
                Some(ProjectedTransaction {
                    tid_index: pt.tid_index,
                    prefix_utility: pt.prefix_utility + pt.entries[pos].utility,
                    entries,
                })
            })
            .collect();
        Self {
            base: self.base.with(item),
            transactions,
        }
    }

    pub fn base(&self) -> &Itemset {
        &self.base
    }

    pub fn transactions(&self) -> &[ProjectedTransaction] {
        &self.transactions
    }

    /// Number of transactions containing the base itemset.
    pub fn support(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Exact utility of the base itemset.
    pub fn utility(&self) -> i64 {
        self.transactions.iter().map(|pt| pt.prefix_utility).sum()
    }

    /// Exact utility of `extension`, which must be a superset of the base.
    pub fn utility_of_extension(&self, extension: &Itemset) -> i64 {
        debug_assert!(
            self.base.iter().all(|i| extension.contains(i)),
            "extension must contain the projection base"
        );
        let added: Vec<ItemId> = extension
            .iter()
            .filter(|&i| !self.base.contains(i))
            .collect();

        self.transactions
            .iter()
            .filter_map(|pt| {
                let mut total = pt.prefix_utility;
                for &item in &added {
                    total += pt.utility_of(item)?;
                }
                Some(total)
            })
            .sum()
    }
}
