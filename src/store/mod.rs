pub mod loader;

use crate::error::{HfResult, HuiForgeError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// Dense item handle. Ids are assigned in lexical order of the item labels,
/// so comparing two ids compares their labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u32);

impl ItemId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Canonical itemset: strictly increasing item ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Itemset(Vec<ItemId>);

impl Itemset {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn singleton(item: ItemId) -> Self {
        Self(vec![item])
    }

    pub fn from_items<I: IntoIterator<Item = ItemId>>(items: I) -> Self {
        let mut v: Vec<ItemId> = items.into_iter().collect();
        v.sort_unstable();
        v.dedup();
        Self(v)
    }

    /// Copy of `self` with `item` added at its sorted position.
    pub fn with(&self, item: ItemId) -> Self {
        let mut v = self.0.clone();
        if let Err(pos) = v.binary_search(&item) {
            v.insert(pos, item);
        }
        Self(v)
    }

    pub fn without(&self, item: ItemId) -> Self {
        Self(self.0.iter().copied().filter(|&i| i != item).collect())
    }

    #[inline]
    pub fn contains(&self, item: ItemId) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    pub fn items(&self) -> &[ItemId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Item token as it appears in an input file: either a label or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawItem {
    Label(String),
    Token(i64),
}

impl RawItem {
    pub fn into_label(self) -> String {
        match self {
            RawItem::Label(s) => s,
            RawItem::Token(n) => n.to_string(),
        }
    }
}

impl From<&str> for RawItem {
    fn from(s: &str) -> Self {
        RawItem::Label(s.to_string())
    }
}

/// Unvalidated transaction with the three parallel sequences of the input format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTransaction {
    #[serde(rename = "TID")]
    pub tid: String,
    pub items: Vec<RawItem>,
    pub quantities: Vec<u32>,
    #[serde(rename = "profit")]
    pub profits: Vec<i64>,
}

impl RawTransaction {
    pub fn new(tid: &str, items: &[&str], quantities: &[u32], profits: &[i64]) -> Self {
        Self {
            tid: tid.to_string(),
            items: items.iter().map(|&s| RawItem::from(s)).collect(),
            quantities: quantities.to_vec(),
            profits: profits.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub item: ItemId,
    pub quantity: u32,
    pub profit: i64,
    /// quantity × profit
    pub utility: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    tid: String,
    entries: Vec<Entry>,
}

impl Transaction {
    pub fn tid(&self) -> &str {
        &self.tid
    }

    /// Entries sorted by item id.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.entries.iter().map(|e| e.item)
    }

    #[inline]
    pub fn position(&self, item: ItemId) -> Option<usize> {
        self.entries.binary_search_by(|e| e.item.cmp(&item)).ok()
    }

    #[inline]
    pub fn contains(&self, item: ItemId) -> bool {
        self.position(item).is_some()
    }

    pub fn utility_of(&self, item: ItemId) -> Option<i64> {
        self.position(item).map(|p| self.entries[p].utility)
    }

    /// Sum of quantity × profit over positive-profit entries (TU⁺).
    pub fn positive_utility_sum(&self) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.profit > 0)
            .map(|e| e.utility)
            .sum()
    }

    /// Sum of quantity × profit over every entry.
    pub fn total_utility(&self) -> i64 {
        self.entries.iter().map(|e| e.utility).sum()
    }

    /// Utility of `itemset` in this transaction, or `None` when the
    /// transaction is not a superset of it.
    pub fn itemset_utility(&self, itemset: &Itemset) -> Option<i64> {
        let mut total = 0;
        for item in itemset.iter() {
            total += self.utility_of(item)?;
        }
        Some(total)
    }
}

/// (TU⁺, sum of negative utilities), or `None` if either overflows.
fn signed_sums(entries: &[Entry]) -> Option<(i64, i64)> {
    entries.iter().try_fold((0i64, 0i64), |(gain, loss), e| {
        if e.utility > 0 {
            Some((gain.checked_add(e.utility)?, loss))
        } else {
            Some((gain, loss.checked_add(e.utility)?))
        }
    })
}

/// Immutable, validated transaction database.
#[derive(Debug, Clone, Default)]
pub struct TransactionDb {
    labels: Vec<String>,
    index: HashMap<String, ItemId>,
    transactions: Vec<Transaction>,
}

impl TransactionDb {
    pub fn new(raw: Vec<RawTransaction>) -> HfResult<Self> {
        let mut staged: Vec<(String, Vec<(String, u32, i64)>)> = Vec::with_capacity(raw.len());
        let mut universe = BTreeSet::new();

        for t in raw {
            if t.items.len() != t.quantities.len() || t.items.len() != t.profits.len() {
                return Err(HuiForgeError::malformed(
                    &t.tid,
                    format!(
                        "sequence lengths differ (items {}, quantities {}, profit {})",
                        t.items.len(),
                        t.quantities.len(),
                        t.profits.len()
                    ),
                ));
            }

            let mut seen = HashSet::with_capacity(t.items.len());
            let mut rows = Vec::with_capacity(t.items.len());
            for ((item, quantity), profit) in t.items.into_iter().zip(t.quantities).zip(t.profits)
            {
                let label = item.into_label();
                if !seen.insert(label.clone()) {
                    return Err(HuiForgeError::malformed(
                        &t.tid,
                        format!("item '{}' appears more than once", label),
                    ));
                }
                if quantity == 0 {
                    return Err(HuiForgeError::malformed(
                        &t.tid,
                        format!("item '{}' has zero quantity", label),
                    ));
                }
                universe.insert(label.clone());
                rows.push((label, quantity, profit));
            }
            staged.push((t.tid, rows));
        }

        let labels: Vec<String> = universe.into_iter().collect();
        let index: HashMap<String, ItemId> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), ItemId(i as u32)))
            .collect();

        let mut transactions = Vec::with_capacity(staged.len());
        let (mut db_gain, mut db_loss) = (0i64, 0i64);
        for (tid, rows) in staged {
            let mut entries = Vec::with_capacity(rows.len());
            for (label, quantity, profit) in rows {
                let utility = (quantity as i64).checked_mul(profit).ok_or_else(|| {
                    HuiForgeError::malformed(
                        &tid,
                        format!("utility of item '{}' overflows", label),
                    )
                })?;
                entries.push(Entry {
                    item: index[&label],
                    quantity,
                    profit,
                    utility,
                });
            }
            entries.sort_unstable_by_key(|e| e.item);

            // Every itemset, projection and bound sum lies between the
            // database-wide negative and positive totals.
            let (gain, loss) = signed_sums(&entries)
                .ok_or_else(|| HuiForgeError::malformed(&tid, "transaction utility overflows"))?;
            db_gain = db_gain.checked_add(gain).ok_or_else(|| {
                HuiForgeError::malformed(&tid, "cumulative positive utility overflows")
            })?;
            db_loss = db_loss.checked_add(loss).ok_or_else(|| {
                HuiForgeError::malformed(&tid, "cumulative negative utility overflows")
            })?;

            transactions.push(Transaction { tid, entries });
        }

        debug!(
            "Interned {} items across {} transactions",
            labels.len(),
            transactions.len()
        );

        Ok(Self {
            labels,
            index,
            transactions,
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.labels.len()
    }

    /// Every item of the universe, in lexical order.
    pub fn items(&self) -> impl Iterator<Item = ItemId> {
        (0..self.labels.len() as u32).map(ItemId)
    }

    pub fn item_id(&self, label: &str) -> Option<ItemId> {
        self.index.get(label).copied()
    }

    pub fn label(&self, item: ItemId) -> &str {
        &self.labels[item.index()]
    }

    pub fn labels_of(&self, itemset: &Itemset) -> Vec<String> {
        itemset.iter().map(|i| self.label(i).to_string()).collect()
    }

    /// Builds an itemset from labels; `None` if any label is unknown.
    pub fn itemset(&self, labels: &[&str]) -> Option<Itemset> {
        labels
            .iter()
            .map(|l| self.item_id(l))
            .collect::<Option<Vec<_>>>()
            .map(Itemset::from_items)
    }

    pub fn display_itemset(&self, itemset: &Itemset) -> String {
        format!("{{{}}}", self.labels_of(itemset).join(", "))
    }

    /// Exact utility by a full database scan.
    pub fn exact_utility(&self, itemset: &Itemset) -> i64 {
        self.transactions
            .iter()
            .filter_map(|t| t.itemset_utility(itemset))
            .sum()
    }

    /// Number of transactions containing `itemset`.
    pub fn support(&self, itemset: &Itemset) -> usize {
        self.transactions
            .iter()
            .filter(|t| itemset.iter().all(|i| t.contains(i)))
            .count()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itemset_is_canonical() {
        let a = Itemset::from_items([ItemId(3), ItemId(1), ItemId(3), ItemId(2)]);
        assert_eq!(a.items(), &[ItemId(1), ItemId(2), ItemId(3)]);
        assert_eq!(a.with(ItemId(0)).items()[0], ItemId(0));
        assert_eq!(a.without(ItemId(2)).len(), 2);
        assert!(a.contains(ItemId(2)));
        assert!(!a.contains(ItemId(7)));
    }

    #[test]
    fn test_itemset_order_is_lexical() {
        let ab = Itemset::from_items([ItemId(0), ItemId(1)]);
        let abc = Itemset::from_items([ItemId(0), ItemId(1), ItemId(2)]);
        let b = Itemset::singleton(ItemId(1));
        assert!(ab < abc);
        assert!(abc < b);
    }

    #[test]
    fn test_ids_follow_label_order() {
        let db = TransactionDb::new(vec![RawTransaction::new(
            "T1",
            &["zeta", "alpha", "mid"],
            &[1, 1, 1],
            &[1, 2, 3],
        )])
        .unwrap();
        assert_eq!(db.item_id("alpha"), Some(ItemId(0)));
        assert_eq!(db.item_id("mid"), Some(ItemId(1)));
        assert_eq!(db.item_id("zeta"), Some(ItemId(2)));
        let t = &db.transactions()[0];
        assert_eq!(t.utility_of(ItemId(0)), Some(2));
    }
}
