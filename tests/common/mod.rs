#![allow(dead_code)]

use huiforge::{Itemset, RawTransaction, TransactionDb};
use proptest::prelude::*;

/// Builder for transaction databases in tests.
#[derive(Default)]
pub struct DbBuilder {
    raw: Vec<RawTransaction>,
}

impl DbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a transaction of `(label, quantity, profit)` entries.
    pub fn tx(mut self, tid: &str, entries: &[(&str, u32, i64)]) -> Self {
        let items: Vec<&str> = entries.iter().map(|e| e.0).collect();
        let quantities: Vec<u32> = entries.iter().map(|e| e.1).collect();
        let profits: Vec<i64> = entries.iter().map(|e| e.2).collect();
        self.raw
            .push(RawTransaction::new(tid, &items, &quantities, &profits));
        self
    }

    pub fn raw(self) -> Vec<RawTransaction> {
        self.raw
    }

    pub fn build(self) -> TransactionDb {
        TransactionDb::new(self.raw).unwrap()
    }
}

/// The five-transaction retail example shipped as `data/example.json`.
pub fn worked_example() -> TransactionDb {
    DbBuilder::new()
        .tx("T1", &[("a", 2, 2), ("b", 3, 1), ("d", 1, 3), ("h", 1, -1)])
        .tx("T2", &[("a", 2, 2), ("c", 4, 1), ("e", 2, -1), ("h", 3, -1)])
        .tx(
            "T3",
            &[("b", 6, 1), ("c", 3, 1), ("d", 1, 3), ("e", 3, -1), ("f", 2, 5)],
        )
        .tx("T4", &[("a", 4, 2), ("b", 3, 1), ("c", 3, 1), ("g", 2, -1)])
        .tx(
            "T5",
            &[("b", 4, 1), ("d", 4, 3), ("e", 1, -1), ("g", 2, -1), ("h", 1, -1)],
        )
        .build()
}

/// Ranked answer for the worked example at min_utility = 14.
pub const WORKED_EXAMPLE_MIN14: [(&str, i64); 20] = [
    ("bd", 31),
    ("bcdf", 22),
    ("bde", 21),
    ("bdh", 20),
    ("ac", 19),
    ("bcdef", 19),
    ("bcf", 19),
    ("bdf", 19),
    ("ab", 18),
    ("d", 18),
    ("a", 16),
    ("b", 16),
    ("bcef", 16),
    ("bdef", 16),
    ("bf", 16),
    ("cdf", 16),
    ("bc", 15),
    ("abc", 14),
    ("bdeh", 14),
    ("bdg", 14),
];

/// Concatenated single-letter labels, e.g. "bcd".
pub fn compact(labels: &[String]) -> String {
    labels.concat()
}

/// Every non-empty subset of the item universe with its exact utility and support.
pub fn all_itemsets(db: &TransactionDb) -> Vec<(Itemset, i64, usize)> {
    let items: Vec<_> = db.items().collect();
    let n = items.len();
    (1u32..(1 << n))
        .map(|mask| {
            let set = Itemset::from_items(
                (0..n)
                    .filter(|&b| mask & (1 << b) != 0)
                    .map(|b| items[b]),
            );
            let u = db.exact_utility(&set);
            let s = db.support(&set);
            (set, u, s)
        })
        .collect()
}

const LABELS: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];

prop_compose! {
    fn arb_transaction(width: usize)(
        slots in proptest::collection::vec((any::<bool>(), 1u32..5, -6i64..8), width)
    ) -> Vec<(usize, u32, i64)> {
        slots
            .into_iter()
            .enumerate()
            .filter(|(_, s)| s.0)
            .map(|(i, s)| (i, s.1, s.2))
            .collect()
    }
}

prop_compose! {
    /// Small databases with mixed-sign profits over at most `width` items.
    pub fn arb_db(width: usize)(
        txs in proptest::collection::vec(arb_transaction(width), 0..7)
    ) -> TransactionDb {
        let raw = txs
            .into_iter()
            .enumerate()
            .map(|(t, entries)| {
                let items: Vec<&str> = entries.iter().map(|e| LABELS[e.0]).collect();
                let quantities: Vec<u32> = entries.iter().map(|e| e.1).collect();
                let profits: Vec<i64> = entries.iter().map(|e| e.2).collect();
                RawTransaction::new(&format!("T{}", t + 1), &items, &quantities, &profits)
            })
            .collect();
        TransactionDb::new(raw).unwrap()
    }
}
