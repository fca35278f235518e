use crate::store::{ItemId, TransactionDb};
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

/// Utility-sign class of an item across all of its occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize)]
#[strum(serialize_all = "snake_case")]
pub enum ItemClass {
    /// Never negative, positive at least once.
    Positive,
    /// Positive in some transactions, negative in others.
    Mixed,
    /// Non-positive everywhere (an item that is always zero lands here).
    Negative,
}

#[derive(Debug, Clone)]
pub struct Classification {
    classes: Vec<ItemClass>,
}

impl Classification {
    pub fn classify(db: &TransactionDb) -> Self {
        // (seen positive, seen negative); zero occurrences leave both unset
        let mut signs = vec![(false, false); db.item_count()];
        for t in db.transactions() {
            for e in t.entries() {
                let s = &mut signs[e.item.index()];
                if e.utility > 0 {
                    s.0 = true;
                } else if e.utility < 0 {
                    s.1 = true;
                }
            }
        }

        let classes = signs
            .into_iter()
            .map(|s| match s {
                (true, false) => ItemClass::Positive,
                (true, true) => ItemClass::Mixed,
                (false, _) => ItemClass::Negative,
            })
            .collect();
        Self { classes }
    }

    pub fn class_of(&self, item: ItemId) -> ItemClass {
        self.classes[item.index()]
    }

    pub fn members(&self, class: ItemClass) -> Vec<ItemId> {
        self.classes
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == class)
            .map(|(i, _)| ItemId(i as u32))
            .collect()
    }

    pub fn positive(&self) -> Vec<ItemId> {
        self.members(ItemClass::Positive)
    }

    pub fn mixed(&self) -> Vec<ItemId> {
        self.members(ItemClass::Mixed)
    }

    pub fn negative(&self) -> Vec<ItemId> {
        self.members(ItemClass::Negative)
    }

    /// Positive ∪ mixed items, in id order.
    pub fn primary_candidates(&self) -> Vec<ItemId> {
        self.classes
            .iter()
            .enumerate()
            .filter(|(_, &c)| c != ItemClass::Negative)
            .map(|(i, _)| ItemId(i as u32))
            .collect()
    }
}
