use crate::error::{HfResult, HuiForgeError};
use crate::projection::ProjectedDb;
use crate::store::{ItemId, Itemset, TransactionDb};

/// Per-item transaction-weighted utility table plus the extension bounds
/// derived from projections.
#[derive(Debug, Clone)]
pub struct Bounds {
    ptwu: Vec<i64>,
}

impl Bounds {
    pub fn compute(db: &TransactionDb) -> Self {
        let mut ptwu = vec![0i64; db.item_count()];
        for t in db.transactions() {
            let tu = t.positive_utility_sum();
            for item in t.items() {
                ptwu[item.index()] += tu;
            }
        }
        Self { ptwu }
    }

    /// Positive transaction-weighted utility: Σ TU⁺(T) over T containing `item`.
    #[inline]
    pub fn ptwu(&self, item: ItemId) -> i64 {
        self.ptwu[item.index()]
    }

    /// Same quantity as [`Bounds::ptwu`], under the name the sign-aware search uses.
    #[inline]
    pub fn rtwu(&self, item: ItemId) -> i64 {
        self.ptwu(item)
    }

    /// Items sorted by ascending PTWU, ties by item id.
    pub fn ascending_by_ptwu<I: IntoIterator<Item = ItemId>>(&self, items: I) -> Vec<ItemId> {
        let mut v: Vec<ItemId> = items.into_iter().collect();
        v.sort_unstable_by_key(|&i| (self.ptwu(i), i));
        v
    }

    /// Remaining secondary utility of extending the projection base X by `z`.
    ///
    /// For every projected transaction containing `z` the term is
    /// u(X,T) + u(z,T) + the positive utility of the other remaining items.
    /// Terms are clamped at zero: dropping a transaction with a negative term
    /// would otherwise let a deeper itemset exceed the sum.
    pub fn rsu(projection: &ProjectedDb, z: ItemId) -> i64 {
        projection
            .transactions()
            .iter()
            .filter_map(|pt| {
                let uz = pt.utility_of(z)?;
                let term = pt.prefix_utility() + uz + pt.positive_remaining_except(z);
                Some(term.max(0))
            })
            .sum()
    }

    /// [`Bounds::rsu`] for an itemset given directly against the full database.
    pub fn rsu_from(db: &TransactionDb, x: &Itemset, z: ItemId) -> i64 {
        Self::rsu(&ProjectedDb::build(db, x), z)
    }

    /// Upper bound on X ∪ {e} ∪ N where every item of N has non-positive
    /// utility everywhere: Σ max(0, u(X,T) + u(e,T)) over T ⊇ X ∪ {e}.
    pub fn negative_extension_bound(projection: &ProjectedDb, e: ItemId) -> i64 {
        projection
            .transactions()
            .iter()
            .filter_map(|pt| {
                let ue = pt.utility_of(e)?;
                Some((pt.prefix_utility() + ue).max(0))
            })
            .sum()
    }

    /// Surfaces a bound that undercuts an exact utility as an error.
    pub fn verify(
        db: &TransactionDb,
        itemset: &Itemset,
        bound: i64,
        utility: i64,
    ) -> HfResult<()> {
        if bound < utility {
            return Err(HuiForgeError::UnsoundBound {
                bound,
                utility,
                itemset: db.display_itemset(itemset),
            });
        }
        Ok(())
    }
}
