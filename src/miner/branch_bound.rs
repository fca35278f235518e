use super::{SearchContext, Strategy, StrategyKind};
use crate::bounds::Bounds;
use crate::classify::Classification;
use crate::config::MiningParams;
use crate::error::HfResult;
use crate::projection::ProjectedDb;
use crate::results::HighUtilityItemset;
use crate::store::{ItemId, TransactionDb};
use tracing::{debug, info};

/// Sign-aware branch-and-bound over a set-enumeration tree.
///
/// Items are split by the sign of their utility. Positive and mixed items
/// (ordered by ascending RTWU) form the primary phase; negative items come
/// last in the order, so they are only ever appended to itemsets that
/// already hold a primary item. Each candidate is cut as soon as its bound
/// at the current node drops below the threshold: RSU for primary items,
/// the negative extension bound once only negative items remain.
#[derive(Debug, Clone)]
pub struct BranchAndBound {
    pub params: MiningParams,
}

/// Enumeration order for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOrder {
    /// Secondary (primary-phase) items followed by eligible negative items.
    pub items: Vec<ItemId>,
    /// Number of leading entries of `items` that are positive or mixed.
    pub primary_len: usize,
}

impl SearchOrder {
    pub fn secondary(&self) -> &[ItemId] {
        &self.items[..self.primary_len]
    }

    pub fn negative(&self) -> &[ItemId] {
        &self.items[self.primary_len..]
    }
}

/// A root child: position in the search order, item and its RSU at the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    pub pos: usize,
    pub item: ItemId,
    pub bound: i64,
}

struct Node {
    projection: ProjectedDb,
    next: usize,
}

impl BranchAndBound {
    pub fn new(min_utility: i64) -> Self {
        Self {
            params: MiningParams { min_utility },
        }
    }

    /// Secondary items: positive ∪ mixed with RTWU ≥ threshold, then the
    /// negative items passing the same test.
    pub fn search_order(
        &self,
        bounds: &Bounds,
        classes: &Classification,
    ) -> SearchOrder {
        let min_utility = self.params.min_utility;
        let secondary = bounds.ascending_by_ptwu(
            classes
                .primary_candidates()
                .into_iter()
                .filter(|&i| bounds.rtwu(i) >= min_utility),
        );
        let negative = bounds.ascending_by_ptwu(
            classes
                .negative()
                .into_iter()
                .filter(|&i| bounds.rtwu(i) >= min_utility),
        );

        let primary_len = secondary.len();
        let mut items = secondary;
        items.extend(negative);
        SearchOrder { items, primary_len }
    }

    /// Secondary items whose RSU against the empty itemset reaches the
    /// threshold. These are the only children of the root: itemsets made
    /// only of negative items never reach a positive threshold.
    pub fn primary_seeds(&self, root: &ProjectedDb, order: &SearchOrder) -> Vec<Seed> {
        order
            .secondary()
            .iter()
            .enumerate()
            .filter_map(|(pos, &item)| {
                let bound = Bounds::rsu(root, item);
                (bound >= self.params.min_utility).then_some(Seed { pos, item, bound })
            })
            .collect()
    }

    /// Evaluates `parent ∪ {z}` and returns the frame to descend into, if any.
    fn expand(
        &self,
        db: &TransactionDb,
        ctx: &mut SearchContext,
        parent: &ProjectedDb,
        pos: usize,
        z: ItemId,
        bound: i64,
    ) -> HfResult<Option<Node>> {
        let child = parent.extend(z);
        if child.is_empty() || !ctx.visit(child.base()) {
            return Ok(None);
        }
        ctx.stats_mut().evaluated += 1;
        ctx.note_depth(child.base().len());

        let utility = child.utility();
        Bounds::verify(db, child.base(), bound, utility)?;

        if utility >= self.params.min_utility && utility > 0 {
            ctx.record(HighUtilityItemset::new(child.base().clone(), utility));
        }

        Ok(Some(Node {
            projection: child,
            next: pos + 1,
        }))
    }
}

impl Strategy for BranchAndBound {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BranchAndBound
    }

    fn validate(&self) -> HfResult<()> {
        self.params.validate()
    }

    fn context(&self) -> SearchContext {
        SearchContext::qualifying(self.params.min_utility)
    }

    fn explore(
        &self,
        db: &TransactionDb,
        bounds: &Bounds,
        ctx: &mut SearchContext,
    ) -> HfResult<()> {
        let min_utility = self.params.min_utility;
        let classes = Classification::classify(db);
        info!(
            "Classified items: {} positive, {} mixed, {} negative",
            classes.positive().len(),
            classes.mixed().len(),
            classes.negative().len()
        );

        let order = self.search_order(bounds, &classes);
        let root = ProjectedDb::root(db);
        let seeds = self.primary_seeds(&root, &order);
        debug!(
            "Search order: {} secondary ({} primary seeds), {} negative",
            order.primary_len,
            seeds.len(),
            order.items.len() - order.primary_len
        );
        ctx.stats_mut().pruned += order.primary_len - seeds.len();

        let mut stack = Vec::with_capacity(seeds.len());
        for seed in &seeds {
            if let Some(node) = self.expand(db, ctx, &root, seed.pos, seed.item, seed.bound)? {
                stack.push(node);
            }
        }

        while let Some(node) = stack.pop() {
            for pos in node.next..order.items.len() {
                let z = order.items[pos];
                let bound = if pos < order.primary_len {
                    Bounds::rsu(&node.projection, z)
                } else {
                    Bounds::negative_extension_bound(&node.projection, z)
                };
                if bound < min_utility {
                    ctx.stats_mut().pruned += 1;
                    continue;
                }

                if let Some(child) = self.expand(db, ctx, &node.projection, pos, z, bound)? {
                    stack.push(child);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RawTransaction;

    fn db() -> TransactionDb {
        TransactionDb::new(vec![
            RawTransaction::new("T1", &["a", "b", "n"], &[2, 1, 1], &[4, 1, -3]),
            RawTransaction::new("T2", &["b", "m", "n"], &[3, 1, 2], &[1, -1, -1]),
            RawTransaction::new("T3", &["a", "m"], &[1, 1], &[2, 1]),
        ])
        .unwrap()
    }

    #[test]
    fn test_search_order_puts_negatives_last() {
        let db = db();
        let bounds = Bounds::compute(&db);
        let classes = Classification::classify(&db);
        let order = BranchAndBound::new(1).search_order(&bounds, &classes);

        let labels: Vec<&str> = order.items.iter().map(|&i| db.label(i)).collect();
        // PTWU: a 12, b 12, m 6 (mixed), n 12
        assert_eq!(labels, vec!["m", "a", "b", "n"]);
        assert_eq!(order.primary_len, 3);
        assert_eq!(order.negative(), &[db.item_id("n").unwrap()]);
    }

    #[test]
    fn test_seeds_are_the_only_root_children() {
        // RSU(∅, m) = max(0, -1 + 3) + max(0, 1 + 2) = 5, so m is not a seed at 6
        let db = db();
        let bounds = Bounds::compute(&db);
        let strategy = BranchAndBound::new(6);
        let mut ctx = strategy.context();
        strategy.explore(&db, &bounds, &mut ctx).unwrap();

        let m = db.item_id("m").unwrap();
        // never explored, so the visited set still accepts it
        assert!(ctx.visit(&crate::store::Itemset::singleton(m)));
        let outcome = ctx.finish(StrategyKind::BranchAndBound, Default::default());
        assert!(outcome.results.iter().all(|h| !h.itemset.contains(m)));
        assert!(outcome.stats.pruned >= 1);
    }

    #[test]
    fn test_threshold_filters_order_and_seeds() {
        let db = db();
        let bounds = Bounds::compute(&db);
        let classes = Classification::classify(&db);
        let strategy = BranchAndBound::new(10);
        let order = strategy.search_order(&bounds, &classes);

        let labels: Vec<&str> = order.secondary().iter().map(|&i| db.label(i)).collect();
        assert_eq!(labels, vec!["a", "b"]);
        // RSU(∅, b) = max(0, 1 + 8) + max(0, 3 + 0) = 12; RSU(∅, a) = 9 + 3 = 12
        let seeds = strategy.primary_seeds(&ProjectedDb::root(&db), &order);
        let bounds: Vec<(usize, i64)> = seeds.iter().map(|s| (s.pos, s.bound)).collect();
        assert_eq!(bounds, vec![(0, 12), (1, 12)]);
    }
}
