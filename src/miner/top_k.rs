use super::{SearchContext, Strategy, StrategyKind};
use crate::bounds::Bounds;
use crate::config::TopKParams;
use crate::error::HfResult;
use crate::projection::ProjectedDb;
use crate::results::HighUtilityItemset;
use crate::store::{ItemId, TransactionDb};
use tracing::{debug, info};

/// Top-k search with threshold raising.
///
/// The threshold starts unbounded, is lifted once from the leaf itemset
/// utility table, and then follows the k-th best utility found so far.
/// Only itemsets that occur in at least one transaction are candidates.
#[derive(Debug, Clone)]
pub struct TopKSearch {
    pub params: TopKParams,
}

struct Node {
    projection: ProjectedDb,
    next: usize,
}

impl TopKSearch {
    pub fn new(k: usize) -> Self {
        Self {
            params: TopKParams { k },
        }
    }

    /// Exact utilities of every contiguous range of `ordered` that occurs in
    /// the database. Each range is a distinct itemset, so the k-th largest
    /// value never exceeds the true k-th best utility.
    pub fn leaf_utilities(db: &TransactionDb, ordered: &[ItemId]) -> Vec<i64> {
        let root = ProjectedDb::root(db);
        let mut values = Vec::new();
        for start in 0..ordered.len() {
            let mut projection = root.extend(ordered[start]);
            let mut end = start;
            loop {
                if projection.is_empty() {
                    break;
                }
                values.push(projection.utility());
                end += 1;
                if end == ordered.len() {
                    break;
                }
                projection = projection.extend(ordered[end]);
            }
        }
        values
    }
}

impl Strategy for TopKSearch {
    fn kind(&self) -> StrategyKind {
        StrategyKind::TopK
    }

    fn validate(&self) -> HfResult<()> {
        self.params.validate()
    }

    fn context(&self) -> SearchContext {
        SearchContext::bounded(self.params.k)
    }

    fn explore(
        &self,
        db: &TransactionDb,
        bounds: &Bounds,
        ctx: &mut SearchContext,
    ) -> HfResult<()> {
        let k = self.params.k;

        let secondary =
            bounds.ascending_by_ptwu(db.items().filter(|&i| ctx.admits(bounds.ptwu(i))));

        let mut liu = Self::leaf_utilities(db, &secondary);
        liu.sort_unstable_by(|a, b| b.cmp(a));
        if liu.len() >= k {
            ctx.raise_threshold(liu[k - 1]);
        }
        info!(
            "LIU table: {} ranges, initial threshold {:?}",
            liu.len(),
            ctx.threshold()
        );

        // Items whose PTWU is below the raised threshold cannot be in the answer.
        let order: Vec<ItemId> = secondary
            .into_iter()
            .filter(|&i| ctx.admits(bounds.ptwu(i)))
            .collect();
        debug!("{} items remain after PTWU pruning", order.len());

        let mut stack = vec![Node {
            projection: ProjectedDb::root(db),
            next: 0,
        }];

        while let Some(node) = stack.pop() {
            for pos in node.next..order.len() {
                let z = order[pos];
                let bound = Bounds::rsu(&node.projection, z);
                if !ctx.admits(bound) {
                    ctx.stats_mut().pruned += 1;
                    continue;
                }

                let child = node.projection.extend(z);
                if child.is_empty() || !ctx.visit(child.base()) {
                    continue;
                }
                ctx.stats_mut().evaluated += 1;
                ctx.note_depth(child.base().len());

                let utility = child.utility();
                Bounds::verify(db, child.base(), bound, utility)?;

                if ctx.admits(utility) {
                    ctx.record(HighUtilityItemset::new(child.base().clone(), utility));
                }

                stack.push(Node {
                    projection: child,
                    next: pos + 1,
                });
            }
        }

        Ok(())
    }
}
