use super::{SearchContext, Strategy, StrategyKind};
use crate::bounds::Bounds;
use crate::config::MiningParams;
use crate::error::HfResult;
use crate::results::HighUtilityItemset;
use crate::store::{ItemId, Itemset, TransactionDb};
use itertools::Itertools;
use tracing::debug;

/// Scores every subset of the item universe by a full database scan.
///
/// No pruning at all; exponential in the number of items. Serves as the
/// reference answer the pruned strategies are checked against.
#[derive(Debug, Clone)]
pub struct Exhaustive {
    pub params: MiningParams,
}

impl Exhaustive {
    pub fn new(min_utility: i64) -> Self {
        Self {
            params: MiningParams { min_utility },
        }
    }
}

impl Strategy for Exhaustive {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Exhaustive
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
        _bounds: &Bounds,
        ctx: &mut SearchContext,
    ) -> HfResult<()> {
        let min_utility = self.params.min_utility;
        let universe: Vec<ItemId> = db.items().collect();

        for len in 1..=universe.len() {
            // itertools yields combinations lexically without recursion
            for combo in universe.iter().copied().combinations(len) {
                let itemset = Itemset::from_items(combo);
                if !ctx.visit(&itemset) {
                    continue;
                }
                ctx.stats_mut().evaluated += 1;

                let utility = db.exact_utility(&itemset);
                if utility >= min_utility {
                    ctx.record(HighUtilityItemset::new(itemset, utility));
                }
            }
            ctx.note_depth(len);
            debug!("Length {} done: {} qualifying so far", len, ctx.result_count());
        }
        Ok(())
    }
}
