pub mod branch_bound;
pub mod exhaustive;
pub mod genetic;
pub mod mutation;
pub mod top_k;

pub use self::branch_bound::BranchAndBound;
pub use self::exhaustive::Exhaustive;
pub use self::genetic::GeneticSearch;
pub use self::top_k::TopKSearch;

use crate::bounds::Bounds;
use crate::error::HfResult;
use crate::results::{rank, HighUtilityItemset, MinedItemset, TopK};
use crate::store::{Itemset, TransactionDb};
use serde::Serialize;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum StrategyKind {
    Exhaustive,
    BranchAndBound,
    TopK,
    Genetic,
}

/// One enumeration policy over the itemset space.
///
/// Strategies hold only their parameters. Everything that changes during a
/// run lives in the [`SearchContext`] handed to `explore`.
pub trait Strategy {
    fn kind(&self) -> StrategyKind;

    /// Rejects parameters outside their domain before any work starts.
    fn validate(&self) -> HfResult<()>;

    /// Fresh context with the collector this strategy needs.
    fn context(&self) -> SearchContext;

    fn explore(
        &self,
        db: &TransactionDb,
        bounds: &Bounds,
        ctx: &mut SearchContext,
    ) -> HfResult<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Itemsets whose exact utility was computed.
    pub evaluated: usize,
    /// Candidate extensions cut by a bound.
    pub pruned: usize,
    pub accepted: usize,
    pub max_depth: usize,
}

#[derive(Debug)]
enum Collector {
    Qualifying(Vec<HighUtilityItemset>),
    Bounded(TopK),
}

/// Mutable state of a single run. Created per run and consumed by `finish`.
#[derive(Debug)]
pub struct SearchContext {
    visited: HashSet<Itemset>,
    collector: Collector,
    /// `None` stands for an unbounded (−∞) threshold.
    threshold: Option<i64>,
    threshold_history: Vec<i64>,
    stats: SearchStats,
}

impl SearchContext {
    /// Collects every itemset reaching a fixed absolute threshold.
    pub fn qualifying(min_utility: i64) -> Self {
        Self {
            visited: HashSet::new(),
            collector: Collector::Qualifying(Vec::new()),
            threshold: Some(min_utility),
            threshold_history: vec![min_utility],
            stats: SearchStats::default(),
        }
    }

    /// Keeps the best `k` itemsets; the threshold starts unbounded and rises
    /// as the structure fills.
    pub fn bounded(k: usize) -> Self {
        Self {
            visited: HashSet::new(),
            collector: Collector::Bounded(TopK::new(k)),
            threshold: None,
            threshold_history: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Marks `itemset` as explored. Returns false if it was seen before.
    pub fn visit(&mut self, itemset: &Itemset) -> bool {
        if self.visited.contains(itemset) {
            return false;
        }
        self.visited.insert(itemset.clone());
        true
    }

    pub fn threshold(&self) -> Option<i64> {
        self.threshold
    }

    #[inline]
    pub fn admits(&self, value: i64) -> bool {
        self.threshold.map_or(true, |t| value >= t)
    }

    /// Raises the threshold to `value` if that is higher. Never lowers it.
    pub fn raise_threshold(&mut self, value: i64) {
        if self.threshold.map_or(true, |t| value > t) {
            debug!("Threshold raised to {}", value);
            self.threshold = Some(value);
            self.threshold_history.push(value);
        }
    }

    pub fn threshold_history(&self) -> &[i64] {
        &self.threshold_history
    }

    /// Adds an accepted itemset to the collector.
    pub fn record(&mut self, hui: HighUtilityItemset) {
        self.stats.accepted += 1;
        let raised = match &mut self.collector {
            Collector::Qualifying(found) => {
                found.push(hui);
                None
            }
            Collector::Bounded(top) => {
                top.insert(hui);
                top.kth_utility()
            }
        };
        if let Some(kth) = raised {
            self.raise_threshold(kth);
        }
    }

    pub fn result_count(&self) -> usize {
        match &self.collector {
            Collector::Qualifying(found) => found.len(),
            Collector::Bounded(top) => top.len(),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }

    pub(crate) fn note_depth(&mut self, depth: usize) {
        if depth > self.stats.max_depth {
            self.stats.max_depth = depth;
        }
    }

    /// Ranked results, consuming the context.
    pub fn finish(self, strategy: StrategyKind, elapsed: Duration) -> MiningOutcome {
        let results = match self.collector {
            Collector::Qualifying(mut found) => {
                rank(&mut found);
                found
            }
            Collector::Bounded(top) => top.into_ranked(),
        };
        MiningOutcome {
            strategy,
            results,
            final_threshold: self.threshold,
            threshold_history: self.threshold_history,
            stats: self.stats,
            elapsed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MiningOutcome {
    pub strategy: StrategyKind,
    /// Utility descending, canonical itemset order on ties.
    pub results: Vec<HighUtilityItemset>,
    pub final_threshold: Option<i64>,
    pub threshold_history: Vec<i64>,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

impl MiningOutcome {
    pub fn resolve(&self, db: &TransactionDb) -> Vec<MinedItemset> {
        self.results
            .iter()
            .map(|hui| MinedItemset::resolve(db, hui))
            .collect()
    }
}

/// Runs strategies against one database, sharing its bound table.
pub struct Miner<'a> {
    db: &'a TransactionDb,
    bounds: Bounds,
}

impl<'a> Miner<'a> {
    pub fn new(db: &'a TransactionDb) -> Self {
        let bounds = Bounds::compute(db);
        debug!("PTWU table computed for {} items", db.item_count());
        Self { db, bounds }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn run(&self, strategy: &dyn Strategy) -> HfResult<MiningOutcome> {
        strategy.validate()?;

        let kind = strategy.kind();
        info!(
            "⛏️  Running {} over {} transactions / {} items",
            kind,
            self.db.len(),
            self.db.item_count()
        );

        let start = Instant::now();
        let mut ctx = strategy.context();
        strategy.explore(self.db, &self.bounds, &mut ctx)?;
        let outcome = ctx.finish(kind, start.elapsed());

        info!(
            "{} finished: {} itemsets, {} evaluated, {} pruned",
            kind,
            outcome.results.len(),
            outcome.stats.evaluated,
            outcome.stats.pruned
        );
        Ok(outcome)
    }
}
