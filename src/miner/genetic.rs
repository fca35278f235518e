use super::mutation::{crossover, mutate, seed_population};
use super::{SearchContext, Strategy, StrategyKind};
use crate::bounds::Bounds;
use crate::config::GeneticParams;
use crate::error::HfResult;
use crate::results::{rank, HighUtilityItemset};
use crate::store::{ItemId, Itemset, TransactionDb};
use std::collections::HashMap;
use tracing::debug;

/// Evolutionary heuristic for large item universes.
///
/// Trades completeness for speed: the answer is the best `population_size`
/// distinct itemsets met during evolution, which may miss the true top-k.
#[derive(Debug, Clone)]
pub struct GeneticSearch {
    pub params: GeneticParams,
}

impl GeneticSearch {
    pub fn new(params: GeneticParams) -> Self {
        Self { params }
    }
}

/// Exact utilities of individuals already scored in this run.
struct FitnessCache<'a> {
    db: &'a TransactionDb,
    scores: HashMap<Itemset, i64>,
}

impl<'a> FitnessCache<'a> {
    fn new(db: &'a TransactionDb) -> Self {
        Self {
            db,
            scores: HashMap::new(),
        }
    }

    fn score(&mut self, individual: &Itemset) -> i64 {
        if let Some(&u) = self.scores.get(individual) {
            return u;
        }
        let u = self.db.exact_utility(individual);
        self.scores.insert(individual.clone(), u);
        u
    }
}

fn observe(individual: &Itemset, fitness: &mut FitnessCache, ctx: &mut SearchContext) {
    if individual.is_empty() || !ctx.visit(individual) {
        return;
    }
    ctx.stats_mut().evaluated += 1;
    let utility = fitness.score(individual);
    ctx.record(HighUtilityItemset::new(individual.clone(), utility));
}

impl Strategy for GeneticSearch {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Genetic
    }

    fn validate(&self) -> HfResult<()> {
        self.params.validate()
    }

    fn context(&self) -> SearchContext {
        SearchContext::bounded(self.params.population_size)
    }

    fn explore(
        &self,
        db: &TransactionDb,
        _bounds: &Bounds,
        ctx: &mut SearchContext,
    ) -> HfResult<()> {
        let p = &self.params;
        let mut rng = match p.seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };

        let universe: Vec<ItemId> = db.items().collect();
        let mut fitness = FitnessCache::new(db);
        let mut population = seed_population(db, p.population_size);
        if population.is_empty() {
            return Ok(());
        }
        for individual in &population {
            observe(individual, &mut fitness, ctx);
        }

        for generation in 0..p.generations {
            let mut scored: Vec<HighUtilityItemset> = population
                .iter()
                .map(|s| HighUtilityItemset::new(s.clone(), fitness.score(s)))
                .collect();
            rank(&mut scored);

            let parent1 = scored[0].itemset.clone();
            let parent2 = scored.get(1).map_or_else(|| parent1.clone(), |h| h.itemset.clone());

            let (child1, child2) = crossover(&parent1, &parent2, &mut rng);
            let child1 = mutate(child1, &universe, p.mutation_rate, &mut rng);
            let child2 = mutate(child2, &universe, p.mutation_rate, &mut rng);

            population = vec![parent1, parent2, child1, child2];
            for individual in &population {
                observe(individual, &mut fitness, ctx);
            }

            debug!(
                "Gen {:3} | best {} | distinct seen {}",
                generation,
                scored[0].utility,
                ctx.stats().evaluated
            );
        }

        Ok(())
    }
}
