use crate::store::{ItemId, Itemset, TransactionDb};
use fastrand::Rng;
use std::cmp::Reverse;

/// Initial population: the item sets of the `size` transactions with the
/// highest transaction utility (database order on ties).
pub fn seed_population(db: &TransactionDb, size: usize) -> Vec<Itemset> {
    let mut ranked: Vec<(i64, usize)> = db
        .transactions()
        .iter()
        .enumerate()
        .map(|(i, t)| (t.total_utility(), i))
        .collect();
    ranked.sort_by_key(|&(tu, i)| (Reverse(tu), i));

    ranked
        .into_iter()
        .take(size)
        .map(|(_, i)| Itemset::from_items(db.transactions()[i].items()))
        .collect()
}

fn pick(itemset: &Itemset, rng: &mut Rng) -> Option<ItemId> {
    if itemset.is_empty() {
        None
    } else {
        Some(itemset.items()[rng.usize(..itemset.len())])
    }
}

/// Swaps one randomly chosen item between the two parents.
pub fn crossover(p1: &Itemset, p2: &Itemset, rng: &mut Rng) -> (Itemset, Itemset) {
    match (pick(p1, rng), pick(p2, rng)) {
        (Some(a), Some(b)) => (p1.without(a).with(b), p2.without(b).with(a)),
        _ => (p1.clone(), p2.clone()),
    }
}

/// With probability `rate` drops a random member; after that drop, with
/// probability `rate` again, adds a random item of the universe.
pub fn mutate(individual: Itemset, universe: &[ItemId], rate: f64, rng: &mut Rng) -> Itemset {
    if rng.f64() >= rate {
        return individual;
    }
    let mut out = match pick(&individual, rng) {
        Some(victim) => individual.without(victim),
        None => individual,
    };
    if rng.f64() < rate && !universe.is_empty() {
        out = out.with(universe[rng.usize(..universe.len())]);
    }
    out
}
