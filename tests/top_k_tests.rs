mod common;

use common::{all_itemsets, arb_db, compact, worked_example};
use huiforge::bounds::Bounds;
use huiforge::miner::TopKSearch;
use huiforge::{HuiForgeError, Miner, StrategyKind, TransactionDb};
use proptest::prelude::*;
use rstest::rstest;

#[test]
fn test_top4_worked_example() {
    let db = worked_example();
    let outcome = Miner::new(&db).run(&TopKSearch::new(4)).unwrap();
    let got: Vec<(String, i64)> = outcome
        .resolve(&db)
        .into_iter()
        .map(|m| (compact(&m.items), m.utility))
        .collect();
    assert_eq!(
        got,
        vec![
            ("bd".to_string(), 31),
            ("bcdf".to_string(), 22),
            ("bde".to_string(), 21),
            ("bdh".to_string(), 20),
        ]
    );
    assert_eq!(outcome.strategy, StrategyKind::TopK);
    assert_eq!(outcome.final_threshold, Some(20));
}

#[test]
fn test_leaf_utilities_raise_initial_threshold() {
    let db = worked_example();
    let bounds = Bounds::compute(&db);
    let order = bounds.ascending_by_ptwu(db.items());
    let mut liu = TopKSearch::leaf_utilities(&db, &order);
    liu.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(&liu[..5], &[31, 21, 18, 16, 16]);

    let outcome = Miner::new(&db).run(&TopKSearch::new(4)).unwrap();
    assert_eq!(outcome.threshold_history.first(), Some(&16));
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(9)]
#[case(40)]
fn test_threshold_history_is_monotone(#[case] k: usize) {
    let db = worked_example();
    let outcome = Miner::new(&db).run(&TopKSearch::new(k)).unwrap();
    assert!(outcome
        .threshold_history
        .windows(2)
        .all(|w| w[0] <= w[1]));
    assert!(outcome.results.len() <= k);
}

#[test]
fn test_k_larger_than_candidates() {
    let db = worked_example();
    let supported = all_itemsets(&db).iter().filter(|(_, _, s)| *s > 0).count();
    let outcome = Miner::new(&db).run(&TopKSearch::new(10_000)).unwrap();
    assert_eq!(outcome.results.len(), supported);
    assert_eq!(outcome.final_threshold, None);
}

#[test]
fn test_zero_k_rejected() {
    let db = worked_example();
    assert!(matches!(
        Miner::new(&db).run(&TopKSearch::new(0)),
        Err(HuiForgeError::InvalidParameter(_))
    ));
}

#[test]
fn test_empty_database() {
    let db = TransactionDb::new(vec![]).unwrap();
    let outcome = Miner::new(&db).run(&TopKSearch::new(3)).unwrap();
    assert!(outcome.results.is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_top_k_matches_brute_force(db in arb_db(7), k in 1usize..12) {
        let outcome = Miner::new(&db).run(&TopKSearch::new(k)).unwrap();

        let mut expected: Vec<i64> = all_itemsets(&db)
            .into_iter()
            .filter(|(_, _, support)| *support > 0)
            .map(|(_, u, _)| u)
            .collect();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        expected.truncate(k);

        let got: Vec<i64> = outcome.results.iter().map(|h| h.utility).collect();
        prop_assert_eq!(got, expected);
        for h in &outcome.results {
            prop_assert_eq!(db.exact_utility(&h.itemset), h.utility);
        }
        prop_assert!(outcome.threshold_history.windows(2).all(|w| w[0] <= w[1]));
    }
}
