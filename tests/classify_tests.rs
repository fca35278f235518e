mod common;

use common::{worked_example, DbBuilder};
use huiforge::classify::{Classification, ItemClass};
use rstest::rstest;
use std::str::FromStr;
use strum::IntoEnumIterator;

#[rstest]
#[case("a", ItemClass::Positive)]
#[case("b", ItemClass::Positive)]
#[case("f", ItemClass::Positive)]
#[case("e", ItemClass::Negative)]
#[case("g", ItemClass::Negative)]
#[case("h", ItemClass::Negative)]
fn test_worked_example_classes(#[case] label: &str, #[case] class: ItemClass) {
    let db = worked_example();
    let classes = Classification::classify(&db);
    assert_eq!(classes.class_of(db.item_id(label).unwrap()), class);
}

#[test]
fn test_worked_example_has_no_mixed_items() {
    let db = worked_example();
    let classes = Classification::classify(&db);
    assert!(classes.mixed().is_empty());
    assert_eq!(classes.positive().len(), 5);
    assert_eq!(classes.negative().len(), 3);
    assert_eq!(classes.primary_candidates(), classes.positive());
}

#[test]
fn test_zero_profit_handling() {
    let db = DbBuilder::new()
        .tx("T1", &[("mix", 1, 4), ("pz", 2, 3), ("zero", 1, 0)])
        .tx("T2", &[("mix", 1, -2), ("pz", 1, 0), ("zero", 5, 0)])
        .build();
    let classes = Classification::classify(&db);
    let class = |l: &str| classes.class_of(db.item_id(l).unwrap());
    assert_eq!(class("mix"), ItemClass::Mixed);
    assert_eq!(class("pz"), ItemClass::Positive);
    assert_eq!(class("zero"), ItemClass::Negative);
}

#[test]
fn test_partition_covers_universe() {
    let db = worked_example();
    let classes = Classification::classify(&db);
    let total: usize = ItemClass::iter().map(|c| classes.members(c).len()).sum();
    assert_eq!(total, db.item_count());
}

#[test]
fn test_class_names() {
    assert_eq!(ItemClass::Mixed.to_string(), "mixed");
    assert_eq!(ItemClass::from_str("negative").unwrap(), ItemClass::Negative);
}
