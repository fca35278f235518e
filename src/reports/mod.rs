use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use huiforge::bounds::Bounds;
use huiforge::classify::{Classification, ItemClass};
use huiforge::error::HfResult;
use huiforge::{MiningOutcome, TransactionDb};
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    strategy: String,
    threshold: Option<i64>,
    elapsed_ms: u128,
    itemsets: Vec<huiforge::results::MinedItemset>,
    stats: &'a huiforge::miner::SearchStats,
}

pub fn print_json(db: &TransactionDb, outcome: &MiningOutcome) -> HfResult<()> {
    let report = JsonReport {
        strategy: outcome.strategy.to_string(),
        threshold: outcome.final_threshold,
        elapsed_ms: outcome.elapsed.as_millis(),
        itemsets: outcome.resolve(db),
        stats: &outcome.stats,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn print_results(db: &TransactionDb, outcome: &MiningOutcome) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Itemset").add_attribute(Attribute::Bold),
        Cell::new("Size").add_attribute(Attribute::Bold),
        Cell::new("Utility")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ]);

    for i in [0, 2, 3] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (rank, row) in outcome.resolve(db).iter().enumerate() {
        let utility = if row.utility < 0 {
            Cell::new(row.utility).fg(Color::Red)
        } else {
            Cell::new(row.utility).fg(Color::Cyan)
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(row.items.join(" ")),
            Cell::new(row.items.len()),
            utility,
        ]);
    }
    println!("\n{}", table);
}

pub fn print_summary(outcome: &MiningOutcome) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let threshold = match outcome.final_threshold {
        Some(t) => t.to_string(),
        None => "-inf".to_string(),
    };

    table.add_row(vec![
        Cell::new("Strategy").add_attribute(Attribute::Bold),
        Cell::new(outcome.strategy.to_string()),
    ]);
    table.add_row(vec![Cell::new("Itemsets"), Cell::new(outcome.results.len())]);
    table.add_row(vec![Cell::new("Evaluated"), Cell::new(outcome.stats.evaluated)]);
    table.add_row(vec![Cell::new("Pruned"), Cell::new(outcome.stats.pruned)]);
    table.add_row(vec![Cell::new("Max depth"), Cell::new(outcome.stats.max_depth)]);
    table.add_row(vec![Cell::new("Threshold"), Cell::new(threshold)]);
    table.add_row(vec![
        Cell::new("Elapsed"),
        Cell::new(format!("{:.3}s", outcome.elapsed.as_secs_f64())),
    ]);
    println!("\n{}", table);
}

/// Per-item PTWU and sign class, used by `--debug` runs.
pub fn print_item_table(db: &TransactionDb, bounds: &Bounds) {
    let classes = Classification::classify(db);
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Item").add_attribute(Attribute::Bold),
        Cell::new("Class").add_attribute(Attribute::Bold),
        Cell::new("PTWU").add_attribute(Attribute::Bold),
    ]);
    if let Some(col) = table.column_mut(2) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for item in db.items() {
        let class = classes.class_of(item);
        let color = match class {
            ItemClass::Positive => Color::Green,
            ItemClass::Mixed => Color::Yellow,
            ItemClass::Negative => Color::Red,
        };
        table.add_row(vec![
            Cell::new(db.label(item)),
            Cell::new(class.to_string()).fg(color),
            Cell::new(bounds.ptwu(item)),
        ]);
    }
    println!("\n{}", table);
}
