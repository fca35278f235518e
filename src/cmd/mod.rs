pub mod evolve;
pub mod mine;
pub mod top_k;

use crate::reports;
use huiforge::bounds::Bounds;
use huiforge::error::HfResult;
use huiforge::{MiningOutcome, TransactionDb};

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub debug: bool,
}

/// Shared tail of every subcommand.
pub fn emit(
    db: &TransactionDb,
    bounds: &Bounds,
    outcome: &MiningOutcome,
    opts: OutputOptions,
) -> HfResult<()> {
    if opts.json {
        return reports::print_json(db, outcome);
    }
    if opts.debug {
        reports::print_item_table(db, bounds);
    }
    reports::print_results(db, outcome);
    reports::print_summary(outcome);
    Ok(())
}
