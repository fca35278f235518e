use super::{emit, OutputOptions};
use clap::Args;
use huiforge::config::TopKParams;
use huiforge::error::HfResult;
use huiforge::miner::TopKSearch;
use huiforge::{Miner, TransactionDb};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct TopKArgs {
    #[command(flatten)]
    pub params: TopKParams,
}

pub fn run(args: TopKArgs, db: &TransactionDb, opts: OutputOptions) -> HfResult<()> {
    let miner = Miner::new(db);
    let outcome = miner.run(&TopKSearch {
        params: args.params,
    })?;

    info!("📈 Threshold history: {:?}", outcome.threshold_history);
    emit(db, miner.bounds(), &outcome, opts)
}
