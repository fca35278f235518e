use super::{emit, OutputOptions};
use clap::{Args, ValueEnum};
use huiforge::config::MiningParams;
use huiforge::error::HfResult;
use huiforge::miner::{BranchAndBound, Exhaustive};
use huiforge::{Miner, Strategy, TransactionDb};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdStrategy {
    Exhaustive,
    BranchAndBound,
}

#[derive(Args, Debug, Clone)]
pub struct MineArgs {
    #[command(flatten)]
    pub params: MiningParams,

    #[arg(short, long, value_enum, default_value_t = ThresholdStrategy::BranchAndBound)]
    pub strategy: ThresholdStrategy,
}

pub fn run(args: MineArgs, db: &TransactionDb, opts: OutputOptions) -> HfResult<()> {
    let min = args.params.min_utility;
    let strategy: Box<dyn Strategy> = match args.strategy {
        ThresholdStrategy::Exhaustive => Box::new(Exhaustive::new(min)),
        ThresholdStrategy::BranchAndBound => Box::new(BranchAndBound::new(min)),
    };

    let miner = Miner::new(db);
    let outcome = miner.run(strategy.as_ref())?;
    emit(db, miner.bounds(), &outcome, opts)
}
