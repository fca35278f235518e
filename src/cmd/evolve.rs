use super::{emit, OutputOptions};
use clap::Args;
use huiforge::config::GeneticParams;
use huiforge::error::HfResult;
use huiforge::miner::GeneticSearch;
use huiforge::{Miner, TransactionDb};
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct EvolveArgs {
    #[command(flatten)]
    pub params: GeneticParams,

    /// Use the large preset (100 individuals, 30 generations).
    #[arg(long, default_value_t = false)]
    pub large: bool,
}

pub fn run(args: EvolveArgs, db: &TransactionDb, opts: OutputOptions) -> HfResult<()> {
    let params = if args.large {
        GeneticParams {
            mutation_rate: args.params.mutation_rate,
            seed: args.params.seed,
            ..GeneticParams::large()
        }
    } else {
        args.params
    };

    if params.seed.is_none() {
        warn!("⚠️  No --seed given; results will differ between runs");
    }

    let miner = Miner::new(db);
    let outcome = miner.run(&GeneticSearch::new(params))?;
    emit(db, miner.bounds(), &outcome, opts)
}
