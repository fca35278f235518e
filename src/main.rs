use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use huiforge::store::loader::load_database;
use std::process;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Transaction database (.json or .csv).
    #[arg(global = true, short, long, default_value = "data/example.json")]
    input: String,

    /// Print results as JSON instead of tables.
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Every itemset reaching an absolute minimum utility.
    Mine(cmd::mine::MineArgs),
    /// The k highest-utility itemsets.
    TopK(cmd::top_k::TopKArgs),
    /// Genetic search for high-utility itemsets.
    Evolve(cmd::evolve::EvolveArgs),
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.debug);
    info!("🚀 Initializing HuiForge...");

    info!("📂 Loading database: {}", cli.input);
    let db = load_database(&cli.input).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });

    let opts = cmd::OutputOptions {
        json: cli.json,
        debug: cli.debug,
    };

    let start = Instant::now();
    let result = match cli.command {
        Commands::Mine(args) => cmd::mine::run(args, &db, opts),
        Commands::TopK(args) => cmd::top_k::run(args, &db, opts),
        Commands::Evolve(args) => cmd::evolve::run(args, &db, opts),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
    info!("🏁 Done in {:.3}s", start.elapsed().as_secs_f64());
}
