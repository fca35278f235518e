pub mod bounds;
pub mod classify;
pub mod config;
pub mod error;
pub mod miner;
pub mod projection;
pub mod results;
pub mod store;
// cmd and reports are binary modules (declared in main.rs).

pub use error::{HfResult, HuiForgeError};
pub use miner::{Miner, MiningOutcome, SearchContext, Strategy, StrategyKind};
pub use store::{ItemId, Itemset, RawTransaction, TransactionDb};
