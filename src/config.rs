use crate::error::{HfResult, HuiForgeError};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct MiningParams {
    /// Absolute minimum utility an itemset needs to be reported.
    #[arg(long, default_value_t = 14)]
    pub min_utility: i64,
}

impl Default for MiningParams {
    fn default() -> Self {
        Self { min_utility: 14 }
    }
}

impl MiningParams {
    pub fn validate(&self) -> HfResult<()> {
        if self.min_utility <= 0 {
            return Err(HuiForgeError::InvalidParameter(format!(
                "min_utility must be positive, got {}",
                self.min_utility
            )));
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct TopKParams {
    /// Number of highest-utility itemsets to keep.
    #[arg(short = 'k', long = "k", default_value_t = 4)]
    pub k: usize,
}

impl Default for TopKParams {
    fn default() -> Self {
        Self { k: 4 }
    }
}

impl TopKParams {
    pub fn validate(&self) -> HfResult<()> {
        if self.k == 0 {
            return Err(HuiForgeError::InvalidParameter(
                "k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct GeneticParams {
    #[arg(long, default_value_t = 4)]
    pub population_size: usize,
    #[arg(long, default_value_t = 5)]
    pub generations: usize,
    #[arg(long, default_value_t = 0.1)]
    pub mutation_rate: f64,
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 4,
            generations: 5,
            mutation_rate: 0.1,
            seed: None,
        }
    }
}

impl GeneticParams {
    /// Preset used for larger item universes (100 individuals, 30 generations).
    pub fn large() -> Self {
        Self {
            population_size: 100,
            generations: 30,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> HfResult<()> {
        if self.population_size == 0 {
            return Err(HuiForgeError::InvalidParameter(
                "population_size must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(HuiForgeError::InvalidParameter(format!(
                "mutation_rate must lie in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}
