//! Run configuration

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::je_error::{ProtocolError, Result};
use crate::je_interface::{
    InteractionCount, DEFAULT_BASE_WIDTH, DEFAULT_GROWTH_RATIO, DEFAULT_INTERACTION_BUDGET,
};
use crate::je_intervals::Constants;

/// Configuration of a single protocol run
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Number of agents (n)
    pub population: usize,

    /// Width of the first green zone (c)
    pub base_width: u64,

    /// Growth ratio between consecutive rounds (r)
    pub growth_ratio: f64,

    /// Random seed (None = generate random)
    pub seed: Option<[u8; 32]>,

    /// Safety bound on scheduler steps (None = unbounded)
    pub max_interactions: Option<InteractionCount>,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            population: 1000,
            base_width: DEFAULT_BASE_WIDTH,
            growth_ratio: DEFAULT_GROWTH_RATIO,
            seed: None,
            max_interactions: Some(DEFAULT_INTERACTION_BUDGET),
        }
    }
}

impl ProtocolConfig {
    pub fn constants(&self) -> Constants {
        Constants::new(self.base_width, self.growth_ratio)
    }

    /// Check the configuration before any agent is created
    ///
    /// # Errors
    /// * `InvalidPopulationSize` - fewer than two agents
    /// * `InvalidConstants` - `c == 0` or `r <= 1`
    pub fn validate(&self) -> Result<()> {
        if self.population < 2 {
            return Err(ProtocolError::InvalidPopulationSize {
                population: self.population,
            });
        }
        self.constants().validate()
    }

    /// Get or generate seed
    pub fn resolve_seed(&self) -> [u8; 32] {
        resolve_seed(self.seed)
    }
}

/// Configured seed, or a fresh one drawn from entropy
pub fn resolve_seed(seed: Option<[u8; 32]>) -> [u8; 32] {
    seed.unwrap_or_else(|| {
        let mut seed = [0u8; 32];
        StdRng::from_entropy().fill_bytes(&mut seed);
        seed
    })
}
