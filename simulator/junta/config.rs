//! Configuration for the population sweep

use junta_rust::je_config::resolve_seed;
use junta_rust::{Constants, InteractionCount, ProtocolConfig, ProtocolError};
use rand::Rng;

/// Configuration for a population sweep
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// First population size
    pub start_population: usize,

    /// Sizes double until they pass this bound
    pub max_population: usize,

    /// Draw each population uniformly below the current size
    pub jitter_population: bool,

    /// Independent runs per population size
    pub trials: usize,

    /// Width of the first green zone (c)
    pub base_width: u64,

    /// Growth ratio between consecutive rounds (r)
    pub growth_ratio: f64,

    /// Safety bound on interactions per run
    pub max_interactions: Option<InteractionCount>,

    /// Random seed (None = generate random)
    pub seed: Option<[u8; 32]>,

    /// Print door and green-end arrays of every run
    pub print_tables: bool,

    /// Print the sampled value histogram of every run
    pub print_distributions: bool,

    /// Log per-interaction events (very verbose)
    pub log_events: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let protocol = ProtocolConfig::default();
        Self {
            start_population: 100,
            max_population: 12_800,
            jitter_population: false,
            trials: 10,
            base_width: protocol.base_width,
            growth_ratio: protocol.growth_ratio,
            max_interactions: protocol.max_interactions,
            seed: None,
            print_tables: false,
            print_distributions: true,
            log_events: false,
        }
    }
}

impl SweepConfig {
    /// Get or generate seed
    pub fn resolve_seed(&self) -> [u8; 32] {
        resolve_seed(self.seed)
    }

    pub fn constants(&self) -> Constants {
        Constants::new(self.base_width, self.growth_ratio)
    }

    /// Reject sweeps that could not run a single trial
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.start_population < 2 {
            return Err(ProtocolError::InvalidPopulationSize {
                population: self.start_population,
            });
        }
        self.constants().validate()
    }

    /// Population sizes of the sweep, in order
    pub fn population_sizes<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let mut sizes = Vec::new();
        let mut size = self.start_population;

        while size <= self.max_population {
            let population = if self.jitter_population && size > 2 {
                rng.gen_range(2..size)
            } else {
                size
            };
            sizes.push(population);

            match size.checked_mul(2) {
                Some(next) => size = next,
                None => break,
            }
        }

        sizes
    }

    /// Protocol configuration for one trial
    pub fn protocol(&self, population: usize, seed: [u8; 32]) -> ProtocolConfig {
        ProtocolConfig {
            population,
            base_width: self.base_width,
            growth_ratio: self.growth_ratio,
            seed: Some(seed),
            max_interactions: self.max_interactions,
        }
    }
}
