//! Population sweep runner

use super::config::SweepConfig;
use super::event_sink::LogEventSink;
use super::stats::{format_distribution, SizeStats, SweepResult, TrialStats};
use junta_rust::{run_protocol, ProtocolError, RunOutcome};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Population sweep runner
pub struct SweepRunner {
    config: SweepConfig,
    rng: StdRng,
    seed: [u8; 32],
    sink: LogEventSink,
}

impl SweepRunner {
    /// Create a new sweep runner
    ///
    /// # Errors
    /// Configurations that could not run a single trial
    pub fn new(config: SweepConfig) -> Result<Self, ProtocolError> {
        config.validate()?;

        let seed = config.resolve_seed();
        let rng = StdRng::from_seed(seed);
        let sink = LogEventSink::new(config.log_events);

        Ok(Self {
            config,
            rng,
            seed,
            sink,
        })
    }

    /// Main sweep loop
    pub fn run(mut self) -> Result<SweepResult, ProtocolError> {
        let sizes = self.config.population_sizes(&mut self.rng);
        info!("Sweeping {} population sizes: {:?}", sizes.len(), sizes);

        let mut results = Vec::with_capacity(sizes.len());
        for population in sizes {
            results.push(self.run_size(population)?);
        }

        Ok(SweepResult {
            seed_used: self.seed,
            sizes: results,
        })
    }

    /// Run all trials of one population size
    fn run_size(&mut self, population: usize) -> Result<SizeStats, ProtocolError> {
        println!(
            "----------------START SIMULATION FOR N = {}----------------------",
            population
        );

        let mut stats = SizeStats::new(population);

        for trial in 0..self.config.trials {
            let seed: [u8; 32] = self.rng.gen();
            let protocol = self.config.protocol(population, seed);
            let report = run_protocol(&protocol, &mut self.sink)?;

            println!(
                "Simulation {}: {} interactions ({:?})",
                trial, report.interactions, report.outcome
            );
            if self.config.print_distributions {
                println!("    {}", format_distribution(&report.distribution));
            }
            if self.config.print_tables {
                println!("    end of green zones: {:?}", report.table.green_ends());
                println!("    doors: {:?}", report.table.doors());
            }
            if report.outcome != RunOutcome::Converged {
                warn!(
                    "n={} trial {} did not converge: {}/{} settled",
                    population, trial, report.settled, population
                );
            }

            stats.trials.push(TrialStats::from_report(&report));
        }

        println!(
            "\nAverage number of interactions from {} simulations: {:.2}",
            stats.trials.len(),
            stats.average_interactions()
        );
        println!(
            "Average time (number of interactions / n) from {} simulations: {:.2}",
            stats.trials.len(),
            stats.average_parallel_time()
        );
        println!(
            "Average time from {} simulations: {:.2} nlogn",
            stats.trials.len(),
            stats.average_per_n_log_n()
        );
        println!(
            "----------------END SIMULATION FOR N = {}----------------------\n",
            population
        );

        Ok(stats)
    }
}
