//! Statistics and results for the population sweep

use junta_rust::{Count, InteractionCount, RunOutcome, RunReport, Sample, SampleDistribution};

/// Outcome of one trial
#[derive(Debug, Clone)]
pub struct TrialStats {
    /// Seed of the trial
    pub seed: [u8; 32],

    /// Interactions until the run stopped
    pub interactions: InteractionCount,

    /// How the run stopped
    pub outcome: RunOutcome,

    /// Largest sampled value
    pub max_sample: Sample,

    /// Door every agent had to reach
    pub final_door: Count,
}

impl TrialStats {
    pub fn from_report(report: &RunReport) -> Self {
        Self {
            seed: report.seed_used.unwrap_or_default(),
            interactions: report.interactions,
            outcome: report.outcome,
            max_sample: report.distribution.max_sample().unwrap_or(0),
            final_door: report.table.final_door(),
        }
    }
}

/// All trials of one population size
#[derive(Debug, Clone)]
pub struct SizeStats {
    pub population: usize,
    pub trials: Vec<TrialStats>,
}

impl SizeStats {
    pub fn new(population: usize) -> Self {
        Self {
            population,
            trials: Vec::new(),
        }
    }

    /// Average interactions over all trials
    pub fn average_interactions(&self) -> f64 {
        if self.trials.is_empty() {
            return 0.0;
        }
        self.trials
            .iter()
            .map(|t| t.interactions as f64)
            .sum::<f64>()
            / self.trials.len() as f64
    }

    /// Average interactions divided by n
    pub fn average_parallel_time(&self) -> f64 {
        self.average_interactions() / self.population as f64
    }

    /// Average interactions divided by n log2 n
    pub fn average_per_n_log_n(&self) -> f64 {
        let n = self.population as f64;
        self.average_interactions() / (n * n.log2())
    }

    /// Highest final door any trial had to reach
    pub fn max_final_door(&self) -> Count {
        self.trials.iter().map(|t| t.final_door).max().unwrap_or(0)
    }

    /// Highest sampled value across trials
    pub fn max_sample(&self) -> Sample {
        self.trials.iter().map(|t| t.max_sample).max().unwrap_or(0)
    }

    /// Trials that stopped before every agent settled
    pub fn not_converged(&self) -> usize {
        self.trials
            .iter()
            .filter(|t| t.outcome != RunOutcome::Converged)
            .count()
    }
}

/// Sweep result
#[derive(Debug)]
pub struct SweepResult {
    /// Seed used for the sweep
    pub seed_used: [u8; 32],

    /// Per population size statistics
    pub sizes: Vec<SizeStats>,
}

impl SweepResult {
    /// Print a summary of the sweep results
    pub fn print_summary(&self) {
        println!("\n╔════════════════════════════════════════════════════════╗");
        println!("║        Junta Election Sweep Results                    ║");
        println!("╚════════════════════════════════════════════════════════╝\n");

        println!("Configuration:");
        println!("  Seed: {:?}", self.seed_used);
        println!("  Population sizes: {}\n", self.sizes.len());

        println!(
            "{:>10} {:>7} {:>16} {:>12} {:>10} {:>10} {:>10} {:>8}",
            "n", "trials", "avg interactions", "avg time", "n log n", "max value", "max door", "failed"
        );
        for size in &self.sizes {
            println!(
                "{:>10} {:>7} {:>16.2} {:>12.2} {:>10.2} {:>10} {:>10} {:>8}",
                size.population,
                size.trials.len(),
                size.average_interactions(),
                size.average_parallel_time(),
                size.average_per_n_log_n(),
                size.max_sample(),
                size.max_final_door(),
                size.not_converged()
            );
        }
        println!();

        let failed: Vec<_> = self
            .sizes
            .iter()
            .flat_map(|size| size.trials.iter().map(move |t| (size.population, t)))
            .filter(|(_, t)| t.outcome != RunOutcome::Converged)
            .collect();
        if !failed.is_empty() {
            println!("Trials without convergence:");
            for (population, trial) in failed {
                println!(
                    "  n={} {:?} after {} interactions, seed {:?}",
                    population, trial.outcome, trial.interactions, trial.seed
                );
            }
            println!();
        }
    }
}

/// Values and counts of a sampled distribution, one line
pub fn format_distribution(distribution: &SampleDistribution) -> String {
    let dense = distribution.dense();
    let values: Vec<String> = (0..dense.len()).map(|v| v.to_string()).collect();
    let counts: Vec<String> = dense.iter().map(|c| c.to_string()).collect();
    format!(
        "values [{}] ---> number of agents per value [{}]",
        values.join(", "),
        counts.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distribution() {
        let dist = SampleDistribution::from_samples(&[1, 1, 3]);
        assert_eq!(
            format_distribution(&dist),
            "values [0, 1, 2, 3] ---> number of agents per value [0, 2, 0, 1]"
        );
    }

    #[test]
    fn test_size_averages() {
        let trial = |interactions| TrialStats {
            seed: [0u8; 32],
            interactions,
            outcome: RunOutcome::Converged,
            max_sample: 4,
            final_door: 280,
        };
        let mut stats = SizeStats::new(4);
        stats.trials.push(trial(100));
        stats.trials.push(trial(300));

        assert_eq!(stats.average_interactions(), 200.0);
        assert_eq!(stats.average_parallel_time(), 50.0);
        assert!((stats.average_per_n_log_n() - 25.0).abs() < 1e-9);
        assert_eq!(stats.not_converged(), 0);
        assert_eq!(stats.max_final_door(), 280);
    }
}
