//! Run context and scheduling loop
//!
//! A `RunContext` owns everything a run mutates: the agents, the interval
//! table built for them and the termination oracle. It is created fresh for
//! every run, so nothing leaks between runs.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::je_agent::Agent;
use crate::je_config::ProtocolConfig;
use crate::je_engine::{transition, TerminationOracle};
use crate::je_error::{ProtocolError, Result};
use crate::je_interface::{AgentId, EventSink, InteractionCount, Sample};
use crate::je_intervals::{Constants, IntervalTable};
use crate::je_sampler::{geometric_sample, max_round_of, SampleDistribution};
use crate::je_scheduler::{PairScheduler, RandomScheduler};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every agent settled on the final door
    Converged,

    /// The interaction budget ran out first
    BudgetExceeded,

    /// The scheduler stopped handing out pairs first
    ScheduleExhausted,
}

/// Everything the reporting side needs from a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Seed used for the run, when the run drew its own randomness
    pub seed_used: Option<[u8; 32]>,

    pub population: usize,

    pub constants: Constants,

    /// Scheduler steps executed
    pub interactions: InteractionCount,

    pub outcome: RunOutcome,

    /// Agents counted by the termination oracle
    pub settled: usize,

    /// Interval table of the run
    pub table: IntervalTable,

    /// Sampled initial values across the population
    pub distribution: SampleDistribution,

    /// Budget in force for the run
    pub budget: Option<InteractionCount>,
}

impl RunReport {
    pub fn converged(&self) -> bool {
        self.outcome == RunOutcome::Converged
    }

    /// Turn a budget overrun into an error, pass anything else through
    pub fn into_result(self) -> Result<RunReport> {
        match (self.outcome, self.budget) {
            (RunOutcome::BudgetExceeded, Some(budget)) => {
                Err(ProtocolError::InteractionBudgetExceeded {
                    budget,
                    population: self.population,
                    base_width: self.constants.base_width,
                    growth_ratio: self.constants.growth_ratio,
                    settled: self.settled,
                })
            }
            _ => Ok(self),
        }
    }
}

/// Per-run state: agents, interval table and termination oracle
#[derive(Debug, Clone)]
pub struct RunContext {
    table: IntervalTable,
    agents: Vec<Agent>,
    oracle: TerminationOracle,
    interactions: InteractionCount,
    budget: Option<InteractionCount>,
}

impl RunContext {
    /// Create a population from explicit samples
    ///
    /// # Errors
    /// * `InvalidPopulationSize` - fewer than two samples
    /// * `InvalidConstants` - constants rejected by the interval table
    pub fn new(constants: Constants, samples: &[Sample]) -> Result<Self> {
        if samples.len() < 2 {
            return Err(ProtocolError::InvalidPopulationSize {
                population: samples.len(),
            });
        }
        let table = IntervalTable::build(constants, max_round_of(samples))?;
        Ok(Self::with_table(table, samples))
    }

    /// Create a population of `population` agents with geometric samples
    ///
    /// # Errors
    /// Same as `RunContext::new`
    pub fn sample<R: Rng + ?Sized>(
        constants: Constants,
        population: usize,
        rng: &mut R,
    ) -> Result<Self> {
        Self::new(constants, &draw_samples(population, rng))
    }

    fn with_table(table: IntervalTable, samples: &[Sample]) -> Self {
        Self {
            table,
            agents: samples.iter().map(|&sample| Agent::new(sample)).collect(),
            oracle: TerminationOracle::new(),
            interactions: 0,
            budget: None,
        }
    }

    pub fn table(&self) -> &IntervalTable {
        &self.table
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn population(&self) -> usize {
        self.agents.len()
    }

    pub fn interactions(&self) -> InteractionCount {
        self.interactions
    }

    pub fn settled(&self) -> usize {
        self.oracle.settled()
    }

    pub fn is_converged(&self) -> bool {
        self.oracle.is_complete(self.agents.len())
    }

    pub fn samples(&self) -> Vec<Sample> {
        self.agents.iter().map(Agent::sample).collect()
    }

    /// One scheduler step: `first` interacts with `second`, then `second`
    /// with `first`
    ///
    /// The second call observes the broadcast bit produced by the first.
    ///
    /// # Panics
    /// If either index is outside the population
    pub fn step<E: EventSink>(&mut self, first: AgentId, second: AgentId, sink: &mut E) {
        self.interactions += 1;
        self.interact(first, second, sink);
        self.interact(second, first, sink);
    }

    fn interact<E: EventSink>(&mut self, subject: AgentId, partner: AgentId, sink: &mut E) {
        let partner_broadcast = self.agents[partner].broadcast();
        let event = transition(
            &self.table,
            &mut self.agents[subject],
            partner_broadcast,
            &mut self.oracle,
        );
        if let Some(event) = event {
            sink.log(self.interactions, subject, event);
        }
    }

    /// Draw pairs from `scheduler` until every agent settled on the final
    /// door, the budget runs out or the scheduler stops
    pub fn run<S: PairScheduler, E: EventSink>(
        &mut self,
        scheduler: &mut S,
        budget: Option<InteractionCount>,
        sink: &mut E,
    ) -> RunOutcome {
        self.budget = budget;

        loop {
            if self.is_converged() {
                return RunOutcome::Converged;
            }

            if let Some(budget) = budget {
                if self.interactions >= budget {
                    warn!(
                        "run stopped at budget of {} interactions: {}/{} agents settled",
                        budget,
                        self.settled(),
                        self.population()
                    );
                    return RunOutcome::BudgetExceeded;
                }
            }

            match scheduler.next_pair(self.population()) {
                Some((first, second)) => self.step(first, second, sink),
                None => return RunOutcome::ScheduleExhausted,
            }
        }
    }

    pub fn report(&self, outcome: RunOutcome) -> RunReport {
        RunReport {
            seed_used: None,
            population: self.population(),
            constants: self.table.constants(),
            interactions: self.interactions,
            outcome,
            settled: self.settled(),
            table: self.table.clone(),
            distribution: SampleDistribution::from_samples(&self.samples()),
            budget: self.budget,
        }
    }
}

fn draw_samples<R: Rng + ?Sized>(population: usize, rng: &mut R) -> Vec<Sample> {
    (0..population).map(|_| geometric_sample(&mut *rng)).collect()
}

/// Run the protocol once from a configuration
///
/// Samples and pair draws come from one `StdRng` seeded with the resolved
/// seed, so a run is reproducible from `RunReport::seed_used`.
///
/// # Errors
/// * `InvalidPopulationSize`, `InvalidConstants` - before any agent exists
pub fn run_protocol<E: EventSink>(config: &ProtocolConfig, sink: &mut E) -> Result<RunReport> {
    config.validate()?;

    let seed = config.resolve_seed();
    let mut rng = StdRng::from_seed(seed);
    let samples = draw_samples(config.population, &mut rng);
    let table = IntervalTable::build_validated(config.constants(), max_round_of(&samples))?;
    let mut context = RunContext::with_table(table, &samples);

    info!(
        "run: n={} c={} r={} final round {} final door {}",
        config.population,
        config.base_width,
        config.growth_ratio,
        context.table().final_round(),
        context.table().final_door()
    );

    let mut scheduler = RandomScheduler::new(rng);
    let outcome = context.run(&mut scheduler, config.max_interactions, sink);

    info!(
        "run finished: {:?} after {} interactions ({}/{} settled)",
        outcome,
        context.interactions(),
        context.settled(),
        context.population()
    );

    let mut report = context.report(outcome);
    report.seed_used = Some(seed);
    Ok(report)
}
