//! # junta_rust - Junta Election with Constant Message Size
//!
//! A simulator for a population protocol: anonymous agents interact in
//! uniformly random pairs and exchange a single bit. Every agent counts upward
//! through a sequence of rounds and all agents converge on the door of the
//! highest round any agent drew, without anyone learning the population size
//! or that round directly.
//!
//! ## Core Components
//!
//! - **IntervalTable**: green/red/door boundaries of every round
//! - **Sampler**: geometric draws and the levels derived from them
//! - **Agent**: per-agent counter, round and broadcast bit
//! - **Engine**: the pairwise transition and the termination oracle
//! - **Scheduler**: uniform random (or replayed) pair draws
//! - **RunContext**: per-run owner of agents, table and oracle
//!
//! ```no_run
//! use junta_rust::{run_protocol, NoOpSink, ProtocolConfig};
//!
//! let config = ProtocolConfig {
//!     population: 1000,
//!     seed: Some([42u8; 32]),
//!     ..Default::default()
//! };
//!
//! let report = run_protocol(&config, &mut NoOpSink)?;
//! println!("{:?} after {} interactions", report.outcome, report.interactions);
//! # Ok::<(), junta_rust::ProtocolError>(())
//! ```
//!
//! ## Simulation Harness
//!
//! Population sweeps, repeated trials and reporting live in the `simulator/`
//! binaries, outside this library.

// Protocol core
pub mod je_agent;
pub mod je_engine;
pub mod je_interface;
pub mod je_intervals;
pub mod je_sampler;

// Execution
pub mod je_config;
pub mod je_error;
pub mod je_run;
pub mod je_scheduler;

// Re-export commonly used types
pub use je_agent::Agent;
pub use je_config::ProtocolConfig;
pub use je_engine::{transition, TerminationOracle};
pub use je_error::{ProtocolError, Result};
pub use je_interface::{
    AgentId, Count, Event, EventSink, InteractionCount, NoOpSink, Round, Sample,
};
pub use je_intervals::{Constants, IntervalTable};
pub use je_run::{run_protocol, RunContext, RunOutcome, RunReport};
pub use je_sampler::{geometric_sample, level_of, max_round_of, SampleDistribution};
pub use je_scheduler::{PairScheduler, RandomScheduler, RecordingScheduler, ReplayScheduler};
