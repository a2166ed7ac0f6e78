//! Error types for protocol runs.

use thiserror::Error;

use crate::je_interface::InteractionCount;

/// Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors reported by configuration checks and by runs that did not converge.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolError {
    /// Fewer than two agents, so no pair can be drawn
    #[error("invalid population size {population}: at least two agents are required")]
    InvalidPopulationSize { population: usize },

    /// Constants that yield a degenerate or non-monotonic interval table
    #[error("invalid constants (c={base_width}, r={growth_ratio}): {reason}")]
    InvalidConstants {
        base_width: u64,
        growth_ratio: f64,
        reason: String,
    },

    /// Safety bound hit before every agent settled on the final door
    #[error(
        "no convergence within {budget} interactions \
         (population {population}, c={base_width}, r={growth_ratio}, {settled} settled)"
    )]
    InteractionBudgetExceeded {
        budget: InteractionCount,
        population: usize,
        base_width: u64,
        growth_ratio: f64,
        settled: usize,
    },
}
