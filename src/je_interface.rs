/// Index of an agent inside its population
pub type AgentId = usize;

/// Local step counter of an agent
pub type Count = u64;

/// Index of a round (an interval of counter values ending in a door)
pub type Round = usize;

/// Private geometric draw of an agent (always >= 1)
pub type Sample = u32;

/// Number of scheduler steps (one unordered pair, both orderings)
pub type InteractionCount = u64;

/// Default width of the first green zone (c)
pub const DEFAULT_BASE_WIDTH: u64 = 16;

/// Default growth ratio between consecutive rounds (r)
pub const DEFAULT_GROWTH_RATIO: f64 = 2.0;

/// Red zone width factor: red_i = RED_FACTOR * c * r^(i-1)
pub const RED_FACTOR: f64 = 3.0;

/// Default safety bound on scheduler steps per run
pub const DEFAULT_INTERACTION_BUDGET: InteractionCount = 500_000_000;

/// Events emitted by the protocol engine for debugging and analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Agent advanced past a door into a new round
    DoorCrossed {
        round: Round,
        count: Count,
        cautious: bool,
    },
    /// Agent was found on the final door for the first time
    FinalDoorReached {
        count: Count,
        /// Agents settled on the final door, this one included
        settled: usize,
    },
}

/// Trait for consuming events from the protocol engine
pub trait EventSink {
    fn log(&mut self, interaction: InteractionCount, agent: AgentId, event: Event);
}

/// No-op event sink for production use (zero overhead)
pub struct NoOpSink;

impl EventSink for NoOpSink {
    #[inline(always)]
    fn log(&mut self, _interaction: InteractionCount, _agent: AgentId, _event: Event) {}
}
