//! Event sink writing protocol events to the log

use junta_rust::{AgentId, Event, EventSink, InteractionCount};
use log::{debug, trace};

/// Logging event sink: door crossings at trace level, settlements at debug
pub struct LogEventSink {
    enabled: bool,
}

impl LogEventSink {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl EventSink for LogEventSink {
    fn log(&mut self, interaction: InteractionCount, agent: AgentId, event: Event) {
        if !self.enabled {
            return;
        }

        match event {
            Event::DoorCrossed {
                round,
                count,
                cautious,
            } => {
                trace!(
                    "{:>10} {:>7} DoorCrossed      round:{} count:{} {}",
                    interaction,
                    agent,
                    round,
                    count,
                    if cautious { "cautious" } else { "eager" }
                );
            }
            Event::FinalDoorReached { count, settled } => {
                debug!(
                    "{:>10} {:>7} FinalDoorReached count:{} settled:{}",
                    interaction, agent, count, settled
                );
            }
        }
    }
}
