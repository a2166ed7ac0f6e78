use crate::je_interface::{Count, Round, Sample};
use crate::je_sampler::level_of;

/// Per-agent protocol state
///
/// Created from a sample and afterwards mutated only by the interaction rule
/// in `je_engine`. `count` and `round` never decrease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub(crate) sample: Sample,
    pub(crate) level: Round,
    pub(crate) count: Count,
    pub(crate) round: Round,
    pub(crate) broadcast: bool,
    pub(crate) final_pending: bool,
}

impl Agent {
    pub fn new(sample: Sample) -> Self {
        Self {
            sample,
            level: level_of(sample),
            count: 0,
            round: 0,
            broadcast: false,
            final_pending: true,
        }
    }

    /// Private draw, fixed at creation
    pub fn sample(&self) -> Sample {
        self.sample
    }

    /// Round at which the agent turns cautious
    pub fn level(&self) -> Round {
        self.level
    }

    pub fn count(&self) -> Count {
        self.count
    }

    /// Round containing `count`
    pub fn round(&self) -> Round {
        self.round
    }

    /// Opinion offered to partners: true = keep advancing, false = hold
    pub fn broadcast(&self) -> bool {
        self.broadcast
    }

    /// Has not yet been counted by the termination oracle
    pub fn final_pending(&self) -> bool {
        self.final_pending
    }

    /// At or above its own level: crosses doors only when told to
    pub fn is_cautious(&self) -> bool {
        self.level <= self.round
    }

    /// Below its own level: races through doors and always says "go"
    pub fn is_eager(&self) -> bool {
        !self.is_cautious()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let agent = Agent::new(5);

        assert_eq!(agent.sample(), 5);
        assert_eq!(agent.level(), 3);
        assert_eq!(agent.count(), 0);
        assert_eq!(agent.round(), 0);
        assert!(!agent.broadcast());
        assert!(agent.final_pending());
        assert!(agent.is_eager());
    }

    #[test]
    fn test_level_zero_starts_cautious() {
        let agent = Agent::new(1);
        assert!(agent.is_cautious());
        assert!(!agent.is_eager());
    }
}
