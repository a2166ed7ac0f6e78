//! Pair schedulers
//!
//! A scheduler only hands out pairs of agent indices; it never owns agents.
//! For a pair `(first, second)` the run applies the interaction to `first`
//! and then to `second`, so the second call sees the broadcast bit the first
//! call just produced. Swapping that order changes simulation outcomes.

use std::collections::VecDeque;

use rand::Rng;

use crate::je_interface::AgentId;

/// Source of interaction pairs
pub trait PairScheduler {
    /// Next ordered pair of distinct agents in `0..population`
    ///
    /// Returns `None` when the scheduler has no more pairs to offer.
    fn next_pair(&mut self, population: usize) -> Option<(AgentId, AgentId)>;
}

/// Uniform random scheduler
///
/// Both indices are drawn uniformly; the second is redrawn while it equals
/// the first.
pub struct RandomScheduler<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomScheduler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> PairScheduler for RandomScheduler<R> {
    fn next_pair(&mut self, population: usize) -> Option<(AgentId, AgentId)> {
        if population < 2 {
            return None;
        }
        let first = self.rng.gen_range(0..population);
        let mut second = self.rng.gen_range(0..population);
        while second == first {
            second = self.rng.gen_range(0..population);
        }
        Some((first, second))
    }
}

/// Replays a fixed, previously recorded sequence of pairs
#[derive(Debug, Clone, Default)]
pub struct ReplayScheduler {
    pairs: VecDeque<(AgentId, AgentId)>,
}

impl ReplayScheduler {
    pub fn new(pairs: impl IntoIterator<Item = (AgentId, AgentId)>) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }

    /// Pairs not yet handed out
    pub fn remaining(&self) -> usize {
        self.pairs.len()
    }
}

impl PairScheduler for ReplayScheduler {
    fn next_pair(&mut self, population: usize) -> Option<(AgentId, AgentId)> {
        // Pairs that do not fit the population end the replay
        self.pairs
            .pop_front()
            .filter(|&(a, b)| a != b && a < population && b < population)
    }
}

/// Wraps another scheduler and keeps every pair it hands out
pub struct RecordingScheduler<S: PairScheduler> {
    inner: S,
    recorded: Vec<(AgentId, AgentId)>,
}

impl<S: PairScheduler> RecordingScheduler<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            recorded: Vec::new(),
        }
    }

    pub fn recorded(&self) -> &[(AgentId, AgentId)] {
        &self.recorded
    }

    /// Replay scheduler over everything recorded so far
    pub fn replay(&self) -> ReplayScheduler {
        ReplayScheduler::new(self.recorded.iter().copied())
    }
}

impl<S: PairScheduler> PairScheduler for RecordingScheduler<S> {
    fn next_pair(&mut self, population: usize) -> Option<(AgentId, AgentId)> {
        let pair = self.inner.next_pair(population)?;
        self.recorded.push(pair);
        Some(pair)
    }
}
