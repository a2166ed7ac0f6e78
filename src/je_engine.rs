//! Interaction Engine
//!
//! The transition applied to an ordered pair (subject, partner). Only the
//! subject is mutated; the partner contributes its broadcast bit.
//!
//! - Eager agents (below their own level) advance on every interaction, doors
//!   included, and always broadcast "go".
//! - Cautious agents advance freely between doors. On a door they advance only
//!   when the partner currently broadcasts "go". They broadcast "go" while in
//!   the green zone and "hold" while in the red zone.
//! - Nobody advances past the final door. The first time a cautious agent is
//!   found there it is counted by the termination oracle.

use crate::je_agent::Agent;
use crate::je_interface::Event;
use crate::je_intervals::IntervalTable;

/// Harness-side counter of agents settled on the final door
///
/// No agent ever reads it; it only tells the scheduler when to stop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminationOracle {
    settled: usize,
}

impl TerminationOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of agents counted so far
    pub fn settled(&self) -> usize {
        self.settled
    }

    /// Count one more settled agent
    pub fn record(&mut self) {
        self.settled += 1;
    }

    /// Every agent of a population of `population` has settled
    pub fn is_complete(&self, population: usize) -> bool {
        self.settled >= population
    }
}

/// Apply one interaction to `subject`, observing `partner_broadcast`
///
/// Returns the notable event of this step, if any.
pub fn transition(
    table: &IntervalTable,
    subject: &mut Agent,
    partner_broadcast: bool,
    oracle: &mut TerminationOracle,
) -> Option<Event> {
    let mut event = None;
    let round_before = subject.round;

    if table.is_door(subject.count, subject.round) && subject.is_cautious() {
        if subject.count == table.final_door() {
            // Final door: count once, never advance
            if subject.final_pending {
                oracle.record();
                subject.final_pending = false;
                event = Some(Event::FinalDoorReached {
                    count: subject.count,
                    settled: oracle.settled(),
                });
            }
        } else if partner_broadcast {
            advance(table, subject);
        }
    } else {
        advance(table, subject);
    }

    if subject.round != round_before {
        event = Some(Event::DoorCrossed {
            round: subject.round,
            count: subject.count,
            cautious: subject.is_cautious(),
        });
    }

    update_broadcast(table, subject);
    event
}

/// Increment the counter and recompute the round, stopping at the final door
fn advance(table: &IntervalTable, agent: &mut Agent) {
    if agent.count >= table.final_door() {
        return;
    }
    agent.count += 1;
    agent.round = table
        .round_of(agent.count)
        .unwrap_or_else(|| table.final_round());
}

/// Broadcast bit for the next interaction, from the updated position
fn update_broadcast(table: &IntervalTable, agent: &mut Agent) {
    if agent.is_eager() {
        agent.broadcast = true;
    } else if table.is_green(agent.count, agent.round) {
        agent.broadcast = true;
    } else if table.is_red(agent.count, agent.round) {
        agent.broadcast = false;
    }
    // cautious on a door: keep the previous bit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::je_intervals::Constants;

    fn table(max_round: usize) -> IntervalTable {
        IntervalTable::build(Constants::default(), max_round).unwrap()
    }

    fn agent_at(sample: u32, count: u64, table: &IntervalTable) -> Agent {
        let mut agent = Agent::new(sample);
        agent.count = count;
        agent.round = table.round_of(count).unwrap();
        agent
    }

    #[test]
    fn test_first_step_turns_broadcast_on() {
        let table = table(0);
        let mut oracle = TerminationOracle::new();
        let mut agent = Agent::new(1);

        assert!(!agent.broadcast());
        let event = transition(&table, &mut agent, false, &mut oracle);

        assert_eq!(event, None);
        assert_eq!(agent.count(), 1);
        assert!(agent.broadcast());
    }

    #[test]
    fn test_cautious_advances_between_doors_regardless_of_partner() {
        let table = table(1);
        let mut oracle = TerminationOracle::new();
        let mut agent = agent_at(1, 20, &table);

        transition(&table, &mut agent, false, &mut oracle);
        assert_eq!(agent.count(), 21);
        assert!(!agent.broadcast(), "red zone says hold");
    }

    #[test]
    fn test_green_to_red_flips_broadcast() {
        let table = table(1);
        let mut oracle = TerminationOracle::new();
        let mut agent = agent_at(1, 15, &table);

        transition(&table, &mut agent, false, &mut oracle);
        assert_eq!(agent.count(), 16);
        assert!(agent.broadcast());

        transition(&table, &mut agent, false, &mut oracle);
        assert_eq!(agent.count(), 17);
        assert!(!agent.broadcast());
    }

    #[test]
    fn test_cautious_holds_at_door_without_go() {
        let table = table(1);
        let mut oracle = TerminationOracle::new();
        let mut agent = agent_at(1, 40, &table);
        agent.broadcast = false;

        for _ in 0..5 {
            let event = transition(&table, &mut agent, false, &mut oracle);
            assert_eq!(event, None);
        }
        assert_eq!(agent.count(), 40);
        assert_eq!(agent.round(), 0);
        assert!(!agent.broadcast(), "door keeps the previous bit");
        assert_eq!(oracle.settled(), 0);
    }

    #[test]
    fn test_cautious_crosses_door_on_go() {
        let table = table(1);
        let mut oracle = TerminationOracle::new();
        let mut agent = agent_at(1, 40, &table);

        let event = transition(&table, &mut agent, true, &mut oracle);

        assert_eq!(
            event,
            Some(Event::DoorCrossed {
                round: 1,
                count: 41,
                cautious: true,
            })
        );
        assert_eq!(agent.round(), 1);
        assert!(agent.broadcast(), "start of round 1 is green");
    }

    #[test]
    fn test_eager_crosses_door_and_always_says_go() {
        let table = table(4);
        let mut oracle = TerminationOracle::new();
        // level 4, red zone of round 0
        let mut agent = agent_at(16, 30, &table);

        transition(&table, &mut agent, false, &mut oracle);
        assert!(agent.broadcast(), "eager agents broadcast go even in red");

        let mut agent = agent_at(16, 40, &table);
        let event = transition(&table, &mut agent, false, &mut oracle);
        assert_eq!(agent.count(), 41);
        assert!(matches!(event, Some(Event::DoorCrossed { round: 1, cautious: false, .. })));
    }

    #[test]
    fn test_turns_cautious_at_own_level() {
        let table = table(2);
        let mut oracle = TerminationOracle::new();
        // level 1 on the door of round 0
        let mut agent = agent_at(2, 40, &table);
        assert!(agent.is_eager());

        let event = transition(&table, &mut agent, false, &mut oracle);
        assert!(matches!(event, Some(Event::DoorCrossed { round: 1, cautious: true, .. })));

        // walk into the red zone of round 1, then onto its door
        while agent.count() < 120 {
            transition(&table, &mut agent, false, &mut oracle);
        }
        assert!(!agent.broadcast());
        transition(&table, &mut agent, false, &mut oracle);
        assert_eq!(agent.count(), 120, "cautious agent waits on its door");
    }

    #[test]
    fn test_final_door_clamp_and_single_count() {
        let table = table(1);
        let mut oracle = TerminationOracle::new();
        let mut agent = agent_at(1, 119, &table);

        transition(&table, &mut agent, true, &mut oracle);
        assert_eq!(agent.count(), 120);
        assert_eq!(oracle.settled(), 0);

        let event = transition(&table, &mut agent, true, &mut oracle);
        assert_eq!(
            event,
            Some(Event::FinalDoorReached {
                count: 120,
                settled: 1
            })
        );
        assert!(!agent.final_pending());

        for partner in [true, false, true] {
            assert_eq!(transition(&table, &mut agent, partner, &mut oracle), None);
        }
        assert_eq!(agent.count(), 120);
        assert_eq!(agent.round(), 1);
        assert_eq!(oracle.settled(), 1);
    }

    #[test]
    fn test_oracle_completion() {
        let mut oracle = TerminationOracle::new();
        assert!(!oracle.is_complete(2));
        oracle.record();
        assert!(!oracle.is_complete(2));
        oracle.record();
        assert!(oracle.is_complete(2));
    }
}
