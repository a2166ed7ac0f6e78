//! Interval Table
//!
//! Rounds are consecutive disjoint intervals of the local counter. Round `i` is
//! a green zone of width `floor(c * r^i)` followed by a red zone of width
//! `floor(3 * c * r^(i-1))`; the last value of the red zone is the round's door.
//!
//! The table is built once per run from the constants and the run's final round
//! and is read-only afterwards.
use log::debug;

use crate::je_error::{ProtocolError, Result};
use crate::je_interface::{Count, Round, DEFAULT_BASE_WIDTH, DEFAULT_GROWTH_RATIO, RED_FACTOR};

/// Tunable constants of the round structure
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Constants {
    /// Width of the first green zone (c)
    pub base_width: u64,

    /// Growth ratio between consecutive rounds (r)
    pub growth_ratio: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            base_width: DEFAULT_BASE_WIDTH,
            growth_ratio: DEFAULT_GROWTH_RATIO,
        }
    }
}

impl Constants {
    pub fn new(base_width: u64, growth_ratio: f64) -> Self {
        Self {
            base_width,
            growth_ratio,
        }
    }

    /// Check `c > 0` and `r > 1`
    pub fn validate(&self) -> Result<()> {
        if self.base_width == 0 {
            return Err(self.invalid("base width must be positive"));
        }
        if !self.growth_ratio.is_finite() || self.growth_ratio <= 1.0 {
            return Err(self.invalid("growth ratio must be a finite number greater than 1"));
        }
        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> ProtocolError {
        ProtocolError::InvalidConstants {
            base_width: self.base_width,
            growth_ratio: self.growth_ratio,
            reason: reason.into(),
        }
    }

    /// floor(c * r^i)
    fn green_width(&self, round: Round) -> f64 {
        (self.base_width as f64 * self.growth_ratio.powf(round as f64)).floor()
    }

    /// floor(3 * c * r^(i-1)), with a real exponent so round 0 uses r^-1
    fn red_width(&self, round: Round) -> f64 {
        (RED_FACTOR * self.base_width as f64 * self.growth_ratio.powf(round as f64 - 1.0)).floor()
    }
}

/// Boundary arrays for rounds `0..=final_round`
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTable {
    constants: Constants,
    /// Last count value of each round
    doors: Vec<Count>,
    /// Last count value of each round's green zone
    green_ends: Vec<Count>,
}

impl IntervalTable {
    /// Build the table for rounds `0..=max_round`
    ///
    /// # Errors
    /// * `InvalidConstants` - constants out of range, or a round with an empty
    ///   green or red zone, or a door that does not fit a counter
    pub fn build(constants: Constants, max_round: Round) -> Result<Self> {
        constants.validate()?;
        Self::build_validated(constants, max_round)
    }

    /// Build from constants that already passed `Constants::validate`
    pub(crate) fn build_validated(constants: Constants, max_round: Round) -> Result<Self> {
        let mut doors: Vec<Count> = Vec::with_capacity(max_round + 1);
        let mut green_ends: Vec<Count> = Vec::with_capacity(max_round + 1);

        for i in 0..=max_round {
            let green = constants.green_width(i);
            let red = constants.red_width(i);

            if green < 1.0 {
                return Err(constants.invalid(format!("round {} has an empty green zone", i)));
            }
            if red < 1.0 {
                return Err(constants.invalid(format!("round {} has an empty red zone", i)));
            }
            // f64 -> u64 casts saturate, reject anything near the limit instead
            if green + red >= (Count::MAX / 2) as f64 {
                return Err(constants.invalid(format!("round {} overflows the counter", i)));
            }

            let (green, red) = (green as Count, red as Count);
            let start: Count = doors.last().copied().unwrap_or(0);
            let green_end = start.checked_add(green);
            let door = green_end.and_then(|g| g.checked_add(red));

            match (green_end, door) {
                (Some(g), Some(d)) => {
                    green_ends.push(g);
                    doors.push(d);
                }
                _ => return Err(constants.invalid(format!("round {} overflows the counter", i))),
            }
        }

        debug!(
            "interval table (c={}, r={}): doors {:?}, green ends {:?}",
            constants.base_width, constants.growth_ratio, doors, green_ends
        );

        Ok(Self {
            constants,
            doors,
            green_ends,
        })
    }

    pub fn constants(&self) -> Constants {
        self.constants
    }

    /// Highest round of the table
    pub fn final_round(&self) -> Round {
        self.doors.len() - 1
    }

    /// Door of the final round; no agent counts past it
    pub fn final_door(&self) -> Count {
        self.doors[self.final_round()]
    }

    /// Door of round `round`
    ///
    /// # Panics
    /// If `round` is past the final round
    pub fn door(&self, round: Round) -> Count {
        self.doors[round]
    }

    /// Last green value of round `round`
    ///
    /// # Panics
    /// If `round` is past the final round
    pub fn green_end(&self, round: Round) -> Count {
        self.green_ends[round]
    }

    pub fn doors(&self) -> &[Count] {
        &self.doors
    }

    pub fn green_ends(&self) -> &[Count] {
        &self.green_ends
    }

    /// Smallest round whose door is at or above `count`
    ///
    /// Returns `None` for counts beyond the final door.
    pub fn round_of(&self, count: Count) -> Option<Round> {
        let round = self.doors.partition_point(|&door| door < count);
        (round < self.doors.len()).then_some(round)
    }

    /// `count` lies in the green zone of `round`
    pub fn is_green(&self, count: Count, round: Round) -> bool {
        count <= self.green_ends[round]
    }

    /// `count` lies in the red zone of `round` (strictly before the door)
    pub fn is_red(&self, count: Count, round: Round) -> bool {
        !self.is_green(count, round) && count < self.doors[round]
    }

    /// `count` sits exactly on the door of `round`
    pub fn is_door(&self, count: Count, round: Round) -> bool {
        count == self.doors[round]
    }
}
