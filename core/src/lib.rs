#![no_std]

extern crate alloc;

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use card::*;
pub use catalog::*;
pub use deck::*;
pub use error::*;
pub use present::*;
pub use round::*;
pub use schedule::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod card;
mod catalog;
mod deck;
mod error;
mod present;
mod round;
mod schedule;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub total_time: Seconds,
}

impl RoundConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, total_time: Seconds) -> Self {
        Self {
            rows,
            cols,
            total_time,
        }
    }

    pub fn new(rows: Coord, cols: Coord, total_time: Seconds) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, total_time);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let total_cards = self.total_cards();
        if total_cards < 2 {
            return Err(GameError::InvalidConfiguration(
                "board needs at least two cards",
            ));
        }
        if total_cards % 2 != 0 {
            return Err(GameError::InvalidConfiguration(
                "board needs an even number of cards",
            ));
        }
        if self.total_time == 0 {
            return Err(GameError::InvalidConfiguration(
                "round time must be positive",
            ));
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cards(&self) -> usize {
        mult(self.rows, self.cols) as usize
    }

    pub const fn pairs_needed(&self) -> usize {
        self.total_cards() / 2
    }
}

impl From<Difficulty> for RoundConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> RoundConfig {
        match self {
            Self::Easy => RoundConfig::new_unchecked(2, 3, 90),
            Self::Medium => RoundConfig::new_unchecked(3, 4, 150),
            Self::Hard => RoundConfig::new_unchecked(4, 5, 120),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::InvalidConfiguration("unknown difficulty"))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Ignored,
    FirstRevealed,
    Matched,
    Mismatch { first: usize, second: usize },
    Won,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    Counted(Seconds),
    Expired,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}
