#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use best_time::*;
pub use cell::*;
pub use clock::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use reveal::*;
pub use session::*;
pub use types::*;

mod best_time;
mod cell;
mod clock;
mod error;
mod generator;
mod grid;
mod reveal;
mod session;
mod types;

/// Shape of a game: cube side plus how many hazards and rewards it holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub side: Coord,
    pub hazards: CellCount,
    pub rewards: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(side: Coord, hazards: CellCount, rewards: CellCount) -> Self {
        Self {
            side,
            hazards,
            rewards,
        }
    }

    pub fn new(side: Coord, hazards: CellCount, rewards: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(side, hazards, rewards);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let placed = u32::from(self.hazards) + u32::from(self.rewards);
        if self.side == 0 || self.side > MAX_SIDE || placed > u32::from(self.total_cells()) {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        cube(self.side)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.hazards)
    }
}

/// Recognized difficulty presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Easy => GameConfig::new_unchecked(5, 8, 12),
            Medium => GameConfig::new_unchecked(6, 15, 20),
            Hard => GameConfig::new_unchecked(7, 25, 30),
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl core::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::InvalidConfiguration)
    }
}

/// Result of revealing a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    AlreadyRevealed,
    HitHazard,
    FoundReward,
    RevealedEmpty(u8),
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            AlreadyRevealed => false,
            HitHazard => true,
            FoundReward => true,
            RevealedEmpty(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.config().validate(), Ok(()));
        }
        assert_eq!(Difficulty::Easy.config().safe_cells(), 117);
        assert_eq!(Difficulty::Hard.config().total_cells(), 343);
    }

    #[test]
    fn config_rejects_overfull_grid() {
        assert_eq!(GameConfig::new(2, 5, 4), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(0, 0, 0), Err(GameError::InvalidConfiguration));
        assert!(GameConfig::new(2, 4, 4).is_ok());
    }

    #[test]
    fn config_rejects_side_past_cell_count() {
        // 41^3 does not fit in a CellCount
        assert_eq!(GameConfig::new(41, 60_000, 5_000), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(Coord::MAX, 0, 0), Err(GameError::InvalidConfiguration));

        let largest = GameConfig::new(MAX_SIDE, 60_000, 4_000).unwrap();
        assert_eq!(largest.total_cells(), 64_000);
        assert_eq!(largest.safe_cells(), 4_000);
    }

    #[test]
    fn difficulty_parses_by_name() {
        assert_eq!("medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("nightmare".parse::<Difficulty>(), Err(GameError::InvalidConfiguration));
    }
}
