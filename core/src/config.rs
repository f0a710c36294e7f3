use core::fmt;
use core::str::FromStr;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Rejects empty boards and boards without a single safe tile.
    pub fn new((cols, rows): Coord2, mines: CellCount) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines >= mult(cols, rows) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked((cols, rows), mines))
    }

    pub const fn shape(&self) -> GridShape {
        GridShape::new(self.size.0, self.size.1)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked((5, 5), 5),
            Self::Medium => GameConfig::new_unchecked((7, 7), 7),
            Self::Hard => GameConfig::new_unchecked((10, 10), 10),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownDifficulty)
    }
}

/// Pacing of the animated parts of a round, all in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pause between tiles of a flood-fill cascade.
    pub cascade_step_ms: u32,
    /// Pause between tiles when the whole board is uncovered at the end.
    pub reveal_all_step_ms: u32,
    /// Pause between mine detonations or victory markers.
    pub end_game_step_ms: u32,
    /// Presses held at least this long flag instead of reveal.
    pub hold_threshold_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cascade_step_ms: 15,
            reveal_all_step_ms: 10,
            end_game_step_ms: 120,
            hold_threshold_ms: 1000,
        }
    }
}

impl Settings {
    /// No pauses at all, every scheduled step is due right away.
    pub fn instant() -> Self {
        Self {
            cascade_step_ms: 0,
            reveal_all_step_ms: 0,
            end_game_step_ms: 0,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            log::warn!("Rejected settings: {}", err);
            GameError::InvalidSettings
        })
    }

    pub fn cascade_step(&self) -> Duration {
        Duration::from_millis(self.cascade_step_ms.into())
    }

    pub fn reveal_all_step(&self) -> Duration {
        Duration::from_millis(self.reveal_all_step_ms.into())
    }

    pub fn end_game_step(&self) -> Duration {
        Duration::from_millis(self.end_game_step_ms.into())
    }

    pub fn hold_threshold(&self) -> Duration {
        Duration::from_millis(self.hold_threshold_ms.into())
    }
}
