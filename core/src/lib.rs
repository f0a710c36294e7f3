#![no_std]

extern crate alloc;

pub use config::*;
pub use engine::*;
pub use episode::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use reveal::*;
pub use shuffle::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod config;
mod engine;
mod episode;
mod error;
mod generator;
mod grid;
mod reveal;
mod shuffle;
mod tile;
mod types;
mod view;

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
    /// Dropped because a cascade or end-game sequence is still running
    Busy,
}

impl MarkOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
            Self::Busy => false,
        }
    }
}

/// Outcome of revealing a tile
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// Tile revealed, a cascade may still be running
    Revealed,
    HitMine,
    Won,
    /// Dropped because a cascade or end-game sequence is still running
    Busy,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
            Busy => false,
        }
    }
}
