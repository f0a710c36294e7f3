use serde::{Deserialize, Serialize};

use crate::CellCount;

/// What a tile should look like, derived from its flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualState {
    Concealed,
    RevealedEmpty,
    RevealedNumbered,
    Flagged,
    Mine,
    Exploded,
    VictoryMarked,
}

/// One cell of the minefield.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    index: CellCount,
    is_mine: bool,
    adjacent_mines: u8,
    revealed: bool,
    flagged: bool,
    exploded: bool,
    victory: bool,
}

impl Tile {
    pub(crate) const fn new(index: CellCount) -> Self {
        Self {
            index,
            is_mine: false,
            adjacent_mines: 0,
            revealed: false,
            flagged: false,
            exploded: false,
            victory: false,
        }
    }

    pub const fn index(&self) -> CellCount {
        self.index
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn is_exploded(&self) -> bool {
        self.exploded
    }

    pub const fn is_victory_marked(&self) -> bool {
        self.victory
    }

    pub const fn visual_state(&self) -> VisualState {
        use VisualState::*;

        if self.exploded {
            Exploded
        } else if self.victory {
            VictoryMarked
        } else if self.revealed && self.is_mine {
            Mine
        } else if self.revealed && self.adjacent_mines == 0 {
            RevealedEmpty
        } else if self.revealed {
            RevealedNumbered
        } else if self.flagged {
            Flagged
        } else {
            Concealed
        }
    }

    pub(crate) fn set_mine(&mut self) {
        self.is_mine = true;
    }

    pub(crate) fn add_adjacent_mine(&mut self) {
        self.adjacent_mines += 1;
    }

    /// Reveals the tile and drops any flag on it.
    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
        self.flagged = false;
    }

    /// Flips the flag on a concealed tile, a revealed tile always ends unflagged.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        if self.revealed {
            self.flagged = false;
            return false;
        }
        self.flagged = !self.flagged;
        true
    }

    pub(crate) fn explode(&mut self) {
        self.exploded = true;
    }

    pub(crate) fn mark_victory(&mut self) {
        self.victory = true;
    }

    /// Back to the start of a round, the mine and its count stay.
    pub(crate) fn reset_progress(&mut self) {
        self.revealed = false;
        self.flagged = false;
        self.exploded = false;
        self.victory = false;
    }
}
