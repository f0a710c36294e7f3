use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the presentation layer needs to draw one tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub index: CellCount,
    pub revealed: bool,
    pub flagged: bool,
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub visual: VisualState,
}

impl From<&Tile> for TileView {
    fn from(tile: &Tile) -> Self {
        Self {
            index: tile.index(),
            revealed: tile.is_revealed(),
            flagged: tile.is_flagged(),
            is_mine: tile.is_mine(),
            adjacent_mines: tile.adjacent_mines(),
            visual: tile.visual_state(),
        }
    }
}

/// Snapshot of a round for rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub cols: Coord,
    pub rows: Coord,
    pub state: GameState,
    pub overlay_visible: bool,
    pub busy: bool,
    pub mines_left: i32,
    pub tiles: Vec<TileView>,
}

impl BoardView {
    pub fn from_game(game: &Game) -> Self {
        let shape = game.grid().shape();
        Self {
            cols: shape.cols,
            rows: shape.rows,
            state: game.state(),
            overlay_visible: game.overlay_visible(),
            busy: game.is_busy(),
            mines_left: game.mines_left(),
            tiles: game.grid().tiles().iter().map(TileView::from).collect(),
        }
    }

    /// Tiles grouped by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileView]> {
        self.tiles.chunks(usize::from(self.cols.max(1)))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
