use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Flat row-major sequence of tiles; neighbours come from index arithmetic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    shape: GridShape,
    tiles: Vec<Tile>,
    mine_count: CellCount,
}

impl Grid {
    /// Grid without any mines.
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            tiles: (0..shape.total_tiles()).map(Tile::new).collect(),
            mine_count: 0,
        }
    }

    /// Builds a grid from a `(rows, cols)` mine mask.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let rows = Coord::try_from(rows).map_err(|_| GameError::InvalidSize)?;
        let cols = Coord::try_from(cols).map_err(|_| GameError::InvalidSize)?;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidSize);
        }

        let shape = GridShape::new(cols, rows);
        let mut grid = Self::new(shape);
        for ((row, col), &is_mine) in mine_mask.indexed_iter() {
            if is_mine {
                // rows and cols were checked to fit a Coord above
                let index = CellCount::from(row as Coord) * CellCount::from(cols)
                    + CellCount::from(col as Coord);
                grid.place_mine(index);
            }
        }
        Ok(grid)
    }

    pub fn from_mine_indices(shape: GridShape, mines: &[CellCount]) -> Result<Self> {
        let mut grid = Self::new(shape);
        for &index in mines {
            let index = grid.validate_index(index)?;
            grid.place_mine(index);
        }
        Ok(grid)
    }

    /// Mine layout as a `(rows, cols)` mask.
    pub fn mine_mask(&self) -> Array2<bool> {
        let mut mine_mask = Array2::default((
            usize::from(self.shape.rows),
            usize::from(self.shape.cols),
        ));
        for tile in self.tiles.iter().filter(|tile| tile.is_mine()) {
            mine_mask[self.shape.coords(tile.index()).to_nd_index()] = true;
        }
        mine_mask
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: CellCount) -> Option<&Tile> {
        self.tiles.get(usize::from(index))
    }

    pub(crate) fn tile_mut(&mut self, index: CellCount) -> &mut Tile {
        &mut self.tiles[usize::from(index)]
    }

    pub fn validate_index(&self, index: CellCount) -> Result<CellCount> {
        if self.shape.contains(index) {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    pub fn total_tiles(&self) -> CellCount {
        self.shape.total_tiles()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_tile_count(&self) -> CellCount {
        self.total_tiles() - self.mine_count
    }

    pub fn has_mines(&self) -> bool {
        self.mine_count > 0
    }

    pub fn neighbors(&self, index: CellCount) -> NeighborIter {
        self.shape.neighbors(index)
    }

    /// Safe tiles the player still has to reveal.
    pub fn concealed_safe_count(&self) -> CellCount {
        self.count(|tile| !tile.is_mine() && !tile.is_revealed())
    }

    pub fn unexploded_mine_count(&self) -> CellCount {
        self.count(|tile| tile.is_mine() && !tile.is_exploded())
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count(Tile::is_flagged)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count(Tile::is_revealed)
    }

    pub fn mine_indices(&self) -> impl Iterator<Item = CellCount> + '_ {
        self.tiles
            .iter()
            .filter(|tile| tile.is_mine())
            .map(Tile::index)
    }

    /// Marks `index` as a mine and bumps the count of every neighbour.
    ///
    /// Returns `false` when the tile already held a mine.
    pub(crate) fn place_mine(&mut self, index: CellCount) -> bool {
        let tile = self.tile_mut(index);
        if tile.is_mine() {
            return false;
        }
        tile.set_mine();
        self.mine_count += 1;

        for neighbor in self.shape.neighbors(index) {
            self.tile_mut(neighbor).add_adjacent_mine();
        }
        true
    }

    /// Clears reveal, flag and end-game markers while keeping the mines.
    pub(crate) fn reset_progress(&mut self) {
        for tile in &mut self.tiles {
            tile.reset_progress();
        }
    }

    fn count(&self, predicate: impl Fn(&Tile) -> bool) -> CellCount {
        // tile count is bounded by CellCount
        self.tiles.iter().filter(|tile| predicate(tile)).count() as CellCount
    }
}

impl Index<CellCount> for Grid {
    type Output = Tile;

    fn index(&self, index: CellCount) -> &Self::Output {
        &self.tiles[usize::from(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn place_mine_counts_neighbors() {
        let shape = GridShape::new(3, 3);
        let grid = Grid::from_mine_indices(shape, &[0, 8]).unwrap();

        let counts: Vec<u8> = grid.tiles().iter().map(Tile::adjacent_mines).collect();
        assert_eq!(counts, vec![0, 1, 0, 1, 2, 1, 0, 1, 0]);
        assert_eq!(grid.mine_count(), 2);
        assert_eq!(grid.safe_tile_count(), 7);
    }

    #[test]
    fn placing_same_mine_twice_is_ignored() {
        let mut grid = Grid::new(GridShape::new(2, 2));
        assert!(grid.place_mine(1));
        assert!(!grid.place_mine(1));

        assert_eq!(grid.mine_count(), 1);
        assert_eq!(grid[0].adjacent_mines(), 1);
    }

    #[test]
    fn mine_mask_round_trips() {
        let mut mask = Array2::default((2, 3));
        mask[(0, 2)] = true;
        mask[(1, 0)] = true;

        let grid = Grid::from_mine_mask(&mask).unwrap();

        assert_eq!(grid.shape(), GridShape::new(3, 2));
        assert!(grid[2].is_mine());
        assert!(grid[3].is_mine());
        assert_eq!(grid.mine_mask(), mask);
    }

    #[test]
    fn rejects_out_of_range_mines() {
        let result = Grid::from_mine_indices(GridShape::new(2, 2), &[4]);
        assert_eq!(result, Err(GameError::InvalidIndex));
    }

    #[test]
    fn reset_progress_keeps_layout() {
        let mut grid = Grid::from_mine_indices(GridShape::new(2, 2), &[3]).unwrap();
        grid.tile_mut(0).reveal();
        grid.tile_mut(1).toggle_flag();
        grid.tile_mut(3).explode();

        grid.reset_progress();

        assert_eq!(grid.revealed_count(), 0);
        assert_eq!(grid.flagged_count(), 0);
        assert_eq!(grid.unexploded_mine_count(), 1);
        assert!(grid[3].is_mine());
    }
}
