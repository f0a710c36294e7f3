use alloc::collections::VecDeque;

use crate::*;

/// Result of a single flood-fill step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FloodStep {
    /// The tile at this index was revealed.
    Revealed(CellCount),
    /// The queued tile was already revealed or is flagged.
    Skipped(CellCount),
    /// Nothing left to expand.
    Done,
}

/// Worklist flood fill over zero-adjacency tiles.
///
/// Each step reveals at most one tile, so a scheduler can pause between steps and check for cancellation before the
/// next one. The tile's own `revealed` flag is the visited set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flood {
    pending: VecDeque<CellCount>,
    revealed: CellCount,
}

impl Flood {
    pub fn new(start: CellCount) -> Self {
        Self {
            pending: VecDeque::from([start]),
            revealed: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    /// Tiles revealed by this flood so far.
    pub fn revealed(&self) -> CellCount {
        self.revealed
    }

    pub fn step(&mut self, grid: &mut Grid) -> FloodStep {
        let Some(index) = self.pending.pop_front() else {
            return FloodStep::Done;
        };

        let tile = grid[index];
        if tile.is_revealed() || tile.is_flagged() {
            return FloodStep::Skipped(index);
        }

        grid.tile_mut(index).reveal();
        self.revealed += 1;
        log::trace!(
            "Flood revealed tile {}, adjacent mines: {}",
            index,
            tile.adjacent_mines()
        );

        // mines and numbered tiles stop the expansion
        if !tile.is_mine() && tile.adjacent_mines() == 0 {
            self.pending.extend(grid.neighbors(index).filter(|&neighbor| {
                let neighbor = grid[neighbor];
                !neighbor.is_revealed() && !neighbor.is_flagged()
            }));
        }
        self.discard_settled(grid);

        FloodStep::Revealed(index)
    }

    /// Drops queued tiles that an earlier step already revealed, so [`Flood::is_done`] holds as soon as the last tile
    /// is out.
    fn discard_settled(&mut self, grid: &Grid) {
        while let Some(&next) = self.pending.front() {
            if grid[next].is_revealed() || grid[next].is_flagged() {
                self.pending.pop_front();
            } else {
                break;
            }
        }
    }

    /// Runs the flood until it finishes or `live` reports cancellation, returns the tiles revealed by this call.
    pub fn run_while(&mut self, grid: &mut Grid, mut live: impl FnMut() -> bool) -> CellCount {
        let before = self.revealed;
        while live() {
            if self.step(grid) == FloodStep::Done {
                break;
            }
        }
        self.revealed - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn grid(cols: Coord, rows: Coord, mines: &[CellCount]) -> Grid {
        let shape = GridShape::new(cols, rows);
        Grid::from_mine_indices(shape, mines).unwrap()
    }

    fn revealed(grid: &Grid) -> Vec<CellCount> {
        grid.tiles()
            .iter()
            .filter(|tile| tile.is_revealed())
            .map(Tile::index)
            .collect()
    }

    #[test]
    fn numbered_tile_stops_immediately() {
        // . * .
        // . . .
        let mut grid = grid(3, 2, &[1]);
        let mut flood = Flood::new(0);

        assert_eq!(flood.run_while(&mut grid, || true), 1);
        assert_eq!(revealed(&grid), [0]);
    }

    #[test]
    fn zero_region_and_border_only() {
        // 0 0 1 *
        // 0 0 1 1
        // 0 0 0 0
        // mines at 3 only, everything but the mine is reachable
        let mut grid = grid(4, 3, &[3]);
        let mut flood = Flood::new(0);

        flood.run_while(&mut grid, || true);

        assert_eq!(revealed(&grid), [0, 1, 2, 4, 5, 6, 7, 8, 9, 10, 11]);
        assert!(!grid[3].is_revealed());
    }

    #[test]
    fn wall_of_mines_splits_regions() {
        // 0 2 * 2 0
        // 0 3 * 3 0
        // 0 2 * 2 0
        let mut grid = grid(5, 3, &[2, 7, 12]);
        let mut flood = Flood::new(0);

        flood.run_while(&mut grid, || true);

        assert_eq!(revealed(&grid), [0, 1, 5, 6, 10, 11]);
    }

    #[test]
    fn flagged_tiles_block_expansion() {
        let mut grid = grid(3, 1, &[]);
        grid.tile_mut(1).toggle_flag();
        let mut flood = Flood::new(0);

        flood.run_while(&mut grid, || true);

        assert_eq!(revealed(&grid), [0]);
        assert!(grid[1].is_flagged());
    }

    #[test]
    fn revealing_twice_is_noop() {
        let mut grid = grid(3, 3, &[8]);
        Flood::new(0).run_while(&mut grid, || true);
        let before = grid.clone();

        let mut again = Flood::new(0);
        assert_eq!(again.step(&mut grid), FloodStep::Skipped(0));
        assert_eq!(again.step(&mut grid), FloodStep::Done);
        assert_eq!(grid, before);
    }

    #[test]
    fn each_tile_revealed_once() {
        let mut grid = grid(6, 6, &[]);
        let mut flood = Flood::new(14);

        assert_eq!(flood.run_while(&mut grid, || true), 36);
        assert_eq!(flood.revealed(), 36);
    }

    #[test]
    fn done_right_after_last_reveal() {
        // the queue fills up with duplicates of 2 and 3 before they are revealed
        let mut grid = grid(2, 2, &[]);
        let mut flood = Flood::new(0);

        for index in 0..4 {
            assert_eq!(flood.step(&mut grid), FloodStep::Revealed(index));
        }

        assert!(flood.is_done());
        assert_eq!(flood.step(&mut grid), FloodStep::Done);
    }

    #[test]
    fn cancellation_keeps_partial_progress() {
        let mut grid = grid(6, 6, &[]);
        let mut flood = Flood::new(0);
        let mut budget = 5;

        let count = flood.run_while(&mut grid, || {
            budget -= 1;
            budget >= 0
        });

        assert_eq!(count, 5);
        assert_eq!(grid.revealed_count(), 5);
        assert!(!flood.is_done());
    }
}
