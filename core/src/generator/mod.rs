use crate::*;
pub use random::*;

mod random;

/// Strategy that fills an empty grid with mines.
pub trait MinePlacer {
    /// Places exactly `mine_count` mines, never on `excluded`.
    fn place_mines(
        &mut self,
        grid: &mut Grid,
        mine_count: CellCount,
        excluded: CellCount,
    ) -> Result<()>;
}

/// Checks that `mine_count` mines fit on `grid` while `excluded` stays safe.
pub fn check_placement(grid: &Grid, mine_count: CellCount, excluded: CellCount) -> Result<()> {
    grid.validate_index(excluded)?;
    if grid.has_mines() {
        log::warn!(
            "Placing mines on a grid that already has {}",
            grid.mine_count()
        );
    }
    let free = grid.total_tiles() - grid.mine_count();
    if mine_count >= free {
        return Err(GameError::TooManyMines);
    }
    Ok(())
}
