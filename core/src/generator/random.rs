use rand::Rng;

use super::*;

/// Rejection sampling: draw uniform indices, skip the excluded tile and tiles that already hold a mine.
///
/// Only cheap while mines are sparse, which holds for every supported difficulty.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinePlacer<R> {
    rng: R,
}

impl<R: Rng> RandomMinePlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MinePlacer for RandomMinePlacer<R> {
    fn place_mines(
        &mut self,
        grid: &mut Grid,
        mine_count: CellCount,
        excluded: CellCount,
    ) -> Result<()> {
        check_placement(grid, mine_count, excluded)?;

        let total_tiles = grid.total_tiles();
        let mut placed = 0;
        let mut draws: u32 = 0;
        while placed < mine_count {
            let index: CellCount = self.rng.random_range(0..total_tiles);
            draws += 1;
            if index == excluded {
                continue;
            }
            if grid.place_mine(index) {
                placed += 1;
            }
        }

        log::debug!(
            "Placed {} mines on {} tiles in {} draws, safe start at {}",
            placed,
            total_tiles,
            draws,
            excluded
        );
        Ok(())
    }
}
