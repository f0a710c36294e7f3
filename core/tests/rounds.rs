use minesweep_core::*;
use std::collections::{BTreeSet, VecDeque};
use web_time::Instant;

fn play_safe_tiles(game: &mut Game) {
    let now = Instant::now();
    for index in 0..game.grid().total_tiles() {
        let tile = game.grid()[index];
        if !tile.is_mine() && !tile.is_revealed() {
            game.reveal(index, now).unwrap();
            game.flush();
        }
    }
}

/// Independent breadth-first search for the expected flood region.
fn expected_region(grid: &Grid, start: CellCount) -> BTreeSet<CellCount> {
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(index) = queue.pop_front() {
        if grid[index].adjacent_mines() != 0 {
            continue;
        }
        for neighbor in grid.neighbors(index) {
            if seen.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    seen
}

#[test]
fn five_by_five_with_three_mines_is_winnable() {
    let config = GameConfig::new((5, 5), 3).unwrap();
    for seed in 0..50 {
        let mut game = Game::new(config, Settings::instant(), seed).unwrap();

        game.reveal(12, Instant::now()).unwrap();
        game.flush();
        assert!(!game.grid()[12].is_mine());
        assert_eq!(game.grid().mine_count(), 3);

        play_safe_tiles(&mut game);

        assert_eq!(game.state(), GameState::Won, "seed {seed}");
        assert!(game.overlay_visible());
        assert!(game.grid().tiles().iter().all(Tile::is_revealed));
        assert!(
            game.grid()
                .tiles()
                .iter()
                .filter(|tile| tile.is_mine())
                .all(Tile::is_victory_marked)
        );
    }
}

#[test]
fn adjacency_matches_neighbors_after_placement() {
    for difficulty in Difficulty::ALL {
        for seed in 0..20 {
            let mut game = Game::with_difficulty(difficulty, Settings::instant(), seed);
            game.reveal(0, Instant::now()).unwrap();

            let grid = game.grid();
            assert_eq!(grid.mine_count(), difficulty.config().mines);
            for tile in grid.tiles() {
                let mines = grid
                    .neighbors(tile.index())
                    .filter(|&neighbor| grid[neighbor].is_mine())
                    .count();
                assert_eq!(usize::from(tile.adjacent_mines()), mines);
            }
        }
    }
}

#[test]
fn flood_reveals_exactly_the_zero_region_and_border() {
    for seed in 0..40 {
        let mut game = Game::with_difficulty(Difficulty::Hard, Settings::instant(), seed);
        let start = (seed * 7 % 100) as CellCount;
        game.reveal(start, Instant::now()).unwrap();
        game.flush();
        if game.state() != GameState::InProgress {
            continue;
        }

        let revealed: BTreeSet<_> = game
            .grid()
            .tiles()
            .iter()
            .filter(|tile| tile.is_revealed())
            .map(Tile::index)
            .collect();

        assert_eq!(revealed, expected_region(game.grid(), start), "seed {seed}");
    }
}

#[test]
fn losing_uncovers_every_tile() {
    for seed in 0..20 {
        let mut game = Game::with_difficulty(Difficulty::Medium, Settings::instant(), seed);
        let now = Instant::now();
        game.reveal(0, now).unwrap();
        game.flush();
        if game.state() != GameState::InProgress {
            continue;
        }

        let mine = game.grid().mine_indices().next().unwrap();
        assert_eq!(game.reveal(mine, now).unwrap(), RevealOutcome::HitMine);
        assert_eq!(game.state(), GameState::Lost);
        game.flush();

        assert!(game.grid().tiles().iter().all(Tile::is_revealed));
        assert_eq!(game.grid().unexploded_mine_count(), 0);
    }
}

#[test]
fn retry_preserves_layout_for_every_outcome() {
    for seed in 0..20 {
        let mut game = Game::with_difficulty(Difficulty::Easy, Settings::instant(), seed);
        let now = Instant::now();
        game.reveal(6, now).unwrap();
        game.flush();
        if let Some(mine) = game.grid().mine_indices().last() {
            game.reveal(mine, now).unwrap();
        }
        game.flush();
        let before = game.grid().mine_mask();

        assert!(game.retry());

        assert_eq!(game.grid().mine_mask(), before);
        assert_eq!(game.state(), GameState::InProgress);
        assert_eq!(game.grid().revealed_count(), 0);
        assert_eq!(game.grid().flagged_count(), 0);
    }
}

#[test]
fn stale_round_never_touches_new_grid() {
    let mut game = Game::with_difficulty(Difficulty::Hard, Settings::default(), 11);
    let start = Instant::now();
    game.reveal(55, start).unwrap();

    game.new_game();
    let later = start + std::time::Duration::from_secs(60);

    assert!(!game.tick(later));
    assert_eq!(game.grid().revealed_count(), 0);
    assert_eq!(game.state(), GameState::NotStarted);
}
