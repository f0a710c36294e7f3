use minesweep_core::{BoardView, GameState, TileView, VisualState};
use std::io::{self, Write};

pub fn glyph(tile: &TileView) -> char {
    use VisualState::*;

    match tile.visual {
        Concealed => '#',
        RevealedEmpty => '.',
        RevealedNumbered => char::from(b'0' + tile.adjacent_mines),
        Flagged => 'F',
        Mine => '*',
        Exploded => 'X',
        VictoryMarked => '+',
    }
}

pub fn board(out: &mut impl Write, view: &BoardView) -> io::Result<()> {
    writeln!(out, "{:?}, mines left: {}", view.state, view.mines_left)?;

    write!(out, "    ")?;
    for col in 0..view.cols {
        write!(out, "{:<2}", col % 10)?;
    }
    writeln!(out)?;

    for (row, tiles) in view.rows().enumerate() {
        write!(out, "{row:>3} ")?;
        for tile in tiles {
            write!(out, "{} ", glyph(tile))?;
        }
        writeln!(out)?;
    }

    if view.overlay_visible {
        match view.state {
            GameState::Won => writeln!(out, "*** cleared! `retry` or `new` ***")?,
            GameState::Lost => writeln!(out, "*** boom. `retry` or `new` ***")?,
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use minesweep_core::{Game, Grid, GridShape, Settings};
    use web_time::Instant;

    fn lost_board() -> BoardView {
        let shape = GridShape::new(3, 2);
        let grid = Grid::from_mine_indices(shape, &[0, 5]).unwrap();
        let mut game = Game::with_layout(grid, Settings::instant(), 0).unwrap();
        game.reveal(0, Instant::now()).unwrap();
        game.flush();
        game.view()
    }

    #[test]
    fn glyphs_follow_visual_state() {
        let view = lost_board();
        let glyphs: String = view.tiles.iter().map(glyph).collect();

        assert_eq!(glyphs, "X2112X");
    }

    #[test]
    fn board_prints_rows_and_banner() {
        let mut out = Vec::new();
        board(&mut out, &lost_board()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Lost, mines left: 2"));
        assert!(text.contains("  0 X 2 1 "));
        assert!(text.contains("  1 1 2 X "));
        assert!(text.contains("boom"));
    }
}
