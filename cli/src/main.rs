use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minesweep_core::{Difficulty, Game, Settings};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use web_time::{Instant, SystemTime, UNIX_EPOCH};

use command::{Command, HELP};

mod command;
mod render;

/// Minesweeper in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Board preset: easy, medium or hard
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Seed for mine placement and end-game ordering, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with pacing settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Skip every animation pause
    #[arg(long)]
    instant: bool,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let settings = load_settings(&cli)?;
    let seed = cli.seed.unwrap_or_else(clock_seed);
    log::info!("Starting {} game with seed {}", cli.difficulty, seed);

    let mut game = Game::with_difficulty(cli.difficulty, settings, seed);
    let mut out = io::stdout().lock();
    writeln!(out, "{HELP}")?;
    render::board(&mut out, &game.view())?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let applied = line
            .parse::<Command>()
            .and_then(|command| apply(&mut game, command, &mut out));
        match applied {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                writeln!(out, "error: {err:#}")?;
                continue;
            }
        }

        drive(&mut game);
        render::board(&mut out, &game.view())?;
    }
    Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.settings {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading settings from {}", path.display()))?;
            Settings::from_json(&json)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => Settings::default(),
    };
    if cli.instant {
        settings = Settings {
            hold_threshold_ms: settings.hold_threshold_ms,
            ..Settings::instant()
        };
    }
    Ok(settings)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Returns `Ok(false)` once the player wants to quit.
fn apply(game: &mut Game, command: Command, out: &mut impl Write) -> Result<bool> {
    let shape = game.grid().shape();
    let index_of = |at| {
        shape
            .index_of(at)
            .with_context(|| format!("{at:?} is off the board"))
    };

    match command {
        Command::Reveal(at) => {
            let outcome = game.reveal(index_of(at)?, Instant::now())?;
            log::debug!("reveal {:?}: {:?}", at, outcome);
        }
        Command::Flag(at) => {
            let outcome = game.toggle_flag(index_of(at)?)?;
            log::debug!("flag {:?}: {:?}", at, outcome);
        }
        Command::Press { at, held_ms } => {
            let up = Instant::now();
            let held = Duration::from_millis(held_ms);
            let down = up.checked_sub(held).unwrap_or(up);
            let outcome = game.press(index_of(at)?, down, up)?;
            log::debug!("press {:?} for {}ms: {:?}", at, held_ms, outcome);
        }
        Command::Retry => {
            if !game.retry() {
                writeln!(out, "nothing to retry yet")?;
            }
        }
        Command::New => game.new_game(),
        Command::Difficulty(difficulty) => game.set_difficulty(difficulty),
        Command::Json => writeln!(out, "{}", game.view().to_json()?)?,
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Plays pending cascades and end-game sequences in real time.
fn drive(game: &mut Game) {
    while let Some(due) = game.next_due() {
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }
        game.tick(Instant::now());
    }
}
