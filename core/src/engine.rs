use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::time::Duration;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress (first reveal places the mines)
/// - InProgress -> Won
/// - InProgress -> Lost
/// - Won | Lost -> InProgress (retry)
/// - any -> NotStarted (new game, difficulty change)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Mines not placed yet
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// How a pointer press is interpreted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PressKind {
    Tap,
    Hold,
}

impl PressKind {
    pub fn classify(held: Duration, threshold: Duration) -> Self {
        if held >= threshold {
            Self::Hold
        } else {
            Self::Tap
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    Reveal(RevealOutcome),
    Flag(MarkOutcome),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Finale {
    Detonate,
    Celebrate,
}

#[derive(Clone, Debug)]
enum Activity {
    Cascade(Flood),
    RevealAll {
        pending: VecDeque<CellCount>,
        finale: Finale,
    },
    Finale {
        finale: Finale,
        pending: Vec<CellCount>,
    },
}

/// The one operation allowed to run between player inputs.
#[derive(Clone, Debug)]
struct InFlight {
    episode: Episode,
    due: Instant,
    activity: Activity,
}

/// One game round from difficulty selection to win or loss, plus the paced steps that animate it.
///
/// All pacing is cooperative: nothing happens between calls, the caller drives pending steps with [`Game::tick`] (or
/// [`Game::flush`]) and asks [`Game::next_due`] when to come back.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    settings: Settings,
    grid: Grid,
    state: GameState,
    rng: SmallRng,
    episodes: Episodes,
    in_flight: Option<InFlight>,
    end_game_started: bool,
    overlay_visible: bool,
}

impl Game {
    pub fn new(config: GameConfig, settings: Settings, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        let grid = Grid::new(config.shape());
        Ok(Self::from_parts(config, grid, settings, seed))
    }

    pub fn with_difficulty(difficulty: Difficulty, settings: Settings, seed: u64) -> Self {
        let config = difficulty.config();
        Self::from_parts(config, Grid::new(config.shape()), settings, seed)
    }

    /// Starts from a grid whose mines are already placed, skipping first-click placement.
    pub fn with_layout(grid: Grid, settings: Settings, seed: u64) -> Result<Self> {
        let shape = grid.shape();
        let config = GameConfig::new((shape.cols, shape.rows), grid.mine_count())?;
        let mut game = Self::from_parts(config, grid, settings, seed);
        game.state = GameState::InProgress;
        Ok(game)
    }

    fn from_parts(config: GameConfig, grid: Grid, settings: Settings, seed: u64) -> Self {
        Self {
            config,
            settings,
            grid,
            state: Default::default(),
            rng: SmallRng::seed_from_u64(seed),
            episodes: Episodes::new(),
            in_flight: None,
            end_game_started: false,
            overlay_visible: false,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tile(&self, index: CellCount) -> Option<&Tile> {
        self.grid.tile(index)
    }

    /// Whether the win/lose banner should be shown.
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.grid.flagged_count())
    }

    /// A cascade or end-game sequence is still running, player input is dropped meanwhile.
    pub fn is_busy(&self) -> bool {
        self.live_in_flight().is_some()
    }

    /// When the next paced step wants to run.
    pub fn next_due(&self) -> Option<Instant> {
        self.live_in_flight().map(|in_flight| in_flight.due)
    }

    pub fn view(&self) -> BoardView {
        BoardView::from_game(self)
    }

    pub fn reveal(&mut self, index: CellCount, now: Instant) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let index = self.grid.validate_index(index)?;

        if self.is_busy() {
            log::trace!("Dropped reveal at {} while busy", index);
            return Ok(Busy);
        }
        if self.state.is_final() {
            return Ok(NoChange);
        }

        let tile = self.grid[index];
        if tile.is_revealed() || tile.is_flagged() {
            return Ok(NoChange);
        }

        if self.state.is_initial() {
            self.start_round(index)?;
        }

        if self.grid[index].is_mine() {
            let mine = self.grid.tile_mut(index);
            mine.reveal();
            mine.explode();
            log::debug!("Hit mine at {}", index);
            self.end_game(false, now);
            return Ok(HitMine);
        }

        let mut flood = Flood::new(index);
        flood.step(&mut self.grid);
        if flood.is_done() {
            return Ok(self.finish_reveal(now));
        }

        let episode = self.episodes.begin();
        log::trace!("Cascade from {} scheduled", index);
        self.in_flight = Some(InFlight {
            episode,
            due: now + self.settings.cascade_step(),
            activity: Activity::Cascade(flood),
        });
        Ok(Revealed)
    }

    pub fn toggle_flag(&mut self, index: CellCount) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let index = self.grid.validate_index(index)?;

        if self.is_busy() {
            log::trace!("Dropped flag at {} while busy", index);
            return Ok(Busy);
        }
        if self.state.is_final() {
            return Ok(NoChange);
        }

        Ok(if self.grid.tile_mut(index).toggle_flag() {
            Changed
        } else {
            NoChange
        })
    }

    /// Short presses reveal, presses held past the threshold flag.
    pub fn press(&mut self, index: CellCount, down: Instant, up: Instant) -> Result<PressOutcome> {
        let held = up.saturating_duration_since(down);
        match PressKind::classify(held, self.settings.hold_threshold()) {
            PressKind::Tap => self.reveal(index, up).map(PressOutcome::Reveal),
            PressKind::Hold => self.toggle_flag(index).map(PressOutcome::Flag),
        }
    }

    /// Replays the same mine layout from scratch.
    ///
    /// Returns `false` when no layout exists yet.
    pub fn retry(&mut self) -> bool {
        if self.state.is_initial() {
            return false;
        }
        self.stop();
        self.grid.reset_progress();
        self.reset_round(GameState::InProgress);
        log::debug!("Retrying the same layout");
        true
    }

    /// Fresh grid at the current size, mines are placed by the next first reveal.
    pub fn new_game(&mut self) {
        self.stop();
        self.grid = Grid::new(self.config.shape());
        self.reset_round(GameState::NotStarted);
        log::debug!(
            "New game, {}x{} with {} mines",
            self.config.size.0,
            self.config.size.1,
            self.config.mines
        );
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config = difficulty.config();
        self.new_game();
    }

    pub fn set_config(&mut self, config: GameConfig) -> Result<()> {
        self.config = GameConfig::new(config.size, config.mines)?;
        self.new_game();
        Ok(())
    }

    /// Stops the running cascade or end-game sequence, anything already applied stays.
    ///
    /// A cascade cut short still gets its win check, so a board cleared by the steps already taken is won.
    pub fn cancel(&mut self) {
        let cascade_due = match self.live_in_flight() {
            Some(InFlight {
                due,
                activity: Activity::Cascade(_),
                ..
            }) => Some(*due),
            _ => None,
        };
        self.stop();
        if let Some(due) = cascade_due {
            let outcome = self.finish_reveal(due);
            log::trace!("Cascade cancelled, outcome: {:?}", outcome);
        }
    }

    fn stop(&mut self) {
        self.episodes.cancel();
        if self.state.is_final() {
            self.overlay_visible = true;
        }
    }

    /// Runs every step that is due at `now`, returns whether any tile changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.drain(Some(now))
    }

    /// Runs every pending step right away.
    pub fn flush(&mut self) -> bool {
        self.drain(None)
    }

    fn drain(&mut self, now: Option<Instant>) -> bool {
        let mut changed = false;
        while let Some(in_flight) = self.in_flight.take() {
            if !self.episodes.is_live(in_flight.episode) {
                log::trace!("Dropped steps of a stale episode");
                break;
            }
            if now.is_some_and(|now| now < in_flight.due) {
                self.in_flight = Some(in_flight);
                break;
            }
            changed |= self.run_step(in_flight);
        }
        changed
    }

    fn run_step(&mut self, in_flight: InFlight) -> bool {
        let InFlight {
            episode,
            due,
            activity,
        } = in_flight;

        match activity {
            Activity::Cascade(mut flood) => loop {
                match flood.step(&mut self.grid) {
                    FloodStep::Skipped(_) => continue,
                    FloodStep::Revealed(_) if !flood.is_done() => {
                        self.in_flight = Some(InFlight {
                            episode,
                            due: due + self.settings.cascade_step(),
                            activity: Activity::Cascade(flood),
                        });
                        return true;
                    }
                    FloodStep::Revealed(_) => {
                        self.finish_cascade(&flood, due);
                        return true;
                    }
                    FloodStep::Done => {
                        self.finish_cascade(&flood, due);
                        return false;
                    }
                }
            },
            Activity::RevealAll {
                mut pending,
                finale,
            } => {
                while let Some(index) = pending.pop_front() {
                    if self.grid[index].is_revealed() {
                        continue;
                    }
                    self.grid.tile_mut(index).reveal();
                    log::trace!("Uncovered tile {}", index);
                    self.in_flight = Some(InFlight {
                        episode,
                        due: due + self.settings.reveal_all_step(),
                        activity: Activity::RevealAll { pending, finale },
                    });
                    return true;
                }
                self.start_finale(episode, due, finale);
                false
            }
            Activity::Finale {
                finale,
                mut pending,
            } => {
                let Some(index) = pending.pop() else {
                    self.finish_end_game();
                    return true;
                };

                let tile = self.grid.tile_mut(index);
                match finale {
                    Finale::Detonate => tile.explode(),
                    Finale::Celebrate => tile.mark_victory(),
                }
                log::trace!("{:?} mine {}", finale, index);

                if pending.is_empty() {
                    self.finish_end_game();
                } else {
                    self.in_flight = Some(InFlight {
                        episode,
                        due: due + self.settings.end_game_step(),
                        activity: Activity::Finale { finale, pending },
                    });
                }
                true
            }
        }
    }

    fn live_in_flight(&self) -> Option<&InFlight> {
        self.in_flight
            .as_ref()
            .filter(|in_flight| self.episodes.is_live(in_flight.episode))
    }

    fn start_round(&mut self, excluded: CellCount) -> Result<()> {
        RandomMinePlacer::new(&mut self.rng).place_mines(
            &mut self.grid,
            self.config.mines,
            excluded,
        )?;
        self.state = GameState::InProgress;
        log::debug!("Round started, safe start at {}", excluded);
        Ok(())
    }

    fn finish_cascade(&mut self, flood: &Flood, due: Instant) {
        self.episodes.cancel();
        let outcome = self.finish_reveal(due);
        log::trace!(
            "Cascade revealed {} tiles, outcome: {:?}",
            flood.revealed(),
            outcome
        );
    }

    /// Win check, only run once a reveal has fully completed.
    fn finish_reveal(&mut self, now: Instant) -> RevealOutcome {
        let cleared = self.grid.concealed_safe_count() == 0;
        let untouched = self.grid.unexploded_mine_count() == self.grid.mine_count();
        if cleared && untouched {
            self.end_game(true, now);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn end_game(&mut self, won: bool, now: Instant) {
        if self.end_game_started {
            log::debug!("End game already running, ignored");
            return;
        }
        self.end_game_started = true;
        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!("Game ended: {:?}", self.state);

        let finale = if won {
            Finale::Celebrate
        } else {
            Finale::Detonate
        };
        let episode = self.episodes.begin();
        self.in_flight = Some(InFlight {
            episode,
            due: now,
            activity: Activity::RevealAll {
                pending: (0..self.grid.total_tiles()).collect(),
                finale,
            },
        });
    }

    fn start_finale(&mut self, episode: Episode, due: Instant, finale: Finale) {
        let mut pending: Vec<CellCount> = match finale {
            Finale::Detonate => self
                .grid
                .mine_indices()
                .filter(|&index| !self.grid[index].is_exploded())
                .collect(),
            Finale::Celebrate => self.grid.mine_indices().collect(),
        };
        shuffle(&mut pending, &mut self.rng);
        log::debug!("{:?} sequence over {} mines", finale, pending.len());

        self.in_flight = Some(InFlight {
            episode,
            due,
            activity: Activity::Finale { finale, pending },
        });
    }

    fn finish_end_game(&mut self) {
        self.episodes.cancel();
        self.overlay_visible = true;
        log::debug!("End game sequence finished");
    }

    fn reset_round(&mut self, state: GameState) {
        self.in_flight = None;
        self.state = state;
        self.end_game_started = false;
        self.overlay_visible = false;
    }
}
