//! Game loop - tick cadence, speed ramp and lifecycle
//!
//! The loop wraps a [`Board`] and drives it from an external timer. It never
//! sleeps or spawns anything itself: the host implements [`TickScheduler`] to
//! arm a periodic timer and calls [`GameLoop::tick`] each time it fires.
//!
//! # State machine
//!
//! ```text
//! NotStarted --new_game--> Playing <--pause/resume--> Paused
//!                             |
//!                       board over
//!                             v
//!                          GameOver --new_game--> Playing
//! ```
//!
//! # Speed ramp
//!
//! | Lines cleared | Interval (base 500ms) |
//! |---------------|-----------------------|
//! | 0-9           | 500ms                 |
//! | 10-19         | 400ms                 |
//! | 20-29         | 300ms                 |
//! | 30-39         | 200ms                 |
//! | 40-49         | 100ms                 |
//! | 50+           | unchanged (100ms)     |

use arrayvec::ArrayVec;

use crate::board::{Board, StepOutcome};
use crate::config::{ConfigError, GameConfig};
use crate::rng::RandomSource;
use crate::snapshot::BoardSnapshot;
use crate::types::{GameCommand, GameEvent, PlayState};

/// Arms the periodic tick timer
///
/// Each call supersedes the previous schedule.
pub trait TickScheduler {
    fn start_timer(&mut self, interval_ms: u32);
}

/// Receives a fresh picture of the board after anything visible changed
pub trait RedrawSink {
    fn redraw(&mut self, snapshot: &BoardSnapshot);
}

impl TickScheduler for () {
    fn start_timer(&mut self, _interval_ms: u32) {}
}

impl RedrawSink for () {
    fn redraw(&mut self, _snapshot: &BoardSnapshot) {}
}

/// Records every requested interval
impl TickScheduler for Vec<u32> {
    fn start_timer(&mut self, interval_ms: u32) {
        self.push(interval_ms);
    }
}

/// Keeps every snapshot it is handed
impl RedrawSink for Vec<BoardSnapshot> {
    fn redraw(&mut self, snapshot: &BoardSnapshot) {
        self.push(snapshot.clone());
    }
}

impl<T: TickScheduler + ?Sized> TickScheduler for &mut T {
    fn start_timer(&mut self, interval_ms: u32) {
        (**self).start_timer(interval_ms);
    }
}

impl<T: RedrawSink + ?Sized> RedrawSink for &mut T {
    fn redraw(&mut self, snapshot: &BoardSnapshot) {
        (**self).redraw(snapshot);
    }
}

/// What the driver should do after a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    /// False once the game is paused, over or not started
    pub keep_scheduling: bool,
    /// At most one `LinesRemoved` and one `GameOver`
    pub events: ArrayVec<GameEvent, 2>,
    /// New interval if the speed ramp re-armed the timer
    pub interval_ms: Option<u32>,
}

impl TickOutcome {
    fn stop() -> Self {
        Self {
            keep_scheduling: false,
            events: ArrayVec::new(),
            interval_ms: None,
        }
    }
}

pub struct GameLoop<R, S = (), D = ()> {
    config: GameConfig,
    board: Board<R>,
    state: PlayState,
    interval_ms: u32,
    scheduler: S,
    sink: D,
    // Reused between redraws
    snapshot: BoardSnapshot,
}

impl<R, S, D> GameLoop<R, S, D>
where
    R: RandomSource,
    S: TickScheduler,
    D: RedrawSink,
{
    pub fn new(config: GameConfig, rng: R, scheduler: S, sink: D) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.rows, config.columns, rng),
            state: PlayState::NotStarted,
            interval_ms: config.tick_interval_ms,
            config,
            scheduler,
            sink,
            snapshot: BoardSnapshot::default(),
        })
    }

    /// Clear everything and start playing at the base interval
    pub fn new_game(&mut self) {
        self.board.reset();
        self.state = PlayState::Playing;
        self.interval_ms = self.config.tick_interval_ms;
        log::info!(
            "new game on {}x{} board, tick {}ms",
            self.config.rows,
            self.config.columns,
            self.interval_ms
        );
        self.scheduler.start_timer(self.interval_ms);
        self.redraw();
    }

    /// Playing -> Paused; false in any other state
    pub fn pause(&mut self) -> bool {
        if self.state != PlayState::Playing {
            return false;
        }
        self.state = PlayState::Paused;
        log::info!("paused");
        true
    }

    /// Paused -> Playing, re-arming the timer at the current interval
    pub fn resume(&mut self) -> bool {
        if self.state != PlayState::Paused {
            return false;
        }
        self.state = PlayState::Playing;
        log::info!("resumed at {}ms", self.interval_ms);
        self.scheduler.start_timer(self.interval_ms);
        true
    }

    /// One timer firing
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != PlayState::Playing {
            return TickOutcome::stop();
        }

        let step = self.board.step();
        log::trace!("tick: {:?}", step);
        self.redraw();

        let mut outcome = TickOutcome::stop();
        match step {
            StepOutcome::Locked { lines_cleared } if lines_cleared > 0 => {
                outcome.events.push(GameEvent::LinesRemoved {
                    count: lines_cleared,
                });
                outcome.interval_ms = self.apply_speed_ramp();
            }
            StepOutcome::ToppedOut { lines_cleared } => {
                if lines_cleared > 0 {
                    outcome.events.push(GameEvent::LinesRemoved {
                        count: lines_cleared,
                    });
                }
                self.state = PlayState::GameOver;
                outcome.events.push(GameEvent::GameOver);
                log::info!("game over with {} lines", self.board.lines_removed());
            }
            StepOutcome::Over => {
                self.state = PlayState::GameOver;
                outcome.events.push(GameEvent::GameOver);
                log::info!("game over with {} lines", self.board.lines_removed());
            }
            _ => {}
        }

        outcome.keep_scheduling = self.state == PlayState::Playing;
        outcome
    }

    fn apply_speed_ramp(&mut self) -> Option<u32> {
        let next = self
            .config
            .interval_for_lines(self.board.lines_removed())?;
        if next == self.interval_ms {
            return None;
        }
        self.interval_ms = next;
        log::info!(
            "speed up to {}ms after {} lines",
            next,
            self.board.lines_removed()
        );
        self.scheduler.start_timer(next);
        Some(next)
    }

    /// Player command; true if it changed anything
    ///
    /// Movement is ignored unless playing. `Down` drops the piece to the
    /// floor.
    pub fn apply_command(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::Pause => return self.pause(),
            GameCommand::Resume => return self.resume(),
            GameCommand::New => {
                self.new_game();
                return true;
            }
            _ => {}
        }

        if self.state != PlayState::Playing {
            return false;
        }

        let changed = match command {
            GameCommand::Left => self.board.left(),
            GameCommand::Right => self.board.right(),
            GameCommand::Down | GameCommand::Drop => self.board.drop_piece(),
            GameCommand::RotateLeft => self.board.rotate_left(),
            GameCommand::RotateRight => self.board.rotate_right(),
            GameCommand::Pause | GameCommand::Resume | GameCommand::New => false,
        };
        if changed {
            self.redraw();
        }
        changed
    }

    fn redraw(&mut self) {
        self.board.snapshot_into(&mut self.snapshot);
        self.sink.redraw(&self.snapshot);
    }
}

impl<R, S, D> GameLoop<R, S, D> {
    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlayState::Playing | PlayState::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlayState::Paused
    }

    pub fn is_over(&self) -> bool {
        self.state == PlayState::GameOver
    }

    pub fn lines_removed(&self) -> u32 {
        self.board.lines_removed()
    }

    /// Reduction from the base interval currently in effect
    pub fn speed_ms(&self) -> u32 {
        self.config.tick_interval_ms - self.interval_ms
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board<R> {
        &self.board
    }

    /// Mutable board access for scenario setup
    pub fn board_mut(&mut self) -> &mut Board<R> {
        &mut self.board
    }

    /// Last snapshot handed to the redraw sink
    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }
}
