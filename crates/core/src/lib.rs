//! Core game logic - pure, deterministic, and testable
//!
//! Everything the falling-block game needs to play, with no rendering, input
//! or timer code. Hosts plug in through two traits and read the board back as
//! snapshots:
//!
//! - **Deterministic**: a seeded [`SimpleRng`] replays the same piece sequence
//! - **Headless**: the timer is a [`TickScheduler`], drawing is a [`RedrawSink`]
//! - **Total**: moves and rotations return `false` when rejected; nothing panics
//!
//! # Module Structure
//!
//! - [`shapes`]: rotation masks and the static table of the seven kinds
//! - [`grid`]: settled cells; out of bounds reads as filled
//! - [`piece`]: the falling piece and its move/rotate rules (no wall kicks)
//! - [`board`]: lock-in, line clearing and spawning
//! - [`rng`]: random sources for the next piece kind
//! - [`game_loop`]: tick cadence, speed ramp and pause/resume
//! - [`geometry`]: pixel layout of cells in a client area
//! - [`config`]: [`GameConfig`] with environment overrides
//! - [`snapshot`]: read-only board pictures for redraws
//!
//! # Example
//!
//! ```
//! use wahoo_core::{GameConfig, GameLoop, SimpleRng};
//! use wahoo_core::types::{GameCommand, PlayState};
//!
//! let mut game = GameLoop::new(GameConfig::default(), SimpleRng::new(12345), (), ())
//!     .expect("default config is valid");
//! game.new_game();
//!
//! game.apply_command(GameCommand::RotateRight);
//! game.apply_command(GameCommand::Down);
//! let outcome = game.tick();
//!
//! assert!(outcome.keep_scheduling);
//! assert_eq!(game.state(), PlayState::Playing);
//! assert_eq!(game.board().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! The core never sleeps. A driver arms a timer when asked through
//! [`TickScheduler::start_timer`] and calls [`GameLoop::tick`] on every
//! firing until a tick returns `keep_scheduling == false`.

pub mod board;
pub mod config;
pub mod game_loop;
pub mod geometry;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use wahoo_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, StepOutcome};
pub use config::{ConfigError, GameConfig};
pub use game_loop::{GameLoop, RedrawSink, TickOutcome, TickScheduler};
pub use geometry::{board_rect, cell_rect, Rect, Size};
pub use grid::Grid;
pub use piece::Piece;
pub use rng::{RandomSource, SequenceRandom, SimpleRng, ThreadRandom};
pub use shapes::{MaskError, RotationState, ShapeDef, SHAPES};
pub use snapshot::{ActiveSnapshot, BoardSnapshot};
