//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data shared by the engine, the tick driver and
//! whatever host renders the game. Nothing in here knows about the grid or the
//! timer; it is only names, colors and defaults.
//!
//! # Board Dimensions
//!
//! - **Rows**: 20 by default (indexed 0-19, top to bottom)
//! - **Columns**: 10 by default (indexed 0-9, left to right)
//! - **Padding**: 2 pixels around each cell when laying out the board
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_INTERVAL_MS` | 500 | Base interval between ticks |
//! | `SPEED_STEP_MS` | 100 | Interval reduction per speed step |
//! | `LINES_PER_SPEED_STEP` | 10 | Lines needed for one speed step |
//!
//! # Examples
//!
//! ```
//! use wahoo_types::{Color, GameCommand, ShapeKind, DEFAULT_COLUMNS, DEFAULT_ROWS};
//!
//! let kind = ShapeKind::from_str("line").unwrap();
//! assert_eq!(kind, ShapeKind::Line);
//! assert_eq!(kind.color(), Color::Purple);
//!
//! assert_eq!(GameCommand::from_str("rotateRight"), Some(GameCommand::RotateRight));
//!
//! assert_eq!(DEFAULT_ROWS, 20);
//! assert_eq!(DEFAULT_COLUMNS, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of board rows
pub const DEFAULT_ROWS: usize = 20;

/// Default number of board columns
pub const DEFAULT_COLUMNS: usize = 10;

/// Default padding in pixels around each cell
pub const DEFAULT_PADDING: i32 = 2;

/// Base tick interval before any speed-up (500ms per row)
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 500;

/// Interval reduction applied per speed step
pub const SPEED_STEP_MS: u32 = 100;

/// Cumulative lines required for each speed step
pub const LINES_PER_SPEED_STEP: u32 = 10;


/// The seven piece kinds
///
/// The declaration order is the order the random generator indexes into,
/// so `ShapeKind::ALL[n]` is the kind drawn for outcome `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// T-shaped, red
    T,
    /// S-shaped, green
    Crook1,
    /// Z-shaped, navy
    Crook2,
    /// J-shaped, blue
    L1,
    /// L-shaped, aqua
    L2,
    /// Straight bar, purple
    Line,
    /// 2x2 square, lime
    Box,
}

impl ShapeKind {
    /// All kinds in generator order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::T,
        ShapeKind::Crook1,
        ShapeKind::Crook2,
        ShapeKind::L1,
        ShapeKind::L2,
        ShapeKind::Line,
        ShapeKind::Box,
    ];

    /// Position of this kind in [`ShapeKind::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Fill color used for this kind on the board
    pub const fn color(self) -> Color {
        match self {
            ShapeKind::T => Color::Red,
            ShapeKind::Crook1 => Color::Green,
            ShapeKind::Crook2 => Color::Navy,
            ShapeKind::L1 => Color::Blue,
            ShapeKind::L2 => Color::Aqua,
            ShapeKind::Line => Color::Purple,
            ShapeKind::Box => Color::Lime,
        }
    }

    /// Parse a kind from its name or its conventional letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use wahoo_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("crook1"), Some(ShapeKind::Crook1));
    /// assert_eq!(ShapeKind::from_str("S"), Some(ShapeKind::Crook1));
    /// assert_eq!(ShapeKind::from_str("box"), Some(ShapeKind::Box));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(ShapeKind::T),
            "crook1" | "s" => Some(ShapeKind::Crook1),
            "crook2" | "z" => Some(ShapeKind::Crook2),
            "l1" | "j" => Some(ShapeKind::L1),
            "l2" | "l" => Some(ShapeKind::L2),
            "line" | "i" => Some(ShapeKind::Line),
            "box" | "o" => Some(ShapeKind::Box),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::T => "t",
            ShapeKind::Crook1 => "crook1",
            ShapeKind::Crook2 => "crook2",
            ShapeKind::L1 => "l1",
            ShapeKind::L2 => "l2",
            ShapeKind::Line => "line",
            ShapeKind::Box => "box",
        }
    }
}

/// Fill colors, one per piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Green,
    Navy,
    Blue,
    Aqua,
    Purple,
    Lime,
}

impl Color {
    /// RGB triple for hosts that paint cells directly
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Red => (0xff, 0x00, 0x00),
            Color::Green => (0x00, 0x80, 0x00),
            Color::Navy => (0x00, 0x00, 0x80),
            Color::Blue => (0x00, 0x00, 0xff),
            Color::Aqua => (0x00, 0xff, 0xff),
            Color::Purple => (0x80, 0x00, 0x80),
            Color::Lime => (0x00, 0xff, 0x00),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Navy => "navy",
            Color::Blue => "blue",
            Color::Aqua => "aqua",
            Color::Purple => "purple",
            Color::Lime => "lime",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Settled cell left behind by a locked piece
pub type Cell = Option<Color>;

/// Commands a host can send to a running game
///
/// Movement commands only take effect while the game is playing; lifecycle
/// commands (`Pause`, `Resume`, `New`) drive the play state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameCommand {
    /// Move piece one column left
    Left,
    /// Move piece one column right
    Right,
    /// Down key; drops the piece like `Drop`
    Down,
    /// Move piece down until it rests on something
    Drop,
    /// Rotate to the previous rotation state
    RotateLeft,
    /// Rotate to the next rotation state
    RotateRight,
    Pause,
    Resume,
    /// Start a fresh game
    New,
}

impl GameCommand {
    pub const ALL: [GameCommand; 9] = [
        GameCommand::Left,
        GameCommand::Right,
        GameCommand::Down,
        GameCommand::Drop,
        GameCommand::RotateLeft,
        GameCommand::RotateRight,
        GameCommand::Pause,
        GameCommand::Resume,
        GameCommand::New,
    ];

    /// Parse a command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use wahoo_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("left"), Some(GameCommand::Left));
    /// assert_eq!(GameCommand::from_str("rotateLeft"), Some(GameCommand::RotateLeft));
    /// assert_eq!(GameCommand::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(GameCommand::Left),
            "right" => Some(GameCommand::Right),
            "down" => Some(GameCommand::Down),
            "drop" => Some(GameCommand::Drop),
            "rotateleft" => Some(GameCommand::RotateLeft),
            "rotateright" => Some(GameCommand::RotateRight),
            "pause" => Some(GameCommand::Pause),
            "resume" => Some(GameCommand::Resume),
            "new" => Some(GameCommand::New),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::Left => "left",
            GameCommand::Right => "right",
            GameCommand::Down => "down",
            GameCommand::Drop => "drop",
            GameCommand::RotateLeft => "rotateLeft",
            GameCommand::RotateRight => "rotateRight",
            GameCommand::Pause => "pause",
            GameCommand::Resume => "resume",
            GameCommand::New => "new",
        }
    }

    /// Whether this command moves or rotates the active piece
    pub fn is_movement(&self) -> bool {
        !matches!(
            self,
            GameCommand::Pause | GameCommand::Resume | GameCommand::New
        )
    }
}

/// Play state of a game loop
///
/// `NotStarted -> Playing <-> Paused`, and `Playing -> GameOver` which is
/// terminal until the next new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    #[default]
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

/// Notification produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Lines cleared during this tick (always positive)
    LinesRemoved { count: u32 },
    /// Fired once when the game enters `GameOver`
    GameOver,
}
