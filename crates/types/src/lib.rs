//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the simulation core.
//! All types are plain data with no behaviour beyond parsing and small helpers,
//! making them usable in any context (core logic, engine, renderer bridges).
//!
//! # Grid Dimensions
//!
//! The default well is narrow and tall:
//!
//! - **Columns**: 8 (indexed 0-7, left to right)
//! - **Rows**: 24 (indexed 0-23, **bottom to top**)
//! - **Visible rows**: 16, the remaining rows are headroom for the descent mechanic
//! - **Spawn position**: column 3, row 20
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_DROP_INTERVAL_MS` | 1000 | Gravity at level 1 |
//! | `MIN_DROP_INTERVAL_MS` | 150 | Gravity floor |
//! | `DROP_SPEED_REDUCTION_PER_LEVEL` | 80 | Interval shaved off per level |
//! | `LINE_DESTRUCTION_DURATION_MS` | 300 | Line clear animation window |
//!
//! The descent offset advances by `DESCENT_SPEED` world units per millisecond.
//!
//! # Examples
//!
//! ```
//! use brickwell_types::{InputEvent, PieceKind, GRID_COLUMNS, GRID_ROWS};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.width(), 3);
//!
//! let input = InputEvent::from_str("hardDrop").unwrap();
//! assert_eq!(input, InputEvent::HardDrop);
//!
//! assert_eq!(GRID_COLUMNS, 8);
//! assert_eq!(GRID_ROWS, 24);
//! ```

use serde::{Deserialize, Serialize};

pub mod config;

pub use config::{ConfigError, GameConfig, MAX_GRID_CELLS};

/// Grid width in cells (8 columns)
pub const GRID_COLUMNS: i32 = 8;

/// Total grid height in cells, including headroom above the visible window
pub const GRID_ROWS: i32 = 24;

/// Rows visible at the start of a game
pub const VISIBLE_ROWS: i32 = 16;

/// Height of one brick in world units (drives the descent-to-row conversion)
pub const BRICK_HEIGHT: f32 = 0.48;

/// Gravity interval at level 1
pub const INITIAL_DROP_INTERVAL_MS: u64 = 1000;

/// Fastest gravity interval regardless of level
pub const MIN_DROP_INTERVAL_MS: u64 = 150;

/// Gravity interval reduction applied per level above 1
pub const DROP_SPEED_REDUCTION_PER_LEVEL: u64 = 80;

/// Descent (camera) speed in world units per millisecond
pub const DESCENT_SPEED: f32 = 0.003;

/// Duration of the line destruction animation window
pub const LINE_DESTRUCTION_DURATION_MS: u64 = 300;

/// Points for a single line at level 1
pub const POINTS_SINGLE: u32 = 100;

/// Points for two lines at level 1
pub const POINTS_DOUBLE: u32 = 300;

/// Points for three lines at level 1
pub const POINTS_TRIPLE: u32 = 500;

/// Points for four lines at level 1
pub const POINTS_TETRIS: u32 = 800;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Spawn column for new pieces
pub const SPAWN_COLUMN: i32 = (GRID_COLUMNS - 2) / 2;

/// Spawn row for new pieces (origin row, blocks extend upward from here)
pub const SPAWN_ROW: i32 = GRID_ROWS - 4;

/// Game-over margin: the stack may not come within this many rows of the visible top
pub const GAME_OVER_MARGIN_ROWS: i32 = 2;

/// A single cell position, either an offset within a piece or an absolute grid cell.
///
/// `col` grows to the right, `row` grows upward (row 0 is the floor row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Block {
    pub col: i32,
    pub row: i32,
}

impl Block {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Block shifted by the given column/row delta
    pub const fn offset(self, d_col: i32, d_row: i32) -> Self {
        Self {
            col: self.col + d_col,
            row: self.row + d_row,
        }
    }
}

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in declaration order (used by uniform draws)
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use brickwell_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Width of the spawn orientation in blocks
    pub fn width(&self) -> i32 {
        match self {
            PieceKind::I => 4,
            PieceKind::O => 2,
            _ => 3,
        }
    }

    /// Height of the spawn orientation in blocks
    pub fn height(&self) -> i32 {
        match self {
            PieceKind::I => 1,
            _ => 2,
        }
    }
}

/// Coarse game lifecycle state
///
/// `Ready → Playing ⇄ Paused`, `Playing → GameOver`. Only `start` leaves `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Game not yet started
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Paused by the player
    Paused,
    /// Bricks reached the top, or a spawn was blocked
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Discrete, already-debounced player inputs
///
/// Gesture and key interpretation happens upstream; the engine only sees these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece 90° clockwise (with wall kicks)
    Rotate,
    /// Force one gravity step
    SoftDrop,
    /// Drop to the lowest legal row and lock
    HardDrop,
    /// Playing → Paused
    Pause,
    /// Paused → Playing
    Resume,
}

impl InputEvent {
    /// Parse input from string (case-insensitive, camelCase accepted)
    ///
    /// # Examples
    ///
    /// ```
    /// use brickwell_types::InputEvent;
    ///
    /// assert_eq!(InputEvent::from_str("moveLeft"), Some(InputEvent::MoveLeft));
    /// assert_eq!(InputEvent::from_str("ROTATE"), Some(InputEvent::Rotate));
    /// assert_eq!(InputEvent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(InputEvent::MoveLeft),
            "moveright" => Some(InputEvent::MoveRight),
            "rotate" => Some(InputEvent::Rotate),
            "softdrop" => Some(InputEvent::SoftDrop),
            "harddrop" => Some(InputEvent::HardDrop),
            "pause" => Some(InputEvent::Pause),
            "resume" => Some(InputEvent::Resume),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            InputEvent::MoveLeft => "moveLeft",
            InputEvent::MoveRight => "moveRight",
            InputEvent::Rotate => "rotate",
            InputEvent::SoftDrop => "softDrop",
            InputEvent::HardDrop => "hardDrop",
            InputEvent::Pause => "pause",
            InputEvent::Resume => "resume",
        }
    }
}

/// Notifications raised by the engine while it mutates state.
///
/// Delivered synchronously, in listener registration order, from inside the
/// call that caused them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    PieceMoved,
    PieceRotated,
    SoftDropped,
    HardDropped,
    PieceLocked,
    /// Rows removed by the lock, ascending
    LinesCleared { rows: Vec<i32> },
    LevelUp { level: u32 },
    GameOver { final_score: u32 },
}

impl GameEvent {
    /// Stable name for logs and analytics keys
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::GameStarted => "gameStarted",
            GameEvent::PieceMoved => "pieceMoved",
            GameEvent::PieceRotated => "pieceRotated",
            GameEvent::SoftDropped => "softDropped",
            GameEvent::HardDropped => "hardDropped",
            GameEvent::PieceLocked => "pieceLocked",
            GameEvent::LinesCleared { .. } => "linesCleared",
            GameEvent::LevelUp { .. } => "levelUp",
            GameEvent::GameOver { .. } => "gameOver",
        }
    }
}
