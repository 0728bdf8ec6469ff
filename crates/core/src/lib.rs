//! Core game logic - pure, deterministic, and testable
//!
//! The building blocks the engine is assembled from. Nothing here knows about
//! time, phases, or listeners:
//!
//! - [`grid`]: fixed-size occupancy store with wall/floor/sky semantics
//! - [`pieces`]: tetromino shapes and mean-center clockwise rotation
//! - [`collision`]: can a piece occupy a position?
//! - [`lines`]: complete-row detection and top-down clearing
//! - [`scoring`]: points per clear, level curve, gravity curve
//! - [`rng`]: seeded piece sources
//!
//! # Coordinates
//!
//! Row 0 is the bottom of the grid and rows grow upward. Cells left of column
//! 0, right of the last column, or below row 0 are solid. Cells at or above the
//! top row are open sky, so a freshly spawned piece may poke out of the grid.
//!
//! # Example
//!
//! ```
//! use brickwell_core::{can_place, clear_lines, find_complete_lines, Grid, Piece};
//! use brickwell_core::types::PieceKind;
//!
//! let mut grid = Grid::new(8, 24);
//! for col in 0..4 {
//!     grid.set_cell(col, 0, true);
//! }
//!
//! // An I piece fills the rest of the bottom row
//! let piece = Piece::new(PieceKind::I);
//! assert!(can_place(&grid, &piece, 4, 0));
//! grid.lock(&piece, 4, 0);
//!
//! let rows = find_complete_lines(&grid);
//! assert_eq!(rows, vec![0]);
//! clear_lines(&mut grid, &rows);
//! assert!(grid.is_row_empty(0));
//! ```

pub mod collision;
pub mod grid;
pub mod lines;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use brickwell_types as types;

// Re-export commonly used items for convenience
pub use collision::{can_place, find_drop_row};
pub use grid::Grid;
pub use lines::{clear_lines, find_complete_lines};
pub use pieces::{base_blocks, rotate_clockwise, Piece, PieceShape};
pub use rng::{PieceSource, RandomPieces, ScriptedPieces, SimpleRng};
pub use scoring::{calculate_level, calculate_points, drop_interval_ms};
