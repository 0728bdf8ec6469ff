//! Pieces module - tetromino shapes and mean-center rotation
//!
//! Each shape is four `(col, row)` block offsets from the piece origin, with
//! rows growing upward. Rotation is computed geometrically rather than read
//! from a table: blocks turn 90° clockwise about their arithmetic-mean center,
//! snap back onto the lattice, and are shifted so the smallest column and row
//! are both zero.
//!
//! Rotation only produces a *candidate*. Wall kicks and placement checks live
//! in the engine, which consults the collision oracle before committing.

use crate::types::{Block, PieceKind};

/// Shape of a piece - 4 block offsets from the piece origin
pub type PieceShape = [Block; 4];

const fn b(col: i32, row: i32) -> Block {
    Block::new(col, row)
}

/// Spawn-orientation block offsets for a piece kind
pub fn base_blocks(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::I => [b(0, 0), b(1, 0), b(2, 0), b(3, 0)],
        PieceKind::O => [b(0, 0), b(1, 0), b(0, 1), b(1, 1)],
        PieceKind::T => [b(0, 0), b(1, 0), b(2, 0), b(1, 1)],
        PieceKind::S => [b(1, 0), b(2, 0), b(0, 1), b(1, 1)],
        PieceKind::Z => [b(0, 0), b(1, 0), b(1, 1), b(2, 1)],
        PieceKind::J => [b(0, 0), b(0, 1), b(1, 1), b(2, 1)],
        PieceKind::L => [b(2, 0), b(0, 1), b(1, 1), b(2, 1)],
    }
}

/// Rotate a block set 90° clockwise about its mean center.
///
/// `(x, y) -> (y, -x)` relative to the center, rounded half up, then
/// normalized so the minimum column and minimum row are zero. Rounding half
/// up matters: the center of an even-width shape sits on a half cell, and
/// any other tie rule tears the I, S, Z and J shapes apart.
pub fn rotate_clockwise(blocks: &PieceShape) -> PieceShape {
    let n = blocks.len() as f64;
    let center_col = blocks.iter().map(|b| b.col as f64).sum::<f64>() / n;
    let center_row = blocks.iter().map(|b| b.row as f64).sum::<f64>() / n;

    let rotated = blocks.map(|block| {
        let rel_col = block.col as f64 - center_col;
        let rel_row = block.row as f64 - center_row;
        Block::new(
            round_half_up(center_col + rel_row),
            round_half_up(center_row - rel_col),
        )
    });

    normalize(rotated)
}

#[inline]
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Shift blocks so the minimum column and minimum row are both zero
pub fn normalize(blocks: PieceShape) -> PieceShape {
    let min_col = blocks.iter().map(|b| b.col).min().unwrap_or(0);
    let min_row = blocks.iter().map(|b| b.row).min().unwrap_or(0);
    blocks.map(|b| b.offset(-min_col, -min_row))
}

/// A piece value: kind, current block offsets, and rotation counter (0-3).
///
/// Pieces are plain values. Rotating returns a new piece; the engine commits a
/// rotation by replacing its active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    blocks: PieceShape,
    rotation: u8,
}

impl Piece {
    /// Create a piece in its spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            blocks: base_blocks(kind),
            rotation: 0,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Block offsets relative to the piece origin
    pub fn blocks(&self) -> &PieceShape {
        &self.blocks
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// The clockwise-rotated candidate.
    ///
    /// The O piece keeps its blocks unchanged; its rotation counter still advances.
    pub fn rotated(&self) -> Self {
        let blocks = match self.kind {
            PieceKind::O => self.blocks,
            _ => rotate_clockwise(&self.blocks),
        };
        Self {
            kind: self.kind,
            blocks,
            rotation: (self.rotation + 1) % 4,
        }
    }

    /// Absolute grid cells when the origin sits at `(col, row)`
    pub fn cells_at(&self, col: i32, row: i32) -> PieceShape {
        self.blocks.map(|b| b.offset(col, row))
    }

    /// Width of the current orientation in blocks
    pub fn width(&self) -> i32 {
        self.blocks.iter().map(|b| b.col).max().unwrap_or(0) + 1
    }

    /// Height of the current orientation in blocks
    pub fn height(&self) -> i32 {
        self.blocks.iter().map(|b| b.row).max().unwrap_or(0) + 1
    }
}
