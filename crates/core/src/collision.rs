//! Collision oracle - can a piece occupy a position?
//!
//! Pure predicates over a [`Grid`]. Every position or rotation change the
//! engine makes is checked here first.

use crate::grid::Grid;
use crate::pieces::Piece;

/// True if every block of `piece` at origin `(col, row)` lands on an empty cell.
///
/// Walls and floor count as occupied, open sky above the grid does not.
pub fn can_place(grid: &Grid, piece: &Piece, col: i32, row: i32) -> bool {
    piece
        .cells_at(col, row)
        .iter()
        .all(|cell| !grid.is_occupied(cell.col, cell.row))
}

/// Check if the piece would collide one row down
pub fn would_collide_below(grid: &Grid, piece: &Piece, col: i32, row: i32) -> bool {
    !can_place(grid, piece, col, row - 1)
}

/// Check if the piece would collide one column left
pub fn would_collide_left(grid: &Grid, piece: &Piece, col: i32, row: i32) -> bool {
    !can_place(grid, piece, col - 1, row)
}

/// Check if the piece would collide one column right
pub fn would_collide_right(grid: &Grid, piece: &Piece, col: i32, row: i32) -> bool {
    !can_place(grid, piece, col + 1, row)
}

/// Lowest origin row reachable by dropping straight down from `row`.
///
/// Returns `row` itself when the piece cannot descend at all. Used for hard
/// drops and the ghost projection.
pub fn find_drop_row(grid: &Grid, piece: &Piece, col: i32, row: i32) -> i32 {
    let mut target = row;
    while can_place(grid, piece, col, target - 1) {
        target -= 1;
    }
    target
}
