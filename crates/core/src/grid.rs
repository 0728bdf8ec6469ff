//! Grid module - the occupancy store for locked bricks
//!
//! The grid is `columns x rows` boolean cells stored in a flat, row-major
//! vector. Coordinates are `(col, row)` with `col` growing
//! to the right and `row` growing **upward**: row 0 is the floor row.
//!
//! Out-of-range queries follow the well's physical shape: the side walls and
//! the floor are solid, while everything above the top row is open sky.

use std::fmt;

use crate::pieces::Piece;
use crate::types::{Block, GameConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: i32,
    rows: i32,
    /// Flat array of cells, row-major order (row * columns + col)
    cells: Vec<bool>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(columns: i32, rows: i32) -> Self {
        debug_assert!(columns > 0 && rows > 0, "grid dimensions must be positive");
        Self {
            columns,
            rows,
            cells: vec![false; (columns * rows) as usize],
        }
    }

    /// Create an empty grid sized by the config
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.columns, config.total_rows)
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || col >= self.columns || row < 0 || row >= self.rows {
            return None;
        }
        Some((row * self.columns + col) as usize)
    }

    #[inline(always)]
    fn row_range(&self, row: i32) -> std::ops::Range<usize> {
        let start = (row * self.columns) as usize;
        start..start + self.columns as usize
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Check if a cell is occupied.
    ///
    /// Walls (`col` outside `[0, columns)`) and the floor (`row < 0`) are
    /// always occupied; cells at or above `rows` are always empty.
    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        if col < 0 || col >= self.columns || row < 0 {
            return true;
        }
        if row >= self.rows {
            return false;
        }
        self.cells[(row * self.columns + col) as usize]
    }

    pub fn is_empty(&self, col: i32, row: i32) -> bool {
        !self.is_occupied(col, row)
    }

    /// Check if every column of a row is occupied (false for out-of-range rows)
    pub fn is_row_complete(&self, row: i32) -> bool {
        if row < 0 || row >= self.rows {
            return false;
        }
        self.cells[self.row_range(row)].iter().all(|&c| c)
    }

    /// Check if a row has no occupied cells (true for out-of-range rows)
    pub fn is_row_empty(&self, row: i32) -> bool {
        if row < 0 || row >= self.rows {
            return true;
        }
        !self.cells[self.row_range(row)].iter().any(|&c| c)
    }

    /// Set a cell's occupied state.
    /// Returns false (and writes nothing) if the cell is out of bounds.
    pub fn set_cell(&mut self, col: i32, row: i32, occupied: bool) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = occupied;
                true
            }
            None => false,
        }
    }

    /// Write every block of `piece` at origin `(col, row)` into the grid.
    ///
    /// Blocks above the top row are dropped silently (they are in open sky);
    /// callers check placement with the collision oracle first.
    pub fn lock(&mut self, piece: &Piece, col: i32, row: i32) {
        for block in piece.cells_at(col, row) {
            self.set_cell(block.col, block.row, true);
        }
    }

    /// Remove a row and shift every row above it down by one.
    /// The top row becomes empty. Passing an out-of-range row is a caller bug;
    /// release builds ignore it.
    pub fn clear_row(&mut self, row: i32) {
        debug_assert!(
            (0..self.rows).contains(&row),
            "clear_row({row}) outside grid of {} rows",
            self.rows
        );
        if row < 0 || row >= self.rows {
            return;
        }

        let width = self.columns as usize;
        let start = self.row_range(row).start;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(start + width.., start);

        let top = self.row_range(self.rows - 1);
        self.cells[top].fill(false);
    }

    /// Topmost row containing any occupied cell, or `None` for an empty grid
    pub fn highest_occupied_row(&self) -> Option<i32> {
        (0..self.rows).rev().find(|&row| !self.is_row_empty(row))
    }

    /// All occupied cells, bottom row first, left to right within a row
    pub fn occupied_cells(&self) -> Vec<Block> {
        let columns = self.columns as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &occupied)| occupied)
            .map(|(idx, _)| Block::new((idx % columns) as i32, (idx / columns) as i32))
            .collect()
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Empty the whole grid
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Build a grid from text rows, **top row first**; `#` is occupied, anything else empty.
    ///
    /// Rows shorter than the grid width are padded with empty cells. Used by tests
    /// and the headless runner to stage positions.
    pub fn from_rows(columns: i32, rows: i32, text_top_first: &[&str]) -> Self {
        let mut grid = Self::new(columns, rows);
        let count = text_top_first.len() as i32;
        for (i, line) in text_top_first.iter().enumerate() {
            let row = count - 1 - i as i32;
            for (col, ch) in line.chars().enumerate() {
                if ch == '#' {
                    grid.set_cell(col as i32, row, true);
                }
            }
        }
        grid
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            write!(f, "|")?;
            for col in 0..self.columns {
                let ch = if self.is_occupied(col, row) { '█' } else { ' ' };
                write!(f, "{ch}")?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "+{}+", "-".repeat(self.columns as usize))
    }
}
