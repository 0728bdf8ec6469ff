//! Line detector - finds complete rows and removes them

use crate::grid::Grid;

/// All complete rows, ascending (bottom first)
pub fn find_complete_lines(grid: &Grid) -> Vec<i32> {
    (0..grid.rows())
        .filter(|&row| grid.is_row_complete(row))
        .collect()
}

/// Remove the given rows from the grid, compacting everything above them.
///
/// Rows are cleared from the top down. Each `clear_row` shifts the rows above
/// it, so clearing a lower row first would move the remaining targets and the
/// wrong rows would be removed.
pub fn clear_lines(grid: &mut Grid, rows: &[i32]) {
    let mut ordered = rows.to_vec();
    ordered.sort_unstable_by(|a, b| b.cmp(a));
    ordered.dedup();
    for row in ordered {
        grid.clear_row(row);
    }
}

/// Number of rows that would clear right now
pub fn count_complete_lines(grid: &Grid) -> usize {
    (0..grid.rows())
        .filter(|&row| grid.is_row_complete(row))
        .count()
}

pub fn is_line_complete(grid: &Grid, row: i32) -> bool {
    grid.is_row_complete(row)
}
