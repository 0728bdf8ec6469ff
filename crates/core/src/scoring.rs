//! Scoring module - line clear points, level curve, gravity curve
//!
//! Points for a clear depend only on how many rows went at once and the level
//! *before* the clear. Level is always recomputed from the cumulative line
//! total, so a clear that skips several levels still lands on the right one.

use crate::types::{
    GameConfig, LINES_PER_LEVEL, POINTS_DOUBLE, POINTS_SINGLE, POINTS_TETRIS, POINTS_TRIPLE,
};

/// Points for clearing `lines` rows at once at `level`.
///
/// 1→100, 2→300, 3→500, 4→800, 5+→`lines × 100`, all multiplied by level.
/// Five or more rows cannot happen with four-block pieces; the fallback keeps
/// the function total.
pub fn calculate_points(lines: usize, level: u32) -> u32 {
    let base = match lines {
        0 => 0,
        1 => POINTS_SINGLE,
        2 => POINTS_DOUBLE,
        3 => POINTS_TRIPLE,
        4 => POINTS_TETRIS,
        n => (n as u32).saturating_mul(POINTS_SINGLE),
    };
    base.saturating_mul(level)
}

/// Level for a cumulative line total with the default lines-per-level (starts at 1)
pub fn calculate_level(total_lines: u32) -> u32 {
    calculate_level_with(total_lines, LINES_PER_LEVEL)
}

/// Level for a cumulative line total: `total / lines_per_level + 1`
pub fn calculate_level_with(total_lines: u32, lines_per_level: u32) -> u32 {
    debug_assert!(lines_per_level > 0);
    total_lines / lines_per_level.max(1) + 1
}

/// Lines still needed to reach the next level
pub fn lines_to_next_level(total_lines: u32, lines_per_level: u32) -> u32 {
    let level = calculate_level_with(total_lines, lines_per_level);
    level * lines_per_level - total_lines
}

/// Display name for a clear of `lines` rows
pub fn line_clear_name(lines: usize) -> String {
    match lines {
        1 => "Single".to_string(),
        2 => "Double".to_string(),
        3 => "Triple".to_string(),
        4 => "Tetris".to_string(),
        n => format!("{n} Lines"),
    }
}

/// Gravity interval for a level:
/// `max(min_interval, initial_interval - (level - 1) * reduction_per_level)`
pub fn drop_interval_ms(level: u32, config: &GameConfig) -> u64 {
    let reduction =
        u64::from(level.saturating_sub(1)).saturating_mul(config.drop_speed_reduction_per_level);
    config
        .initial_drop_interval_ms
        .saturating_sub(reduction)
        .max(config.min_drop_interval_ms)
}
