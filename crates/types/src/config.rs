//! Engine tuning values gathered into one value.
//!
//! `GameConfig::default()` reproduces the crate-level constants. Hosts that
//! tune the game build their own value and must pass it through
//! [`GameConfig::validate`] (the engine constructor does this for them).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    BRICK_HEIGHT, DESCENT_SPEED, DROP_SPEED_REDUCTION_PER_LEVEL, GRID_COLUMNS, GRID_ROWS,
    INITIAL_DROP_INTERVAL_MS, LINES_PER_LEVEL, LINE_DESTRUCTION_DURATION_MS, MIN_DROP_INTERVAL_MS,
    SPAWN_COLUMN, SPAWN_ROW, VISIBLE_ROWS,
};

/// Missing fields fall back to their defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub columns: i32,
    pub total_rows: i32,
    pub visible_rows: i32,
    pub brick_height: f32,
    pub initial_drop_interval_ms: u64,
    pub min_drop_interval_ms: u64,
    pub drop_speed_reduction_per_level: u64,
    pub descent_speed: f32,
    pub line_destruction_duration_ms: u64,
    pub lines_per_level: u32,
    pub spawn_column: i32,
    pub spawn_row: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: GRID_COLUMNS,
            total_rows: GRID_ROWS,
            visible_rows: VISIBLE_ROWS,
            brick_height: BRICK_HEIGHT,
            initial_drop_interval_ms: INITIAL_DROP_INTERVAL_MS,
            min_drop_interval_ms: MIN_DROP_INTERVAL_MS,
            drop_speed_reduction_per_level: DROP_SPEED_REDUCTION_PER_LEVEL,
            descent_speed: DESCENT_SPEED,
            line_destruction_duration_ms: LINE_DESTRUCTION_DURATION_MS,
            lines_per_level: LINES_PER_LEVEL,
            spawn_column: SPAWN_COLUMN,
            spawn_row: SPAWN_ROW,
        }
    }
}

/// Upper bound on `columns * total_rows`
pub const MAX_GRID_CELLS: i32 = 1 << 20;

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have at least 4 columns, got {0}")]
    TooFewColumns(i32),
    #[error("grid must have at least 4 rows, got {0}")]
    TooFewRows(i32),
    #[error("grid of {columns}x{rows} cells exceeds the limit of {MAX_GRID_CELLS}")]
    GridTooLarge { columns: i32, rows: i32 },
    #[error("visible rows ({visible}) must be between 1 and total rows ({total})")]
    VisibleRows { visible: i32, total: i32 },
    #[error("spawn position ({col}, {row}) must leave room for a 4x2 piece inside the grid")]
    SpawnOutsideGrid { col: i32, row: i32 },
    #[error("brick height must be positive and finite, got {0}")]
    BrickHeight(f32),
    #[error("descent speed must be non-negative and finite, got {0}")]
    DescentSpeed(f32),
    #[error("lines per level must be positive")]
    LinesPerLevel,
    #[error("minimum drop interval must be positive")]
    ZeroDropInterval,
    #[error("minimum drop interval ({min} ms) exceeds initial interval ({initial} ms)")]
    DropInterval { min: u64, initial: u64 },
}

impl GameConfig {
    /// Check every value the engine relies on.
    ///
    /// # Examples
    ///
    /// ```
    /// use brickwell_types::{ConfigError, GameConfig};
    ///
    /// assert!(GameConfig::default().validate().is_ok());
    ///
    /// let config = GameConfig { lines_per_level: 0, ..GameConfig::default() };
    /// assert_eq!(config.validate(), Err(ConfigError::LinesPerLevel));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns < 4 {
            return Err(ConfigError::TooFewColumns(self.columns));
        }
        if self.total_rows < 4 {
            return Err(ConfigError::TooFewRows(self.total_rows));
        }
        let cells = self.columns.checked_mul(self.total_rows);
        if !matches!(cells, Some(n) if n <= MAX_GRID_CELLS) {
            return Err(ConfigError::GridTooLarge {
                columns: self.columns,
                rows: self.total_rows,
            });
        }
        if self.visible_rows < 1 || self.visible_rows > self.total_rows {
            return Err(ConfigError::VisibleRows {
                visible: self.visible_rows,
                total: self.total_rows,
            });
        }
        // Widest piece is 4 columns, tallest spawn orientation is 2 rows.
        let fits_cols = self.spawn_column >= 0
            && matches!(self.spawn_column.checked_add(4), Some(end) if end <= self.columns);
        let fits_rows = self.spawn_row >= 0
            && matches!(self.spawn_row.checked_add(2), Some(end) if end <= self.total_rows);
        if !fits_cols || !fits_rows {
            return Err(ConfigError::SpawnOutsideGrid {
                col: self.spawn_column,
                row: self.spawn_row,
            });
        }
        if !(self.brick_height.is_finite() && self.brick_height > 0.0) {
            return Err(ConfigError::BrickHeight(self.brick_height));
        }
        if !(self.descent_speed.is_finite() && self.descent_speed >= 0.0) {
            return Err(ConfigError::DescentSpeed(self.descent_speed));
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::LinesPerLevel);
        }
        if self.min_drop_interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        if self.min_drop_interval_ms > self.initial_drop_interval_ms {
            return Err(ConfigError::DropInterval {
                min: self.min_drop_interval_ms,
                initial: self.initial_drop_interval_ms,
            });
        }
        Ok(())
    }

    /// Height of the whole grid in world units
    pub fn max_descent(&self) -> f32 {
        self.total_rows as f32 * self.brick_height
    }
}
