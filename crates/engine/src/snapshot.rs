//! Per-frame snapshot - everything a renderer needs, as owned values
//!
//! Block positions are grid coordinates (column, row with row 0 at the
//! bottom). Mapping them onto a display surface is the renderer's job.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::{Block, PieceKind, Phase};

/// Four blocks of a single piece
pub type PieceBlocks = ArrayVec<Block, 4>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Locked cells, bottom row first
    pub grid_blocks: Vec<Block>,
    /// Active piece cells (empty outside a game)
    pub active_blocks: PieceBlocks,
    /// Landing projection; empty when the active piece is already resting
    pub ghost_blocks: PieceBlocks,
    /// Next piece offsets relative to its own origin
    pub next_blocks: PieceBlocks,
    pub active_kind: Option<PieceKind>,
    pub next_kind: Option<PieceKind>,
    /// Descent offset in world units
    pub camera_offset: f32,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    /// Descent offset over the full grid height, clamped to `0.0..=1.0`
    pub descent_progress: f32,
    pub phase: Phase,
    /// Rows removed by the most recent clear, while its animation window is open
    pub lines_to_destroy: Vec<i32>,
}

impl Snapshot {
    /// The snapshot of an engine that has not started yet
    pub fn ready() -> Self {
        Self {
            grid_blocks: Vec::new(),
            active_blocks: ArrayVec::new(),
            ghost_blocks: ArrayVec::new(),
            next_blocks: ArrayVec::new(),
            active_kind: None,
            next_kind: None,
            camera_offset: 0.0,
            score: 0,
            level: 1,
            lines_cleared: 0,
            descent_progress: 0.0,
            phase: Phase::Ready,
            lines_to_destroy: Vec::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn has_lines_to_destroy(&self) -> bool {
        !self.lines_to_destroy.is_empty()
    }

    pub fn has_ghost(&self) -> bool {
        !self.ghost_blocks.is_empty()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::ready()
    }
}
