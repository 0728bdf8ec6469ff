//! Game engine - owns all mutable state and drives the phase machine
//!
//! The host calls [`GameEngine::update`] once per frame and
//! [`GameEngine::submit_input`] whenever the player acts. Both are safe in
//! every phase: anything that does not apply to the current phase is a no-op.

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::core::{
    can_place, clear_lines, drop_interval_ms, find_complete_lines, find_drop_row,
    scoring::calculate_level_with, calculate_points, Grid, Piece, PieceSource, RandomPieces,
};
use crate::events::{GameEventListener, ListenerId, Listeners};
use crate::snapshot::Snapshot;
use crate::types::{ConfigError, GameConfig, GameEvent, InputEvent, Phase, GAME_OVER_MARGIN_ROWS};

/// Column offsets tried in order when rotating: in place, left, right
const ROTATION_KICKS: [i32; 3] = [0, -1, 1];

/// The simulation core
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    phase: Phase,
    grid: Grid,
    active: Option<Piece>,
    next: Option<Piece>,
    piece_col: i32,
    piece_row: i32,
    score: u32,
    level: u32,
    lines_cleared: u32,
    descent_offset: f32,
    /// Time of the last gravity step; `None` until the first playing frame
    /// after a start or resume.
    drop_baseline_ms: Option<u64>,
    lines_to_destroy: Vec<i32>,
    destruction_remaining_ms: u64,
    source: Box<dyn PieceSource>,
    listeners: Listeners,
}

impl GameEngine {
    /// Engine with the default configuration and uniformly random pieces
    pub fn new(seed: u32) -> Self {
        Self::build(GameConfig::default(), Box::new(RandomPieces::new(seed)))
    }

    /// Engine with a custom configuration and uniformly random pieces
    pub fn with_config(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_source(config, RandomPieces::new(seed))
    }

    /// Engine drawing its pieces from `source`
    pub fn with_source(
        config: GameConfig,
        source: impl PieceSource + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, Box::new(source)))
    }

    fn build(config: GameConfig, source: Box<dyn PieceSource>) -> Self {
        Self {
            grid: Grid::from_config(&config),
            phase: Phase::Ready,
            active: None,
            next: None,
            piece_col: config.spawn_column,
            piece_row: config.spawn_row,
            score: 0,
            level: 1,
            lines_cleared: 0,
            descent_offset: 0.0,
            drop_baseline_ms: None,
            lines_to_destroy: Vec::new(),
            destruction_remaining_ms: 0,
            source,
            listeners: Listeners::default(),
            config,
        }
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    pub fn add_listener(&mut self, listener: impl GameEventListener + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    /// Returns false if the id was not registered (or already removed)
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn emit(&mut self, event: GameEvent) {
        self.listeners.notify(&event);
    }

    // ------------------------------------------------------------------
    // Getters
    // ------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    /// Origin of the active piece as `(col, row)`
    pub fn active_position(&self) -> (i32, i32) {
        (self.piece_col, self.piece_row)
    }

    pub fn descent_offset(&self) -> f32 {
        self.descent_offset
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Start a new game from any phase, resetting everything.
    pub fn start(&mut self) {
        self.grid = Grid::from_config(&self.config);
        self.active = Some(Piece::new(self.source.next_kind()));
        self.next = Some(Piece::new(self.source.next_kind()));
        self.piece_col = self.config.spawn_column;
        self.piece_row = self.config.spawn_row;
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.descent_offset = 0.0;
        self.drop_baseline_ms = None;
        self.lines_to_destroy.clear();
        self.destruction_remaining_ms = 0;
        self.phase = Phase::Playing;

        info!(
            active = ?self.active.map(|p| p.kind()),
            next = ?self.next.map(|p| p.kind()),
            "game started"
        );
        self.emit(GameEvent::GameStarted);
    }

    /// Advance one frame.
    ///
    /// The line-destruction countdown runs in every phase; descent, the
    /// game-over check and gravity only while playing.
    pub fn update(&mut self, current_time_ms: u64, delta_ms: u64) -> Snapshot {
        self.advance_destruction(delta_ms);

        if self.phase != Phase::Playing {
            return self.snapshot();
        }

        let baseline = *self.drop_baseline_ms.get_or_insert(current_time_ms);

        self.descent_offset += self.config.descent_speed * delta_ms as f32;
        trace!(
            now = current_time_ms,
            delta = delta_ms,
            descent = self.descent_offset,
            "frame"
        );

        if self.bricks_reached_top() {
            self.end_game();
            return self.snapshot();
        }

        let interval = drop_interval_ms(self.level, &self.config);
        if current_time_ms.saturating_sub(baseline) >= interval {
            self.gravity_step();
            self.drop_baseline_ms = Some(current_time_ms);
        }

        self.snapshot()
    }

    fn advance_destruction(&mut self, delta_ms: u64) {
        if self.destruction_remaining_ms == 0 {
            return;
        }
        self.destruction_remaining_ms = self.destruction_remaining_ms.saturating_sub(delta_ms);
        if self.destruction_remaining_ms == 0 {
            trace!(rows = ?self.lines_to_destroy, "destruction window closed");
            self.lines_to_destroy.clear();
        }
    }

    /// Highest brick at or above two rows below the visible top
    fn bricks_reached_top(&self) -> bool {
        let visible_top = ((self.descent_offset / self.config.brick_height) as i32)
            .saturating_add(self.config.visible_rows);
        self.grid
            .highest_occupied_row()
            .is_some_and(|row| row >= visible_top.saturating_sub(GAME_OVER_MARGIN_ROWS))
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        info!(
            score = self.score,
            level = self.level,
            lines = self.lines_cleared,
            "game over"
        );
        self.emit(GameEvent::GameOver {
            final_score: self.score,
        });
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Apply a player input. Inputs that do not fit the phase are ignored.
    pub fn submit_input(&mut self, input: InputEvent) {
        trace!(input = input.as_str(), phase = self.phase.as_str(), "input");
        match input {
            InputEvent::MoveLeft => self.shift(-1),
            InputEvent::MoveRight => self.shift(1),
            InputEvent::Rotate => self.rotate(),
            InputEvent::SoftDrop => self.soft_drop(),
            InputEvent::HardDrop => self.hard_drop(),
            InputEvent::Pause => self.pause(),
            InputEvent::Resume => self.resume(),
        }
    }

    fn shift(&mut self, d_col: i32) {
        if self.phase != Phase::Playing {
            return;
        }
        let Some(piece) = self.active else {
            return;
        };

        if can_place(&self.grid, &piece, self.piece_col + d_col, self.piece_row) {
            self.piece_col += d_col;
            self.emit(GameEvent::PieceMoved);
        }
    }

    fn rotate(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        let Some(piece) = self.active else {
            return;
        };

        let candidate = piece.rotated();
        let kick = ROTATION_KICKS
            .into_iter()
            .find(|&kick| can_place(&self.grid, &candidate, self.piece_col + kick, self.piece_row));

        if let Some(kick) = kick {
            self.active = Some(candidate);
            self.piece_col += kick;
            self.emit(GameEvent::PieceRotated);
        }
    }

    fn soft_drop(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.gravity_step();
        self.emit(GameEvent::SoftDropped);
    }

    fn hard_drop(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        let Some(piece) = self.active else {
            return;
        };

        self.piece_row = find_drop_row(&self.grid, &piece, self.piece_col, self.piece_row);
        self.emit(GameEvent::HardDropped);
        self.lock_piece();
    }

    fn pause(&mut self) {
        if self.phase == Phase::Playing {
            self.phase = Phase::Paused;
            debug!("paused");
        }
    }

    fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Playing;
            // Next drop is measured from the first frame after resuming
            self.drop_baseline_ms = None;
            debug!("resumed");
        }
    }

    // ------------------------------------------------------------------
    // Gravity, locking, spawning
    // ------------------------------------------------------------------

    fn gravity_step(&mut self) {
        let Some(piece) = self.active else {
            return;
        };

        if can_place(&self.grid, &piece, self.piece_col, self.piece_row - 1) {
            self.piece_row -= 1;
        } else {
            self.lock_piece();
        }
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.active else {
            return;
        };

        self.grid.lock(&piece, self.piece_col, self.piece_row);
        debug!(
            kind = piece.kind().as_str(),
            col = self.piece_col,
            row = self.piece_row,
            "piece locked"
        );
        self.emit(GameEvent::PieceLocked);

        let rows = find_complete_lines(&self.grid);
        if !rows.is_empty() {
            // Points use the level in effect before these lines count
            let points = calculate_points(rows.len(), self.level);
            self.score = self.score.saturating_add(points);
            self.lines_cleared += rows.len() as u32;

            let new_level = calculate_level_with(self.lines_cleared, self.config.lines_per_level);
            if new_level > self.level {
                self.level = new_level;
                debug!(level = new_level, "level up");
                self.emit(GameEvent::LevelUp { level: new_level });
            }

            debug!(?rows, points, score = self.score, "lines cleared");
            self.lines_to_destroy = rows.clone();
            self.destruction_remaining_ms = self.config.line_destruction_duration_ms;
            self.emit(GameEvent::LinesCleared { rows: rows.clone() });

            clear_lines(&mut self.grid, &rows);
        }

        self.spawn_next_piece();
    }

    fn spawn_next_piece(&mut self) {
        self.active = self.next.take();
        self.next = Some(Piece::new(self.source.next_kind()));
        self.piece_col = self.config.spawn_column;
        self.piece_row = self.config.spawn_row;

        let blocked = self
            .active
            .is_some_and(|piece| !can_place(&self.grid, &piece, self.piece_col, self.piece_row));
        if blocked {
            debug!("spawn blocked");
            self.end_game();
        }
    }

    // ------------------------------------------------------------------
    // Snapshot
    // ------------------------------------------------------------------

    /// Build a snapshot of the current state without advancing time
    pub fn snapshot(&self) -> Snapshot {
        let mut active_blocks = ArrayVec::new();
        let mut ghost_blocks = ArrayVec::new();

        if let Some(piece) = &self.active {
            active_blocks = ArrayVec::from(piece.cells_at(self.piece_col, self.piece_row));

            let ghost_row = find_drop_row(&self.grid, piece, self.piece_col, self.piece_row);
            if ghost_row != self.piece_row {
                ghost_blocks = ArrayVec::from(piece.cells_at(self.piece_col, ghost_row));
            }
        }

        let next_blocks = self
            .next
            .map(|piece| ArrayVec::from(*piece.blocks()))
            .unwrap_or_default();

        let descent_progress = (self.descent_offset / self.config.max_descent()).clamp(0.0, 1.0);

        Snapshot {
            grid_blocks: self.grid.occupied_cells(),
            active_blocks,
            ghost_blocks,
            next_blocks,
            active_kind: self.active.map(|p| p.kind()),
            next_kind: self.next.map(|p| p.kind()),
            camera_offset: self.descent_offset,
            score: self.score,
            level: self.level,
            lines_cleared: self.lines_cleared,
            descent_progress,
            phase: self.phase,
            lines_to_destroy: self.lines_to_destroy.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedPieces;
    use crate::events::EventLog;
    use crate::types::{Block, PieceKind};

    fn engine_with(kinds: &[PieceKind]) -> (GameEngine, EventLog) {
        let mut engine =
            GameEngine::with_source(GameConfig::default(), ScriptedPieces::new(kinds.to_vec()))
                .unwrap();
        let log = EventLog::new();
        engine.add_listener(log.clone());
        (engine, log)
    }

    /// Fill `rows` completely except for the listed columns
    fn fill_rows_except(grid: &mut Grid, rows: std::ops::Range<i32>, gaps: &[i32]) {
        for row in rows {
            for col in 0..grid.columns() {
                if !gaps.contains(&col) {
                    grid.set_cell(col, row, true);
                }
            }
        }
    }

    #[test]
    fn test_new_engine_is_ready() {
        let engine = GameEngine::new(1);
        assert_eq!(engine.phase(), Phase::Ready);
        assert_eq!(engine.level(), 1);
        assert!(engine.active_piece().is_none());
        assert_eq!(engine.snapshot(), Snapshot::ready());
    }

    #[test]
    fn test_inputs_and_updates_before_start_are_noops() {
        let mut engine = GameEngine::new(1);
        let log = EventLog::new();
        engine.add_listener(log.clone());

        for input in [
            InputEvent::MoveLeft,
            InputEvent::Rotate,
            InputEvent::HardDrop,
            InputEvent::Resume,
            InputEvent::Pause,
        ] {
            engine.submit_input(input);
        }
        let snap = engine.update(5_000, 16);

        assert_eq!(snap, Snapshot::ready());
        assert!(log.is_empty());
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = GameConfig {
            lines_per_level: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            GameEngine::with_config(config, 1).unwrap_err(),
            ConfigError::LinesPerLevel
        );
    }

    #[test]
    fn test_start_spawns_active_and_next() {
        let (mut engine, log) = engine_with(&[PieceKind::T, PieceKind::L]);
        engine.start();

        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.active_piece().map(|p| p.kind()), Some(PieceKind::T));
        assert_eq!(engine.next_piece().map(|p| p.kind()), Some(PieceKind::L));
        assert_eq!(engine.active_position(), (3, 20));
        assert_eq!(log.events(), vec![GameEvent::GameStarted]);
    }

    #[test]
    fn test_hard_drop_on_empty_grid() {
        let (mut engine, log) = engine_with(&[PieceKind::O]);
        engine.start();
        engine.submit_input(InputEvent::HardDrop);

        assert_eq!(
            engine.grid().occupied_cells(),
            vec![
                Block::new(3, 0),
                Block::new(4, 0),
                Block::new(3, 1),
                Block::new(4, 1)
            ]
        );
        assert_eq!(engine.active_position(), (3, 20));
        assert_eq!(engine.score(), 0);
        assert_eq!(
            log.events(),
            vec![
                GameEvent::GameStarted,
                GameEvent::HardDropped,
                GameEvent::PieceLocked
            ]
        );
    }

    #[test]
    fn test_filling_one_gap_clears_row() {
        let (mut engine, log) = engine_with(&[PieceKind::O]);
        engine.start();
        fill_rows_except(engine.grid_mut(), 0..1, &[3, 4]);

        engine.submit_input(InputEvent::HardDrop);

        assert_eq!(engine.score(), 100);
        assert_eq!(engine.lines_cleared(), 1);
        assert_eq!(engine.level(), 1);
        // Top half of the O drops into the cleared row
        assert_eq!(
            engine.grid().occupied_cells(),
            vec![Block::new(3, 0), Block::new(4, 0)]
        );
        assert_eq!(
            log.events(),
            vec![
                GameEvent::GameStarted,
                GameEvent::HardDropped,
                GameEvent::PieceLocked,
                GameEvent::LinesCleared { rows: vec![0] },
            ]
        );
        let snap = engine.snapshot();
        assert_eq!(snap.lines_to_destroy, vec![0]);
        assert!(snap.has_lines_to_destroy());
    }

    #[test]
    fn test_destruction_window_closes_after_duration() {
        let (mut engine, _) = engine_with(&[PieceKind::O]);
        engine.start();
        fill_rows_except(engine.grid_mut(), 0..1, &[3, 4]);
        engine.submit_input(InputEvent::HardDrop);

        let snap = engine.update(1_000, 200);
        assert_eq!(snap.lines_to_destroy, vec![0]);
        let snap = engine.update(1_100, 100);
        assert!(snap.lines_to_destroy.is_empty());
    }

    #[test]
    fn test_destruction_countdown_runs_while_paused() {
        let (mut engine, _) = engine_with(&[PieceKind::O]);
        engine.start();
        fill_rows_except(engine.grid_mut(), 0..1, &[3, 4]);
        engine.submit_input(InputEvent::HardDrop);
        engine.submit_input(InputEvent::Pause);

        let snap = engine.update(2_000, 100);
        assert!(snap.is_paused());
        assert!(snap.has_lines_to_destroy());

        let snap = engine.update(2_200, 200);
        assert!(snap.is_paused());
        assert!(!snap.has_lines_to_destroy());
    }

    #[test]
    fn test_tetris_scoring_and_level_up() {
        let (mut engine, log) = engine_with(&[PieceKind::I]);
        engine.start();

        let drop_vertical_i_in_left_column = |engine: &mut GameEngine| {
            fill_rows_except(engine.grid_mut(), 0..4, &[0]);
            engine.submit_input(InputEvent::Rotate);
            for _ in 0..3 {
                engine.submit_input(InputEvent::MoveLeft);
            }
            assert_eq!(engine.active_position().0, 0);
            engine.submit_input(InputEvent::HardDrop);
        };

        drop_vertical_i_in_left_column(&mut engine);
        assert_eq!((engine.score(), engine.lines_cleared(), engine.level()), (800, 4, 1));
        drop_vertical_i_in_left_column(&mut engine);
        assert_eq!((engine.score(), engine.lines_cleared(), engine.level()), (1600, 8, 1));

        // Third tetris crosses 10 lines; points still use level 1
        log.take();
        drop_vertical_i_in_left_column(&mut engine);
        assert_eq!((engine.score(), engine.lines_cleared(), engine.level()), (2400, 12, 2));
        assert!(engine.grid().occupied_cells().is_empty());

        let events = log.take();
        let locked = events
            .iter()
            .position(|e| *e == GameEvent::PieceLocked)
            .unwrap();
        let level_up = events
            .iter()
            .position(|e| *e == GameEvent::LevelUp { level: 2 })
            .unwrap();
        let cleared = events
            .iter()
            .position(|e| *e == GameEvent::LinesCleared { rows: vec![0, 1, 2, 3] })
            .unwrap();
        assert!(locked < level_up && level_up < cleared);

        // Next tetris is paid at level 2
        drop_vertical_i_in_left_column(&mut engine);
        assert_eq!(engine.score(), 2400 + 1600);
    }

    #[test]
    fn test_rotation_kicks_left_when_blocked_in_place() {
        let (mut engine, log) = engine_with(&[PieceKind::T]);
        engine.start();
        // Rotated T at column 3 needs (3,22); at column 2 it fits
        engine.grid_mut().set_cell(3, 22, true);

        engine.submit_input(InputEvent::Rotate);

        assert_eq!(engine.active_position(), (2, 20));
        assert_eq!(engine.active_piece().map(|p| p.rotation()), Some(1));
        assert_eq!(log.count("pieceRotated"), 1);
    }

    #[test]
    fn test_rotation_kicks_right_when_center_and_left_blocked() {
        let (mut engine, log) = engine_with(&[PieceKind::T]);
        engine.start();
        // Blocks the rotated T at column 3 and at column 2; column 4 is free
        engine.grid_mut().set_cell(3, 22, true);
        engine.grid_mut().set_cell(2, 21, true);

        engine.submit_input(InputEvent::Rotate);

        assert_eq!(engine.active_position(), (4, 20));
        assert_eq!(engine.active_piece().map(|p| p.rotation()), Some(1));
        assert_eq!(log.count("pieceRotated"), 1);
    }

    #[test]
    fn test_rotation_blocked_everywhere_is_silent() {
        let (mut engine, log) = engine_with(&[PieceKind::T]);
        engine.start();
        engine.grid_mut().set_cell(3, 22, true);
        engine.grid_mut().set_cell(2, 21, true);
        engine.grid_mut().set_cell(4, 22, true);

        engine.submit_input(InputEvent::Rotate);

        assert_eq!(engine.active_position(), (3, 20));
        assert_eq!(engine.active_piece().map(|p| p.rotation()), Some(0));
        assert_eq!(log.count("pieceRotated"), 0);
    }

    #[test]
    fn test_o_rotation_still_reports() {
        let (mut engine, log) = engine_with(&[PieceKind::O]);
        engine.start();
        let before = *engine.active_piece().unwrap().blocks();

        engine.submit_input(InputEvent::Rotate);

        assert_eq!(engine.active_piece().unwrap().blocks(), &before);
        assert_eq!(engine.active_position(), (3, 20));
        assert_eq!(log.count("pieceRotated"), 1);
    }

    #[test]
    fn test_moves_stop_at_walls() {
        let (mut engine, log) = engine_with(&[PieceKind::O]);
        engine.start();

        for _ in 0..10 {
            engine.submit_input(InputEvent::MoveRight);
        }
        assert_eq!(engine.active_position(), (6, 20));
        assert_eq!(log.count("pieceMoved"), 3);

        for _ in 0..10 {
            engine.submit_input(InputEvent::MoveLeft);
        }
        assert_eq!(engine.active_position(), (0, 20));
        assert_eq!(log.count("pieceMoved"), 9);
    }

    #[test]
    fn test_soft_drop_moves_one_row_then_locks() {
        let (mut engine, log) = engine_with(&[PieceKind::O]);
        engine.start();

        engine.submit_input(InputEvent::SoftDrop);
        assert_eq!(engine.active_position(), (3, 19));
        assert_eq!(log.count("softDropped"), 1);

        for _ in 0..19 {
            engine.submit_input(InputEvent::SoftDrop);
        }
        assert_eq!(engine.active_position(), (3, 0));
        assert!(!engine.snapshot().has_ghost());
        assert_eq!(log.count("pieceLocked"), 0);

        // Resting: the next soft drop locks and respawns
        engine.submit_input(InputEvent::SoftDrop);
        assert_eq!(log.count("pieceLocked"), 1);
        assert_eq!(engine.active_position(), (3, 20));
        assert_eq!(engine.grid().occupied_count(), 4);
    }

    #[test]
    fn test_gravity_follows_drop_interval() {
        let (mut engine, _) = engine_with(&[PieceKind::T]);
        engine.start();

        engine.update(10_000, 16);
        engine.update(10_999, 16);
        assert_eq!(engine.active_position().1, 20);

        engine.update(11_000, 16);
        assert_eq!(engine.active_position().1, 19);
        engine.update(11_500, 16);
        assert_eq!(engine.active_position().1, 19);
        engine.update(12_000, 16);
        assert_eq!(engine.active_position().1, 18);
    }

    #[test]
    fn test_resume_after_long_pause_does_not_drop_instantly() {
        let (mut engine, _) = engine_with(&[PieceKind::T]);
        engine.start();
        engine.update(1_000, 16);

        engine.submit_input(InputEvent::Pause);
        assert_eq!(engine.phase(), Phase::Paused);
        engine.update(60_000, 16);
        assert_eq!(engine.active_position().1, 20);

        engine.submit_input(InputEvent::Resume);
        assert_eq!(engine.phase(), Phase::Playing);
        engine.update(61_000, 16);
        assert_eq!(engine.active_position().1, 20);

        engine.update(62_000, 16);
        assert_eq!(engine.active_position().1, 19);
    }

    #[test]
    fn test_paused_ignores_movement() {
        let (mut engine, log) = engine_with(&[PieceKind::T]);
        engine.start();
        engine.submit_input(InputEvent::Pause);
        log.take();

        engine.submit_input(InputEvent::MoveLeft);
        engine.submit_input(InputEvent::HardDrop);
        engine.submit_input(InputEvent::Pause);

        assert_eq!(engine.active_position(), (3, 20));
        assert!(log.is_empty());
        assert_eq!(engine.phase(), Phase::Paused);
    }

    #[test]
    fn test_zero_delta_updates_are_idempotent() {
        let (mut engine, _) = engine_with(&[PieceKind::O, PieceKind::T, PieceKind::I]);
        engine.start();
        engine.submit_input(InputEvent::HardDrop);
        engine.submit_input(InputEvent::HardDrop);

        let before = engine.snapshot();
        for _ in 0..100 {
            engine.update(5_000, 0);
        }
        let after = engine.snapshot();

        assert_eq!(after.score, before.score);
        assert_eq!(after.level, before.level);
        assert_eq!(after.grid_blocks, before.grid_blocks);
        assert_eq!(after.active_blocks, before.active_blocks);
        assert_eq!(after.camera_offset, before.camera_offset);
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let (mut engine, log) = engine_with(&[PieceKind::O]);
        engine.start();
        engine.submit_input(InputEvent::MoveRight);
        engine.submit_input(InputEvent::MoveRight);
        engine.grid_mut().set_cell(3, 20, true);

        engine.submit_input(InputEvent::HardDrop);

        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(
            log.events().last(),
            Some(&GameEvent::GameOver { final_score: 0 })
        );

        // Terminal until restarted
        engine.submit_input(InputEvent::Resume);
        engine.submit_input(InputEvent::MoveLeft);
        let snap = engine.update(1_000, 16);
        assert!(snap.is_game_over());
        assert_eq!(log.count("gameOver"), 1);
    }

    #[test]
    fn test_bricks_near_visible_top_end_game() {
        let (mut engine, log) = engine_with(&[PieceKind::T]);
        engine.start();
        engine.grid_mut().set_cell(0, 13, true);

        let snap = engine.update(1_000, 16);
        assert!(snap.is_playing());

        engine.grid_mut().set_cell(0, 14, true);
        let snap = engine.update(1_016, 16);
        assert!(snap.is_game_over());
        assert_eq!(log.count("gameOver"), 1);
    }

    #[test]
    fn test_restart_after_game_over_resets_state() {
        let (mut engine, log) = engine_with(&[PieceKind::O]);
        engine.start();
        fill_rows_except(engine.grid_mut(), 0..1, &[3, 4]);
        engine.submit_input(InputEvent::HardDrop);
        engine.grid_mut().set_cell(0, 14, true);
        engine.update(1_000, 16);
        assert_eq!(engine.phase(), Phase::GameOver);

        engine.start();

        let snap = engine.snapshot();
        assert!(snap.is_playing());
        assert_eq!((snap.score, snap.level, snap.lines_cleared), (0, 1, 0));
        assert!(snap.grid_blocks.is_empty());
        assert!(snap.lines_to_destroy.is_empty());
        assert_eq!(snap.camera_offset, 0.0);
        assert_eq!(log.count("gameStarted"), 2);
    }

    #[test]
    fn test_snapshot_contents() {
        let (mut engine, _) = engine_with(&[PieceKind::O, PieceKind::I]);
        engine.start();
        let snap = engine.update(1_000, 100);

        assert_eq!(snap.active_kind, Some(PieceKind::O));
        assert_eq!(snap.next_kind, Some(PieceKind::I));
        assert_eq!(
            snap.active_blocks.as_slice(),
            &[
                Block::new(3, 20),
                Block::new(4, 20),
                Block::new(3, 21),
                Block::new(4, 21)
            ]
        );
        assert_eq!(
            snap.ghost_blocks.as_slice(),
            &[
                Block::new(3, 0),
                Block::new(4, 0),
                Block::new(3, 1),
                Block::new(4, 1)
            ]
        );
        assert_eq!(
            snap.next_blocks.as_slice(),
            crate::core::base_blocks(PieceKind::I).as_slice()
        );
        assert!((snap.camera_offset - 0.3).abs() < 1e-6);
        let expected_progress = 0.3 / (24.0 * 0.48);
        assert!((snap.descent_progress - expected_progress).abs() < 1e-6);
    }

    #[test]
    fn test_descent_progress_is_clamped() {
        let (mut engine, _) = engine_with(&[PieceKind::O]);
        engine.start();
        // Ten minutes of descent is far beyond the grid height
        let snap = engine.update(600_000, 600_000);
        assert_eq!(snap.descent_progress, 1.0);
    }

    #[test]
    fn test_huge_descent_does_not_overflow_top_check() {
        let config = GameConfig {
            descent_speed: 1.0e30,
            ..GameConfig::default()
        };
        let mut engine = GameEngine::with_source(config, ScriptedPieces::repeat(PieceKind::O))
            .unwrap();
        engine.start();
        engine.grid_mut().set_cell(0, 0, true);

        let snap = engine.update(1_000, u64::MAX);
        assert!(snap.is_playing());
        assert_eq!(snap.descent_progress, 1.0);
    }

    #[test]
    fn test_removed_listener_stops_receiving() {
        let (mut engine, log) = engine_with(&[PieceKind::O]);
        let other = EventLog::new();
        let id = engine.add_listener(other.clone());
        assert_eq!(engine.listener_count(), 2);

        engine.start();
        assert!(engine.remove_listener(id));
        engine.submit_input(InputEvent::MoveLeft);

        assert_eq!(other.events(), vec![GameEvent::GameStarted]);
        assert_eq!(log.count("pieceMoved"), 1);
    }
}
