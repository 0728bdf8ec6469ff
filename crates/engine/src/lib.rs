//! Brickwell engine - the phase machine on top of the core rules
//!
//! [`GameEngine`] owns the grid, the active and next pieces, score and level,
//! the descent offset and the line-destruction window. A host drives it with
//! two calls and reads back an owned [`Snapshot`]:
//!
//! ```
//! use brickwell_engine::{GameEngine, Snapshot};
//! use brickwell_engine::types::{InputEvent, GameEvent, Phase};
//!
//! let mut engine = GameEngine::new(42);
//! engine.add_listener(|event: &GameEvent| {
//!     if let GameEvent::LinesCleared { rows } = event {
//!         println!("cleared {rows:?}");
//!     }
//! });
//!
//! engine.start();
//! engine.submit_input(InputEvent::MoveLeft);
//! engine.submit_input(InputEvent::HardDrop);
//!
//! let snapshot: Snapshot = engine.update(16, 16);
//! assert_eq!(snapshot.phase, Phase::Playing);
//! assert_eq!(snapshot.grid_blocks.len(), 4);
//! ```
//!
//! # Frame order
//!
//! Each [`GameEngine::update`] call:
//!
//! 1. Counts down the line-destruction window (in every phase)
//! 2. Returns early unless playing
//! 3. Advances the descent offset and checks whether bricks reached the top
//! 4. Applies a gravity step once the level's drop interval has elapsed

pub mod engine;
pub mod events;
pub mod snapshot;

pub use brickwell_core as core;
pub use brickwell_types as types;

pub use engine::GameEngine;
pub use events::{EventLog, GameEventListener, ListenerId};
pub use snapshot::{PieceBlocks, Snapshot};
