//! Brickwell (workspace facade crate).
//!
//! Re-exports the simulation crates under one roof so hosts can depend on a
//! single package: `brickwell::{types, core, engine}`. The [`autoplay`] module
//! holds the scripted player used by the headless runner and the benches.

pub mod autoplay;

pub use brickwell_core as core;
pub use brickwell_engine as engine;
pub use brickwell_types as types;
