//! Scripted autoplayer for headless runs
//!
//! For every new piece it picks a rotation count and a column shift from a
//! seeded RNG, feeds those inputs one per decision, then hard drops. It plays
//! badly, but it exercises every input path and is fully reproducible.

use std::collections::VecDeque;

use crate::core::SimpleRng;
use crate::engine::{GameEngine, Snapshot};
use crate::types::InputEvent;

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    rng: SimpleRng,
    plan: VecDeque<InputEvent>,
    decisions: u64,
}

impl AutoPlayer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            plan: VecDeque::new(),
            decisions: 0,
        }
    }

    /// Number of inputs issued so far
    pub fn decisions(&self) -> u64 {
        self.decisions
    }

    /// Next input for the current piece, or `None` when not playing
    pub fn next_input(&mut self, snapshot: &Snapshot) -> Option<InputEvent> {
        if !snapshot.is_playing() {
            self.plan.clear();
            return None;
        }
        if self.plan.is_empty() {
            self.plan_piece();
        }
        let input = self.plan.pop_front()?;
        self.decisions += 1;
        Some(input)
    }

    fn plan_piece(&mut self) {
        let rotations = self.rng.next_range(4);
        // Shift in -4..=4
        let shift = self.rng.next_range(9) as i32 - 4;

        for _ in 0..rotations {
            self.plan.push_back(InputEvent::Rotate);
        }
        let step = if shift < 0 {
            InputEvent::MoveLeft
        } else {
            InputEvent::MoveRight
        };
        for _ in 0..shift.unsigned_abs() {
            self.plan.push_back(step);
        }
        self.plan.push_back(InputEvent::HardDrop);
    }

    /// Let the player act on `engine` if it has something to do
    pub fn act(&mut self, engine: &mut GameEngine, snapshot: &Snapshot) {
        if let Some(input) = self.next_input(snapshot) {
            engine.submit_input(input);
        }
    }
}
