//! Event listeners - synchronous broadcast of [`GameEvent`]s
//!
//! Listeners run inside the engine call that raised the event, in registration
//! order. They only ever see a shared reference to the event, never the engine.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::types::GameEvent;

/// Receives engine notifications (sound, haptics, analytics, ...)
pub trait GameEventListener {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameEventListener for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Handle returned by `add_listener`, used to remove the listener again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Ordered listener registry
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn GameEventListener>)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Box<dyn GameEventListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self, event: &GameEvent) {
        for (_, listener) in &mut self.entries {
            listener.on_event(event);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// Listener that records every event it sees.
///
/// Clones share the same buffer, so keep one clone and hand the other to the
/// engine.
///
/// ```
/// use brickwell_engine::{EventLog, GameEngine};
/// use brickwell_engine::types::GameEvent;
///
/// let log = EventLog::new();
/// let mut engine = GameEngine::new(7);
/// engine.add_listener(log.clone());
/// engine.start();
/// assert_eq!(log.events(), vec![GameEvent::GameStarted]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Drain the recorded events
    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// How many recorded events have the given name
    pub fn count(&self, name: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.name() == name)
            .count()
    }
}

impl GameEventListener for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
