//! Render signals from the session manager to whatever draws the chat.
//!
//! Single-threaded (WASM) queue behind `Rc<RefCell<_>>`. The session pushes,
//! the UI drains once per frame, so nothing ever waits on the bus.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use chat_types::event::SessionEvent;

/// Clone-cheap handle; all clones share one queue.
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<SessionEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: SessionEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Queue a batch in order, e.g. a reset followed by every restored message
    pub fn emit_all(&self, events: impl IntoIterator<Item = SessionEvent>) {
        self.queue.borrow_mut().extend(events);
    }

    /// Take everything queued so far, oldest first
    pub fn drain(&self) -> Vec<SessionEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }
}
