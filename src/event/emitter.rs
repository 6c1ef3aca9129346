//! Event emission: subscriber callbacks plus a drain queue.
//!
//! [`EventEmitter`] serves both host styles. Callback hosts subscribe a
//! closure and hear every event synchronously at emission time. Polling
//! hosts let events accumulate and collect them with `drain`. Both views
//! see the same events in the same order.

use std::collections::VecDeque;

use slotmap::{new_key_type, SlotMap};

use super::form_event::FormEvent;

new_key_type! {
    /// Key for a subscribed listener. Copy, lightweight (u64).
    pub struct ListenerId;
}

type Listener = Box<dyn FnMut(&FormEvent)>;

// ---------------------------------------------------------------------------
// EventEmitter
// ---------------------------------------------------------------------------

/// Dispatches [`FormEvent`]s to subscribers and a pending queue.
pub struct EventEmitter {
    queue: VecDeque<FormEvent>,
    listeners: SlotMap<ListenerId, Listener>,
}

impl EventEmitter {
    /// Create an emitter with no listeners and an empty queue.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            listeners: SlotMap::with_key(),
        }
    }

    /// Emit an event: every listener runs now, then the event is queued.
    pub fn emit(&mut self, event: FormEvent) {
        log::trace!("emit {}", event.name());
        for listener in self.listeners.values_mut() {
            listener(&event);
        }
        self.queue.push_back(event);
    }

    /// Drain all pending events and return them as a `Vec`.
    ///
    /// The queue is empty after this call.
    pub fn drain(&mut self) -> Vec<FormEvent> {
        self.queue.drain(..).collect()
    }

    /// Number of pending events.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Register a listener. It runs on every subsequent emission until
    /// unsubscribed.
    pub fn subscribe(&mut self, listener: impl FnMut(&FormEvent) + 'static) -> ListenerId {
        self.listeners.insert(Box::new(listener))
    }

    /// Remove a listener. Returns whether the id was live.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("pending", &self.queue.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn update(value: i32) -> FormEvent {
        FormEvent::Update {
            model: Model::new().with("n", value),
        }
    }

    // ── Queue ────────────────────────────────────────────────────────

    #[test]
    fn new_emitter_is_empty() {
        let emitter = EventEmitter::new();
        assert!(emitter.is_empty());
        assert_eq!(emitter.pending_count(), 0);
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn emit_and_drain_preserve_order() {
        let mut emitter = EventEmitter::new();
        emitter.emit(update(1));
        emitter.emit(FormEvent::Cancel);
        emitter.emit(update(2));

        assert_eq!(emitter.pending_count(), 3);
        let events = emitter.drain();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].name(), "update");
        assert_eq!(events[1].name(), "cancel");
        assert_eq!(events[2].name(), "update");
        assert!(emitter.is_empty());
    }

    #[test]
    fn drain_empty() {
        let mut emitter = EventEmitter::new();
        assert!(emitter.drain().is_empty());
    }

    // ── Listeners ────────────────────────────────────────────────────

    #[test]
    fn listener_hears_every_emission() {
        let heard = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&heard);

        let mut emitter = EventEmitter::new();
        emitter.subscribe(move |event| sink.borrow_mut().push(event.name()));
        emitter.emit(update(1));
        emitter.emit(FormEvent::Cancel);

        assert_eq!(*heard.borrow(), vec!["update", "cancel"]);
        // The queue still has both: listeners do not consume.
        assert_eq!(emitter.pending_count(), 2);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let heard = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&heard);

        let mut emitter = EventEmitter::new();
        let id = emitter.subscribe(move |_| *sink.borrow_mut() += 1);
        emitter.emit(FormEvent::Cancel);

        assert!(emitter.unsubscribe(id));
        emitter.emit(FormEvent::Cancel);

        assert_eq!(*heard.borrow(), 1);
        assert!(!emitter.unsubscribe(id));
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn multiple_listeners_all_run() {
        let count = Rc::new(RefCell::new(0u32));
        let a = Rc::clone(&count);
        let b = Rc::clone(&count);

        let mut emitter = EventEmitter::new();
        emitter.subscribe(move |_| *a.borrow_mut() += 1);
        emitter.subscribe(move |_| *b.borrow_mut() += 10);
        emitter.emit(FormEvent::Cancel);

        assert_eq!(*count.borrow(), 11);
        assert_eq!(emitter.listener_count(), 2);
    }

    #[test]
    fn listener_sees_payload() {
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);

        let mut emitter = EventEmitter::new();
        emitter.subscribe(move |event| {
            *sink.borrow_mut() = event.model().cloned();
        });
        emitter.emit(update(7));

        let model = seen.borrow().clone().unwrap();
        assert_eq!(model.get("n"), Some(&crate::value::Value::Number(7.0)));
    }
}
