//! Event system: outbound form events, subscription, and the drain queue.

pub mod emitter;
pub mod form_event;

pub use emitter::{EventEmitter, ListenerId};
pub use form_event::FormEvent;
