//! Control-source resolution: which thing renders a field.
//!
//! The core does not render, but it owns the precedence contract: slot
//! content supplied by the host overrides a descriptor's custom render
//! function, which overrides the built-in control for the field's kind.
//! [`resolve_control`] answers the question; the host fetches the actual
//! content from the [`SlotRegistry`] or descriptor itself.

use std::any::Any;
use std::collections::HashMap;

use crate::schema::{FieldDescriptor, FieldKind};

// ---------------------------------------------------------------------------
// SlotRegistry
// ---------------------------------------------------------------------------

/// Per-field slot content, keyed by field name.
///
/// Content is opaque to the core: a host stores whatever node type it
/// renders with and downcasts on the way out.
#[derive(Default)]
pub struct SlotRegistry {
    slots: HashMap<String, Box<dyn Any>>,
}

impl SlotRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install slot content for `field`, replacing any previous content.
    pub fn set(&mut self, field: impl Into<String>, content: impl Any) {
        self.slots.insert(field.into(), Box::new(content));
    }

    /// Borrow the raw slot content for `field`.
    pub fn get(&self, field: &str) -> Option<&dyn Any> {
        self.slots.get(field).map(Box::as_ref)
    }

    /// Borrow the slot content downcast to `T`.
    pub fn get_as<T: Any>(&self, field: &str) -> Option<&T> {
        self.get(field).and_then(<dyn Any>::downcast_ref)
    }

    /// Remove the slot content for `field`. Returns whether content existed.
    pub fn remove(&mut self, field: &str) -> bool {
        self.slots.remove(field).is_some()
    }

    /// Whether `field` has slot content.
    pub fn contains(&self, field: &str) -> bool {
        self.slots.contains_key(field)
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slots are filled.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl std::fmt::Debug for SlotRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotRegistry")
            .field("fields", &self.slots.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ControlSource
// ---------------------------------------------------------------------------

/// Where a field's control comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSource {
    /// Host slot content wins over everything.
    Slot,
    /// The descriptor's custom render function.
    Render,
    /// The built-in control for the declared kind.
    Builtin(FieldKind),
}

/// Resolve which source renders `field`: slot, then render function, then
/// the built-in control.
pub fn resolve_control(field: &FieldDescriptor, slots: &SlotRegistry) -> ControlSource {
    if slots.contains(&field.name) {
        ControlSource::Slot
    } else if field.render.is_some() {
        ControlSource::Render
    } else {
        ControlSource::Builtin(field.kind)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
