//! Model synchronizer: two-way binding between external and working model.
//!
//! The host owns an external model; the form edits a private working copy.
//! Changes flow both ways: external replacement is folded into the working
//! model, and every accepted field edit is announced with a full snapshot so
//! the host can overwrite its copy. With a naive host that echoes every
//! snapshot straight back, that loop would never terminate.
//!
//! Two instance-scoped flags break the loop. While an external change is
//! being applied, `applying_external` is set and incoming field edits are
//! dropped: they are render echoes of values the working model already
//! holds. While a field edit is being applied, `applying_internal` is set
//! and incoming external changes are dropped: they are the host writing the
//! snapshot it was just handed. The flags are plain booleans rather than a
//! deferred queue because a change arriving mid-apply is by construction an
//! echo, and dropping an echo loses nothing. Each flag is cleared before its
//! operation returns, so the guards never outlive the pass that set them.
//!
//! Single-threaded and run-to-completion: every operation finishes before
//! the next starts, so the flags are never observed mid-flight from outside.

use log::{debug, trace};

use crate::event::{EventEmitter, FormEvent};
use crate::model::Model;
use crate::schema::Schema;
use crate::value::Value;

// ---------------------------------------------------------------------------
// ModelSynchronizer
// ---------------------------------------------------------------------------

/// Reconciles the working model with an external one.
#[derive(Debug)]
pub struct ModelSynchronizer {
    working: Model,
    applying_external: bool,
    applying_internal: bool,
    emitter: EventEmitter,
}

impl ModelSynchronizer {
    /// Seed the working model from `external`: external entries are copied,
    /// then every declared field still missing gets its default. Emits
    /// nothing.
    pub fn new(schema: &Schema, external: &Model) -> Self {
        Self {
            working: schema.seed(external),
            applying_external: false,
            applying_internal: false,
            emitter: EventEmitter::new(),
        }
    }

    /// Re-run seeding against a fresh external model, discarding the current
    /// working state. Listeners and queued events survive. Emits nothing.
    pub fn reinitialize(&mut self, schema: &Schema, external: &Model) {
        trace!("reinitialize from external model ({} entries)", external.len());
        self.working = schema.seed(external);
    }

    /// Fold an externally replaced model into the working model.
    ///
    /// Each incoming entry is copied only where its value differs from the
    /// working one, so an echo of our own snapshot writes nothing. Returns
    /// the number of entries written. Never emits `Update`.
    ///
    /// Dropped entirely while a field edit is mid-apply: such a change is
    /// the host writing back the snapshot it was just handed.
    pub fn on_external_change(&mut self, incoming: &Model) -> usize {
        if self.applying_internal {
            debug!("external change dropped: edit apply in progress");
            return 0;
        }
        self.applying_external = true;
        let written = self.working.merge_changed(incoming);
        trace!("external change applied: {written} entries written");
        self.applying_external = false;
        written
    }

    /// [`on_external_change`](Self::on_external_change) for hosts that
    /// refresh controls synchronously.
    ///
    /// `refresh(name, value)` runs for each entry actually written, while
    /// the external-apply flag is still set. A two-way-bound control that
    /// echoes the refreshed value as an edit can hand it back as
    /// `Some(echo)`; it is routed through the edit path, where the flag
    /// drops it. No `Update` is ever emitted from this pass.
    pub fn on_external_change_with(
        &mut self,
        incoming: &Model,
        mut refresh: impl FnMut(&str, &Value) -> Option<Value>,
    ) -> usize {
        if self.applying_internal {
            debug!("external change dropped: edit apply in progress");
            return 0;
        }
        self.applying_external = true;
        let mut written = 0;
        for (name, value) in incoming.iter() {
            if self.working.get(name) == Some(value) {
                continue;
            }
            self.working.set(name.clone(), value.clone());
            written += 1;
            if let Some(echo) = refresh(name, value) {
                // The control's synchronous echo; the guard drops it.
                self.on_field_edit(name, echo);
            }
        }
        trace!("external change applied: {written} entries written");
        self.applying_external = false;
        written
    }

    /// Apply one field edit from a control.
    ///
    /// Writes the value, then emits exactly one `Update` carrying a full
    /// working-model snapshot. Field names are not checked against the
    /// schema; an undeclared name simply adds an entry. Returns whether the
    /// edit was accepted.
    ///
    /// Dropped entirely while an external change is mid-apply: such an edit
    /// is a render echo of the value just copied in.
    pub fn on_field_edit(&mut self, field: &str, value: impl Into<Value>) -> bool {
        if self.applying_external {
            debug!("edit of {field:?} dropped: external apply in progress");
            return false;
        }
        self.applying_internal = true;
        self.working.set(field, value.into());
        self.emitter.emit(FormEvent::Update {
            model: self.working.clone(),
        });
        self.applying_internal = false;
        true
    }

    /// [`on_field_edit`](Self::on_field_edit) for hosts that write the
    /// snapshot back synchronously.
    ///
    /// `deliver(&snapshot)` runs while the edit-apply flag is still set,
    /// after the `Update` has been emitted. A host whose model watcher fires
    /// synchronously can hand the resulting external model back as
    /// `Some(external)`; it is routed through the external path, where the
    /// flag drops it.
    pub fn on_field_edit_with(
        &mut self,
        field: &str,
        value: impl Into<Value>,
        deliver: impl FnOnce(&Model) -> Option<Model>,
    ) -> bool {
        if self.applying_external {
            debug!("edit of {field:?} dropped: external apply in progress");
            return false;
        }
        self.applying_internal = true;
        self.working.set(field, value.into());
        let snapshot = self.working.clone();
        self.emitter.emit(FormEvent::Update {
            model: snapshot.clone(),
        });
        if let Some(external) = deliver(&snapshot) {
            // The host's synchronous write-back; the guard drops it.
            self.on_external_change(&external);
        }
        self.applying_internal = false;
        true
    }

    /// Borrow the working model.
    pub fn model(&self) -> &Model {
        &self.working
    }

    /// Owned copy of the working model.
    pub fn snapshot(&self) -> Model {
        self.working.clone()
    }

    /// Whether an external change is mid-apply. Outside the `_with`
    /// callbacks this is always false.
    pub fn is_applying_external(&self) -> bool {
        self.applying_external
    }

    /// Whether a field edit is mid-apply. Outside the `_with` callbacks
    /// this is always false.
    pub fn is_applying_internal(&self) -> bool {
        self.applying_internal
    }

    /// The event emitter: subscribe, drain, or emit through it.
    pub fn events(&mut self) -> &mut EventEmitter {
        &mut self.emitter
    }
}

// ===========================================================================
// Tests
// ===========================================================================
