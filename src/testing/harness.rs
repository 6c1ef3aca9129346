//! FormHarness: programmatic interaction with a headless form.
//!
//! The harness wraps a [`Form`], drives it the way a host would (typing,
//! model pushes, submit/cancel/reset), and records every event the form
//! emits so tests can assert on the full event history rather than just the
//! latest drain.

use crate::event::FormEvent;
use crate::form::Form;
use crate::model::Model;
use crate::schema::Schema;
use crate::validate::ValidationError;
use crate::value::Value;

// ---------------------------------------------------------------------------
// FormHarness
// ---------------------------------------------------------------------------

/// A headless form driver for testing.
///
/// Every driving method drains the form's event queue into an ordered
/// record afterwards, so `events()` always reflects the complete history.
///
/// # Examples
///
/// ```ignore
/// use crud_form::model::Model;
/// use crud_form::schema::{FieldDescriptor, Schema};
/// use crud_form::testing::FormHarness;
///
/// let schema = Schema::new([FieldDescriptor::input("name", "Name")]);
/// let mut harness = FormHarness::new(schema, Model::new());
/// harness.type_value("name", "Ada");
/// assert_eq!(harness.update_count(), 1);
/// ```
pub struct FormHarness {
    form: Form,
    recorded: Vec<FormEvent>,
}

impl FormHarness {
    /// Build a harness over a fresh form.
    pub fn new(schema: Schema, external: Model) -> Self {
        Self {
            form: Form::new(schema, external),
            recorded: Vec::new(),
        }
    }

    /// Wrap an already configured form.
    pub fn with_form(form: Form) -> Self {
        Self {
            form,
            recorded: Vec::new(),
        }
    }

    // ── Driving ──────────────────────────────────────────────────────

    /// Commit one value to a field, as a control would on change.
    pub fn type_value(&mut self, field: &str, value: impl Into<Value>) -> bool {
        let accepted = self.form.edit(field, value);
        self.collect();
        accepted
    }

    /// Type `text` into a field one character at a time, committing the
    /// partial value on every keystroke. Emits one update per character.
    pub fn type_text(&mut self, field: &str, text: &str) {
        let mut partial = String::new();
        for ch in text.chars() {
            partial.push(ch);
            self.form.edit(field, partial.as_str());
        }
        self.collect();
    }

    /// Commit one value through a host whose model watcher fires
    /// synchronously: the emitted snapshot is written straight back as an
    /// external change (which the edit guard drops).
    pub fn type_value_with_write_back(&mut self, field: &str, value: impl Into<Value>) -> bool {
        let accepted = self
            .form
            .edit_with(field, value, |snapshot| Some(snapshot.clone()));
        self.collect();
        accepted
    }

    /// Replace the external model, as the host would after loading a row.
    pub fn push_external(&mut self, external: &Model) -> usize {
        let written = self.form.set_model(external);
        self.collect();
        written
    }

    /// Replace the external model through naive two-way-bound controls:
    /// every refreshed control echoes its new value back as an edit (which
    /// the external guard drops).
    pub fn push_external_with_echo(&mut self, external: &Model) -> usize {
        let written = self
            .form
            .set_model_with(external, |_, value| Some(value.clone()));
        self.collect();
        written
    }

    /// Trigger submit.
    pub fn submit(&mut self) -> Result<Model, ValidationError> {
        let result = self.form.submit();
        self.collect();
        result
    }

    /// Trigger cancel.
    pub fn cancel(&mut self) {
        self.form.cancel();
        self.collect();
    }

    /// Trigger reset.
    pub fn reset(&mut self) {
        self.form.reset();
        self.collect();
    }

    // ── Event record ─────────────────────────────────────────────────

    /// Every event emitted so far, in order.
    pub fn events(&self) -> &[FormEvent] {
        &self.recorded
    }

    /// Names of every event emitted so far, in order.
    pub fn event_names(&self) -> Vec<&'static str> {
        self.recorded.iter().map(FormEvent::name).collect()
    }

    /// The most recent event.
    pub fn last_event(&self) -> Option<&FormEvent> {
        self.recorded.last()
    }

    /// Number of `Update` events recorded.
    pub fn update_count(&self) -> usize {
        self.count("update")
    }

    /// Number of `Submit` events recorded.
    pub fn submit_count(&self) -> usize {
        self.count("submit")
    }

    /// Forget the recorded history. The form itself is untouched.
    pub fn clear_events(&mut self) {
        self.recorded.clear();
    }

    fn count(&self, name: &str) -> usize {
        self.recorded.iter().filter(|e| e.name() == name).count()
    }

    /// Pull queued events into the record. Runs after every driving
    /// method; only needed directly after driving the form through
    /// [`form_mut`](Self::form_mut).
    pub fn collect(&mut self) {
        self.recorded.extend(self.form.events().drain());
    }

    // ── Form access ──────────────────────────────────────────────────

    /// Borrow the working model.
    pub fn model(&self) -> &Model {
        self.form.model()
    }

    /// Borrow one working-model value.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.form.model().get(field)
    }

    /// Borrow the underlying form immutably.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Borrow the underlying form mutably.
    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }
}

impl std::fmt::Debug for FormHarness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormHarness")
            .field("form", &self.form)
            .field("recorded", &self.recorded.len())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
