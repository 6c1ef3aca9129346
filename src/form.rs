//! Form: the facade tying schema, synchronizer, validation, and slots.
//!
//! A [`Form`] owns everything one form instance needs: the field schema, the
//! working-model synchronizer, a validation host, layout options, and slot
//! content. Hosts drive it through a handful of operations (`edit`,
//! `set_model`, `submit`, `cancel`, `reset`) and read the resolved per-pass
//! state back out (`is_hidden`, `is_disabled`, `control_source`,
//! `visible_fields`).

use log::debug;

use crate::dispatch::{resolve_control, ControlSource, SlotRegistry};
use crate::event::{EventEmitter, FormEvent};
use crate::layout::FormLayout;
use crate::model::Model;
use crate::schema::{FieldDescriptor, Schema};
use crate::sync::ModelSynchronizer;
use crate::validate::{RuleTable, RuleValidator, ValidationError, ValidationHost};
use crate::value::Value;

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// A schema-driven form instance.
pub struct Form {
    schema: Schema,
    layout: FormLayout,
    slots: SlotRegistry,
    host: Box<dyn ValidationHost>,
    sync: ModelSynchronizer,
    /// Defensive copy of the external model last seen, used by `reset`.
    external: Model,
    /// Form-wide disablement; overrides every per-field condition.
    disabled: bool,
}

impl Form {
    /// Build a form over `schema`, seeding the working model from
    /// `external`. Uses the built-in [`RuleValidator`] and default layout.
    pub fn new(schema: Schema, external: Model) -> Self {
        let sync = ModelSynchronizer::new(&schema, &external);
        Self {
            schema,
            layout: FormLayout::default(),
            slots: SlotRegistry::new(),
            host: Box::new(RuleValidator::new()),
            sync,
            external,
            disabled: false,
        }
    }

    /// Replace the layout options (builder).
    pub fn with_layout(mut self, layout: FormLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the validation host (builder).
    pub fn with_host(mut self, host: impl ValidationHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    /// Install slot content for a field (builder).
    pub fn with_slot(mut self, field: impl Into<String>, content: impl std::any::Any) -> Self {
        self.slots.set(field, content);
        self
    }

    /// Set form-wide disablement (builder).
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    // --- operations ---

    /// Apply a field edit. Emits one `Update` on acceptance; see
    /// [`ModelSynchronizer::on_field_edit`].
    pub fn edit(&mut self, field: &str, value: impl Into<Value>) -> bool {
        self.sync.on_field_edit(field, value)
    }

    /// [`edit`](Self::edit) with a synchronous write-back seam; see
    /// [`ModelSynchronizer::on_field_edit_with`].
    pub fn edit_with(
        &mut self,
        field: &str,
        value: impl Into<Value>,
        deliver: impl FnOnce(&Model) -> Option<Model>,
    ) -> bool {
        self.sync.on_field_edit_with(field, value, deliver)
    }

    /// Record a replaced external model and fold it into the working model.
    /// Returns the number of entries written; see
    /// [`ModelSynchronizer::on_external_change`].
    pub fn set_model(&mut self, external: &Model) -> usize {
        self.external = external.clone();
        self.sync.on_external_change(external)
    }

    /// [`set_model`](Self::set_model) with a control-refresh seam; see
    /// [`ModelSynchronizer::on_external_change_with`].
    pub fn set_model_with(
        &mut self,
        external: &Model,
        refresh: impl FnMut(&str, &Value) -> Option<Value>,
    ) -> usize {
        self.external = external.clone();
        self.sync.on_external_change_with(external, refresh)
    }

    /// Validate, then either hand out the validated snapshot or the
    /// failures.
    ///
    /// Builds the rule table for the currently visible fields and delegates
    /// to the validation host. Success emits one `Submit` carrying the
    /// snapshot; failure emits one `ValidateFailed` and returns the error.
    /// Never panics on invalid input.
    pub fn submit(&mut self) -> Result<Model, ValidationError> {
        let table = self.schema.rule_table(self.sync.model());
        match self.host.validate(&table, self.sync.model()) {
            Ok(()) => {
                let snapshot = self.sync.snapshot();
                debug!("submit accepted ({} entries)", snapshot.len());
                self.sync.events().emit(FormEvent::Submit {
                    model: snapshot.clone(),
                });
                Ok(snapshot)
            }
            Err(error) => {
                debug!("submit rejected ({} failure(s))", error.len());
                self.sync.events().emit(FormEvent::ValidateFailed {
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    /// Run validation without emitting events.
    pub fn validate(&mut self) -> bool {
        let table = self.schema.rule_table(self.sync.model());
        self.host.validate(&table, self.sync.model()).is_ok()
    }

    /// Emit `Cancel`. The working model is left untouched.
    pub fn cancel(&mut self) {
        self.sync.events().emit(FormEvent::Cancel);
    }

    /// Discard in-progress edits: reset the validation host, then re-seed
    /// the working model from the schema and the external model last seen.
    /// Calling it twice in a row is the same as calling it once.
    pub fn reset(&mut self) {
        debug!("reset to last observed external model");
        self.host.reset();
        self.sync.reinitialize(&self.schema, &self.external);
    }

    // --- state ---

    /// Borrow the working model.
    pub fn model(&self) -> &Model {
        self.sync.model()
    }

    /// Owned copy of the working model.
    pub fn snapshot(&self) -> Model {
        self.sync.snapshot()
    }

    /// The external model last handed to `new` or `set_model`.
    pub fn external_model(&self) -> &Model {
        &self.external
    }

    /// The field schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Layout options.
    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    /// Mutable layout options, for toggling `loading` mid-flight.
    pub fn layout_mut(&mut self) -> &mut FormLayout {
        &mut self.layout
    }

    /// Slot content registry.
    pub fn slots(&self) -> &SlotRegistry {
        &self.slots
    }

    /// Mutable slot content registry.
    pub fn slots_mut(&mut self) -> &mut SlotRegistry {
        &mut self.slots
    }

    /// The event emitter: subscribe or drain through it.
    pub fn events(&mut self) -> &mut EventEmitter {
        self.sync.events()
    }

    /// The underlying synchronizer.
    pub fn synchronizer(&self) -> &ModelSynchronizer {
        &self.sync
    }

    /// The underlying synchronizer, for hosts that drive it directly.
    pub fn synchronizer_mut(&mut self) -> &mut ModelSynchronizer {
        &mut self.sync
    }

    /// Form-wide disablement.
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Set form-wide disablement.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    // --- per-pass resolution ---

    /// Whether `name`'s hidden condition holds right now. Undeclared names
    /// are never hidden.
    pub fn is_hidden(&self, name: &str) -> bool {
        self.schema
            .field(name)
            .is_some_and(|field| field.hidden.evaluate(self.sync.model()))
    }

    /// Whether `name` is disabled right now: form-wide disablement wins,
    /// then the field's own condition.
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled
            || self
                .schema
                .field(name)
                .is_some_and(|field| field.disabled.evaluate(self.sync.model()))
    }

    /// The descriptors a render pass should lay out, in schema order.
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.schema.visible_fields(self.sync.model())
    }

    /// Which source renders `name`; `None` for undeclared names.
    pub fn control_source(&self, name: &str) -> Option<ControlSource> {
        self.schema
            .field(name)
            .map(|field| resolve_control(field, &self.slots))
    }

    /// The rule table a submit would use right now.
    pub fn active_rules(&self) -> RuleTable<'_> {
        self.schema.rule_table(self.sync.model())
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("fields", &self.schema.len())
            .field("model", self.sync.model())
            .field("disabled", &self.disabled)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Condition;
    use crate::validate::{FieldError, Rule};
    use std::cell::Cell;
    use std::rc::Rc;

    fn schema() -> Schema {
        Schema::new([
            FieldDescriptor::input("name", "Name").with_rule(Rule::required("name required")),
            FieldDescriptor::number("age", "Age").with_rule(Rule::range(0.0, 150.0, "age range")),
            FieldDescriptor::switch("active", "Active"),
        ])
    }

    fn drained_names(form: &mut Form) -> Vec<&'static str> {
        form.events().drain().iter().map(FormEvent::name).collect()
    }

    // ── Submit ───────────────────────────────────────────────────────

    #[test]
    fn submit_passes_and_emits_submit() {
        let mut form = Form::new(schema(), Model::new().with("name", "Ada"));
        let result = form.submit().unwrap();
        assert_eq!(result.get("name"), Some(&Value::from("Ada")));
        assert_eq!(drained_names(&mut form), ["submit"]);
    }

    #[test]
    fn submit_fails_and_emits_validate_failed() {
        let mut form = Form::new(schema(), Model::new());
        let error = form.submit().unwrap_err();
        assert_eq!(error.failures, vec![FieldError::new("name", "name required")]);

        let events = form.events().drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].error(), Some(&error));
    }

    #[test]
    fn submit_skips_rules_of_hidden_fields() {
        let s = Schema::new([
            FieldDescriptor::switch("advanced", "Advanced"),
            FieldDescriptor::input("token", "Token")
                .with_rule(Rule::required("token required"))
                .hidden_when(Condition::when(|m| {
                    m.get("advanced") != Some(&Value::Bool(true))
                })),
        ]);
        let mut form = Form::new(s, Model::new());

        // Hidden: its required rule does not block.
        assert!(form.submit().is_ok());

        // Shown by an edit: now it blocks.
        form.edit("advanced", true);
        let error = form.submit().unwrap_err();
        assert_eq!(error.failures[0].field, "token");
    }

    #[test]
    fn validate_reports_without_events() {
        let mut form = Form::new(schema(), Model::new());
        assert!(!form.validate());
        form.edit("name", "Ada");
        let _ = form.events().drain();
        assert!(form.validate());
        assert!(form.events().is_empty());
    }

    // ── Cancel / Reset ───────────────────────────────────────────────

    #[test]
    fn cancel_emits_and_keeps_model() {
        let mut form = Form::new(schema(), Model::new().with("name", "Ada"));
        form.edit("name", "Grace");
        form.cancel();
        assert_eq!(drained_names(&mut form), ["update", "cancel"]);
        assert_eq!(form.model().get("name"), Some(&Value::from("Grace")));
    }

    #[test]
    fn reset_restores_last_observed_external_model() {
        let mut form = Form::new(schema(), Model::new().with("name", "Ada"));
        form.edit("name", "Grace");
        form.edit("age", 99);
        let _ = form.events().drain();

        form.reset();
        assert_eq!(form.model().get("name"), Some(&Value::from("Ada")));
        assert_eq!(form.model().get("age"), Some(&Value::Number(0.0)));
        assert!(form.events().is_empty());
    }

    #[test]
    fn reset_uses_the_model_from_set_model() {
        let mut form = Form::new(schema(), Model::new().with("name", "Ada"));
        form.set_model(&Model::new().with("name", "Grace"));
        form.edit("name", "scratch");
        form.reset();
        assert_eq!(form.model().get("name"), Some(&Value::from("Grace")));
    }

    #[test]
    fn reset_twice_equals_reset_once() {
        let mut form = Form::new(schema(), Model::new().with("name", "Ada"));
        form.edit("name", "Grace");
        form.reset();
        let after_one = form.snapshot();
        form.reset();
        assert_eq!(form.snapshot(), after_one);
    }

    #[test]
    fn reset_resets_the_host() {
        struct CountingHost(Rc<Cell<u32>>);
        impl ValidationHost for CountingHost {
            fn validate(
                &mut self,
                _table: &RuleTable<'_>,
                _model: &Model,
            ) -> Result<(), ValidationError> {
                Ok(())
            }
            fn reset(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let resets = Rc::new(Cell::new(0));
        let mut form =
            Form::new(schema(), Model::new()).with_host(CountingHost(Rc::clone(&resets)));
        form.reset();
        form.reset();
        assert_eq!(resets.get(), 2);
    }

    // ── Custom host ──────────────────────────────────────────────────

    #[test]
    fn submit_carries_the_hosts_error() {
        struct RejectingHost;
        impl ValidationHost for RejectingHost {
            fn validate(
                &mut self,
                _table: &RuleTable<'_>,
                _model: &Model,
            ) -> Result<(), ValidationError> {
                Err(ValidationError::single("name", "host says no"))
            }
            fn reset(&mut self) {}
        }

        let mut form = Form::new(schema(), Model::new().with("name", "Ada"))
            .with_host(RejectingHost);
        let error = form.submit().unwrap_err();
        assert_eq!(error.failures[0].message, "host says no");
        assert_eq!(drained_names(&mut form), ["validate_failed"]);
    }

    // ── Per-pass resolution ──────────────────────────────────────────

    #[test]
    fn hidden_tracks_the_working_model() {
        let s = Schema::new([
            FieldDescriptor::select("kind", "Kind"),
            FieldDescriptor::input("detail", "Detail").hidden_when(Condition::when(|m| {
                m.get("kind") != Some(&Value::from("other"))
            })),
        ]);
        let mut form = Form::new(s, Model::new());

        assert!(form.is_hidden("detail"));
        let visible: Vec<_> = form.visible_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(visible, ["kind"]);

        form.edit("kind", "other");
        assert!(!form.is_hidden("detail"));
    }

    #[test]
    fn form_wide_disabled_overrides_field_conditions() {
        let mut form = Form::new(schema(), Model::new());
        assert!(!form.is_disabled("name"));

        form.set_disabled(true);
        assert!(form.is_disabled("name"));
        assert!(form.is_disabled("age"));
    }

    #[test]
    fn undeclared_names_resolve_neutrally() {
        let form = Form::new(schema(), Model::new());
        assert!(!form.is_hidden("ghost"));
        assert!(!form.is_disabled("ghost"));
        assert!(form.control_source("ghost").is_none());
    }

    #[test]
    fn control_source_through_the_form() {
        let mut form = Form::new(schema(), Model::new());
        assert_eq!(
            form.control_source("active"),
            Some(ControlSource::Builtin(crate::schema::FieldKind::Switch))
        );
        form.slots_mut().set("active", "replacement");
        assert_eq!(form.control_source("active"), Some(ControlSource::Slot));
    }

    #[test]
    fn active_rules_match_current_visibility() {
        let mut form = Form::new(schema(), Model::new());
        assert!(form.active_rules().contains("name"));
        form.edit("name", "Ada");
        assert!(form.active_rules().contains("age"));
    }

    // ── Listeners via the facade ─────────────────────────────────────

    #[test]
    fn subscription_hears_facade_events() {
        let heard = Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = Rc::clone(&heard);

        let mut form = Form::new(schema(), Model::new().with("name", "Ada"));
        form.events()
            .subscribe(move |event| sink.borrow_mut().push(event.name()));

        form.edit("age", 36);
        let _ = form.submit();
        form.cancel();

        assert_eq!(*heard.borrow(), vec!["update", "submit", "cancel"]);
    }
}
