//! Plain-text snapshots of models and event histories.
//!
//! Tests that care about the whole state of a form compare against a small
//! block of text instead of field-by-field assertions. The helpers here
//! produce that text deterministically: model entries in key order, events
//! in emission order, one line each, joined with `\n` and no trailing
//! newline.

use crate::event::FormEvent;
use crate::model::Model;

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render a model as one `name: value` line per entry, in key order.
///
/// # Examples
///
/// ```ignore
/// use crud_form::model::Model;
/// use crud_form::testing::model_to_string;
///
/// let model = Model::new().with("name", "Ada").with("age", 36);
/// assert_eq!(model_to_string(&model), "age: 36\nname: Ada");
/// ```
pub fn model_to_string(model: &Model) -> String {
    let lines: Vec<String> = model
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect();
    lines.join("\n")
}

/// Render a model on one line: `{age: 36, name: Ada}`.
pub fn model_to_inline_string(model: &Model) -> String {
    let entries: Vec<String> = model
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

/// Render an event history as one line per event, in emission order.
///
/// Model-carrying events append the inline model; `validate_failed`
/// appends its failures as `[field: message; ...]`.
pub fn events_to_string(events: &[FormEvent]) -> String {
    let lines: Vec<String> = events.iter().map(event_line).collect();
    lines.join("\n")
}

fn event_line(event: &FormEvent) -> String {
    match event {
        FormEvent::Update { model } => {
            format!("update {}", model_to_inline_string(model))
        }
        FormEvent::Submit { model } => {
            format!("submit {}", model_to_inline_string(model))
        }
        FormEvent::Cancel => "cancel".to_string(),
        FormEvent::ValidateFailed { error } => {
            let failures: Vec<String> = error
                .failures
                .iter()
                .map(ToString::to_string)
                .collect();
            format!("validate_failed [{}]", failures.join("; "))
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
