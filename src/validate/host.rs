//! Validation host: the seam between the form core and a rule engine.
//!
//! The form never interprets rules itself. At submit time it builds a
//! [`RuleTable`] for the visible fields and hands it to a [`ValidationHost`].
//! [`RuleValidator`] is the built-in host; adapters wrapping an external
//! validation engine implement the same trait.

use super::rules::RuleTable;
use crate::model::Model;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Model key of the failing field.
    pub field: String,
    /// The failing rule's message.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation outcome carrying every failure of the pass.
///
/// Failures keep rule-table order: fields in schema order, rules in
/// declaration order within a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed ({} error(s))", .failures.len())]
pub struct ValidationError {
    pub failures: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(failures: Vec<FieldError>) -> Self {
        Self { failures }
    }

    /// Shorthand for a single failure.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            failures: vec![FieldError::new(field, message)],
        }
    }

    /// Names of the failing fields, in order, with duplicates kept.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|failure| failure.field.as_str())
    }

    /// Messages recorded for `field`, in rule order.
    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> {
        self.failures
            .iter()
            .filter(move |failure| failure.field == field)
            .map(|failure| failure.message.as_str())
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Whether the error carries no failures. A well-behaved host never
    /// returns such an error.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ValidationHost
// ---------------------------------------------------------------------------

/// A rule engine the form delegates to at submit time.
pub trait ValidationHost {
    /// Check the model against the table. `Err` carries every failure; the
    /// form recovers from it, so implementations must not panic.
    fn validate(&mut self, table: &RuleTable<'_>, model: &Model)
        -> Result<(), ValidationError>;

    /// Drop any remembered validation state (last outcome, marks on
    /// controls). Called by the form's reset.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// RuleValidator
// ---------------------------------------------------------------------------

/// The built-in host: checks every rule of every table entry in order and
/// collects all failures. Remembers the last outcome until reset.
#[derive(Debug, Default)]
pub struct RuleValidator {
    last_outcome: Option<Result<(), ValidationError>>,
}

impl RuleValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome of the most recent pass, if one ran since the last reset.
    pub fn last_outcome(&self) -> Option<&Result<(), ValidationError>> {
        self.last_outcome.as_ref()
    }
}

impl ValidationHost for RuleValidator {
    fn validate(
        &mut self,
        table: &RuleTable<'_>,
        model: &Model,
    ) -> Result<(), ValidationError> {
        let null = Value::Null;
        let mut failures = Vec::new();
        for entry in table.entries() {
            let value = model.get(entry.field).unwrap_or(&null);
            for rule in entry.rules {
                if let Err(message) = rule.check(model, value) {
                    failures.push(FieldError::new(entry.field, message));
                }
            }
        }

        let outcome = if failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(failures))
        };
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    fn reset(&mut self) {
        self.last_outcome = None;
    }
}

// ===========================================================================
// Tests
// ===========================================================================
