//! Outbound form events.
//!
//! Everything the form tells its host flows through [`FormEvent`]. Update
//! and submit events carry a full model snapshot rather than a delta, so a
//! host can always overwrite its copy wholesale.

use crate::model::Model;
use crate::validate::ValidationError;

// ---------------------------------------------------------------------------
// FormEvent
// ---------------------------------------------------------------------------

/// An event emitted by the form core.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// A field edit went through; `model` is the full working model after
    /// the write. Emitted exactly once per accepted edit.
    Update { model: Model },
    /// Validation passed on submit; `model` is the validated snapshot.
    Submit { model: Model },
    /// The cancel action was triggered. No payload.
    Cancel,
    /// Validation failed on submit.
    ValidateFailed { error: ValidationError },
}

impl FormEvent {
    /// Event name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            FormEvent::Update { .. } => "update",
            FormEvent::Submit { .. } => "submit",
            FormEvent::Cancel => "cancel",
            FormEvent::ValidateFailed { .. } => "validate_failed",
        }
    }

    /// The model snapshot, for the variants that carry one.
    pub fn model(&self) -> Option<&Model> {
        match self {
            FormEvent::Update { model } | FormEvent::Submit { model } => Some(model),
            _ => None,
        }
    }

    /// The validation error, if this is `ValidateFailed`.
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            FormEvent::ValidateFailed { error } => Some(error),
            _ => None,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
