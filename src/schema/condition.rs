//! Conditions: literal or model-dependent flags on a field.
//!
//! Visibility and disablement are declared per field as a [`Condition`],
//! either a fixed boolean or a predicate over the current working model.
//! Predicates are re-evaluated on every render pass and never cached, so a
//! field that depends on another field's value reacts to edits immediately.

use crate::model::Model;

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// A per-field flag that is either fixed or computed from the working model.
pub enum Condition {
    /// A constant flag.
    Literal(bool),
    /// A predicate evaluated against the working model on each pass.
    Predicate(Box<dyn Fn(&Model) -> bool>),
}

impl Condition {
    /// A condition that always holds.
    pub fn always() -> Self {
        Condition::Literal(true)
    }

    /// A condition that never holds.
    pub fn never() -> Self {
        Condition::Literal(false)
    }

    /// A condition computed from the working model.
    pub fn when(predicate: impl Fn(&Model) -> bool + 'static) -> Self {
        Condition::Predicate(Box::new(predicate))
    }

    /// Evaluate against `model`. Literals ignore the model.
    pub fn evaluate(&self, model: &Model) -> bool {
        match self {
            Condition::Literal(flag) => *flag,
            Condition::Predicate(predicate) => predicate(model),
        }
    }

    /// Whether this is a constant rather than a predicate.
    pub fn is_literal(&self) -> bool {
        matches!(self, Condition::Literal(_))
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::never()
    }
}

impl From<bool> for Condition {
    fn from(flag: bool) -> Self {
        Condition::Literal(flag)
    }
}

impl std::fmt::Debug for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(flag) => write!(f, "Literal({flag})"),
            Self::Predicate(_) => write!(f, "Predicate(<fn>)"),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
