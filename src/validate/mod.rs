//! Validation: rules, the per-pass rule table, and the host seam.

pub mod host;
pub mod rules;

pub use host::{FieldError, RuleValidator, ValidationError, ValidationHost};
pub use rules::{CustomRule, Rule, RuleEntry, RuleTable};
