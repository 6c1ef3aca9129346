//! Validation rules and the per-pass rule table.
//!
//! Rules are declared on field descriptors and checked in declaration order.
//! Only [`Rule::Required`] rejects empty values; every other rule passes on
//! empty input so optional fields validate cleanly until filled in.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::Model;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// Custom rule callback: receives the whole working model plus the value
/// under check, and reports failure as the message to display.
pub type CustomRule = Box<dyn Fn(&Model, &Value) -> Result<(), String>>;

/// A single validation rule with its failure message.
pub enum Rule {
    /// The value must not be empty (see [`Value::is_empty`]).
    Required { message: String },
    /// Text length (in characters) or list length must be at least `min`.
    MinLength { min: usize, message: String },
    /// Text length (in characters) or list length must be at most `max`.
    MaxLength { max: usize, message: String },
    /// Numeric value must lie in `min..=max`.
    Range { min: f64, max: f64, message: String },
    /// Text must match the regular expression.
    Pattern { pattern: Regex, message: String },
    /// Text must look like an email address.
    Email { message: String },
    /// Arbitrary host-supplied check.
    Custom(CustomRule),
}

impl Rule {
    /// The value must be present and non-empty.
    pub fn required(message: impl Into<String>) -> Self {
        Rule::Required {
            message: message.into(),
        }
    }

    /// Minimum text or list length.
    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Rule::MinLength {
            min,
            message: message.into(),
        }
    }

    /// Maximum text or list length.
    pub fn max_length(max: usize, message: impl Into<String>) -> Self {
        Rule::MaxLength {
            max,
            message: message.into(),
        }
    }

    /// Inclusive numeric range.
    pub fn range(min: f64, max: f64, message: impl Into<String>) -> Self {
        Rule::Range {
            min,
            max,
            message: message.into(),
        }
    }

    /// Regular-expression match on text values.
    ///
    /// Fails if `pattern` is not a valid regular expression.
    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Rule::Pattern {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    /// Regular-expression match from a pre-compiled regex.
    pub fn pattern_from(pattern: Regex, message: impl Into<String>) -> Self {
        Rule::Pattern {
            pattern,
            message: message.into(),
        }
    }

    /// Email-shaped text.
    pub fn email(message: impl Into<String>) -> Self {
        Rule::Email {
            message: message.into(),
        }
    }

    /// Host-supplied check over the model and the value.
    pub fn custom(check: impl Fn(&Model, &Value) -> Result<(), String> + 'static) -> Self {
        Rule::Custom(Box::new(check))
    }

    /// Rule name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required { .. } => "required",
            Rule::MinLength { .. } => "min_length",
            Rule::MaxLength { .. } => "max_length",
            Rule::Range { .. } => "range",
            Rule::Pattern { .. } => "pattern",
            Rule::Email { .. } => "email",
            Rule::Custom(_) => "custom",
        }
    }

    /// Check `value` against this rule.
    ///
    /// Every rule except `Required` accepts empty values, so a `MinLength`
    /// on an optional field only bites once something was entered.
    pub fn check(&self, model: &Model, value: &Value) -> Result<(), String> {
        if !matches!(self, Rule::Required { .. } | Rule::Custom(_)) && value.is_empty() {
            return Ok(());
        }
        match self {
            Rule::Required { message } => {
                if value.is_empty() {
                    Err(message.clone())
                } else {
                    Ok(())
                }
            }
            Rule::MinLength { min, message } => match measured_length(value) {
                Some(len) if len < *min => Err(message.clone()),
                _ => Ok(()),
            },
            Rule::MaxLength { max, message } => match measured_length(value) {
                Some(len) if len > *max => Err(message.clone()),
                _ => Ok(()),
            },
            Rule::Range { min, max, message } => match value.as_number() {
                Some(n) if n < *min || n > *max => Err(message.clone()),
                _ => Ok(()),
            },
            Rule::Pattern { pattern, message } => match value.as_text() {
                Some(text) if !pattern.is_match(text) => Err(message.clone()),
                _ => Ok(()),
            },
            Rule::Email { message } => match value.as_text() {
                Some(text) if !email_regex().is_match(text) => Err(message.clone()),
                _ => Ok(()),
            },
            Rule::Custom(check) => check(model, value),
        }
    }
}

/// Length for the min/max rules: character count for text, element count
/// for lists. Other types have no length and pass.
fn measured_length(value: &Value) -> Option<usize> {
    match value {
        Value::Text(s) => Some(s.chars().count()),
        Value::List(items) => Some(items.len()),
        _ => None,
    }
}

/// WHATWG email shape, compiled once.
fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("email pattern is a valid regex")
    })
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Required { message } => write!(f, "Required({message:?})"),
            Rule::MinLength { min, message } => write!(f, "MinLength({min}, {message:?})"),
            Rule::MaxLength { max, message } => write!(f, "MaxLength({max}, {message:?})"),
            Rule::Range { min, max, message } => write!(f, "Range({min}..={max}, {message:?})"),
            Rule::Pattern { pattern, message } => {
                write!(f, "Pattern({:?}, {message:?})", pattern.as_str())
            }
            Rule::Email { message } => write!(f, "Email({message:?})"),
            Rule::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

// ---------------------------------------------------------------------------
// RuleTable
// ---------------------------------------------------------------------------

/// The rule set handed to the validation host for one pass.
///
/// Built fresh before every submit or explicit validation: one entry per
/// currently visible field that declares rules, in schema order. Hidden
/// fields never appear here even though their model entries persist.
#[derive(Debug, Default)]
pub struct RuleTable<'a> {
    entries: Vec<RuleEntry<'a>>,
}

/// One field's slice of the rule table.
#[derive(Debug)]
pub struct RuleEntry<'a> {
    /// Model key of the field.
    pub field: &'a str,
    /// The field's rules, in declaration order.
    pub rules: &'a [Rule],
}

impl<'a> RuleTable<'a> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field's rules. Skips fields with no rules.
    pub fn push(&mut self, field: &'a str, rules: &'a [Rule]) {
        if !rules.is_empty() {
            self.entries.push(RuleEntry { field, rules });
        }
    }

    /// Entries in schema order.
    pub fn entries(&self) -> &[RuleEntry<'a>] {
        &self.entries
    }

    /// Whether `field` has an entry.
    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|entry| entry.field == field)
    }

    /// Number of fields with rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no field has rules.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
