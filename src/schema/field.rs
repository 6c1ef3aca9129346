//! Field descriptors: the per-field configuration unit.
//!
//! A [`FieldDescriptor`] declares one control: its model key, label, control
//! kind, default, choices, visibility/disablement conditions, validation
//! rules, and an optional custom render function. Descriptors are built once
//! by the caller and never mutated by the form.

use std::any::Any;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::condition::Condition;
use crate::model::Model;
use crate::validate::Rule;
use crate::value::Value;

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// The built-in control kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text input.
    Input,
    /// Multi-line text input.
    Textarea,
    /// Numeric stepper.
    Number,
    /// Single choice from a dropdown.
    Select,
    /// Single choice from a radio group.
    Radio,
    /// Multiple choices from a checkbox group.
    Checkbox,
    /// Boolean toggle.
    Switch,
    /// Calendar date picker.
    Date,
    /// Date and time picker.
    DateTime,
    /// Host-rendered control; the core only tracks its value.
    Custom,
}

impl FieldKind {
    /// Lowercase name, matching the serde representation.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Input => "input",
            FieldKind::Textarea => "textarea",
            FieldKind::Number => "number",
            FieldKind::Select => "select",
            FieldKind::Radio => "radio",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Switch => "switch",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime",
            FieldKind::Custom => "custom",
        }
    }

    /// The value seeded for this kind when neither the external model nor
    /// the descriptor provides one.
    ///
    /// Text-like kinds (including radio groups) start as empty text,
    /// switches as `false`, checkbox groups as an empty list, numbers as
    /// zero. Pickers and selects start with no value at all.
    pub fn default_value(&self) -> Value {
        match self {
            FieldKind::Input | FieldKind::Textarea | FieldKind::Radio => {
                Value::Text(String::new())
            }
            FieldKind::Switch => Value::Bool(false),
            FieldKind::Checkbox => Value::List(Vec::new()),
            FieldKind::Number => Value::Number(0.0),
            FieldKind::Date | FieldKind::DateTime | FieldKind::Select | FieldKind::Custom => {
                Value::Null
            }
        }
    }

    /// Whether this kind carries a list of [`ChoiceOption`]s.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FieldKind::Select | FieldKind::Radio | FieldKind::Checkbox
        )
    }

    /// Verb used when deriving a placeholder from the label.
    fn placeholder_verb(&self) -> &'static str {
        match self {
            FieldKind::Select | FieldKind::Date | FieldKind::DateTime => "Select",
            _ => "Enter",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ChoiceOption
// ---------------------------------------------------------------------------

/// One selectable option of a select, radio, or checkbox field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Text shown to the user.
    pub label: String,
    /// Value written to the model when chosen.
    pub value: Value,
    /// Whether the option can be chosen.
    #[serde(default)]
    pub disabled: bool,
}

impl ChoiceOption {
    /// An enabled option.
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            disabled: false,
        }
    }

    /// Mark the option as not selectable.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

// ---------------------------------------------------------------------------
// FieldDescriptor
// ---------------------------------------------------------------------------

/// Host-supplied control factory for [`FieldKind::Custom`] and overrides.
///
/// The returned payload is opaque to the core; a host downcasts it to its
/// own node type.
pub type RenderFn = Box<dyn Fn(&Model) -> Box<dyn Any>>;

/// Declarative configuration for a single form field.
pub struct FieldDescriptor {
    /// Model key. Must be unique within a schema.
    pub name: String,
    /// Label shown next to the control.
    pub label: String,
    /// Which control the field uses.
    pub kind: FieldKind,
    /// Explicit seed value; overrides the kind default.
    pub default: Option<Value>,
    /// Explicit placeholder; see [`effective_placeholder`](Self::effective_placeholder).
    pub placeholder: Option<String>,
    /// Choices for select, radio, and checkbox kinds.
    pub options: Vec<ChoiceOption>,
    /// Grid columns this field occupies; layout default applies when `None`.
    pub span: Option<u16>,
    /// When the condition holds, the field is skipped by the render pass
    /// and its rules drop out of the rule table. Its model entry stays.
    pub hidden: Condition,
    /// When the condition holds, the control is shown but not editable.
    pub disabled: Condition,
    /// Validation rules, checked in declaration order.
    pub rules: Vec<Rule>,
    /// Custom control factory; overridden only by slot content.
    pub render: Option<RenderFn>,
    /// Extra control attributes passed through to the host untouched.
    pub control_props: BTreeMap<String, Value>,
}

impl FieldDescriptor {
    /// A descriptor with no default, no rules, and literal-false conditions.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            default: None,
            placeholder: None,
            options: Vec::new(),
            span: None,
            hidden: Condition::never(),
            disabled: Condition::never(),
            rules: Vec::new(),
            render: None,
            control_props: BTreeMap::new(),
        }
    }

    // --- kind shorthands ---

    /// Shorthand for [`FieldKind::Input`].
    pub fn input(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Input)
    }

    /// Shorthand for [`FieldKind::Textarea`].
    pub fn textarea(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Textarea)
    }

    /// Shorthand for [`FieldKind::Number`].
    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    /// Shorthand for [`FieldKind::Select`].
    pub fn select(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Select)
    }

    /// Shorthand for [`FieldKind::Radio`].
    pub fn radio(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Radio)
    }

    /// Shorthand for [`FieldKind::Checkbox`].
    pub fn checkbox(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    /// Shorthand for [`FieldKind::Switch`].
    pub fn switch(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Switch)
    }

    /// Shorthand for [`FieldKind::Date`].
    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    /// Shorthand for [`FieldKind::DateTime`].
    pub fn datetime(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::DateTime)
    }

    /// Shorthand for [`FieldKind::Custom`].
    pub fn custom(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Custom)
    }

    // --- builders ---

    /// Seed value used instead of the kind default.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Explicit placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Replace the choice list.
    pub fn with_options(mut self, options: impl IntoIterator<Item = ChoiceOption>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    /// Append one choice.
    pub fn with_option(mut self, option: ChoiceOption) -> Self {
        self.options.push(option);
        self
    }

    /// Grid columns this field occupies.
    pub fn with_span(mut self, span: u16) -> Self {
        self.span = Some(span);
        self
    }

    /// Hide the field when the condition holds.
    pub fn hidden_when(mut self, condition: impl Into<Condition>) -> Self {
        self.hidden = condition.into();
        self
    }

    /// Disable the control when the condition holds.
    pub fn disabled_when(mut self, condition: impl Into<Condition>) -> Self {
        self.disabled = condition.into();
        self
    }

    /// Append one validation rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append several validation rules.
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Install a custom control factory.
    pub fn with_render(mut self, render: impl Fn(&Model) -> Box<dyn Any> + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Attach one pass-through control attribute.
    pub fn with_control_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.control_props.insert(key.into(), value.into());
        self
    }

    // --- derived accessors ---

    /// The seed value: explicit default if given, kind default otherwise.
    pub fn default_value(&self) -> Value {
        self.default
            .clone()
            .unwrap_or_else(|| self.kind.default_value())
    }

    /// The placeholder shown in the control: the explicit one if given,
    /// otherwise derived from the label ("Enter Name", "Select Due date").
    pub fn effective_placeholder(&self) -> String {
        match &self.placeholder {
            Some(text) => text.clone(),
            None => format!("{} {}", self.kind.placeholder_verb(), self.label),
        }
    }
}

impl std::fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("placeholder", &self.placeholder)
            .field("options", &self.options)
            .field("span", &self.span)
            .field("hidden", &self.hidden)
            .field("disabled", &self.disabled)
            .field("rules", &self.rules)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .field("control_props", &self.control_props)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
