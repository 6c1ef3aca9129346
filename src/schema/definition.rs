//! Schema: the ordered field list driving one form.
//!
//! A schema owns its descriptors in declaration order. It can seed a working
//! model from an external one and build the per-pass rule table. Descriptor
//! configuration is trusted input: duplicate names or nonsense spans are the
//! caller's bug, not something the schema checks for.

use super::field::FieldDescriptor;
use crate::model::Model;
use crate::validate::RuleTable;

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// An ordered collection of [`FieldDescriptor`]s.
#[derive(Debug, Default)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Build a schema from descriptors, keeping their order.
    pub fn new(fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a descriptor by model key.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build the initial working model.
    ///
    /// Starts from a copy of `external` (undeclared keys included), then
    /// back-fills every declared field that has no entry yet with its
    /// descriptor default or kind default. Present entries are kept as-is,
    /// null ones included.
    pub fn seed(&self, external: &Model) -> Model {
        let mut working = external.clone();
        for field in &self.fields {
            if !working.contains(&field.name) {
                working.set(field.name.clone(), field.default_value());
            }
        }
        working
    }

    /// Build the rule table for one pass.
    ///
    /// One entry per visible field with rules, in schema order. Hidden
    /// fields are skipped entirely; their model entries survive, but their
    /// rules must not block a submit while the control is not on screen.
    pub fn rule_table<'a>(&'a self, model: &'a Model) -> RuleTable<'a> {
        let mut table = RuleTable::new();
        for field in self.visible_fields(model) {
            table.push(&field.name, &field.rules);
        }
        table
    }

    /// Descriptors whose hidden condition does not hold for `model`,
    /// in schema order. Evaluated fresh on every call.
    pub fn visible_fields<'a>(
        &'a self,
        model: &'a Model,
    ) -> impl Iterator<Item = &'a FieldDescriptor> {
        self.fields
            .iter()
            .filter(move |field| !field.hidden.evaluate(model))
    }
}

impl FromIterator<FieldDescriptor> for Schema {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
