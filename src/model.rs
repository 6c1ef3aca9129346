//! Model: a named collection of field values.
//!
//! Both sides of the synchronizer speak this type. The host hands one in as
//! the external model, the form mutates its own working copy, and every
//! update event carries a full snapshot back out. Entries are keyed by field
//! name and kept in sorted order so snapshots and serialized output are
//! deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// An ordered map from field name to [`Value`].
///
/// Serializes as a plain JSON object, so an external model can be built
/// straight from host data:
///
/// ```ignore
/// let model: Model = serde_json::from_str(r#"{"name": "Ada", "age": 36}"#)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model {
    entries: BTreeMap<String, Value>,
}

impl Model {
    /// An empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the model has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `name` has an entry, even a null one.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Borrow the value for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Insert or replace the value for `name`, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Remove the entry for `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Iterate field names in key order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Copy every entry of `incoming` whose value differs from (or is absent
    /// in) this model. Entries only present here are left alone. Returns the
    /// number of entries written.
    pub fn merge_changed(&mut self, incoming: &Model) -> usize {
        let mut written = 0;
        for (name, value) in incoming.iter() {
            if self.get(name) != Some(value) {
                self.entries.insert(name.clone(), value.clone());
                written += 1;
            }
        }
        written
    }
}

impl FromIterator<(String, Value)> for Model {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(&str, Value); N]> for Model {
    fn from(pairs: [(&str, Value); N]) -> Self {
        pairs
            .into_iter()
            .map(|(name, value)| (name.to_owned(), value))
            .collect()
    }
}

impl IntoIterator for Model {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Model {
        Model::from([
            ("name", Value::from("Ada")),
            ("age", Value::from(36)),
            ("active", Value::Bool(true)),
        ])
    }

    // ── Basics ───────────────────────────────────────────────────────

    #[test]
    fn set_and_get() {
        let mut model = Model::new();
        assert!(model.is_empty());
        assert_eq!(model.set("name", "Ada"), None);
        assert_eq!(model.get("name"), Some(&Value::from("Ada")));
        assert_eq!(model.set("name", "Grace"), Some(Value::from("Ada")));
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn with_builds_incrementally() {
        let model = Model::new().with("a", 1).with("b", "two");
        assert_eq!(model.len(), 2);
        assert_eq!(model.get("b"), Some(&Value::from("two")));
    }

    #[test]
    fn contains_null_entries() {
        let mut model = Model::new();
        model.set("due", Value::Null);
        assert!(model.contains("due"));
        assert!(!model.contains("missing"));
    }

    #[test]
    fn remove_returns_value() {
        let mut model = sample();
        assert_eq!(model.remove("age"), Some(Value::from(36)));
        assert_eq!(model.remove("age"), None);
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn iteration_is_key_ordered() {
        let model = sample();
        let keys: Vec<_> = model.keys().map(String::as_str).collect();
        assert_eq!(keys, ["active", "age", "name"]);
    }

    // ── merge_changed ────────────────────────────────────────────────

    #[test]
    fn merge_changed_copies_only_differences() {
        let mut working = sample();
        let mut incoming = sample();
        incoming.set("name", "Grace");

        assert_eq!(working.merge_changed(&incoming), 1);
        assert_eq!(working.get("name"), Some(&Value::from("Grace")));
        assert_eq!(working.get("age"), Some(&Value::from(36)));
    }

    #[test]
    fn merge_changed_with_identical_models_writes_nothing() {
        let mut working = sample();
        let incoming = sample();
        assert_eq!(working.merge_changed(&incoming), 0);
        assert_eq!(working, sample());
    }

    #[test]
    fn merge_changed_adds_new_keys_and_keeps_local_ones() {
        let mut working = Model::from([("local", Value::from("kept"))]);
        let incoming = Model::from([("remote", Value::from("added"))]);

        assert_eq!(working.merge_changed(&incoming), 1);
        assert_eq!(working.get("local"), Some(&Value::from("kept")));
        assert_eq!(working.get("remote"), Some(&Value::from("added")));
    }

    // ── Serde ────────────────────────────────────────────────────────

    #[test]
    fn deserializes_from_plain_json_object() {
        let model: Model =
            serde_json::from_str(r#"{"name": "Ada", "age": 36, "tags": ["a"], "due": null}"#)
                .unwrap();
        assert_eq!(model.get("name"), Some(&Value::from("Ada")));
        assert_eq!(model.get("age"), Some(&Value::Number(36.0)));
        assert_eq!(model.get("tags"), Some(&Value::List(vec![Value::from("a")])));
        assert_eq!(model.get("due"), Some(&Value::Null));
    }

    #[test]
    fn serializes_as_plain_json_object() {
        let model = Model::from([("name", Value::from("Ada"))]);
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#"{"name":"Ada"}"#);
    }
}
