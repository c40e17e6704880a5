use serde_json::{Map, Value};

use crate::resolver::resolver_model::{FieldEntry, FieldValue};

/// Field values collected for one form, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    entries: Vec<FieldEntry>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, overwriting any previous value in place.
    pub fn set(&mut self, key: &str, value: FieldValue) {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.value = value,
            None => self.entries.push(FieldEntry {
                key: key.to_string(),
                value,
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain `{key: value}` object, ready to be merged or sent.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|e| (e.key.clone(), e.value.to_json()))
                .collect::<Map<String, Value>>(),
        )
    }
}
