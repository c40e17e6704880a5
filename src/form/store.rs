use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::form::form_model::FormData;
use crate::resolver::resolver_model::FieldValue;
use crate::trace::{logger::TraceLogger, trace::TraceEvent};

/// Per-form accumulation of field values, keyed by form id.
///
/// A form is created once and only ever mutated in place afterwards.
/// Misuse (duplicate ids, writes to unknown forms) is reported to the trace
/// logger and otherwise ignored. Mutation goes through `&mut self`; callers
/// sharing a store across threads wrap it in a `Mutex`.
pub struct FormStore {
    forms: IndexMap<String, FormData>,
    tracer: Arc<TraceLogger>,
}

impl FormStore {
    pub fn new(tracer: Arc<TraceLogger>) -> Self {
        Self {
            forms: IndexMap::new(),
            tracer,
        }
    }

    /// Create an empty form. Returns false, leaving data untouched, if the id
    /// is already taken.
    pub fn put_form(&mut self, form_id: &str) -> bool {
        if self.forms.contains_key(form_id) {
            self.tracer.log(
                &TraceEvent::warn("duplicate_form")
                    .with_form(form_id)
                    .with_message(format!("a form with id '{}' already exists", form_id)),
            );
            return false;
        }

        self.forms.insert(form_id.to_string(), FormData::new());
        true
    }

    /// Copy of the form's current values; empty if the form does not exist.
    /// Mutating the copy never affects the store.
    pub fn get_form(&self, form_id: &str) -> FormData {
        self.forms.get(form_id).cloned().unwrap_or_default()
    }

    /// Borrowed view of a form, without copying.
    pub fn form(&self, form_id: &str) -> Option<&FormData> {
        self.forms.get(form_id)
    }

    /// Set `key` in an existing form. Returns false, with no mutation, if the
    /// form does not exist.
    pub fn put_value_in_form(&mut self, form_id: &str, key: &str, value: FieldValue) -> bool {
        match self.forms.get_mut(form_id) {
            Some(form) => {
                form.set(key, value);
                true
            }
            None => {
                self.tracer.log(
                    &TraceEvent::warn("unknown_form")
                        .with_form(form_id)
                        .with_key(key)
                        .with_message(format!("no form with id '{}'", form_id)),
                );
                false
            }
        }
    }

    pub fn contains_form(&self, form_id: &str) -> bool {
        self.forms.contains_key(form_id)
    }

    /// Form ids in creation order.
    pub fn form_ids(&self) -> impl Iterator<Item = &str> {
        self.forms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Every form as `{form_id: {key: value}}`, in creation order.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .forms
            .iter()
            .map(|(id, form)| (id.clone(), form.to_json()))
            .collect();
        Value::Object(map)
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new(Arc::new(TraceLogger::disabled()))
    }
}
