use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::element::element_model::ElementDescriptor;

/// Largest integer a double holds exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

// ============================================================================
// Resolved values
// ============================================================================

/// A value extracted from a single element.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Parsed numeric input. NaN is kept as-is and encodes to `null`.
    Number(f64),
    /// Selected options of a multi-select, in option order.
    Selection(Vec<String>),
}

impl FieldValue {
    /// JSON shape sent onward: selections become positional objects
    /// (`{"0": "a", "1": "c"}`), integral numbers become JSON integers.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Number(n) => number_to_json(*n),
            FieldValue::Selection(items) => Value::Object(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), Value::String(v.clone())))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

fn number_to_json(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        // NaN and infinities have no JSON form
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// A single `{key: value}` pair produced by a resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    pub key: String,
    pub value: FieldValue,
}

impl FieldEntry {
    pub fn new(key: &str, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(self.key.clone(), self.value.to_json());
        Value::Object(map)
    }
}

// ============================================================================
// Resolver trait
// ============================================================================

/// Extracts a field value from an element it recognises.
///
/// Implementations must be pure: the decision to match is taken from the
/// descriptor's classification alone, and `None` means "not mine", never
/// "empty value".
pub trait Resolver: Send + Sync {
    fn name(&self) -> &str;

    fn try_resolve(&self, el: &ElementDescriptor, key: &str) -> Option<FieldEntry>;
}

/// Adapter turning a closure into a named resolver.
pub struct FnResolver<F> {
    name: String,
    resolve: F,
}

impl<F> FnResolver<F>
where
    F: Fn(&ElementDescriptor, &str) -> Option<FieldEntry> + Send + Sync,
{
    pub fn new(name: &str, resolve: F) -> Self {
        Self {
            name: name.to_string(),
            resolve,
        }
    }
}

impl<F> Resolver for FnResolver<F>
where
    F: Fn(&ElementDescriptor, &str) -> Option<FieldEntry> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn try_resolve(&self, el: &ElementDescriptor, key: &str) -> Option<FieldEntry> {
        (self.resolve)(el, key)
    }
}
