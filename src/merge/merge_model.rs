use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::merge::deep_merge::{clone_if_necessary, is_mergeable, merge, strict_equals};

// ============================================================================
// Array merge strategies
// ============================================================================

/// Policy for combining two arrays met at the same position during a merge.
pub trait ArrayMerge: Send + Sync {
    fn name(&self) -> &str;

    fn merge_arrays(&self, target: &[Value], source: &[Value], options: &MergeOptions) -> Vec<Value>;
}

/// Default strategy: positional merge for structured elements, set-like
/// append for scalars.
///
/// Starting from a copy of `target`, each source element at index `i` is
/// placed at `i` if that slot is still empty, merged into slot `i` if it is
/// an object or array, and appended if `target` does not already contain it.
pub struct UnionArrayMerge;

impl ArrayMerge for UnionArrayMerge {
    fn name(&self) -> &str {
        "union"
    }

    fn merge_arrays(&self, target: &[Value], source: &[Value], options: &MergeOptions) -> Vec<Value> {
        let mut destination = target.to_vec();

        for (i, e) in source.iter().enumerate() {
            if i >= destination.len() {
                destination.push(clone_if_necessary(e, options));
            } else if is_mergeable(e) {
                // slot i may hold an appended scalar rather than a target element
                let existing = target.get(i).unwrap_or(&Value::Null);
                destination[i] = merge(existing, e, options);
            } else if !target.iter().any(|t| strict_equals(t, e)) {
                destination.push(clone_if_necessary(e, options));
            }
        }

        destination
    }
}

/// Source array replaces the target array.
pub struct ReplaceArrayMerge;

impl ArrayMerge for ReplaceArrayMerge {
    fn name(&self) -> &str {
        "replace"
    }

    fn merge_arrays(&self, _target: &[Value], source: &[Value], options: &MergeOptions) -> Vec<Value> {
        source.iter().map(|e| clone_if_necessary(e, options)).collect()
    }
}

/// Target elements followed by every source element.
pub struct ConcatArrayMerge;

impl ArrayMerge for ConcatArrayMerge {
    fn name(&self) -> &str {
        "concat"
    }

    fn merge_arrays(&self, target: &[Value], source: &[Value], options: &MergeOptions) -> Vec<Value> {
        target
            .iter()
            .chain(source)
            .map(|e| clone_if_necessary(e, options))
            .collect()
    }
}

/// Built-in strategies selectable by name from config or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayMergeKind {
    #[default]
    Union,
    Replace,
    Concat,
}

impl ArrayMergeKind {
    pub fn strategy(self) -> Arc<dyn ArrayMerge> {
        match self {
            ArrayMergeKind::Union => Arc::new(UnionArrayMerge),
            ArrayMergeKind::Replace => Arc::new(ReplaceArrayMerge),
            ArrayMergeKind::Concat => Arc::new(ConcatArrayMerge),
        }
    }
}

impl FromStr for ArrayMergeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "union" => Ok(ArrayMergeKind::Union),
            "replace" => Ok(ArrayMergeKind::Replace),
            "concat" => Ok(ArrayMergeKind::Concat),
            other => Err(format!(
                "unknown array merge strategy '{}' (expected union, replace or concat)",
                other
            )),
        }
    }
}

// ============================================================================
// Options
// ============================================================================

#[derive(Clone)]
pub struct MergeOptions {
    /// Route every retained object/array through the merge again so that
    /// the array strategy also applies to branches present on one side only.
    pub clone: bool,

    pub array_merge: Arc<dyn ArrayMerge>,
}

impl MergeOptions {
    pub fn new() -> Self {
        Self {
            clone: false,
            array_merge: Arc::new(UnionArrayMerge),
        }
    }

    pub fn with_clone(mut self, clone: bool) -> Self {
        self.clone = clone;
        self
    }

    pub fn with_array_merge(mut self, strategy: Arc<dyn ArrayMerge>) -> Self {
        self.array_merge = strategy;
        self
    }

    pub fn with_array_merge_kind(self, kind: ArrayMergeKind) -> Self {
        self.with_array_merge(kind.strategy())
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MergeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeOptions")
            .field("clone", &self.clone)
            .field("array_merge", &self.array_merge.name())
            .finish()
    }
}
