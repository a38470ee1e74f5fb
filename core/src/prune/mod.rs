//! Empty-field pruning for captured prompt structures.
//!
//! The prompt structure is an opaque `serde_json::Value` tree. Pruning drops
//! nulls and containers that end up empty, so the console dump only shows
//! fields the host actually filled in.

use std::borrow::Cow;

use serde_json::{Map, Value};

/// Same bound serde_json applies when parsing.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pruner {
    enabled: bool,
    max_depth: usize,
}

impl Default for Pruner {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Pruner {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Subtrees nested deeper than `max_depth` are kept as-is instead of pruned.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Returns the input itself when disabled or when there is nothing to prune.
    pub fn prune<'a>(&self, value: &'a Value) -> Cow<'a, Value> {
        if !self.enabled {
            return Cow::Borrowed(value);
        }
        match value {
            Value::Array(_) | Value::Object(_) => Cow::Owned(self.prune_at(value, 0)),
            _ => Cow::Borrowed(value),
        }
    }

    pub fn prune_owned(&self, value: Value) -> Value {
        match self.prune(&value) {
            Cow::Borrowed(_) => value,
            Cow::Owned(pruned) => pruned,
        }
    }

    fn prune_at(&self, value: &Value, depth: usize) -> Value {
        if depth >= self.max_depth {
            tracing::warn!(
                target: "prompt_debugger",
                max_depth = self.max_depth,
                "prune depth limit reached, subtree kept unpruned"
            );
            return value.clone();
        }

        match value {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .filter_map(|item| self.prune_element(item, depth + 1))
                    .collect(),
            ),
            Value::Object(fields) => {
                let mut out = Map::new();
                for (key, field) in fields {
                    if let Some(kept) = self.prune_field(field, depth + 1) {
                        out.insert(key.clone(), kept);
                    }
                }
                Value::Object(out)
            }
            other => other.clone(),
        }
    }

    // Empty strings stay inside sequences; only mapping values drop them.
    fn prune_element(&self, item: &Value, depth: usize) -> Option<Value> {
        if item.is_null() {
            return None;
        }
        let pruned = self.prune_at(item, depth);
        (!is_empty_container(&pruned)).then_some(pruned)
    }

    fn prune_field(&self, field: &Value, depth: usize) -> Option<Value> {
        match field {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            _ => {
                let pruned = self.prune_at(field, depth);
                (!is_empty_container(&pruned)).then_some(pruned)
            }
        }
    }
}

/// Prunes `value` with the default depth limit.
pub fn prune(value: &Value, enabled: bool) -> Cow<'_, Value> {
    Pruner::new(enabled).prune(value)
}

pub fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// Host-side truthiness: `null`, `false`, `0` and `""` count as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Number of nodes in the tree, containers included.
pub fn node_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(node_count).sum::<usize>(),
        Value::Object(fields) => 1 + fields.values().map(node_count).sum::<usize>(),
        _ => 1,
    }
}
