use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-owned state visible to operator tests while a predicate runs.
///
/// The same context can be passed to many evaluations; whatever a test writes
/// stays there for the next one, which is what makes counters and other
/// order-dependent matching possible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionContext {
    vars: Map<String, Value>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.vars.get_mut(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.vars.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.vars.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Add `by` to the integer stored under `key` and return the new value.
    /// A missing or non-integer entry counts as zero. Saturates at the `i64`
    /// bounds.
    pub fn increment(&mut self, key: &str, by: i64) -> i64 {
        let next = self
            .vars
            .get(key)
            .and_then(Value::as_i64)
            .unwrap_or(0)
            .saturating_add(by);
        self.vars.insert(key.to_string(), Value::from(next));
        next
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.vars
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.vars
    }
}

impl From<Map<String, Value>> for ExecutionContext {
    fn from(vars: Map<String, Value>) -> Self {
        Self { vars }
    }
}
