use model::QueryNode;
use regex::Regex;
use serde_json::Value;
use std::fmt;

/// The argument of an operator as a generator sees it.
///
/// Patterns are handed over untouched. Every other argument is a JSON value
/// together with its literal text, ready to embed in rendered output.
#[derive(Debug, Clone)]
pub enum ValueToken {
    Literal { value: Value, source: String },
    Pattern(Regex),
}

impl ValueToken {
    pub fn literal(value: Value) -> Self {
        let source = value.to_string();
        ValueToken::Literal { value, source }
    }

    pub fn from_node(node: &QueryNode) -> Self {
        match node {
            QueryNode::Pattern(re) => ValueToken::Pattern(re.clone()),
            other => ValueToken::literal(other.to_json()),
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            ValueToken::Literal { value, .. } => Some(value),
            ValueToken::Pattern(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value().and_then(Value::as_str)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value().and_then(Value::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.value().and_then(Value::as_bool)
    }

    pub fn as_pattern(&self) -> Option<&Regex> {
        match self {
            ValueToken::Pattern(re) => Some(re),
            ValueToken::Literal { .. } => None,
        }
    }
}

impl fmt::Display for ValueToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueToken::Literal { source, .. } => f.write_str(source),
            ValueToken::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}
