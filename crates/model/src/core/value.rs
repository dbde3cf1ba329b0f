use serde_json::Value;
use std::cmp::Ordering;

/// Loose, script-like views over JSON values used by operator tests.
///
/// Inputs are evaluated against plain `serde_json::Value` documents, and most
/// operators only need a handful of coercions: truthiness for existence
/// guards, a `typeof`-style name, and numeric-aware comparison.
pub trait ValueExt {
    /// Truthiness used by existence guards: `null`, `false`, `0`, `NaN` and
    /// `""` are falsy, everything else (including empty objects) is truthy.
    fn is_truthy(&self) -> bool;

    /// Name of the value's type as a `typeof` check would report it.
    fn type_name(&self) -> &'static str;

    fn as_number(&self) -> Option<f64>;

    fn compare(&self, other: &Value) -> Option<Ordering>;

    fn equal(&self, other: &Value) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl ValueExt for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Null | Value::Array(_) | Value::Object(_) => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            // Containers only compare for equality.
            (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
                (self == other).then_some(Ordering::Equal)
            }
            _ => None,
        }
    }
}

/// `typeof` for a possibly missing value.
pub fn type_of(value: Option<&Value>) -> &'static str {
    value.map_or("undefined", ValueExt::type_name)
}

pub fn is_truthy(value: Option<&Value>) -> bool {
    value.is_some_and(ValueExt::is_truthy)
}
