use crate::execution::errors::ModelError;
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

/// A declarative query tree.
///
/// Mappings are conjunctions, lists are disjunctions and everything else is a
/// leaf value handed to an operator. Key order of a conjunction is kept, since
/// it decides the order of the generated terms.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "Value")]
pub enum QueryNode {
    Conjunction(IndexMap<String, QueryNode>),
    Disjunction(Vec<QueryNode>),
    Scalar(Value),
    Pattern(Regex),
}

impl QueryNode {
    pub fn conjunction<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, QueryNode)>,
    {
        QueryNode::Conjunction(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn disjunction<I>(branches: I) -> Self
    where
        I: IntoIterator<Item = QueryNode>,
    {
        QueryNode::Disjunction(branches.into_iter().collect())
    }

    pub fn pattern(source: &str) -> Result<Self, ModelError> {
        Regex::new(source)
            .map(QueryNode::Pattern)
            .map_err(|e| ModelError::InvalidPattern {
                pattern: source.to_string(),
                message: e.to_string(),
            })
    }

    /// Whether this node opens a deeper level below a field: a mapping or list
    /// with at least one entry. Empty containers are plain operator values.
    pub fn is_nested(&self) -> bool {
        match self {
            QueryNode::Conjunction(map) => !map.is_empty(),
            QueryNode::Disjunction(items) => !items.is_empty(),
            QueryNode::Scalar(_) | QueryNode::Pattern(_) => false,
        }
    }

    /// JSON form of the node. Patterns become their source string.
    pub fn to_json(&self) -> Value {
        match self {
            QueryNode::Conjunction(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            QueryNode::Disjunction(items) => {
                Value::Array(items.iter().map(QueryNode::to_json).collect())
            }
            QueryNode::Scalar(value) => value.clone(),
            QueryNode::Pattern(re) => Value::String(re.as_str().to_string()),
        }
    }
}

impl From<Value> for QueryNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => QueryNode::Conjunction(
                map.into_iter()
                    .map(|(k, v)| (k, QueryNode::from(v)))
                    .collect(),
            ),
            Value::Array(items) => {
                QueryNode::Disjunction(items.into_iter().map(QueryNode::from).collect())
            }
            other => QueryNode::Scalar(other),
        }
    }
}

impl From<Regex> for QueryNode {
    fn from(re: Regex) -> Self {
        QueryNode::Pattern(re)
    }
}

impl PartialEq for QueryNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (QueryNode::Conjunction(a), QueryNode::Conjunction(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            (QueryNode::Disjunction(a), QueryNode::Disjunction(b)) => a == b,
            (QueryNode::Scalar(a), QueryNode::Scalar(b)) => a == b,
            (QueryNode::Pattern(a), QueryNode::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}
