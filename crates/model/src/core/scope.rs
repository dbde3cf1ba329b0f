use serde_json::Value;
use std::{fmt, sync::Arc};

/// Accessor path into an input value.
///
/// A scope is a root name (the identifier the input is bound to in rendered
/// output) plus the keys walked from it. Scopes are extended by value; a
/// parent scope is never modified by descending into a child.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scope {
    root: Arc<str>,
    segments: Vec<String>,
}

impl Scope {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            root: Arc::from(name.into()),
            segments: Vec::new(),
        }
    }

    /// A new scope one level below this one.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(key.into());

        Self {
            root: Arc::clone(&self.root),
            segments,
        }
    }

    pub fn root_name(&self) -> &str {
        &self.root
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Walk the path through `input`. Object members are looked up by key,
    /// array elements by a key that parses as an index. Anything else, or a
    /// missing step, yields `None`.
    pub fn resolve<'v>(&self, input: Option<&'v Value>) -> Option<&'v Value> {
        self.segments
            .iter()
            .try_fold(input?, |current, key| match current {
                Value::Object(map) => map.get(key),
                Value::Array(items) => index(key).and_then(|i| items.get(i)),
                _ => None,
            })
    }
}

/// A key names an array element only in canonical form: no sign, no leading
/// zero.
fn index(key: &str) -> Option<usize> {
    key.parse::<usize>().ok().filter(|i| i.to_string() == key)
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for key in &self.segments {
            let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
            write!(f, "[{quoted}]")?;
        }
        Ok(())
    }
}
