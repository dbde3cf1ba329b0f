use crate::{core::scope::Scope, execution::context::ExecutionContext};
use serde_json::Value;
use std::{fmt, sync::Arc};

/// Signature of an operator test: the value found at the test's scope (if
/// any) and the caller's execution context.
pub type TestFn = dyn Fn(Option<&Value>, &mut ExecutionContext) -> bool + Send + Sync;

/// A single operator call produced by a generator.
///
/// `source` is the rendered form of the call. Two tests with the same scope
/// and source are treated as the same term, which is what the optimizer
/// relies on when it deduplicates and groups.
#[derive(Clone)]
pub struct Test {
    scope: Scope,
    source: String,
    check: Arc<TestFn>,
}

impl Test {
    pub fn new<F>(scope: Scope, source: impl Into<String>, check: F) -> Self
    where
        F: Fn(Option<&Value>, &mut ExecutionContext) -> bool + Send + Sync + 'static,
    {
        Self {
            scope,
            source: source.into(),
            check: Arc::new(check),
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Run the check against the root input.
    pub fn run(&self, input: Option<&Value>, ctx: &mut ExecutionContext) -> bool {
        (self.check)(self.scope.resolve(input), ctx)
    }
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Test")
            .field("scope", &self.scope)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Test {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && self.source == other.source
    }
}

/// Compiled boolean expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Bool(bool),
    /// The value at the scope is present and truthy.
    Truthy(Scope),
    /// The value at the scope has type `object` (objects, arrays, null).
    IsObject(Scope),
    Test(Test),
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

/// How sibling fragments are joined at a join point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn symbol(self) -> &'static str {
        match self {
            Connective::And => "&&",
            Connective::Or => "||",
        }
    }

    /// Join fragments, or `None` when there is nothing to join.
    pub fn join(self, parts: Vec<Expr>) -> Option<Expr> {
        if parts.is_empty() {
            return None;
        }
        Some(match self {
            Connective::And => Expr::and(parts),
            Connective::Or => Expr::or(parts),
        })
    }
}

impl Expr {
    /// Conjunction of `parts`. Nested conjunctions are spliced in and a
    /// single part is returned as is.
    pub fn and(parts: impl IntoIterator<Item = Expr>) -> Expr {
        let mut flat = Vec::new();
        for part in parts {
            match part {
                Expr::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            return flat.remove(0);
        }
        Expr::And(flat)
    }

    /// Disjunction of `parts`, flattened the same way as [`Expr::and`].
    pub fn or(parts: impl IntoIterator<Item = Expr>) -> Expr {
        let mut flat = Vec::new();
        for part in parts {
            match part {
                Expr::Or(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            return flat.remove(0);
        }
        Expr::Or(flat)
    }

    // Never folds `!!x` into `x`.
    pub fn not(inner: Expr) -> Expr {
        Expr::Not(Box::new(inner))
    }

    pub fn test<F>(scope: Scope, source: impl Into<String>, check: F) -> Expr
    where
        F: Fn(Option<&Value>, &mut ExecutionContext) -> bool + Send + Sync + 'static,
    {
        Expr::Test(Test::new(scope, source, check))
    }

    /// An expression with no condition in it, such as `And([])`.
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::And(parts) | Expr::Or(parts) => parts.iter().all(Expr::is_empty),
            Expr::Not(inner) => inner.is_empty(),
            Expr::Bool(_) | Expr::Truthy(_) | Expr::IsObject(_) | Expr::Test(_) => false,
        }
    }

    /// Top-level conjunction terms, in order. Nested conjunctions are walked
    /// through; any other node is a single term.
    pub fn terms(&self) -> Vec<&Expr> {
        match self {
            Expr::And(parts) => parts.iter().flat_map(Expr::terms).collect(),
            other => vec![other],
        }
    }

    /// Number of AND/OR connectives in the expression.
    pub fn connective_count(&self) -> usize {
        match self {
            Expr::And(parts) | Expr::Or(parts) => {
                parts.len().saturating_sub(1)
                    + parts.iter().map(Expr::connective_count).sum::<usize>()
            }
            Expr::Not(inner) => inner.connective_count(),
            Expr::Bool(_) | Expr::Truthy(_) | Expr::IsObject(_) | Expr::Test(_) => 0,
        }
    }
}
