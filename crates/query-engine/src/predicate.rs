use crate::{eval::Evaluator, render::render_function};
use model::{ExecutionContext, Expr};
use serde_json::Value;
use std::{cell::RefCell, fmt};

/// A compiled query.
///
/// A predicate with no expression came from a query without constraints and
/// matches every input, including a missing one.
#[derive(Debug, Clone)]
pub struct Predicate {
    expr: Option<Expr>,
    entry_name: String,
}

impl Predicate {
    pub(crate) fn new(expr: Option<Expr>, entry_name: impl Into<String>) -> Self {
        Self {
            expr,
            entry_name: entry_name.into(),
        }
    }

    pub fn expr(&self) -> Option<&Expr> {
        self.expr.as_ref()
    }

    pub fn is_vacuous(&self) -> bool {
        self.expr.is_none()
    }

    /// Test a possibly missing input with the caller's context.
    pub fn evaluate(&self, input: Option<&Value>, ctx: &mut ExecutionContext) -> bool {
        self.expr
            .as_ref()
            .is_none_or(|expr| expr.evaluate(input, ctx))
    }

    /// Test `input` with a fresh, throwaway context.
    pub fn matches(&self, input: &Value) -> bool {
        self.evaluate(Some(input), &mut ExecutionContext::new())
    }

    pub fn matches_with(&self, input: &Value, ctx: &mut ExecutionContext) -> bool {
        self.evaluate(Some(input), ctx)
    }

    /// Keep the matching values. One context is shared by the whole pass.
    pub fn filter<'v, I>(&self, values: I) -> Vec<&'v Value>
    where
        I: IntoIterator<Item = &'v Value>,
    {
        let mut ctx = ExecutionContext::new();
        values
            .into_iter()
            .filter(|value| self.matches_with(value, &mut ctx))
            .collect()
    }

    /// Attach a context that lives as long as the returned predicate.
    pub fn bind(self, ctx: ExecutionContext) -> BoundPredicate {
        BoundPredicate {
            predicate: self,
            ctx: RefCell::new(ctx),
        }
    }

    /// Rendered source of the predicate.
    pub fn source(&self) -> String {
        render_function(self.expr.as_ref(), &self.entry_name)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source())
    }
}

/// A predicate carrying its own execution context.
///
/// Every call sees what earlier calls left in the context. The context sits in
/// a `RefCell`, so a bound predicate is not `Sync`; callers that share one
/// across threads have to wrap it themselves.
#[derive(Debug)]
pub struct BoundPredicate {
    predicate: Predicate,
    ctx: RefCell<ExecutionContext>,
}

impl BoundPredicate {
    pub fn matches(&self, input: &Value) -> bool {
        self.evaluate(Some(input))
    }

    pub fn evaluate(&self, input: Option<&Value>) -> bool {
        let mut ctx = self.ctx.borrow_mut();
        self.predicate.evaluate(input, &mut ctx)
    }

    pub fn filter<'v, I>(&self, values: I) -> Vec<&'v Value>
    where
        I: IntoIterator<Item = &'v Value>,
    {
        values.into_iter().filter(|value| self.matches(value)).collect()
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Snapshot of the current context.
    pub fn context(&self) -> ExecutionContext {
        self.ctx.borrow().clone()
    }

    pub fn into_context(self) -> ExecutionContext {
        self.ctx.into_inner()
    }
}
