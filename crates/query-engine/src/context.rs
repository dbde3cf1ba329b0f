use crate::{
    error::{CompileError, Result},
    resolver::Resolver,
};
use model::{Expr, QueryNode, Scope};
use tracing::warn;

/// Capabilities handed to a generator while it builds its fragment.
///
/// The context is created per operator call and is never shared, so a
/// generator can't observe another call's scope or field.
pub struct OperatorContext<'a> {
    resolver: &'a Resolver<'a>,
    operator: &'a str,
    scope: &'a Scope,
    field: Option<&'a str>,
    depth: usize,
}

impl<'a> OperatorContext<'a> {
    pub(crate) fn new(
        resolver: &'a Resolver<'a>,
        operator: &'a str,
        scope: &'a Scope,
        field: Option<&'a str>,
        depth: usize,
    ) -> Self {
        Self {
            resolver,
            operator,
            scope,
            field,
            depth,
        }
    }

    /// Name of the operator being generated.
    pub fn operator(&self) -> &str {
        self.operator
    }

    /// The field the operator applies to, if it was written under one.
    pub fn field_name(&self) -> Option<&str> {
        self.field
    }

    /// Scope of the value under test: the enclosing scope extended by the
    /// field name, or the enclosing scope itself for shorthand operators.
    pub fn scope(&self) -> Scope {
        match self.field {
            Some(field) => self.scope.child(field),
            None => self.scope.clone(),
        }
    }

    /// The enclosing scope extended by an explicit key.
    pub fn scope_with(&self, key: &str) -> Scope {
        self.scope.child(key)
    }

    /// How many `call_operator` levels deep this call is.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Generate another operator's fragment for the same scope and field.
    pub fn call_operator(&self, key: &str, value: impl Into<QueryNode>) -> Result<Expr> {
        let limit = self.resolver.max_depth();
        if self.depth + 1 > limit {
            warn!(
                "Operator '{}' hit the composition depth limit of {} while calling '{}'",
                self.operator, limit, key
            );
            return Err(CompileError::RecursionLimit {
                key: key.to_string(),
                limit,
            });
        }

        self.resolver
            .resolve(key, &value.into(), self.field, self.scope, self.depth + 1)
    }

    /// Failure attributed to the current operator.
    pub fn fail(&self, message: impl Into<String>) -> CompileError {
        CompileError::failure(self.operator, message)
    }
}
