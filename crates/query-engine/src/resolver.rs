use crate::{
    context::OperatorContext,
    dictionary::Dictionary,
    error::{CompileError, Result},
    token::ValueToken,
};
use model::{Expr, QueryNode, Scope};
use tracing::trace;

/// Looks operators up in the dictionary and runs their generators.
pub(crate) struct Resolver<'a> {
    dictionary: &'a Dictionary,
    max_depth: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(dictionary: &'a Dictionary, max_depth: usize) -> Self {
        Self {
            dictionary,
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Generate the fragment for operator `key` applied to `value`.
    ///
    /// `field` is the field the operator was written under; `scope` is the
    /// enclosing scope. The generator must return a non-empty expression.
    pub fn resolve(
        &self,
        key: &str,
        value: &QueryNode,
        field: Option<&str>,
        scope: &Scope,
        depth: usize,
    ) -> Result<Expr> {
        let token = ValueToken::from_node(value);

        let generator = self
            .dictionary
            .get(key)
            .ok_or_else(|| CompileError::UnknownOperator {
                key: key.to_string(),
                valid: self
                    .dictionary
                    .operator_names()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })?;

        trace!(
            "Resolving operator '{}' with {} at {} (field: {:?}, depth: {})",
            key, token, scope, field, depth
        );

        let ctx = OperatorContext::new(self, key, scope, field, depth);
        let expr = generator.generate(&token, &ctx)?;

        if expr.is_empty() {
            return Err(CompileError::InvalidGeneratorResult {
                key: key.to_string(),
            });
        }

        Ok(expr)
    }
}
