use crate::{context::OperatorContext, error::Result, token::ValueToken};
use indexmap::IndexMap;
use model::Expr;
use std::{fmt, sync::Arc};

/// An operator implementation.
///
/// A generator turns the operator's argument into an expression fragment. It
/// reads the current scope and field from the context and may compose other
/// operators through [`OperatorContext::call_operator`].
pub trait Generator: Send + Sync {
    fn generate(&self, token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr>;
}

impl<F> Generator for F
where
    F: Fn(&ValueToken, &OperatorContext<'_>) -> Result<Expr> + Send + Sync,
{
    fn generate(&self, token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
        self(token, ctx)
    }
}

/// Table of operators available to queries. Keys are matched exactly and
/// listed in registration order.
#[derive(Clone, Default)]
pub struct Dictionary {
    operators: IndexMap<String, Arc<dyn Generator>>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: &str, func: F) -> &mut Self
    where
        F: Fn(&ValueToken, &OperatorContext<'_>) -> Result<Expr> + Send + Sync + 'static,
    {
        self.operators.insert(name.to_string(), Arc::new(func));
        self
    }

    pub fn register_generator(&mut self, name: &str, generator: Arc<dyn Generator>) -> &mut Self {
        self.operators.insert(name.to_string(), generator);
        self
    }

    /// Builder-style [`Dictionary::register`].
    pub fn with<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&ValueToken, &OperatorContext<'_>) -> Result<Expr> + Send + Sync + 'static,
    {
        self.register(name, func);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Generator>> {
        self.operators.get(name)
    }

    pub fn has_operator(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    pub fn operator_names(&self) -> Vec<&str> {
        self.operators.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("operators", &self.operator_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(_token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
        Ok(Expr::Truthy(ctx.scope()))
    }

    #[test]
    fn test_registration_order_is_kept() {
        let dictionary = Dictionary::new()
            .with("zeta", always)
            .with("alpha", always)
            .with("mid", always);

        assert_eq!(dictionary.operator_names(), ["zeta", "alpha", "mid"]);
        assert_eq!(dictionary.len(), 3);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let dictionary = Dictionary::new().with("greaterThan", always);
        assert!(dictionary.has_operator("greaterThan"));
        assert!(!dictionary.has_operator("greaterthan"));
        assert!(dictionary.get("GREATERTHAN").is_none());
    }

    #[test]
    fn test_reregistering_replaces_in_place() {
        let mut dictionary = Dictionary::new();
        dictionary.register("a", always).register("b", always);
        dictionary.register_generator("a", Arc::new(always));

        assert_eq!(dictionary.operator_names(), ["a", "b"]);
    }
}
