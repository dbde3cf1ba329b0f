use crate::{error::Result, optimize::Optimizer, resolver::Resolver, settings::CompileOptions};
use model::{Connective, Expr, QueryNode, Scope};

/// Walks a query tree and turns it into an expression.
///
/// Every method returns `None` for a part of the query that carries no
/// constraint; such parts are dropped by the caller, so an empty query is
/// vacuously true.
pub(crate) struct QueryCompiler<'a> {
    resolver: Resolver<'a>,
    options: &'a CompileOptions,
    optimizer: Optimizer,
}

impl<'a> QueryCompiler<'a> {
    pub fn new(resolver: Resolver<'a>, options: &'a CompileOptions) -> Self {
        Self {
            resolver,
            options,
            optimizer: Optimizer::new(),
        }
    }

    pub fn compile_query(&self, node: &QueryNode, scope: &Scope) -> Result<Option<Expr>> {
        match node {
            QueryNode::Disjunction(branches) => {
                let mut fragments = Vec::with_capacity(branches.len());
                for branch in branches {
                    fragments.extend(self.compile_query(branch, scope)?);
                }
                Ok(self.join(fragments, Connective::Or))
            }
            QueryNode::Conjunction(entries) => {
                let mut fragments = Vec::with_capacity(entries.len());
                for (name, value) in entries {
                    fragments.extend(self.compile_property(name, value, scope)?);
                }
                Ok(self.join(fragments, Connective::And))
            }
            QueryNode::Scalar(_) | QueryNode::Pattern(_) => Ok(None),
        }
    }

    pub fn compile_property(
        &self,
        name: &str,
        value: &QueryNode,
        scope: &Scope,
    ) -> Result<Option<Expr>> {
        if name == self.options.negation_key {
            return Ok(self.compile_query(value, scope)?.map(Expr::not));
        }

        match value {
            QueryNode::Disjunction(branches) => {
                let mut fragments = Vec::with_capacity(branches.len());
                for branch in branches {
                    fragments.extend(self.compile_property(name, branch, scope)?);
                }
                Ok(self.join(fragments, Connective::Or))
            }
            QueryNode::Conjunction(entries) => {
                let mut fragments = Vec::with_capacity(entries.len());
                for (key, nested) in entries {
                    let fragment = if *key == self.options.negation_key {
                        self.compile_property(name, nested, scope)?.map(Expr::not)
                    } else if nested.is_nested() {
                        let child = scope.child(name);
                        self.compile_property(key, nested, &child)?.map(|inner| {
                            Expr::and([
                                Expr::Truthy(scope.clone()),
                                Expr::Truthy(child.clone()),
                                Expr::IsObject(child),
                                inner,
                            ])
                        })
                    } else {
                        let test = self.resolver.resolve(key, nested, Some(name), scope, 0)?;
                        Some(Expr::and([Expr::Truthy(scope.clone()), test]))
                    };
                    fragments.extend(fragment);
                }
                Ok(self.join(fragments, Connective::And))
            }
            // `{ name: value }` with no operator object: `name` is the operator.
            QueryNode::Scalar(_) | QueryNode::Pattern(_) => {
                self.resolver.resolve(name, value, None, scope, 0).map(Some)
            }
        }
    }

    fn join(&self, fragments: Vec<Expr>, connective: Connective) -> Option<Expr> {
        let fragments = if self.options.optimize {
            self.optimizer.optimize(fragments, connective)
        } else {
            fragments
        };
        connective.join(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::OperatorContext, dictionary::Dictionary, error::CompileError, render::render,
        token::ValueToken,
    };
    use serde_json::json;

    fn dictionary() -> Dictionary {
        Dictionary::new()
            .with("show", |_: &ValueToken, ctx: &OperatorContext<'_>| {
                Ok(Expr::Truthy(ctx.scope()))
            })
            .with("equals", |token: &ValueToken, ctx: &OperatorContext<'_>| {
                let scope = ctx.scope();
                let expected = token.value().cloned().unwrap_or_default();
                let source = format!("{scope} === {token}");
                Ok(Expr::test(scope, source, move |v, _| v == Some(&expected)))
            })
    }

    fn compile(query: serde_json::Value, options: &CompileOptions) -> Result<Option<Expr>> {
        let dictionary = dictionary();
        let compiler = QueryCompiler::new(Resolver::new(&dictionary, 8), options);
        compiler.compile_query(&QueryNode::from(query), &Scope::root("entry"))
    }

    fn rendered(query: serde_json::Value) -> String {
        compile(query, &CompileOptions::default())
            .unwrap()
            .map(|expr| render(&expr))
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_queries_carry_no_constraint() {
        let options = CompileOptions::default();
        assert_eq!(compile(json!({}), &options).unwrap(), None);
        assert_eq!(compile(json!([]), &options).unwrap(), None);
        assert_eq!(compile(json!([{}, []]), &options).unwrap(), None);
        assert_eq!(compile(json!({ "!not": {} }), &options).unwrap(), None);
        assert_eq!(compile(json!({ "foo": [] }), &options).unwrap(), None);
        assert_eq!(compile(json!("loose"), &options).unwrap(), None);
    }

    #[test]
    fn test_shorthand_operator_uses_enclosing_scope() {
        assert_eq!(rendered(json!({ "show": "" })), "entry");
    }

    #[test]
    fn test_leaf_is_guarded_by_enclosing_scope() {
        assert_eq!(rendered(json!({ "one": { "show": "" } })), r#"entry&&entry["one"]"#);
    }

    #[test]
    fn test_nesting_adds_type_guard() {
        assert_eq!(
            rendered(json!({ "one": { "two": { "show": "" } } })),
            r#"entry&&entry["one"]&&typeof entry["one"] === "object"&&entry["one"]["two"]"#
        );
    }

    #[test]
    fn test_unoptimized_output_keeps_repeated_guards() {
        let options = CompileOptions {
            optimize: false,
            ..CompileOptions::default()
        };
        let expr = compile(json!({ "one": { "two": { "show": "" } } }), &options)
            .unwrap()
            .unwrap();
        assert_eq!(
            render(&expr),
            r#"entry&&entry["one"]&&typeof entry["one"] === "object"&&entry["one"]&&entry["one"]["two"]"#
        );
    }

    #[test]
    fn test_list_under_field_is_a_disjunction() {
        assert_eq!(
            rendered(json!({ "foo": [{ "equals": 1 }, { "equals": 2 }] })),
            r#"entry&&(entry["foo"] === 1||entry["foo"] === 2)"#
        );
    }

    #[test]
    fn test_negations() {
        assert_eq!(
            rendered(json!({ "foo": { "!not": { "equals": 1 } } })),
            r#"!(entry&&entry["foo"] === 1)"#
        );
        assert_eq!(
            rendered(json!({ "!not": { "foo": { "equals": 1 } } })),
            r#"!(entry&&entry["foo"] === 1)"#
        );
    }

    #[test]
    fn test_custom_negation_key() {
        let options = CompileOptions {
            negation_key: "$not".to_string(),
            ..CompileOptions::default()
        };
        let expr = compile(json!({ "$not": { "foo": { "equals": "x" } } }), &options)
            .unwrap()
            .unwrap();
        assert!(matches!(expr, Expr::Not(_)));

        // The default key is just another operator name now.
        let err = compile(json!({ "!not": "x" }), &options).unwrap_err();
        assert!(matches!(err, CompileError::UnknownOperator { ref key, .. } if key == "!not"));
    }

    #[test]
    fn test_nested_list_descends_scope() {
        assert_eq!(
            rendered(json!({ "foo": { "bar": [{ "equals": 1 }, { "equals": 2 }] } })),
            concat!(
                r#"entry&&entry["foo"]&&typeof entry["foo"] === "object"&&"#,
                r#"(entry["foo"]["bar"] === 1||entry["foo"]["bar"] === 2)"#
            )
        );
    }

    #[test]
    fn test_unknown_operator_stops_compilation() {
        let err = compile(json!({ "foo": { "bar": 1 } }), &CompileOptions::default()).unwrap_err();
        assert!(matches!(err, CompileError::UnknownOperator { ref key, .. } if key == "bar"));
    }
}
