use model::{
    core::value::{is_truthy, type_of},
    ExecutionContext, Expr,
};
use serde_json::Value;

/// Evaluates compiled expressions against an input value.
///
/// `input` is `None` when there is no value at all. Missing paths anywhere
/// below the input simply make guards and tests fail; evaluation never
/// errors.
pub trait Evaluator {
    fn evaluate(&self, input: Option<&Value>, ctx: &mut ExecutionContext) -> bool;
}

impl Evaluator for Expr {
    fn evaluate(&self, input: Option<&Value>, ctx: &mut ExecutionContext) -> bool {
        match self {
            Expr::Bool(b) => *b,

            Expr::Truthy(scope) => is_truthy(scope.resolve(input)),

            Expr::IsObject(scope) => type_of(scope.resolve(input)) == "object",

            Expr::Test(test) => test.run(input, ctx),

            Expr::Not(inner) => !inner.evaluate(input, ctx),

            // Left to right, stopping at the first decisive term.
            Expr::And(parts) => parts.iter().all(|part| part.evaluate(input, ctx)),

            Expr::Or(parts) => parts.iter().any(|part| part.evaluate(input, ctx)),
        }
    }
}
