pub mod core;
pub mod execution;
pub mod query;

pub use crate::core::{scope::Scope, value::ValueExt};
pub use execution::{
    context::ExecutionContext,
    errors::ModelError,
    expr::{Connective, Expr, Test, TestFn},
};
pub use query::QueryNode;
