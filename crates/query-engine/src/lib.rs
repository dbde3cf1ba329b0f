pub mod compiler;
pub mod context;
pub mod dictionary;
pub mod error;
pub mod eval;
pub mod optimize;
pub mod predicate;
pub mod render;
pub mod settings;
pub mod token;

mod resolver;

pub use compiler::{Compiled, Compiler, CompilerBuilder};
pub use context::OperatorContext;
pub use dictionary::{Dictionary, Generator};
pub use error::{CompileError, Result};
pub use eval::Evaluator;
pub use optimize::{Optimizer, Rank};
pub use predicate::{BoundPredicate, Predicate};
pub use render::{render, render_function};
pub use settings::{CompileOptions, OutputMode};
pub use token::ValueToken;
