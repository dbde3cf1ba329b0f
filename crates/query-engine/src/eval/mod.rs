pub mod runtime;

pub use runtime::Evaluator;
