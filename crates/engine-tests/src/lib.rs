#![allow(dead_code)]

use query_engine::{Compiler, Dictionary, Predicate};
use serde_json::Value;
use tracing::debug;

pub mod dictionaries;
pub mod properties;
pub mod readme;
pub mod utils;

/// Compile `query` against `dictionary` with default options.
pub fn compile(dictionary: Dictionary, query: Value) -> Predicate {
    let predicate = Compiler::new(dictionary)
        .and_then(|compiler| compiler.compile_predicate(query))
        .unwrap_or_else(|e| panic!("query failed to compile: {e}"));
    debug!("Compiled test query: {}", predicate);
    predicate
}

/// Compile `query` once with and once without the optimizer.
pub fn compile_both(dictionary: Dictionary, query: Value) -> (Predicate, Predicate) {
    let build = |optimize: bool| {
        Compiler::builder()
            .dictionary(dictionary.clone())
            .optimize(optimize)
            .build()
            .and_then(|compiler| compiler.compile_predicate(query.clone()))
            .unwrap_or_else(|e| panic!("query failed to compile: {e}"))
    };
    (build(true), build(false))
}
