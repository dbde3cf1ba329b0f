use query_engine::{Compiler, CompileError, Dictionary, Predicate};
use serde_json::{Value, json};

/// Inputs the property suites evaluate every predicate against. `None`
/// stands for a missing input.
pub fn sample_inputs() -> Vec<Option<Value>> {
    let mut inputs = vec![None];
    inputs.extend(
        [
            json!(null),
            json!({}),
            json!([]),
            json!("foo"),
            json!(0),
            json!(42),
            json!({ "foo": "toto" }),
            json!({ "foo": "tata" }),
            json!({ "foo": "titi" }),
            json!({ "foo": null }),
            json!({ "foo": 7 }),
            json!({ "foo": ["toto"] }),
            json!({ "foo": { "bar": "baz" } }),
            json!({ "foo": { "bar": null } }),
            json!({ "foo": { "bar": { "baz": "toto" } } }),
            json!({ "foo": { "bar": { "baz": "titi" } } }),
            json!({ "foo": { "bar": { "baz": null } } }),
            json!({ "foo": "toto", "bar": 3 }),
            json!({ "foo": "tata", "bar": 12 }),
            json!({ "name": "foo", "age": 38 }),
            json!({ "name": "foo", "age": 18 }),
            json!({ "name": "bar", "age": 90 }),
        ]
        .into_iter()
        .map(Some),
    );
    inputs
}

/// Evaluate `predicate` against every input with a fresh context each time.
pub fn outcomes(predicate: &Predicate, inputs: &[Option<Value>]) -> Vec<bool> {
    inputs
        .iter()
        .map(|input| predicate.evaluate(input.as_ref(), &mut Default::default()))
        .collect()
}

/// Assert two predicates agree on every sample input.
pub fn assert_agree(left: &Predicate, right: &Predicate) {
    for input in sample_inputs() {
        let l = left.evaluate(input.as_ref(), &mut Default::default());
        let r = right.evaluate(input.as_ref(), &mut Default::default());
        assert_eq!(
            l, r,
            "predicates disagree on {input:?}:\n  left:  {left}\n  right: {right}"
        );
    }
}

/// Compile and return the error, failing the test if compilation succeeds.
pub fn compile_err(dictionary: Dictionary, query: Value) -> CompileError {
    match Compiler::new(dictionary).and_then(|c| c.compile_predicate(query)) {
        Ok(predicate) => panic!("expected a compile error, got {predicate}"),
        Err(e) => e,
    }
}

/// Values kept by `predicate` from `values`, cloned for easy comparison.
pub fn kept(predicate: &Predicate, values: &[Value]) -> Vec<Value> {
    predicate.filter(values).into_iter().cloned().collect()
}
