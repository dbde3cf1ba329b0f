//! Algebraic properties of compiled predicates, checked over a fixed set of
//! sample inputs.

use serde_json::{Value, json};

/// Sub-queries the property suites combine with each other.
pub fn sub_queries() -> Vec<Value> {
    vec![
        json!({ "equals": "toto" }),
        json!({ "equals": "tata" }),
        json!({ "greaterThan": 5 }),
        json!({ "lessThan": 10, "greaterThan": 2 }),
        json!({ "bar": { "equals": "baz" } }),
        json!({ "bar": { "baz": { "equals": "toto" } } }),
        json!([{ "equals": "titi" }, { "lessThan": 8 }]),
        json!({ "!not": { "equals": "toto" } }),
        json!({}),
    ]
}
