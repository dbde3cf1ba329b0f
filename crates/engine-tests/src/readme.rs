#[cfg(test)]
mod tests {
    use crate::{
        compile,
        dictionaries::{basic, comparison, composed, scope_printer},
        utils::kept,
    };
    use query_engine::{Compiled, Compiler, OutputMode};
    use serde_json::json;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_usage_example() {
        let predicate = compile(
            comparison(),
            json!({
                "name": { "equals": "foo" },
                "age": { "greaterThan": 21, "lessThan": 80 }
            }),
        );

        assert!(predicate.matches(&json!({ "name": "foo", "age": 38 })));
        assert!(!predicate.matches(&json!({ "name": "foo", "age": 18 })));
        assert!(!predicate.matches(&json!({ "name": "bar", "age": 38 })));
        assert!(!predicate.matches(&json!({ "name": "foo" })));
    }

    #[traced_test]
    #[test]
    fn test_custom_negation_key() {
        let compiler = Compiler::builder()
            .dictionary(basic())
            .negation_key("$not")
            .build()
            .unwrap();
        let predicate = compiler
            .compile_predicate(json!({ "$not": { "equals": "foo" } }))
            .unwrap();

        assert!(predicate.matches(&json!("bar")));
        assert!(!predicate.matches(&json!("foo")));
    }

    #[traced_test]
    #[test]
    fn test_operators_calling_operators() {
        let predicate = compile(composed(), json!({ "stringContains": "foo" }));
        let values = [json!("foobar"), json!("foobaz"), json!(["foo"]), json!("baz")];

        assert_eq!(kept(&predicate, &values), vec![json!("foobar"), json!("foobaz")]);
        assert!(logs_contain("Resolving operator 'is'"));
    }

    #[traced_test]
    #[test]
    fn test_scope_rendering() {
        let compiler = Compiler::builder()
            .dictionary(scope_printer())
            .output_mode(OutputMode::String)
            .build()
            .unwrap();
        let render = |query: serde_json::Value| match compiler.compile(query).unwrap() {
            Compiled::Source(source) => source,
            Compiled::Predicate(_) => panic!("expected source output"),
        };

        assert_eq!(
            render(json!({ "show": "" })),
            "function anonymous(entry) { return entry }"
        );
        assert_eq!(
            render(json!({ "one": { "show": "" } })),
            r#"function anonymous(entry) { return entry&&entry["one"] }"#
        );
        assert_eq!(
            render(json!({ "one": { "two": { "show": "" } } })),
            r#"function anonymous(entry) { return entry&&entry["one"]&&typeof entry["one"] === "object"&&entry["one"]["two"] }"#
        );
        assert!(logs_contain("Compiling query with 1 operator(s)"));
    }

    #[traced_test]
    #[test]
    fn test_rendered_and_evaluated_forms_agree() {
        let compiler = Compiler::builder()
            .dictionary(comparison())
            .entry_name("doc")
            .build()
            .unwrap();
        let query = json!({ "foo": [{ "equals": "toto" }, { "equals": "titi" }] });

        let predicate = compiler.compile_predicate(query.clone()).unwrap();
        assert_eq!(
            compiler.compile_source(query).unwrap(),
            r#"function anonymous(doc) { return doc&&(doc["foo"] === "toto"||doc["foo"] === "titi") }"#
        );
        assert_eq!(predicate.to_string(), predicate.source());
        assert!(predicate.matches(&json!({ "foo": "titi" })));
    }
}
