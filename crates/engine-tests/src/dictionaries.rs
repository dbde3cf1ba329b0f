//! Operator dictionaries shared by the suites.

use model::{Expr, ValueExt, core::value::type_of};
use query_engine::{Dictionary, OperatorContext, Result, ValueToken};
use serde_json::Value;
use std::cmp::Ordering;

fn literal(token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Value> {
    token
        .value()
        .cloned()
        .ok_or_else(|| ctx.fail("expects a literal argument"))
}

fn text(token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<String> {
    token
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ctx.fail("expects a string argument"))
}

fn compare(
    token: &ValueToken,
    ctx: &OperatorContext<'_>,
    symbol: &str,
    wanted: Ordering,
) -> Result<Expr> {
    let scope = ctx.scope();
    let expected = literal(token, ctx)?;
    let source = format!("{scope} {symbol} {token}");
    Ok(Expr::test(scope, source, move |v, _| {
        v.and_then(|v| v.compare(&expected)) == Some(wanted)
    }))
}

pub fn equals(token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
    compare(token, ctx, "===", Ordering::Equal)
}

pub fn greater_than(token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
    compare(token, ctx, ">", Ordering::Greater)
}

pub fn less_than(token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
    compare(token, ctx, "<", Ordering::Less)
}

/// `typeof`-style check. `"array"` and `"null"` are told apart from other
/// objects, and `"object"` excludes null.
pub fn type_of_check(token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
    let scope = ctx.scope();
    let name = text(token, ctx)?.to_lowercase();

    let expr = match name.as_str() {
        "array" => Expr::test(
            scope.clone(),
            format!(r#"Object.prototype.toString.call({scope})==="[object Array]""#),
            |v, _| matches!(v, Some(Value::Array(_))),
        ),
        "null" => Expr::test(
            scope.clone(),
            format!(r#"Object.prototype.toString.call({scope})==="[object Null]""#),
            |v, _| matches!(v, Some(Value::Null)),
        ),
        "object" => Expr::and([
            Expr::test(scope.clone(), format!(r#"typeof {scope} === "object""#), |v, _| {
                type_of(v) == "object"
            }),
            Expr::test(scope.clone(), format!("(Boolean({scope}))"), |v, _| {
                v.is_some_and(ValueExt::is_truthy)
            }),
        ]),
        other => {
            let wanted = other.to_string();
            let source = format!("typeof {scope} === {token}");
            Expr::test(scope, source, move |v, _| type_of(v) == wanted)
        }
    };
    Ok(expr)
}

pub fn begins_with(token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
    let prefix = text(token, ctx)?;
    let scope = ctx.scope();
    let source = format!("{scope}.indexOf({token}) === 0");

    Ok(Expr::and([
        ctx.call_operator("typeOf", Value::from("string"))?,
        Expr::test(scope, source, move |v, _| {
            v.and_then(Value::as_str).is_some_and(|s| s.starts_with(&prefix))
        }),
    ]))
}

pub fn ends_with(token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
    let suffix = text(token, ctx)?;
    let scope = ctx.scope();
    let source = format!("{scope}.substr(-{}) === {token}", suffix.chars().count());

    Ok(Expr::and([
        ctx.call_operator("typeOf", Value::from("string"))?,
        Expr::test(scope, source, move |v, _| {
            v.and_then(Value::as_str).is_some_and(|s| s.ends_with(&suffix))
        }),
    ]))
}

/// `true` (or `"true"`) requires a value that is neither missing nor null;
/// anything else requires the opposite.
pub fn is_set(token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
    let wanted = match token.value() {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    };

    let unset = Expr::or([
        ctx.call_operator("typeOf", Value::from("undefined"))?,
        ctx.call_operator("typeOf", Value::from("null"))?,
    ]);

    Ok(if wanted { Expr::not(unset) } else { unset })
}

pub fn is(token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
    let scope = ctx.scope();
    let name = text(token, ctx)?;
    let source = format!("typeof {scope}==={token}");
    Ok(Expr::test(scope, source, move |v, _| type_of(v) == name))
}

pub fn string_contains(token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
    let needle = text(token, ctx)?;
    let scope = ctx.scope();
    let source = format!("{scope}.indexOf({token}) !== -1");

    Ok(Expr::and([
        ctx.call_operator("is", Value::from("string"))?,
        Expr::test(scope, source, move |v, _| {
            v.and_then(Value::as_str).is_some_and(|s| s.contains(&needle))
        }),
    ]))
}

/// Yields the scope itself, which makes rendered output easy to inspect.
pub fn show(_token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
    Ok(Expr::Truthy(ctx.scope()))
}

pub fn matches(token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
    let re = token
        .as_pattern()
        .cloned()
        .ok_or_else(|| ctx.fail("expects a pattern"))?;
    let scope = ctx.scope();
    let source = format!("{token}.test({scope})");

    Ok(Expr::test(scope, source, move |v, _| {
        v.and_then(Value::as_str).is_some_and(|s| re.is_match(s))
    }))
}

/// Matches when the value equals the running count of calls kept under
/// `foo` in the execution context.
pub fn counter(_token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
    let scope = ctx.scope();
    let source = format!("{scope} === (this.foo+=1)");

    Ok(Expr::test(scope, source, |v, vars| {
        let count = vars.increment("foo", 1);
        v.and_then(Value::as_f64) == Some(count as f64)
    }))
}

/// Reads a variable from the execution context instead of the input.
pub fn var(token: &ValueToken, ctx: &OperatorContext<'_>) -> Result<Expr> {
    let key = text(token, ctx)?;
    let source = format!("this.{key}");

    Ok(Expr::test(ctx.scope(), source, move |_, vars| {
        vars.get(&key).is_some_and(ValueExt::is_truthy)
    }))
}

pub fn basic() -> Dictionary {
    Dictionary::new().with("equals", equals)
}

pub fn comparison() -> Dictionary {
    Dictionary::new()
        .with("equals", equals)
        .with("greaterThan", greater_than)
        .with("lessThan", less_than)
}

pub fn string_matchers() -> Dictionary {
    Dictionary::new()
        .with("equals", equals)
        .with("beginsWith", begins_with)
        .with("isSet", is_set)
        .with("endsWith", ends_with)
        .with("typeOf", type_of_check)
}

pub fn composed() -> Dictionary {
    Dictionary::new()
        .with("is", is)
        .with("stringContains", string_contains)
}

pub fn scope_printer() -> Dictionary {
    Dictionary::new().with("show", show)
}

pub fn patterns() -> Dictionary {
    Dictionary::new()
        .with("equals", equals)
        .with("matches", matches)
}

pub fn runtime() -> Dictionary {
    Dictionary::new().with("_", counter).with("var", var)
}
