use model::{Connective, Expr};

/// Render an expression as script-like boolean source.
///
/// Conjunctions and disjunctions print their connective between parts with
/// no spacing; a disjunction nested in a conjunction is parenthesized and a
/// negation always wraps its operand.
pub fn render(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

/// Render a whole predicate as a function taking the input as `entry_name`.
/// An absent expression matches everything and renders as `true`.
pub fn render_function(expr: Option<&Expr>, entry_name: &str) -> String {
    let body = expr.map_or_else(|| "true".to_string(), render);
    format!("function anonymous({entry_name}) {{ return {body} }}")
}

fn write_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Expr::Truthy(scope) => out.push_str(&scope.to_string()),
        Expr::IsObject(scope) => {
            out.push_str("typeof ");
            out.push_str(&scope.to_string());
            out.push_str(r#" === "object""#);
        }
        Expr::Test(test) => out.push_str(test.source()),
        Expr::Not(inner) => {
            out.push_str("!(");
            write_expr(out, inner);
            out.push(')');
        }
        Expr::And(parts) => write_joined(out, parts, Connective::And),
        Expr::Or(parts) => write_joined(out, parts, Connective::Or),
    }
}

fn write_joined(out: &mut String, parts: &[Expr], connective: Connective) {
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push_str(connective.symbol());
        }
        let grouped = connective == Connective::And && matches!(part, Expr::Or(_));
        if grouped {
            out.push('(');
        }
        write_expr(out, part);
        if grouped {
            out.push(')');
        }
    }
}
