//! Tally Fmt - renders an expression tree back to inline source text.
//!
//! Output follows the conventional precedence table and is minimally
//! parenthesized: a subexpression is wrapped only when its operator
//! binds more loosely than the context it appears in, so
//! `200 + (2 + 2) * 2` keeps its parentheses while `200 * (2 * 4) * 7`
//! flattens to `200 * 2 * 4 * 7`. The result re-parses to an
//! evaluation-equivalent tree.

use tally_ast::{BinaryOp, Expr};

/// Precedence of assignment, the loosest operator.
const ASSIGN: u8 = 1;

/// Precedence of atoms and calls; they never take parentheses.
const ATOM: u8 = 9;

const fn binary_precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Or => 2,
        BinaryOp::And => 3,
        BinaryOp::Eq | BinaryOp::Ne => 4,
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => 5,
        BinaryOp::Add | BinaryOp::Sub => 6,
        BinaryOp::Mul | BinaryOp::Div => 7,
        BinaryOp::Pow => 8,
    }
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Binary { op, .. } => binary_precedence(*op),
        Expr::Assignment { .. } => ASSIGN,
        _ => ATOM,
    }
}

/// Render an expression as inline source text.
pub fn format(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr, 0);
    out
}

fn write_expr(out: &mut String, expr: &Expr, ambient: u8) {
    let wrap = precedence(expr) < ambient;
    if wrap {
        out.push('(');
    }
    match expr {
        Expr::Variable { name } => out.push_str(name),
        Expr::PromptVariable { name } => {
            out.push('?');
            out.push_str(name);
        }
        Expr::Number { value } => out.push_str(&value.to_string()),
        Expr::Str { value, quote } => {
            out.push(*quote);
            out.push_str(value);
            out.push(*quote);
        }
        Expr::Unary { op, operand } => {
            // Unary plus is a no-op and is dropped from output.
            if *op != tally_ast::UnaryOp::Plus {
                out.push_str(op.as_symbol());
            }
            write_expr(out, operand, ATOM);
        }
        Expr::Binary { op, lhs, rhs } => {
            let prec = binary_precedence(*op);
            write_expr(out, lhs, prec);
            out.push(' ');
            out.push_str(op.as_symbol());
            out.push(' ');
            write_expr(out, rhs, prec);
        }
        Expr::Assignment { target, rhs } => {
            out.push_str(target);
            out.push_str(" = ");
            write_expr(out, rhs, ASSIGN);
        }
        Expr::Call { name, args } => {
            out.push_str(name);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, arg, 0);
            }
            out.push(')');
        }
    }
    if wrap {
        out.push(')');
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use tally_parse::parse;

    fn fmt(source: &str) -> String {
        match parse(source) {
            Ok(expr) => super::format(&expr),
            Err(e) => panic!("parse failed for {source:?}: {e}"),
        }
    }

    #[test]
    fn needed_parentheses_survive() {
        assert_eq!(fmt("200+(2+2)*2"), "200 + (2 + 2) * 2");
        assert_eq!(fmt("(200+2)*2"), "(200 + 2) * 2");
    }

    #[test]
    fn redundant_parentheses_are_dropped() {
        assert_eq!(fmt("200*(2*4)*7"), "200 * 2 * 4 * 7");
        assert_eq!(fmt("(200)+(2)"), "200 + 2");
        assert_eq!(fmt("200+(2*2)"), "200 + 2 * 2");
    }

    #[test]
    fn call_arguments_reset_to_loosest_context() {
        assert_eq!(fmt("100*func(2,(2+3)*7)"), "100 * func(2, (2 + 3) * 7)");
        assert_eq!(fmt("roll()"), "roll()");
    }

    #[test]
    fn assignment_right_side_is_bare() {
        assert_eq!(fmt("a=200+7"), "a = 200 + 7");
        assert_eq!(fmt("a = b"), "a = b");
    }

    #[test]
    fn strings_keep_their_quote_character() {
        assert_eq!(fmt("eval('2*2')"), "eval('2*2')");
        assert_eq!(fmt("\"foo\" + 'bar'"), "\"foo\" + 'bar'");
    }

    #[test]
    fn unary_operators() {
        assert_eq!(fmt("-1 * 2"), "-1 * 2");
        assert_eq!(fmt("-(1+2)"), "-(1 + 2)");
        assert_eq!(fmt("!a && b"), "!a && b");
        assert_eq!(fmt("+x"), "x");
    }

    #[test]
    fn logical_and_relational_layers() {
        assert_eq!(fmt("1<2&&3>=2||x==y"), "1 < 2 && 3 >= 2 || x == y");
        assert_eq!(fmt("(a||b)&&c"), "(a || b) && c");
    }

    #[test]
    fn power_chains() {
        assert_eq!(fmt("2^3^2"), "2 ^ 3 ^ 2");
        assert_eq!(fmt("2*2^3"), "2 * 2 ^ 3");
        assert_eq!(fmt("(2*2)^3"), "(2 * 2) ^ 3");
    }

    #[test]
    fn prompt_variables_and_leaves() {
        assert_eq!(fmt("?foo + 2"), "?foo + 2");
        assert_eq!(fmt("C_mpl.x"), "C_mpl.x");
        assert_eq!(fmt("1.25"), "1.25");
    }
}
