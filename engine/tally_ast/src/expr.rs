//! Expression nodes.

use std::fmt::Write as _;

use bigdecimal::BigDecimal;

use crate::operators::{BinaryOp, UnaryOp};

/// A node in the expression tree.
///
/// Nodes are persistent values: reducing or otherwise transforming a tree
/// builds new nodes and never mutates existing ones. Equality is deep
/// structural equality over variant and fields.
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    /// A variable reference resolved through the variable resolver.
    Variable { name: String },

    /// A variable reference flagged to request its value interactively
    /// (`?name`). Resolved with the `Prompt` lookup mode; structurally an
    /// ordinary variable otherwise.
    PromptVariable { name: String },

    /// Arbitrary-precision decimal literal. Hex literals are converted to
    /// decimal at parse time.
    Number { value: BigDecimal },

    /// String literal. `quote` is the delimiter it was written with
    /// (`'` or `"`), kept so formatting can re-quote faithfully.
    Str { value: String, quote: char },

    /// Prefix operator application.
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Infix operator application.
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// `target = rhs`. The left side is a bare name, never resolved as a
    /// read.
    Assignment { target: String, rhs: Box<Expr> },

    /// Named function call with ordered arguments.
    Call { name: String, args: Vec<Expr> },
}

impl Expr {
    /// Convenience constructor for a number literal.
    pub fn number(value: BigDecimal) -> Self {
        Expr::Number { value }
    }

    /// Convenience constructor for a variable reference.
    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable { name: name.into() }
    }

    /// The children of this node, in source order. Leaves return an empty
    /// slice-backed vec.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Variable { .. }
            | Expr::PromptVariable { .. }
            | Expr::Number { .. }
            | Expr::Str { .. } => Vec::new(),
            Expr::Unary { operand, .. } => vec![operand],
            Expr::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            Expr::Assignment { rhs, .. } => vec![rhs],
            Expr::Call { args, .. } => args.iter().collect(),
        }
    }

    /// The label of this node in the canonical S-expression dump: the
    /// operator symbol, the call or variable name, or the literal text.
    fn label(&self) -> String {
        match self {
            Expr::Variable { name } => name.clone(),
            Expr::PromptVariable { name } => format!("?{name}"),
            Expr::Number { value } => value.to_string(),
            Expr::Str { value, quote } => format!("{quote}{value}{quote}"),
            Expr::Unary { op, .. } => op.as_symbol().to_owned(),
            Expr::Binary { op, .. } => op.as_symbol().to_owned(),
            Expr::Assignment { .. } => "=".to_owned(),
            Expr::Call { name, .. } => name.clone(),
        }
    }

    /// Canonical prefix dump of the tree, used for tree-shape assertions.
    ///
    /// Leaves render as their text; interior nodes render as
    /// `( <label> <child>... )`. `"200+2+roll(2,4)"` dumps as
    /// `"( + ( + 200 2 ) ( roll 2 4 ) )"`.
    pub fn sexpr(&self) -> String {
        let mut out = String::new();
        self.write_sexpr(&mut out);
        out
    }

    fn write_sexpr(&self, out: &mut String) {
        match self {
            // Assignment shows its target as a leaf child even though the
            // target is a bare name, matching the shape of the parsed
            // source.
            Expr::Assignment { target, rhs } => {
                let _ = write!(out, "( = {target} ");
                rhs.write_sexpr(out);
                out.push_str(" )");
            }
            // Calls keep their parentheses even with no arguments.
            Expr::Call { name, args } => {
                let _ = write!(out, "( {name}");
                for arg in args {
                    out.push(' ');
                    arg.write_sexpr(out);
                }
                out.push_str(" )");
            }
            other => {
                let children = other.children();
                if children.is_empty() {
                    out.push_str(&other.label());
                    return;
                }
                let _ = write!(out, "( {}", other.label());
                for child in children {
                    out.push(' ');
                    child.write_sexpr(out);
                }
                out.push_str(" )");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn num(n: i64) -> Expr {
        Expr::Number {
            value: BigDecimal::from(n),
        }
    }

    #[test]
    fn leaf_sexpr_is_plain_text() {
        assert_eq!(num(200).sexpr(), "200");
        assert_eq!(Expr::variable("foo").sexpr(), "foo");
        assert_eq!(
            Expr::PromptVariable {
                name: "foo".to_owned()
            }
            .sexpr(),
            "?foo"
        );
        assert_eq!(
            Expr::Str {
                value: "hi".to_owned(),
                quote: '\''
            }
            .sexpr(),
            "'hi'"
        );
    }

    #[test]
    fn nested_sexpr() {
        // 200 + 2 + roll(2, 4)
        let tree = Expr::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(Expr::Binary {
                op: BinaryOp::Add,
                lhs: Box::new(num(200)),
                rhs: Box::new(num(2)),
            }),
            rhs: Box::new(Expr::Call {
                name: "roll".to_owned(),
                args: vec![num(2), num(4)],
            }),
        };
        assert_eq!(tree.sexpr(), "( + ( + 200 2 ) ( roll 2 4 ) )");
    }

    #[test]
    fn assignment_sexpr_shows_target() {
        let tree = Expr::Assignment {
            target: "a".to_owned(),
            rhs: Box::new(num(5)),
        };
        assert_eq!(tree.sexpr(), "( = a 5 )");
    }

    #[test]
    fn structural_equality_ignores_number_scale() {
        // BigDecimal comparison is semantic, so 2.0 and 2 are the same
        // literal.
        let a = Expr::Number {
            value: BigDecimal::from_str("2.0").unwrap(),
        };
        let b = num(2);
        assert_eq!(a, b);
    }

    #[test]
    fn structural_equality_is_deep() {
        let a = Expr::Unary {
            op: UnaryOp::Minus,
            operand: Box::new(num(1)),
        };
        let b = Expr::Unary {
            op: UnaryOp::Minus,
            operand: Box::new(num(1)),
        };
        let c = Expr::Unary {
            op: UnaryOp::Plus,
            operand: Box::new(num(1)),
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
