//! Tally Parse - recursive-descent parser for the Tally expression
//! language.
//!
//! Produces a [`tally_ast::Expr`] tree via precedence climbing. The
//! grammar, loosest binding first:
//!
//! ```text
//! expression  := IDENT '=' or_expr | or_expr
//! or_expr     := and_expr ( '||' and_expr )*
//! and_expr    := eq_expr ( '&&' eq_expr )*
//! eq_expr     := rel_expr ( ('=='|'!=') rel_expr )*
//! rel_expr    := add_expr ( ('<'|'<='|'>'|'>=') add_expr )*
//! add_expr    := mul_expr ( ('+'|'-') mul_expr )*
//! mul_expr    := pow_expr ( ('*'|'/') pow_expr )*
//! pow_expr    := unary ( '^' pow_expr )?
//! unary       := ('+'|'-'|'!') unary | primary
//! primary     := NUMBER | HEXNUMBER | STRING | '?' IDENT
//!              | IDENT '(' args ')' | IDENT | '(' expression ')'
//! ```
//!
//! Binary operators are left-associative except `^`, which is
//! right-associative. Assignment targets are consumed as bare names and
//! never built as variable reads.

mod error;
mod parser;

pub use error::ParseError;
pub use parser::parse;
