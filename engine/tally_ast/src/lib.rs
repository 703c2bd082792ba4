//! Tally AST - Expression tree and value types for the Tally engine.
//!
//! The AST is a closed set of immutable node variants. Transformations
//! (reduction, formatting) build new trees rather than mutating existing
//! nodes, so trees are freely shareable across threads. Two trees are
//! equal iff they are structurally equal; node identity never matters.

mod expr;
mod operators;
mod value;

pub use expr::Expr;
pub use operators::{BinaryOp, UnaryOp};
pub use value::Value;

// Re-export the decimal type so downstream crates agree on the version.
pub use bigdecimal::BigDecimal;
