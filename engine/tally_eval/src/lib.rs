//! Tally Eval - the expression engine.
//!
//! Ties the other crates together behind an [`Engine`]:
//!
//! - a case-insensitive function registry where operators are ordinary
//!   functions (`1+1` dispatches to whatever is registered under `+`);
//! - a source-text transform pipeline that never touches string
//!   literals;
//! - the full evaluator and the deterministic reducer
//!   ([`Expression::freeze`]);
//! - the [`VariableResolver`] contract and an in-memory default;
//! - the standard function library.
//!
//! ```
//! use tally_eval::{Engine, MapVariableResolver, Value};
//!
//! let engine = Engine::new();
//! let mut vars = MapVariableResolver::new();
//! let expr = engine.parse_expression("a = 2 * (3 + 4)")?;
//! assert_eq!(expr.evaluate(&mut vars)?, Value::from(14));
//! # Ok::<(), tally_eval::EngineError>(())
//! ```

mod builtins;
mod engine;
mod error;
mod evaluator;
mod function;
mod reducer;
mod resolver;
mod transform;

pub use engine::{Engine, Expression};
pub use error::{EngineError, EvalError};
pub use function::{Function, FunctionBody, ParamRule};
pub use resolver::{MapVariableResolver, VariableMode, VariableResolver};
pub use transform::{RegexTransform, StringLiteralTransformer, Transform};

pub use tally_ast::{BigDecimal, Expr, Value};

#[cfg(test)]
mod tests;
