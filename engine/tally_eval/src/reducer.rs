//! Deterministic reduction.
//!
//! Rewrites a tree so that evaluating it any number of times yields the
//! same result: variables fold to literals immediately, and any subtree
//! rooted in a non-deterministic function (a dice roll, say) is
//! evaluated once and replaced by its value. Deterministic operators and
//! calls survive with their children reduced; assignment keeps its
//! target and reduces only the right-hand side.

use bigdecimal::BigDecimal;
use tracing::trace;

use tally_ast::{Expr, Value};

use crate::engine::Engine;
use crate::error::{EngineError, EvalError};
use crate::evaluator;
use crate::resolver::{VariableMode, VariableResolver};

pub(crate) fn reduce(
    engine: &Engine,
    resolver: &mut dyn VariableResolver,
    expr: &Expr,
) -> Result<Expr, EngineError> {
    match expr {
        Expr::Number { .. } | Expr::Str { .. } => Ok(expr.clone()),
        Expr::Variable { name } => {
            let value = resolver.get_variable(name, VariableMode::Normal)?;
            trace!(variable = name.as_str(), "folding variable");
            Ok(literal(value))
        }
        Expr::PromptVariable { name } => {
            let value = resolver.get_variable(name, VariableMode::Prompt)?;
            trace!(variable = name.as_str(), "folding prompt variable");
            Ok(literal(value))
        }
        Expr::Unary { op, operand } => {
            if is_deterministic(engine, op.as_symbol())? {
                Ok(Expr::Unary {
                    op: *op,
                    operand: Box::new(reduce(engine, resolver, operand)?),
                })
            } else {
                fold(engine, resolver, expr)
            }
        }
        Expr::Binary { op, lhs, rhs } => {
            if is_deterministic(engine, op.as_symbol())? {
                Ok(Expr::Binary {
                    op: *op,
                    lhs: Box::new(reduce(engine, resolver, lhs)?),
                    rhs: Box::new(reduce(engine, resolver, rhs)?),
                })
            } else {
                fold(engine, resolver, expr)
            }
        }
        Expr::Assignment { target, rhs } => Ok(Expr::Assignment {
            target: target.clone(),
            rhs: Box::new(reduce(engine, resolver, rhs)?),
        }),
        Expr::Call { name, args } => {
            if is_deterministic(engine, name)? {
                let mut reduced = Vec::with_capacity(args.len());
                for arg in args {
                    reduced.push(reduce(engine, resolver, arg)?);
                }
                Ok(Expr::Call {
                    name: name.clone(),
                    args: reduced,
                })
            } else {
                fold(engine, resolver, expr)
            }
        }
    }
}

fn is_deterministic(engine: &Engine, name: &str) -> Result<bool, EvalError> {
    engine
        .function(name)
        .map(|f| f.is_deterministic())
        .ok_or_else(|| EvalError::UndefinedFunction(name.to_owned()))
}

/// Evaluate a non-deterministic subtree once and replace it by its
/// value.
fn fold(
    engine: &Engine,
    resolver: &mut dyn VariableResolver,
    expr: &Expr,
) -> Result<Expr, EngineError> {
    let value = evaluator::evaluate(engine, resolver, expr)?;
    trace!(subtree = %expr.sexpr(), result = %value, "folding non-deterministic subtree");
    Ok(literal(value))
}

/// The literal node a runtime value folds to. Non-numeric values become
/// quoted string literals so the result still formats to parseable text.
fn literal(value: Value) -> Expr {
    match value {
        Value::Number(n) => Expr::Number { value: n },
        Value::Bool(b) => Expr::Number {
            value: BigDecimal::from(i64::from(b)),
        },
        Value::Str(s) => Expr::Str {
            value: s,
            quote: '"',
        },
    }
}
