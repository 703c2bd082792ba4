//! The full evaluator.
//!
//! A straightforward recursive walk. Operators are not special-cased:
//! each operator node dispatches through the registry under its symbol,
//! exactly like a named call, so a host that re-registers `+` changes
//! what `1+1` means. The evaluator holds no state of its own; all
//! mutation flows through the resolver.

use tracing::trace;

use tally_ast::{Expr, Value};

use crate::engine::Engine;
use crate::error::{EngineError, EvalError};
use crate::resolver::{VariableMode, VariableResolver};

pub(crate) fn evaluate(
    engine: &Engine,
    resolver: &mut dyn VariableResolver,
    expr: &Expr,
) -> Result<Value, EngineError> {
    match expr {
        Expr::Number { value } => Ok(Value::Number(value.clone())),
        Expr::Str { value, .. } => Ok(Value::Str(value.clone())),
        Expr::Variable { name } => Ok(resolver.get_variable(name, VariableMode::Normal)?),
        Expr::PromptVariable { name } => Ok(resolver.get_variable(name, VariableMode::Prompt)?),
        Expr::Unary { op, operand } => {
            let value = evaluate(engine, resolver, operand)?;
            dispatch(engine, resolver, op.as_symbol(), &[value])
        }
        Expr::Binary { op, lhs, rhs } => {
            let left = evaluate(engine, resolver, lhs)?;
            let right = evaluate(engine, resolver, rhs)?;
            dispatch(engine, resolver, op.as_symbol(), &[left, right])
        }
        Expr::Assignment { target, rhs } => {
            // The target is passed as a string; it is never read.
            let value = evaluate(engine, resolver, rhs)?;
            dispatch(
                engine,
                resolver,
                "=",
                &[Value::from(target.as_str()), value],
            )
        }
        Expr::Call { name, args } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(evaluate(engine, resolver, arg)?);
            }
            let function = engine
                .function(name)
                .ok_or_else(|| EvalError::UndefinedFunction(name.clone()))?;
            trace!(function = name.as_str(), argc = values.len(), "dispatch");
            function
                .invoke(engine, resolver, name, &values)
                .map_err(|e| EngineError::from(e).in_function(name))
        }
    }
}

fn dispatch(
    engine: &Engine,
    resolver: &mut dyn VariableResolver,
    name: &str,
    args: &[Value],
) -> Result<Value, EngineError> {
    let function = engine
        .function(name)
        .ok_or_else(|| EvalError::UndefinedFunction(name.to_owned()))?;
    trace!(function = name, argc = args.len(), "dispatch");
    Ok(function.invoke(engine, resolver, name, args)?)
}
