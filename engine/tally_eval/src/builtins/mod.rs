//! The standard function library.
//!
//! Everything evaluable lives here, operators included: `1+1` works
//! because `+` is registered like any other function. Grouped by
//! concern; each module exposes a `register` hook called at engine
//! construction.

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};

use tally_ast::Value;

use crate::engine::Engine;
use crate::error::EvalError;

mod bitwise;
mod eval_fn;
mod logical;
mod math;
mod operators;

pub(crate) fn register_all(engine: &mut Engine) {
    operators::register(engine);
    math::register(engine);
    bitwise::register(engine);
    logical::register(engine);
    eval_fn::register(engine);
}

/// The numeric argument at `index`. Arity and type rules normally make
/// this infallible; the error covers bodies used with looser rules.
fn number_arg<'a>(
    name: &str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a BigDecimal, EvalError> {
    args.get(index)
        .and_then(Value::as_number)
        .ok_or_else(|| EvalError::ParameterType {
            name: name.to_owned(),
            index,
            expected: "number",
            actual: args.get(index).map_or("nothing", Value::type_name),
        })
}

/// The argument at `index` truncated to an integer.
fn int_arg(name: &str, args: &[Value], index: usize) -> Result<i64, EvalError> {
    let n = number_arg(name, args, index)?;
    n.with_scale_round(0, RoundingMode::Down)
        .to_i64()
        .ok_or_else(|| {
            EvalError::Evaluation(format!("parameter {index} of '{name}' is out of range"))
        })
}

/// The string argument at `index`.
fn str_arg<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a str, EvalError> {
    args.get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| EvalError::ParameterType {
            name: name.to_owned(),
            index,
            expected: "string",
            actual: args.get(index).map_or("nothing", Value::type_name),
        })
}
