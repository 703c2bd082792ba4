//! Bitwise functions.
//!
//! Arguments are truncated to integers and converted through `BigInt`,
//! so widths are unbounded. `hex` renders `0x` plus uppercase digits.

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;

use tally_ast::Value;

use crate::engine::Engine;
use crate::error::EvalError;
use crate::function::{Function, ParamRule};

use super::number_arg;

pub(super) fn register(engine: &mut Engine) {
    engine.add_function(bit_and());
    engine.add_function(bit_or());
    engine.add_function(bit_xor());
    engine.add_function(bit_not());
    engine.add_function(hex());
}

fn int_at(name: &str, args: &[Value], index: usize) -> Result<BigInt, EvalError> {
    let n = number_arg(name, args, index)?;
    let (int, _) = n
        .with_scale_round(0, RoundingMode::Down)
        .into_bigint_and_exponent();
    Ok(int)
}

fn fold(
    aliases: [&'static str; 2],
    op: fn(BigInt, BigInt) -> BigInt,
) -> Function {
    Function::new(aliases, 2, None, move |_, _, name, args| {
        let mut acc = int_at(name, args, 0)?;
        for index in 1..args.len() {
            acc = op(acc, int_at(name, args, index)?);
        }
        Ok(Value::Number(BigDecimal::from(acc)))
    })
    .params(ParamRule::NumbersOnly)
}

fn bit_and() -> Function {
    fold(["band", "bitwiseand"], |a, b| a & b)
}

fn bit_or() -> Function {
    fold(["bor", "bitwiseor"], |a, b| a | b)
}

fn bit_xor() -> Function {
    fold(["bxor", "bitwisexor"], |a, b| a ^ b)
}

/// Two's-complement not: `-x - 1`.
fn bit_not() -> Function {
    Function::new(["bnot", "bitwisenot"], 1, Some(1), |_, _, name, args| {
        let int = int_at(name, args, 0)?;
        Ok(Value::Number(BigDecimal::from(-(int + BigInt::from(1)))))
    })
    .params(ParamRule::NumbersOnly)
}

fn hex() -> Function {
    Function::new(["hex"], 1, Some(1), |_, _, name, args| {
        let int = int_at(name, args, 0)?;
        Ok(Value::Str(format!("0x{int:X}")))
    })
    .params(ParamRule::NumbersOnly)
}
