//! Arithmetic operators and assignment.

use bigdecimal::{BigDecimal, One, Zero};

use tally_ast::Value;

use crate::engine::Engine;
use crate::error::EvalError;
use crate::function::{Function, ParamRule};
use crate::resolver::VariableMode;

use super::{int_arg, number_arg, str_arg};

pub(super) fn register(engine: &mut Engine) {
    engine.add_function(assignment());
    engine.add_function(addition());
    engine.add_function(subtraction());
    engine.add_function(multiplication());
    engine.add_function(division());
    engine.add_function(power());
}

/// `=` / `set`: write through the resolver, produce the written value.
/// The target arrives as a string; the resolver may reject the write.
fn assignment() -> Function {
    Function::new(["=", "set"], 2, Some(2), |_, resolver, name, args| {
        let target = str_arg(name, args, 0)?;
        let value = args[1].clone();
        resolver.set_variable(target, VariableMode::Normal, value.clone())?;
        Ok(value)
    })
}

/// `+`: identity with one argument; string concatenation as soon as any
/// argument is a string; numeric sum otherwise.
fn addition() -> Function {
    Function::new(["+", "add", "sum", "concat"], 1, None, |_, _, name, args| {
        if args.len() == 1 {
            return Ok(args[0].clone());
        }
        if args.iter().any(Value::is_str) {
            let mut out = String::new();
            for arg in args {
                out.push_str(&arg.to_string());
            }
            return Ok(Value::Str(out));
        }
        let mut sum = BigDecimal::zero();
        for index in 0..args.len() {
            sum = &sum + number_arg(name, args, index)?;
        }
        Ok(Value::Number(sum))
    })
    .params(ParamRule::NumbersOrStrings)
}

/// `-`: negation with one argument, left-fold subtraction otherwise.
fn subtraction() -> Function {
    Function::new(["-", "subtract"], 1, None, |_, _, name, args| {
        let first = number_arg(name, args, 0)?;
        if args.len() == 1 {
            return Ok(Value::Number(-first.clone()));
        }
        let mut acc = first.clone();
        for index in 1..args.len() {
            acc = &acc - number_arg(name, args, index)?;
        }
        Ok(Value::Number(acc))
    })
    .params(ParamRule::NumbersOnly)
}

fn multiplication() -> Function {
    Function::new(["*", "multiply"], 2, None, |_, _, name, args| {
        let mut acc = number_arg(name, args, 0)?.clone();
        for index in 1..args.len() {
            acc = &acc * number_arg(name, args, index)?;
        }
        Ok(Value::Number(acc))
    })
    .params(ParamRule::NumbersOnly)
}

fn division() -> Function {
    Function::new(["/", "divide"], 2, None, |_, _, name, args| {
        let mut acc = number_arg(name, args, 0)?.clone();
        for index in 1..args.len() {
            let divisor = number_arg(name, args, index)?;
            if divisor.is_zero() {
                return Err(EvalError::Evaluation("division by zero".to_owned()));
            }
            acc = &acc / divisor;
        }
        Ok(Value::Number(acc))
    })
    .params(ParamRule::NumbersOnly)
}

/// `^`: base raised to the integer part of the exponent, which defaults
/// to 2 (hence the `sqr`/`square` aliases). Negative exponents go
/// through the reciprocal.
fn power() -> Function {
    Function::new(
        ["^", "pow", "power", "sqr", "square", "factor"],
        1,
        Some(2),
        |_, _, name, args| {
            let base = number_arg(name, args, 0)?;
            let exponent = if args.len() > 1 {
                int_arg(name, args, 1)?
            } else {
                2
            };
            Ok(Value::Number(int_pow(base, exponent)?))
        },
    )
    .params(ParamRule::NumbersOnly)
}

fn int_pow(base: &BigDecimal, exponent: i64) -> Result<BigDecimal, EvalError> {
    if exponent < 0 {
        let positive = int_pow(base, exponent.saturating_neg())?;
        if positive.is_zero() {
            return Err(EvalError::Evaluation("division by zero".to_owned()));
        }
        return Ok(BigDecimal::one() / positive);
    }
    if exponent > 10_000 {
        return Err(EvalError::Evaluation(format!(
            "exponent {exponent} is too large"
        )));
    }
    let mut result = BigDecimal::one();
    for _ in 0..exponent {
        result = &result * base;
    }
    Ok(result)
}
