//! Math functions.

use bigdecimal::{BigDecimal, FromPrimitive, RoundingMode, ToPrimitive, Zero};

use tally_ast::Value;

use crate::engine::Engine;
use crate::error::EvalError;
use crate::function::{Function, ParamRule};

use super::{int_arg, number_arg};

pub(super) fn register(engine: &mut Engine) {
    engine.add_function(absolute_value());
    engine.add_function(ceiling());
    engine.add_function(floor());
    engine.add_function(round());
    engine.add_function(square_root());
    engine.add_function(hypotenuse());
    engine.add_function(maximum());
    engine.add_function(minimum());
    engine.add_function(mean());
    engine.add_function(median());
    engine.add_function(log10());
    engine.add_function(ln());
}

fn absolute_value() -> Function {
    Function::new(["abs", "absolutevalue"], 1, Some(1), |_, _, name, args| {
        Ok(Value::Number(number_arg(name, args, 0)?.abs()))
    })
    .params(ParamRule::NumbersOnly)
}

fn ceiling() -> Function {
    Function::new(["ceil", "ceiling"], 1, Some(1), |_, _, name, args| {
        let n = number_arg(name, args, 0)?;
        Ok(Value::Number(n.with_scale_round(0, RoundingMode::Ceiling)))
    })
    .params(ParamRule::NumbersOnly)
}

fn floor() -> Function {
    Function::new(["floor"], 1, Some(1), |_, _, name, args| {
        let n = number_arg(name, args, 0)?;
        Ok(Value::Number(n.with_scale_round(0, RoundingMode::Floor)))
    })
    .params(ParamRule::NumbersOnly)
}

/// `round(x)` or `round(x, scale)`, half-up.
fn round() -> Function {
    Function::new(["round"], 1, Some(2), |_, _, name, args| {
        let n = number_arg(name, args, 0)?;
        let scale = if args.len() > 1 {
            int_arg(name, args, 1)?
        } else {
            0
        };
        Ok(Value::Number(n.with_scale_round(scale, RoundingMode::HalfUp)))
    })
    .params(ParamRule::NumbersOnly)
}

/// `sqrt(x)` or `sqrt(x, scale)`; Newton's method at the requested
/// scale, default 10.
fn square_root() -> Function {
    Function::new(["sqrt", "squareroot"], 1, Some(2), |_, _, name, args| {
        let x = number_arg(name, args, 0)?;
        let scale = if args.len() > 1 {
            int_arg(name, args, 1)?
        } else {
            10
        };
        Ok(Value::Number(newton_sqrt(x, scale)?))
    })
    .params(ParamRule::NumbersOnly)
}

fn newton_sqrt(x: &BigDecimal, scale: i64) -> Result<BigDecimal, EvalError> {
    if x < &BigDecimal::zero() {
        return Err(EvalError::Evaluation(
            "square root of a negative number".to_owned(),
        ));
    }
    if x.is_zero() {
        return Ok(BigDecimal::zero());
    }
    let working = scale + 2;
    let two = BigDecimal::from(2);
    let mut guess = (x / &two).with_scale_round(working, RoundingMode::HalfUp);
    if guess.is_zero() {
        guess = BigDecimal::from(1);
    }
    // Converges in a handful of steps; the cap guards against a final
    // one-ulp oscillation.
    for _ in 0..200 {
        let quotient = (x / &guess).with_scale_round(working, RoundingMode::HalfUp);
        let next = ((&guess + &quotient) / &two).with_scale_round(working, RoundingMode::HalfUp);
        if next == guess {
            break;
        }
        guess = next;
    }
    Ok(guess.with_scale_round(scale, RoundingMode::HalfUp))
}

fn hypotenuse() -> Function {
    Function::new(["hypot", "hypotenuse"], 2, Some(2), |_, _, name, args| {
        let a = number_arg(name, args, 0)?;
        let b = number_arg(name, args, 1)?;
        let sum = a * a + b * b;
        Ok(Value::Number(newton_sqrt(&sum, 10)?))
    })
    .params(ParamRule::NumbersOnly)
}

fn maximum() -> Function {
    Function::new(["max"], 1, None, |_, _, name, args| {
        let mut best = number_arg(name, args, 0)?.clone();
        for index in 1..args.len() {
            let n = number_arg(name, args, index)?;
            if n > &best {
                best = n.clone();
            }
        }
        Ok(Value::Number(best))
    })
    .params(ParamRule::NumbersOnly)
}

fn minimum() -> Function {
    Function::new(["min"], 1, None, |_, _, name, args| {
        let mut best = number_arg(name, args, 0)?.clone();
        for index in 1..args.len() {
            let n = number_arg(name, args, index)?;
            if n < &best {
                best = n.clone();
            }
        }
        Ok(Value::Number(best))
    })
    .params(ParamRule::NumbersOnly)
}

fn mean() -> Function {
    Function::new(["mean", "avg", "average"], 1, None, |_, _, name, args| {
        let mut sum = BigDecimal::zero();
        for index in 0..args.len() {
            sum = &sum + number_arg(name, args, index)?;
        }
        let count = BigDecimal::from(args.len() as u64);
        Ok(Value::Number(sum / count))
    })
    .params(ParamRule::NumbersOnly)
}

fn median() -> Function {
    Function::new(["median"], 1, None, |_, _, name, args| {
        let mut values = Vec::with_capacity(args.len());
        for index in 0..args.len() {
            values.push(number_arg(name, args, index)?.clone());
        }
        values.sort();
        let mid = values.len() / 2;
        let result = if values.len() % 2 == 1 {
            values[mid].clone()
        } else {
            (&values[mid - 1] + &values[mid]) / BigDecimal::from(2)
        };
        Ok(Value::Number(result))
    })
    .params(ParamRule::NumbersOnly)
}

fn log10() -> Function {
    Function::new(["log"], 1, Some(1), |_, _, name, args| {
        logarithm(name, args, f64::log10)
    })
    .params(ParamRule::NumbersOnly)
}

fn ln() -> Function {
    Function::new(["ln"], 1, Some(1), |_, _, name, args| {
        logarithm(name, args, f64::ln)
    })
    .params(ParamRule::NumbersOnly)
}

/// Logarithms go through `f64`; callers wanting clean results round.
fn logarithm(name: &str, args: &[Value], log: fn(f64) -> f64) -> Result<Value, EvalError> {
    let n = number_arg(name, args, 0)?;
    let x = n
        .to_f64()
        .ok_or_else(|| EvalError::Evaluation(format!("parameter of '{name}' is out of range")))?;
    if x <= 0.0 {
        return Err(EvalError::Evaluation(
            "logarithm of a non-positive number".to_owned(),
        ));
    }
    BigDecimal::from_f64(log(x))
        .map(Value::Number)
        .ok_or_else(|| EvalError::Evaluation("logarithm is not finite".to_owned()))
}
