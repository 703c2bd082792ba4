//! Logical, equality, and comparison functions. All of them return the
//! decimals 1 and 0.

use tally_ast::Value;

use crate::engine::Engine;
use crate::function::{Function, ParamRule};

use super::number_arg;

pub(super) fn register(engine: &mut Engine) {
    engine.add_function(not());
    engine.add_function(and());
    engine.add_function(or());
    engine.add_function(equals());
    engine.add_function(not_equals());
    engine.add_function(str_equals());
    engine.add_function(str_not_equals());
    engine.add_function(comparison([">", "gt"], |o| o == std::cmp::Ordering::Greater));
    engine.add_function(comparison([">=", "ge"], |o| o != std::cmp::Ordering::Less));
    engine.add_function(comparison(["<", "lt"], |o| o == std::cmp::Ordering::Less));
    engine.add_function(comparison(["<=", "le"], |o| o != std::cmp::Ordering::Greater));
}

fn not() -> Function {
    Function::new(["!", "not"], 1, Some(1), |_, _, _, args| {
        Ok(Value::truth(!args[0].is_truthy()))
    })
    .params(ParamRule::Truthy)
}

fn and() -> Function {
    Function::new(["&&", "and"], 2, None, |_, _, _, args| {
        Ok(Value::truth(args.iter().all(Value::is_truthy)))
    })
    .params(ParamRule::Truthy)
}

fn or() -> Function {
    Function::new(["||", "or"], 2, None, |_, _, _, args| {
        Ok(Value::truth(args.iter().any(Value::is_truthy)))
    })
    .params(ParamRule::Truthy)
}

/// Loose equality: as soon as either side of a pair is a string, both
/// sides compare as trimmed, case-insensitive text; otherwise
/// numerically. Three or more arguments chain pairwise.
fn equals() -> Function {
    Function::new(["==", "eq", "equals"], 2, None, |_, _, _, args| {
        Ok(Value::truth(chained(args, loose_pair_eq)))
    })
    .params(ParamRule::NumbersOrStrings)
}

fn not_equals() -> Function {
    Function::new(["!=", "neq", "notequals"], 2, None, |_, _, _, args| {
        Ok(Value::truth(!chained(args, loose_pair_eq)))
    })
    .params(ParamRule::NumbersOrStrings)
}

/// Strict string equality: trimmed but case-sensitive, over the raw
/// string form of each argument.
fn str_equals() -> Function {
    Function::new(
        ["eqs", "strequals", "equalsstrict"],
        2,
        None,
        |_, _, _, args| Ok(Value::truth(chained(args, strict_pair_eq))),
    )
    .params(ParamRule::NumbersOrStrings)
}

fn str_not_equals() -> Function {
    Function::new(
        ["neqs", "strnotequals", "notequalsstrict"],
        2,
        None,
        |_, _, _, args| Ok(Value::truth(!chained(args, strict_pair_eq))),
    )
    .params(ParamRule::NumbersOrStrings)
}

fn chained(args: &[Value], pair: fn(&Value, &Value) -> bool) -> bool {
    args.windows(2).all(|w| pair(&w[0], &w[1]))
}

fn loose_pair_eq(a: &Value, b: &Value) -> bool {
    if a.is_str() || b.is_str() {
        let a = a.to_string();
        let b = b.to_string();
        a.trim().eq_ignore_ascii_case(b.trim())
    } else {
        a.as_number() == b.as_number()
    }
}

fn strict_pair_eq(a: &Value, b: &Value) -> bool {
    let a = a.to_string();
    let b = b.to_string();
    a.trim() == b.trim()
}

fn comparison(
    aliases: [&'static str; 2],
    accept: fn(std::cmp::Ordering) -> bool,
) -> Function {
    Function::new(aliases, 2, Some(2), move |_, _, name, args| {
        let a = number_arg(name, args, 0)?;
        let b = number_arg(name, args, 1)?;
        let ordering = a.cmp(b);
        Ok(Value::truth(accept(ordering)))
    })
    .params(ParamRule::NumbersOnly)
}
