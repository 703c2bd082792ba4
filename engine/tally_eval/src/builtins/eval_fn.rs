//! The `eval` function: nested expressions as strings.

use tally_ast::Value;

use crate::engine::Engine;
use crate::error::EvalError;
use crate::function::{Function, ParamRule};

use super::str_arg;

pub(super) fn register(engine: &mut Engine) {
    engine.add_function(eval());
}

/// Each argument is parsed through the invoking engine (transforms
/// included) and evaluated against the current resolver, so earlier
/// arguments can assign variables that later ones read:
/// `eval('a=2*2', 'b=3+1', 'a*b')` is 16. Produces the last result.
/// Re-entrancy is plain recursion.
fn eval() -> Function {
    Function::new(["eval"], 1, None, |engine, resolver, name, args| {
        let mut result = Value::truth(false);
        for index in 0..args.len() {
            let source = str_arg(name, args, index)?;
            let expression = engine
                .parse_expression(source)
                .map_err(|e| EvalError::Evaluation(e.to_string()))?;
            result = expression
                .evaluate(resolver)
                .map_err(|e| EvalError::Evaluation(e.to_string()))?;
        }
        Ok(result)
    })
    .params(ParamRule::StringsOnly)
}
