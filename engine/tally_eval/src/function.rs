//! Functions as data.
//!
//! There is no trait hierarchy here: a [`Function`] is a record of
//! aliases, arity bounds, a parameter-type rule, a determinism flag, and
//! a boxed body. Operators are registered under their symbol (`+`, `&&`,
//! `=`) and dispatched exactly like named calls, so hosts can override
//! them.

use tally_ast::Value;

use crate::engine::Engine;
use crate::error::EvalError;
use crate::resolver::VariableResolver;

/// Signature of a function body. `name` is the alias the call was made
/// under, so shared bodies can report the invoked spelling.
pub type FunctionBody = Box<
    dyn Fn(&Engine, &mut dyn VariableResolver, &str, &[Value]) -> Result<Value, EvalError>
        + Send
        + Sync,
>;

/// Parameter-type rule checked over all arguments before the body runs.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ParamRule {
    /// No restriction.
    Any,
    NumbersOnly,
    NumbersOrStrings,
    StringsOnly,
    /// Anything with a truth value: booleans, numbers, strings.
    Truthy,
}

impl ParamRule {
    fn allows(self, value: &Value) -> bool {
        match self {
            ParamRule::Any | ParamRule::Truthy => true,
            ParamRule::NumbersOnly => value.is_number(),
            ParamRule::NumbersOrStrings => value.is_number() || value.is_str(),
            ParamRule::StringsOnly => value.is_str(),
        }
    }

    const fn expected(self) -> &'static str {
        match self {
            ParamRule::Any => "any value",
            ParamRule::NumbersOnly => "number",
            ParamRule::NumbersOrStrings => "number or string",
            ParamRule::StringsOnly => "string",
            ParamRule::Truthy => "truthy value",
        }
    }
}

/// A registered function.
pub struct Function {
    aliases: Vec<String>,
    min_args: usize,
    max_args: Option<usize>,
    deterministic: bool,
    rule: ParamRule,
    body: FunctionBody,
}

impl Function {
    /// A deterministic function accepting any argument types. `max_args`
    /// of `None` means unlimited.
    pub fn new<I, S, F>(aliases: I, min_args: usize, max_args: Option<usize>, body: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Engine, &mut dyn VariableResolver, &str, &[Value]) -> Result<Value, EvalError>
            + Send
            + Sync
            + 'static,
    {
        Function {
            aliases: aliases.into_iter().map(Into::into).collect(),
            min_args,
            max_args,
            deterministic: true,
            rule: ParamRule::Any,
            body: Box::new(body),
        }
    }

    /// Mark this function as producing different results across calls
    /// (dice rolls and the like). The deterministic reducer folds calls
    /// to such functions into literals.
    pub fn non_deterministic(mut self) -> Self {
        self.deterministic = false;
        self
    }

    /// Restrict the argument types accepted before the body runs.
    pub fn params(mut self, rule: ParamRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    /// Validate arguments and run the body.
    pub fn invoke(
        &self,
        engine: &Engine,
        resolver: &mut dyn VariableResolver,
        name: &str,
        args: &[Value],
    ) -> Result<Value, EvalError> {
        self.check_args(name, args)?;
        (self.body)(engine, resolver, name, args)
    }

    fn check_args(&self, name: &str, args: &[Value]) -> Result<(), EvalError> {
        let count_ok = args.len() >= self.min_args
            && self.max_args.map_or(true, |max| args.len() <= max);
        if !count_ok {
            return Err(EvalError::ParameterCount {
                name: name.to_owned(),
                expected: self.expected_count(),
                got: args.len(),
            });
        }
        for (index, value) in args.iter().enumerate() {
            if !self.rule.allows(value) {
                return Err(EvalError::ParameterType {
                    name: name.to_owned(),
                    index,
                    expected: self.rule.expected(),
                    actual: value.type_name(),
                });
            }
        }
        Ok(())
    }

    fn expected_count(&self) -> String {
        fn plural(n: usize) -> &'static str {
            if n == 1 {
                "parameter"
            } else {
                "parameters"
            }
        }
        match (self.min_args, self.max_args) {
            (min, Some(max)) if min == max => format!("exactly {min} {}", plural(min)),
            (min, Some(max)) => format!("between {min} and {max} parameters"),
            (min, None) => format!("at least {min} {}", plural(min)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::resolver::MapVariableResolver;

    fn constant(n: i64) -> Function {
        Function::new(["k"], 0, Some(0), move |_, _, _, _| Ok(Value::from(n)))
    }

    #[test]
    fn count_violation_message_exact() {
        let engine = Engine::bare();
        let mut resolver = MapVariableResolver::new();
        let err = constant(1)
            .invoke(&engine, &mut resolver, "k", &[Value::from(1)])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "function 'k' requires exactly 0 parameters, got 1"
        );
    }

    #[test]
    fn count_violation_message_open_ended() {
        let f = Function::new(["f"], 1, None, |_, _, _, _| Ok(Value::from(0)));
        let engine = Engine::bare();
        let mut resolver = MapVariableResolver::new();
        let err = f.invoke(&engine, &mut resolver, "f", &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "function 'f' requires at least 1 parameter, got 0"
        );
    }

    #[test]
    fn type_rule_is_checked_before_the_body() {
        let f = Function::new(["f"], 1, None, |_, _, _, _| Ok(Value::from(0)))
            .params(ParamRule::NumbersOnly);
        let engine = Engine::bare();
        let mut resolver = MapVariableResolver::new();
        let err = f
            .invoke(&engine, &mut resolver, "f", &[Value::from("nope")])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "function 'f' parameter 0: expected number, got string"
        );
    }

    #[test]
    fn invoked_alias_appears_in_errors() {
        let f = Function::new(["add", "+"], 2, None, |_, _, _, _| Ok(Value::from(0)));
        let engine = Engine::bare();
        let mut resolver = MapVariableResolver::new();
        let err = f.invoke(&engine, &mut resolver, "+", &[]).unwrap_err();
        assert!(err.to_string().contains("'+'"));
    }
}
