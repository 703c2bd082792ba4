//! Evaluation and engine error types.

use thiserror::Error;

use tally_parse::ParseError;

/// A runtime failure raised while evaluating a tree or inside a function
/// body.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum EvalError {
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("undefined function '{0}'")]
    UndefinedFunction(String),

    #[error("function '{name}' requires {expected}, got {got}")]
    ParameterCount {
        name: String,
        expected: String,
        got: usize,
    },

    #[error("function '{name}' parameter {index}: expected {expected}, got {actual}")]
    ParameterType {
        name: String,
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("'{0}' can not be the target of assignment")]
    Assignment(String),

    #[error("{0}")]
    Evaluation(String),
}

/// Top-level engine failure: either the text did not parse, or evaluation
/// failed somewhere in the tree.
///
/// Evaluation failures carry a trail of enclosing function names,
/// innermost first, accumulated as the error propagates out of nested
/// calls.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error("{source}{}", trail_suffix(.trail))]
    Eval {
        source: EvalError,
        trail: Vec<String>,
    },
}

impl EngineError {
    /// Record that the error surfaced while `name` was being invoked.
    pub fn in_function(self, name: &str) -> Self {
        match self {
            EngineError::Eval { source, mut trail } => {
                trail.push(name.to_owned());
                EngineError::Eval { source, trail }
            }
            other => other,
        }
    }

    /// The underlying evaluation error, if this is one.
    pub fn eval_error(&self) -> Option<&EvalError> {
        match self {
            EngineError::Eval { source, .. } => Some(source),
            EngineError::Syntax(_) => None,
        }
    }
}

impl From<EvalError> for EngineError {
    fn from(source: EvalError) -> Self {
        EngineError::Eval {
            source,
            trail: Vec::new(),
        }
    }
}

fn trail_suffix(trail: &[String]) -> String {
    let mut out = String::new();
    for (i, name) in trail.iter().enumerate() {
        if i == 0 {
            out.push_str("; in function '");
        } else {
            out.push_str(", called from '");
        }
        out.push_str(name);
        out.push('\'');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trail_renders_innermost_first() {
        let err = EngineError::from(EvalError::UndefinedVariable("x".to_owned()))
            .in_function("inner")
            .in_function("outer");
        assert_eq!(
            err.to_string(),
            "undefined variable 'x'; in function 'inner', called from 'outer'"
        );
    }

    #[test]
    fn syntax_errors_ignore_the_trail() {
        let err = EngineError::Syntax(ParseError::new("boom", 3)).in_function("f");
        assert_eq!(err.to_string(), "syntax error at position 3: boom");
    }
}
