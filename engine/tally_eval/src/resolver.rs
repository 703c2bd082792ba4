//! Variable resolution.
//!
//! The engine never stores variables itself; every lookup and assignment
//! goes through a host-supplied [`VariableResolver`]. The bundled
//! [`MapVariableResolver`] is a case-insensitive in-memory map suitable
//! for tests and simple hosts.

use rustc_hash::FxHashMap;

use tally_ast::Value;

use crate::error::EvalError;

/// How a variable reference was written.
///
/// `Prompt` corresponds to the `?name` form and signals "ask the user";
/// resolvers that cannot prompt treat both modes alike.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum VariableMode {
    Normal,
    Prompt,
}

/// Host-supplied variable store.
pub trait VariableResolver {
    fn contains_variable(&self, name: &str, mode: VariableMode) -> Result<bool, EvalError>;

    /// Look up a variable. Unknown names are an [`EvalError::UndefinedVariable`].
    fn get_variable(&self, name: &str, mode: VariableMode) -> Result<Value, EvalError>;

    /// Write a variable. Resolvers may reject the write.
    fn set_variable(
        &mut self,
        name: &str,
        mode: VariableMode,
        value: Value,
    ) -> Result<(), EvalError>;

    /// The variable names currently known, in their original spelling.
    fn variable_names(&self) -> Vec<String>;
}

/// Case-insensitive in-memory resolver.
///
/// Pre-seeded with `true` = 1 and `false` = 0; those two names are
/// read-only through [`VariableResolver::set_variable`]. Lookups keep the
/// spelling of the first write for [`VariableResolver::variable_names`].
#[derive(Clone, Debug)]
pub struct MapVariableResolver {
    // lowercase key -> (original spelling, value)
    vars: FxHashMap<String, (String, Value)>,
}

impl MapVariableResolver {
    pub fn new() -> Self {
        let mut resolver = MapVariableResolver {
            vars: FxHashMap::default(),
        };
        resolver.insert("true", Value::from(1));
        resolver.insert("false", Value::from(0));
        resolver
    }

    /// Seed a variable directly, bypassing the read-only guard.
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.vars
            .insert(name.to_lowercase(), (name.to_owned(), value.into()));
    }
}

impl Default for MapVariableResolver {
    fn default() -> Self {
        MapVariableResolver::new()
    }
}

impl VariableResolver for MapVariableResolver {
    fn contains_variable(&self, name: &str, _mode: VariableMode) -> Result<bool, EvalError> {
        Ok(self.vars.contains_key(&name.to_lowercase()))
    }

    fn get_variable(&self, name: &str, _mode: VariableMode) -> Result<Value, EvalError> {
        self.vars
            .get(&name.to_lowercase())
            .map(|(_, value)| value.clone())
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_owned()))
    }

    fn set_variable(
        &mut self,
        name: &str,
        _mode: VariableMode,
        value: Value,
    ) -> Result<(), EvalError> {
        // The boolean constants are read-only.
        if name.eq_ignore_ascii_case("true") || name.eq_ignore_ascii_case("false") {
            return Err(EvalError::Assignment(name.to_owned()));
        }
        self.insert(name, value);
        Ok(())
    }

    fn variable_names(&self) -> Vec<String> {
        self.vars.values().map(|(name, _)| name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookups_are_case_insensitive() {
        let mut r = MapVariableResolver::new();
        r.set_variable("simpleInt", VariableMode::Normal, Value::from(10))
            .unwrap();
        assert_eq!(
            r.get_variable("SIMPLEINT", VariableMode::Normal).unwrap(),
            Value::from(10)
        );
        assert!(r.contains_variable("simpleint", VariableMode::Normal).unwrap());
    }

    #[test]
    fn boolean_constants_are_seeded() {
        let r = MapVariableResolver::new();
        assert_eq!(
            r.get_variable("true", VariableMode::Normal).unwrap(),
            Value::from(1)
        );
        assert_eq!(
            r.get_variable("FALSE", VariableMode::Normal).unwrap(),
            Value::from(0)
        );
    }

    #[test]
    fn boolean_constants_reject_writes_without_mutating() {
        let mut r = MapVariableResolver::new();
        let err = r
            .set_variable("true", VariableMode::Normal, Value::from(2))
            .unwrap_err();
        assert_eq!(err.to_string(), "'true' can not be the target of assignment");
        assert_eq!(
            r.get_variable("true", VariableMode::Normal).unwrap(),
            Value::from(1)
        );
    }

    #[test]
    fn unknown_variable_is_an_error() {
        let r = MapVariableResolver::new();
        assert!(r.get_variable("nope", VariableMode::Normal).is_err());
    }
}
