//! Engine facade: function registry, transform pipeline, and the parsed
//! [`Expression`] handle.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use tally_ast::{Expr, Value};

use crate::builtins;
use crate::error::EngineError;
use crate::evaluator;
use crate::function::Function;
use crate::reducer;
use crate::resolver::{MapVariableResolver, VariableResolver};
use crate::transform::{StringLiteralTransformer, Transform};

/// The expression engine: a function registry plus an ordered list of
/// source-text transforms.
///
/// Construction and registration take `&mut self`; parsing and
/// evaluation take `&self`, so a configured engine can be shared across
/// threads.
pub struct Engine {
    // lowercase alias -> function; last registration wins per alias
    functions: FxHashMap<String, Arc<Function>>,
    transforms: Vec<Box<dyn Transform + Send + Sync>>,
}

impl Engine {
    /// An engine with the standard function library registered.
    pub fn new() -> Self {
        let mut engine = Engine::bare();
        builtins::register_all(&mut engine);
        engine
    }

    /// An engine with an empty registry. Even operators are undefined
    /// until registered.
    pub fn bare() -> Self {
        Engine {
            functions: FxHashMap::default(),
            transforms: Vec::new(),
        }
    }

    /// Register a function under all of its aliases, case-insensitively.
    /// Re-registering an alias replaces the previous binding.
    pub fn add_function(&mut self, function: Function) {
        let function = Arc::new(function);
        for alias in function.aliases() {
            self.functions
                .insert(alias.to_lowercase(), Arc::clone(&function));
        }
    }

    /// Append a transform to the pipeline. Transforms run in
    /// registration order, and never see quoted string literals.
    pub fn add_transform(&mut self, transform: impl Transform + Send + Sync + 'static) {
        self.transforms.push(Box::new(transform));
    }

    /// Look up a function by any alias, case-insensitively.
    pub fn function(&self, name: &str) -> Option<&Arc<Function>> {
        self.functions.get(&name.to_lowercase())
    }

    /// Run the transform pipeline over source text, shielding string
    /// literals. A fresh transformer serves each run, so placeholder
    /// numbering restarts at zero.
    fn apply_transforms(&self, source: &str) -> String {
        if self.transforms.is_empty() {
            return source.to_owned();
        }
        let mut literals = StringLiteralTransformer::new();
        let mut text = literals.conceal(source);
        for transform in &self.transforms {
            text = transform.transform(&text);
        }
        literals.restore(&text)
    }

    /// Transform and parse source text into a reusable [`Expression`].
    pub fn parse_expression(&self, source: &str) -> Result<Expression<'_>, EngineError> {
        let text = self.apply_transforms(source);
        let root = tally_parse::parse(&text)?;
        Ok(Expression { engine: self, root })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

/// A parsed expression bound to the engine that parsed it.
///
/// Expressions are immutable and reusable: the same expression may be
/// evaluated against many resolvers.
pub struct Expression<'e> {
    engine: &'e Engine,
    root: Expr,
}

impl<'e> Expression<'e> {
    /// The expression tree.
    pub fn tree(&self) -> &Expr {
        &self.root
    }

    /// Canonical S-expression dump of the tree.
    pub fn sexpr(&self) -> String {
        self.root.sexpr()
    }

    /// Render the tree back to minimally parenthesized source text.
    pub fn format(&self) -> String {
        tally_fmt::format(&self.root)
    }

    /// Evaluate against a resolver.
    pub fn evaluate(&self, resolver: &mut dyn VariableResolver) -> Result<Value, EngineError> {
        evaluator::evaluate(self.engine, resolver, &self.root)
    }

    /// Evaluate against a throwaway [`MapVariableResolver`].
    pub fn evaluate_default(&self) -> Result<Value, EngineError> {
        let mut resolver = MapVariableResolver::new();
        self.evaluate(&mut resolver)
    }

    /// Reduce to a deterministic expression: variables fold to literals
    /// and every non-deterministic subtree is evaluated once and
    /// replaced by its result.
    ///
    /// If the returned tree is structurally equal to [`Expression::tree`],
    /// the expression was already fully deterministic.
    pub fn freeze(
        &self,
        resolver: &mut dyn VariableResolver,
    ) -> Result<Expression<'e>, EngineError> {
        let root = reducer::reduce(self.engine, resolver, &self.root)?;
        Ok(Expression {
            engine: self.engine,
            root,
        })
    }
}
