use pretty_assertions::assert_eq;

use crate::{Engine, Function, MapVariableResolver, Value};

/// An engine whose `nondeterministic` function is flagged as such but
/// conveniently always produces 1, so reduced trees are predictable.
fn engine_with_die() -> Engine {
    let mut engine = Engine::new();
    engine.add_function(
        Function::new(["nondeterministic"], 1, None, |_, _, _, _| {
            Ok(Value::from(1))
        })
        .non_deterministic(),
    );
    engine
}

fn frozen_sexpr(engine: &Engine, vars: &mut MapVariableResolver, source: &str) -> String {
    engine
        .parse_expression(source)
        .unwrap()
        .freeze(vars)
        .unwrap()
        .sexpr()
}

#[test]
fn fully_deterministic_tree_reduces_to_itself() {
    let engine = engine_with_die();
    let mut vars = MapVariableResolver::new();
    let expr = engine.parse_expression("200+2+2*2").unwrap();
    let frozen = expr.freeze(&mut vars).unwrap();
    assert_eq!(frozen.tree(), expr.tree());
}

#[test]
fn nondeterministic_subtree_folds_to_its_value() {
    let engine = engine_with_die();
    let mut vars = MapVariableResolver::new();
    assert_eq!(
        frozen_sexpr(&engine, &mut vars, "100+nondeterministic(4, 1)*10"),
        "( + 100 ( * 1 10 ) )"
    );
}

#[test]
fn assignment_keeps_its_target_and_reduces_the_rhs() {
    let engine = engine_with_die();
    let mut vars = MapVariableResolver::new();
    assert_eq!(
        frozen_sexpr(&engine, &mut vars, "a=200+2+nondeterministic(2, 2)"),
        "( = a ( + ( + 200 2 ) 1 ) )"
    );
}

#[test]
fn variables_fold_to_literals() {
    let engine = engine_with_die();
    let mut vars = MapVariableResolver::new();
    vars.insert("simpleInt", Value::from(10));
    assert_eq!(frozen_sexpr(&engine, &mut vars, "1+simpleInt"), "( + 1 10 )");
}

#[test]
fn string_variables_fold_to_quoted_literals() {
    let engine = engine_with_die();
    let mut vars = MapVariableResolver::new();
    vars.insert("s", Value::from("foo"));
    let frozen = engine
        .parse_expression("s + 1")
        .unwrap()
        .freeze(&mut vars)
        .unwrap();
    assert_eq!(frozen.sexpr(), "( + \"foo\" 1 )");
    // The reduced tree still formats to parseable text.
    assert_eq!(frozen.format(), "\"foo\" + 1");
}

#[test]
fn boolean_variables_fold_to_one_or_zero() {
    let engine = engine_with_die();
    let mut vars = MapVariableResolver::new();
    vars.insert("flag", Value::Bool(true));
    assert_eq!(frozen_sexpr(&engine, &mut vars, "flag"), "1");
}

#[test]
fn prompt_variables_fold_too() {
    let engine = engine_with_die();
    let mut vars = MapVariableResolver::new();
    vars.insert("foo", Value::from(3));
    assert_eq!(frozen_sexpr(&engine, &mut vars, "?foo * 2"), "( * 3 2 )");
}

#[test]
fn frozen_expression_evaluates_stably() {
    let engine = engine_with_die();
    let mut vars = MapVariableResolver::new();
    let frozen = engine
        .parse_expression("nondeterministic(6) + 10")
        .unwrap()
        .freeze(&mut vars)
        .unwrap();
    let first = frozen.evaluate(&mut vars).unwrap();
    let second = frozen.evaluate(&mut vars).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, Value::from(11));
}

#[test]
fn deterministic_calls_survive_with_reduced_arguments() {
    let engine = engine_with_die();
    let mut vars = MapVariableResolver::new();
    vars.insert("x", Value::from(4));
    assert_eq!(
        frozen_sexpr(&engine, &mut vars, "max(x, nondeterministic(4))"),
        "( max 4 1 )"
    );
}

#[test]
fn freezing_with_an_unknown_function_fails() {
    let engine = engine_with_die();
    let mut vars = MapVariableResolver::new();
    let expr = engine.parse_expression("mystery(1)").unwrap();
    assert!(expr.freeze(&mut vars).is_err());
}

#[test]
fn freezing_with_an_unknown_variable_fails() {
    let engine = engine_with_die();
    let mut vars = MapVariableResolver::new();
    let expr = engine.parse_expression("1 + ghost").unwrap();
    assert!(expr.freeze(&mut vars).is_err());
}
