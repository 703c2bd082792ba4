use pretty_assertions::assert_eq;

use crate::{Engine, RegexTransform, Value};

#[test]
fn transforms_rewrite_source_before_parsing() {
    let mut engine = Engine::new();
    engine.add_transform(RegexTransform::new([(r"(\d+)d(\d+)", "roll($1, $2)")]).unwrap());
    let expr = engine.parse_expression("2d6 + 1").unwrap();
    assert_eq!(expr.sexpr(), "( + ( roll 2 6 ) 1 )");
}

#[test]
fn transforms_never_touch_string_literals() {
    let mut engine = Engine::new();
    engine.add_transform(RegexTransform::new([("foo", "bar")]).unwrap());
    let expr = engine.parse_expression("foo + 'foo'").unwrap();
    assert_eq!(expr.sexpr(), "( + bar 'foo' )");
}

#[test]
fn transforms_apply_in_registration_order() {
    let mut engine = Engine::new();
    engine.add_transform(RegexTransform::new([("a", "b")]).unwrap());
    engine.add_transform(RegexTransform::new([("b", "c")]).unwrap());
    let expr = engine.parse_expression("a").unwrap();
    assert_eq!(expr.sexpr(), "c");
}

#[test]
fn rewritten_text_evaluates_normally() {
    let mut engine = Engine::new();
    engine.add_transform(
        RegexTransform::new([(r"(\d+)\s*\*\*\s*(\d+)", "pow($1, $2)")]).unwrap(),
    );
    let expr = engine.parse_expression("2 ** 5").unwrap();
    assert_eq!(expr.evaluate_default().unwrap(), Value::from(32));
}

#[test]
fn without_transforms_source_is_untouched() {
    let engine = Engine::new();
    let expr = engine.parse_expression("'StringLiteral0Token'").unwrap();
    assert_eq!(expr.evaluate_default().unwrap(), Value::from("StringLiteral0Token"));
}
