//! Unit tests for the expression compiler.

use super::{
    compiler::compile,
    rpn::{format_rpn, BinaryOp, RpnToken},
};

fn rpn(source: &str) -> String {
    format_rpn(&compile(source))
}

#[test]
fn test_precedence() {
    assert_eq!(rpn("2 + 3 * 4"), "2 3 4 * +");
    assert_eq!(rpn("2 * 3 + 4"), "2 3 * 4 +");
    assert_eq!(rpn("1 + 2 < 4 && 5 == 5 || false"), "1 2 + 4 < 5 5 == && false ||");
}

#[test]
fn test_equal_precedence_is_left_to_right() {
    assert_eq!(rpn("10 - 4 - 3"), "10 4 - 3 -");
    assert_eq!(rpn("8 / 4 * 2"), "8 4 / 2 *");
    assert_eq!(rpn("1 < 2 == true"), "1 2 < true ==");
}

#[test]
fn test_power_groups_right_to_left() {
    assert_eq!(rpn("2 ** 3 ** 2"), "2 3 2 ** **");
    assert_eq!(rpn("2 * 3 ** 2"), "2 3 2 ** *");
}

#[test]
fn test_parentheses() {
    assert_eq!(rpn("(2 + 3) * 4"), "2 3 + 4 *");
    assert_eq!(rpn("((1))"), "1");
}

#[test]
fn test_function_call() {
    assert_eq!(rpn("Math.sqrt(16)"), "16 #1 @Math.sqrt");
    assert_eq!(rpn("Math.max(1, 2 + 3) * 2"), "1 2 3 + #2 @Math.max 2 *");
}

#[test]
fn test_call_without_arguments() {
    assert_eq!(rpn("Math.random()"), "#0 @Math.random");
    assert_eq!(rpn("f() + 1"), "#0 @f 1 +");
}

#[test]
fn test_nested_calls() {
    assert_eq!(rpn("f(g(1), 2)"), "1 #1 @g 2 #2 @f");
    assert_eq!(rpn("f(g())"), "#0 @g #1 @f");
    assert_eq!(rpn("f((1 + 2) * 3)"), "1 2 + 3 * #1 @f");
}

#[test]
fn test_prefix_operators() {
    assert_eq!(rpn("-x * 2"), "x neg 2 *");
    assert_eq!(rpn("2 * -3"), "2 3 neg *");
    assert_eq!(rpn("!a && b"), "a ! b &&");
    assert_eq!(rpn("f(-1)"), "1 neg #1 @f");
}

#[test]
fn test_string_literals() {
    let tokens = compile("\"a\" + 1");

    assert_eq!(
        tokens,
        vec![
            RpnToken::String("a".to_string()),
            RpnToken::Number("1".to_string()),
            RpnToken::Binary(BinaryOp::Add),
        ]
    );
}

#[test]
fn test_unclosed_call_is_closed_implicitly() {
    assert_eq!(rpn("f(1, 2"), "1 2 #2 @f");
}

#[test]
fn test_unknown_characters_are_skipped() {
    assert_eq!(rpn("1 + 2;"), "1 2 +");
}

#[test]
fn test_empty_expression() {
    assert!(compile("").is_empty());
}
