//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Numeric literals and identifiers
//! - String literals and the naive escape check
//! - Operators and punctuation

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 .5");

    assert_eq!(tokens.len(), 4);
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Number));
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].value, ".5");
}

#[test]
fn test_number_takes_single_decimal_point() {
    let tokens = tokenize("1.2.3");

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "1.2");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].value, ".3");
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo _bar $baz Math.sqrt Point.origin");

    assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "_bar");
    assert_eq!(tokens[2].value, "$baz");
    assert_eq!(tokens[3].value, "Math.sqrt");
    assert_eq!(tokens[4].value, "Point.origin");
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" 'world' "multiple words""#);

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "world");
    assert_eq!(tokens[2].value, "multiple words");
}

#[test]
fn test_string_contents_are_verbatim() {
    let tokens = tokenize(r#""say \"hi\"" + 1"#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, r#"say \"hi\""#);
    assert_eq!(tokens[1].kind, TokenKind::Plus);
    assert_eq!(tokens[2].kind, TokenKind::Number);
}

#[test]
fn test_other_quote_inside_string() {
    let tokens = tokenize(r#""it's""#);

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].value, "it's");
}

#[test]
fn test_unterminated_string_runs_to_end() {
    let tokens = tokenize("'abc + 1");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "abc + 1");
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % ** < <= > >= == != === !== && || !"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::StarStar,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::StrictEquals,
            TokenKind::StrictNotEquals,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
        ]
    );
}

#[test]
fn test_tokenize_call() {
    assert_eq!(
        kinds("Math.max(1,2)"),
        vec![
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::Number,
            TokenKind::Comma,
            TokenKind::Number,
            TokenKind::CloseParen,
        ]
    );
}

#[test]
fn test_whitespace_is_discarded() {
    let tokens = tokenize("  2\t+\n3  ");

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].pos, 2);
    assert_eq!(tokens[2].pos, 6);
}

#[test]
fn test_unknown_characters() {
    let tokens = tokenize("a = b ; c");

    assert_eq!(tokens[1].kind, TokenKind::Unknown);
    assert_eq!(tokens[1].value, "=");
    assert_eq!(tokens[3].kind, TokenKind::Unknown);
    assert_eq!(tokens[3].value, ";");
}

#[test]
fn test_empty_source() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("   ").is_empty());
}
