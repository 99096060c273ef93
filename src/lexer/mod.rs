//! Lexical analysis for expressions.
//!
//! This module contains the tokenizer that splits a single expression into
//! tokens for the operator-precedence compiler. It handles:
//!
//! - Numeric literals (digits with a single decimal point)
//! - Identifiers, including dotted names such as `Math.sqrt`
//! - Quoted string literals (single or double quotes)
//! - Multi-character and single-character operators
//!
//! Whitespace is discarded between tokens.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
