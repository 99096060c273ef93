//! Line-oriented statement parser.
//!
//! This module turns source lines into `Stmt`s. It handles:
//!
//! - Statement classification by leading keyword (`let`, `function`, `if`,
//!   `class`, `return`), falling back to bare calls
//! - Block capture for function, `if`/`else` and class bodies, pulling
//!   continuation lines from a forward-only `LineCursor`
//! - Argument list splitting that respects nested parentheses and quotes
//!
//! Expressions inside statements are kept as text and compiled when they
//! are evaluated.

pub mod block;
pub mod cursor;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
