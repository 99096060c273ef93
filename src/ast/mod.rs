//! Statement types produced by the line parser.
//!
//! Submodules:
//! - statements: one variant per statement kind, plus `FunctionDef` and
//!   `SourceLine`
//! - types: parameter and variable type annotations
pub mod statements;
pub mod types;
