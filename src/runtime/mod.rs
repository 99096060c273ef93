//! Runtime value model and expression evaluation.
//!
//! - `value`: the dynamic `Value` enum and its total coercions
//! - `environment`: name to value storage for one scope
//! - `context`: variables plus builtin and user function registries
//! - `evaluator`: stack evaluation of postfix token streams
//! - `builtins`: `console.log`, `Math.*`, `sizeof`, `assert` and constants

pub mod builtins;
pub mod context;
pub mod environment;
pub mod evaluator;
pub mod value;
