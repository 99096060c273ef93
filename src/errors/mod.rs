//! Error types and error handling for the interpreter.
//!
//! This module defines the diagnostics produced while running a script:
//!
//! - Statement-level errors (syntax errors, unknown functions, arity and
//!   parameter type mismatches) which are reported and skipped
//! - Evaluation-level failures (`assert`, call depth, output I/O) which
//!   propagate until a `let` declaration or the host catches them
//! - Error names and suggestions for richer reporting

pub mod errors;
