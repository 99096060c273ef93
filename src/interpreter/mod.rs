//! Statement interpreter.
//!
//! - `executor`: runs parsed statements, dispatches calls and enforces
//!   arity, parameter types and the call depth limit
//! - `interpreter`: the `Interpreter` front-end owning the global context

pub mod executor;
pub mod interpreter;
