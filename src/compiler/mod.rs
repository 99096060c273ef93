//! Expression compilation to postfix (RPN) form.
//!
//! This module converts the token stream produced by the lexer into a
//! postfix token stream using an operator-precedence (shunting-yard)
//! algorithm extended with function calls and argument counting.
//!
//! Precedence, highest first: `**` > `* / %` > `+ -` > `< > <= >=` >
//! `== != === !==` > `&&` > `||`. Prefix `-`, `+` and `!` bind tighter than
//! every binary operator.

pub mod compiler;
pub mod lookups;
pub mod rpn;

#[cfg(test)]
mod tests;
