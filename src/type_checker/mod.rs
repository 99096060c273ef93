//! Static annotation checking.
//!
//! Runs once over the whole source before anything executes:
//!
//! - Pass 1 records the declared parameter types of every `function`
//! - Pass 2 finds calls to those functions and compares each literal
//!   argument's surface shape against the declared type
//!
//! Arguments that are not literals (variables, nested expressions) cannot
//! be classified and are reported when the parameter is `number`, `string`
//! or `boolean`. The checker never executes code.

pub mod type_checker;

#[cfg(test)]
mod tests;
