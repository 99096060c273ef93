use std::io::Write;

use crate::{
    errors::errors::Error,
    parser::parser::Parser,
    runtime::{context::Context, value::Value},
    RunOptions,
};

use super::executor::Executor;

/// Owns the global context and the writer scripts print to.
///
/// Execution runs on the calling thread. Deep recursion needs a stack of
/// [`crate::execution_stack_size`] for the configured call depth, which
/// [`crate::run_script`] provides.
///
/// ```
/// use tsrun::interpreter::interpreter::Interpreter;
///
/// let mut interpreter = Interpreter::new(Vec::new());
/// interpreter.execute_source("let x = 2 + 3;\nconsole.log(x);").unwrap();
/// assert_eq!(interpreter.into_output(), b"5\n");
/// ```
pub struct Interpreter<W: Write> {
    context: Context,
    out: W,
    options: RunOptions,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Interpreter::with_options(out, RunOptions::default())
    }

    pub fn with_options(out: W, options: RunOptions) -> Self {
        Interpreter {
            context: Context::new(),
            out,
            options,
        }
    }

    /// Executes a whole program. Statement-level errors are written to the
    /// output and skipped; an evaluation failure outside a `let` aborts the
    /// run and is returned.
    pub fn execute_source(&mut self, source: &str) -> Result<(), Error> {
        let mut executor = Executor::new(&mut self.out, self.options.max_call_depth);
        executor.run(&mut self.context, Parser::from_source(source), false)?;
        Ok(())
    }

    /// Evaluates an expression against the global context.
    pub fn evaluate(&mut self, expr: &str) -> Result<Value, Error> {
        let mut executor = Executor::new(&mut self.out, self.options.max_call_depth);
        executor.evaluate(&self.context, expr)
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
