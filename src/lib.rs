#![allow(clippy::module_inception)]

use std::{fs, io::Write, panic, path::Path, sync::Once, thread};

use crate::{
    errors::errors::Error, interpreter::interpreter::Interpreter,
    type_checker::type_checker::type_check,
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod runtime;
pub mod type_checker;

extern crate regex;

/// Library-level configuration for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    /// Run the static annotation check before executing.
    pub check_types: bool,
    /// Nested user function calls allowed before the run is aborted.
    pub max_call_depth: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            check_types: true,
            max_call_depth: 512,
        }
    }
}

/// Stack reserved for each nested user call. One call level spans several
/// frames (statement, expression, dispatch and the call itself).
const STACK_PER_CALL: usize = 256 * 1024;
const BASE_STACK: usize = 2 * 1024 * 1024;

/// Stack size of the thread a script runs on, large enough for
/// `max_call_depth` nested calls to hit the depth guard first.
pub fn execution_stack_size(max_call_depth: usize) -> usize {
    max_call_depth
        .saturating_mul(STACK_PER_CALL)
        .saturating_add(BASE_STACK)
}

static TRACING_INIT: Once = Once::new();

/// Installs a stderr subscriber filtered by `RUST_LOG`. Does nothing when
/// `RUST_LOG` is unset, so script output on stdout stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Runs a program, writing everything it prints to `out`.
///
/// Returns `Ok(false)` without executing anything when the static check is
/// enabled and finds errors; each one is written as `Line <n>: <message>`.
/// An evaluation failure that no `let` caught is returned as `Err`.
///
/// Execution happens on a dedicated thread whose stack is sized by
/// [`execution_stack_size`], so runaway recursion ends in a
/// `CallStackExceeded` error rather than overflowing the caller's stack.
pub fn run_script<W: Write + Send>(
    source: &str,
    out: &mut W,
    options: RunOptions,
) -> Result<bool, Error> {
    if options.check_types {
        let errors = type_check(source);
        if !errors.is_empty() {
            for error in &errors {
                writeln!(out, "{}", error)?;
            }
            return Ok(false);
        }
    }

    let stack_size = execution_stack_size(options.max_call_depth);
    tracing::debug!(stack_size, "starting script thread");

    thread::scope(|scope| {
        let out = &mut *out;
        let runner = thread::Builder::new()
            .name("tsrun-script".to_string())
            .stack_size(stack_size)
            .spawn_scoped(scope, move || {
                let mut interpreter = Interpreter::with_options(out, options);
                interpreter.execute_source(source)
            })?;

        match runner.join() {
            Ok(result) => result.map(|_| true),
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}

/// Reads `path` and runs it with [`run_script`].
pub fn run_file<W: Write + Send>(path: &Path, out: &mut W, options: RunOptions) -> Result<bool, Error> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            tracing::debug!(path = %path.display(), %error, "failed to read script");
            writeln!(out, "Error: Could not open file: {}", path.display())?;
            return Ok(false);
        }
    };

    run_script(&source, out, options)
}
