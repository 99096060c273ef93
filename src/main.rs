use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{CommandFactory, Parser};
use tsrun::{init_tracing, run_file, run_script, RunOptions};

/// Runs scripts written in a small annotated JavaScript dialect.
#[derive(Parser, Debug)]
#[command(name = "tsrun", version, about)]
struct Cli {
    /// Script to run
    script: Option<PathBuf>,

    /// Run CODE instead of a script file (skips the type check)
    #[arg(short, long, value_name = "CODE", conflicts_with = "script")]
    eval: Option<String>,

    /// Skip the static type check before running a script
    #[arg(long)]
    no_check: bool,

    /// Nested function calls allowed before aborting
    #[arg(long, value_name = "N", default_value_t = 512)]
    max_call_depth: usize,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            // --help and --version are reported through the error path too.
            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let options = RunOptions {
        check_types: !cli.no_check,
        max_call_depth: cli.max_call_depth,
    };

    let mut out = io::stdout();

    let result = match (&cli.eval, &cli.script) {
        (Some(code), _) => run_script(
            code,
            &mut out,
            RunOptions {
                check_types: false,
                ..options
            },
        ),
        (None, Some(script)) => run_file(script, &mut out, options),
        (None, None) => {
            eprintln!("{}", Cli::command().render_usage());
            return ExitCode::FAILURE;
        }
    };

    let status = match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            tracing::debug!(line = error.get_line(), error = error.get_error_name(), "run aborted");
            let _ = writeln!(out, "{}", error);
            ExitCode::FAILURE
        }
    };

    let _ = out.flush();
    status
}
