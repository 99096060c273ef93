//! Integration tests for end-to-end script execution.
//!
//! These tests run the scripts under `tests/scripts/` through the public
//! entry points: static check, statement interpreter and builtins, with
//! output captured in memory.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tsrun::{errors::errors::ErrorImpl, run_file, run_script, RunOptions};

fn script_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("scripts")
        .join(name)
}

fn run_script_file(name: &str, options: RunOptions) -> (bool, String) {
    let mut out: Vec<u8> = vec![];
    let completed = run_file(&script_path(name), &mut out, options).unwrap();
    (completed, String::from_utf8(out).unwrap())
}

#[test]
fn test_basics_script() {
    let (completed, output) = run_script_file("basics.ts", RunOptions::default());
    assert!(completed);
    assert_eq!(output, "a=14 512\ntrue false NaN\n9 4\nundefined undefined\n");
}

#[test]
fn test_functions_script() {
    let (completed, output) = run_script_file("functions.ts", RunOptions::default());
    assert!(completed);
    assert_eq!(output, "42 1 100\nbig small none\n");
}

#[test]
fn test_classes_script() {
    let (completed, output) = run_script_file("classes.ts", RunOptions::default());
    assert!(completed);
    assert_eq!(output, "32 100\n");
}

#[test]
fn test_type_errors_block_execution() {
    let (completed, output) = run_script_file("type_error.ts", RunOptions::default());
    assert!(!completed);
    assert_eq!(output, "Line 6: Argument 1 to square should be a number\n");
}

#[test]
fn test_disabled_check_reports_at_call_time() {
    let options = RunOptions {
        check_types: false,
        ..RunOptions::default()
    };
    let (completed, output) = run_script_file("type_error.ts", options);
    assert!(completed);
    assert_eq!(
        output,
        "before\nTypeError: Argument 'n' expected number, got four\n"
    );
}

#[test]
fn test_error_tiers() {
    let options = RunOptions {
        check_types: false,
        ..RunOptions::default()
    };
    let mut out: Vec<u8> = vec![];
    let error = run_file(&script_path("errors.ts"), &mut out, options).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::AssertionFailed {
            message: Some("stop here".to_string())
        }
    );
    assert_eq!(error.get_line(), 9);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "SyntaxError: Missing '=' in let statement\n\
         Error: Unknown function 'undefinedFunction'\n\
         Error: Function 'pair' expects 2 arguments, got 1\n\
         Error evaluating expression: Assertion failed: numbers are fine\n\
         still running\n"
    );
}

#[test]
fn test_missing_file() {
    let path = script_path("does_not_exist.ts");
    let mut out: Vec<u8> = vec![];
    let completed = run_file(&path, &mut out, RunOptions::default()).unwrap();

    assert!(!completed);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("Error: Could not open file: {}\n", path.display())
    );
}

#[test]
fn test_run_script_from_string() {
    let mut out: Vec<u8> = vec![];
    let source = "let greeting = 'hello';\nif (greeting == 'hello') {\n  let message = greeting + ' world';\n  console.log(message);\n}";
    let completed = run_script(source, &mut out, RunOptions::default()).unwrap();

    assert!(completed);
    assert_eq!(String::from_utf8(out).unwrap(), "hello world\n");
}

#[test]
fn test_blocks_come_from_the_same_buffer() {
    // Two independent runs must not see each other's lines.
    let mut first: Vec<u8> = vec![];
    let mut second: Vec<u8> = vec![];

    run_script("function f() {\n  console.log('f');\n}", &mut first, RunOptions::default())
        .unwrap();
    run_script("f();", &mut second, RunOptions::default()).unwrap();

    assert_eq!(String::from_utf8(first).unwrap(), "");
    assert_eq!(
        String::from_utf8(second).unwrap(),
        "Error: Unknown function 'f'\n"
    );
}

const RUNAWAY_RECURSION: &str = "function spin(n) {\n  return spin(n + 1);\n}\n";

#[test]
fn test_runaway_recursion_hits_default_depth_limit() {
    let mut out: Vec<u8> = vec![];
    let source = format!("{}let x = spin(0);\nconsole.log('after');", RUNAWAY_RECURSION);
    let completed = run_script(&source, &mut out, RunOptions::default()).unwrap();

    assert!(completed);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Error evaluating expression: Maximum call stack size exceeded (512 nested calls)\nafter\n"
    );
}

#[test]
fn test_runaway_recursion_in_call_statement_is_fatal() {
    let mut out: Vec<u8> = vec![];
    let source = format!("{}spin(0);\nconsole.log('never');", RUNAWAY_RECURSION);
    let error = run_script(&source, &mut out, RunOptions::default()).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::CallStackExceeded { depth: 512 });
    assert!(out.is_empty());
}
