use std::fmt::Display;

use thiserror::Error;

/// A diagnostic raised while parsing or executing a statement.
///
/// Carries the 1-based source line the failing statement started on. The
/// line is not part of the rendered message; it is used for logging and by
/// callers that want to point at the offending statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    line: usize,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, line: usize) -> Self {
        Error {
            internal_error: error_impl,
            line,
        }
    }

    pub fn get_line(&self) -> usize {
        self.line
    }

    /// Attaches a line to errors raised where the line was not known (e.g.
    /// inside a builtin). Errors that already carry one keep it.
    pub fn at_line(mut self, line: usize) -> Self {
        if self.line == 0 {
            self.line = line;
        }
        self
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Statement-level errors are reported and execution resumes with the
    /// next statement. Everything else propagates until a `let` site (or the
    /// host) catches it.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self.internal_error,
            ErrorImpl::AssertionFailed { .. }
                | ErrorImpl::AssertWithoutArguments
                | ErrorImpl::CallStackExceeded { .. }
                | ErrorImpl::Io { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::MissingAssignment => "MissingAssignment",
            ErrorImpl::MissingVariableName => "MissingVariableName",
            ErrorImpl::MalformedIf => "MalformedIf",
            ErrorImpl::IfWithoutBlock => "IfWithoutBlock",
            ErrorImpl::MalformedFunction { .. } => "MalformedFunction",
            ErrorImpl::MalformedClass { .. } => "MalformedClass",
            ErrorImpl::UnterminatedBlock { .. } => "UnterminatedBlock",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::UnknownFunction { .. } => "UnknownFunction",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::UnrecognisedStatement { .. } => "UnrecognisedStatement",
            ErrorImpl::AssertionFailed { .. } => "AssertionFailed",
            ErrorImpl::AssertWithoutArguments => "AssertWithoutArguments",
            ErrorImpl::CallStackExceeded { .. } => "CallStackExceeded",
            ErrorImpl::Io { .. } => "Io",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::MissingAssignment => ErrorTip::Suggestion(String::from(
                "Declarations need an initial value: `let name = value;`",
            )),
            ErrorImpl::MissingVariableName => {
                ErrorTip::Suggestion(String::from("Expected an identifier after `let`"))
            }
            ErrorImpl::MalformedIf => ErrorTip::Suggestion(String::from(
                "Wrap the condition in parentheses: `if (cond) {`",
            )),
            ErrorImpl::IfWithoutBlock => ErrorTip::Suggestion(String::from(
                "The opening `{` must be on the same line as the condition",
            )),
            ErrorImpl::MalformedFunction { .. } => ErrorTip::Suggestion(String::from(
                "Expected `function name(params) {`",
            )),
            ErrorImpl::MalformedClass { .. } => {
                ErrorTip::Suggestion(String::from("Expected `class Name {`"))
            }
            ErrorImpl::UnterminatedBlock { keyword } => {
                ErrorTip::Suggestion(format!("Missing `}}` to close the {} block", keyword))
            }
            ErrorImpl::ArgumentCountMismatch { expected, received, .. } => ErrorTip::Suggestion(
                format!("Expected {} arguments, received {}", expected, received),
            ),
            ErrorImpl::UnknownFunction { function } => {
                ErrorTip::Suggestion(format!("Declare `{}` before calling it", function))
            }
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("SyntaxError: Missing '=' in let statement")]
    MissingAssignment,
    #[error("SyntaxError: Missing variable name")]
    MissingVariableName,
    #[error("SyntaxError: malformed if statement")]
    MalformedIf,
    #[error("SyntaxError: if without block")]
    IfWithoutBlock,
    #[error("SyntaxError: malformed function declaration: {header}")]
    MalformedFunction { header: String },
    #[error("SyntaxError: malformed class declaration: {header}")]
    MalformedClass { header: String },
    #[error("SyntaxError: unterminated {keyword} block")]
    UnterminatedBlock { keyword: String },
    #[error("SyntaxError: 'return' outside of function")]
    ReturnOutsideFunction,
    #[error("Error: Unknown function '{function}'")]
    UnknownFunction { function: String },
    #[error("Error: Function '{function}' expects {expected} arguments, got {received}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("TypeError: Argument '{param}' expected {expected}, got {received}")]
    ArgumentTypeMatchError {
        param: String,
        expected: String,
        received: String,
    },
    #[error("Error: Unrecognized statement: {statement}")]
    UnrecognisedStatement { statement: String },
    #[error("Assertion failed{}", assertion_suffix(.message))]
    AssertionFailed { message: Option<String> },
    #[error("assert() called with no arguments")]
    AssertWithoutArguments,
    #[error("Maximum call stack size exceeded ({depth} nested calls)")]
    CallStackExceeded { depth: usize },
    #[error("I/O error: {message}")]
    Io { message: String },
}

fn assertion_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {}", message),
        None => String::new(),
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::new(
            ErrorImpl::Io {
                message: error.to_string(),
            },
            0,
        )
    }
}
