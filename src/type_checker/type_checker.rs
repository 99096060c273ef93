use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::{
    ast::types::TypeAnnotation,
    parser::{
        parser::strip_keyword,
        stmt::{parse_signature, split_arguments},
    },
};

/// A call-site argument whose shape does not match the declared parameter.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Line {line}: {message}")]
pub struct TypeError {
    pub line: usize,
    pub message: String,
}

/// What an argument looks like syntactically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgShape {
    String,
    Number,
    Boolean,
    Unknown,
}

impl ArgShape {
    pub fn classify(arg: &str) -> ArgShape {
        let arg = arg.trim();
        let quoted = arg.len() >= 2
            && ((arg.starts_with('"') && arg.ends_with('"'))
                || (arg.starts_with('\'') && arg.ends_with('\'')));

        if quoted {
            return ArgShape::String;
        }
        if arg == "true" || arg == "false" {
            return ArgShape::Boolean;
        }

        // A sign is not a digit: `-1` is an expression, not a literal.
        match arg.chars().next() {
            Some(ch) if ch.is_ascii_digit() || ch == '.' => ArgShape::Number,
            _ => ArgShape::Unknown,
        }
    }

    fn satisfies(&self, annotation: &TypeAnnotation) -> bool {
        if !annotation.is_checked() {
            return true;
        }
        let expected = match annotation {
            TypeAnnotation::Number => ArgShape::Number,
            TypeAnnotation::String => ArgShape::String,
            _ => ArgShape::Boolean,
        };
        *self == expected
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' || ch == '.'
}

/// Offset just past the `)` closing a call whose arguments start at `start`.
fn find_call_end(line: &str, start: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut quote: Option<char> = None;

    for (offset, ch) in line[start..].char_indices() {
        match (quote, ch) {
            (Some(open), _) if ch == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

#[derive(Debug, Default)]
pub struct TypeChecker {
    /// Declared parameter types per function, ordered by name.
    pub signatures: BTreeMap<String, Vec<TypeAnnotation>>,
    pub errors: Vec<TypeError>,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker::default()
    }

    /// Pass 1: record every `function name(params)` header.
    pub fn collect_signatures(&mut self, lines: &[&str]) {
        for line in lines {
            let rest = match strip_keyword(line.trim(), "function") {
                Some(rest) => rest,
                None => continue,
            };

            if let Some(signature) = parse_signature(rest) {
                let types = signature
                    .params
                    .into_iter()
                    .map(|(_, annotation)| annotation)
                    .collect();
                self.signatures.insert(signature.name, types);
            }
        }

        debug!(functions = self.signatures.len(), "collected signatures");
    }

    /// Pass 2: check every call to a recorded function, in the order the
    /// calls appear. Calls inside a one-line function body are checked too.
    pub fn check_calls(&mut self, lines: &[&str]) {
        for (idx, line) in lines.iter().enumerate() {
            let line = line.trim();
            if line.starts_with("//") {
                continue;
            }

            let mut calls: Vec<(usize, &str)> = vec![];
            for name in self.signatures.keys() {
                let pattern = format!("{}(", name);
                for (pos, _) in line.match_indices(&pattern) {
                    let bounded = line[..pos]
                        .chars()
                        .next_back()
                        .map_or(true, |ch| !is_word_char(ch));
                    // The `name(` of a declaration header is not a call.
                    let header = line[..pos].trim_end() == "function";
                    if bounded && !header {
                        calls.push((pos, name.as_str()));
                    }
                }
            }
            calls.sort();

            for (pos, name) in calls {
                let args_start = pos + name.len() + 1;
                let args_end = match find_call_end(line, args_start) {
                    Some(end) => end,
                    None => continue,
                };
                let args = split_arguments(&line[args_start..args_end]);

                if let Some(expected) = self.signatures.get(name) {
                    for (arg_idx, (arg, annotation)) in args.iter().zip(expected).enumerate() {
                        if !ArgShape::classify(arg).satisfies(annotation) {
                            self.errors.push(TypeError {
                                line: idx + 1,
                                message: format!(
                                    "Argument {} to {} should be a {}",
                                    arg_idx + 1,
                                    name,
                                    annotation
                                ),
                            });
                        }
                    }
                }
            }
        }
    }
}

/// Checks `source` and returns every mismatch found, ordered by line.
pub fn type_check(source: &str) -> Vec<TypeError> {
    let lines: Vec<&str> = source.lines().collect();
    let mut checker = TypeChecker::new();

    checker.collect_signatures(&lines);
    checker.check_calls(&lines);

    debug!(errors = checker.errors.len(), "type check finished");
    checker.errors
}
