use tracing::trace;

use crate::{
    ast::{
        statements::{
            CallStmt, ClassDeclStmt, ClassMember, ElseBranch, FnDeclStmt, FunctionDef, IfStmt,
            ReturnStmt, SourceLine, StmtKind, VarDeclStmt,
        },
        types::TypeAnnotation,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    block::capture_block,
    cursor::LineCursor,
    parser::{strip_keyword, Parser},
};

/// Drops one trailing `;`.
pub fn strip_semicolon(text: &str) -> &str {
    let text = text.trim();
    text.strip_suffix(';').unwrap_or(text).trim_end()
}

pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
        }
        _ => false,
    }
}

/// Splits an argument list on commas that are outside parentheses and
/// quotes. Arguments are trimmed and empty ones dropped, so `""` gives no
/// arguments.
pub fn split_arguments(text: &str) -> Vec<String> {
    let mut args = vec![];
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut depth = 0i32;

    for ch in text.chars() {
        match quote {
            Some(open) => {
                if ch == open {
                    quote = None;
                }
                current.push(ch);
            }
            None => match ch {
                '"' | '\'' => {
                    quote = Some(ch);
                    current.push(ch);
                }
                '(' => {
                    depth += 1;
                    current.push(ch);
                }
                ')' => {
                    depth -= 1;
                    current.push(ch);
                }
                ',' if depth == 0 => {
                    args.push(current.trim().to_string());
                    current.clear();
                }
                _ => current.push(ch),
            },
        }
    }
    args.push(current.trim().to_string());

    args.retain(|arg| !arg.is_empty());
    args
}

/// Parses `name: type`. A missing annotation means `any`.
fn parse_typed_name(text: &str) -> (String, Option<TypeAnnotation>) {
    match text.split_once(':') {
        Some((name, annotation)) => (
            name.trim().to_string(),
            Some(TypeAnnotation::parse(annotation)),
        ),
        None => (text.trim().to_string(), None),
    }
}

pub struct Signature<'a> {
    pub name: String,
    pub params: Vec<(String, TypeAnnotation)>,
    /// Text after the closing `)`.
    pub rest: &'a str,
}

/// Parses `name(a: number, b) ...`.
pub fn parse_signature(text: &str) -> Option<Signature<'_>> {
    let open = text.find('(')?;
    let close = open + text[open..].find(')')?;

    let name = text[..open].trim();
    if !is_identifier(name) {
        return None;
    }

    let params = text[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|param| !param.is_empty())
        .map(|param| {
            let (name, annotation) = parse_typed_name(param);
            (name, annotation.unwrap_or(TypeAnnotation::Any))
        })
        .collect();

    Some(Signature {
        name: name.to_string(),
        params,
        rest: &text[close + 1..],
    })
}

/// Offset of the `)` matching the `(` at the start of `text`.
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// A malformed header that still opens a block must not leave the block's
/// lines to be run as top-level statements.
fn skip_opened_block(cursor: &mut LineCursor, line: &SourceLine, keyword: &str) {
    if let Some(brace) = line.text.find('{') {
        let skipped = capture_block(cursor, line, &line.text[brace + 1..], keyword);
        trace!(line = line.number, skipped = skipped.is_ok(), "skipped block of malformed header");
    }
}

pub fn parse_var_decl_stmt(
    _parser: &mut Parser,
    line: &SourceLine,
    rest: &str,
) -> Result<StmtKind, Error> {
    let eq = match rest.find('=') {
        Some(eq) => eq,
        None => return Err(Error::new(ErrorImpl::MissingAssignment, line.number)),
    };

    let (identifier, explicit_type) = parse_typed_name(&rest[..eq]);
    if identifier.is_empty() {
        return Err(Error::new(ErrorImpl::MissingVariableName, line.number));
    }

    Ok(StmtKind::VarDecl(VarDeclStmt {
        identifier,
        explicit_type,
        expr: strip_semicolon(&rest[eq + 1..]).to_string(),
    }))
}

pub fn parse_fn_decl_stmt(
    parser: &mut Parser,
    line: &SourceLine,
    rest: &str,
) -> Result<StmtKind, Error> {
    let malformed = || {
        Error::new(
            ErrorImpl::MalformedFunction {
                header: line.text.trim().to_string(),
            },
            line.number,
        )
    };

    let signature = match parse_signature(rest) {
        Some(signature) => signature,
        None => {
            skip_opened_block(parser.cursor(), line, "function");
            return Err(malformed());
        }
    };

    // Anything between `)` and `{` (a return annotation) is ignored.
    let brace = signature.rest.find('{').ok_or_else(malformed)?;
    let block = capture_block(
        parser.cursor(),
        line,
        &signature.rest[brace + 1..],
        "function",
    )?;

    Ok(StmtKind::FnDecl(FnDeclStmt {
        name: signature.name,
        function: FunctionDef::new(signature.params, block.lines),
    }))
}

pub fn parse_if_stmt(parser: &mut Parser, line: &SourceLine, rest: &str) -> Result<StmtKind, Error> {
    Ok(StmtKind::If(parse_if_chain(parser, line, rest)?))
}

fn parse_if_chain(parser: &mut Parser, line: &SourceLine, rest: &str) -> Result<IfStmt, Error> {
    let rest = rest.trim_start();
    let close = match rest.starts_with('(').then(|| matching_paren(rest)).flatten() {
        Some(close) => close,
        None => {
            skip_opened_block(parser.cursor(), line, "if");
            return Err(Error::new(ErrorImpl::MalformedIf, line.number));
        }
    };

    let condition = rest[1..close].trim().to_string();
    let body = match rest[close + 1..].trim_start().strip_prefix('{') {
        Some(body) => body,
        None => return Err(Error::new(ErrorImpl::IfWithoutBlock, line.number)),
    };

    let block = capture_block(parser.cursor(), line, body, "if")?;
    let else_branch = parse_else(parser, &block.trailing, block.closing_line)?;

    Ok(IfStmt {
        condition,
        then_block: block.lines,
        else_branch,
    })
}

/// Looks for `else` after an `if` block, either after the closing `}` on
/// the same line or at the start of the next line.
fn parse_else(
    parser: &mut Parser,
    trailing: &str,
    closing_line: usize,
) -> Result<Option<ElseBranch>, Error> {
    let else_line = if trailing.is_empty() {
        match parser.cursor().peek_line() {
            Some(next) if strip_keyword(next.text.trim(), "else").is_some() => {}
            _ => return Ok(None),
        }
        match parser.cursor().next_line() {
            Some(next) => next,
            None => return Ok(None),
        }
    } else {
        SourceLine::new(closing_line, trailing)
    };

    let text = else_line.text.trim();
    let rest = match strip_keyword(text, "else") {
        Some(rest) => rest.trim_start(),
        None => {
            trace!(line = closing_line, text, "ignoring text after closing brace");
            return Ok(None);
        }
    };

    if let Some(nested) = strip_keyword(rest, "if") {
        let nested = parse_if_chain(parser, &else_line, nested)?;
        return Ok(Some(ElseBranch::If(Box::new(nested))));
    }

    match rest.strip_prefix('{') {
        Some(body) => {
            let block = capture_block(parser.cursor(), &else_line, body, "else")?;
            Ok(Some(ElseBranch::Block(block.lines)))
        }
        None => Err(Error::new(ErrorImpl::IfWithoutBlock, else_line.number)),
    }
}

pub fn parse_class_decl_stmt(
    parser: &mut Parser,
    line: &SourceLine,
    rest: &str,
) -> Result<StmtKind, Error> {
    let malformed = || {
        Error::new(
            ErrorImpl::MalformedClass {
                header: line.text.trim().to_string(),
            },
            line.number,
        )
    };

    let brace = rest.find('{').ok_or_else(malformed)?;
    let name = rest[..brace].trim();
    if !is_identifier(name) {
        skip_opened_block(parser.cursor(), line, "class");
        return Err(malformed());
    }

    let block = capture_block(parser.cursor(), line, &rest[brace + 1..], "class")?;
    let members = parse_class_members(block.lines)?;

    Ok(StmtKind::ClassDecl(ClassDeclStmt {
        name: name.to_string(),
        members,
    }))
}

/// Only `static` members are recognised. A member is a property when `=`
/// comes before any `(`, otherwise a method.
fn parse_class_members(lines: Vec<SourceLine>) -> Result<Vec<ClassMember>, Error> {
    let mut cursor = LineCursor::from_lines(lines);
    let mut members = vec![];

    while let Some(member_line) = cursor.next_line() {
        let text = member_line.text.trim();
        let rest = match strip_keyword(text, "static") {
            Some(rest) => rest.trim(),
            None => {
                if !text.is_empty() {
                    trace!(line = member_line.number, text, "skipping non-static class member");
                }
                continue;
            }
        };

        let eq = rest.find('=');
        let paren = rest.find('(');

        match (eq, paren) {
            (Some(eq), paren) if paren.map_or(true, |paren| eq < paren) => {
                let (name, _) = parse_typed_name(&rest[..eq]);
                members.push(ClassMember::Property {
                    name,
                    expr: strip_semicolon(&rest[eq + 1..]).to_string(),
                });
            }
            (_, Some(_)) => {
                let malformed = || {
                    Error::new(
                        ErrorImpl::MalformedFunction {
                            header: text.to_string(),
                        },
                        member_line.number,
                    )
                };

                let signature = parse_signature(rest).ok_or_else(malformed)?;
                let brace = signature.rest.find('{').ok_or_else(malformed)?;
                let block = capture_block(
                    &mut cursor,
                    &member_line,
                    &signature.rest[brace + 1..],
                    "method",
                )?;

                members.push(ClassMember::Method {
                    name: signature.name,
                    function: FunctionDef::new(signature.params, block.lines),
                });
            }
            _ => trace!(line = member_line.number, text, "skipping static member without value"),
        }
    }

    Ok(members)
}

pub fn parse_return_stmt(
    _parser: &mut Parser,
    _line: &SourceLine,
    rest: &str,
) -> Result<StmtKind, Error> {
    let expr = strip_semicolon(rest);

    Ok(StmtKind::Return(ReturnStmt {
        expr: if expr.is_empty() {
            None
        } else {
            Some(expr.to_string())
        },
    }))
}

/// `name(args...)`: everything before the first `(` is the callee, the
/// arguments run up to the last `)`.
pub fn parse_call_stmt(line: &SourceLine) -> Result<StmtKind, Error> {
    let text = line.text.trim();
    let unrecognised = || {
        Error::new(
            ErrorImpl::UnrecognisedStatement {
                statement: text.to_string(),
            },
            line.number,
        )
    };

    let open = text.find('(').ok_or_else(unrecognised)?;
    let close = text.rfind(')').ok_or_else(unrecognised)?;
    let callee = text[..open].trim();
    if close < open || callee.is_empty() {
        return Err(unrecognised());
    }

    Ok(StmtKind::Call(CallStmt {
        callee: callee.to_string(),
        args: split_arguments(&text[open + 1..close]),
    }))
}
