//! Line-oriented statement parser.
//!
//! Each statement is classified once from its leading keyword through a
//! lookup table of handlers. Lines that start with no registered keyword
//! are parsed as bare calls. Handlers that need a block pull the following
//! lines from the parser's own cursor.

use std::collections::HashMap;

use crate::{
    ast::statements::{SourceLine, Stmt, StmtKind},
    errors::errors::Error,
};

use super::{cursor::LineCursor, lookups::create_stmt_lookups, stmt::parse_call_stmt};

/// Receives the parser, the header line and the text after the keyword.
pub type StmtHandler = fn(&mut Parser, &SourceLine, &str) -> Result<StmtKind, Error>;
pub type StmtLookup = HashMap<&'static str, StmtHandler>;

pub struct Parser {
    cursor: LineCursor,
    stmt_lookup: StmtLookup,
}

impl Parser {
    pub fn new(cursor: LineCursor) -> Self {
        let mut parser = Parser {
            cursor,
            stmt_lookup: HashMap::new(),
        };
        create_stmt_lookups(&mut parser);
        parser
    }

    pub fn from_source(source: &str) -> Self {
        Parser::new(LineCursor::from_source(source))
    }

    pub fn from_lines(lines: Vec<SourceLine>) -> Self {
        Parser::new(LineCursor::from_lines(lines))
    }

    /// Registers the handler for statements starting with `keyword`.
    pub fn stmt(&mut self, keyword: &'static str, handler: StmtHandler) {
        self.stmt_lookup.insert(keyword, handler);
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn cursor(&mut self) -> &mut LineCursor {
        &mut self.cursor
    }

    /// Parses the statement starting at the next line, or `None` once the
    /// buffer is exhausted.
    pub fn next_stmt(&mut self) -> Option<Result<Stmt, Error>> {
        let line = self.cursor.next_line()?;
        Some(parse_stmt(self, &line))
    }
}

impl Iterator for Parser {
    type Item = Result<Stmt, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_stmt()
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' || ch == '.'
}

/// Splits `text` into its leading word and the remainder.
pub fn split_word(text: &str) -> (&str, &str) {
    let end = text
        .find(|ch: char| !is_word_char(ch))
        .unwrap_or(text.len());
    text.split_at(end)
}

/// Returns the text after `keyword` when `text` starts with it as a whole
/// word.
pub fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    match split_word(text) {
        (word, rest) if word == keyword => Some(rest),
        _ => None,
    }
}

pub fn parse_stmt(parser: &mut Parser, line: &SourceLine) -> Result<Stmt, Error> {
    let text = line.text.trim();

    if text.is_empty() || text.starts_with("//") {
        return Ok(Stmt {
            line: line.number,
            kind: StmtKind::Empty,
        });
    }

    let (word, rest) = split_word(text);
    let kind = match parser.get_stmt_lookup().get(word).copied() {
        Some(handler) => handler(parser, line, rest)?,
        None => parse_call_stmt(line)?,
    };

    Ok(Stmt {
        line: line.number,
        kind,
    })
}
