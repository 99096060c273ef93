use lazy_static::lazy_static;
use regex::Regex;

use crate::{MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(source: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(source).unwrap(),
        handler,
    }
}

lazy_static! {
    // Tried in order, so longer operators come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r"^\s+", skip_handler),
        pattern(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)", number_handler),
        pattern(r"^[A-Za-z_$][A-Za-z0-9_$.]*", symbol_handler),
        pattern(r#"^["']"#, string_handler),
        pattern(r"^===", MK_DEFAULT_HANDLER!(TokenKind::StrictEquals, "===")),
        pattern(r"^!==", MK_DEFAULT_HANDLER!(TokenKind::StrictNotEquals, "!==")),
        pattern(r"^\*\*", MK_DEFAULT_HANDLER!(TokenKind::StarStar, "**")),
        pattern(r"^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern(r"^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern(r"^&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern(r"^\|\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern(r"^!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern(r"^%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
        pattern(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern(r"(?s)^.", unknown_handler),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pub pos: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            tokens: vec![],
            source: source.to_string(),
            pos: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let len = matched.len();

    lexer.push(MK_TOKEN!(TokenKind::Number, matched, lexer.pos));
    lexer.advance_n(len);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let len = matched.len();

    lexer.push(MK_TOKEN!(TokenKind::Identifier, matched, lexer.pos));
    lexer.advance_n(len);
}

// Contents are kept verbatim. A quote only closes the literal when the
// character before it is not a backslash; an unterminated literal runs to
// the end of the expression.
fn string_handler(lexer: &mut Lexer, _regex: &Regex) {
    let start = lexer.pos;
    let mut chars = lexer.remainder().char_indices();
    let quote = match chars.next() {
        Some((_, quote)) => quote,
        None => return,
    };

    let mut contents = String::new();
    let mut previous = quote;
    let mut consumed = lexer.remainder().len();

    for (offset, ch) in chars {
        if ch == quote && previous != '\\' {
            consumed = offset + ch.len_utf8();
            break;
        }
        contents.push(ch);
        previous = ch;
    }

    lexer.push(MK_TOKEN!(TokenKind::String, contents, start));
    lexer.advance_n(consumed);
}

fn unknown_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let len = matched.len();

    lexer.push(MK_TOKEN!(TokenKind::Unknown, matched, lexer.pos));
    lexer.advance_n(len);
}

/// Splits an expression into tokens. Every character belongs to some token
/// (or is skipped whitespace), so tokenizing never fails.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let before = lex.pos;

        if let Some(pattern) = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()))
        {
            (pattern.handler)(&mut lex, &pattern.regex);
        }

        // The catch-all pattern always consumes; guard anyway.
        if lex.pos == before {
            break;
        }
    }

    tracing::trace!(source, tokens = lex.tokens.len(), "tokenized expression");
    lex.tokens
}
