use std::fmt::Display;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Number,
    String,
    Identifier,

    OpenParen,
    CloseParen,
    Comma,

    Plus,
    Dash,
    Star,
    StarStar,
    Slash,
    Percent,

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Equals,          // ==
    NotEquals,       // !=
    StrictEquals,    // ===
    StrictNotEquals, // !==

    And,
    Or,
    Not,

    // Any other single character
    Unknown,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token. String literals keep their contents
    /// verbatim without the surrounding quotes.
    pub value: String,
    /// Byte offset of the token within the expression.
    pub pos: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::String => write!(f, "{}(\"{}\")", self.kind, self.value),
            TokenKind::Number | TokenKind::Identifier | TokenKind::Unknown => {
                write!(f, "{}({})", self.kind, self.value)
            }
            _ => write!(f, "{}", self.value),
        }
    }
}
