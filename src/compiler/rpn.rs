use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    LooseEquals,
    LooseNotEquals,
    StrictEquals,
    StrictNotEquals,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "**",
            BinaryOp::Less => "<",
            BinaryOp::LessEquals => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEquals => ">=",
            BinaryOp::LooseEquals => "==",
            BinaryOp::LooseNotEquals => "!=",
            BinaryOp::StrictEquals => "===",
            BinaryOp::StrictNotEquals => "!==",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    Plus,
    Not,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "neg",
            UnaryOp::Plus => "pos",
            UnaryOp::Not => "!",
        }
    }
}

/// One entry of a postfix token stream.
#[derive(Debug, Clone, PartialEq)]
pub enum RpnToken {
    /// Numeric literal text, parsed when evaluated.
    Number(String),
    /// String literal contents without quotes.
    String(String),
    /// Keyword literal or variable name.
    Symbol(String),
    Binary(BinaryOp),
    Unary(UnaryOp),
    /// `#n`: argument count consumed by the following `Call`.
    ArgCount(usize),
    /// `@name`: function call.
    Call(String),
}

impl Display for RpnToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RpnToken::Number(text) | RpnToken::Symbol(text) => write!(f, "{}", text),
            RpnToken::String(text) => write!(f, "\"{}\"", text),
            RpnToken::Binary(op) => write!(f, "{}", op.symbol()),
            RpnToken::Unary(op) => write!(f, "{}", op.symbol()),
            RpnToken::ArgCount(count) => write!(f, "#{}", count),
            RpnToken::Call(name) => write!(f, "@{}", name),
        }
    }
}

/// Renders a postfix stream as space separated tokens, e.g. `2 3 4 * +`.
pub fn format_rpn(tokens: &[RpnToken]) -> String {
    tokens
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}
