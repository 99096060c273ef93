//! Operator-precedence (shunting-yard) conversion from infix tokens to
//! postfix form.
//!
//! The classic algorithm is extended with function calls. An identifier
//! directly followed by `(` is pushed on the operator stack as a function
//! marker instead of being emitted. Its `(` opens an argument counter that
//! top-level commas increment, and the matching `)` emits `#n` followed by
//! `@name`:
//!
//! ```text
//! Math.max(1, 2 + 3) * 2   =>   1 2 3 + #2 @Math.max 2 *
//! ```

use crate::lexer::{
    lexer::tokenize,
    tokens::{Token, TokenKind},
};

use super::{
    lookups::{associativity, Associativity, BindingPower, BINARY_LOOKUP, PREFIX_LOOKUP},
    rpn::{format_rpn, BinaryOp, RpnToken, UnaryOp},
};

#[derive(Debug)]
enum StackEntry {
    Binary(BinaryOp, BindingPower),
    Prefix(UnaryOp),
    LeftParen { call: bool },
    Function(String),
}

struct Compiler {
    output: Vec<RpnToken>,
    operators: Vec<StackEntry>,
    /// One counter per open call parenthesis, innermost last.
    arg_counts: Vec<usize>,
    expect_operand: bool,
    pending_call: bool,
}

impl Compiler {
    fn new() -> Self {
        Compiler {
            output: vec![],
            operators: vec![],
            arg_counts: vec![],
            expect_operand: true,
            pending_call: false,
        }
    }

    fn innermost_paren_is_call(&self) -> bool {
        self.operators
            .iter()
            .rev()
            .find_map(|entry| match entry {
                StackEntry::LeftParen { call } => Some(*call),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// The first token inside a call's parentheses turns its counter from
    /// zero to one, so `f()` compiles to `#0 @f`.
    fn mark_argument(&mut self) {
        if self.innermost_paren_is_call() {
            if let Some(count) = self.arg_counts.last_mut() {
                if *count == 0 {
                    *count = 1;
                }
            }
        }
    }

    /// Moves pending operators to the output until a left parenthesis (or
    /// the bottom of the stack) is reached.
    fn flush_to_paren(&mut self) {
        while let Some(entry) = self.operators.last() {
            match entry {
                StackEntry::Binary(op, _) => self.output.push(RpnToken::Binary(*op)),
                StackEntry::Prefix(op) => self.output.push(RpnToken::Unary(*op)),
                _ => break,
            }
            self.operators.pop();
        }
    }

    fn push_operand(&mut self, token: RpnToken) {
        self.output.push(token);
        self.expect_operand = false;
    }

    fn push_binary(&mut self, op: BinaryOp, bp: BindingPower) {
        while let Some(entry) = self.operators.last() {
            let pops = match entry {
                StackEntry::Prefix(_) => true,
                StackEntry::Binary(_, top_bp) => {
                    *top_bp > bp || (*top_bp == bp && associativity(op) == Associativity::Left)
                }
                _ => false,
            };
            if !pops {
                break;
            }

            match self.operators.pop() {
                Some(StackEntry::Binary(top, _)) => self.output.push(RpnToken::Binary(top)),
                Some(StackEntry::Prefix(top)) => self.output.push(RpnToken::Unary(top)),
                _ => break,
            }
        }

        self.operators.push(StackEntry::Binary(op, bp));
        self.expect_operand = true;
    }

    fn open_paren(&mut self) {
        let call = self.pending_call;
        self.pending_call = false;

        self.operators.push(StackEntry::LeftParen { call });
        if call {
            self.arg_counts.push(0);
        }
        self.expect_operand = true;
    }

    fn close_paren(&mut self) {
        self.flush_to_paren();

        match self.operators.pop() {
            Some(StackEntry::LeftParen { call: true }) => self.emit_call(),
            Some(StackEntry::LeftParen { call: false }) => {}
            Some(other) => {
                // Unbalanced `)`: nothing to match, keep what was popped.
                self.operators.push(other);
            }
            None => tracing::trace!("ignoring unmatched `)`"),
        }

        self.expect_operand = false;
    }

    fn emit_call(&mut self) {
        let count = self.arg_counts.pop().unwrap_or(0);
        if let Some(StackEntry::Function(name)) = self.operators.pop() {
            self.output.push(RpnToken::ArgCount(count));
            self.output.push(RpnToken::Call(name));
        }
    }

    fn comma(&mut self) {
        self.flush_to_paren();
        if self.innermost_paren_is_call() {
            if let Some(count) = self.arg_counts.last_mut() {
                *count += 1;
            }
        }
        self.expect_operand = true;
    }

    fn finish(mut self) -> Vec<RpnToken> {
        // Unclosed parentheses are closed implicitly.
        while let Some(entry) = self.operators.pop() {
            match entry {
                StackEntry::Binary(op, _) => self.output.push(RpnToken::Binary(op)),
                StackEntry::Prefix(op) => self.output.push(RpnToken::Unary(op)),
                StackEntry::LeftParen { call: true } => self.emit_call(),
                StackEntry::LeftParen { call: false } => {}
                StackEntry::Function(name) => {
                    self.output.push(RpnToken::ArgCount(0));
                    self.output.push(RpnToken::Call(name));
                }
            }
        }

        self.output
    }
}

/// Converts an already tokenized expression to postfix form.
pub fn compile_tokens(tokens: &[Token]) -> Vec<RpnToken> {
    let mut compiler = Compiler::new();
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        let followed_by_paren = matches!(iter.peek(), Some(next) if next.kind == TokenKind::OpenParen);

        if !matches!(token.kind, TokenKind::CloseParen | TokenKind::Comma) {
            compiler.mark_argument();
        }

        match token.kind {
            TokenKind::Number => compiler.push_operand(RpnToken::Number(token.value.clone())),
            TokenKind::String => compiler.push_operand(RpnToken::String(token.value.clone())),
            TokenKind::Identifier if followed_by_paren => {
                compiler
                    .operators
                    .push(StackEntry::Function(token.value.clone()));
                compiler.pending_call = true;
            }
            TokenKind::Identifier => compiler.push_operand(RpnToken::Symbol(token.value.clone())),
            TokenKind::OpenParen => compiler.open_paren(),
            TokenKind::CloseParen => compiler.close_paren(),
            TokenKind::Comma => compiler.comma(),
            TokenKind::Unknown => {
                tracing::trace!(token = %token.value, pos = token.pos, "skipping unknown token");
            }
            kind => {
                if compiler.expect_operand {
                    if let Some(op) = PREFIX_LOOKUP.get(&kind) {
                        compiler.operators.push(StackEntry::Prefix(*op));
                        continue;
                    }
                }

                match BINARY_LOOKUP.get(&kind) {
                    Some((op, bp)) => compiler.push_binary(*op, *bp),
                    None => tracing::trace!(token = %token.value, "operator has no binary form"),
                }
            }
        }
    }

    compiler.finish()
}

/// Tokenizes and converts an expression to postfix form.
pub fn compile(source: &str) -> Vec<RpnToken> {
    let rpn = compile_tokens(&tokenize(source));
    tracing::trace!(source, rpn = %format_rpn(&rpn), "compiled expression");
    rpn
}
