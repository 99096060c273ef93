use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::lexer::tokens::TokenKind;

use super::rpn::{BinaryOp, UnaryOp};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Exponent,
    Prefix,
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Associativity {
    Left,
    Right,
}

lazy_static! {
    pub static ref BINARY_LOOKUP: HashMap<TokenKind, (BinaryOp, BindingPower)> = {
        let mut map = HashMap::new();
        // Logical
        map.insert(TokenKind::Or, (BinaryOp::Or, BindingPower::LogicalOr));
        map.insert(TokenKind::And, (BinaryOp::And, BindingPower::LogicalAnd));

        // Equality
        map.insert(TokenKind::Equals, (BinaryOp::LooseEquals, BindingPower::Equality));
        map.insert(TokenKind::NotEquals, (BinaryOp::LooseNotEquals, BindingPower::Equality));
        map.insert(TokenKind::StrictEquals, (BinaryOp::StrictEquals, BindingPower::Equality));
        map.insert(TokenKind::StrictNotEquals, (BinaryOp::StrictNotEquals, BindingPower::Equality));

        // Relational
        map.insert(TokenKind::Less, (BinaryOp::Less, BindingPower::Relational));
        map.insert(TokenKind::LessEquals, (BinaryOp::LessEquals, BindingPower::Relational));
        map.insert(TokenKind::Greater, (BinaryOp::Greater, BindingPower::Relational));
        map.insert(TokenKind::GreaterEquals, (BinaryOp::GreaterEquals, BindingPower::Relational));

        // Additive and multiplicative
        map.insert(TokenKind::Plus, (BinaryOp::Add, BindingPower::Additive));
        map.insert(TokenKind::Dash, (BinaryOp::Subtract, BindingPower::Additive));
        map.insert(TokenKind::Star, (BinaryOp::Multiply, BindingPower::Multiplicative));
        map.insert(TokenKind::Slash, (BinaryOp::Divide, BindingPower::Multiplicative));
        map.insert(TokenKind::Percent, (BinaryOp::Modulo, BindingPower::Multiplicative));

        map.insert(TokenKind::StarStar, (BinaryOp::Power, BindingPower::Exponent));
        map
    };

    pub static ref PREFIX_LOOKUP: HashMap<TokenKind, UnaryOp> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Dash, UnaryOp::Negate);
        map.insert(TokenKind::Plus, UnaryOp::Plus);
        map.insert(TokenKind::Not, UnaryOp::Not);
        map
    };
}

/// `**` groups right to left (`2 ** 3 ** 2` is `2 ** 9`); every other
/// binary operator groups left to right.
pub fn associativity(op: BinaryOp) -> Associativity {
    match op {
        BinaryOp::Power => Associativity::Right,
        _ => Associativity::Left,
    }
}
