//! Stack evaluation of postfix token streams.
//!
//! Both operands of every binary operator are evaluated before the operator
//! is applied, so `&&` and `||` do not short-circuit.

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::{trace, warn};

use crate::{
    compiler::{
        compiler::compile,
        rpn::{BinaryOp, RpnToken, UnaryOp},
    },
    errors::errors::Error,
};

use super::{
    environment::Environment,
    value::{parse_number_prefix, Value},
};

lazy_static! {
    static ref KEYWORD_LITERALS: HashMap<&'static str, Value> = {
        let mut map = HashMap::new();
        map.insert("true", Value::Boolean(true));
        map.insert("false", Value::Boolean(false));
        map.insert("null", Value::Null);
        map.insert("undefined", Value::Undefined);
        map.insert("NaN", Value::NaN);
        map.insert("Infinity", Value::Number(f64::INFINITY));
        map
    };
}

/// Anything `@name` tokens can be dispatched to.
pub trait Callables {
    /// Invokes `name`, or returns `None` when nothing of that name exists.
    fn call(&mut self, name: &str, args: Vec<Value>) -> Option<Result<Value, Error>>;
}

fn pop(stack: &mut Vec<Value>) -> Value {
    stack.pop().unwrap_or_else(|| {
        warn!("evaluator stack underflow, substituting undefined");
        Value::Undefined
    })
}

/// Resolves a bare word: keyword literals first, then variables.
pub fn resolve_symbol(name: &str, env: &Environment) -> Value {
    match KEYWORD_LITERALS.get(name) {
        Some(value) => value.clone(),
        None => env.lookup(name),
    }
}

pub fn evaluate(
    rpn: &[RpnToken],
    env: &Environment,
    callables: &mut dyn Callables,
) -> Result<Value, Error> {
    let mut stack: Vec<Value> = vec![];

    for (idx, token) in rpn.iter().enumerate() {
        match token {
            RpnToken::Number(text) => {
                let value = parse_number_prefix(text)
                    .map(Value::number)
                    .unwrap_or_else(|| resolve_symbol(text, env));
                stack.push(value);
            }
            RpnToken::String(text) => stack.push(Value::String(text.clone())),
            RpnToken::Symbol(name) => stack.push(resolve_symbol(name, env)),
            RpnToken::Binary(op) => {
                let rhs = pop(&mut stack);
                let lhs = pop(&mut stack);
                stack.push(apply_binary(*op, &lhs, &rhs));
            }
            RpnToken::Unary(op) => {
                let operand = pop(&mut stack);
                stack.push(apply_unary(*op, &operand));
            }
            RpnToken::ArgCount(_) => {}
            RpnToken::Call(name) => {
                let argc = match idx.checked_sub(1).map(|prev| &rpn[prev]) {
                    Some(RpnToken::ArgCount(n)) => *n,
                    _ => 0,
                };

                let mut args: Vec<Value> = (0..argc).map(|_| pop(&mut stack)).collect();
                args.reverse();

                match callables.call(name, args) {
                    Some(result) => stack.push(result?),
                    None => {
                        trace!(function = %name, "unresolved call yields undefined");
                        stack.push(Value::Undefined);
                    }
                }
            }
        }
    }

    if stack.len() > 1 {
        trace!(leftover = stack.len() - 1, "discarding extra stack values");
    }

    Ok(stack.pop().unwrap_or(Value::Undefined))
}

/// Compiles and evaluates `source` in one step.
pub fn evaluate_expression(
    source: &str,
    env: &Environment,
    callables: &mut dyn Callables,
) -> Result<Value, Error> {
    evaluate(&compile(source), env, callables)
}

pub fn apply_binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> Value {
    match op {
        BinaryOp::Add if lhs.is_string() || rhs.is_string() => {
            Value::String(format!("{}{}", lhs, rhs))
        }
        BinaryOp::Add => Value::number(lhs.to_number() + rhs.to_number()),
        BinaryOp::Subtract => Value::number(lhs.to_number() - rhs.to_number()),
        BinaryOp::Multiply => Value::number(lhs.to_number() * rhs.to_number()),
        BinaryOp::Divide => {
            let divisor = rhs.to_number();
            if divisor == 0.0 {
                Value::NaN
            } else {
                Value::number(lhs.to_number() / divisor)
            }
        }
        BinaryOp::Modulo => Value::number(lhs.to_number() % rhs.to_number()),
        BinaryOp::Power => Value::number(lhs.to_number().powf(rhs.to_number())),
        BinaryOp::Less => Value::Boolean(lhs.to_number() < rhs.to_number()),
        BinaryOp::LessEquals => Value::Boolean(lhs.to_number() <= rhs.to_number()),
        BinaryOp::Greater => Value::Boolean(lhs.to_number() > rhs.to_number()),
        BinaryOp::GreaterEquals => Value::Boolean(lhs.to_number() >= rhs.to_number()),
        BinaryOp::LooseEquals => Value::Boolean(lhs.loose_equals(rhs)),
        BinaryOp::LooseNotEquals => Value::Boolean(!lhs.loose_equals(rhs)),
        BinaryOp::StrictEquals => Value::Boolean(lhs.strict_equals(rhs)),
        BinaryOp::StrictNotEquals => Value::Boolean(!lhs.strict_equals(rhs)),
        BinaryOp::And => Value::Boolean(lhs.to_bool() && rhs.to_bool()),
        BinaryOp::Or => Value::Boolean(lhs.to_bool() || rhs.to_bool()),
    }
}

pub fn apply_unary(op: UnaryOp, operand: &Value) -> Value {
    match op {
        UnaryOp::Negate => Value::number(-operand.to_number()),
        UnaryOp::Plus => Value::number(operand.to_number()),
        UnaryOp::Not => Value::Boolean(!operand.to_bool()),
    }
}
