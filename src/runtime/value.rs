//! Dynamic values and their coercion rules.
//!
//! Every conversion here is total: a value that cannot be meaningfully
//! converted degrades to `0`, `false` or its textual form instead of failing.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMBER_PREFIX: Regex =
        Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)").unwrap();
    static ref NUMBER_LITERAL: Regex =
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
    Undefined,
    NaN,
    /// Reduced-precision number. Arithmetic widens it back to `f64`.
    Half(f32),
}

impl Value {
    /// Wraps a float, mapping any NaN result onto the `NaN` variant.
    pub fn number(n: f64) -> Value {
        if n.is_nan() {
            Value::NaN
        } else {
            Value::Number(n)
        }
    }

    /// Classifies the surface syntax of a literal: `true`/`false`, `null`,
    /// `undefined`, `NaN`, `Infinity`, a complete numeric literal or a quoted
    /// string. Anything else is not a literal.
    pub fn from_literal(text: &str) -> Option<Value> {
        let text = text.trim();
        match text {
            "true" => return Some(Value::Boolean(true)),
            "false" => return Some(Value::Boolean(false)),
            "null" => return Some(Value::Null),
            "undefined" => return Some(Value::Undefined),
            "NaN" => return Some(Value::NaN),
            "Infinity" => return Some(Value::Number(f64::INFINITY)),
            _ => {}
        }

        if NUMBER_LITERAL.is_match(text) {
            return text.parse::<f64>().ok().map(Value::number);
        }

        let quoted = text.len() >= 2
            && ((text.starts_with('"') && text.ends_with('"'))
                || (text.starts_with('\'') && text.ends_with('\'')));
        if quoted {
            return Some(Value::String(text[1..text.len() - 1].to_string()));
        }

        None
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::String(s) => parse_number_prefix(s).unwrap_or(0.0),
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Half(h) => f64::from(*h),
            Value::NaN => f64::NAN,
            Value::Null | Value::Undefined => 0.0,
        }
    }

    pub fn to_bool(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Half(h) => *h != 0.0,
            Value::Null | Value::Undefined | Value::NaN => false,
        }
    }

    /// `==`: nullish values only equal each other, `NaN` equals nothing, two
    /// strings compare as text and every other pairing compares as numbers.
    pub fn loose_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null | Value::Undefined, Value::Null | Value::Undefined) => true,
            (Value::Null | Value::Undefined, _) | (_, Value::Null | Value::Undefined) => false,
            (Value::NaN, _) | (_, Value::NaN) => false,
            (Value::String(a), Value::String(b)) => a == b,
            (a, b) => a.to_number() == b.to_number(),
        }
    }

    /// `===`: same variant and same payload.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Half(a), Value::Half(b)) => a == b,
            (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
            _ => false,
        }
    }

    /// Approximate footprint in bytes: the enum itself plus any heap buffer.
    pub fn size(&self) -> usize {
        let heap = match self {
            Value::String(s) => s.capacity(),
            _ => 0,
        };
        std::mem::size_of::<Value>() + heap
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::Undefined => write!(f, "undefined"),
            Value::NaN => write!(f, "NaN"),
            Value::Half(h) => {
                if h.is_finite() {
                    write!(f, "{}", h)
                } else {
                    write!(f, "{}", format_number(f64::from(*h)))
                }
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Parses the leading numeric prefix of `text` after skipping leading
/// whitespace, e.g. `"  12px"` gives `12`. Returns `None` when there is no
/// numeric prefix.
pub fn parse_number_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let matched = NUMBER_PREFIX.find(text)?.as_str();

    match matched.trim_start_matches(['+', '-']) {
        "Infinity" if matched.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => matched.parse::<f64>().ok(),
    }
}

pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        String::from("NaN")
    } else if n.is_infinite() {
        if n > 0.0 {
            String::from("Infinity")
        } else {
            String::from("-Infinity")
        }
    } else if n == 0.0 {
        String::from("0")
    } else {
        format!("{}", n)
    }
}
