//! Host-provided callables and constants.

use std::{collections::HashMap, fmt::Debug, io::Write};

use crate::errors::errors::{Error, ErrorImpl};

use super::{
    environment::Environment,
    evaluator::{evaluate_expression, Callables},
    value::Value,
};

/// What a builtin may touch while it runs.
pub struct BuiltinCall<'a> {
    pub variables: &'a Environment,
    pub builtins: &'a Builtins,
    pub out: &'a mut dyn Write,
}

pub type BuiltinFn = fn(&mut BuiltinCall<'_>, &[Value]) -> Result<Value, Error>;

#[derive(Clone, Default)]
pub struct Builtins {
    functions: HashMap<String, BuiltinFn>,
}

impl Debug for Builtins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("Builtins").field("functions", &names).finish()
    }
}

impl Builtins {
    pub fn new() -> Self {
        Builtins::default()
    }

    /// The registry every interpreter starts with.
    pub fn standard() -> Self {
        let mut builtins = Builtins::new();

        builtins.register("console.log", console_log);
        builtins.register("sizeof", size_of);
        builtins.register("assert", assert);

        builtins.register("Math.sqrt", |_, args| unary_math(args, f64::sqrt));
        builtins.register("Math.sin", |_, args| unary_math(args, f64::sin));
        builtins.register("Math.cos", |_, args| unary_math(args, f64::cos));
        builtins.register("Math.tan", |_, args| unary_math(args, f64::tan));
        builtins.register("Math.abs", |_, args| unary_math(args, f64::abs));
        builtins.register("Math.floor", |_, args| unary_math(args, f64::floor));
        builtins.register("Math.ceil", |_, args| unary_math(args, f64::ceil));
        builtins.register("Math.round", |_, args| unary_math(args, js_round));
        builtins.register("Math.trunc", |_, args| unary_math(args, f64::trunc));
        builtins.register("Math.exp", |_, args| unary_math(args, f64::exp));
        builtins.register("Math.log", |_, args| unary_math(args, f64::ln));
        builtins.register("Math.atan", |_, args| unary_math(args, f64::atan));
        builtins.register("Math.asin", |_, args| unary_math(args, f64::asin));
        builtins.register("Math.acos", |_, args| unary_math(args, f64::acos));
        builtins.register("Math.pow", |_, args| binary_math(args, f64::powf));
        builtins.register("Math.atan2", |_, args| binary_math(args, f64::atan2));
        builtins.register("Math.max", |_, args| {
            Ok(fold_math(args, f64::NEG_INFINITY, f64::max))
        });
        builtins.register("Math.min", |_, args| Ok(fold_math(args, f64::INFINITY, f64::min)));
        builtins.register("Math.random", |_, _| Ok(Value::Number(rand::random::<f64>())));
        builtins.register("Math.fround", fround);

        builtins
    }

    pub fn register(&mut self, name: impl Into<String>, function: BuiltinFn) {
        self.functions.insert(name.into(), function);
    }

    pub fn get(&self, name: &str) -> Option<BuiltinFn> {
        self.functions.get(name).copied()
    }
}

/// Binds the constants scripts can read as plain variables.
pub fn register_constants(env: &mut Environment) {
    env.set("NaN", Value::NaN);
    env.set("undefined", Value::Undefined);
    env.set("Math.PI", Value::Number(std::f64::consts::PI));
    env.set("Math.E", Value::Number(std::f64::consts::E));
}

/// Dispatches only to builtins. Used where user functions must not run,
/// such as the condition string handed to `assert`.
pub struct BuiltinsOnly<'a> {
    pub variables: &'a Environment,
    pub builtins: &'a Builtins,
    pub out: &'a mut dyn Write,
}

impl Callables for BuiltinsOnly<'_> {
    fn call(&mut self, name: &str, args: Vec<Value>) -> Option<Result<Value, Error>> {
        let function = self.builtins.get(name)?;
        let mut call = BuiltinCall {
            variables: self.variables,
            builtins: self.builtins,
            out: &mut *self.out,
        };
        Some(function(&mut call, &args))
    }
}

fn unary_math(args: &[Value], op: fn(f64) -> f64) -> Result<Value, Error> {
    match args.first() {
        Some(x) => Ok(Value::number(op(x.to_number()))),
        None => Ok(Value::NaN),
    }
}

fn binary_math(args: &[Value], op: fn(f64, f64) -> f64) -> Result<Value, Error> {
    match args {
        [x, y, ..] => Ok(Value::number(op(x.to_number(), y.to_number()))),
        _ => Ok(Value::NaN),
    }
}

// Any NaN argument makes the whole result NaN, unlike `f64::max`.
fn fold_math(args: &[Value], initial: f64, op: fn(f64, f64) -> f64) -> Value {
    let mut acc = initial;
    for arg in args {
        let n = arg.to_number();
        if n.is_nan() {
            return Value::NaN;
        }
        acc = op(acc, n);
    }
    Value::number(acc)
}

// Halves round towards positive infinity: round(-2.5) is -2.
fn js_round(x: f64) -> f64 {
    (x + 0.5).floor()
}

fn console_log(call: &mut BuiltinCall<'_>, args: &[Value]) -> Result<Value, Error> {
    let line = args
        .iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<String>>()
        .join(" ");
    writeln!(call.out, "{}", line)?;
    Ok(Value::Undefined)
}

fn size_of(_call: &mut BuiltinCall<'_>, args: &[Value]) -> Result<Value, Error> {
    let size = args.first().unwrap_or(&Value::Undefined).size();
    Ok(Value::Number(size as f64))
}

fn fround(_call: &mut BuiltinCall<'_>, args: &[Value]) -> Result<Value, Error> {
    match args.first() {
        Some(x) => match x.to_number() {
            n if n.is_nan() => Ok(Value::NaN),
            n => Ok(Value::Half(n as f32)),
        },
        None => Ok(Value::NaN),
    }
}

/// `assert(cond[, msg])`: the condition's text is evaluated as an expression
/// against the current variables with builtins only.
fn assert(call: &mut BuiltinCall<'_>, args: &[Value]) -> Result<Value, Error> {
    let condition = match args.first() {
        Some(condition) => condition.to_string(),
        None => return Err(Error::new(ErrorImpl::AssertWithoutArguments, 0)),
    };

    let mut callables = BuiltinsOnly {
        variables: call.variables,
        builtins: call.builtins,
        out: &mut *call.out,
    };
    let result = evaluate_expression(&condition, call.variables, &mut callables)?;

    if result.to_bool() {
        Ok(Value::Undefined)
    } else {
        let message = args.get(1).map(|message| message.to_string());
        Err(Error::new(ErrorImpl::AssertionFailed { message }, 0))
    }
}
