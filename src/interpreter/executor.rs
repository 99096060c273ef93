//! Statement execution and the call discipline.
//!
//! Every user function call runs on a snapshot of the context the call
//! appears in. Parameters are bound in the snapshot and the body is parsed
//! and executed line by line; the snapshot is dropped when the call
//! returns, so only the return value escapes.

use std::io::Write;

use tracing::{debug, instrument};

use crate::{
    ast::statements::{
        CallStmt, ClassDeclStmt, ClassMember, ElseBranch, FunctionDef, IfStmt, SourceLine, Stmt,
        StmtKind,
    },
    errors::errors::{Error, ErrorImpl},
    parser::parser::Parser,
    runtime::{
        builtins::BuiltinCall,
        context::Context,
        evaluator::{evaluate_expression, Callables},
        value::Value,
    },
};

/// How a statement left the block it ran in.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Continue,
    Return(Value),
}

pub struct Executor<'a> {
    out: &'a mut dyn Write,
    /// Line of the statement currently executing.
    line: usize,
    depth: usize,
    max_depth: usize,
}

/// Builtins first, then user functions of the context the expression is
/// evaluated in.
struct Dispatcher<'e, 'a> {
    executor: &'e mut Executor<'a>,
    ctx: &'e Context,
    line: usize,
}

impl Callables for Dispatcher<'_, '_> {
    fn call(&mut self, name: &str, args: Vec<Value>) -> Option<Result<Value, Error>> {
        if let Some(builtin) = self.ctx.builtins.get(name) {
            let mut call = BuiltinCall {
                variables: &self.ctx.variables,
                builtins: &self.ctx.builtins,
                out: &mut *self.executor.out,
            };
            return Some(builtin(&mut call, &args));
        }

        let function = self.ctx.get_function(name)?;
        if args.len() != function.arity() {
            // Reported but not raised: the call evaluates to undefined.
            let mismatch = Error::new(
                ErrorImpl::ArgumentCountMismatch {
                    function: name.to_string(),
                    expected: function.arity(),
                    received: args.len(),
                },
                self.line,
            );
            return Some(self.executor.report(&mismatch).map(|_| Value::Undefined));
        }

        Some(self.executor.invoke(self.ctx, name, &function, args))
    }
}

impl<'a> Executor<'a> {
    pub fn new(out: &'a mut dyn Write, max_depth: usize) -> Self {
        Executor {
            out,
            line: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Writes a statement-level diagnostic to the script's output.
    pub fn report(&mut self, error: &Error) -> Result<(), Error> {
        debug!(
            line = error.get_line(),
            error = error.get_error_name(),
            tip = %error.get_tip(),
            "statement failed"
        );
        writeln!(self.out, "{}", error)?;
        Ok(())
    }

    /// Evaluates an expression against `ctx` with builtins and user
    /// functions callable.
    pub fn evaluate(&mut self, ctx: &Context, expr: &str) -> Result<Value, Error> {
        let line = self.line;
        let mut dispatcher = Dispatcher {
            executor: self,
            ctx,
            line,
        };
        evaluate_expression(expr, &ctx.variables, &mut dispatcher)
    }

    /// Runs every statement `parser` yields. Statement-level errors are
    /// reported and execution moves on; evaluation failures propagate.
    pub fn run(
        &mut self,
        ctx: &mut Context,
        parser: Parser,
        in_function: bool,
    ) -> Result<Flow, Error> {
        for stmt in parser {
            let result = stmt.and_then(|stmt| {
                self.line = stmt.line;
                self.execute_stmt(ctx, &stmt, in_function)
                    .map_err(|error| error.at_line(stmt.line))
            });

            match result {
                Ok(Flow::Continue) => {}
                Ok(flow) => return Ok(flow),
                Err(error) if error.is_recoverable() => self.report(&error)?,
                Err(error) => return Err(error),
            }
        }

        Ok(Flow::Continue)
    }

    pub fn run_lines(
        &mut self,
        ctx: &mut Context,
        lines: &[SourceLine],
        in_function: bool,
    ) -> Result<Flow, Error> {
        self.run(ctx, Parser::from_lines(lines.to_vec()), in_function)
    }

    pub fn execute_stmt(
        &mut self,
        ctx: &mut Context,
        stmt: &Stmt,
        in_function: bool,
    ) -> Result<Flow, Error> {
        debug!(line = stmt.line, depth = self.depth, "executing statement");

        match &stmt.kind {
            StmtKind::Empty => {}
            StmtKind::VarDecl(decl) => match self.evaluate(ctx, &decl.expr) {
                Ok(value) => ctx.variables.set(decl.identifier.clone(), value),
                Err(error) => writeln!(self.out, "Error evaluating expression: {}", error)?,
            },
            StmtKind::FnDecl(decl) => {
                ctx.define_function(decl.name.clone(), decl.function.clone());
            }
            StmtKind::If(stmt) => return self.execute_if(ctx, stmt, in_function),
            StmtKind::ClassDecl(decl) => self.execute_class(ctx, decl)?,
            StmtKind::Return(ret) => {
                if !in_function {
                    return Err(Error::new(ErrorImpl::ReturnOutsideFunction, stmt.line));
                }
                let value = match &ret.expr {
                    Some(expr) => self.evaluate(ctx, expr)?,
                    None => Value::Undefined,
                };
                return Ok(Flow::Return(value));
            }
            StmtKind::Call(call) => self.execute_call(ctx, call, stmt.line)?,
        }

        Ok(Flow::Continue)
    }

    fn execute_if(
        &mut self,
        ctx: &mut Context,
        stmt: &IfStmt,
        in_function: bool,
    ) -> Result<Flow, Error> {
        if self.evaluate(ctx, &stmt.condition)?.to_bool() {
            return self.run_lines(ctx, &stmt.then_block, in_function);
        }

        match &stmt.else_branch {
            Some(ElseBranch::Block(lines)) => self.run_lines(ctx, lines, in_function),
            Some(ElseBranch::If(nested)) => self.execute_if(ctx, nested, in_function),
            None => Ok(Flow::Continue),
        }
    }

    fn execute_class(&mut self, ctx: &mut Context, decl: &ClassDeclStmt) -> Result<(), Error> {
        for member in &decl.members {
            match member {
                ClassMember::Method { name, function } => {
                    ctx.define_function(format!("{}.{}", decl.name, name), function.clone());
                }
                ClassMember::Property { name, expr } => {
                    let value = self.evaluate(ctx, expr)?;
                    ctx.variables.set(format!("{}.{}", decl.name, name), value);
                }
            }
        }
        Ok(())
    }

    /// Bare call arguments are classified by their surface syntax only: a
    /// literal, or else the name of a variable. Text that is neither (an
    /// operator expression, a nested call) names no variable and passes
    /// undefined.
    fn classify_argument(ctx: &Context, text: &str) -> Value {
        Value::from_literal(text).unwrap_or_else(|| ctx.variables.lookup(text))
    }

    fn execute_call(&mut self, ctx: &mut Context, call: &CallStmt, line: usize) -> Result<(), Error> {
        let args: Vec<Value> = call
            .args
            .iter()
            .map(|arg| Executor::classify_argument(ctx, arg))
            .collect();

        if let Some(builtin) = ctx.builtins.get(&call.callee) {
            let mut builtin_call = BuiltinCall {
                variables: &ctx.variables,
                builtins: &ctx.builtins,
                out: &mut *self.out,
            };
            builtin(&mut builtin_call, &args)?;
            return Ok(());
        }

        let function = match ctx.get_function(&call.callee) {
            Some(function) => function,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnknownFunction {
                        function: call.callee.clone(),
                    },
                    line,
                ))
            }
        };

        if args.len() != function.arity() {
            return Err(Error::new(
                ErrorImpl::ArgumentCountMismatch {
                    function: call.callee.clone(),
                    expected: function.arity(),
                    received: args.len(),
                },
                line,
            ));
        }

        let params = function.params.iter().zip(&function.param_types);
        for ((param, annotation), arg) in params.zip(&args) {
            if !annotation.matches(arg) {
                return Err(Error::new(
                    ErrorImpl::ArgumentTypeMatchError {
                        param: param.clone(),
                        expected: annotation.to_string(),
                        received: arg.to_string(),
                    },
                    line,
                ));
            }
        }

        self.invoke(ctx, &call.callee, &function, args)?;
        Ok(())
    }

    /// Runs `function` on a snapshot of `ctx` and returns its result.
    #[instrument(level = "debug", skip(self, ctx, function, args), fields(depth = self.depth))]
    pub fn invoke(
        &mut self,
        ctx: &Context,
        name: &str,
        function: &FunctionDef,
        args: Vec<Value>,
    ) -> Result<Value, Error> {
        if self.depth >= self.max_depth {
            return Err(Error::new(
                ErrorImpl::CallStackExceeded { depth: self.depth },
                0,
            ));
        }

        let mut local = ctx.snapshot();
        for (param, arg) in function.params.iter().zip(args) {
            local.variables.set(param.clone(), arg);
        }

        self.depth += 1;
        let flow = self.run_lines(&mut local, &function.body, true);
        self.depth -= 1;

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Continue => Ok(Value::Undefined),
        }
    }
}
