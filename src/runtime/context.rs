use std::{collections::HashMap, rc::Rc};

use crate::ast::statements::FunctionDef;

use super::{
    builtins::{register_constants, Builtins},
    environment::Environment,
};

/// Execution state of one scope: variables plus both callable registries.
///
/// Calls run on a [`Context::snapshot`] of the caller's context, so nothing a
/// callee binds or defines is visible to the caller afterwards. Builtins and
/// function bodies never change after registration and are shared by `Rc`.
#[derive(Debug, Clone)]
pub struct Context {
    pub variables: Environment,
    pub builtins: Rc<Builtins>,
    pub functions: HashMap<String, Rc<FunctionDef>>,
}

impl Context {
    /// A global context with the standard builtins and constants.
    pub fn new() -> Self {
        let mut variables = Environment::new();
        register_constants(&mut variables);

        Context {
            variables,
            builtins: Rc::new(Builtins::standard()),
            functions: HashMap::new(),
        }
    }

    pub fn snapshot(&self) -> Context {
        self.clone()
    }

    pub fn define_function(&mut self, name: impl Into<String>, function: FunctionDef) {
        self.functions.insert(name.into(), Rc::new(function));
    }

    pub fn get_function(&self, name: &str) -> Option<Rc<FunctionDef>> {
        self.functions.get(name).cloned()
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}
