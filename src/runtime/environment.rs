use std::collections::HashMap;

use super::value::Value;

/// Variable storage for one scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Binds `name`, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Like [`Environment::get`] but unbound names read as `undefined`.
    pub fn lookup(&self, name: &str) -> Value {
        self.get(name).cloned().unwrap_or(Value::Undefined)
    }
}
