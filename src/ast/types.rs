//! Type annotations.
//!
//! Annotations are written as `name: TYPE` in `let` declarations and in
//! parameter lists. Only parameter annotations are enforced, and only the
//! primitive names are checked; `any` and unknown names always pass.

use std::fmt::Display;

use crate::runtime::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeAnnotation {
    Number,
    String,
    Boolean,
    Any,
    /// An annotation naming something other than a primitive.
    Named(String),
}

impl TypeAnnotation {
    pub fn parse(text: &str) -> TypeAnnotation {
        match text.trim() {
            "number" => TypeAnnotation::Number,
            "string" => TypeAnnotation::String,
            "boolean" => TypeAnnotation::Boolean,
            "any" | "" => TypeAnnotation::Any,
            other => TypeAnnotation::Named(other.to_string()),
        }
    }

    /// Whether values of this annotation are verified at call sites.
    pub fn is_checked(&self) -> bool {
        matches!(
            self,
            TypeAnnotation::Number | TypeAnnotation::String | TypeAnnotation::Boolean
        )
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeAnnotation::Number => {
                matches!(value, Value::Number(_) | Value::Half(_) | Value::NaN)
            }
            TypeAnnotation::String => matches!(value, Value::String(_)),
            TypeAnnotation::Boolean => matches!(value, Value::Boolean(_)),
            TypeAnnotation::Any | TypeAnnotation::Named(_) => true,
        }
    }
}

impl Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnnotation::Number => write!(f, "number"),
            TypeAnnotation::String => write!(f, "string"),
            TypeAnnotation::Boolean => write!(f, "boolean"),
            TypeAnnotation::Any => write!(f, "any"),
            TypeAnnotation::Named(name) => write!(f, "{}", name),
        }
    }
}
