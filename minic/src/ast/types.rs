//! Type AST nodes

use serde::{Deserialize, Serialize};

/// Type representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    /// 32-bit signed integer
    Int,
    /// No value (function return type only)
    Void,
    /// Fixed-size integer array: `int name[N]`
    Array(usize),
    /// Array parameter of any length: `int *name` / `int name[]`
    ArrayParam,
}

impl Type {
    /// Whether values of this type are arrays
    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_) | Type::ArrayParam)
    }

    /// Render a declaration of `name` with this type, C style
    pub fn declare(&self, name: &str) -> String {
        match self {
            Type::Int => format!("int {name}"),
            Type::Void => format!("void {name}"),
            Type::Array(len) => format!("int {name}[{len}]"),
            Type::ArrayParam => format!("int *{name}"),
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Void => write!(f, "void"),
            Type::Array(len) => write!(f, "int[{len}]"),
            Type::ArrayParam => write!(f, "int *"),
        }
    }
}
