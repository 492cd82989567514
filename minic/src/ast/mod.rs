//! Abstract Syntax Tree definitions
//!
//! The evaluator never reads minic source. A front-end hands it a
//! [`Program`], either in memory or serialized as JSON.

mod expr;
mod print;
mod stmt;
mod types;

pub use expr::*;
pub use stmt::*;
pub use types::*;

use serde::{Deserialize, Serialize};

/// A program is a sequence of top-level items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub items: Vec<Item>,
}

/// Top-level item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    /// Global variable, zero-initialized at the start of every run
    Global(VarDecl),
    FunDecl(FunDecl),
}

/// Variable declaration: `int x;` or `int a[5];`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarDecl {
    pub ty: Type,
    pub name: String,
}

impl VarDecl {
    pub fn new(ty: Type, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
        }
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(Type::Int, name)
    }

    pub fn array(name: impl Into<String>, len: usize) -> Self {
        Self::new(Type::Array(len), name)
    }
}

/// Function parameter
pub type Param = VarDecl;

/// Function declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub ret_ty: Type,
    pub body: Block,
}

impl FunDecl {
    pub fn new(name: impl Into<String>, params: Vec<Param>, ret_ty: Type, body: Block) -> Self {
        Self {
            name: name.into(),
            params,
            ret_ty,
            body,
        }
    }
}

impl Program {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Function declarations in program order
    pub fn functions(&self) -> impl Iterator<Item = &FunDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::FunDecl(f) => Some(f),
            Item::Global(_) => None,
        })
    }

    /// Global declarations in program order
    pub fn globals(&self) -> impl Iterator<Item = &VarDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Global(g) => Some(g),
            Item::FunDecl(_) => None,
        })
    }

    /// Load a program from its JSON form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
