//! Statement AST nodes

use super::{Expr, VarDecl};
use serde::{Deserialize, Serialize};

/// Block: local declarations followed by statements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub decls: Vec<VarDecl>,
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(decls: Vec<VarDecl>, stmts: Vec<Stmt>) -> Self {
        Self { decls, stmts }
    }

    /// Block with statements only
    pub fn stmts(stmts: Vec<Stmt>) -> Self {
        Self {
            decls: Vec::new(),
            stmts,
        }
    }
}

/// Assignment target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LValue {
    /// Scalar variable: x = ...
    Var(String),
    /// Array element: a[i] = ...
    Index { array: String, index: Expr },
}

/// Statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stmt {
    /// Nested block with its own scope
    Block(Block),

    /// Assignment: target = value
    Assign { target: LValue, value: Expr },

    /// Conditional
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// Loop: while (cond) body
    While { cond: Expr, body: Box<Stmt> },

    /// Expression evaluated for its effect: print_i(x);
    Expr(Expr),

    /// Return from the current function
    Return(Option<Expr>),
}

impl Stmt {
    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Stmt::Assign {
            target: LValue::Var(name.into()),
            value,
        }
    }

    pub fn assign_index(array: impl Into<String>, index: Expr, value: Expr) -> Self {
        Stmt::Assign {
            target: LValue::Index {
                array: array.into(),
                index,
            },
            value,
        }
    }

    pub fn if_else(cond: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Self {
        Stmt::If {
            cond,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }
    }

    pub fn while_loop(cond: Expr, body: Stmt) -> Self {
        Stmt::While {
            cond,
            body: Box::new(body),
        }
    }

    pub fn ret(value: Expr) -> Self {
        Stmt::Return(Some(value))
    }
}
