//! Expression AST nodes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// Integer literal
    IntLit(i32),

    /// Variable reference
    Var(String),

    /// Array element read: array[index]
    Index {
        array: String,
        index: Box<Expr>,
    },

    /// Binary operation
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },

    /// Unary operation
    Unary {
        op: UnOp,
        expr: Box<Expr>,
    },

    /// Function call
    Call {
        func: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn int(n: i32) -> Self {
        Expr::IntLit(n)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn index(array: impl Into<String>, index: Expr) -> Self {
        Expr::Index {
            array: array.into(),
            index: Box::new(index),
        }
    }

    pub fn binary(left: Expr, op: BinOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn neg(expr: Expr) -> Self {
        Expr::Unary {
            op: UnOp::Neg,
            expr: Box::new(expr),
        }
    }

    pub fn call(func: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: func.into(),
            args,
        }
    }

    /// Binding strength of this node when printed as source
    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Unary { .. } => UNARY_PRECEDENCE,
            Expr::IntLit(n) if *n < 0 => UNARY_PRECEDENCE,
            _ => PRIMARY_PRECEDENCE,
        }
    }

    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, min_prec: u8) -> fmt::Result {
        let parens = self.precedence() < min_prec;
        if parens {
            write!(f, "(")?;
        }
        match self {
            Expr::IntLit(n) => write!(f, "{n}")?,
            Expr::Var(name) => write!(f, "{name}")?,
            Expr::Index { array, index } => write!(f, "{array}[{index}]")?,
            Expr::Binary { left, op, right } => {
                let prec = op.precedence();
                left.fmt_prec(f, prec)?;
                write!(f, " {op} ")?;
                // left-associative: an equal-precedence right operand needs parens
                right.fmt_prec(f, prec + 1)?;
            }
            Expr::Unary { op, expr } => {
                write!(f, "{op}")?;
                // keep `- -x` from printing as `--x`
                expr.fmt_prec(f, UNARY_PRECEDENCE + 1)?;
            }
            Expr::Call { func, args } => {
                write!(f, "{func}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")?;
            }
        }
        if parens {
            write!(f, ")")?;
        }
        Ok(())
    }
}

const UNARY_PRECEDENCE: u8 = 7;
const PRIMARY_PRECEDENCE: u8 = 8;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Logical (short-circuit)
    And,
    Or,
}

impl BinOp {
    /// Binding strength; higher binds tighter. All binary operators are
    /// left-associative.
    pub fn precedence(&self) -> u8 {
        match self {
            BinOp::Mul | BinOp::Div | BinOp::Mod => 6,
            BinOp::Add | BinOp::Sub => 5,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => 4,
            BinOp::Eq | BinOp::Ne => 3,
            BinOp::And => 2,
            BinOp::Or => 1,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        };
        write!(f, "{s}")
    }
}

/// Unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnOp {
    /// Negation: -x
    Neg,
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnOp::Neg => write!(f, "-"),
        }
    }
}
