//! Runtime values for the interpreter

use super::error::{InterpResult, RuntimeError};
use crate::ast::BinOp;
use std::fmt;

/// Runtime value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// 32-bit signed integer, wraps on overflow
    Int(i32),
    /// Fixed-length integer array, owned by one activation record
    Array(Vec<i32>),
    /// Result of a function that finished without returning a value
    Void,
}

impl Value {
    /// Zero-initialized array of `len` elements
    pub fn zeroed_array(len: usize) -> Self {
        Value::Array(vec![0; len])
    }

    /// Get type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Array(_) => "int[]",
            Value::Void => "void",
        }
    }

    /// Try to convert to i32
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Like `as_int`, failing with a type mismatch
    pub fn expect_int(&self) -> InterpResult<i32> {
        self.as_int()
            .ok_or_else(|| RuntimeError::type_mismatch("int", self.type_name()))
    }

    /// Bounds-checked element read
    pub fn get(&self, index: i32) -> InterpResult<i32> {
        match self {
            Value::Array(elems) => {
                let i = checked_index(index, elems.len())?;
                Ok(elems[i])
            }
            other => Err(RuntimeError::type_mismatch("int[]", other.type_name())),
        }
    }

    /// Bounds-checked element write
    pub fn set(&mut self, index: i32, value: i32) -> InterpResult<()> {
        match self {
            Value::Array(elems) => {
                let i = checked_index(index, elems.len())?;
                elems[i] = value;
                Ok(())
            }
            other => Err(RuntimeError::type_mismatch("int[]", other.type_name())),
        }
    }
}

fn checked_index(index: i32, len: usize) -> InterpResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| RuntimeError::index_out_of_bounds(index, len))
}

fn bool_int(b: bool) -> i32 {
    i32::from(b)
}

/// Apply a non-short-circuit binary operator to two integers.
///
/// Arithmetic wraps in two's complement; division and remainder truncate
/// toward zero and fail on a zero divisor.
pub fn apply_binop(op: BinOp, a: i32, b: i32) -> InterpResult<i32> {
    Ok(match op {
        BinOp::Add => a.wrapping_add(b),
        BinOp::Sub => a.wrapping_sub(b),
        BinOp::Mul => a.wrapping_mul(b),
        BinOp::Div => {
            if b == 0 {
                return Err(RuntimeError::division_by_zero());
            }
            a.wrapping_div(b)
        }
        BinOp::Mod => {
            if b == 0 {
                return Err(RuntimeError::division_by_zero());
            }
            a.wrapping_rem(b)
        }
        BinOp::Eq => bool_int(a == b),
        BinOp::Ne => bool_int(a != b),
        BinOp::Lt => bool_int(a < b),
        BinOp::Le => bool_int(a <= b),
        BinOp::Gt => bool_int(a > b),
        BinOp::Ge => bool_int(a >= b),
        BinOp::And => bool_int(a != 0 && b != 0),
        BinOp::Or => bool_int(a != 0 || b != 0),
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Array(elems) => {
                write!(f, "[")?;
                for (i, v) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Void => write!(f, "void"),
        }
    }
}
