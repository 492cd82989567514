//! Runtime errors for the interpreter
//!
//! Every runtime error is fatal: the run stops at the first fault and the
//! error is handed back to whoever started it, together with the call chain
//! that was active when it happened.

use std::fmt;

/// Runtime error during interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub message: String,
    /// Functions on the call stack at the fault, outermost first
    pub call_chain: Vec<String>,
}

/// Kinds of runtime errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Division or remainder by zero
    ArithmeticError,
    /// Array index outside [0, len)
    IndexOutOfBounds,
    /// Reference to a name with no binding
    UnboundVariable,
    /// Name declared twice in the same scope
    DuplicateBinding,
    /// Call to a name that is neither declared nor built in
    UnknownFunction,
    /// Argument count differs from the parameter count
    ArityMismatch,
    /// Call depth exceeded the configured maximum
    StackOverflow,
    /// Declared array length exceeded the configured maximum
    ArrayTooLarge,
    /// Array used where an int is expected, or the reverse
    TypeMismatch,
    /// Two functions share a name, or one shadows a built-in
    DuplicateFunction,
    /// The output sink rejected a write
    OutputFailed,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::ArithmeticError => "ArithmeticError",
            ErrorKind::IndexOutOfBounds => "IndexOutOfBounds",
            ErrorKind::UnboundVariable => "UnboundVariable",
            ErrorKind::DuplicateBinding => "DuplicateBinding",
            ErrorKind::UnknownFunction => "UnknownFunction",
            ErrorKind::ArityMismatch => "ArityMismatch",
            ErrorKind::StackOverflow => "StackOverflow",
            ErrorKind::ArrayTooLarge => "ArrayTooLarge",
            ErrorKind::TypeMismatch => "TypeMismatch",
            ErrorKind::DuplicateFunction => "DuplicateFunction",
            ErrorKind::OutputFailed => "OutputFailed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl RuntimeError {
    fn new(kind: ErrorKind, message: String) -> Self {
        RuntimeError {
            kind,
            message,
            call_chain: Vec::new(),
        }
    }

    pub fn division_by_zero() -> Self {
        Self::new(ErrorKind::ArithmeticError, "division by zero".to_string())
    }

    pub fn index_out_of_bounds(index: i32, len: usize) -> Self {
        Self::new(
            ErrorKind::IndexOutOfBounds,
            format!("index {index} out of bounds for length {len}"),
        )
    }

    pub fn unbound_variable(name: &str) -> Self {
        Self::new(
            ErrorKind::UnboundVariable,
            format!("unbound variable: {name}"),
        )
    }

    pub fn duplicate_binding(name: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateBinding,
            format!("duplicate binding: {name} is already declared in this scope"),
        )
    }

    pub fn unknown_function(name: &str) -> Self {
        Self::new(
            ErrorKind::UnknownFunction,
            format!("unknown function: {name}"),
        )
    }

    pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> Self {
        Self::new(
            ErrorKind::ArityMismatch,
            format!("function {name} expects {expected} argument(s), got {got}"),
        )
    }

    pub fn stack_overflow(limit: usize) -> Self {
        Self::new(
            ErrorKind::StackOverflow,
            format!("stack overflow: call depth exceeds {limit}"),
        )
    }

    pub fn array_too_large(name: &str, len: usize, limit: usize) -> Self {
        Self::new(
            ErrorKind::ArrayTooLarge,
            format!("array {name} has {len} elements, limit is {limit}"),
        )
    }

    pub fn type_mismatch(expected: &str, got: &str) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!("type mismatch: expected {expected}, got {got}"),
        )
    }

    pub fn duplicate_function(name: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateFunction,
            format!("duplicate function: {name}"),
        )
    }

    pub fn output_failed(msg: &str) -> Self {
        Self::new(ErrorKind::OutputFailed, format!("output error: {msg}"))
    }

    /// Attach the call chain, keeping one that is already set: the frame
    /// closest to the fault records it first.
    pub fn with_call_chain<'a>(mut self, chain: impl IntoIterator<Item = &'a str>) -> Self {
        if self.call_chain.is_empty() {
            self.call_chain = chain.into_iter().map(str::to_string).collect();
        }
        self
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if !self.call_chain.is_empty() {
            write!(f, " (in {})", self.call_chain.join(" -> "))?;
        }
        Ok(())
    }
}

impl std::error::Error for RuntimeError {}

/// Result type for interpreter operations
pub type InterpResult<T> = Result<T, RuntimeError>;
