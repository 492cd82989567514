//! Tree-walking interpreter for minic programs
//!
//! The call dispatcher pushes one [`ActivationRecord`](env::ActivationRecord)
//! per call onto an explicit stack whose depth is bounded by
//! [`InterpConfig::max_call_depth`]. The statement executor walks function
//! bodies, the expression evaluator reduces expressions to `int`s, and
//! `print_i` appends to an [`OutputSink`].

mod env;
mod error;
mod eval;
mod output;
mod value;

pub use env::{ActivationRecord, Scope};
pub use error::{ErrorKind, InterpResult, RuntimeError};
pub use eval::{Interpreter, ENTRY_POINT};
pub use output::{lookup_builtin, Builtin, BuiltinFn, BufferSink, OutputSink, WriterSink, BUILTINS};
pub use value::{apply_binop, Value};

use crate::ast::Program;
use crate::config::InterpConfig;

/// Outcome of a complete run
#[derive(Debug)]
pub struct Execution {
    /// Everything `print_i` wrote, including output produced before a fault
    pub output: String,
    /// What `main` returned, or the fault that stopped the run
    pub result: InterpResult<Value>,
}

impl Execution {
    pub fn lines(&self) -> Vec<&str> {
        self.output.lines().collect()
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Kind of the fault that stopped the run, if any
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.result.as_ref().err().map(|e| e.kind)
    }
}

/// Load and run a program into an in-memory buffer
pub fn run_program(program: &Program, config: InterpConfig) -> Execution {
    let mut interp = match Interpreter::new(program, config, BufferSink::new()) {
        Ok(interp) => interp,
        Err(err) => {
            return Execution {
                output: String::new(),
                result: Err(err),
            };
        }
    };
    let result = interp.run();
    Execution {
        output: interp.into_sink().into_string(),
        result,
    }
}
