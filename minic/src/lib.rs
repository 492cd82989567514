//! minic interpreter library
//!
//! Executes minic programs handed over as abstract syntax trees: recursive
//! functions, integer arrays and the `print_i` built-in.

pub mod ast;
pub mod config;
pub mod error;
pub mod interp;

pub use config::InterpConfig;
pub use error::{MinicError, Result};
pub use interp::{run_program, Execution, Interpreter};
