//! Statement executor, expression evaluator and call dispatcher

use super::env::{ActivationRecord, Scope};
use super::error::{InterpResult, RuntimeError};
use super::output::{lookup_builtin, OutputSink};
use super::value::{apply_binop, Value};
use crate::ast::{BinOp, Block, Expr, FunDecl, LValue, Program, Stmt, Type, UnOp, VarDecl};
use crate::config::InterpConfig;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Stack growth parameters for deep recursion
const STACK_RED_ZONE: usize = 64 * 1024; // 64KB remaining triggers growth
const STACK_GROW_SIZE: usize = 1024 * 1024; // Grow by 1MB each time

/// Name of the entry point
pub const ENTRY_POINT: &str = "main";

/// How a statement finished
#[derive(Debug)]
enum Flow {
    /// Fall through to the next statement
    Normal,
    /// A `return` ran; unwind to the enclosing call
    Return(Value),
}

/// The interpreter
pub struct Interpreter<'p, S: OutputSink> {
    /// User-defined functions
    functions: HashMap<&'p str, &'p FunDecl>,
    /// Global declarations, in program order
    global_decls: Vec<&'p VarDecl>,
    /// Global record, rebuilt for every run
    globals: Scope,
    /// Call stack; the last record is executing
    frames: Vec<ActivationRecord>,
    config: InterpConfig,
    sink: S,
}

impl<'p, S: OutputSink> Interpreter<'p, S> {
    /// Load a program: builds the function table and checks the globals.
    pub fn new(program: &'p Program, config: InterpConfig, sink: S) -> InterpResult<Self> {
        let mut functions = HashMap::new();
        for fun in program.functions() {
            if lookup_builtin(&fun.name).is_some() || functions.contains_key(fun.name.as_str()) {
                return Err(RuntimeError::duplicate_function(&fun.name));
            }
            functions.insert(fun.name.as_str(), fun);
        }

        let mut interp = Interpreter {
            functions,
            global_decls: program.globals().collect(),
            globals: Scope::new(),
            frames: Vec::new(),
            config,
            sink,
        };
        interp.reset()?;
        debug!(
            functions = interp.functions.len(),
            globals = interp.global_decls.len(),
            "program loaded"
        );
        Ok(interp)
    }

    /// Clear the call stack and zero-initialize the globals
    fn reset(&mut self) -> InterpResult<()> {
        self.frames.clear();
        self.globals = Scope::new();
        for decl in self.global_decls.clone() {
            self.declare(decl)?;
        }
        Ok(())
    }

    /// Run the program: call `main` with no arguments.
    ///
    /// Every run starts from fresh globals, so running the same program twice
    /// appends the same output twice.
    pub fn run(&mut self) -> InterpResult<Value> {
        self.reset()?;
        debug!("run started");
        let result = self.call(ENTRY_POINT, Vec::new());
        match &result {
            Ok(value) => debug!(%value, "run finished"),
            Err(err) => debug!(kind = %err.kind, chain = ?err.call_chain, "run faulted"),
        }
        result
    }

    /// Whether `name` resolves to a built-in or a declared function
    pub fn has_function(&self, name: &str) -> bool {
        lookup_builtin(name).is_some() || self.functions.contains_key(name)
    }

    /// Number of active calls
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Current value of a global, if declared
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    // ---- Call dispatcher ----

    /// Call a function by name. Faults carry the call chain active at the
    /// point of failure.
    pub fn call(&mut self, name: &str, args: Vec<Value>) -> InterpResult<Value> {
        self.dispatch(name, args)
            .map_err(|e| e.with_call_chain(self.frames.iter().map(ActivationRecord::function)))
    }

    fn dispatch(&mut self, name: &str, args: Vec<Value>) -> InterpResult<Value> {
        if let Some(builtin) = lookup_builtin(name) {
            if builtin.arity != args.len() {
                return Err(RuntimeError::arity_mismatch(name, builtin.arity, args.len()));
            }
            return (builtin.func)(&args, &mut self.sink);
        }

        let fun = *self
            .functions
            .get(name)
            .ok_or_else(|| RuntimeError::unknown_function(name))?;
        self.call_function(fun, args)
    }

    /// Call a user-defined function with automatic stack growth
    fn call_function(&mut self, fun: &'p FunDecl, args: Vec<Value>) -> InterpResult<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.call_function_inner(fun, args)
        })
    }

    fn call_function_inner(&mut self, fun: &'p FunDecl, args: Vec<Value>) -> InterpResult<Value> {
        if fun.params.len() != args.len() {
            return Err(RuntimeError::arity_mismatch(
                &fun.name,
                fun.params.len(),
                args.len(),
            ));
        }

        if self.frames.len() >= self.config.max_call_depth {
            return Err(RuntimeError::stack_overflow(self.config.max_call_depth));
        }

        let mut record = ActivationRecord::new(fun.name.as_str());
        for (param, arg) in fun.params.iter().zip(args) {
            check_arg(fun, param, &arg)?;
            record.declare(&param.name, arg)?;
        }

        self.frames.push(record);
        trace!(function = %fun.name, depth = self.frames.len(), "call");

        let result = self
            .exec_block(&fun.body)
            .map_err(|e| e.with_call_chain(self.frames.iter().map(ActivationRecord::function)));

        self.frames.pop();

        let value = match result? {
            Flow::Return(value) => value,
            Flow::Normal => Value::Void,
        };
        trace!(function = %fun.name, %value, "return");
        Ok(value)
    }

    // ---- Environment access ----

    /// Declare a zero-initialized variable in the innermost scope, or in the
    /// global record when no call is active.
    fn declare(&mut self, decl: &VarDecl) -> InterpResult<()> {
        let value = match decl.ty {
            Type::Int => Value::Int(0),
            Type::Array(len) if len > self.config.max_array_len => {
                return Err(RuntimeError::array_too_large(
                    &decl.name,
                    len,
                    self.config.max_array_len,
                ));
            }
            Type::Array(len) => Value::zeroed_array(len),
            other => {
                return Err(RuntimeError::type_mismatch(
                    "int or int[N]",
                    &other.to_string(),
                ));
            }
        };
        match self.frames.last_mut() {
            Some(frame) => frame.declare(&decl.name, value),
            None => self.globals.declare(&decl.name, value),
        }
    }

    fn lookup(&self, name: &str) -> InterpResult<&Value> {
        self.frames
            .last()
            .and_then(|frame| frame.get(name))
            .or_else(|| self.globals.get(name))
            .ok_or_else(|| RuntimeError::unbound_variable(name))
    }

    fn lookup_mut(&mut self, name: &str) -> InterpResult<&mut Value> {
        let in_frame = self
            .frames
            .last()
            .is_some_and(|frame| frame.get(name).is_some());
        let slot = if in_frame {
            self.frames.last_mut().and_then(|frame| frame.get_mut(name))
        } else {
            self.globals.get_mut(name)
        };
        slot.ok_or_else(|| RuntimeError::unbound_variable(name))
    }

    // ---- Statement executor ----

    /// Declarations then statements, in the current scope
    fn exec_block(&mut self, block: &Block) -> InterpResult<Flow> {
        for decl in &block.decls {
            self.declare(decl)?;
        }
        for stmt in &block.stmts {
            if let Flow::Return(value) = self.exec_stmt(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// A block statement opens a new scope
    fn exec_nested_block(&mut self, block: &Block) -> InterpResult<Flow> {
        if let Some(frame) = self.frames.last_mut() {
            frame.push_scope();
        }
        let flow = self.exec_block(block);
        if let Some(frame) = self.frames.last_mut() {
            frame.pop_scope();
        }
        flow
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> InterpResult<Flow> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.exec_stmt_inner(stmt))
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt) -> InterpResult<Flow> {
        match stmt {
            Stmt::Block(block) => self.exec_nested_block(block),

            Stmt::Assign { target, value } => {
                let value = self.eval_int(value)?;
                match target {
                    LValue::Var(name) => match self.lookup_mut(name)? {
                        Value::Int(slot) => *slot = value,
                        other => {
                            return Err(RuntimeError::type_mismatch("int", other.type_name()));
                        }
                    },
                    LValue::Index { array, index } => {
                        let index = self.eval_int(index)?;
                        self.lookup_mut(array)?.set(index, value)?;
                    }
                }
                Ok(Flow::Normal)
            }

            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_int(cond)? != 0 {
                    self.exec_stmt(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { cond, body } => {
                while self.eval_int(cond)? != 0 {
                    if let Flow::Return(value) = self.exec_stmt(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }

            Stmt::Expr(expr) => {
                self.eval_value(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Return(None) => Ok(Flow::Return(Value::Void)),
            Stmt::Return(Some(expr)) => Ok(Flow::Return(self.eval_value(expr)?)),
        }
    }

    // ---- Expression evaluator ----

    /// Evaluate an expression whose value may be `void` (a call in statement
    /// or return position)
    fn eval_value(&mut self, expr: &Expr) -> InterpResult<Value> {
        match expr {
            Expr::Call { func, args } => self.eval_call(func, args),
            other => Ok(Value::Int(self.eval_int(other)?)),
        }
    }

    /// Evaluate an expression to an int, with automatic stack growth
    fn eval_int(&mut self, expr: &Expr) -> InterpResult<i32> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_int_inner(expr))
    }

    fn eval_int_inner(&mut self, expr: &Expr) -> InterpResult<i32> {
        match expr {
            Expr::IntLit(n) => Ok(*n),

            Expr::Var(name) => self.lookup(name)?.expect_int(),

            Expr::Index { array, index } => {
                let index = self.eval_int(index)?;
                self.lookup(array)?.get(index)
            }

            Expr::Binary { left, op, right } => {
                let lhs = self.eval_int(left)?;
                // && and || skip the right operand once the result is known
                match op {
                    BinOp::And if lhs == 0 => return Ok(0),
                    BinOp::Or if lhs != 0 => return Ok(1),
                    _ => {}
                }
                let rhs = self.eval_int(right)?;
                apply_binop(*op, lhs, rhs)
            }

            Expr::Unary { op, expr } => {
                let v = self.eval_int(expr)?;
                match op {
                    UnOp::Neg => Ok(v.wrapping_neg()),
                }
            }

            Expr::Call { func, args } => self.eval_call(func, args)?.expect_int(),
        }
    }

    fn eval_call(&mut self, func: &str, args: &[Expr]) -> InterpResult<Value> {
        if !self.has_function(func) {
            return Err(RuntimeError::unknown_function(func));
        }
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_arg(arg)?);
        }
        self.call(func, values)
    }

    /// Arguments are ints, except a bare array name, which passes a copy of
    /// the array.
    fn eval_arg(&mut self, arg: &Expr) -> InterpResult<Value> {
        if let Expr::Var(name) = arg {
            if let Value::Array(elems) = self.lookup(name)? {
                return Ok(Value::Array(elems.clone()));
            }
        }
        Ok(Value::Int(self.eval_int(arg)?))
    }
}

/// Check an argument against its parameter's type tag. Array parameters
/// accept arrays of any length.
fn check_arg(fun: &FunDecl, param: &VarDecl, arg: &Value) -> InterpResult<()> {
    let ok = match arg {
        Value::Int(_) => param.ty == Type::Int,
        Value::Array(_) => param.ty.is_array(),
        Value::Void => false,
    };
    if ok {
        Ok(())
    } else {
        trace!(function = %fun.name, param = %param.name, "argument type mismatch");
        Err(RuntimeError::type_mismatch(
            &param.ty.to_string(),
            arg.type_name(),
        ))
    }
}
