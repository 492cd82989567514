//! Activation records and variable scopes
//!
//! Each call gets an [`ActivationRecord`] holding a stack of block scopes.
//! Index 0 holds the parameters together with the outermost declarations of
//! the function body; every nested block pushes a scope that may shadow
//! outer names and is dropped when the block ends. Names not found in the
//! record fall back to the program's global [`Scope`].

use super::error::{InterpResult, RuntimeError};
use super::Value;
use std::collections::HashMap;

/// One lexical scope: name -> slot
#[derive(Debug, Clone, Default)]
pub struct Scope {
    bindings: HashMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding; the name must not already be bound in this scope
    pub fn declare(&mut self, name: &str, value: Value) -> InterpResult<()> {
        if self.bindings.contains_key(name) {
            return Err(RuntimeError::duplicate_binding(name));
        }
        self.bindings.insert(name.to_string(), value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.bindings.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }
}

/// Runtime storage for one in-progress call
#[derive(Debug)]
pub struct ActivationRecord {
    function: String,
    /// Innermost scope last
    scopes: Vec<Scope>,
}

impl ActivationRecord {
    pub fn new(function: impl Into<String>) -> Self {
        ActivationRecord {
            function: function.into(),
            scopes: vec![Scope::new()],
        }
    }

    /// Name of the function this record belongs to
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Drop the innermost block scope. The function scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Declare a name in the innermost scope
    pub fn declare(&mut self, name: &str, value: Value) -> InterpResult<()> {
        match self.scopes.last_mut() {
            Some(scope) => scope.declare(name, value),
            None => Err(RuntimeError::unbound_variable(name)),
        }
    }

    /// Look up a name, innermost scope first
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.scopes
            .iter_mut()
            .rev()
            .find(|scope| scope.contains(name))
            .and_then(|scope| scope.get_mut(name))
    }
}
