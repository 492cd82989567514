//! Interpreter configuration
//!
//! Defaults suit the fixture programs. A TOML file can override them:
//!
//! ```toml
//! max_call_depth = 256
//! max_array_len = 65536
//! ```

use crate::error::{MinicError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default limit on simultaneously active calls, `main` included
pub const DEFAULT_MAX_CALL_DEPTH: usize = 4096;

/// Default limit on the element count of one declared array
pub const DEFAULT_MAX_ARRAY_LEN: usize = 1 << 20;

/// Interpreter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpConfig {
    /// Maximum number of activation records on the call stack
    pub max_call_depth: usize,
    /// Largest array a declaration may allocate, in elements
    pub max_array_len: usize,
}

impl Default for InterpConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
        }
    }
}

impl InterpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum call depth
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Set the largest declarable array length
    pub fn max_array_len(mut self, len: usize) -> Self {
        self.max_array_len = len;
        self
    }

    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: InterpConfig = toml::from_str(text)?;
        config.validate()
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| MinicError::io(path, e))?;
        Self::from_toml(&text)
    }

    /// Reject limits no program can run under
    pub fn validate(self) -> Result<Self> {
        if self.max_call_depth == 0 {
            return Err(MinicError::invalid_config(
                "max_call_depth must be at least 1",
            ));
        }
        Ok(self)
    }
}
