//! Error types for loading and running programs

use crate::interp::RuntimeError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, MinicError>;

/// Top-level error
#[derive(Debug, Error)]
pub enum MinicError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The program AST could not be deserialized
    #[error("invalid program: {0}")]
    Load(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("{0}")]
    Runtime(#[from] RuntimeError),
}

impl MinicError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// The runtime error, if the failure happened while executing
    pub fn as_runtime(&self) -> Option<&RuntimeError> {
        match self {
            Self::Runtime(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::ErrorKind;

    #[test]
    fn test_runtime_conversion() {
        let err: MinicError = RuntimeError::division_by_zero().into();
        assert_eq!(err.as_runtime().unwrap().kind, ErrorKind::ArithmeticError);
        assert_eq!(err.to_string(), "ArithmeticError: division by zero");
    }

    #[test]
    fn test_load_error() {
        let err: MinicError = serde_json::from_str::<crate::ast::Program>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("invalid program"));
        assert!(err.as_runtime().is_none());
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = MinicError::io(
            Path::new("prog.json"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("prog.json"));
    }
}
