//! Error types shared by the store, identity and board layers.

use std::io;
use thiserror::Error;

/// Failure reported by the persistence or identity collaborator.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt task data: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("task not found: {0}")]
    NotFound(String),

    #[error("not signed in")]
    Unauthenticated,

    #[error("identity error: {0}")]
    Identity(String),
}

/// Top-level TaskFlow error.
#[derive(Debug, Error)]
pub enum TaskflowError {
    /// Input rejected before it reached the store (empty title, bad date)
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, TaskflowError>;

impl TaskflowError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskflowError::validation("Task title cannot be empty");
        assert_eq!(err.to_string(), "Validation error: Task title cannot be empty");

        let err = TaskflowError::from(RemoteError::NotFound("42".to_string()));
        assert_eq!(err.to_string(), "Remote error: task not found: 42");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let remote: RemoteError = io_err.into();
        assert!(matches!(remote, RemoteError::Io(_)));

        let err: TaskflowError = remote.into();
        assert!(matches!(err, TaskflowError::Remote(RemoteError::Io(_))));
        assert!(!err.is_validation());
    }
}
