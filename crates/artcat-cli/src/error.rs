//! CLI-specific error types and mappings.
//!
//! Handlers return `anyhow::Result`; a `CliError` somewhere in the chain
//! decides the process exit code.

use artcat_core::{CoreError, MediaError, RepositoryError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// The named artwork or image does not exist.
    #[error("{0}")]
    NotFound(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::NotFound(_) => 66, // EX_NOINPUT
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Database(_) => 73, // EX_CANTCREAT (closest fit)
        }
    }

    /// Exit code for an error that reached `main`.
    pub fn exit_code_of(err: &anyhow::Error) -> i32 {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<Self>())
            .map_or(1, Self::exit_code)
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(RepositoryError::NotFound(msg)) => {
                Self::NotFound(format!("Not found: {msg}"))
            }
            CoreError::Repository(RepositoryError::AlreadyExists(msg)) => {
                Self::Arguments(format!("Already exists: {msg}"))
            }
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Media(MediaError::InvalidImage(msg)) => Self::Arguments(msg),
            CoreError::Media(media_err) => Self::Io(media_err.to_string()),
            CoreError::Render(render_err) => Self::Core(render_err.to_string()),
            CoreError::Validation(msg) => Self::Arguments(msg),
            CoreError::Internal(msg) => Self::Core(msg),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_exit_codes() {
        let cases = [
            (CoreError::Repository(RepositoryError::NotFound("A0009".into())), 66),
            (CoreError::Repository(RepositoryError::Storage("locked".into())), 73),
            (CoreError::Validation("sort: unknown".into()), 2),
            (CoreError::Media(MediaError::Io("disk full".into())), 74),
            (CoreError::Internal("boom".into()), 1),
        ];
        for (err, code) in cases {
            assert_eq!(CliError::from(err).exit_code(), code);
        }
    }

    #[test]
    fn test_exit_code_found_through_context() {
        let err = anyhow::Error::new(CliError::NotFound("A0002".into())).context("show A0002");
        assert_eq!(CliError::exit_code_of(&err), 66);

        let plain = anyhow::anyhow!("something else");
        assert_eq!(CliError::exit_code_of(&plain), 1);
    }
}
