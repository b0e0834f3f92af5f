use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during kinoteka core operations.
#[derive(Debug, Error)]
pub enum KinotekaError {
    /// Nothing usable as a title is left once a name is cleaned.
    #[error("no title left after cleaning")]
    EmptyInput,

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// The user quit during interactive candidate selection.
    #[error("operation cancelled by user")]
    Aborted,

    /// Moving a file or preparing its destination failed.
    #[error("failed to relocate {path:?}: {source}")]
    Relocation {
        /// The path that could not be written or removed.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The catalog lookup service could not answer.
    #[error("catalog unavailable: {0}")]
    Catalog(String),

    /// A configuration value is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl KinotekaError {
    /// Returns `true` for the only error that terminates a whole run.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

/// Result type alias for kinoteka operations.
pub type Result<T> = std::result::Result<T, KinotekaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = KinotekaError::EmptyInput;
        assert_eq!(err.to_string(), "no title left after cleaning");

        let err = KinotekaError::Relocation {
            path: PathBuf::from("/data/films/x.mkv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/data/films/x.mkv"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn only_abort_is_fatal() {
        assert!(KinotekaError::Aborted.is_fatal());
        assert!(!KinotekaError::Catalog("timeout".into()).is_fatal());
        assert!(!KinotekaError::EmptyInput.is_fatal());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KinotekaError>();
    }
}
