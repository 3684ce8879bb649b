use thiserror::Error;

/// Unified error type for gen-changelog operations
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Git repository error: {0}")]
    Git(#[from] git2::Error),

    #[error("Git command failed: {0}")]
    Process(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gen-changelog
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a subprocess error with context
    pub fn process(msg: impl Into<String>) -> Self {
        ChangelogError::Process(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChangelogError::config("bad prefix");
        assert_eq!(err.to_string(), "Configuration error: bad prefix");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "git not found");
        let err: ChangelogError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert!(err.to_string().contains("git not found"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ChangelogError::process("x"), "Git command failed"),
            (ChangelogError::config("x"), "Configuration error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_process_error_keeps_multiline_stderr() {
        let err = ChangelogError::process("git log exited with 128\nfatal: bad revision");
        assert!(err.to_string().contains("fatal: bad revision"));
    }
}
