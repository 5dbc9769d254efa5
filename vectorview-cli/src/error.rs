//! CLI error type and exit codes.

use thiserror::Error;

/// Errors a CLI command can end with.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file problem
    #[error("Configuration error: {0}")]
    Config(#[from] vectorview::config::ConfigFileError),

    /// Archive could not be opened or read
    #[error("Archive error: {0}")]
    Archive(#[from] vectorview::archive::ArchiveError),

    /// Local file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output serialization failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Bad command-line input
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}
