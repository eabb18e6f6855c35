//! Error types for batchship
//!
//! Uses `thiserror` for library errors. Only configuration and connection
//! errors ever abort a run; the rest are recorded per item.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for batchship operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for deployment operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// Unknown target/batch name or invalid configuration value
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The remote host rejected our credentials (or host key)
    #[error("authentication to {host} failed: {message}")]
    Authentication { host: String, message: String },

    /// The remote host could not be reached
    #[error("cannot reach {host}: {message}")]
    Unreachable { host: String, message: String },

    /// Artifact does not exist under the project root
    #[error("artifact not found locally: {}", path.display())]
    ArtifactMissing { path: PathBuf },

    /// Copying an artifact to the remote host failed
    #[error("transfer of {artifact} failed: {message}")]
    Transfer { artifact: String, message: String },

    /// A remote command exited non-zero or could not be started
    #[error("remote command `{command}` failed: {message}")]
    RemoteCommand { command: String, message: String },

    /// An operation did not finish within its deadline
    #[error("{operation} timed out after {secs}s")]
    Timeout { operation: String, secs: u64 },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {}: {message}", file.display())]
    ConfigParse { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeployError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error aborts the whole run.
    ///
    /// Timeouts are fatal only while connecting; the connect path reports
    /// them directly, so any timeout observed by a caller here is per-item.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. }
                | Self::ConfigParse { .. }
                | Self::Authentication { .. }
                | Self::Unreachable { .. }
        )
    }
}
