//! Local file system port
//!
//! The only local I/O the orchestrator performs: probing artifacts under the
//! project root before and during transfer.

use std::path::{Path, PathBuf};

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error
    Io(std::io::Error),
    /// Other error
    Other(String),
}

impl FsError {
    /// Attach the path that caused an I/O error.
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(PathBuf::new()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(PathBuf::new()),
            _ => FsError::Io(err),
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io(err) => write!(f, "I/O error: {}", err),
            FsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FsError {}

/// Totals for a directory tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirStats {
    pub files: u64,
    pub bytes: u64,
}

/// Abstract local file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O
/// - in-memory fakes in tests
pub trait LocalFileSystem {
    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if the path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Size of a regular file in bytes
    fn file_size(&self, path: &Path) -> FsResult<u64>;

    /// SHA-256 of a file as lowercase hex
    fn sha256(&self, path: &Path) -> FsResult<String>;

    /// Count files and bytes under a directory
    fn dir_stats(&self, path: &Path) -> FsResult<DirStats>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_error_at_keeps_path_for_not_found() {
        let err = FsError::at(
            Path::new("test_env.tar.gz"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "File not found: test_env.tar.gz");
    }

    #[test]
    fn fs_error_from_io_other() {
        let err: FsError = std::io::Error::other("disk on fire").into();
        assert!(matches!(err, FsError::Io(_)));
    }
}
