//! Local File System Implementation
//!
//! Implements the `LocalFileSystem` port for local disk operations.

use std::fs::File;
use std::io;
use std::path::Path;

use ignore::WalkBuilder;
use sha2::{Digest, Sha256};

use crate::domain::ports::file_system::{DirStats, FsError, FsResult, LocalFileSystem};

/// Local file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl LocalFileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn file_size(&self, path: &Path) -> FsResult<u64> {
        std::fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| FsError::at(path, e))
    }

    fn sha256(&self, path: &Path) -> FsResult<String> {
        let mut file = File::open(path).map_err(|e| FsError::at(path, e))?;
        let mut hasher = Sha256::new();
        io::copy(&mut file, &mut hasher).map_err(|e| FsError::at(path, e))?;
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Every regular file counts, including hidden and ignored ones: scp
    /// copies them all.
    fn dir_stats(&self, path: &Path) -> FsResult<DirStats> {
        if !path.is_dir() {
            return Err(FsError::Other(format!(
                "Not a directory: {}",
                path.display()
            )));
        }

        let mut stats = DirStats::default();
        for entry in WalkBuilder::new(path).standard_filters(false).build() {
            let entry = entry.map_err(|e| FsError::Other(e.to_string()))?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let metadata = entry
                .metadata()
                .map_err(|e| FsError::Other(e.to_string()))?;
            stats.files += 1;
            stats.bytes += metadata.len();
        }
        Ok(stats)
    }
}
