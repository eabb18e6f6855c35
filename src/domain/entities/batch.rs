//! Batch plan entity
//!
//! A batch is the unit of reporting: its artifacts are transferred and
//! verified together, and the batch only counts as uploaded when every one
//! of them made it.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::domain::value_objects::RemotePath;
use crate::error::{DeployError, DeployResult};

/// A project-root-relative file or directory, transferred as one unit.
///
/// Stored normalized with `/` separators so the same value names both the
/// local path (under the project root) and the remote one (under the remote
/// base path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ArtifactRef(String);

impl ArtifactRef {
    /// Validate and normalize an artifact path from configuration.
    pub fn parse(raw: &str) -> DeployResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DeployError::configuration("artifact path is empty"));
        }
        if Path::new(trimmed).is_absolute() || trimmed.starts_with('/') {
            return Err(DeployError::configuration(format!(
                "artifact '{}' must be relative to the project root",
                trimmed
            )));
        }

        let mut segments = Vec::new();
        for component in Path::new(trimmed).components() {
            match component {
                Component::Normal(seg) => segments.push(seg.to_string_lossy().to_string()),
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(DeployError::configuration(format!(
                        "artifact '{}' escapes the project root",
                        trimmed
                    )));
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(DeployError::configuration(format!(
                        "artifact '{}' must be relative to the project root",
                        trimmed
                    )));
                }
            }
        }

        if segments.is_empty() {
            return Err(DeployError::configuration(format!(
                "artifact '{}' does not name a file or directory",
                trimmed
            )));
        }

        Ok(Self(segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Location on the local disk.
    pub fn local_path(&self, project_root: &Path) -> PathBuf {
        self.0
            .split('/')
            .fold(project_root.to_path_buf(), |acc, seg| acc.join(seg))
    }

    /// Location on the remote host.
    pub fn remote_path(&self, remote_base: &RemotePath) -> RemotePath {
        remote_base.join(&self.0)
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, ordered collection of artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub artifacts: Vec<ArtifactRef>,
}

impl BatchPlan {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        artifacts: Vec<ArtifactRef>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            description: description.into(),
            artifacts,
        }
    }
}
