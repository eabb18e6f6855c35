//! Dry-run plan preview

use serde::Serialize;

use super::batch::ArtifactRef;
use super::report::ArtifactKind;
use crate::domain::value_objects::RemotePath;

/// Local state of one planned artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPreview {
    pub artifact: ArtifactRef,
    pub kind: ArtifactKind,
    pub remote_path: RemotePath,
    /// File size, or total bytes under a directory
    pub size_bytes: Option<u64>,
    /// Number of files under a directory
    pub file_count: Option<u64>,
}

impl ArtifactPreview {
    pub fn exists(&self) -> bool {
        self.kind != ArtifactKind::Missing
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchPreview {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub artifacts: Vec<ArtifactPreview>,
}

impl BatchPreview {
    /// Whether this batch would upload in full, judged from the local disk only
    pub fn ready(&self) -> bool {
        self.artifacts.iter().all(ArtifactPreview::exists)
    }
}

/// Everything a dry run reports. Produced without touching the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanPreview {
    pub target: String,
    pub host: String,
    pub remote_base: RemotePath,
    pub batches: Vec<BatchPreview>,
}

impl PlanPreview {
    pub fn missing_count(&self) -> usize {
        self.batches
            .iter()
            .flat_map(|b| b.artifacts.iter())
            .filter(|a| !a.exists())
            .count()
    }

    pub fn artifact_count(&self) -> usize {
        self.batches.iter().map(|b| b.artifacts.len()).sum()
    }
}
