//! Deployment report entities
//!
//! `BatchResult` keeps the batch contract in one place: `uploaded` is derived
//! from the per-artifact outcomes, and `verified` can only become true for a
//! batch that was uploaded.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::batch::ArtifactRef;
use super::health::HealthCheckResult;
use crate::domain::value_objects::RemotePath;

/// What an artifact turned out to be on the local disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    File,
    Directory,
    Missing,
}

/// Result of transferring one artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferOutcome {
    pub artifact: ArtifactRef,
    pub kind: ArtifactKind,
    pub transferred: bool,
    pub elapsed_secs: f64,
    /// Only recorded for files
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransferOutcome {
    pub fn succeeded(
        artifact: ArtifactRef,
        kind: ArtifactKind,
        elapsed_secs: f64,
        size_bytes: Option<u64>,
    ) -> Self {
        Self {
            artifact,
            kind,
            transferred: true,
            elapsed_secs,
            size_bytes,
            error: None,
        }
    }

    pub fn failed(
        artifact: ArtifactRef,
        kind: ArtifactKind,
        elapsed_secs: f64,
        error: impl Into<String>,
    ) -> Self {
        Self {
            artifact,
            kind,
            transferred: false,
            elapsed_secs,
            size_bytes: None,
            error: Some(error.into()),
        }
    }
}

/// Result of confirming one artifact on the remote host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactVerification {
    pub artifact: ArtifactRef,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Outcome of one batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub uploaded: bool,
    pub verified: bool,
    pub transfer_outcomes: Vec<TransferOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub verifications: Vec<ArtifactVerification>,
}

impl BatchResult {
    /// Build from one outcome per declared artifact.
    pub fn from_outcomes(transfer_outcomes: Vec<TransferOutcome>) -> Self {
        let uploaded = transfer_outcomes.iter().all(|o| o.transferred);
        Self {
            uploaded,
            verified: false,
            transfer_outcomes,
            verifications: Vec::new(),
        }
    }

    /// Record verification results. Ignored for batches that were not uploaded.
    pub fn record_verification(&mut self, verifications: Vec<ArtifactVerification>) {
        if !self.uploaded {
            return;
        }
        self.verified = verifications.len() == self.transfer_outcomes.len()
            && verifications.iter().all(|v| v.verified);
        self.verifications = verifications;
    }

    pub fn transferred_count(&self) -> usize {
        self.transfer_outcomes.iter().filter(|o| o.transferred).count()
    }

    pub fn is_success(&self) -> bool {
        self.uploaded && self.verified
    }
}

/// Which batches a run covered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunMode {
    /// Every batch in plan order, then health checks
    Full,
    /// One named batch, no health checks
    SingleBatch { batch: String },
}

/// A batch result together with the batch identity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub name: String,
    pub display_name: String,
    #[serde(flatten)]
    pub result: BatchResult,
}

/// Auditable record of a whole run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentReport {
    pub target: String,
    pub host: String,
    pub remote_base: RemotePath,
    pub mode: RunMode,
    /// In plan order
    pub batches: Vec<BatchReport>,
    pub health_checks: Vec<HealthCheckResult>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl DeploymentReport {
    /// True iff every batch was uploaded and verified. Health checks do not count.
    pub fn overall_success(&self) -> bool {
        self.batches.iter().all(|b| b.result.is_success())
    }

    pub fn get(&self, batch: &str) -> Option<&BatchResult> {
        self.batches
            .iter()
            .find(|b| b.name == batch)
            .map(|b| &b.result)
    }

    pub fn successful_batches(&self) -> usize {
        self.batches.iter().filter(|b| b.result.is_success()).count()
    }

    /// Process exit code for this report
    pub fn exit_code(&self) -> i32 {
        if self.overall_success() {
            0
        } else {
            1
        }
    }
}
