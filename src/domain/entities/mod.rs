//! Domain Entities
//!
//! - `TargetDescriptor` - A remote host and how to authenticate to it
//! - `BatchPlan` - A named, ordered group of artifacts
//! - `BatchResult` / `DeploymentReport` - What happened during a run
//! - `PlanPreview` - What a dry run found on the local disk

mod batch;
mod health;
mod preview;
mod report;
mod target;

pub use batch::{ArtifactRef, BatchPlan};
pub use health::{default_health_checks, HealthCheck, HealthCheckResult};
pub use preview::{ArtifactPreview, BatchPreview, PlanPreview};
pub use report::{
    ArtifactKind, ArtifactVerification, BatchReport, BatchResult, DeploymentReport, RunMode,
    TransferOutcome,
};
pub use target::{Credential, TargetDescriptor};
