//! batchship - ordered batch deployment over SSH
//!
//! batchship uploads a project to a remote host in named, ordered batches,
//! verifies every batch on the remote side, runs post-deployment health
//! checks and produces an auditable report.
//!
//! ## Layers
//!
//! - `domain` - Targets, batches, reports and the ports to the outside world
//! - `application` - Session, transfer, verification, health checks, orchestration
//! - `infrastructure` - OpenSSH channel, local file system, NDJSON events
//! - `config` - `batchship.toml`, environment overrides, validation
//! - `presentation` - CLI definition and dependency wiring

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{Orchestrator, RunRequest, RunState};
pub use config::{load_with_warnings, DeployConfig};
pub use domain::entities::{BatchPlan, BatchResult, DeploymentReport, PlanPreview, TargetDescriptor};
pub use error::{DeployError, DeployResult};
