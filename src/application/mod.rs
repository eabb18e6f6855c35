//! Application Layer
//!
//! Use cases that orchestrate the deployment flow.
//! This layer:
//! - Depends on the Domain layer (entities, ports)
//! - Does NOT know how bytes reach the remote host (that is Infrastructure)
//! - Turns per-item failures into report entries instead of errors
//!
//! ## Components
//!
//! - `ConnectionSession` - Scoped owner of the remote session
//! - `TransferExecutor` - Uploads one batch
//! - `RemoteVerifier` - Confirms an uploaded batch on the remote host
//! - `HealthChecker` - Post-deployment diagnostics
//! - `Orchestrator` - The whole run, plus the dry-run preview

pub mod health;
pub mod orchestrator;
pub mod session;
pub mod transfer;
pub mod verify;

pub use health::HealthChecker;
pub use orchestrator::{Orchestrator, RunRequest, RunState};
pub use session::ConnectionSession;
pub use transfer::TransferExecutor;
pub use verify::RemoteVerifier;
