//! Deploy Event Port
//!
//! Provides an observable interface for deploy operations.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;

use crate::domain::entities::{
    ArtifactRef, ArtifactVerification, BatchResult, HealthCheckResult, TransferOutcome,
};

/// Event emitted during deploy operations
#[derive(Debug, Clone)]
pub enum DeployEvent {
    /// Opening the remote session
    Connecting {
        target: String,
        endpoint: String,
        auth: &'static str,
    },

    /// Remote session established
    Connected { target: String },

    /// A batch is about to be transferred (`index` is 0-based)
    BatchStarted {
        index: usize,
        total: usize,
        name: String,
        display_name: String,
        description: String,
        artifact_count: usize,
    },

    /// Artifact is absent under the project root and will not be transferred
    ArtifactMissing {
        artifact: ArtifactRef,
        local_path: PathBuf,
    },

    /// Transfer of one artifact finished (successfully or not)
    ArtifactTransferred { outcome: TransferOutcome },

    /// All artifacts of a batch were attempted
    UploadFinished {
        name: String,
        transferred: usize,
        total: usize,
    },

    /// One artifact was checked on the remote host
    ArtifactVerified { verification: ArtifactVerification },

    /// Batch fully processed
    BatchFinished {
        index: usize,
        name: String,
        display_name: String,
        result: BatchResult,
    },

    /// Health checks about to run
    HealthChecksStarted { count: usize },

    /// One health check finished
    HealthCheckFinished { result: HealthCheckResult },

    /// Remote session released
    Disconnected { target: String },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants detailed events (e.g., per-artifact)
    ///
    /// Some sinks (like CI) may only want summary events.
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {
        // Do nothing
    }

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
