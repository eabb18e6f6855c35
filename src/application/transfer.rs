//! Transfer Executor
//!
//! Uploads the artifacts of one batch in declared order. A failure only
//! marks its own artifact; the loop always runs to the end of the batch.

use std::path::Path;
use std::time::Instant;

use crate::domain::entities::{ArtifactKind, BatchPlan, BatchResult, TransferOutcome};
use crate::domain::ports::{DeployEvent, DeployEventSink, LocalFileSystem};
use crate::domain::value_objects::RemotePath;
use crate::error::DeployError;

use super::session::ConnectionSession;

pub struct TransferExecutor<'a, F: LocalFileSystem + ?Sized> {
    fs: &'a F,
    project_root: &'a Path,
    remote_base: &'a RemotePath,
    events: &'a dyn DeployEventSink,
}

impl<'a, F: LocalFileSystem + ?Sized> TransferExecutor<'a, F> {
    pub fn new(
        fs: &'a F,
        project_root: &'a Path,
        remote_base: &'a RemotePath,
        events: &'a dyn DeployEventSink,
    ) -> Self {
        Self {
            fs,
            project_root,
            remote_base,
            events,
        }
    }

    /// Transfer every artifact of `batch`. `uploaded` is true only when all
    /// of them made it.
    pub fn upload(&self, session: &mut ConnectionSession, batch: &BatchPlan) -> BatchResult {
        let mut outcomes = Vec::with_capacity(batch.artifacts.len());

        for artifact in &batch.artifacts {
            let local = artifact.local_path(self.project_root);

            if !self.fs.exists(&local) {
                let err = DeployError::ArtifactMissing {
                    path: local.clone(),
                };
                tracing::warn!(batch = %batch.name, artifact = %artifact, "{}", err);
                self.events.on_event(DeployEvent::ArtifactMissing {
                    artifact: artifact.clone(),
                    local_path: local,
                });
                outcomes.push(TransferOutcome::failed(
                    artifact.clone(),
                    ArtifactKind::Missing,
                    0.0,
                    err.to_string(),
                ));
                continue;
            }

            let kind = if self.fs.is_dir(&local) {
                ArtifactKind::Directory
            } else {
                ArtifactKind::File
            };
            let remote = artifact.remote_path(self.remote_base);
            let started = Instant::now();

            let result = self.transfer_one(session, &local, &remote, kind);
            let elapsed = started.elapsed().as_secs_f64();

            let outcome = match result {
                Ok(()) => {
                    let size = match kind {
                        ArtifactKind::File => self.fs.file_size(&local).ok(),
                        _ => None,
                    };
                    tracing::info!(
                        artifact = %artifact,
                        elapsed_secs = elapsed,
                        size_bytes = size,
                        "artifact transferred"
                    );
                    TransferOutcome::succeeded(artifact.clone(), kind, elapsed, size)
                }
                Err(e) => {
                    tracing::warn!(artifact = %artifact, error = %e, "transfer failed");
                    TransferOutcome::failed(artifact.clone(), kind, elapsed, e.to_string())
                }
            };

            if self.events.wants_detailed_events() || !outcome.transferred {
                self.events.on_event(DeployEvent::ArtifactTransferred {
                    outcome: outcome.clone(),
                });
            }
            outcomes.push(outcome);
        }

        let result = BatchResult::from_outcomes(outcomes);
        self.events.on_event(DeployEvent::UploadFinished {
            name: batch.name.clone(),
            transferred: result.transferred_count(),
            total: batch.artifacts.len(),
        });
        result
    }

    fn transfer_one(
        &self,
        session: &mut ConnectionSession,
        local: &Path,
        remote: &RemotePath,
        kind: ArtifactKind,
    ) -> Result<(), DeployError> {
        if let Some(parent) = remote.parent() {
            session.ensure_remote_dir(&parent)?;
        }
        match kind {
            ArtifactKind::Directory => session.transfer_directory(local, remote),
            _ => session.transfer_file(local, remote),
        }
    }
}
