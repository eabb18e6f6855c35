//! Orchestrator
//!
//! Runs the deployment flow:
//! 1. Resolve target and batch selection (fails before any network I/O)
//! 2. Open the connection session
//! 3. For each batch: transfer, then verify if uploaded
//! 4. Health checks (full runs only)
//! 5. Build the report and close the session
//!
//! The session is owned by the `run` call frame, so it is closed on every
//! exit path, including a panic inside a transport call.

use std::sync::Arc;

use chrono::Utc;

use crate::application::health::HealthChecker;
use crate::application::session::ConnectionSession;
use crate::application::transfer::TransferExecutor;
use crate::application::verify::RemoteVerifier;
use crate::config::DeployConfig;
use crate::domain::entities::{
    ArtifactKind, ArtifactPreview, BatchPreview, BatchReport, DeploymentReport, PlanPreview,
    RunMode,
};
use crate::domain::ports::{
    DeployEvent, DeployEventSink, LocalFileSystem, NoopEventSink, RemoteChannel,
};
use crate::error::{DeployError, DeployResult};

use super::options::{RunRequest, RunState};

/// Deployment orchestrator, parameterized by its ports
pub struct Orchestrator<C, F>
where
    C: RemoteChannel,
    F: LocalFileSystem,
{
    config: DeployConfig,
    channel: C,
    fs: F,
    events: Arc<dyn DeployEventSink>,
    state: RunState,
}

impl<C, F> Orchestrator<C, F>
where
    C: RemoteChannel,
    F: LocalFileSystem,
{
    pub fn new(config: DeployConfig, channel: C, fs: F) -> Self {
        Self {
            config,
            channel,
            fs,
            events: Arc::new(NoopEventSink),
            state: RunState::Idle,
        }
    }

    /// Report progress through `events`
    pub fn with_events(mut self, events: Arc<dyn DeployEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    /// Deploy. Only configuration and connection failures are returned as
    /// `Err`; everything after a successful connect ends up in the report.
    pub fn run(&mut self, request: &RunRequest) -> DeployResult<DeploymentReport> {
        self.state = RunState::Idle;
        let started_at = Utc::now();

        let target = self.config.resolve_target(request.target.as_deref())?;
        let batches = self.config.select_batches(request.batch.as_deref())?;
        let mode = match &request.batch {
            Some(name) => RunMode::SingleBatch {
                batch: name.clone(),
            },
            None => RunMode::Full,
        };

        let events = &*self.events;
        events.on_event(DeployEvent::Connecting {
            target: target.name.clone(),
            endpoint: target.endpoint(),
            auth: target.credential.kind(),
        });
        let mut session = ConnectionSession::open(&self.channel, &target)?;
        self.state = RunState::Connected;
        events.on_event(DeployEvent::Connected {
            target: target.name.clone(),
        });

        // scp expands `~` itself but quoted shell arguments do not, so every
        // remote path is made absolute up front.
        let remote_base = session
            .resolve_home(&self.config.remote_base)
            .map_err(|e| {
                DeployError::configuration(format!(
                    "project.remote_base '{}' cannot be resolved on {}: {}",
                    self.config.remote_base, target.hostname, e
                ))
            })?;

        let executor = TransferExecutor::new(
            &self.fs,
            &self.config.project_root,
            &remote_base,
            events,
        );
        let verifier = RemoteVerifier::new(
            &self.fs,
            &self.config.project_root,
            &remote_base,
            self.config.verification,
            events,
        );

        let total = batches.len();
        let mut reports = Vec::with_capacity(total);
        for (index, batch) in batches.iter().enumerate() {
            self.state = RunState::RunningBatch { index };
            tracing::info!(
                batch = %batch.name,
                position = index + 1,
                total,
                "batch started"
            );
            events.on_event(DeployEvent::BatchStarted {
                index,
                total,
                name: batch.name.clone(),
                display_name: batch.display_name.clone(),
                description: batch.description.clone(),
                artifact_count: batch.artifacts.len(),
            });

            let mut result = executor.upload(&mut session, batch);
            verifier.verify(&mut session, batch, &mut result);

            tracing::info!(
                batch = %batch.name,
                uploaded = result.uploaded,
                verified = result.verified,
                "batch finished"
            );
            events.on_event(DeployEvent::BatchFinished {
                index,
                name: batch.name.clone(),
                display_name: batch.display_name.clone(),
                result: result.clone(),
            });
            reports.push(BatchReport {
                name: batch.name.clone(),
                display_name: batch.display_name.clone(),
                result,
            });
        }

        let health_checks = match mode {
            RunMode::Full => {
                self.state = RunState::HealthChecking;
                HealthChecker::new(&self.config.health_checks, &remote_base, events)
                    .run(&mut session)
            }
            RunMode::SingleBatch { .. } => Vec::new(),
        };

        let report = DeploymentReport {
            target: target.name.clone(),
            host: target.hostname.clone(),
            remote_base: remote_base.clone(),
            mode,
            batches: reports,
            health_checks,
            started_at,
            finished_at: Utc::now(),
        };
        self.state = RunState::Reported;

        if let Err(e) = session.close() {
            tracing::warn!(target_name = %target.name, error = %e, "failed to close session");
        }
        self.state = RunState::Disconnected;
        events.on_event(DeployEvent::Disconnected {
            target: target.name.clone(),
        });

        Ok(report)
    }

    /// Dry run: report what would be transferred, judged from the local disk
    /// only. Never connects.
    pub fn preview(&self, request: &RunRequest) -> DeployResult<PlanPreview> {
        let target = self.config.target_entry(request.target.as_deref())?;
        let batches = self.config.select_batches(request.batch.as_deref())?;

        let batches = batches
            .into_iter()
            .map(|batch| BatchPreview {
                artifacts: batch
                    .artifacts
                    .iter()
                    .map(|artifact| {
                        let local = artifact.local_path(&self.config.project_root);
                        let remote_path = artifact.remote_path(&self.config.remote_base);
                        if !self.fs.exists(&local) {
                            ArtifactPreview {
                                artifact: artifact.clone(),
                                kind: ArtifactKind::Missing,
                                remote_path,
                                size_bytes: None,
                                file_count: None,
                            }
                        } else if self.fs.is_dir(&local) {
                            let stats = self.fs.dir_stats(&local).ok();
                            ArtifactPreview {
                                artifact: artifact.clone(),
                                kind: ArtifactKind::Directory,
                                remote_path,
                                size_bytes: stats.map(|s| s.bytes),
                                file_count: stats.map(|s| s.files),
                            }
                        } else {
                            ArtifactPreview {
                                artifact: artifact.clone(),
                                kind: ArtifactKind::File,
                                remote_path,
                                size_bytes: self.fs.file_size(&local).ok(),
                                file_count: None,
                            }
                        }
                    })
                    .collect(),
                name: batch.name,
                display_name: batch.display_name,
                description: batch.description,
            })
            .collect();

        Ok(PlanPreview {
            target: target.name.clone(),
            host: target.hostname.clone(),
            remote_base: self.config.remote_base.clone(),
            batches,
        })
    }
}
