//! Remote Verifier
//!
//! One remote command per artifact; a batch is verified when all of them
//! succeed. Only ever invoked for uploaded batches.

use std::path::Path;

use crate::domain::entities::{ArtifactKind, ArtifactVerification, BatchPlan, BatchResult};
use crate::domain::ports::{DeployEvent, DeployEventSink, LocalFileSystem};
use crate::domain::value_objects::{RemotePath, VerificationMode};

use super::session::ConnectionSession;

pub struct RemoteVerifier<'a, F: LocalFileSystem + ?Sized> {
    fs: &'a F,
    project_root: &'a Path,
    remote_base: &'a RemotePath,
    mode: VerificationMode,
    events: &'a dyn DeployEventSink,
}

impl<'a, F: LocalFileSystem + ?Sized> RemoteVerifier<'a, F> {
    pub fn new(
        fs: &'a F,
        project_root: &'a Path,
        remote_base: &'a RemotePath,
        mode: VerificationMode,
        events: &'a dyn DeployEventSink,
    ) -> Self {
        Self {
            fs,
            project_root,
            remote_base,
            mode,
            events,
        }
    }

    /// Confirm every artifact of an uploaded batch and record the outcome.
    ///
    /// Does nothing (and issues no remote command) when `result.uploaded` is
    /// false.
    pub fn verify(&self, session: &mut ConnectionSession, batch: &BatchPlan, result: &mut BatchResult) {
        if !result.uploaded {
            return;
        }

        let mut verifications = Vec::with_capacity(result.transfer_outcomes.len());
        for outcome in &result.transfer_outcomes {
            let remote = outcome.artifact.remote_path(self.remote_base);
            let verification = match (self.mode, outcome.kind) {
                (VerificationMode::Checksum, ArtifactKind::File) => {
                    let local = outcome.artifact.local_path(self.project_root);
                    self.verify_checksum(session, &local, &remote)
                }
                _ => self.verify_exists(session, &remote),
            };
            let verification = ArtifactVerification {
                artifact: outcome.artifact.clone(),
                verified: verification.is_ok(),
                detail: verification.err(),
            };
            if !verification.verified {
                tracing::warn!(
                    batch = %batch.name,
                    artifact = %verification.artifact,
                    detail = verification.detail.as_deref().unwrap_or(""),
                    "verification failed"
                );
            }
            if self.events.wants_detailed_events() || !verification.verified {
                self.events.on_event(DeployEvent::ArtifactVerified {
                    verification: verification.clone(),
                });
            }
            verifications.push(verification);
        }

        result.record_verification(verifications);
    }

    fn verify_exists(&self, session: &mut ConnectionSession, remote: &RemotePath) -> Result<(), String> {
        let command = format!("ls -ld -- {}", remote.shell_quoted());
        match session.execute(&command) {
            Ok(output) if output.success() => Ok(()),
            Ok(output) => Err(output.failure_detail()),
            Err(e) => Err(e.to_string()),
        }
    }

    fn verify_checksum(
        &self,
        session: &mut ConnectionSession,
        local: &Path,
        remote: &RemotePath,
    ) -> Result<(), String> {
        let command = format!("sha256sum -- {}", remote.shell_quoted());
        let output = session.execute(&command).map_err(|e| e.to_string())?;
        if !output.success() {
            return Err(output.failure_detail());
        }
        let remote_digest = parse_sha256sum(&output.stdout)
            .ok_or_else(|| format!("unexpected sha256sum output: {}", output.stdout.trim()))?;
        let local_digest = self.fs.sha256(local).map_err(|e| e.to_string())?;
        if remote_digest.eq_ignore_ascii_case(&local_digest) {
            Ok(())
        } else {
            Err(format!(
                "checksum mismatch: local {} remote {}",
                local_digest, remote_digest
            ))
        }
    }
}

/// First field of `sha256sum` output, if it looks like a digest.
fn parse_sha256sum(stdout: &str) -> Option<&str> {
    let digest = stdout.split_whitespace().next()?;
    (digest.len() == 64 && digest.chars().all(|c| c.is_ascii_hexdigit())).then_some(digest)
}
