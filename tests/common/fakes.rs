//! Recording fakes for the remote channel and the event sink.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use batchship::domain::entities::TargetDescriptor;
use batchship::domain::ports::{
    CommandOutput, DeployEvent, DeployEventSink, RemoteChannel, RemoteSession,
};
use batchship::domain::value_objects::RemotePath;
use batchship::{DeployError, DeployResult};

/// What the fake remote side reports for `echo $HOME`
pub const REMOTE_HOME: &str = "/home/deploy";

/// Everything the fake remote side was asked to do
#[derive(Debug, Default, Clone)]
pub struct Calls {
    pub connects: usize,
    pub closes: usize,
    pub commands: Vec<String>,
    /// (local, remote) per file transfer
    pub file_transfers: Vec<(PathBuf, String)>,
    /// (local, remote) per directory transfer
    pub dir_transfers: Vec<(PathBuf, String)>,
}

impl Calls {
    pub fn transfer_count(&self) -> usize {
        self.file_transfers.len() + self.dir_transfers.len()
    }

    /// Commands other than the `mkdir -p` issued before each transfer
    pub fn verification_commands(&self) -> Vec<&str> {
        self.commands
            .iter()
            .map(String::as_str)
            .filter(|c| c.starts_with("ls -ld") || c.starts_with("sha256sum"))
            .collect()
    }

    pub fn remote_paths(&self) -> Vec<String> {
        self.file_transfers
            .iter()
            .chain(self.dir_transfers.iter())
            .map(|(_, remote)| remote.clone())
            .collect()
    }
}

/// How the fake remote side misbehaves
#[derive(Debug, Default, Clone)]
pub struct Faults {
    pub refuse_connect: bool,
    pub reject_auth: bool,
    /// Transfers whose remote path ends with this fail
    pub fail_transfer: Option<String>,
    /// Transfers whose remote path ends with this panic
    pub panic_transfer: Option<String>,
    /// Commands starting with this exit 1
    pub fail_command: Option<String>,
}

#[derive(Clone, Default)]
pub struct RecordingChannel {
    calls: Arc<Mutex<Calls>>,
    faults: Faults,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_faults(faults: Faults) -> Self {
        Self {
            calls: Arc::default(),
            faults,
        }
    }

    /// Snapshot of the calls so far
    pub fn calls(&self) -> Calls {
        lock(&self.calls).clone()
    }
}

impl RemoteChannel for RecordingChannel {
    fn connect(&self, target: &TargetDescriptor) -> DeployResult<Box<dyn RemoteSession>> {
        lock(&self.calls).connects += 1;

        if self.faults.refuse_connect {
            return Err(DeployError::Unreachable {
                host: target.hostname.clone(),
                message: "Connection refused".to_string(),
            });
        }
        if self.faults.reject_auth {
            return Err(DeployError::Authentication {
                host: target.hostname.clone(),
                message: "Permission denied (publickey,password)".to_string(),
            });
        }

        Ok(Box::new(RecordingSession {
            calls: self.calls.clone(),
            faults: self.faults.clone(),
        }))
    }
}

struct RecordingSession {
    calls: Arc<Mutex<Calls>>,
    faults: Faults,
}

impl RecordingSession {
    fn transfer(&mut self, local: &Path, remote: &RemotePath, directory: bool) -> DeployResult<()> {
        {
            let mut calls = lock(&self.calls);
            let entry = (local.to_path_buf(), remote.to_string());
            if directory {
                calls.dir_transfers.push(entry);
            } else {
                calls.file_transfers.push(entry);
            }
        }

        // The lock is released before panicking so Drop-time close can record.
        if matches!(&self.faults.panic_transfer, Some(s) if remote.as_str().ends_with(s.as_str())) {
            panic!("injected panic while transferring {}", remote);
        }
        if matches!(&self.faults.fail_transfer, Some(s) if remote.as_str().ends_with(s.as_str())) {
            return Err(DeployError::Transfer {
                artifact: remote.to_string(),
                message: "scp exited with code 1: Connection reset by peer".to_string(),
            });
        }
        Ok(())
    }
}

impl RemoteSession for RecordingSession {
    fn execute(&mut self, command: &str) -> DeployResult<CommandOutput> {
        lock(&self.calls).commands.push(command.to_string());

        if matches!(&self.faults.fail_command, Some(p) if command.starts_with(p.as_str())) {
            return Ok(CommandOutput {
                exit_code: 1,
                stdout: String::new(),
                stderr: "No such file or directory".to_string(),
            });
        }
        let stdout = if command == "echo $HOME" {
            format!("{}\n", REMOTE_HOME)
        } else {
            format!("ok: {}\n", command)
        };
        Ok(CommandOutput {
            exit_code: 0,
            stdout,
            stderr: String::new(),
        })
    }

    fn transfer_file(&mut self, local: &Path, remote: &RemotePath) -> DeployResult<()> {
        self.transfer(local, remote, false)
    }

    fn transfer_directory(&mut self, local: &Path, remote: &RemotePath) -> DeployResult<()> {
        self.transfer(local, remote, true)
    }

    fn close(&mut self) -> DeployResult<()> {
        lock(&self.calls).closes += 1;
        Ok(())
    }
}

/// Event sink that keeps every event
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DeployEvent>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<DeployEvent> {
        lock(&self.events).clone()
    }

    /// Event variant names in emission order
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events().iter().map(kind).collect()
    }
}

impl DeployEventSink for RecordingSink {
    fn on_event(&self, event: DeployEvent) {
        lock(&self.events).push(event);
    }
}

fn kind(event: &DeployEvent) -> &'static str {
    match event {
        DeployEvent::Connecting { .. } => "connecting",
        DeployEvent::Connected { .. } => "connected",
        DeployEvent::BatchStarted { .. } => "batch_started",
        DeployEvent::ArtifactMissing { .. } => "artifact_missing",
        DeployEvent::ArtifactTransferred { .. } => "artifact_transferred",
        DeployEvent::UploadFinished { .. } => "upload_finished",
        DeployEvent::ArtifactVerified { .. } => "artifact_verified",
        DeployEvent::BatchFinished { .. } => "batch_finished",
        DeployEvent::HealthChecksStarted { .. } => "health_started",
        DeployEvent::HealthCheckFinished { .. } => "health_finished",
        DeployEvent::Disconnected { .. } => "disconnected",
    }
}

/// Poison-tolerant lock: a test that injects a panic must still be able to
/// inspect what happened.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
