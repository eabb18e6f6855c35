//! Connection Session
//!
//! Scoped ownership of one authenticated remote session. The session is
//! released exactly once: either through an explicit `close()` or when the
//! wrapper is dropped, which also covers early returns and unwinding.

use std::path::Path;

use crate::domain::entities::TargetDescriptor;
use crate::domain::ports::{CommandOutput, RemoteChannel, RemoteSession};
use crate::domain::value_objects::RemotePath;
use crate::error::{DeployError, DeployResult};

pub struct ConnectionSession {
    target: String,
    inner: Option<Box<dyn RemoteSession>>,
}

impl ConnectionSession {
    /// Authenticate to `target`. Any error here aborts the run.
    pub fn open<C>(channel: &C, target: &TargetDescriptor) -> DeployResult<Self>
    where
        C: RemoteChannel + ?Sized,
    {
        tracing::info!(
            target_name = %target.name,
            endpoint = %target.endpoint(),
            auth = target.credential.kind(),
            "connecting"
        );
        let inner = channel.connect(target)?;
        Ok(Self {
            target: target.name.clone(),
            inner: Some(inner),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    /// Run a remote command. A non-zero exit status is returned, not raised.
    pub fn execute(&mut self, command: &str) -> DeployResult<CommandOutput> {
        tracing::debug!(command, "remote exec");
        let output = self.session(command)?.execute(command)?;
        tracing::debug!(command, exit_code = output.exit_code, "remote exec finished");
        Ok(output)
    }

    /// `mkdir -p` on the remote host.
    pub fn ensure_remote_dir(&mut self, dir: &RemotePath) -> DeployResult<()> {
        let command = format!("mkdir -p -- {}", dir.shell_quoted());
        let output = self.execute(&command)?;
        if output.success() {
            Ok(())
        } else {
            Err(DeployError::RemoteCommand {
                command,
                message: output.failure_detail(),
            })
        }
    }

    /// Absolute form of `path`: a leading `~` is replaced with the remote
    /// `$HOME`, which is looked up only when needed.
    pub fn resolve_home(&mut self, path: &RemotePath) -> DeployResult<RemotePath> {
        if !path.is_home_relative() {
            return Ok(path.clone());
        }
        let command = "echo $HOME";
        let output = self.execute(command)?;
        let home = output.stdout.trim();
        if !output.success() || !home.starts_with('/') {
            return Err(DeployError::RemoteCommand {
                command: command.to_string(),
                message: if output.success() {
                    format!("unexpected home directory '{}'", home)
                } else {
                    output.failure_detail()
                },
            });
        }
        let resolved = path.expand_home(home);
        tracing::debug!(from = %path, to = %resolved, "expanded remote home");
        Ok(resolved)
    }

    pub fn transfer_file(&mut self, local: &Path, remote: &RemotePath) -> DeployResult<()> {
        tracing::debug!(local = %local.display(), remote = %remote, "transfer file");
        self.session("transfer")?.transfer_file(local, remote)
    }

    pub fn transfer_directory(&mut self, local: &Path, remote: &RemotePath) -> DeployResult<()> {
        tracing::debug!(local = %local.display(), remote = %remote, "transfer directory");
        self.session("transfer")?.transfer_directory(local, remote)
    }

    /// Release the session. Calling it again is a no-op.
    pub fn close(&mut self) -> DeployResult<()> {
        match self.inner.take() {
            Some(mut session) => {
                tracing::info!(target_name = %self.target, "disconnecting");
                session.close()
            }
            None => Ok(()),
        }
    }

    fn session(&mut self, operation: &str) -> DeployResult<&mut Box<dyn RemoteSession>> {
        let target = &self.target;
        self.inner.as_mut().ok_or_else(|| DeployError::RemoteCommand {
            command: operation.to_string(),
            message: format!("session to {} is closed", target),
        })
    }
}

impl Drop for ConnectionSession {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(target_name = %self.target, error = %e, "failed to close session");
        }
    }
}
