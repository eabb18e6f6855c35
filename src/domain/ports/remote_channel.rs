//! Remote Channel Port
//!
//! The authenticated transport to a deployment target. The orchestrator
//! never sees how commands or bytes travel, only these two traits.

use std::path::Path;

use crate::domain::entities::TargetDescriptor;
use crate::domain::value_objects::RemotePath;
use crate::error::DeployResult;

/// Captured result of a remote command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Short human-readable reason for a failed command
    pub fn failure_detail(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            format!("exit code {}", self.exit_code)
        } else {
            format!("exit code {}: {}", self.exit_code, stderr)
        }
    }
}

/// Opens sessions to targets.
pub trait RemoteChannel {
    /// Authenticate to `target`.
    ///
    /// Fails with `Authentication`, `Unreachable` or `Timeout`; all of them
    /// abort the run.
    fn connect(&self, target: &TargetDescriptor) -> DeployResult<Box<dyn RemoteSession>>;
}

/// One authenticated session. All calls block until complete.
pub trait RemoteSession {
    /// Run a shell command remotely. A non-zero exit is not an `Err`.
    fn execute(&mut self, command: &str) -> DeployResult<CommandOutput>;

    /// Copy a single file so that it lands at `remote`.
    fn transfer_file(&mut self, local: &Path, remote: &RemotePath) -> DeployResult<()>;

    /// Copy a directory recursively so that it lands at `remote`.
    fn transfer_directory(&mut self, local: &Path, remote: &RemotePath) -> DeployResult<()>;

    /// Release the session. Must tolerate being called more than once.
    fn close(&mut self) -> DeployResult<()>;
}
