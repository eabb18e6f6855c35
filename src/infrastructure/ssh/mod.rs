//! OpenSSH Remote Channel
//!
//! Implements the `RemoteChannel` port on top of the system `ssh` and `scp`
//! clients. `connect` starts a control master; every later command and
//! transfer is multiplexed over its socket, so authentication happens once
//! per run.

mod askpass;
mod classify;
mod process;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;

use crate::config::ConnectionSettings;
use crate::domain::entities::{Credential, TargetDescriptor};
use crate::domain::ports::{CommandOutput, RemoteChannel, RemoteSession};
use crate::domain::value_objects::RemotePath;
use crate::error::{DeployError, DeployResult};

pub use askpass::{run_if_requested as run_askpass_if_requested, ASKPASS_MODE_ENV};
pub use classify::classify_handshake_failure;
pub use process::{run_with_deadline, wait_with_deadline, ProcessOutput};

/// How long `ssh -O exit` may take when tearing a master down
const EXIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Live control masters, so an interrupt handler can tear them all down.
#[derive(Debug, Clone, Default)]
pub struct MasterRegistry {
    masters: Arc<Mutex<Vec<MasterHandle>>>,
}

#[derive(Debug, Clone)]
struct MasterHandle {
    ssh: OsString,
    socket: PathBuf,
    destination: String,
}

impl MasterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&self, handle: MasterHandle) {
        if let Ok(mut masters) = self.masters.lock() {
            masters.push(handle);
        }
    }

    fn unregister(&self, socket: &Path) {
        if let Ok(mut masters) = self.masters.lock() {
            masters.retain(|m| m.socket != socket);
        }
    }

    pub fn len(&self) -> usize {
        self.masters.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop every registered master. Safe to call from a signal handler
    /// thread; sessions closed afterwards find nothing left to do.
    pub fn shutdown_all(&self) {
        let masters = match self.masters.lock() {
            Ok(mut masters) => std::mem::take(&mut *masters),
            Err(_) => return,
        };
        for master in masters {
            tracing::info!(destination = %master.destination, "stopping control master");
            let _ = stop_master(&master.ssh, &master.socket, &master.destination);
        }
    }
}

/// `RemoteChannel` backed by the OpenSSH client
#[derive(Debug, Clone)]
pub struct OpenSshChannel {
    settings: ConnectionSettings,
    registry: MasterRegistry,
    ssh: OsString,
    scp: OsString,
}

impl OpenSshChannel {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self {
            settings,
            registry: MasterRegistry::new(),
            ssh: OsString::from("ssh"),
            scp: OsString::from("scp"),
        }
    }

    /// Share `registry` with an interrupt handler
    pub fn with_registry(mut self, registry: MasterRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Use different client binaries (e.g. a wrapper script)
    pub fn with_programs(mut self, ssh: impl Into<OsString>, scp: impl Into<OsString>) -> Self {
        self.ssh = ssh.into();
        self.scp = scp.into();
        self
    }

    pub fn registry(&self) -> &MasterRegistry {
        &self.registry
    }

    /// Arguments for starting the control master, destination last.
    pub fn master_args(&self, target: &TargetDescriptor, socket: &Path, log: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-M".into(),
            "-S".into(),
            socket.into(),
            "-f".into(),
            "-N".into(),
            "-E".into(),
            log.into(),
            "-p".into(),
            target.port.to_string().into(),
        ];
        let mut option = |value: String| {
            args.push("-o".into());
            args.push(value.into());
        };
        option(format!(
            "ConnectTimeout={}",
            self.settings.connect_timeout.as_secs()
        ));
        option(format!(
            "ControlPersist={}",
            self.settings.idle_timeout.as_secs()
        ));
        option(format!(
            "StrictHostKeyChecking={}",
            self.settings.host_key_checking.as_ssh_value()
        ));
        option("ServerAliveInterval=15".to_string());

        let key = match &target.credential {
            Credential::KeyAuth(key) => {
                option("IdentitiesOnly=yes".to_string());
                option("BatchMode=yes".to_string());
                Some(key)
            }
            Credential::PasswordAuth(_) => {
                option("PreferredAuthentications=password,keyboard-interactive".to_string());
                option("PubkeyAuthentication=no".to_string());
                option("NumberOfPasswordPrompts=1".to_string());
                None
            }
        };
        if let Some(key) = key {
            args.push("-i".into());
            args.push(key.into());
        }

        args.push(target.destination().into());
        args
    }
}

impl RemoteChannel for OpenSshChannel {
    fn connect(&self, target: &TargetDescriptor) -> DeployResult<Box<dyn RemoteSession>> {
        let dir = tempfile::Builder::new().prefix("batchship-").tempdir()?;
        let socket = dir.path().join("ctl");
        let log = dir.path().join("master.log");

        let mut cmd = Command::new(&self.ssh);
        cmd.args(self.master_args(target, &socket, &log))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Credential::PasswordAuth(secret) = &target.credential {
            askpass::configure(&mut cmd, secret)?;
        }

        tracing::debug!(
            destination = %target.destination(),
            port = target.port,
            socket = %socket.display(),
            "starting ssh control master"
        );
        let mut child = cmd.spawn().map_err(|e| DeployError::Unreachable {
            host: target.hostname.clone(),
            message: format!("cannot run {}: {}", self.ssh.to_string_lossy(), e),
        })?;

        let status = wait_with_deadline(&mut child, Some(self.settings.handshake_timeout))?;
        match status {
            None => Err(DeployError::Timeout {
                operation: format!("ssh handshake with {}", target.endpoint()),
                secs: self.settings.handshake_timeout.as_secs(),
            }),
            Some(status) if status.success() => {
                self.registry.register(MasterHandle {
                    ssh: self.ssh.clone(),
                    socket: socket.clone(),
                    destination: target.destination(),
                });
                Ok(Box::new(OpenSshSession {
                    destination: target.destination(),
                    port: target.port,
                    socket,
                    command_timeout: self.settings.command_timeout,
                    registry: self.registry.clone(),
                    ssh: self.ssh.clone(),
                    scp: self.scp.clone(),
                    closed: false,
                    _dir: dir,
                }))
            }
            Some(status) => {
                let log = std::fs::read_to_string(&log).unwrap_or_default();
                tracing::debug!(log = %log.trim(), "ssh control master failed");
                Err(classify_handshake_failure(
                    &target.hostname,
                    status.code().unwrap_or(-1),
                    &log,
                ))
            }
        }
    }
}

/// A session multiplexed over a control master socket
pub struct OpenSshSession {
    destination: String,
    port: u16,
    socket: PathBuf,
    command_timeout: Option<Duration>,
    registry: MasterRegistry,
    ssh: OsString,
    scp: OsString,
    closed: bool,
    /// Holds the socket directory; removed on drop
    _dir: TempDir,
}

impl OpenSshSession {
    fn ssh_command(&self) -> Command {
        let mut cmd = Command::new(&self.ssh);
        cmd.arg("-S")
            .arg(&self.socket)
            .args(["-o", "ControlMaster=no", "-o", "BatchMode=yes"])
            .arg("-p")
            .arg(self.port.to_string());
        cmd
    }

    /// scp over the master socket; `recursive` for directories
    fn scp(&self, local: &Path, remote: &RemotePath, recursive: bool) -> DeployResult<()> {
        let mut cmd = Command::new(&self.scp);
        cmd.args(["-q", "-p"]);
        if recursive {
            cmd.arg("-r");
        }
        // Legacy scp hands the remote path to the remote shell; SFTP mode
        // takes it literally.
        if !is_shell_safe(remote.as_str()) {
            cmd.arg("-s");
        }
        cmd.arg("-o")
            .arg(format!("ControlPath={}", self.socket.display()))
            .args(["-o", "ControlMaster=no", "-o", "BatchMode=yes"])
            .arg("-P")
            .arg(self.port.to_string())
            .arg(local)
            .arg(format!("{}:{}", self.destination, remote));

        let artifact = remote.to_string();
        match run_with_deadline(&mut cmd, self.command_timeout) {
            Ok(Some(out)) if out.success() => Ok(()),
            Ok(Some(out)) => Err(DeployError::Transfer {
                artifact,
                message: failure_message(&out),
            }),
            Ok(None) => Err(DeployError::Timeout {
                operation: format!("transfer of {}", artifact),
                secs: self.command_timeout.map(|d| d.as_secs()).unwrap_or(0),
            }),
            Err(e) => Err(DeployError::Transfer {
                artifact,
                message: format!("cannot run {}: {}", self.scp.to_string_lossy(), e),
            }),
        }
    }
}

impl RemoteSession for OpenSshSession {
    fn execute(&mut self, command: &str) -> DeployResult<CommandOutput> {
        let mut cmd = self.ssh_command();
        cmd.arg(&self.destination).arg("--").arg(command);

        match run_with_deadline(&mut cmd, self.command_timeout) {
            Ok(Some(out)) => Ok(CommandOutput {
                exit_code: out.exit_code,
                stdout: out.stdout,
                stderr: out.stderr,
            }),
            Ok(None) => Err(DeployError::Timeout {
                operation: format!("remote command `{}`", command),
                secs: self.command_timeout.map(|d| d.as_secs()).unwrap_or(0),
            }),
            Err(e) => Err(DeployError::RemoteCommand {
                command: command.to_string(),
                message: format!("cannot run {}: {}", self.ssh.to_string_lossy(), e),
            }),
        }
    }

    fn transfer_file(&mut self, local: &Path, remote: &RemotePath) -> DeployResult<()> {
        self.scp(local, remote, false)
    }

    /// Copies into the parent so an existing `remote` is overwritten rather
    /// than gaining a nested copy.
    fn transfer_directory(&mut self, local: &Path, remote: &RemotePath) -> DeployResult<()> {
        let into = remote.parent().unwrap_or_else(|| remote.clone());
        self.scp(local, &into, true)
    }

    fn close(&mut self) -> DeployResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.registry.unregister(&self.socket);

        if !self.socket.exists() {
            // Already torn down (e.g. by the interrupt handler).
            return Ok(());
        }
        stop_master(&self.ssh, &self.socket, &self.destination)
    }
}

impl Drop for OpenSshSession {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(destination = %self.destination, error = %e, "failed to stop control master");
        }
    }
}

fn stop_master(ssh: &OsString, socket: &Path, destination: &str) -> DeployResult<()> {
    let mut cmd = Command::new(ssh);
    cmd.arg("-S").arg(socket).args(["-O", "exit"]).arg(destination);
    let command = format!("ssh -O exit {}", destination);
    match run_with_deadline(&mut cmd, Some(EXIT_TIMEOUT)) {
        Ok(Some(out)) if out.success() => Ok(()),
        Ok(Some(out)) => Err(DeployError::RemoteCommand {
            command,
            message: failure_message(&out),
        }),
        Ok(None) => Err(DeployError::Timeout {
            operation: command,
            secs: EXIT_TIMEOUT.as_secs(),
        }),
        Err(e) => Err(DeployError::RemoteCommand {
            command,
            message: e.to_string(),
        }),
    }
}

/// Whether a remote shell would pass `path` through unchanged.
fn is_shell_safe(path: &str) -> bool {
    path.chars()
        .all(|c| c.is_ascii_alphanumeric() || "/._-+,:@=%".contains(c))
}

fn failure_message(out: &ProcessOutput) -> String {
    let stderr = out.stderr.trim();
    if stderr.is_empty() {
        format!("exit code {}", out.exit_code)
    } else {
        format!("exit code {}: {}", out.exit_code, stderr)
    }
}
