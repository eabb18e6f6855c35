//! Configuration types
//!
//! Two layers: the raw `ConfigFile` mirrors `batchship.toml` one-to-one, and
//! `DeployConfig` is the validated form handed to the orchestrator.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::entities::{BatchPlan, HealthCheck};
use crate::domain::value_objects::{RemotePath, VerificationMode};

/// `StrictHostKeyChecking` policy passed to ssh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HostKeyChecking {
    Yes,
    #[default]
    AcceptNew,
    No,
}

impl HostKeyChecking {
    pub fn as_ssh_value(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::AcceptNew => "accept-new",
            Self::No => "no",
        }
    }
}

/// Transport timeouts and policies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Upper bound for the whole authentication handshake
    pub handshake_timeout: Duration,
    /// Per-command/transfer limit; `None` waits forever
    pub command_timeout: Option<Duration>,
    /// How long an unused control connection survives
    pub idle_timeout: Duration,
    pub host_key_checking: HostKeyChecking,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        ConnectionSection::default().into()
    }
}

impl From<ConnectionSection> for ConnectionSettings {
    fn from(section: ConnectionSection) -> Self {
        Self {
            connect_timeout: Duration::from_secs(section.connect_timeout_secs.max(1)),
            handshake_timeout: Duration::from_secs(section.handshake_timeout_secs.max(1)),
            command_timeout: (section.command_timeout_secs > 0)
                .then(|| Duration::from_secs(section.command_timeout_secs)),
            idle_timeout: Duration::from_secs(section.idle_timeout_secs.max(1)),
            host_key_checking: section.host_key_checking,
        }
    }
}

// ----------------------------------------------------------------------------
// Raw file representation
// ----------------------------------------------------------------------------

/// `batchship.toml`, as written
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub connection: ConnectionSection,
    #[serde(default)]
    pub verification: VerificationSection,
    #[serde(default)]
    pub targets: BTreeMap<String, TargetSection>,
    #[serde(default)]
    pub batches: Vec<BatchSection>,
    #[serde(default)]
    pub health: HealthSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectSection {
    /// Local project root, relative to the config file
    pub root: Option<PathBuf>,
    pub remote_base: Option<String>,
    pub default_target: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionSection {
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_handshake_timeout")]
    pub handshake_timeout_secs: u64,
    #[serde(default)]
    pub command_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default)]
    pub host_key_checking: HostKeyChecking,
}

impl Default for ConnectionSection {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            handshake_timeout_secs: default_handshake_timeout(),
            command_timeout_secs: 0,
            idle_timeout_secs: default_idle_timeout(),
            host_key_checking: HostKeyChecking::default(),
        }
    }
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_handshake_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    60
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerificationSection {
    #[serde(default)]
    pub mode: VerificationMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetSection {
    pub hostname: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub username: String,
    pub key_path: Option<String>,
    /// Name of the environment variable holding the password
    pub password_env: Option<String>,
    /// Only parsed so it can be rejected
    pub password: Option<String>,
    #[serde(default)]
    pub description: String,
}

fn default_port() -> u16 {
    22
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchSection {
    pub name: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub artifacts: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthSection {
    /// `None` means "use the built-in checks"; an empty list disables them
    pub checks: Option<Vec<HealthCheckSection>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthCheckSection {
    pub name: String,
    pub command: String,
}

// ----------------------------------------------------------------------------
// Validated configuration
// ----------------------------------------------------------------------------

/// A registry entry. Credentials are resolved only when the target is selected,
/// so unused targets never require their password variable to be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntry {
    pub name: String,
    pub hostname: String,
    pub port: u16,
    pub username: String,
    pub key_path: Option<PathBuf>,
    pub password_env: Option<String>,
    pub description: String,
}

/// Everything the orchestrator needs, validated once at startup
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub project_root: PathBuf,
    pub remote_base: RemotePath,
    pub default_target: Option<String>,
    pub connection: ConnectionSettings,
    pub verification: VerificationMode,
    pub targets: BTreeMap<String, TargetEntry>,
    /// In deployment order
    pub batches: Vec<BatchPlan>,
    pub health_checks: Vec<HealthCheck>,
}
