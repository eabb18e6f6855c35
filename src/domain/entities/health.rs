//! Post-deployment health checks

use serde::Serialize;

use crate::domain::value_objects::RemotePath;

/// A diagnostic command run on the target after all batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub name: String,
    /// May contain `{remote_base}` and `{remote_parent}` placeholders
    pub command: String,
}

impl HealthCheck {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }

    /// Substitute placeholders with quoted remote paths.
    pub fn render_command(&self, remote_base: &RemotePath) -> String {
        let parent = remote_base
            .parent()
            .unwrap_or_else(|| remote_base.clone());
        self.command
            .replace("{remote_base}", &remote_base.shell_quoted())
            .replace("{remote_parent}", &parent.shell_quoted())
    }
}

/// Checks run when the configuration does not list any.
pub fn default_health_checks() -> Vec<HealthCheck> {
    vec![
        HealthCheck::new("Python runtime", "python3 --version"),
        HealthCheck::new("Disk space", "df -h {remote_parent}"),
        HealthCheck::new("Network reachability", "ping -c 1 8.8.8.8"),
        HealthCheck::new("Project directory", "ls -la {remote_base}"),
    ]
}

/// Outcome of a single health check. Never affects the overall result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckResult {
    pub name: String,
    pub command: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
