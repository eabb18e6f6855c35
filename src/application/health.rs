//! Health Checker
//!
//! Diagnostics run after all batches. Results are informational only.

use crate::domain::entities::{HealthCheck, HealthCheckResult};
use crate::domain::ports::{DeployEvent, DeployEventSink};
use crate::domain::value_objects::RemotePath;

use super::session::ConnectionSession;

pub struct HealthChecker<'a> {
    checks: &'a [HealthCheck],
    remote_base: &'a RemotePath,
    events: &'a dyn DeployEventSink,
}

impl<'a> HealthChecker<'a> {
    pub fn new(
        checks: &'a [HealthCheck],
        remote_base: &'a RemotePath,
        events: &'a dyn DeployEventSink,
    ) -> Self {
        Self {
            checks,
            remote_base,
            events,
        }
    }

    /// Run every check once, in order. A failing check never stops the rest.
    pub fn run(&self, session: &mut ConnectionSession) -> Vec<HealthCheckResult> {
        self.events.on_event(DeployEvent::HealthChecksStarted {
            count: self.checks.len(),
        });

        let mut results = Vec::with_capacity(self.checks.len());
        for check in self.checks {
            let command = check.render_command(self.remote_base);
            let (passed, detail) = match session.execute(&command) {
                Ok(output) if output.success() => (true, first_line(&output.stdout)),
                Ok(output) => (false, Some(output.failure_detail())),
                Err(e) => (false, Some(e.to_string())),
            };
            if !passed {
                tracing::warn!(check = %check.name, command = %command, "health check failed");
            }
            let result = HealthCheckResult {
                name: check.name.clone(),
                command,
                passed,
                detail,
            };
            self.events.on_event(DeployEvent::HealthCheckFinished {
                result: result.clone(),
            });
            results.push(result);
        }
        results
    }
}

fn first_line(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}
