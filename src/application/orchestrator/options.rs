//! Orchestrator Options

use std::fmt;

/// Which target and which batches a run covers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    /// Target name; `None` uses the configured default
    pub target: Option<String>,
    /// Restrict the run to one batch and skip health checks
    pub batch: Option<String>,
}

impl RunRequest {
    /// Every batch on the default target
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = Some(batch.into());
        self
    }

    pub fn with_optional(target: Option<String>, batch: Option<String>) -> Self {
        Self { target, batch }
    }
}

/// Orchestrator lifecycle
///
/// `Idle -> Connected -> RunningBatch* -> HealthChecking -> Reported -> Disconnected`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Connected,
    /// 0-based position in the selected batch list
    RunningBatch { index: usize },
    HealthChecking,
    Reported,
    Disconnected,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Connected => f.write_str("connected"),
            Self::RunningBatch { index } => write!(f, "running batch {}", index + 1),
            Self::HealthChecking => f.write_str("health checking"),
            Self::Reported => f.write_str("reported"),
            Self::Disconnected => f.write_str("disconnected"),
        }
    }
}
