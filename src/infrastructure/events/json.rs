//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::entities::{DeploymentReport, PlanPreview};
use crate::domain::ports::{DeployEvent, DeployEventSink};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Final line of a run: the full report
    pub fn write_report(&self, report: &DeploymentReport) {
        let mut json = tagged("report", report);
        if let Some(obj) = json.as_object_mut() {
            obj.insert(
                "overall_success".to_string(),
                serde_json::Value::Bool(report.overall_success()),
            );
        }
        self.write_event(json);
    }

    /// Only line of a dry run: the plan preview
    pub fn write_plan(&self, preview: &PlanPreview) {
        self.write_event(tagged("plan", preview));
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

fn tagged<T: Serialize>(event: &str, value: &T) -> serde_json::Value {
    let mut json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
    match json.as_object_mut() {
        Some(obj) => {
            obj.insert("event".to_string(), event.into());
            json
        }
        None => serde_json::json!({ "event": event, "value": json }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let json = match event {
            DeployEvent::Connecting {
                target,
                endpoint,
                auth,
            } => {
                serde_json::json!({
                    "event": "connecting",
                    "target": target,
                    "endpoint": endpoint,
                    "auth": auth,
                })
            }

            DeployEvent::Connected { target } => {
                serde_json::json!({
                    "event": "connected",
                    "target": target,
                })
            }

            DeployEvent::BatchStarted {
                index,
                total,
                name,
                display_name,
                description,
                artifact_count,
            } => {
                serde_json::json!({
                    "event": "batch_start",
                    "index": index,
                    "total": total,
                    "batch": name,
                    "display_name": display_name,
                    "description": description,
                    "artifact_count": artifact_count,
                })
            }

            DeployEvent::ArtifactMissing {
                artifact,
                local_path,
            } => {
                serde_json::json!({
                    "event": "artifact_missing",
                    "artifact": artifact,
                    "local_path": local_path.display().to_string(),
                })
            }

            DeployEvent::ArtifactTransferred { outcome } => {
                let mut json = tagged("artifact_transferred", &outcome);
                if !outcome.transferred {
                    json["event"] = "artifact_error".into();
                }
                json
            }

            DeployEvent::UploadFinished {
                name,
                transferred,
                total,
            } => {
                serde_json::json!({
                    "event": "upload_complete",
                    "batch": name,
                    "transferred": transferred,
                    "total": total,
                })
            }

            DeployEvent::ArtifactVerified { verification } => {
                tagged("artifact_verified", &verification)
            }

            DeployEvent::BatchFinished {
                index,
                name,
                display_name,
                result,
            } => {
                let status = if result.is_success() {
                    "success"
                } else {
                    "failure"
                };
                serde_json::json!({
                    "event": "batch_complete",
                    "index": index,
                    "batch": name,
                    "display_name": display_name,
                    "status": status,
                    "uploaded": result.uploaded,
                    "verified": result.verified,
                    "transferred": result.transferred_count(),
                    "total": result.transfer_outcomes.len(),
                })
            }

            DeployEvent::HealthChecksStarted { count } => {
                serde_json::json!({
                    "event": "health_start",
                    "count": count,
                })
            }

            DeployEvent::HealthCheckFinished { result } => tagged("health_check", &result),

            DeployEvent::Disconnected { target } => {
                serde_json::json!({
                    "event": "disconnected",
                    "target": target,
                })
            }
        };

        self.write_event(json);
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
