use std::io::{self, Write};

use batchship::config::TargetEntry;
use batchship::domain::entities::{BatchResult, DeploymentReport, RunMode};
use batchship::domain::ports::{DeployEvent, DeployEventSink};
use batchship::domain::value_objects::RemotePath;
use batchship::presentation::format_elapsed;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::views::transfer::render_transfer_line;

pub fn render_deploy_header(
    target: &TargetEntry,
    remote_base: &RemotePath,
    batch: Option<&str>,
    batch_count: usize,
    ui: &UiContext,
) -> String {
    let mut header = CommandHeader::new(Icon::Deploy, "Batchship Deploy");
    header.add(
        "Target",
        format!(
            "{} ({}@{}:{})",
            target.name, target.username, target.hostname, target.port
        ),
    );
    header.add("Remote", remote_base.as_str());
    header.add(
        "Batches",
        match batch {
            Some(name) => format!("{} only, health checks skipped", name),
            None => format!("{} in order", batch_count),
        },
    );
    header.render(ui.color, ui.unicode)
}

/// Live progress on stdout while the run is in flight
pub struct ConsoleEventSink {
    ui: UiContext,
}

impl ConsoleEventSink {
    pub fn new(ui: UiContext) -> Self {
        Self { ui }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        if let Some(text) = render_event(&event, &self.ui) {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "{}", text);
            let _ = out.flush();
        }
    }
}

pub fn render_event(event: &DeployEvent, ui: &UiContext) -> Option<String> {
    let (color, unicode) = (ui.color, ui.unicode);

    let text = match event {
        DeployEvent::Connecting {
            target,
            endpoint,
            auth,
        } => format!(
            "{} Connecting to {} ({}, {} auth)...",
            Icon::Remote.colored(color, unicode),
            target,
            endpoint,
            auth
        ),

        DeployEvent::Connected { target } => format!(
            "{} Connected to {}",
            Icon::Success.colored(color, unicode),
            target
        ),

        DeployEvent::BatchStarted {
            index,
            total,
            display_name,
            description,
            artifact_count,
            ..
        } => {
            let mut text = format!(
                "\n{} {}  {}",
                ColoredText::info(format!("[{}/{}]", index + 1, total)).render(color),
                ColoredText::plain(display_name.as_str()).bold().render(color),
                ColoredText::dim(plural(*artifact_count, "artifact")).render(color)
            );
            if !description.is_empty() {
                text.push_str(&format!(
                    "\n  {}",
                    ColoredText::dim(description.as_str()).render(color)
                ));
            }
            text
        }

        DeployEvent::ArtifactMissing {
            artifact,
            local_path,
        } => format!(
            "  {} {}  {}",
            Icon::Error.colored(color, unicode),
            artifact,
            ColoredText::error(format!("not found locally ({})", local_path.display()))
                .render(color)
        ),

        DeployEvent::ArtifactTransferred { outcome } => render_transfer_line(outcome, ui),

        DeployEvent::UploadFinished {
            transferred, total, ..
        } => format!(
            "  {} {}",
            Icon::Arrow.colored(color, unicode),
            ColoredText::outcome(format!("uploaded {}/{}", transferred, total), transferred == total)
                .render(color)
        ),

        DeployEvent::ArtifactVerified { verification } => {
            if verification.verified {
                if ui.verbose == 0 {
                    return None;
                }
                format!(
                    "  {} verified {}",
                    Icon::Success.colored(color, unicode),
                    verification.artifact
                )
            } else {
                format!(
                    "  {} {}  {}",
                    Icon::Error.colored(color, unicode),
                    verification.artifact,
                    ColoredText::error(
                        verification
                            .detail
                            .as_deref()
                            .unwrap_or("not found on remote host")
                    )
                    .render(color)
                )
            }
        }

        DeployEvent::BatchFinished { result, .. } => {
            if result.is_success() {
                format!(
                    "  {} {}",
                    Icon::Success.colored(color, unicode),
                    ColoredText::success("batch complete").render(color)
                )
            } else {
                format!(
                    "  {} {}",
                    Icon::Warning.colored(color, unicode),
                    ColoredText::warning(format!("batch incomplete: {}", batch_detail(result)))
                        .render(color)
                )
            }
        }

        DeployEvent::HealthChecksStarted { count } => format!(
            "\n{} {}  {}",
            Icon::Health.colored(color, unicode),
            ColoredText::plain("Health checks").bold().render(color),
            ColoredText::dim(plural(*count, "check")).render(color)
        ),

        DeployEvent::HealthCheckFinished { result } => {
            let detail = result.detail.as_deref().unwrap_or("");
            format!(
                "  {} {}  {}",
                Icon::outcome(result.passed).colored(color, unicode),
                result.name,
                if result.passed {
                    ColoredText::dim(detail)
                } else {
                    ColoredText::error(detail)
                }
                .render(color)
            )
        }

        DeployEvent::Disconnected { target } => {
            format!("\n{}", ColoredText::dim(format!("Disconnected from {}", target)).render(color))
        }
    };

    Some(text)
}

/// Final summary: one row per batch, health results as notes
pub fn render_report(report: &DeploymentReport, ui: &UiContext) -> String {
    let success = report.overall_success();
    let title = match (&report.mode, success) {
        (RunMode::Full, true) => "Deployment complete".to_string(),
        (RunMode::Full, false) => "Deployment incomplete".to_string(),
        (RunMode::SingleBatch { batch }, true) => format!("Batch '{}' deployed", batch),
        (RunMode::SingleBatch { batch }, false) => format!("Batch '{}' failed", batch),
    };

    let mut summary = ResultSummary::new(title, success);
    for batch in &report.batches {
        let result = &batch.result;
        summary.add_row(
            result.is_success(),
            batch.display_name.as_str(),
            format!(
                "uploaded: {:<3}  verified: {}",
                yes_no(result.uploaded),
                yes_no(result.verified)
            ),
        );
    }

    if !report.health_checks.is_empty() {
        let passed = report.health_checks.iter().filter(|c| c.passed).count();
        summary.add_note(format!(
            "Health checks: {}/{} passed",
            passed,
            report.health_checks.len()
        ));
    }

    let elapsed = (report.finished_at - report.started_at)
        .to_std()
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);
    summary.add_note(format!(
        "{} on {} in {}",
        report.remote_base,
        report.host,
        format_elapsed(elapsed)
    ));

    if let Some(failed) = report.batches.iter().find(|b| !b.result.is_success()) {
        summary.with_next_step(format!(
            "fix the problem above, then re-run with --batch {}",
            failed.name
        ));
    }

    summary.render(ui.color, ui.unicode)
}

fn batch_detail(result: &BatchResult) -> String {
    if !result.uploaded {
        format!(
            "upload failed ({}/{} transferred)",
            result.transferred_count(),
            result.transfer_outcomes.len()
        )
    } else if !result.verified {
        let confirmed = result.verifications.iter().filter(|v| v.verified).count();
        format!(
            "verification failed ({}/{} confirmed)",
            confirmed,
            result.transfer_outcomes.len()
        )
    } else {
        "uploaded, verified".to_string()
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
