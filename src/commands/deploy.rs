//! Deploy and dry-run commands

use std::sync::Arc;

use anyhow::Result;
use batchship::config::DeployConfig;
use batchship::domain::entities::DeploymentReport;
use batchship::domain::ports::{DeployEventSink, NoopEventSink};
use batchship::infrastructure::{JsonEventSink, MasterRegistry};
use batchship::presentation::create_orchestrator;
use batchship::RunRequest;

use crate::ui::ci::{github_actions_annotation, is_github_actions, AnnotationLevel};
use crate::ui::context::UiContext;
use crate::ui::views::deploy::{render_deploy_header, render_report, ConsoleEventSink};
use crate::ui::views::plan::render_plan;

/// Full or single-batch run. Exit code is 0 only when every selected batch
/// was uploaded and verified.
pub fn cmd_deploy(
    config: DeployConfig,
    request: &RunRequest,
    registry: MasterRegistry,
    ui: &UiContext,
) -> Result<i32> {
    let json = ui.json.then(|| Arc::new(JsonEventSink::stdout()));
    let events: Arc<dyn DeployEventSink> = match &json {
        Some(sink) => sink.clone() as Arc<dyn DeployEventSink>,
        None => Arc::new(ConsoleEventSink::new(*ui)),
    };

    if !ui.json {
        let target = config.target_entry(request.target.as_deref())?;
        let batches = config.select_batches(request.batch.as_deref())?;
        println!(
            "{}",
            render_deploy_header(
                target,
                &config.remote_base,
                request.batch.as_deref(),
                batches.len(),
                ui
            )
        );
    }

    let mut orchestrator = create_orchestrator(config, registry, events);
    let report = orchestrator.run(request)?;

    match json {
        Some(sink) => sink.write_report(&report),
        None => {
            println!();
            print!("{}", render_report(&report, ui));
            annotate_failures(&report, ui);
        }
    }

    Ok(report.exit_code())
}

/// Resolve the plan and inspect local artifacts without connecting.
pub fn cmd_dry_run(config: DeployConfig, request: &RunRequest, ui: &UiContext) -> Result<i32> {
    let orchestrator = create_orchestrator(config, MasterRegistry::new(), Arc::new(NoopEventSink));
    let preview = orchestrator.preview(request)?;

    if ui.json {
        JsonEventSink::stdout().write_plan(&preview);
    } else {
        print!("{}", render_plan(&preview, ui));
    }
    Ok(0)
}

fn annotate_failures(report: &DeploymentReport, ui: &UiContext) {
    if !ui.caps.is_ci || !is_github_actions() {
        return;
    }
    for batch in report.batches.iter().filter(|b| !b.result.is_success()) {
        println!(
            "{}",
            github_actions_annotation(
                AnnotationLevel::Warning,
                "batchship",
                None,
                &format!(
                    "batch {} on {}: uploaded={} verified={}",
                    batch.name, report.target, batch.result.uploaded, batch.result.verified
                ),
            )
        );
    }
}
