//! Command entry points for the `batchship` binary

pub mod deploy;
pub mod targets;

use std::path::Path;

use anyhow::{Context, Result};
use batchship::config::{load_with_warnings, DeployConfig};
use batchship::infrastructure::MasterRegistry;
use batchship::presentation::Cli;

use crate::ui::blocks::warning::WarningBlock;
use crate::ui::context::UiContext;

/// Dispatch one invocation. Returns the process exit code.
pub fn run(cli: &Cli, registry: MasterRegistry) -> Result<i32> {
    let ui = UiContext::new(cli.json, cli.verbose, cli.color);
    let config = load_config(&cli.config, &ui)?;

    if cli.list_targets {
        targets::cmd_list_targets(&config, &ui);
        return Ok(0);
    }

    let request = batchship::RunRequest::with_optional(cli.target.clone(), cli.batch.clone());
    if cli.dry_run {
        return deploy::cmd_dry_run(config, &request, &ui);
    }
    deploy::cmd_deploy(config, &request, registry, &ui)
}

fn load_config(path: &Path, ui: &UiContext) -> Result<DeployConfig> {
    let (config, warnings) = load_with_warnings(path)
        .with_context(|| format!("loading {}", path.display()))?;

    if !warnings.is_empty() {
        if ui.json {
            for warning in &warnings {
                println!(
                    "{}",
                    serde_json::json!({
                        "event": "config_warning",
                        "key": warning.key,
                        "file": warning.file.display().to_string(),
                        "line": warning.line,
                        "suggestion": warning.suggestion,
                    })
                );
            }
        } else {
            eprint!(
                "{}",
                WarningBlock::from_config_warnings(&warnings).render(ui.color, ui.unicode)
            );
        }
    }

    Ok(config)
}
