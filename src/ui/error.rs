use batchship::DeployError;

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::ci::{github_actions_annotation, is_github_actions, AnnotationLevel};
use crate::ui::terminal::detect_capabilities;

/// Heading and remediation hint for an error that stopped the run
fn describe(err: &anyhow::Error) -> (&'static str, Option<&'static str>) {
    match err.downcast_ref::<DeployError>() {
        Some(DeployError::Configuration { .. }) | Some(DeployError::ConfigParse { .. }) => (
            "Configuration",
            Some("Check the configuration file; --list-targets shows the registry."),
        ),
        Some(DeployError::Authentication { .. }) => (
            "Authentication",
            Some("Check the target's key_path, or export the variable named by password_env."),
        ),
        Some(DeployError::Unreachable { .. }) => (
            "Connection",
            Some("Check the target's hostname and port, and that the host is up."),
        ),
        Some(DeployError::Timeout { .. }) => (
            "Timeout",
            Some("Raise connection.handshake_timeout_secs or check the network path."),
        ),
        Some(_) => ("Deployment", None),
        None => ("Error", None),
    }
}

fn error_file(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<DeployError>() {
        Some(DeployError::ConfigParse { file, .. }) => Some(file.display().to_string()),
        _ => None,
    }
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let (kind, fix) = describe(err);
    let mut block = ErrorBlock::new(kind, format!("{:#}", err));
    if let Some(fix) = fix {
        block = block.with_fix(fix);
    }
    block.render(supports_color, supports_unicode)
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let (kind, _) = describe(err);
        let output = serde_json::json!({
            "event": "error",
            "kind": kind.to_lowercase(),
            "message": format!("{:#}", err),
        });
        println!("{}", output);
        return;
    }

    let caps = detect_capabilities();
    if caps.is_ci && is_github_actions() {
        let file = error_file(err);
        println!(
            "{}",
            github_actions_annotation(
                AnnotationLevel::Error,
                "batchship",
                file.as_deref(),
                &format!("{:#}", err),
            )
        );
    }

    eprint!(
        "{}",
        format_error(err, caps.supports_color, caps.supports_unicode)
    );
}
