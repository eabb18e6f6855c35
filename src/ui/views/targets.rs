use batchship::config::DeployConfig;

use crate::ui::context::UiContext;
use crate::ui::primitives::text::ColoredText;

/// `--list-targets`: the registry, one target per line
pub fn render_targets(config: &DeployConfig, ui: &UiContext) -> String {
    let default = config.target_entry(None).ok().map(|t| t.name.as_str());
    let name_width = config.targets.keys().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    for target in config.targets.values() {
        let auth = match (&target.key_path, &target.password_env) {
            (Some(_), Some(var)) => format!("key, password from ${}", var),
            (Some(_), None) => "key".to_string(),
            (None, Some(var)) => format!("password from ${}", var),
            (None, None) => "no credential".to_string(),
        };

        let mut line = format!(
            "{:<width$}  {}@{}:{}  {}",
            target.name,
            target.username,
            target.hostname,
            target.port,
            ColoredText::dim(format!("({})", auth)).render(ui.color),
            width = name_width
        );
        if default == Some(target.name.as_str()) {
            line.push_str(&format!(" {}", ColoredText::info("[default]").render(ui.color)));
        }
        if !target.description.is_empty() {
            line.push_str(&format!(
                "  {}",
                ColoredText::dim(target.description.as_str()).render(ui.color)
            ));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}
