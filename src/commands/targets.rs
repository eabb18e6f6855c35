//! `--list-targets`

use batchship::config::DeployConfig;

use crate::ui::context::UiContext;
use crate::ui::views::targets::render_targets;

pub fn cmd_list_targets(config: &DeployConfig, ui: &UiContext) {
    if !ui.json {
        print!("{}", render_targets(config, ui));
        return;
    }

    let default = config.target_entry(None).ok().map(|t| t.name.clone());
    let targets: Vec<_> = config
        .targets
        .values()
        .map(|t| {
            serde_json::json!({
                "name": t.name,
                "hostname": t.hostname,
                "port": t.port,
                "username": t.username,
                "key_path": t.key_path.as_ref().map(|p| p.display().to_string()),
                "password_env": t.password_env,
                "description": t.description,
                "default": default.as_deref() == Some(t.name.as_str()),
            })
        })
        .collect();
    println!(
        "{}",
        serde_json::json!({ "event": "targets", "targets": targets })
    );
}
