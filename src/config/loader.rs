//! Configuration loading
//!
//! Order of precedence: CLI flags, then `BATCHSHIP_*` environment variables,
//! then `batchship.toml`, then built-in defaults.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::env_validator::{suggest, EnvVarValidator};
use super::types::{ConfigFile, DeployConfig};
use super::validate::validate;
use crate::domain::value_objects::VerificationMode;
use crate::error::{DeployError, DeployResult};

/// Config file looked up in the current directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "batchship.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load, apply environment overrides and validate.
pub fn load_with_warnings(path: &Path) -> DeployResult<(DeployConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DeployError::configuration(format!(
            "config file {} not found (pass --config or create {})",
            path.display(),
            DEFAULT_CONFIG_FILE
        )),
        _ => DeployError::Io(e),
    })?;

    let (mut file, warnings) = parse_with_warnings(&content, path)?;
    apply_env_overrides(&mut file, |k| std::env::var(k).ok(), &mut std::io::stderr());

    let base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let config = validate(file, base_dir)?;

    tracing::debug!(
        config = %path.display(),
        project_root = %config.project_root.display(),
        remote_base = %config.remote_base,
        targets = config.targets.len(),
        batches = config.batches.len(),
        "configuration loaded"
    );

    Ok((config, warnings))
}

/// Parse TOML, collecting unknown keys instead of failing on them.
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> DeployResult<(ConfigFile, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let file: ConfigFile = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DeployError::ConfigParse {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest(&key, KNOWN_KEYS.iter().copied()).map(str::to_string),
            }
        })
        .collect();

    Ok((file, warnings))
}

/// Apply environment variable overrides (BATCHSHIP_* prefix)
pub fn apply_env_overrides<W: Write>(
    file: &mut ConfigFile,
    get_env: impl Fn(&str) -> Option<String>,
    writer: &mut W,
) {
    if let Some(target) = get_env("BATCHSHIP_TARGET").filter(|v| !v.trim().is_empty()) {
        file.project.default_target = Some(target.trim().to_string());
    }

    if let Some(base) = get_env("BATCHSHIP_REMOTE_BASE").filter(|v| !v.trim().is_empty()) {
        file.project.remote_base = Some(base);
    }

    if let Some(root) = get_env("BATCHSHIP_PROJECT_ROOT").filter(|v| !v.trim().is_empty()) {
        let root = PathBuf::from(root);
        file.project.root = Some(if root.is_absolute() {
            root
        } else {
            std::env::current_dir().map(|cwd| cwd.join(&root)).unwrap_or(root)
        });
    }

    if let Some(secs) = get_env("BATCHSHIP_CONNECT_TIMEOUT") {
        match secs.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => file.connection.connect_timeout_secs = secs,
            _ => {
                let _ = writeln!(
                    writer,
                    "Warning: Invalid BATCHSHIP_CONNECT_TIMEOUT value '{}' (expected seconds > 0)",
                    secs
                );
            }
        }
    }

    if let Some(mode) = get_env("BATCHSHIP_VERIFY_MODE") {
        let validator = EnvVarValidator::new("BATCHSHIP_VERIFY_MODE", VerificationMode::VALID_VALUES);
        let current = file.verification.mode;
        file.verification.mode =
            validator.parse_with_writer(&mode, |s| s.parse().ok(), current, writer);
    }
}

const KNOWN_KEYS: &[&str] = &[
    "project",
    "root",
    "remote_base",
    "default_target",
    "connection",
    "connect_timeout_secs",
    "handshake_timeout_secs",
    "command_timeout_secs",
    "idle_timeout_secs",
    "host_key_checking",
    "verification",
    "mode",
    "targets",
    "hostname",
    "port",
    "username",
    "key_path",
    "password_env",
    "description",
    "batches",
    "name",
    "display_name",
    "artifacts",
    "health",
    "checks",
    "command",
];

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}
