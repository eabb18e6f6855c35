//! Turn a raw `ConfigFile` into a `DeployConfig`
//!
//! Every structural problem is reported as a configuration error so the run
//! aborts before a connection is attempted.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use super::types::{ConfigFile, DeployConfig, TargetEntry, TargetSection};
use crate::domain::entities::{default_health_checks, ArtifactRef, BatchPlan, HealthCheck};
use crate::domain::value_objects::RemotePath;
use crate::error::{DeployError, DeployResult};

/// Validate `file`; relative paths are resolved against `base_dir`.
pub fn validate(file: ConfigFile, base_dir: &Path) -> DeployResult<DeployConfig> {
    let project_root = match &file.project.root {
        Some(root) if root.is_absolute() => root.clone(),
        Some(root) => base_dir.join(root),
        None => base_dir.to_path_buf(),
    };

    let remote_base = match file.project.remote_base.as_deref().map(str::trim) {
        Some(base) if !base.is_empty() => RemotePath::new(base),
        _ => {
            return Err(DeployError::configuration(
                "project.remote_base is required (e.g. \"/opt/app\")",
            ))
        }
    };

    if file.targets.is_empty() {
        return Err(DeployError::configuration(
            "no targets configured; add a [targets.<name>] section",
        ));
    }
    let mut targets = BTreeMap::new();
    for (name, section) in file.targets {
        let entry = validate_target(&name, section, base_dir)?;
        targets.insert(name, entry);
    }

    if let Some(default) = &file.project.default_target {
        if !targets.contains_key(default) {
            return Err(DeployError::configuration(format!(
                "project.default_target '{}' is not a configured target",
                default
            )));
        }
    }

    if file.batches.is_empty() {
        return Err(DeployError::configuration(
            "no batches configured; add at least one [[batches]] entry",
        ));
    }
    let mut seen = HashSet::new();
    let mut batches = Vec::with_capacity(file.batches.len());
    for section in file.batches {
        let name = section.name.trim().to_string();
        if name.is_empty() {
            return Err(DeployError::configuration("batch name is empty"));
        }
        if !seen.insert(name.clone()) {
            return Err(DeployError::configuration(format!(
                "batch '{}' is defined more than once",
                name
            )));
        }
        if section.artifacts.is_empty() {
            return Err(DeployError::configuration(format!(
                "batch '{}' lists no artifacts",
                name
            )));
        }
        let artifacts = section
            .artifacts
            .iter()
            .map(|raw| {
                ArtifactRef::parse(raw).map_err(|e| {
                    DeployError::configuration(format!("batch '{}': {}", name, message_of(e)))
                })
            })
            .collect::<DeployResult<Vec<_>>>()?;
        let display_name = section.display_name.unwrap_or_else(|| name.clone());
        batches.push(BatchPlan::new(
            name,
            display_name,
            section.description,
            artifacts,
        ));
    }

    let health_checks = match file.health.checks {
        None => default_health_checks(),
        Some(checks) => checks
            .into_iter()
            .map(|c| {
                if c.command.trim().is_empty() {
                    Err(DeployError::configuration(format!(
                        "health check '{}' has an empty command",
                        c.name
                    )))
                } else {
                    Ok(HealthCheck::new(c.name, c.command))
                }
            })
            .collect::<DeployResult<Vec<_>>>()?,
    };

    Ok(DeployConfig {
        project_root,
        remote_base,
        default_target: file.project.default_target,
        connection: file.connection.into(),
        verification: file.verification.mode,
        targets,
        batches,
        health_checks,
    })
}

fn validate_target(name: &str, section: TargetSection, base_dir: &Path) -> DeployResult<TargetEntry> {
    if section.password.is_some() {
        return Err(DeployError::configuration(format!(
            "target '{}' contains a literal password; store it in an environment variable \
             and reference it with password_env",
            name
        )));
    }
    if section.hostname.trim().is_empty() {
        return Err(DeployError::configuration(format!(
            "target '{}' has an empty hostname",
            name
        )));
    }
    if section.username.trim().is_empty() {
        return Err(DeployError::configuration(format!(
            "target '{}' has an empty username",
            name
        )));
    }
    if section.port == 0 {
        return Err(DeployError::configuration(format!(
            "target '{}' has port 0",
            name
        )));
    }
    if section.key_path.is_none() && section.password_env.is_none() {
        return Err(DeployError::configuration(format!(
            "target '{}' needs key_path or password_env",
            name
        )));
    }

    Ok(TargetEntry {
        name: name.to_string(),
        hostname: section.hostname.trim().to_string(),
        port: section.port,
        username: section.username.trim().to_string(),
        key_path: section.key_path.as_deref().map(|p| expand_key_path(p, base_dir)),
        password_env: section.password_env,
        description: section.description,
    })
}

/// Expand `~` to the local home directory; other relative paths are taken
/// relative to the config file.
pub fn expand_key_path(raw: &str, base_dir: &Path) -> PathBuf {
    if raw == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(raw));
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    let path = PathBuf::from(raw);
    if path.is_absolute() || raw.starts_with('~') {
        path
    } else {
        base_dir.join(path)
    }
}

fn message_of(err: DeployError) -> String {
    match err {
        DeployError::Configuration { message } => message,
        other => other.to_string(),
    }
}
