//! Name resolution against the validated configuration
//!
//! Unknown target or batch names fail here, before anything touches the
//! network.

use std::path::Path;

use super::env_validator::suggest;
use super::types::{DeployConfig, TargetEntry};
use crate::domain::entities::{BatchPlan, Credential, TargetDescriptor};
use crate::domain::value_objects::Secret;
use crate::error::{DeployError, DeployResult};

/// Target picked when neither `--target` nor `project.default_target` is given
pub const PRIMARY_TARGET: &str = "primary";

impl TargetEntry {
    /// Build the immutable descriptor, reading the password variable if any.
    pub fn resolve(
        &self,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> DeployResult<TargetDescriptor> {
        self.resolve_with(get_env, Path::exists)
    }

    pub(crate) fn resolve_with(
        &self,
        get_env: impl Fn(&str) -> Option<String>,
        key_exists: impl Fn(&Path) -> bool,
    ) -> DeployResult<TargetDescriptor> {
        let password = self
            .password_env
            .as_deref()
            .and_then(|var| get_env(var).filter(|v| !v.is_empty()).map(Secret::new));

        if let (Some(var), None, None) = (&self.password_env, &password, &self.key_path) {
            return Err(DeployError::configuration(format!(
                "target '{}' reads its password from ${}, which is not set",
                self.name, var
            )));
        }

        let credential = Credential::resolve(self.key_path.clone(), password, key_exists)
            .ok_or_else(|| {
                DeployError::configuration(format!(
                    "target '{}' has neither key_path nor password_env",
                    self.name
                ))
            })?;

        Ok(TargetDescriptor {
            name: self.name.clone(),
            hostname: self.hostname.clone(),
            port: self.port,
            username: self.username.clone(),
            credential,
            description: self.description.clone(),
        })
    }
}

impl DeployConfig {
    /// Find a registry entry by name, falling back to the default target.
    pub fn target_entry(&self, name: Option<&str>) -> DeployResult<&TargetEntry> {
        let name = match name.or(self.default_target.as_deref()) {
            Some(name) => name,
            None if self.targets.contains_key(PRIMARY_TARGET) => PRIMARY_TARGET,
            None => match self.targets.values().next() {
                Some(only) if self.targets.len() == 1 => return Ok(only),
                _ => {
                    return Err(DeployError::configuration(format!(
                        "no target selected; pass --target or set project.default_target \
                         (available: {})",
                        self.target_names().join(", ")
                    )))
                }
            },
        };

        self.targets.get(name).ok_or_else(|| {
            unknown_name_error("target", name, self.targets.keys().map(String::as_str))
        })
    }

    /// Resolve the selected target into a descriptor with its credential.
    pub fn resolve_target(&self, name: Option<&str>) -> DeployResult<TargetDescriptor> {
        self.target_entry(name)?.resolve(|var| std::env::var(var).ok())
    }

    /// Batches to run, in plan order: all of them, or exactly the named one.
    pub fn select_batches(&self, name: Option<&str>) -> DeployResult<Vec<BatchPlan>> {
        match name {
            None => Ok(self.batches.clone()),
            Some(name) => self
                .batches
                .iter()
                .find(|b| b.name == name)
                .map(|b| vec![b.clone()])
                .ok_or_else(|| {
                    let names = self.batches.iter().map(|b| b.name.as_str());
                    unknown_name_error("batch", name, names)
                }),
        }
    }

    pub fn target_names(&self) -> Vec<&str> {
        self.targets.keys().map(String::as_str).collect()
    }
}

fn unknown_name_error<'a>(
    kind: &str,
    name: &str,
    candidates: impl Iterator<Item = &'a str> + Clone,
) -> DeployError {
    let hint = suggest(name, candidates.clone())
        .map(|s| format!(" (did you mean '{}'?)", s))
        .unwrap_or_default();
    let available: Vec<&str> = candidates.collect();
    DeployError::configuration(format!(
        "unknown {} '{}'{}; available: {}",
        kind,
        name,
        hint,
        available.join(", ")
    ))
}
