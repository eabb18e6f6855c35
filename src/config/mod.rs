//! Configuration module for batchship
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (BATCHSHIP_*)
//! 3. Project config (batchship.toml)
//! 4. Built-in defaults (lowest priority)
//!
//! Nothing here touches the network. Every name the user passes is resolved
//! against the registry before a connection is attempted.

mod env_validator;
mod loader;
mod resolve;
mod types;
mod validate;

pub use env_validator::{levenshtein, suggest, EnvVarValidator};
pub use loader::{
    apply_env_overrides, load_with_warnings, parse_with_warnings, ConfigWarning,
    DEFAULT_CONFIG_FILE,
};
pub use resolve::PRIMARY_TARGET;
pub use types::{
    BatchSection, ConfigFile, ConnectionSection, ConnectionSettings, DeployConfig,
    HealthCheckSection, HealthSection, HostKeyChecking, ProjectSection, TargetEntry,
    TargetSection, VerificationSection,
};
pub use validate::{expand_key_path, validate};
