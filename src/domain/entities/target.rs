//! Deployment target entity

use std::path::{Path, PathBuf};

use crate::domain::value_objects::Secret;

/// How the transport authenticates to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    PasswordAuth(Secret),
    KeyAuth(PathBuf),
}

impl Credential {
    /// Pick the authoritative credential from what a target configures.
    ///
    /// A key wins over a password. A key file that does not exist locally
    /// only loses to a password when one is actually available.
    pub fn resolve(
        key_path: Option<PathBuf>,
        password: Option<Secret>,
        key_exists: impl Fn(&Path) -> bool,
    ) -> Option<Self> {
        match (key_path, password) {
            (Some(key), Some(password)) => {
                if key_exists(&key) {
                    Some(Self::KeyAuth(key))
                } else {
                    tracing::warn!(
                        key = %key.display(),
                        "ssh key file not found, falling back to password authentication"
                    );
                    Some(Self::PasswordAuth(password))
                }
            }
            (Some(key), None) => Some(Self::KeyAuth(key)),
            (None, Some(password)) => Some(Self::PasswordAuth(password)),
            (None, None) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::PasswordAuth(_) => "password",
            Self::KeyAuth(_) => "key",
        }
    }
}

/// A remote host selected from the target registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub name: String,
    pub hostname: String,
    pub port: u16,
    pub username: String,
    pub credential: Credential,
    pub description: String,
}

impl TargetDescriptor {
    /// `user@host`, as understood by ssh and scp
    pub fn destination(&self) -> String {
        format!("{}@{}", self.username, self.hostname)
    }

    /// `host:port`, for display
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }
}
