use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a transferred artifact is confirmed on the remote host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMode {
    /// Remote listing succeeds (exit code 0)
    #[default]
    Exists,
    /// Remote SHA-256 matches the local file; directories fall back to `Exists`
    Checksum,
}

impl VerificationMode {
    pub const VALID_VALUES: &'static [&'static str] = &["exists", "checksum"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::Checksum => "checksum",
        }
    }
}

impl FromStr for VerificationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exists" | "exist" | "ls" => Ok(Self::Exists),
            "checksum" | "sha256" => Ok(Self::Checksum),
            other => Err(format!("unknown verification mode '{}'", other)),
        }
    }
}

impl fmt::Display for VerificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
