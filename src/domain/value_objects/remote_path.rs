//! Remote path value object
//!
//! Paths on the deployment host are always POSIX, whatever the local OS is,
//! so they are kept as `/`-separated strings rather than `PathBuf`.

use std::fmt;

use serde::Serialize;

/// An absolute or home-relative path on the remote host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RemotePath(String);

impl RemotePath {
    /// Create a remote path, dropping redundant trailing slashes.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() && path.starts_with('/') {
            return Self("/".to_string());
        }
        Self(trimmed.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a `/`-separated relative path.
    pub fn join(&self, relative: &str) -> Self {
        let relative = relative.trim_start_matches('/');
        if relative.is_empty() {
            return self.clone();
        }
        if self.0 == "/" {
            return Self::new(format!("/{}", relative));
        }
        Self::new(format!("{}/{}", self.0, relative))
    }

    /// Parent directory, or `None` for `/` and single-segment relative paths.
    pub fn parent(&self) -> Option<Self> {
        if self.0 == "/" {
            return None;
        }
        match self.0.rsplit_once('/') {
            Some(("", _)) => Some(Self("/".to_string())),
            Some((parent, _)) => Some(Self(parent.to_string())),
            None => None,
        }
    }

    /// Last path segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Whether the path starts at the remote user's home (`~` or `~/...`).
    pub fn is_home_relative(&self) -> bool {
        self.0 == "~" || self.0.starts_with("~/")
    }

    /// Replace a leading `~` with `home`. Other paths are returned as is.
    pub fn expand_home(&self, home: &str) -> Self {
        if !self.is_home_relative() {
            return self.clone();
        }
        let home = Self::new(home);
        match self.0.strip_prefix("~/") {
            Some(rest) => home.join(rest),
            None => home,
        }
    }

    /// Quote for interpolation into a remote shell command.
    pub fn shell_quoted(&self) -> String {
        shell_quote(&self.0)
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Single-quote a string for a POSIX shell.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
