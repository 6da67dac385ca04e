//! Documentation version and deploy target.

use std::fmt;

/// Version used when none is given.
pub const DEFAULT_VERSION: &str = "v3.3";

/// A documentation version, always prefixed with `v`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    /// Normalize `raw` so it starts with `v` (`3.3` becomes `v3.3`).
    pub fn new(raw: &str) -> Self {
        if raw.starts_with('v') {
            Self(raw.to_string())
        } else {
            Self(format!("v{raw}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where to publish the merged site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployTarget {
    /// GitHub Pages
    Github,

    /// Accepted but has no effect
    Other(String),
}

impl DeployTarget {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "github" => Self::Github,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DeployTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Github => f.write_str("github"),
            Self::Other(name) => f.write_str(name),
        }
    }
}
