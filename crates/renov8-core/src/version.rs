use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque pack version.
///
/// Versions are only ever compared for equality; the repository decides
/// what "latest" means.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackVersion(String);

impl PackVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackVersion {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PackVersion {
    fn from(s: String) -> Self {
        Self(s)
    }
}
