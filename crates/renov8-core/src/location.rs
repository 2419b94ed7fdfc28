use serde::{Deserialize, Serialize};
use std::fmt;

use crate::version::PackVersion;

/// Where a pack comes from and which version of it is meant.
///
/// `producer` identifies "the same pack" across versions and is the key the
/// resolver uses to enforce a single version per pack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackLocation {
    pub repository_id: String,
    pub producer: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    pub version: PackVersion,
}

impl PackLocation {
    pub fn new(
        repository_id: impl Into<String>,
        producer: impl Into<String>,
        version: impl Into<PackVersion>,
    ) -> Self {
        Self {
            repository_id: repository_id.into(),
            producer: producer.into(),
            channel: None,
            frequency: None,
            version: version.into(),
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }

    /// Copy of this location pointing at another version of the same producer.
    pub fn with_version(&self, version: impl Into<PackVersion>) -> Self {
        Self {
            version: version.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for PackLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.producer, self.version)
    }
}
