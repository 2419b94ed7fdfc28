use serde::{Deserialize, Serialize};

use crate::config::PackConfigNode;
use crate::location::PackLocation;

/// A resolved pack spec as returned by a pack repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    pub location: PackLocation,
    /// Packs this one depends on, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<PackConfigNode>,
}

impl Pack {
    pub fn new(location: PackLocation, dependencies: Vec<PackConfigNode>) -> Self {
        Self {
            location,
            dependencies,
        }
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    pub fn producer(&self) -> &str {
        &self.location.producer
    }
}
