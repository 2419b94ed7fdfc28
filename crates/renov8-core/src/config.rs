use serde::{Deserialize, Serialize};

use crate::location::PackLocation;

/// One declared pack in a distribution config, with its nested dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackConfigNode {
    pub location: PackLocation,
    /// Set when the entry was recorded by a previous resolution rather than
    /// requested by the user.
    #[serde(default)]
    pub transitive: bool,
    #[serde(default)]
    pub dependencies: Vec<PackConfigNode>,
}

impl PackConfigNode {
    /// An explicitly requested entry without nested dependencies.
    pub fn direct(location: PackLocation) -> Self {
        Self {
            location,
            transitive: false,
            dependencies: Vec::new(),
        }
    }

    /// A recorded transitive entry without nested dependencies.
    pub fn transitive(location: PackLocation) -> Self {
        Self {
            location,
            transitive: true,
            dependencies: Vec::new(),
        }
    }

    pub fn builder(location: PackLocation) -> PackConfigNodeBuilder {
        PackConfigNodeBuilder {
            node: Self::direct(location),
        }
    }

    pub fn producer(&self) -> &str {
        &self.location.producer
    }
}

/// Builder for [`PackConfigNode`].
#[derive(Debug, Clone)]
pub struct PackConfigNodeBuilder {
    node: PackConfigNode,
}

impl PackConfigNodeBuilder {
    pub fn transitive(mut self, transitive: bool) -> Self {
        self.node.transitive = transitive;
        self
    }

    pub fn location(mut self, location: PackLocation) -> Self {
        self.node.location = location;
        self
    }

    pub fn dependency(mut self, dependency: PackConfigNode) -> Self {
        self.node.dependencies.push(dependency);
        self
    }

    pub fn dependencies(mut self, dependencies: impl IntoIterator<Item = PackConfigNode>) -> Self {
        self.node.dependencies.extend(dependencies);
        self
    }

    pub fn build(self) -> PackConfigNode {
        self.node
    }
}

/// The top-level declared packs of a distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionConfig {
    #[serde(default)]
    pub packs: Vec<PackConfigNode>,
}

impl DistributionConfig {
    pub fn new(packs: Vec<PackConfigNode>) -> Self {
        Self { packs }
    }

    pub fn builder() -> DistributionConfigBuilder {
        DistributionConfigBuilder::default()
    }

    pub fn has_packs(&self) -> bool {
        !self.packs.is_empty()
    }

    /// First top-level entry for `producer`, if any.
    pub fn pack(&self, producer: &str) -> Option<&PackConfigNode> {
        self.packs.iter().find(|p| p.location.producer == producer)
    }
}

/// Builder for [`DistributionConfig`].
#[derive(Debug, Clone, Default)]
pub struct DistributionConfigBuilder {
    packs: Vec<PackConfigNode>,
}

impl DistributionConfigBuilder {
    pub fn add_pack(mut self, pack: PackConfigNode) -> Self {
        self.packs.push(pack);
        self
    }

    pub fn push(&mut self, pack: PackConfigNode) -> &mut Self {
        self.packs.push(pack);
        self
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    pub fn build(self) -> DistributionConfig {
        DistributionConfig { packs: self.packs }
    }
}
