//! Resolution engine: walks the declared pack tree depth-first, materializing
//! one [`ProducerNode`] per producer, enforcing a single version per producer
//! and applying latest-version updates.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use renov8_core::config::{DistributionConfig, PackConfigNode};
use renov8_core::location::PackLocation;
use renov8_core::pack::Pack;

use crate::errors::{ResolveError, ResolveResult};
use crate::node::{Flag, NodeId, ProducerNode};
use crate::repository::PackRepository;

/// A fully resolved distribution.
///
/// Built once from a [`DistributionConfig`]; afterwards it is read-only and
/// its queries memoize their results.
#[derive(Debug)]
pub struct PackResolver {
    pub(crate) config: DistributionConfig,
    pub(crate) nodes: Vec<ProducerNode>,
    pub(crate) index: HashMap<String, NodeId>,
    pub(crate) updated: usize,
    pub(crate) ordered: OnceLock<Vec<NodeId>>,
    pub(crate) reconciled: OnceLock<DistributionConfig>,
}

/// Mutable state of a single resolution run.
struct Session<'r, R: ?Sized> {
    repository: &'r R,
    nodes: Vec<ProducerNode>,
    index: HashMap<String, NodeId>,
    update_candidates: HashSet<String>,
    /// Nodes whose dependencies are still to be expanded.
    frontier: Vec<NodeId>,
    updated: usize,
}

impl PackResolver {
    /// Resolve `config` against `repository`.
    ///
    /// Producers named in `update_candidates` are moved to the latest
    /// version the repository reports for them.
    pub fn new<R, I, S>(
        repository: &R,
        config: DistributionConfig,
        update_candidates: I,
    ) -> ResolveResult<Self>
    where
        R: PackRepository + ?Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !config.has_packs() {
            return Err(ResolveError::EmptyConfig);
        }

        let mut session = Session {
            repository,
            nodes: Vec::new(),
            index: HashMap::new(),
            update_candidates: update_candidates.into_iter().map(Into::into).collect(),
            frontier: Vec::new(),
            updated: 0,
        };
        session.resolve_level(None, &config.packs)?;

        // Root-level placeholders nobody referenced were never on the frontier.
        for node in &mut session.nodes {
            node.clear_flag(Flag::Visited);
        }

        tracing::debug!(
            "Resolved {} producers ({} updated)",
            session.nodes.len(),
            session.updated
        );

        Ok(Self {
            config,
            nodes: session.nodes,
            index: session.index,
            updated: session.updated,
            ordered: OnceLock::new(),
            reconciled: OnceLock::new(),
        })
    }

    /// Resolve with no update candidates.
    pub fn resolve<R>(repository: &R, config: DistributionConfig) -> ResolveResult<Self>
    where
        R: PackRepository + ?Sized,
    {
        Self::new(repository, config, std::iter::empty::<String>())
    }

    /// The config this resolver was built from.
    pub fn original_config(&self) -> &DistributionConfig {
        &self.config
    }

    /// Node for `producer`, if it was encountered during resolution.
    pub fn node(&self, producer: &str) -> Option<&ProducerNode> {
        self.index.get(producer).map(|id| &self.nodes[id.0])
    }

    /// All nodes in discovery order.
    pub fn nodes(&self) -> &[ProducerNode] {
        &self.nodes
    }

    pub(crate) fn node_at(&self, id: NodeId) -> &ProducerNode {
        &self.nodes[id.0]
    }

    /// The location `producer` resolved to, after any update.
    pub fn resolved_location(&self, producer: &str) -> Option<&PackLocation> {
        self.node(producer).map(ProducerNode::location)
    }

    /// Number of distinct producers encountered, loaded or not.
    pub fn producer_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of producers whose spec was actually resolved.
    pub fn loaded_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_loaded()).count()
    }

    /// Number of producers moved to a newer version.
    pub fn updated_count(&self) -> usize {
        self.updated
    }

    /// Hand every loaded pack to `handler`, stopping at the first error.
    ///
    /// Packs are visited in discovery order, which is not an install order;
    /// use [`PackResolver::packs_in_order`] when dependencies must come first.
    pub fn handle_packs<F, E>(&self, mut handler: F) -> Result<(), E>
    where
        F: FnMut(&Pack) -> Result<(), E>,
    {
        for pack in self.nodes.iter().filter_map(ProducerNode::spec) {
            handler(pack)?;
        }
        Ok(())
    }
}

impl<R: PackRepository + ?Sized> Session<'_, R> {
    fn resolve_level(
        &mut self,
        parent: Option<NodeId>,
        configs: &[PackConfigNode],
    ) -> ResolveResult<()> {
        let frontier_start = self.frontier.len();

        for (i, config) in configs.iter().enumerate() {
            let producer = config.producer();
            let existing = self.index.get(producer).copied();
            let Some(id) = existing else {
                self.add_node(parent, config)?;
                continue;
            };

            let node = &self.nodes[id.0];
            if node.has_flag(Flag::Visited) {
                if node.is_loaded() {
                    if node.location().version != config.location.version {
                        tracing::debug!(
                            "{} overrides {} declared deeper in the tree",
                            node.location(),
                            config.location
                        );
                    }
                    self.wire(parent, i, id);
                } else {
                    // Root-level transitive placeholder that is now needed.
                    self.materialize(id)?;
                }
            } else if node.accepts(&config.location.version) {
                self.wire(parent, i, id);
            } else {
                return Err(ResolveError::VersionConflict {
                    producer: producer.to_string(),
                    existing: node.location().version.clone(),
                    conflicting: config.location.version.clone(),
                });
            }
        }

        let frontier_end = self.frontier.len();
        for pos in frontier_start..frontier_end {
            let child = self.frontier[pos];
            if let Some(spec) = self.nodes[child.0].spec_arc() {
                self.resolve_level(Some(child), &spec.dependencies)?;
            }
            if let Some(parent) = parent {
                self.nodes[parent.0].fill_next_slot(child);
            }
        }

        while self.frontier.len() > frontier_start {
            if let Some(id) = self.frontier.pop() {
                self.nodes[id.0].clear_flag(Flag::Visited);
            }
        }
        Ok(())
    }

    fn add_node(&mut self, parent: Option<NodeId>, config: &PackConfigNode) -> ResolveResult<()> {
        let mut node = ProducerNode::new(config.location.clone());

        if self.update_candidates.contains(config.producer()) {
            let latest = self.repository.latest_version(&config.location)?;
            if latest != config.location.version {
                tracing::info!("Updating {} to {}", config.location, latest);
                node.set_location(config.location.with_version(latest));
                node.set_flag(Flag::Updated);
                self.updated += 1;
            }
        }
        node.set_flag(Flag::Visited);

        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.index.insert(config.producer().to_string(), id);

        if parent.is_some() || !config.transitive {
            self.materialize(id)?;
        } else {
            tracing::debug!("Deferring transitive {}", config.location);
        }
        Ok(())
    }

    /// Fetch the spec of node `id` and queue it for expansion.
    fn materialize(&mut self, id: NodeId) -> ResolveResult<()> {
        let node = &mut self.nodes[id.0];
        tracing::debug!("Resolving {}", node.location());
        let pack = self.repository.resolve(node.location())?;
        node.set_spec(pack);
        self.frontier.push(id);
        Ok(())
    }

    fn wire(&mut self, parent: Option<NodeId>, slot: usize, id: NodeId) {
        if let Some(parent) = parent {
            self.nodes[parent.0].set_dependency(slot, id);
        }
    }
}
