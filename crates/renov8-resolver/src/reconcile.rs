//! Rebuilds the distribution config so that it records the versions
//! producers were updated to.

use renov8_core::config::{DistributionConfig, PackConfigNode};

use crate::errors::{ResolveError, ResolveResult};
use crate::node::{Flag, NodeFlags};
use crate::resolver::PackResolver;

impl PackResolver {
    /// Whether any producer was moved to a newer version.
    pub fn is_config_updated(&self) -> bool {
        self.updated > 0
    }

    /// The distribution config reflecting this resolution.
    ///
    /// Without updates this is the original config. Otherwise updated
    /// top-level entries carry their new location, unreferenced transitive
    /// entries are dropped, and updated producers that only occur nested in
    /// the tree are appended as transitive entries. Memoized.
    pub fn config(&self) -> ResolveResult<&DistributionConfig> {
        if self.updated == 0 {
            return Ok(&self.config);
        }
        if let Some(config) = self.reconciled.get() {
            return Ok(config);
        }
        let config = self.reconcile()?;
        Ok(self.reconciled.get_or_init(|| config))
    }

    fn reconcile(&self) -> ResolveResult<DistributionConfig> {
        // Visited marks producers already placed in the new config.
        let mut flags: Vec<NodeFlags> = self.nodes.iter().map(|n| n.flags()).collect();
        let mut placed = 0usize;
        let mut builder = DistributionConfig::builder();

        for pack in &self.config.packs {
            let Some(&id) = self.index.get(pack.producer()) else {
                continue;
            };
            let node = self.node_at(id);
            let updated = node.has_flag(Flag::Updated);

            if pack.transitive {
                if !node.is_loaded() {
                    if updated && flags[id.0].set(Flag::Visited) {
                        tracing::debug!("Dropping unreferenced transitive {}", node.location());
                        placed += 1;
                    }
                    continue;
                }
                if !updated {
                    builder.push(pack.clone());
                    continue;
                }
                builder.push(PackConfigNode::transitive(node.location().clone()));
            } else {
                if !updated {
                    builder.push(pack.clone());
                    continue;
                }
                builder.push(PackConfigNode::direct(node.location().clone()));
            }
            if flags[id.0].set(Flag::Visited) {
                placed += 1;
            }
        }

        if placed < self.updated {
            for (i, node) in self.nodes.iter().enumerate() {
                if placed == self.updated {
                    break;
                }
                // Unloaded updated nodes are unreferenced root-level
                // placeholders, already counted when the walk dropped them.
                if !node.is_loaded() || !node.has_flag(Flag::Updated) {
                    continue;
                }
                if flags[i].set(Flag::Visited) {
                    builder.push(PackConfigNode::transitive(node.location().clone()));
                    placed += 1;
                }
            }
        }

        if placed != self.updated {
            return Err(ResolveError::InternalConsistency {
                message: format!(
                    "placed {placed} updated producers in the config, expected {}",
                    self.updated
                ),
            });
        }
        Ok(builder.build())
    }
}
