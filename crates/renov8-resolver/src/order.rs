//! Install ordering: dependencies first, otherwise in declaration order.

use renov8_core::pack::Pack;

use crate::node::{Flag, NodeFlags, NodeId};
use crate::resolver::PackResolver;

impl PackResolver {
    /// Loaded packs ordered so that every dependency precedes its dependents.
    ///
    /// Independent packs keep the order of the top-level entries they are
    /// reachable from, depth-first. Computed once and memoized.
    pub fn packs_in_order(&self) -> Vec<&Pack> {
        self.ordered_ids()
            .iter()
            .filter_map(|&id| self.node_at(id).spec())
            .collect()
    }

    /// Producer names in install order.
    pub fn producers_in_order(&self) -> Vec<&str> {
        self.ordered_ids()
            .iter()
            .map(|&id| self.node_at(id).producer())
            .collect()
    }

    fn ordered_ids(&self) -> &[NodeId] {
        self.ordered.get_or_init(|| self.compute_order())
    }

    /// Runs on a scratch copy of the node flags so the resolver stays
    /// shareable behind `&self`.
    fn compute_order(&self) -> Vec<NodeId> {
        let mut flags: Vec<NodeFlags> = self.nodes.iter().map(|n| n.flags()).collect();
        let mut out = Vec::with_capacity(self.nodes.len());

        // Transitive top-level entries are only ordered as someone's dependency.
        for pack in self.config.packs.iter().filter(|p| !p.transitive) {
            if let Some(&id) = self.index.get(pack.producer()) {
                self.visit(id, &mut flags, &mut out);
            }
        }
        out
    }

    fn visit(&self, id: NodeId, flags: &mut [NodeFlags], out: &mut Vec<NodeId>) {
        let state = &mut flags[id.0];
        if state.has(Flag::Ordered) {
            return;
        }
        if !state.set(Flag::Visited) {
            tracing::warn!(
                "Dependency cycle through {}; ordering it before some of its dependencies",
                self.node_at(id).location()
            );
            return;
        }

        let node = self.node_at(id);
        for dep in node.dependencies() {
            self.visit(dep, flags, out);
        }

        let state = &mut flags[id.0];
        state.set(Flag::Ordered);
        state.clear(Flag::Visited);
        if node.is_loaded() {
            out.push(id);
        }
    }
}
