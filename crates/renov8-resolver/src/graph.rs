//! Graph views of a resolved distribution: cycle report, dependency tree
//! rendering, and dependency paths.

use std::collections::HashSet;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::node::{NodeId, ProducerNode};
use crate::resolver::PackResolver;

impl PackResolver {
    /// The wired dependency graph; graph indices match arena indices.
    pub fn dependency_graph(&self) -> DiGraph<NodeId, ()> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.nodes.len());
        for i in 0..self.nodes.len() {
            graph.add_node(NodeId(i));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            for dep in node.dependencies() {
                graph.add_edge(NodeIndex::new(i), NodeIndex::new(dep.0), ());
            }
        }
        graph
    }

    /// Groups of producers that depend on each other in a cycle.
    ///
    /// Resolution accepts cycles and the install order breaks them
    /// arbitrarily; callers that need a strict order can reject the
    /// distribution when this is non-empty.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let graph = self.dependency_graph();
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || graph.edges(scc[0]).any(|e| e.target() == scc[0])
            })
            .map(|scc| {
                let mut producers: Vec<String> = scc
                    .iter()
                    .map(|idx| self.nodes[idx.index()].producer().to_string())
                    .collect();
                producers.sort();
                producers
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Render the dependency tree under the direct top-level entries.
    ///
    /// Each line is one dependency slot. A slot whose declaration was
    /// overridden reads `declared -> resolved version`; a pack already on the
    /// current path is marked `(cycle)` and not expanded again.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let roots: Vec<NodeId> = self
            .config
            .packs
            .iter()
            .filter(|p| !p.transitive)
            .filter_map(|p| self.index.get(p.producer()).copied())
            .collect();

        let mut tree = TreeWriter {
            resolver: self,
            max_depth,
            path: Vec::new(),
            output: String::new(),
        };
        let last = roots.len().saturating_sub(1);
        for (i, id) in roots.into_iter().enumerate() {
            let label = self.node_at(id).location().to_string();
            tree.entry(Some(id), label, "", i == last);
        }
        tree.output
    }

    /// A chain of producers leading from a direct top-level entry to
    /// `producer`, explaining why it is part of the distribution.
    pub fn find_path(&self, producer: &str) -> Option<Vec<&ProducerNode>> {
        let target = *self.index.get(producer)?;
        let mut visited = HashSet::new();
        for pack in self.config.packs.iter().filter(|p| !p.transitive) {
            let Some(&root) = self.index.get(pack.producer()) else {
                continue;
            };
            let mut path = Vec::new();
            if self.dfs_path(root, target, &mut path, &mut visited) {
                return Some(path.into_iter().map(|id| self.node_at(id)).collect());
            }
        }
        None
    }

    fn dfs_path(
        &self,
        current: NodeId,
        target: NodeId,
        path: &mut Vec<NodeId>,
        visited: &mut HashSet<NodeId>,
    ) -> bool {
        path.push(current);
        if current == target {
            return true;
        }
        // A node that did not lead to the target once never will.
        if !visited.insert(current) {
            path.pop();
            return false;
        }
        for dep in self.node_at(current).dependencies() {
            if self.dfs_path(dep, target, path, visited) {
                return true;
            }
        }
        path.pop();
        false
    }
}

/// Writes one line per dependency slot, walking the node arena depth-first.
struct TreeWriter<'a> {
    resolver: &'a PackResolver,
    max_depth: Option<usize>,
    /// Nodes between the root and the line being written.
    path: Vec<NodeId>,
    output: String,
}

impl TreeWriter<'_> {
    fn entry(&mut self, id: Option<NodeId>, label: String, indent: &str, last: bool) {
        let branch = if last { "└── " } else { "├── " };
        let Some(id) = id else {
            self.output
                .push_str(&format!("{indent}{branch}{label} (unresolved)\n"));
            return;
        };
        if self.path.contains(&id) {
            self.output
                .push_str(&format!("{indent}{branch}{label} (cycle)\n"));
            return;
        }
        self.output.push_str(&format!("{indent}{branch}{label}\n"));

        if self.max_depth.is_some_and(|max| self.path.len() + 1 >= max) {
            return;
        }
        let resolver = self.resolver;
        let node = resolver.node_at(id);
        let Some(spec) = node.spec() else {
            return;
        };

        let indent = format!("{indent}{}", if last { "    " } else { "│   " });
        let slots = node.dependency_slots();
        let last_slot = slots.len().saturating_sub(1);
        self.path.push(id);
        for (slot, (target, declared)) in slots.iter().zip(&spec.dependencies).enumerate() {
            let label = match target {
                Some(target) => {
                    let resolved = resolver.node_at(*target).location();
                    if resolved.version == declared.location.version {
                        resolved.to_string()
                    } else {
                        format!("{} -> {}", declared.location, resolved.version)
                    }
                }
                None => declared.location.to_string(),
            };
            self.entry(*target, label, &indent, slot == last_slot);
        }
        self.path.pop();
    }
}
