//! Per-producer resolution state.

use std::fmt;
use std::sync::Arc;

use renov8_core::location::PackLocation;
use renov8_core::pack::Pack;
use renov8_core::version::PackVersion;

/// Index of a [`ProducerNode`] in the resolver's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Status flags carried by a producer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// Emitted by the ordering pass. Permanent once set during that pass.
    Ordered,
    /// Moved to a newer version than declared. Permanent for the run.
    Updated,
    /// On the path currently being expanded. Transient: always cleared by
    /// the pass that set it.
    Visited,
}

/// One boolean per [`Flag`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeFlags {
    ordered: bool,
    updated: bool,
    visited: bool,
}

impl NodeFlags {
    fn slot(&mut self, flag: Flag) -> &mut bool {
        match flag {
            Flag::Ordered => &mut self.ordered,
            Flag::Updated => &mut self.updated,
            Flag::Visited => &mut self.visited,
        }
    }

    /// Set `flag`. Returns `false` if it was already set.
    pub fn set(&mut self, flag: Flag) -> bool {
        !std::mem::replace(self.slot(flag), true)
    }

    pub fn clear(&mut self, flag: Flag) {
        *self.slot(flag) = false;
    }

    pub fn has(&self, flag: Flag) -> bool {
        match flag {
            Flag::Ordered => self.ordered,
            Flag::Updated => self.updated,
            Flag::Visited => self.visited,
        }
    }
}

/// Resolution state of a single producer.
///
/// The spec stays `None` for root-level transitive entries until something
/// actually depends on them; see [`ProducerNode::is_loaded`].
#[derive(Debug, Clone)]
pub struct ProducerNode {
    location: PackLocation,
    /// Version of the declaration that created the node, before any update.
    declared: PackVersion,
    spec: Option<Arc<Pack>>,
    dependencies: Vec<Option<NodeId>>,
    flags: NodeFlags,
}

impl ProducerNode {
    pub fn new(location: PackLocation) -> Self {
        Self {
            declared: location.version.clone(),
            location,
            spec: None,
            dependencies: Vec::new(),
            flags: NodeFlags::default(),
        }
    }

    pub fn location(&self) -> &PackLocation {
        &self.location
    }

    pub fn producer(&self) -> &str {
        &self.location.producer
    }

    /// The version first declared for this producer. Differs from
    /// `location().version` only when the node was updated.
    pub fn declared_version(&self) -> &PackVersion {
        &self.declared
    }

    /// Whether a declaration at `version` can share this node: it names
    /// either the declared or the resolved version.
    pub fn accepts(&self, version: &PackVersion) -> bool {
        *version == self.declared || *version == self.location.version
    }

    pub(crate) fn set_location(&mut self, location: PackLocation) {
        self.location = location;
    }

    pub fn spec(&self) -> Option<&Pack> {
        self.spec.as_deref()
    }

    pub(crate) fn spec_arc(&self) -> Option<Arc<Pack>> {
        self.spec.clone()
    }

    /// Attach the resolved spec and open one unresolved slot per declared
    /// dependency. Called at most once per node.
    pub fn set_spec(&mut self, pack: Pack) {
        debug_assert!(self.spec.is_none(), "spec of {} set twice", self.location);
        self.dependencies = vec![None; pack.dependencies.len()];
        self.spec = Some(Arc::new(pack));
    }

    pub fn is_loaded(&self) -> bool {
        self.spec.is_some()
    }

    pub fn set_flag(&mut self, flag: Flag) -> bool {
        self.flags.set(flag)
    }

    pub fn clear_flag(&mut self, flag: Flag) {
        self.flags.clear(flag);
    }

    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.has(flag)
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Dependency slots in declaration order; `None` is not wired yet.
    pub fn dependency_slots(&self) -> &[Option<NodeId>] {
        &self.dependencies
    }

    /// Wired dependencies in slot order.
    pub fn dependencies(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.dependencies.iter().filter_map(|d| *d)
    }

    pub(crate) fn set_dependency(&mut self, slot: usize, id: NodeId) {
        if let Some(s) = self.dependencies.get_mut(slot) {
            *s = Some(id);
        }
    }

    /// Wire `id` into the first unresolved slot. Returns the slot used.
    pub(crate) fn fill_next_slot(&mut self, id: NodeId) -> Option<usize> {
        let slot = self.dependencies.iter().position(Option::is_none)?;
        self.dependencies[slot] = Some(id);
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renov8_core::config::PackConfigNode;

    fn loc(producer: &str) -> PackLocation {
        PackLocation::new("test", producer, "1.0")
    }

    #[test]
    fn set_flag_reports_previous_state() {
        let mut node = ProducerNode::new(loc("a"));
        assert!(!node.has_flag(Flag::Visited));
        assert!(node.set_flag(Flag::Visited));
        assert!(!node.set_flag(Flag::Visited));
        assert!(node.has_flag(Flag::Visited));
        assert!(!node.has_flag(Flag::Ordered));
        node.clear_flag(Flag::Visited);
        assert!(!node.has_flag(Flag::Visited));
        assert!(node.set_flag(Flag::Visited));
    }

    #[test]
    fn flags_are_independent() {
        let mut flags = NodeFlags::default();
        flags.set(Flag::Updated);
        flags.set(Flag::Ordered);
        flags.clear(Flag::Ordered);
        assert!(flags.has(Flag::Updated));
        assert!(!flags.has(Flag::Ordered));
        assert!(!flags.has(Flag::Visited));
    }

    #[test]
    fn updated_node_accepts_declared_and_resolved_versions() {
        let mut node = ProducerNode::new(loc("a"));
        node.set_location(loc("a").with_version("2.0"));
        assert_eq!(node.declared_version().as_str(), "1.0");
        assert_eq!(node.location().version.as_str(), "2.0");
        assert!(node.accepts(&PackVersion::from("1.0")));
        assert!(node.accepts(&PackVersion::from("2.0")));
        assert!(!node.accepts(&PackVersion::from("3.0")));
    }

    #[test]
    fn set_spec_opens_slots() {
        let mut node = ProducerNode::new(loc("a"));
        assert!(!node.is_loaded());
        assert!(node.dependency_slots().is_empty());

        node.set_spec(Pack::new(
            loc("a"),
            vec![
                PackConfigNode::direct(loc("b")),
                PackConfigNode::direct(loc("c")),
            ],
        ));
        assert!(node.is_loaded());
        assert_eq!(node.dependency_slots(), &[None, None]);
        assert_eq!(node.dependencies().count(), 0);
    }

    #[test]
    fn fill_next_slot_skips_wired_slots() {
        let mut node = ProducerNode::new(loc("a"));
        node.set_spec(Pack::new(
            loc("a"),
            vec![
                PackConfigNode::direct(loc("b")),
                PackConfigNode::direct(loc("c")),
                PackConfigNode::direct(loc("d")),
            ],
        ));
        node.set_dependency(1, NodeId(7));
        assert_eq!(node.fill_next_slot(NodeId(3)), Some(0));
        assert_eq!(node.fill_next_slot(NodeId(4)), Some(2));
        assert_eq!(node.fill_next_slot(NodeId(5)), None);
        let wired: Vec<NodeId> = node.dependencies().collect();
        assert_eq!(wired, vec![NodeId(3), NodeId(7), NodeId(4)]);
    }
}
