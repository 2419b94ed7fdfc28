//! Hierarchical pack resolution: one version per producer across the whole
//! dependency graph, optional refresh of selected producers to their latest
//! version, conflict detection, install ordering and config reconciliation.

pub mod errors;
pub mod graph;
pub mod node;
pub mod order;
pub mod reconcile;
pub mod repository;
pub mod resolver;

pub use errors::{RepositoryError, ResolveError, ResolveResult};
pub use repository::{MemoryRepository, PackRepository};
pub use resolver::PackResolver;
