//! Pack repository contract and an in-memory implementation.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use renov8_core::config::PackConfigNode;
use renov8_core::location::PackLocation;
use renov8_core::pack::Pack;
use renov8_core::version::PackVersion;

use crate::errors::RepositoryError;

/// Source of pack specs and version information.
///
/// Calls may block on I/O. The resolver may ask for the same location more
/// than once, so implementations should be idempotent.
pub trait PackRepository {
    /// Fetch the full spec of the pack at `location`, including its own
    /// declared dependencies.
    fn resolve(&self, location: &PackLocation) -> Result<Pack, RepositoryError>;

    /// Latest available version of the producer at `location`.
    fn latest_version(&self, location: &PackLocation) -> Result<PackVersion, RepositoryError>;
}

impl<T: PackRepository + ?Sized> PackRepository for &T {
    fn resolve(&self, location: &PackLocation) -> Result<Pack, RepositoryError> {
        (**self).resolve(location)
    }

    fn latest_version(&self, location: &PackLocation) -> Result<PackVersion, RepositoryError> {
        (**self).latest_version(location)
    }
}

impl<T: PackRepository + ?Sized> PackRepository for Box<T> {
    fn resolve(&self, location: &PackLocation) -> Result<Pack, RepositoryError> {
        (**self).resolve(location)
    }

    fn latest_version(&self, location: &PackLocation) -> Result<PackVersion, RepositoryError> {
        (**self).latest_version(location)
    }
}

/// Repository backed by in-memory maps, keyed by `(producer, version)`.
///
/// Keeps a per-producer count of `resolve` calls, which makes it easy to
/// check which packs a resolution actually loaded.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    packs: HashMap<(String, PackVersion), Pack>,
    latest: HashMap<String, PackVersion>,
    unavailable: HashSet<String>,
    resolve_calls: Mutex<HashMap<String, usize>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pack at `location` depending on `dependencies`.
    pub fn with_pack(mut self, location: PackLocation, dependencies: Vec<PackConfigNode>) -> Self {
        self.add_pack(Pack::new(location, dependencies));
        self
    }

    /// Register the latest version reported for `producer`.
    pub fn with_latest(mut self, producer: &str, version: impl Into<PackVersion>) -> Self {
        self.latest.insert(producer.to_string(), version.into());
        self
    }

    /// Make every request for `producer` fail with a repository error.
    pub fn with_unavailable(mut self, producer: &str) -> Self {
        self.unavailable.insert(producer.to_string());
        self
    }

    fn check_available(&self, location: &PackLocation) -> Result<(), RepositoryError> {
        if self.unavailable.contains(&location.producer) {
            return Err(RepositoryError::Repository {
                message: format!("{} is unavailable", location.producer),
            });
        }
        Ok(())
    }

    pub fn add_pack(&mut self, pack: Pack) {
        let key = (pack.location.producer.clone(), pack.location.version.clone());
        self.packs.insert(key, pack);
    }

    /// How many times `resolve` was called for `producer`.
    pub fn resolve_count(&self, producer: &str) -> usize {
        let calls = self
            .resolve_calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        calls.get(producer).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

impl PackRepository for MemoryRepository {
    fn resolve(&self, location: &PackLocation) -> Result<Pack, RepositoryError> {
        {
            let mut calls = self
                .resolve_calls
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *calls.entry(location.producer.clone()).or_default() += 1;
        }
        self.check_available(location)?;
        let key = (location.producer.clone(), location.version.clone());
        match self.packs.get(&key) {
            Some(pack) => Ok(Pack::new(location.clone(), pack.dependencies.clone())),
            None => Err(RepositoryError::NotFound {
                location: location.clone(),
            }),
        }
    }

    /// Falls back to the version at `location` when no latest version was
    /// registered for the producer.
    fn latest_version(&self, location: &PackLocation) -> Result<PackVersion, RepositoryError> {
        self.check_available(location)?;
        Ok(self
            .latest
            .get(&location.producer)
            .cloned()
            .unwrap_or_else(|| location.version.clone()))
    }
}
