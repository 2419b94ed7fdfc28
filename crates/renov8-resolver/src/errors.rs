use miette::Diagnostic;
use renov8_core::location::PackLocation;
use renov8_core::version::PackVersion;
use thiserror::Error;

/// Failure reported by a [`PackRepository`](crate::repository::PackRepository).
#[derive(Debug, Error, Diagnostic)]
pub enum RepositoryError {
    /// The repository has no pack at the requested location.
    #[error("Pack not found: {location}")]
    #[diagnostic(help("Check the repository id, producer and version of the pack"))]
    NotFound { location: PackLocation },

    /// Any other repository failure (I/O, malformed metadata, ...).
    #[error("Repository error: {message}")]
    Repository { message: String },
}

/// Unified error type for pack resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    /// The distribution config declares no packs.
    #[error("Distribution config does not declare any packs")]
    #[diagnostic(help("Add at least one pack to the distribution config"))]
    EmptyConfig,

    /// The same producer is required at two different versions.
    #[error("Version conflict for {producer}: {existing} vs {conflicting}")]
    #[diagnostic(help(
        "Pin {producer} to a single version at the top level of the distribution config"
    ))]
    VersionConflict {
        producer: String,
        existing: PackVersion,
        conflicting: PackVersion,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Repository(#[from] RepositoryError),

    /// Resolver bookkeeping went out of sync.
    #[error("Internal consistency error: {message}")]
    InternalConsistency { message: String },
}

/// Convenience alias for results of resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
