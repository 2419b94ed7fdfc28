//! Core data types for renov8.
//!
//! This crate defines the immutable values the resolver works on: pack
//! versions, pack locations, resolved pack specs, and the declared
//! distribution config tree with its builders.
//!
//! This crate is intentionally free of I/O.

pub mod config;
pub mod location;
pub mod pack;
pub mod version;
