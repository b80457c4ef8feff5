//! Providers handing out random [`UserAgent`]s from catalogs.
//!
//! - [`UserAgentProvider`] loads all catalogs eagerly at construction and
//!   serves every query from memory. Filtered queries without a match
//!   return `None`.
//! - [`OnDemandProvider`] reads a catalog file per query and is strict:
//!   a missing, zero-length or empty catalog file is an error.
//!
//! [`UserAgent`]: crate::UserAgent

mod eager;
pub use eager::UserAgentProvider;

mod on_demand;
pub use on_demand::OnDemandProvider;
