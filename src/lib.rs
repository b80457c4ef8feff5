//! Catalogs of real-world User Agent (UA) strings, with uniform random selection.
//!
//! This crate ships catalogs of `User-Agent` header values, each tagged with
//! the [`DeviceKind`] it was observed on, and provides random selection over them:
//!
//! - [`UserAgentProvider`] loads the catalogs once and serves every query from memory;
//! - [`OnDemandProvider`] reads a catalog file per query, failing loudly on
//!   missing or empty catalogs.
//!
//! Two pools are available: all user agents (the `random` catalogs merged with
//! the `latest` ones) and only the latest user agents.
//!
//! # Catalogs
//!
//! A catalog is a JSON array of records, stored in a logical directory
//! (`random/` or `latest/`), usually one file per device:
//!
//! ```json
//! [
//!   {
//!     "useragent": "Mozilla/5.0 (X11; Linux x86_64; rv:133.0) Gecko/20100101 Firefox/133.0",
//!     "device": "linux"
//!   }
//! ]
//! ```
//!
//! Catalogs can be read from loose files, from a zip archive or from the
//! catalogs compiled into this crate (feature `embed-catalogs`, enabled by default).
//! See [`Resources::resolve`](resource::Resources::resolve) for how a locator
//! selects one of these modes, and [`CatalogConfig`] for how to configure it.
//!
//! # Example
//!
//! ```
//! use ua_catalog::{DeviceKind, UserAgentProvider};
//!
//! let provider = UserAgentProvider::try_new().unwrap();
//!
//! let ua = provider.random_agent().unwrap();
//! assert!(!ua.header_str().is_empty());
//!
//! let ua = provider.random_agent_for_device(DeviceKind::Android).unwrap();
//! assert_eq!(ua.device(), DeviceKind::Android);
//! ```
//!
//! # Remarks
//!
//! User agent strings are handed back verbatim. They are not parsed nor validated,
//! and the [`DeviceKind`] is the tag found in the catalog, not one derived from the string.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod ua;
pub use ua::*;

mod error;
pub use error::{CatalogError, Result};

mod config;
pub use config::{
    CatalogConfig, DEFAULT_LATEST_DIR, DEFAULT_RANDOM_DIR, ENV_LATEST_DIR, ENV_RANDOM_DIR,
    ENV_RESOURCES,
};

pub mod catalog;
pub mod resource;

pub mod provider;
pub use provider::{OnDemandProvider, UserAgentProvider};
