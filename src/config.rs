use serde::{Deserialize, Serialize};
use std::env;

use crate::resource::EMBEDDED_LOCATOR;

/// Default logical directory of the general user agent pool.
pub const DEFAULT_RANDOM_DIR: &str = "random";

/// Default logical directory of the latest user agent pool.
pub const DEFAULT_LATEST_DIR: &str = "latest";

/// Environment variable overwriting [`CatalogConfig::resources`].
pub const ENV_RESOURCES: &str = "UA_CATALOG_RESOURCES";
/// Environment variable overwriting [`CatalogConfig::random_dir`].
pub const ENV_RANDOM_DIR: &str = "UA_CATALOG_RANDOM_DIR";
/// Environment variable overwriting [`CatalogConfig::latest_dir`].
pub const ENV_LATEST_DIR: &str = "UA_CATALOG_LATEST_DIR";

/// Configuration of where catalogs are loaded from.
///
/// It can be embedded in the configuration file of a host application
/// (all fields are optional) or be build programmatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Resource locator, resolved using [`Resources::resolve`].
    ///
    /// [`Resources::resolve`]: crate::resource::Resources::resolve
    pub resources: String,
    /// Logical directory of the general user agent pool.
    pub random_dir: String,
    /// Logical directory of the latest user agent pool.
    pub latest_dir: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            resources: EMBEDDED_LOCATOR.to_owned(),
            random_dir: DEFAULT_RANDOM_DIR.to_owned(),
            latest_dir: DEFAULT_LATEST_DIR.to_owned(),
        }
    }
}

impl CatalogConfig {
    /// Create a default [`CatalogConfig`], using the bundled catalogs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`CatalogConfig`] with defaults overwritten by
    /// the `UA_CATALOG_*` environment variables, if defined.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create a [`CatalogConfig`] with defaults overwritten by
    /// the values returned by `lookup` for the `UA_CATALOG_*` keys.
    ///
    /// Empty values are ignored.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();
        if let Some(resources) = value(ENV_RESOURCES) {
            cfg.resources = resources;
        }
        if let Some(dir) = value(ENV_RANDOM_DIR) {
            cfg.random_dir = dir;
        }
        if let Some(dir) = value(ENV_LATEST_DIR) {
            cfg.latest_dir = dir;
        }
        cfg
    }

    /// Set the resource locator to load catalogs from.
    #[must_use]
    pub fn with_resources(mut self, locator: impl Into<String>) -> Self {
        self.resources = locator.into();
        self
    }

    /// Set the resource locator to load catalogs from.
    pub fn set_resources(&mut self, locator: impl Into<String>) -> &mut Self {
        self.resources = locator.into();
        self
    }

    /// Set the logical directory of the general user agent pool.
    #[must_use]
    pub fn with_random_dir(mut self, dir: impl Into<String>) -> Self {
        self.random_dir = dir.into();
        self
    }

    /// Set the logical directory of the general user agent pool.
    pub fn set_random_dir(&mut self, dir: impl Into<String>) -> &mut Self {
        self.random_dir = dir.into();
        self
    }

    /// Set the logical directory of the latest user agent pool.
    #[must_use]
    pub fn with_latest_dir(mut self, dir: impl Into<String>) -> Self {
        self.latest_dir = dir.into();
        self
    }

    /// Set the logical directory of the latest user agent pool.
    pub fn set_latest_dir(&mut self, dir: impl Into<String>) -> &mut Self {
        self.latest_dir = dir.into();
        self
    }
}
