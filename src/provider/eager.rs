use itertools::Itertools as _;
use std::fmt;

use crate::{
    CatalogConfig, CatalogError, DeviceKind, Result, UserAgent,
    catalog::{AgentSet, load_catalog_dir, pick_random},
    config::{DEFAULT_LATEST_DIR, DEFAULT_RANDOM_DIR},
    resource::Resources,
};

/// Provides random [`UserAgent`]s from catalogs loaded at construction.
///
/// Two pools are available:
///
/// - all user agents: the `random` catalogs merged with the `latest` ones;
/// - latest user agents: only the `latest` catalogs.
///
/// Both pools are deduplicated and immutable once constructed,
/// which makes the provider cheap to share between threads (e.g. in an `Arc`).
///
/// # Example
///
/// ```
/// use ua_catalog::{DeviceKind, UserAgentProvider};
///
/// let provider = UserAgentProvider::try_new().unwrap();
///
/// let ua = provider.random_agent().unwrap();
/// println!("User-Agent: {ua}");
///
/// if let Some(ua) = provider.random_latest_agent_for_device(DeviceKind::Windows) {
///     assert_eq!(ua.device(), DeviceKind::Windows);
/// }
/// ```
pub struct UserAgentProvider {
    all: AgentSet,
    latest: AgentSet,
}

impl fmt::Debug for UserAgentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAgentProvider")
            .field("all", &self.all.len())
            .field("latest", &self.latest.len())
            .finish()
    }
}

impl UserAgentProvider {
    #[cfg(feature = "embed-catalogs")]
    #[cfg_attr(docsrs, doc(cfg(feature = "embed-catalogs")))]
    /// Create a [`UserAgentProvider`] loaded with the catalogs bundled with this crate.
    pub fn try_new() -> Result<Self> {
        Self::try_from_resources(&Resources::embedded())
    }

    /// Create a [`UserAgentProvider`] as described by the given [`CatalogConfig`].
    pub fn try_from_config(cfg: &CatalogConfig) -> Result<Self> {
        let resources = Resources::resolve(&cfg.resources)?;
        Self::try_load(&resources, &cfg.random_dir, &cfg.latest_dir)
    }

    /// Create a [`UserAgentProvider`] from the `random` and `latest`
    /// directories of the given [`Resources`].
    pub fn try_from_resources(resources: &Resources) -> Result<Self> {
        Self::try_load(resources, DEFAULT_RANDOM_DIR, DEFAULT_LATEST_DIR)
    }

    /// Create a [`UserAgentProvider`] from custom logical directories
    /// of the given [`Resources`].
    ///
    /// A directory without catalog files results in an empty pool,
    /// while a missing directory or a catalog file that fails to load
    /// fails the construction as a whole.
    pub fn try_load(resources: &Resources, random_dir: &str, latest_dir: &str) -> Result<Self> {
        let mut all = AgentSet::default();
        let mut latest = AgentSet::default();

        let random_count = load_catalog_dir(resources, random_dir, &mut all)?;
        let latest_count = load_catalog_dir(resources, latest_dir, &mut latest)?;
        all.extend(latest.iter().cloned());

        tracing::debug!(
            catalog.mode = resources.mode(),
            catalog.records.random = random_count,
            catalog.records.latest = latest_count,
            catalog.unique.all = all.len(),
            catalog.unique.latest = latest.len(),
            "user agent catalogs loaded"
        );

        Ok(Self { all, latest })
    }

    /// Pick a random [`UserAgent`] from all user agents.
    ///
    /// Fails with [`CatalogError::EmptyCatalog`] only in case
    /// no user agent was loaded at all.
    pub fn random_agent(&self) -> Result<&UserAgent> {
        pick_random(&self.all, None).ok_or(CatalogError::EmptyCatalog { pool: "all" })
    }

    /// Pick a random [`UserAgent`] from the latest user agents.
    ///
    /// Fails with [`CatalogError::EmptyCatalog`] only in case
    /// no latest user agent was loaded.
    pub fn random_latest_agent(&self) -> Result<&UserAgent> {
        pick_random(&self.latest, None).ok_or(CatalogError::EmptyCatalog { pool: "latest" })
    }

    /// Pick a random [`UserAgent`] of the given [`DeviceKind`] from all user agents.
    ///
    /// Returns `None` if the catalogs contain no user agent for that device.
    #[must_use]
    pub fn random_agent_for_device(&self, device: DeviceKind) -> Option<&UserAgent> {
        pick_random(&self.all, Some(device))
    }

    /// Pick a random [`UserAgent`] of the given [`DeviceKind`] from the latest user agents.
    ///
    /// Returns `None` if the latest catalogs contain no user agent for that device.
    #[must_use]
    pub fn random_latest_agent_for_device(&self, device: DeviceKind) -> Option<&UserAgent> {
        pick_random(&self.latest, Some(device))
    }

    /// All loaded user agents, including the latest ones.
    #[must_use]
    pub fn all_agents(&self) -> &AgentSet {
        &self.all
    }

    /// The latest user agents only.
    #[must_use]
    pub fn latest_agents(&self) -> &AgentSet {
        &self.latest
    }

    /// The [`DeviceKind`]s for which at least one user agent is available, sorted.
    pub fn devices(&self) -> impl Iterator<Item = DeviceKind> + '_ {
        self.all.iter().map(UserAgent::device).unique().sorted()
    }
}
