use rand::seq::IndexedRandom as _;

use crate::{
    CatalogConfig, CatalogError, DeviceKind, Result, UserAgent,
    catalog::{parse_catalog_strict, pick_random},
    config::{DEFAULT_LATEST_DIR, DEFAULT_RANDOM_DIR},
    resource::{CATALOG_FILE_EXTENSION, CatalogFile, Resources},
};

/// Provides random [`UserAgent`]s by reading a catalog file per query.
///
/// Nothing is cached: each query lists and reads the resources again,
/// so changes to loose catalog files are picked up immediately.
///
/// Unlike [`UserAgentProvider`] this provider is strict. Every query
/// fails when the catalog file it reads is missing, zero-length,
/// an empty array or invalid.
///
/// Device queries read the `<device>.json` catalog file
/// (e.g. `random/windows.json`) and only consider the records in it
/// that are tagged with that device.
///
/// [`UserAgentProvider`]: crate::UserAgentProvider
#[derive(Debug)]
pub struct OnDemandProvider {
    resources: Resources,
    random_dir: String,
    latest_dir: String,
}

impl OnDemandProvider {
    /// Create an [`OnDemandProvider`] reading from the `random` and `latest`
    /// directories of the given [`Resources`].
    #[must_use]
    pub fn new(resources: Resources) -> Self {
        Self {
            resources,
            random_dir: DEFAULT_RANDOM_DIR.to_owned(),
            latest_dir: DEFAULT_LATEST_DIR.to_owned(),
        }
    }

    /// Create an [`OnDemandProvider`] as described by the given [`CatalogConfig`].
    pub fn try_from_config(cfg: &CatalogConfig) -> Result<Self> {
        let resources = Resources::resolve(&cfg.resources)?;
        Ok(Self {
            resources,
            random_dir: cfg.random_dir.clone(),
            latest_dir: cfg.latest_dir.clone(),
        })
    }

    /// The [`Resources`] read by this provider.
    #[must_use]
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Pick a random [`UserAgent`] from a random catalog file
    /// of the general pool.
    pub fn random_agent(&self) -> Result<UserAgent> {
        self.random_from_dir(&self.random_dir)
    }

    /// Pick a random [`UserAgent`] from a random catalog file
    /// of the latest pool.
    pub fn random_latest_agent(&self) -> Result<UserAgent> {
        self.random_from_dir(&self.latest_dir)
    }

    /// Pick a random [`UserAgent`] for the given [`DeviceKind`]
    /// from the general pool.
    pub fn random_agent_for_device(&self, device: DeviceKind) -> Result<UserAgent> {
        self.random_from_device_file(&self.random_dir, device)
    }

    /// Pick a random [`UserAgent`] for the given [`DeviceKind`]
    /// from the latest pool.
    pub fn random_latest_agent_for_device(&self, device: DeviceKind) -> Result<UserAgent> {
        self.random_from_device_file(&self.latest_dir, device)
    }

    fn random_from_dir(&self, dir: &str) -> Result<UserAgent> {
        let files = self.resources.list_catalog_files(dir)?;
        let Some(file) = files.choose(&mut rand::rng()) else {
            return Err(CatalogError::NoCatalogFiles {
                dir: dir.to_owned(),
            });
        };
        self.random_from_file(file, None)
    }

    fn random_from_device_file(&self, dir: &str, device: DeviceKind) -> Result<UserAgent> {
        let file_name = format!("{device}{CATALOG_FILE_EXTENSION}");
        let file = self.resources.catalog_file(dir, &file_name)?;
        self.random_from_file(&file, Some(device))
    }

    fn random_from_file(&self, file: &CatalogFile, device: Option<DeviceKind>) -> Result<UserAgent> {
        let bytes = self.resources.read(file)?;
        let agents = parse_catalog_strict(&bytes, file.location())?;
        tracing::trace!(
            catalog.location = %file,
            catalog.records = agents.len(),
            "read user agents on demand"
        );
        pick_random(&agents, device)
            .cloned()
            .ok_or_else(|| CatalogError::EmptyResource {
                path: file.location().to_owned(),
            })
    }
}
