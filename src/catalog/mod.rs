//! Catalog loading: turning catalog files into deduplicated [`AgentSet`]s.
//!
//! A catalog file is a JSON array of user agent objects:
//!
//! ```json
//! [
//!   { "useragent": "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ...", "device": "windows" }
//! ]
//! ```

use crate::{
    CatalogError, Result, UserAgent,
    resource::{CatalogFile, Resources},
};

mod select;
pub use select::pick_random;

/// Deduplicated set of [`UserAgent`]s.
///
/// Iteration order is unspecified.
pub type AgentSet = ahash::HashSet<UserAgent>;

/// Parse the content of a catalog file.
///
/// `location` is only used to identify the file in case of an error.
/// Invalid JSON (including zero-length content) and unknown device
/// tags result in [`CatalogError::Parse`].
pub fn parse_catalog(bytes: &[u8], location: &str) -> Result<Vec<UserAgent>> {
    serde_json::from_slice(bytes).map_err(|source| CatalogError::Parse {
        path: location.to_owned(),
        source,
    })
}

/// Parse the content of a catalog file that is required to hold
/// at least one [`UserAgent`].
///
/// On top of the errors of [`parse_catalog`], zero-length content
/// and an empty JSON array result in [`CatalogError::EmptyResource`].
pub fn parse_catalog_strict(bytes: &[u8], location: &str) -> Result<Vec<UserAgent>> {
    if bytes.is_empty() {
        return Err(CatalogError::EmptyResource {
            path: location.to_owned(),
        });
    }
    let agents = parse_catalog(bytes, location)?;
    if agents.is_empty() {
        return Err(CatalogError::EmptyResource {
            path: location.to_owned(),
        });
    }
    Ok(agents)
}

/// Read and parse a single catalog file.
pub fn load_catalog_file(resources: &Resources, file: &CatalogFile) -> Result<Vec<UserAgent>> {
    let bytes = resources.read(file)?;
    parse_catalog(&bytes, file.location())
}

/// Load all catalog files found in the logical directory `dir`
/// into the `target` set, returning the amount of records read.
///
/// The returned count includes duplicates, the set does not.
/// Any file that fails to load aborts the whole operation.
pub fn load_catalog_dir(resources: &Resources, dir: &str, target: &mut AgentSet) -> Result<usize> {
    let files = resources.list_catalog_files(dir)?;
    let mut total = 0;
    for file in &files {
        let agents = load_catalog_file(resources, file)?;
        tracing::debug!(
            catalog.dir = %dir,
            catalog.location = %file,
            catalog.records = agents.len(),
            "loaded user agents from catalog file"
        );
        total += agents.len();
        target.extend(agents);
    }
    Ok(total)
}
