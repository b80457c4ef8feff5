//! Error types for catalog resolution, loading and selection.

use std::io;

/// Errors produced while resolving resources, loading catalogs
/// or selecting a [`UserAgent`] from them.
///
/// Every error that relates to a specific resource carries
/// a human readable location of it (a filesystem path,
/// an `archive!/entry` path or an `embedded:` path).
///
/// [`UserAgent`]: crate::UserAgent
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The resource locator uses a scheme that is not supported.
    #[error("unsupported resource scheme '{scheme}' in locator '{locator}'")]
    UnsupportedScheme { locator: String, scheme: String },

    /// The resource root (directory or archive) does not exist.
    #[error("resource root not found: {path}")]
    ResourceRootNotFound { path: String },

    /// The logical catalog directory does not exist within the resource root.
    #[error("resource directory not found: {dir} (in {root})")]
    DirectoryNotFound { dir: String, root: String },

    /// A catalog file could not be located when opened.
    #[error("resource not found: {path}")]
    ResourceNotFound { path: String },

    /// I/O failure while accessing a resource.
    #[error("failed to read resource {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Failure while reading a zip archive.
    #[error("failed to read archive resource {path}")]
    Archive {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// A catalog file is not a valid JSON array of user agents.
    #[error("failed to parse user agents from {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A catalog file is zero-length or contains an empty array.
    #[error("user agent resource is empty: {path}")]
    EmptyResource { path: String },

    /// A catalog directory contains no catalog files at all.
    #[error("no user agent files found in directory: {dir}")]
    NoCatalogFiles { dir: String },

    /// An unfiltered selection was requested from an empty pool.
    #[error("no user agents loaded for the '{pool}' pool")]
    EmptyCatalog { pool: &'static str },

    /// A device tag that is not a known [`DeviceKind`].
    ///
    /// [`DeviceKind`]: crate::DeviceKind
    #[error("invalid device type: {value}")]
    InvalidDevice { value: String },
}

/// Result type used throughout this crate, defaulting to [`CatalogError`].
pub type Result<T, E = CatalogError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_messages_identify_resource() {
        let err = CatalogError::DirectoryNotFound {
            dir: "latest".to_owned(),
            root: "/opt/catalogs".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "resource directory not found: latest (in /opt/catalogs)"
        );

        let err = CatalogError::EmptyResource {
            path: "random/windows.json".to_owned(),
        };
        assert!(err.to_string().contains("random/windows.json"));
    }

    #[test]
    fn test_error_source_is_preserved() {
        let source = serde_json::from_str::<Vec<u8>>("").unwrap_err();
        let err = CatalogError::Parse {
            path: "random/linux.json".to_owned(),
            source,
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("random/linux.json"));
    }
}
