//! Discovery and reading of catalog resources.
//!
//! Catalogs can be packaged in different ways, each with their own
//! strategy, unified behind the [`Resources`] enum:
//!
//! - [`DirectoryResources`]: loose files below a filesystem directory;
//! - [`ArchiveResources`]: entries bundled inside a single zip archive;
//! - [`EmbeddedResources`]: a directory tree compiled into the binary
//!   (requires the `embed-catalogs` feature).
//!
//! Which strategy is used is detected from how a locator resolves,
//! see [`Resources::resolve`].

use std::{borrow::Cow, fmt, path::Path};

use crate::{CatalogError, Result};

mod fs;
pub use fs::DirectoryResources;

mod archive;
pub use archive::ArchiveResources;

#[cfg(test)]
pub(crate) use archive::test_support;

#[cfg(feature = "embed-catalogs")]
mod embedded;
#[cfg(feature = "embed-catalogs")]
#[cfg_attr(docsrs, doc(cfg(feature = "embed-catalogs")))]
pub use embedded::EmbeddedResources;

/// File extension of catalog files.
pub const CATALOG_FILE_EXTENSION: &str = ".json";

/// Locator of the catalogs bundled with this crate.
pub const EMBEDDED_LOCATOR: &str = "embedded:";

const ARCHIVE_SEPARATOR: &str = "!/";

pub(crate) fn is_catalog_file_name(name: &str) -> bool {
    name.len() > CATALOG_FILE_EXTENSION.len() && name.ends_with(CATALOG_FILE_EXTENSION)
}

/// A catalog file found within [`Resources`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogFile {
    /// logical path, e.g. `random/windows.json`
    pub(crate) key: String,
    /// human readable location, used for logging and errors
    pub(crate) location: String,
}

impl CatalogFile {
    /// The logical path of the file relative to the resource root
    /// (e.g. `random/windows.json`).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The file name (e.g. `windows.json`).
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.key
            .rsplit_once('/')
            .map_or(self.key.as_str(), |(_, name)| name)
    }

    /// Human readable location of the file, such as a full filesystem path
    /// or an `archive.zip!/random/windows.json` path.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl fmt::Display for CatalogFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.location)
    }
}

/// Catalog resources, in one of the supported packaging modes.
#[derive(Debug)]
pub enum Resources {
    /// Loose files on the filesystem.
    Directory(DirectoryResources),
    /// Files bundled in a zip archive.
    Archive(ArchiveResources),
    #[cfg(feature = "embed-catalogs")]
    #[cfg_attr(docsrs, doc(cfg(feature = "embed-catalogs")))]
    /// Files compiled into the binary.
    Embedded(EmbeddedResources),
}

impl Resources {
    /// Resolve a resource locator into [`Resources`].
    ///
    /// The packaging mode is detected from the locator:
    ///
    /// - `embedded:` (optionally followed by a sub directory) uses the
    ///   catalogs compiled into this crate;
    /// - `jar:` / `zip:` prefixed locators, as well as any locator containing
    ///   a `!/` separator (e.g. `catalogs.zip!/ua`), are opened as zip archive;
    /// - `file://` locators and bare paths are looked up on the filesystem:
    ///   a directory uses [`DirectoryResources`], a regular file is opened
    ///   as zip archive.
    ///
    /// Any other scheme results in [`CatalogError::UnsupportedScheme`], and a
    /// path that does not exist in [`CatalogError::ResourceRootNotFound`].
    pub fn resolve(locator: &str) -> Result<Self> {
        let locator = locator.trim();
        let resources = match split_scheme(locator) {
            None => Self::from_path(locator)?,
            Some(("file", rest)) => Self::from_path(strip_authority(rest))?,
            Some(("jar" | "zip", rest)) => {
                let rest = rest.strip_prefix("file:").unwrap_or(rest);
                let rest = strip_authority(rest);
                match rest.split_once(ARCHIVE_SEPARATOR) {
                    Some((path, prefix)) => {
                        Self::Archive(ArchiveResources::open_with_prefix(path, prefix)?)
                    }
                    None => Self::Archive(ArchiveResources::open(rest)?),
                }
            }
            #[cfg(feature = "embed-catalogs")]
            Some(("embedded", rest)) => Self::Embedded(EmbeddedResources::bundled_subdir(rest)?),
            Some((scheme, _)) => {
                return Err(CatalogError::UnsupportedScheme {
                    locator: locator.to_owned(),
                    scheme: scheme.to_owned(),
                });
            }
        };

        tracing::trace!(
            catalog.locator = %locator,
            catalog.mode = resources.mode(),
            "resolved catalog resources"
        );
        Ok(resources)
    }

    fn from_path(path: &str) -> Result<Self> {
        if let Some((archive, prefix)) = path.split_once(ARCHIVE_SEPARATOR) {
            return Ok(Self::Archive(ArchiveResources::open_with_prefix(
                archive, prefix,
            )?));
        }

        let path = Path::new(path);
        if path.is_dir() {
            Ok(Self::Directory(DirectoryResources::open(path)?))
        } else if path.is_file() {
            Ok(Self::Archive(ArchiveResources::open(path)?))
        } else {
            Err(CatalogError::ResourceRootNotFound {
                path: path.display().to_string(),
            })
        }
    }

    #[cfg(feature = "embed-catalogs")]
    #[cfg_attr(docsrs, doc(cfg(feature = "embed-catalogs")))]
    /// The catalogs bundled with this crate.
    #[must_use]
    pub fn embedded() -> Self {
        Self::Embedded(EmbeddedResources::bundled())
    }

    /// Short name of the packaging mode, mostly useful for diagnostics.
    #[must_use]
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Directory(_) => "directory",
            Self::Archive(_) => "archive",
            #[cfg(feature = "embed-catalogs")]
            Self::Embedded(_) => "embedded",
        }
    }

    /// Human readable location of the resource root.
    #[must_use]
    pub fn root_location(&self) -> String {
        match self {
            Self::Directory(resources) => resources.root_location(),
            Self::Archive(resources) => resources.root_location(),
            #[cfg(feature = "embed-catalogs")]
            Self::Embedded(resources) => resources.root_location(),
        }
    }

    /// List all catalog files directly within the logical directory `dir`.
    ///
    /// A trailing (or leading) `/` in `dir` is ignored. The result is sorted
    /// by key. An existing directory without catalog files results in an empty
    /// list, while a missing directory results in [`CatalogError::DirectoryNotFound`].
    ///
    /// The resource root itself is not a logical directory: an empty `dir`
    /// (or `/`) results in [`CatalogError::DirectoryNotFound`] in every mode.
    pub fn list_catalog_files(&self, dir: &str) -> Result<Vec<CatalogFile>> {
        let dir = self.logical_dir(dir)?;
        let files = match self {
            Self::Directory(resources) => resources.list_catalog_files(dir),
            Self::Archive(resources) => resources.list_catalog_files(dir),
            #[cfg(feature = "embed-catalogs")]
            Self::Embedded(resources) => resources.list_catalog_files(dir),
        }?;

        tracing::trace!(
            catalog.dir = %dir,
            catalog.mode = self.mode(),
            catalog.files = files.len(),
            "listed catalog files"
        );
        Ok(files)
    }

    /// Look up a single named catalog file within the logical directory `dir`.
    ///
    /// Results in [`CatalogError::ResourceNotFound`] if it does not exist.
    pub fn catalog_file(&self, dir: &str, file_name: &str) -> Result<CatalogFile> {
        let dir = self.logical_dir(dir)?;
        match self {
            Self::Directory(resources) => resources.catalog_file(dir, file_name),
            Self::Archive(resources) => resources.catalog_file(dir, file_name),
            #[cfg(feature = "embed-catalogs")]
            Self::Embedded(resources) => resources.catalog_file(dir, file_name),
        }
    }

    fn logical_dir<'a>(&self, dir: &'a str) -> Result<&'a str> {
        match normalize_dir(dir) {
            "" => Err(CatalogError::DirectoryNotFound {
                dir: dir.to_owned(),
                root: self.root_location(),
            }),
            dir => Ok(dir),
        }
    }

    /// Read the raw content of a catalog file.
    pub fn read(&self, file: &CatalogFile) -> Result<Cow<'static, [u8]>> {
        match self {
            Self::Directory(resources) => resources.read(file),
            Self::Archive(resources) => resources.read(file),
            #[cfg(feature = "embed-catalogs")]
            Self::Embedded(resources) => resources.read(file),
        }
    }
}

impl From<DirectoryResources> for Resources {
    fn from(value: DirectoryResources) -> Self {
        Self::Directory(value)
    }
}

impl From<ArchiveResources> for Resources {
    fn from(value: ArchiveResources) -> Self {
        Self::Archive(value)
    }
}

#[cfg(feature = "embed-catalogs")]
impl From<EmbeddedResources> for Resources {
    fn from(value: EmbeddedResources) -> Self {
        Self::Embedded(value)
    }
}

fn normalize_dir(dir: &str) -> &str {
    dir.trim_matches('/')
}

/// Split `scheme:rest`, only when the scheme looks like an actual URI scheme.
///
/// Single letter schemes are not considered, so that Windows drive letters
/// (e.g. `C:\catalogs`) are treated as paths.
fn split_scheme(locator: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = locator.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = scheme.len() > 1
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some((scheme, rest))
}

/// Strip the (empty) authority of a `file://` style locator.
fn strip_authority(rest: &str) -> &str {
    rest.strip_prefix("//").unwrap_or(rest)
}
