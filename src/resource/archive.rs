use parking_lot::Mutex;
use std::{
    borrow::Cow,
    fmt, fs, io,
    io::Read as _,
    path::{Path, PathBuf},
};
use zip::{ZipArchive, result::ZipError};

use super::{CatalogFile, is_catalog_file_name};
use crate::{CatalogError, Result};

/// Catalog resources bundled inside a single zip archive.
///
/// Resources can live at the root of the archive or below an
/// inner prefix (e.g. `catalogs.zip!/ua` uses `ua/` as root).
pub struct ArchiveResources {
    path: PathBuf,
    prefix: String,
    names: Vec<String>,
    archive: Mutex<ZipArchive<fs::File>>,
}

impl fmt::Debug for ArchiveResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveResources")
            .field("path", &self.path)
            .field("prefix", &self.prefix)
            .field("entries", &self.names.len())
            .finish()
    }
}

impl ArchiveResources {
    /// Open the zip archive found at `path`, using its root as resource root.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_prefix(path, "")
    }

    /// Open the zip archive found at `path`,
    /// using the entries below `prefix` as resource root.
    pub fn open_with_prefix(path: impl Into<PathBuf>, prefix: &str) -> Result<Self> {
        let path = path.into();
        let location = path.display().to_string();

        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(CatalogError::ResourceRootNotFound { path: location });
            }
            Err(source) => {
                return Err(CatalogError::Io {
                    path: location,
                    source,
                });
            }
        };
        let archive = ZipArchive::new(file).map_err(|source| CatalogError::Archive {
            path: location.clone(),
            source,
        })?;

        let prefix = match prefix.trim_matches('/') {
            "" => String::new(),
            prefix => format!("{prefix}/"),
        };
        let names: Vec<String> = archive.file_names().map(str::to_owned).collect();

        if !prefix.is_empty() && !names.iter().any(|name| name.starts_with(&prefix)) {
            return Err(CatalogError::ResourceRootNotFound {
                path: format!("{location}!/{prefix}"),
            });
        }

        tracing::trace!(
            catalog.location = %location,
            catalog.entries = names.len(),
            "opened catalog archive"
        );

        Ok(Self {
            path,
            prefix,
            names,
            archive: Mutex::new(archive),
        })
    }

    /// The path of the archive file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn location_of(&self, entry: &str) -> String {
        format!("{}!/{entry}", self.path.display())
    }

    pub(super) fn root_location(&self) -> String {
        self.location_of(&self.prefix)
    }

    pub(super) fn list_catalog_files(&self, dir: &str) -> Result<Vec<CatalogFile>> {
        let dir_prefix = format!("{}{dir}/", self.prefix);
        if !self.names.iter().any(|name| name.starts_with(&dir_prefix)) {
            return Err(CatalogError::DirectoryNotFound {
                dir: dir.to_owned(),
                root: self.root_location(),
            });
        }

        let mut files: Vec<_> = self
            .names
            .iter()
            .filter_map(|name| {
                let file_name = name.strip_prefix(&dir_prefix)?;
                // direct children only, same as for loose directories
                (!file_name.contains('/') && is_catalog_file_name(file_name)).then(|| {
                    CatalogFile {
                        key: format!("{dir}/{file_name}"),
                        location: self.location_of(name),
                    }
                })
            })
            .collect();
        files.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(files)
    }

    pub(super) fn catalog_file(&self, dir: &str, file_name: &str) -> Result<CatalogFile> {
        let key = format!("{dir}/{file_name}");
        let entry = format!("{}{key}", self.prefix);
        if !self.names.contains(&entry) {
            return Err(CatalogError::ResourceNotFound {
                path: self.location_of(&entry),
            });
        }
        Ok(CatalogFile {
            key,
            location: self.location_of(&entry),
        })
    }

    pub(super) fn read(&self, file: &CatalogFile) -> Result<Cow<'static, [u8]>> {
        let entry_name = format!("{}{}", self.prefix, file.key);
        let mut archive = self.archive.lock();
        let mut entry = archive.by_name(&entry_name).map_err(|err| match err {
            ZipError::FileNotFound => CatalogError::ResourceNotFound {
                path: file.location.clone(),
            },
            source => CatalogError::Archive {
                path: file.location.clone(),
                source,
            },
        })?;

        let mut buffer = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or_default());
        entry
            .read_to_end(&mut buffer)
            .map_err(|source| CatalogError::Io {
                path: file.location.clone(),
                source,
            })?;
        Ok(Cow::Owned(buffer))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::{fs, io::Write as _, path::Path};
    use zip::{ZipWriter, write::FileOptions};

    /// Write a zip archive at `path` containing the given `(name, contents)` entries.
    ///
    /// Names ending with `/` are added as directory entries.
    pub(crate) fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = fs::File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        for (name, contents) in entries {
            if name.ends_with('/') {
                zip.add_directory(*name, FileOptions::default()).unwrap();
            } else {
                zip.start_file(*name, FileOptions::default()).unwrap();
                zip.write_all(contents.as_bytes()).unwrap();
            }
        }
        zip.finish().unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::write_zip;
    use super::*;

    fn fixture(dir: &Path) -> PathBuf {
        let path = dir.join("catalogs.jar");
        write_zip(
            &path,
            &[
                ("META-INF/", ""),
                ("META-INF/MANIFEST.MF", "Manifest-Version: 1.0"),
                ("random/", ""),
                ("random/windows.json", "[]"),
                ("random/chrome.json", "[]"),
                ("random/notes.txt", "ignore me"),
                ("random/nested/linux.json", "[]"),
                ("latest/", ""),
                ("nested/ua/random/edge.json", "[]"),
            ],
        );
        path
    }

    #[test]
    fn test_open_missing_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ArchiveResources::open(tmp.path().join("missing.zip")).unwrap_err();
        assert!(matches!(err, CatalogError::ResourceRootNotFound { .. }));
    }

    #[test]
    fn test_open_invalid_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken.zip");
        fs::write(&path, "definitely not a zip archive").unwrap();
        let err = ArchiveResources::open(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Archive { .. }));
    }

    #[test]
    fn test_list_catalog_files() {
        let tmp = tempfile::tempdir().unwrap();
        let resources = ArchiveResources::open(fixture(tmp.path())).unwrap();

        let files = resources.list_catalog_files("random").unwrap();
        let keys: Vec<_> = files.iter().map(|file| file.key.as_str()).collect();
        assert_eq!(keys, vec!["random/chrome.json", "random/windows.json"]);
        assert!(files[0].location.ends_with("catalogs.jar!/random/chrome.json"));

        assert!(resources.list_catalog_files("latest").unwrap().is_empty());
        assert!(matches!(
            resources.list_catalog_files("legacy"),
            Err(CatalogError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_prefixed_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let path = fixture(tmp.path());

        let resources = ArchiveResources::open_with_prefix(&path, "/nested/ua/").unwrap();
        let files = resources.list_catalog_files("random").unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].key, "random/edge.json");
        assert_eq!(resources.read(&files[0]).unwrap().as_ref(), b"[]");

        assert!(matches!(
            ArchiveResources::open_with_prefix(&path, "unknown"),
            Err(CatalogError::ResourceRootNotFound { .. })
        ));
    }

    #[test]
    fn test_read_and_lookup() {
        let tmp = tempfile::tempdir().unwrap();
        let resources = ArchiveResources::open(fixture(tmp.path())).unwrap();

        let file = resources.catalog_file("random", "windows.json").unwrap();
        assert_eq!(resources.read(&file).unwrap().as_ref(), b"[]");

        let err = resources.catalog_file("random", "macos.json").unwrap_err();
        match err {
            CatalogError::ResourceNotFound { path } => {
                assert!(path.ends_with("!/random/macos.json"));
            }
            err => panic!("unexpected error: {err}"),
        }

        let ghost = CatalogFile {
            key: "random/ghost.json".to_owned(),
            location: "ghost".to_owned(),
        };
        assert!(matches!(
            resources.read(&ghost),
            Err(CatalogError::ResourceNotFound { .. })
        ));
    }
}
