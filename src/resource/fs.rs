use itertools::Itertools as _;
use std::{
    borrow::Cow,
    fs, io,
    path::{Path, PathBuf},
};

use super::{CatalogFile, is_catalog_file_name};
use crate::{CatalogError, Result};

/// Catalog resources stored as loose files below a filesystem directory.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    /// Create [`DirectoryResources`] rooted at the given directory.
    ///
    /// Fails with [`CatalogError::ResourceRootNotFound`] if `root`
    /// is not an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(CatalogError::ResourceRootNotFound {
                path: root.display().to_string(),
            });
        }
        Ok(Self { root })
    }

    /// The root directory of these resources.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(super) fn root_location(&self) -> String {
        self.root.display().to_string()
    }

    pub(super) fn list_catalog_files(&self, dir: &str) -> Result<Vec<CatalogFile>> {
        let path = self.root.join(dir);
        if !path.is_dir() {
            return Err(CatalogError::DirectoryNotFound {
                dir: dir.to_owned(),
                root: self.root_location(),
            });
        }

        let location = path.display().to_string();
        let entries = fs::read_dir(&path).map_err(|source| CatalogError::Io {
            path: location.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| CatalogError::Io {
                path: location.clone(),
                source,
            })?;
            let entry_path = entry.path();
            if !entry_path.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                tracing::trace!(
                    catalog.location = %entry_path.display(),
                    "skip non utf-8 catalog entry name"
                );
                continue;
            };
            if !is_catalog_file_name(&name) {
                continue;
            }
            files.push(CatalogFile {
                key: format!("{dir}/{name}"),
                location: entry_path.display().to_string(),
            });
        }

        Ok(files
            .into_iter()
            .sorted_by(|a, b| a.key.cmp(&b.key))
            .collect())
    }

    pub(super) fn catalog_file(&self, dir: &str, file_name: &str) -> Result<CatalogFile> {
        let key = format!("{dir}/{file_name}");
        let path = self.root.join(&key);
        if !path.is_file() {
            return Err(CatalogError::ResourceNotFound {
                path: path.display().to_string(),
            });
        }
        Ok(CatalogFile {
            key,
            location: path.display().to_string(),
        })
    }

    pub(super) fn read(&self, file: &CatalogFile) -> Result<Cow<'static, [u8]>> {
        let path = self.root.join(&file.key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Cow::Owned(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(CatalogError::ResourceNotFound {
                    path: file.location.clone(),
                })
            }
            Err(source) => Err(CatalogError::Io {
                path: file.location.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("random/nested")).unwrap();
        fs::create_dir_all(tmp.path().join("latest")).unwrap();
        fs::write(tmp.path().join("random/windows.json"), "[]").unwrap();
        fs::write(tmp.path().join("random/android.json"), "[]").unwrap();
        fs::write(tmp.path().join("random/README.md"), "# notes").unwrap();
        fs::write(tmp.path().join("random/nested/linux.json"), "[]").unwrap();
        fs::create_dir_all(tmp.path().join("random/folder.json")).unwrap();
        tmp
    }

    #[test]
    fn test_open_requires_existing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let err = DirectoryResources::open(tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, CatalogError::ResourceRootNotFound { .. }));
    }

    #[test]
    fn test_list_only_direct_json_files() {
        let tmp = fixture();
        let resources = DirectoryResources::open(tmp.path()).unwrap();
        let keys: Vec<_> = resources
            .list_catalog_files("random")
            .unwrap()
            .into_iter()
            .map(|file| file.key)
            .collect();
        assert_eq!(keys, vec!["random/android.json", "random/windows.json"]);
    }

    #[test]
    fn test_list_empty_dir_is_not_an_error() {
        let tmp = fixture();
        let resources = DirectoryResources::open(tmp.path()).unwrap();
        assert!(resources.list_catalog_files("latest").unwrap().is_empty());
    }

    #[test]
    fn test_list_missing_dir() {
        let tmp = fixture();
        let resources = DirectoryResources::open(tmp.path()).unwrap();
        let err = resources.list_catalog_files("legacy").unwrap_err();
        match err {
            CatalogError::DirectoryNotFound { dir, .. } => assert_eq!(dir, "legacy"),
            err => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn test_read_vanished_file() {
        let tmp = fixture();
        let resources = DirectoryResources::open(tmp.path()).unwrap();
        let files = resources.list_catalog_files("random").unwrap();
        fs::remove_file(tmp.path().join("random/android.json")).unwrap();

        let err = resources.read(&files[0]).unwrap_err();
        match err {
            CatalogError::ResourceNotFound { path } => assert!(path.ends_with("android.json")),
            err => panic!("unexpected error: {err}"),
        }
        assert_eq!(resources.read(&files[1]).unwrap().as_ref(), b"[]");
    }

    #[test]
    fn test_catalog_file_lookup() {
        let tmp = fixture();
        let resources = DirectoryResources::open(tmp.path()).unwrap();
        let file = resources.catalog_file("random", "windows.json").unwrap();
        assert_eq!(file.key, "random/windows.json");
        assert!(matches!(
            resources.catalog_file("random", "macos.json"),
            Err(CatalogError::ResourceNotFound { .. })
        ));
    }
}
