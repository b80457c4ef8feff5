use include_dir::{Dir, include_dir};
use std::{borrow::Cow, path::Path};

use super::{CatalogFile, is_catalog_file_name};
use crate::{CatalogError, Result};

static BUNDLED_CATALOGS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/resources");

/// Catalog resources compiled into the binary.
///
/// [`EmbeddedResources::bundled`] gives access to the catalogs shipped with
/// this crate, while [`EmbeddedResources::new`] allows you to bring your own
/// tree embedded with [`include_dir::include_dir`].
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedResources {
    dir: &'static Dir<'static>,
}

impl EmbeddedResources {
    /// Use the given embedded directory as resource root.
    #[must_use]
    pub const fn new(dir: &'static Dir<'static>) -> Self {
        Self { dir }
    }

    /// The catalogs bundled with this crate.
    #[must_use]
    pub fn bundled() -> Self {
        Self::new(&BUNDLED_CATALOGS)
    }

    /// Use a sub directory of the bundled catalogs as resource root.
    pub fn bundled_subdir(path: &str) -> Result<Self> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Ok(Self::bundled());
        }
        BUNDLED_CATALOGS
            .get_dir(path)
            .map(Self::new)
            .ok_or_else(|| CatalogError::ResourceRootNotFound {
                path: format!("embedded:{path}"),
            })
    }

    fn full_path(&self, relative: &str) -> String {
        let root = self.dir.path();
        if root.as_os_str().is_empty() {
            relative.to_owned()
        } else {
            format!("{}/{relative}", root.display())
        }
    }

    pub(super) fn root_location(&self) -> String {
        format!("embedded:{}", self.dir.path().display())
    }

    pub(super) fn list_catalog_files(&self, dir: &str) -> Result<Vec<CatalogFile>> {
        let full = self.full_path(dir);
        let Some(sub) = self.dir.get_dir(Path::new(&full)) else {
            return Err(CatalogError::DirectoryNotFound {
                dir: dir.to_owned(),
                root: self.root_location(),
            });
        };

        let mut files: Vec<_> = sub
            .files()
            .filter_map(|file| {
                let file_name = file.path().file_name()?.to_str()?;
                is_catalog_file_name(file_name).then(|| CatalogFile {
                    key: format!("{dir}/{file_name}"),
                    location: format!("embedded:{}", file.path().display()),
                })
            })
            .collect();
        files.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(files)
    }

    pub(super) fn catalog_file(&self, dir: &str, file_name: &str) -> Result<CatalogFile> {
        let key = format!("{dir}/{file_name}");
        let full = self.full_path(&key);
        if self.dir.get_file(Path::new(&full)).is_none() {
            return Err(CatalogError::ResourceNotFound {
                path: format!("embedded:{full}"),
            });
        }
        Ok(CatalogFile {
            key,
            location: format!("embedded:{full}"),
        })
    }

    pub(super) fn read(&self, file: &CatalogFile) -> Result<Cow<'static, [u8]>> {
        let dir: &'static Dir<'static> = self.dir;
        let full = self.full_path(&file.key);
        dir.get_file(Path::new(&full))
            .map(|embedded| Cow::Borrowed(embedded.contents()))
            .ok_or_else(|| CatalogError::ResourceNotFound {
                path: file.location.clone(),
            })
    }
}
