use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

use super::DeviceKind;

/// A catalogued User Agent (UA) string together with its [`DeviceKind`].
///
/// Two [`UserAgent`]s are equal (and hash the same) iff both
/// the header string and the device are equal. This is what
/// allows catalogs to collapse duplicate entries across files.
///
/// The string is not parsed nor validated in any way,
/// it is handed back exactly as it was found in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserAgent {
    #[serde(rename = "useragent")]
    header: Arc<str>,
    device: DeviceKind,
}

impl UserAgent {
    /// Create a new [`UserAgent`] from a `User-Agent` (header) value
    /// and the [`DeviceKind`] it is catalogued under.
    pub fn new(header: impl Into<Arc<str>>, device: DeviceKind) -> Self {
        Self {
            header: header.into(),
            device,
        }
    }

    /// returns the `User-Agent` (header) value.
    #[must_use]
    pub fn header_str(&self) -> &str {
        &self.header
    }

    /// returns the [`DeviceKind`] of the [`UserAgent`].
    #[must_use]
    pub fn device(&self) -> DeviceKind {
        self.device
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)
    }
}
