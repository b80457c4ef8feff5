use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

use crate::CatalogError;

/// Device (or browser) category a [`UserAgent`] is catalogued under.
///
/// The set is closed: parsing an unknown tag is an error,
/// there is no catch-all variant to fall back to.
///
/// [`UserAgent`]: crate::UserAgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeviceKind {
    /// Android devices
    Android,
    /// Google Chrome browser
    Chrome,
    /// Microsoft Edge browser
    Edge,
    /// Internet Explorer browser
    Explorer,
    /// Mozilla Firefox browser
    Firefox,
    /// iPhone devices
    Iphone,
    /// Linux based operating systems
    Linux,
    /// macOS operating system
    MacOs,
    /// Mobile devices in general
    Mobile,
    /// Windows operating system
    Windows,
}

impl DeviceKind {
    /// All [`DeviceKind`] variants, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Android,
        Self::Chrome,
        Self::Edge,
        Self::Explorer,
        Self::Firefox,
        Self::Iphone,
        Self::Linux,
        Self::MacOs,
        Self::Mobile,
        Self::Windows,
    ];

    /// Iterate over all [`DeviceKind`] variants.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    /// The lowercase tag used on the wire and as catalog file stem.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Chrome => "chrome",
            Self::Edge => "edge",
            Self::Explorer => "explorer",
            Self::Firefox => "firefox",
            Self::Iphone => "iphone",
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Mobile => "mobile",
            Self::Windows => "windows",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::InvalidDevice {
                value: s.to_owned(),
            })
    }
}

impl Serialize for DeviceKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DeviceKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse::<Self>().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_kind_parse() {
        assert_eq!("windows".parse::<DeviceKind>().unwrap(), DeviceKind::Windows);
        assert_eq!("WiNdOwS".parse::<DeviceKind>().unwrap(), DeviceKind::Windows);
        assert_eq!(" macos ".parse::<DeviceKind>().unwrap(), DeviceKind::MacOs);
        assert_eq!("iPhone".parse::<DeviceKind>().unwrap(), DeviceKind::Iphone);

        assert!("".parse::<DeviceKind>().is_err());
        assert!("blackberry".parse::<DeviceKind>().is_err());
        assert!("mac os".parse::<DeviceKind>().is_err());
    }

    #[test]
    fn test_device_kind_parse_error_names_value() {
        let err = "blackberry".parse::<DeviceKind>().unwrap_err();
        assert!(err.to_string().contains("blackberry"));
    }

    #[test]
    fn test_device_kind_str_round_trip() {
        for kind in DeviceKind::iter() {
            assert_eq!(kind.as_str(), kind.as_str().to_ascii_lowercase());
            assert_eq!(kind.to_string().parse::<DeviceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_device_kind_all_is_complete_and_unique() {
        let mut kinds: Vec<_> = DeviceKind::iter().collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), DeviceKind::ALL.len());
    }

    #[test]
    fn test_device_kind_deserialize() {
        assert_eq!(
            serde_json::from_str::<DeviceKind>(r#""android""#).unwrap(),
            DeviceKind::Android
        );
        assert_eq!(
            serde_json::from_str::<DeviceKind>(r#""FireFox""#).unwrap(),
            DeviceKind::Firefox
        );

        assert!(serde_json::from_str::<DeviceKind>(r#""invalid""#).is_err());
        assert!(serde_json::from_str::<DeviceKind>(r#""""#).is_err());
        assert!(serde_json::from_str::<DeviceKind>("1").is_err());
    }

    #[test]
    fn test_device_kind_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&DeviceKind::MacOs).unwrap(),
            r#""macos""#
        );
        assert_eq!(
            serde_json::to_string(&DeviceKind::Explorer).unwrap(),
            r#""explorer""#
        );
    }
}
