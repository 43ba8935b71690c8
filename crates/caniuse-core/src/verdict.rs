//! Per-browser support verdicts.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::compat::BrowserId;
use crate::version::Version;

/// The minimum browser version in which a feature (or feature set) is usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinimumBrowserVersion {
    Unsupported {
        browser: BrowserId,
    },
    Supported {
        browser: BrowserId,
        minimum_version: Version,
        partial_support: bool,
        is_behind_flag: bool,
    },
}

impl MinimumBrowserVersion {
    pub fn unsupported(browser: BrowserId) -> Self {
        MinimumBrowserVersion::Unsupported { browser }
    }

    pub fn supported(
        browser: BrowserId,
        minimum_version: Version,
        partial_support: bool,
        is_behind_flag: bool,
    ) -> Self {
        MinimumBrowserVersion::Supported {
            browser,
            minimum_version,
            partial_support,
            is_behind_flag,
        }
    }

    pub fn browser(&self) -> &BrowserId {
        match self {
            MinimumBrowserVersion::Unsupported { browser }
            | MinimumBrowserVersion::Supported { browser, .. } => browser,
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, MinimumBrowserVersion::Supported { .. })
    }

    pub fn minimum_version(&self) -> Option<&Version> {
        match self {
            MinimumBrowserVersion::Supported { minimum_version, .. } => Some(minimum_version),
            MinimumBrowserVersion::Unsupported { .. } => None,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, MinimumBrowserVersion::Supported { partial_support: true, .. })
    }

    pub fn is_behind_flag(&self) -> bool {
        matches!(self, MinimumBrowserVersion::Supported { is_behind_flag: true, .. })
    }

    /// Supported without needing an experimental flag.
    pub fn is_usable(&self) -> bool {
        self.is_supported() && !self.is_behind_flag()
    }

    /// Re-tag this verdict with `browser`.
    pub fn with_browser(self, browser: BrowserId) -> Self {
        match self {
            MinimumBrowserVersion::Unsupported { .. } => Self::unsupported(browser),
            MinimumBrowserVersion::Supported {
                minimum_version,
                partial_support,
                is_behind_flag,
                ..
            } => Self::supported(browser, minimum_version, partial_support, is_behind_flag),
        }
    }
}

impl Serialize for MinimumBrowserVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MinimumBrowserVersion::Unsupported { browser } => {
                let mut state = serializer.serialize_struct("MinimumBrowserVersion", 2)?;
                state.serialize_field("browser", browser)?;
                state.serialize_field("isSupported", &false)?;
                state.end()
            }
            MinimumBrowserVersion::Supported {
                browser,
                minimum_version,
                partial_support,
                is_behind_flag,
            } => {
                let mut state = serializer.serialize_struct("MinimumBrowserVersion", 5)?;
                state.serialize_field("browser", browser)?;
                state.serialize_field("isSupported", &true)?;
                state.serialize_field("minimumVersion", minimum_version)?;
                state.serialize_field("partialSupport", partial_support)?;
                state.serialize_field("isBehindFlag", is_behind_flag)?;
                state.end()
            }
        }
    }
}
