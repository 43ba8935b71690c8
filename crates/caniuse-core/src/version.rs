//! Browser release versions.
//!
//! A [`Version`] has a required major component and optional minor/patch
//! components. The two constructors differ on purpose:
//!
//! - [`Version::parse`] fills missing trailing components with `0`.
//! - [`Version::new`] keeps them absent.
//!
//! Ordering ([`Version::cmp_release`], [`Version::is_newer_than`]) reads an
//! absent component as `0`. Equality (`==`, [`Version::is_equal_to`]) is
//! structural, so `1.x.x` and `1.0.0` are neither newer nor older than each
//! other and still not equal. For that reason `Version` does not implement
//! `Ord`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Token printed for an absent component.
pub const ABSENT_COMPONENT: &str = "x";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: Option<u32>,
    pub patch: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("empty version string")]
    Empty,
    #[error("invalid {component} component \"{value}\" in version \"{input}\"")]
    InvalidComponent {
        component: &'static str,
        value: String,
        input: String,
    },
}

impl Version {
    /// Build a version, keeping absent components absent.
    pub const fn new(major: u32, minor: Option<u32>, patch: Option<u32>) -> Self {
        Self { major, minor, patch }
    }

    /// Build a version with all three components present.
    pub const fn release(major: u32, minor: u32, patch: u32) -> Self {
        Self::new(major, Some(minor), Some(patch))
    }

    /// Parse a dotted version string such as `"79"`, `"10.1"` or `"3.6.2"`.
    ///
    /// Missing or empty minor/patch segments become `0`. Segments past the
    /// third are ignored.
    pub fn parse(text: &str) -> Result<Self, VersionParseError> {
        if text.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let mut parts = text.split('.');
        let major = component(parts.next(), "major", text)?.ok_or_else(|| {
            VersionParseError::InvalidComponent {
                component: "major",
                value: String::new(),
                input: text.to_string(),
            }
        })?;
        let minor = component(parts.next(), "minor", text)?.unwrap_or(0);
        let patch = component(parts.next(), "patch", text)?.unwrap_or(0);

        Ok(Self::release(major, minor, patch))
    }

    /// Compare release order, treating absent components as `0`.
    pub fn cmp_release(&self, other: &Version) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.unwrap_or(0).cmp(&other.minor.unwrap_or(0)))
            .then_with(|| self.patch.unwrap_or(0).cmp(&other.patch.unwrap_or(0)))
    }

    /// Strictly newer under release order.
    pub fn is_newer_than(&self, other: &Version) -> bool {
        self.cmp_release(other) == Ordering::Greater
    }

    /// Structural equality: an absent component only equals an absent one.
    pub fn is_equal_to(&self, other: &Version) -> bool {
        self == other
    }
}

fn component(
    segment: Option<&str>,
    name: &'static str,
    input: &str,
) -> Result<Option<u32>, VersionParseError> {
    match segment {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| VersionParseError::InvalidComponent {
                component: name,
                value: value.to_string(),
                input: input.to_string(),
            }),
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        for part in [self.minor, self.patch] {
            match part {
                Some(value) => write!(f, ".{}", value)?,
                None => write!(f, ".{}", ABSENT_COMPONENT)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let v = Version::parse("3.6.2").unwrap();
        assert_eq!(v, Version::release(3, 6, 2));
        assert_eq!(v.to_string(), "3.6.2");
    }

    #[test]
    fn test_parse_defaults_missing_parts_to_zero() {
        assert_eq!(Version::parse("5").unwrap(), Version::release(5, 0, 0));
        assert_eq!(Version::parse("10.1").unwrap(), Version::release(10, 1, 0));
        assert_eq!(Version::parse("12.").unwrap(), Version::release(12, 0, 0));
    }

    #[test]
    fn test_parse_ignores_extra_segments() {
        assert_eq!(Version::parse("1.2.3.4").unwrap(), Version::release(1, 2, 3));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(Version::parse(""), Err(VersionParseError::Empty));
        assert!(matches!(
            Version::parse("preview"),
            Err(VersionParseError::InvalidComponent { component: "major", .. })
        ));
        assert!(matches!(
            Version::parse("1.beta"),
            Err(VersionParseError::InvalidComponent { component: "minor", .. })
        ));
        assert!(".5".parse::<Version>().is_err());
    }

    #[test]
    fn test_newer_than() {
        let v50 = Version::release(50, 0, 0);
        let v55 = Version::release(55, 0, 0);
        let v60 = Version::release(60, 0, 0);

        assert!(v60.is_newer_than(&v50));
        assert!(v55.is_newer_than(&v50));
        assert!(v60.is_newer_than(&v55));
        assert!(!v50.is_newer_than(&v50));
        assert!(Version::release(1, 2, 1).is_newer_than(&Version::release(1, 2, 0)));
        assert!(!Version::release(1, 9, 9).is_newer_than(&Version::release(2, 0, 0)));
    }

    #[test]
    fn test_absent_components_order_as_zero() {
        let bare = Version::new(1, None, None);
        let zero = Version::release(1, 0, 0);

        assert!(!bare.is_newer_than(&zero));
        assert!(!zero.is_newer_than(&bare));
        assert_eq!(bare.cmp_release(&zero), Ordering::Equal);
        assert!(Version::release(1, 1, 0).is_newer_than(&bare));
    }

    #[test]
    fn test_absent_components_are_not_equal_to_zero() {
        let bare = Version::new(1, None, None);

        assert!(!bare.is_equal_to(&Version::release(1, 0, 0)));
        assert!(bare.is_equal_to(&Version::new(1, None, None)));
        assert!(!Version::new(1, Some(0), None).is_equal_to(&Version::release(1, 0, 0)));
    }

    #[test]
    fn test_display_absent_components() {
        assert_eq!(Version::new(7, None, None).to_string(), "7.x.x");
        assert_eq!(Version::new(7, Some(1), None).to_string(), "7.1.x");
    }
}
