//! Data model for browser-compat-data (BCD) compatibility statements.
//!
//! Only the members the resolver and the feature catalog read are modelled;
//! everything else in a `__compat` record is ignored on load.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::version::Version;

/// BCD marker for "this version or earlier" (e.g. `"≤79"`).
const RANGED_VERSION_PREFIX: char = '≤';

/// Opaque browser key from the dataset (e.g. `"chrome"`, `"firefox_android"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrowserId(String);

impl BrowserId {
    /// Key carried by a verdict that has not been tagged with its browser yet.
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn unknown() -> Self {
        Self::new(Self::UNKNOWN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BrowserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BrowserId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for BrowserId {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// A `version_added` / `version_removed` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionValue {
    Flag(bool),
    Text(String),
}

impl VersionValue {
    /// `false` means "no version", anything else counts as set.
    pub fn is_set(&self) -> bool {
        !matches!(self, VersionValue::Flag(false))
    }

    /// The numbered release this value names, if any.
    ///
    /// `"preview"`, `true` and other non-numeric values have none.
    pub fn release(&self) -> Option<Version> {
        match self {
            VersionValue::Text(text) => {
                Version::parse(text.trim_start_matches(RANGED_VERSION_PREFIX)).ok()
            }
            VersionValue::Flag(_) => None,
        }
    }
}

impl From<&str> for VersionValue {
    fn from(text: &str) -> Self {
        VersionValue::Text(text.to_string())
    }
}

/// One row of a browser's support timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_added: Option<VersionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_removed: Option<VersionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_implementation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<serde_json::Value>>,
}

impl SupportEntry {
    /// Entry added in `version`.
    pub fn added(version: &str) -> Self {
        Self {
            version_added: Some(version.into()),
            ..Self::default()
        }
    }

    /// Entry added in `added` and removed in `removed`.
    pub fn removed(added: &str, removed: &str) -> Self {
        Self {
            version_removed: Some(removed.into()),
            ..Self::added(added)
        }
    }

    pub fn partial(mut self) -> Self {
        self.partial_implementation = Some(true);
        self
    }

    pub fn with_flag(mut self, flag: serde_json::Value) -> Self {
        self.flags.get_or_insert_with(Vec::new).push(flag);
        self
    }

    pub fn has_removal(&self) -> bool {
        self.version_removed.as_ref().is_some_and(VersionValue::is_set)
    }

    /// Release in which support was added, if it names one.
    pub fn added_release(&self) -> Option<Version> {
        self.version_added.as_ref().and_then(VersionValue::release)
    }

    /// Sort key: the removal release for removal rows, the added release otherwise.
    pub fn effective_release(&self) -> Option<Version> {
        if self.has_removal() {
            self.version_removed.as_ref().and_then(VersionValue::release)
        } else {
            self.added_release()
        }
    }

    pub fn is_partial(&self) -> bool {
        self.partial_implementation.unwrap_or(false)
    }

    pub fn is_behind_flag(&self) -> bool {
        self.flags.as_ref().is_some_and(|flags| !flags.is_empty())
    }
}

/// A browser's raw support data: a lone entry or a list of entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupportStatement {
    Many(Vec<SupportEntry>),
    Single(SupportEntry),
}

impl SupportStatement {
    pub fn entries(&self) -> &[SupportEntry] {
        match self {
            SupportStatement::Many(entries) => entries,
            SupportStatement::Single(entry) => std::slice::from_ref(entry),
        }
    }
}

impl From<Vec<SupportEntry>> for SupportStatement {
    fn from(entries: Vec<SupportEntry>) -> Self {
        SupportStatement::Many(entries)
    }
}

impl From<SupportEntry> for SupportStatement {
    fn from(entry: SupportEntry) -> Self {
        SupportStatement::Single(entry)
    }
}

/// The `__compat` record of a feature.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompatStatement {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub mdn_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Per-browser support, in document order.
    #[serde(default, deserialize_with = "ordered_support")]
    pub support: Vec<(BrowserId, SupportStatement)>,
}

fn ordered_support<'de, D>(deserializer: D) -> Result<Vec<(BrowserId, SupportStatement)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SupportVisitor;

    impl<'de> Visitor<'de> for SupportVisitor {
        type Value = Vec<(BrowserId, SupportStatement)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of browser keys to support statements")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut support = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((browser, statement)) = map.next_entry::<BrowserId, SupportStatement>()? {
                support.push((browser, statement));
            }
            Ok(support)
        }
    }

    deserializer.deserialize_map(SupportVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_version_value_release() {
        assert_eq!(VersionValue::from("56").release(), Some(Version::release(56, 0, 0)));
        assert_eq!(VersionValue::from("≤79").release(), Some(Version::release(79, 0, 0)));
        assert_eq!(VersionValue::from("preview").release(), None);
        assert_eq!(VersionValue::Flag(true).release(), None);
        assert!(!VersionValue::Flag(false).is_set());
        assert!(VersionValue::Flag(true).is_set());
    }

    #[test]
    fn test_support_statement_single_or_many() {
        let single: SupportStatement = serde_json::from_value(json!({ "version_added": "12" })).unwrap();
        assert_eq!(single.entries().len(), 1);

        let many: SupportStatement = serde_json::from_value(json!([
            { "version_added": "12" },
            { "version_added": "10", "version_removed": "11", "flags": [{ "type": "preference" }] }
        ]))
        .unwrap();
        assert_eq!(many.entries().len(), 2);
        assert!(many.entries()[1].has_removal());
        assert!(many.entries()[1].is_behind_flag());
    }

    #[test]
    fn test_support_entry_null_and_false() {
        let entry: SupportEntry = serde_json::from_value(json!({
            "version_added": null,
            "version_removed": false,
            "flags": []
        }))
        .unwrap();

        assert_eq!(entry.version_added, None);
        assert!(!entry.has_removal());
        assert!(!entry.is_behind_flag());
        assert!(!entry.is_partial());
    }

    #[test]
    fn test_effective_release_prefers_removal() {
        assert_eq!(
            SupportEntry::removed("3", "7").effective_release(),
            Some(Version::release(7, 0, 0))
        );
        assert_eq!(
            SupportEntry::added("3").effective_release(),
            Some(Version::release(3, 0, 0))
        );
    }

    #[test]
    fn test_compat_statement_keeps_browser_order() {
        let statement: CompatStatement = serde_json::from_value(json!({
            "description": "AbortController",
            "mdn_url": "https://developer.mozilla.org/docs/Web/API/AbortController",
            "status": { "experimental": false },
            "support": {
                "safari": { "version_added": "12.1" },
                "chrome": { "version_added": "66" },
                "firefox": { "version_added": "57" }
            }
        }))
        .unwrap();

        let browsers: Vec<&str> = statement.support.iter().map(|(b, _)| b.as_str()).collect();
        assert_eq!(browsers, ["safari", "chrome", "firefox"]);
        assert!(statement.tags.is_empty());
    }
}
