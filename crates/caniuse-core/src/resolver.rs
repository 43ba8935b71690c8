//! Minimum version resolution.
//!
//! Reduces a browser's support timeline to one verdict and merges the
//! verdicts of several features into the earliest version where all of them
//! are available together.
//!
//! ```text
//! feature ids ─→ dataset lookup ─→ timeline per browser ─→ verdict per browser
//!                                                               │
//!                         merged verdict per browser ←── merge across features
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::compat::{BrowserId, SupportEntry, SupportStatement};
use crate::dataset::CompatDataset;
use crate::error::CompatError;
use crate::verdict::MinimumBrowserVersion;

/// Reduce one browser's raw timeline to a verdict tagged with
/// [`BrowserId::UNKNOWN`].
///
/// Rows are sorted by their effective release (the removal release for
/// removal rows), with a removal sorting after an addition of the same
/// release. If nothing was ever removed the earliest row decides. If the
/// last removal is also the last row the feature ends removed. Otherwise
/// the row right after the last removal decides.
///
/// A deciding row whose `version_added` names no numbered release
/// (`true`, `"preview"`) yields an unsupported verdict rather than a
/// guessed version.
pub fn find_feature_support(
    statement: &SupportStatement,
) -> Result<MinimumBrowserVersion, CompatError> {
    let mut timeline: Vec<&SupportEntry> = statement.entries().iter().collect();
    if timeline.is_empty() {
        return Err(CompatError::EmptyTimeline {
            browser: BrowserId::UNKNOWN.to_string(),
        });
    }

    timeline.sort_by(|a, b| chronological(a, b));

    let deciding = match timeline.iter().rposition(|entry| entry.has_removal()) {
        None => timeline[0],
        Some(last_removal) => match timeline.get(last_removal + 1) {
            Some(readded) => *readded,
            None => return Ok(MinimumBrowserVersion::unsupported(BrowserId::unknown())),
        },
    };

    Ok(verdict_from_entry(deciding))
}

/// Rows without a numbered release (`"preview"`, `true`) sort last. At the
/// same release an unflagged row precedes a flagged one and a full
/// implementation precedes a partial one, so input order never matters.
fn chronological(a: &SupportEntry, b: &SupportEntry) -> Ordering {
    let by_release = match (a.effective_release(), b.effective_release()) {
        (Some(left), Some(right)) => left.cmp_release(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_release
        .then_with(|| a.has_removal().cmp(&b.has_removal()))
        .then_with(|| a.is_behind_flag().cmp(&b.is_behind_flag()))
        .then_with(|| a.is_partial().cmp(&b.is_partial()))
}

fn verdict_from_entry(entry: &SupportEntry) -> MinimumBrowserVersion {
    match entry.added_release() {
        Some(version) => MinimumBrowserVersion::supported(
            BrowserId::unknown(),
            version,
            entry.is_partial(),
            entry.is_behind_flag(),
        ),
        None => MinimumBrowserVersion::unsupported(BrowserId::unknown()),
    }
}

/// Combine one browser's supported verdicts across features.
///
/// The newest minimum version wins; partial and flag qualifiers are sticky.
/// Any unsupported input makes the result unsupported.
fn merge_browser_support(
    browser: &BrowserId,
    verdicts: &[&MinimumBrowserVersion],
) -> MinimumBrowserVersion {
    let mut merged: Option<MinimumBrowserVersion> = None;

    for verdict in verdicts {
        let MinimumBrowserVersion::Supported {
            minimum_version,
            partial_support,
            is_behind_flag,
            ..
        } = verdict
        else {
            return MinimumBrowserVersion::unsupported(browser.clone());
        };

        merged = Some(match merged {
            None => MinimumBrowserVersion::supported(
                browser.clone(),
                *minimum_version,
                *partial_support,
                *is_behind_flag,
            ),
            Some(MinimumBrowserVersion::Supported {
                minimum_version: current,
                partial_support: current_partial,
                is_behind_flag: current_flag,
                ..
            }) => MinimumBrowserVersion::supported(
                browser.clone(),
                if minimum_version.is_newer_than(&current) {
                    *minimum_version
                } else {
                    current
                },
                current_partial || *partial_support,
                current_flag || *is_behind_flag,
            ),
            Some(unsupported) => unsupported,
        });
    }

    merged.unwrap_or_else(|| MinimumBrowserVersion::unsupported(browser.clone()))
}

/// Resolves features against a borrowed dataset.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    dataset: &'a CompatDataset,
}

impl<'a> Resolver<'a> {
    pub fn new(dataset: &'a CompatDataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &'a CompatDataset {
        self.dataset
    }

    /// All known feature keys, lower-cased.
    pub fn get_list_of_features(&self) -> Vec<String> {
        self.dataset.feature_keys()
    }

    /// One verdict per browser listed for `feature`, in dataset order.
    pub fn get_lowest_version_for_feature(
        &self,
        feature: &str,
    ) -> Result<Vec<MinimumBrowserVersion>, CompatError> {
        let found = self.dataset.find(feature).inspect_err(|_| {
            tracing::warn!(feature, "feature not found in compatibility data");
        })?;

        let verdicts = found
            .compat
            .support
            .iter()
            .map(|(browser, statement)| {
                find_feature_support(statement)
                    .map(|verdict| verdict.with_browser(browser.clone()))
                    .map_err(|err| match err {
                        CompatError::EmptyTimeline { .. } => CompatError::EmptyTimeline {
                            browser: browser.to_string(),
                        },
                        other => other,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            feature = %found.path,
            browsers = verdicts.len(),
            supported = verdicts.iter().filter(|v| v.is_supported()).count(),
            "resolved feature"
        );

        Ok(verdicts)
    }

    /// One verdict per browser for the earliest release supporting every
    /// feature in `features`.
    ///
    /// Browsers appear in the order they are first seen across the
    /// features. A browser missing from any feature is unsupported.
    pub fn get_lowest_version_for_features<S: AsRef<str>>(
        &self,
        features: &[S],
    ) -> Result<Vec<MinimumBrowserVersion>, CompatError> {
        let per_feature = features
            .iter()
            .map(|feature| self.get_lowest_version_for_feature(feature.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let indexed: Vec<HashMap<&BrowserId, &MinimumBrowserVersion>> = per_feature
            .iter()
            .map(|verdicts| verdicts.iter().map(|v| (v.browser(), v)).collect())
            .collect();

        let mut browsers: Vec<&BrowserId> = Vec::new();
        for verdict in per_feature.iter().flatten() {
            if !browsers.contains(&verdict.browser()) {
                browsers.push(verdict.browser());
            }
        }

        let merged: Vec<MinimumBrowserVersion> = browsers
            .into_iter()
            .map(|browser| {
                let found: Option<Vec<&MinimumBrowserVersion>> = indexed
                    .iter()
                    .map(|verdicts| verdicts.get(browser).copied())
                    .collect();

                match found {
                    Some(verdicts) => merge_browser_support(browser, &verdicts),
                    None => MinimumBrowserVersion::unsupported(browser.clone()),
                }
            })
            .collect();

        tracing::debug!(
            features = features.len(),
            browsers = merged.len(),
            "merged feature support"
        );

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;
    use serde_json::json;

    fn timeline(entries: Vec<SupportEntry>) -> SupportStatement {
        SupportStatement::Many(entries)
    }

    fn assert_supported_at(verdict: &MinimumBrowserVersion, expected: &str) {
        assert!(verdict.is_supported(), "expected support, got {:?}", verdict);
        assert_eq!(verdict.minimum_version().unwrap().to_string(), expected);
    }

    #[test]
    fn test_only_adds_takes_earliest() {
        let result = find_feature_support(&timeline(vec![
            SupportEntry::added("56"),
            SupportEntry::added("60"),
            SupportEntry::added("62"),
        ]))
        .unwrap();

        assert_supported_at(&result, "56.0.0");
        assert!(!result.is_partial());
        assert!(!result.is_behind_flag());
    }

    #[test]
    fn test_readd_after_last_removal() {
        let result = find_feature_support(&timeline(vec![
            SupportEntry::added("1"),
            SupportEntry::added("2"),
            SupportEntry::added("3"),
            SupportEntry::removed("3", "3"),
            SupportEntry::added("4"),
            SupportEntry::added("15"),
        ]))
        .unwrap();

        assert_supported_at(&result, "4.0.0");
        assert!(!result.is_partial());
        assert!(!result.is_behind_flag());
    }

    #[test]
    fn test_readd_after_last_removal_unordered() {
        let result = find_feature_support(&timeline(vec![
            SupportEntry::added("1"),
            SupportEntry::removed("3", "3"),
            SupportEntry::added("2"),
            SupportEntry::added("15"),
            SupportEntry::added("3"),
            SupportEntry::added("4"),
        ]))
        .unwrap();

        assert_supported_at(&result, "4.0.0");
    }

    #[test]
    fn test_every_rotation_gives_same_verdict() {
        let mut entries = vec![
            SupportEntry::added("15"),
            SupportEntry::removed("3", "3"),
            SupportEntry::added("4").partial(),
            SupportEntry::added("1"),
            SupportEntry::added("3"),
            SupportEntry::added("2"),
        ];
        let expected = find_feature_support(&timeline(entries.clone())).unwrap();

        for _ in 0..entries.len() {
            entries.rotate_left(1);
            assert_eq!(find_feature_support(&timeline(entries.clone())).unwrap(), expected);
            entries.reverse();
            assert_eq!(find_feature_support(&timeline(entries.clone())).unwrap(), expected);
        }
        assert!(expected.is_partial());
    }

    #[test]
    fn test_rows_sharing_a_release_are_order_independent() {
        let plain = SupportEntry::added("79");
        let partial = SupportEntry::added("79").partial();
        let flagged = SupportEntry::added("79").with_flag(json!({ "type": "preference" }));

        for pair in [[partial.clone(), plain.clone()], [plain.clone(), partial.clone()]] {
            let result = find_feature_support(&timeline(pair.to_vec())).unwrap();
            assert_supported_at(&result, "79.0.0");
            assert!(!result.is_partial());
        }

        for pair in [[flagged.clone(), plain.clone()], [plain.clone(), flagged.clone()]] {
            let result = find_feature_support(&timeline(pair.to_vec())).unwrap();
            assert!(!result.is_behind_flag());
        }

        let mut entries = vec![
            SupportEntry::removed("40", "50"),
            flagged.clone(),
            partial.clone(),
            SupportEntry::added("79").partial().with_flag(json!({ "type": "preference" })),
        ];
        let expected = find_feature_support(&timeline(entries.clone())).unwrap();
        for _ in 0..entries.len() {
            entries.rotate_left(1);
            assert_eq!(find_feature_support(&timeline(entries.clone())).unwrap(), expected);
            entries.reverse();
            assert_eq!(find_feature_support(&timeline(entries.clone())).unwrap(), expected);
        }
        assert!(expected.is_partial());
        assert!(!expected.is_behind_flag());
    }

    #[test]
    fn test_added_true_without_release_is_unsupported() {
        let statement: SupportStatement =
            serde_json::from_value(json!({ "version_added": true })).unwrap();
        let result = find_feature_support(&statement).unwrap();

        assert!(!result.is_supported());
        assert_eq!(result.minimum_version(), None);
    }

    #[test]
    fn test_all_removed_is_unsupported() {
        let result = find_feature_support(&timeline(vec![
            SupportEntry::removed("1", "2"),
            SupportEntry::removed("2", "3"),
            SupportEntry::removed("3", "4"),
        ]))
        .unwrap();

        assert!(!result.is_supported());
        assert_eq!(result.browser().as_str(), "unknown");
    }

    #[test]
    fn test_removal_followed_by_row_without_version() {
        let result = find_feature_support(&timeline(vec![
            SupportEntry::removed("10", "20"),
            SupportEntry {
                version_added: Some(crate::compat::VersionValue::Flag(false)),
                ..SupportEntry::default()
            },
        ]))
        .unwrap();

        assert!(!result.is_supported());
    }

    #[test]
    fn test_empty_timeline_fails() {
        let err = find_feature_support(&timeline(vec![])).unwrap_err();
        assert!(matches!(err, CompatError::EmptyTimeline { .. }));
    }

    #[test]
    fn test_single_entry_statement() {
        let statement: SupportStatement = serde_json::from_value(json!({
            "version_added": "79",
            "partial_implementation": true,
            "flags": [{ "type": "preference", "name": "#enable-generic-sensor-extra-classes" }]
        }))
        .unwrap();

        let result = find_feature_support(&statement).unwrap();
        assert_supported_at(&result, "79.0.0");
        assert!(result.is_partial());
        assert!(result.is_behind_flag());
    }

    #[test]
    fn test_explicitly_unsupported() {
        let statement: SupportStatement =
            serde_json::from_value(json!({ "version_added": false })).unwrap();
        assert!(!find_feature_support(&statement).unwrap().is_supported());

        let statement: SupportStatement =
            serde_json::from_value(json!({ "version_added": null })).unwrap();
        assert!(!find_feature_support(&statement).unwrap().is_supported());
    }

    #[test]
    fn test_preview_sorts_after_releases() {
        let result = find_feature_support(&timeline(vec![
            SupportEntry::added("preview"),
            SupportEntry::added("14").with_flag(json!({ "type": "preference" })),
        ]))
        .unwrap();

        assert_supported_at(&result, "14.0.0");
        assert!(result.is_behind_flag());
    }

    #[test]
    fn test_ranged_version() {
        let result = find_feature_support(&timeline(vec![SupportEntry::added("≤18")])).unwrap();
        assert_eq!(result.minimum_version(), Some(&Version::release(18, 0, 0)));
    }

    #[test]
    fn test_merge_keeps_first_version_on_tie() {
        let browser = BrowserId::new("chrome");
        let a = MinimumBrowserVersion::supported(browser.clone(), Version::new(10, None, None), false, false);
        let b = MinimumBrowserVersion::supported(browser.clone(), Version::release(10, 0, 0), true, false);

        let merged = merge_browser_support(&browser, &[&a, &b]);
        assert_eq!(merged.minimum_version(), Some(&Version::new(10, None, None)));
        assert!(merged.is_partial());
    }

    fn dataset() -> CompatDataset {
        CompatDataset::from_value(&json!({
            "api": {
                "FeatureA": {
                    "__compat": {
                        "support": {
                            "chrome": { "version_added": "10" },
                            "firefox": { "version_added": "30", "partial_implementation": true },
                            "safari": { "version_added": "9" }
                        }
                    }
                },
                "FeatureB": {
                    "__compat": {
                        "support": {
                            "chrome": [
                                { "version_added": "20" },
                                { "version_added": "12", "flags": [{ "type": "preference" }] }
                            ],
                            "firefox": { "version_added": "25" },
                            "safari": { "version_added": false },
                            "deno": { "version_added": "1.0" }
                        }
                    }
                },
                "Broken": {
                    "__compat": { "support": { "chrome": [] } }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_lowest_version_for_feature_in_dataset_order() {
        let data = dataset();
        let result = Resolver::new(&data).get_lowest_version_for_feature("API:FEATUREB").unwrap();

        let browsers: Vec<&str> = result.iter().map(|v| v.browser().as_str()).collect();
        assert_eq!(browsers, ["chrome", "firefox", "safari", "deno"]);
        assert_supported_at(&result[0], "12.0.0");
        assert!(result[0].is_behind_flag());
        assert!(!result[2].is_supported());
    }

    #[test]
    fn test_unknown_feature() {
        let data = dataset();
        let err = Resolver::new(&data)
            .get_lowest_version_for_feature("api:nope")
            .unwrap_err();
        assert!(err.to_string().contains("Feature \"api:nope\" not found"));
    }

    #[test]
    fn test_empty_timeline_names_browser() {
        let data = dataset();
        let err = Resolver::new(&data)
            .get_lowest_version_for_feature("api:broken")
            .unwrap_err();
        assert!(matches!(err, CompatError::EmptyTimeline { ref browser } if browser == "chrome"));
    }

    #[test]
    fn test_merge_takes_newest_minimum() {
        let data = dataset();
        let result = Resolver::new(&data)
            .get_lowest_version_for_features(&["api:featurea", "api:featureb"])
            .unwrap();

        let browsers: Vec<&str> = result.iter().map(|v| v.browser().as_str()).collect();
        assert_eq!(browsers, ["chrome", "firefox", "safari", "deno"]);

        assert_supported_at(&result[0], "12.0.0");
        assert!(result[0].is_behind_flag());
        assert!(!result[0].is_partial());

        assert_supported_at(&result[1], "30.0.0");
        assert!(result[1].is_partial());

        assert!(!result[2].is_supported());
        assert!(!result[3].is_supported(), "deno is missing from FeatureA");
    }

    #[test]
    fn test_merge_empty_input() {
        let data = dataset();
        let none: [&str; 0] = [];
        assert!(Resolver::new(&data)
            .get_lowest_version_for_features(&none)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_merge_single_feature_is_identity() {
        let data = dataset();
        let resolver = Resolver::new(&data);
        for feature in ["api:featurea", "api:featureb"] {
            assert_eq!(
                resolver.get_lowest_version_for_features(&[feature]).unwrap(),
                resolver.get_lowest_version_for_feature(feature).unwrap()
            );
        }
    }

    #[test]
    fn test_merge_propagates_lookup_failure() {
        let data = dataset();
        let err = Resolver::new(&data)
            .get_lowest_version_for_features(&["api:featurea", "api:missing"])
            .unwrap_err();
        assert!(matches!(err, CompatError::FeatureNotFound(ref f) if f == "api:missing"));
    }
}
