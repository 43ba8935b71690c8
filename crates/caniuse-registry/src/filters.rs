//! Browser filter groups.
//!
//! A filter names a group of browsers (`main`, `mobile`, `chromium`, ...).
//! Filter names match case-insensitively.

use std::collections::HashSet;

use caniuse_core::MinimumBrowserVersion;

use crate::browsers::BrowserName;
use crate::browsers::BrowserName::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserFilter {
    All,
    Desktop,
    Main,
    Web,
    Mobile,
    Legacy,
    Chromium,
    Chrome,
    Firefox,
    Safari,
    Webview,
    StandaloneEngine,
    Vr,
}

impl BrowserFilter {
    pub const ALL: [BrowserFilter; 13] = [
        BrowserFilter::All,
        BrowserFilter::Desktop,
        BrowserFilter::Main,
        BrowserFilter::Web,
        BrowserFilter::Mobile,
        BrowserFilter::Legacy,
        BrowserFilter::Chromium,
        BrowserFilter::Chrome,
        BrowserFilter::Firefox,
        BrowserFilter::Safari,
        BrowserFilter::Webview,
        BrowserFilter::StandaloneEngine,
        BrowserFilter::Vr,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BrowserFilter::All => "all",
            BrowserFilter::Desktop => "desktop",
            BrowserFilter::Main => "main",
            BrowserFilter::Web => "web",
            BrowserFilter::Mobile => "mobile",
            BrowserFilter::Legacy => "legacy",
            BrowserFilter::Chromium => "chromium",
            BrowserFilter::Chrome => "chrome",
            BrowserFilter::Firefox => "firefox",
            BrowserFilter::Safari => "safari",
            BrowserFilter::Webview => "webview",
            BrowserFilter::StandaloneEngine => "standaloneEngine",
            BrowserFilter::Vr => "vr",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn browsers(self) -> &'static [BrowserName] {
        match self {
            BrowserFilter::All => &BrowserName::ALL,
            BrowserFilter::Desktop => &[Chrome, Edge, Firefox, Ie, Nodejs, Opera, Safari],
            BrowserFilter::Main => &[
                Chrome,
                Edge,
                Firefox,
                Opera,
                Safari,
                ChromeAndroid,
                FirefoxAndroid,
                SafariIos,
            ],
            BrowserFilter::Web => &[
                Chrome,
                Edge,
                Firefox,
                Ie,
                Opera,
                Safari,
                ChromeAndroid,
                FirefoxAndroid,
                OperaAndroid,
                SafariIos,
                SamsunginternetAndroid,
                WebviewAndroid,
                WebviewIos,
            ],
            BrowserFilter::Mobile => &[
                ChromeAndroid,
                FirefoxAndroid,
                OperaAndroid,
                SafariIos,
                SamsunginternetAndroid,
                WebviewAndroid,
                WebviewIos,
            ],
            BrowserFilter::Legacy => &[
                Ie,
                Nodejs,
                Oculus,
                OperaAndroid,
                SamsunginternetAndroid,
                WebviewAndroid,
                WebviewIos,
            ],
            BrowserFilter::Chromium => &[
                Chrome,
                ChromeAndroid,
                Edge,
                Opera,
                OperaAndroid,
                SamsunginternetAndroid,
                WebviewAndroid,
            ],
            BrowserFilter::Chrome => &[Chrome, ChromeAndroid],
            BrowserFilter::Firefox => &[Firefox, FirefoxAndroid],
            BrowserFilter::Safari => &[Safari, SafariIos],
            BrowserFilter::Webview => &[WebviewAndroid, WebviewIos],
            BrowserFilter::StandaloneEngine => &[Deno, Nodejs],
            BrowserFilter::Vr => &[Oculus],
        }
    }
}

pub fn all_filter_names() -> Vec<&'static str> {
    BrowserFilter::ALL.iter().map(|f| f.name()).collect()
}

/// Browsers in the named group; unknown names yield none.
pub fn get_browser_filter(name: &str) -> &'static [BrowserName] {
    match BrowserFilter::from_name(name) {
        Some(filter) => filter.browsers(),
        None => &[],
    }
}

/// Keep the verdicts whose browser belongs to any of `filters`.
///
/// Blank filter names are ignored; if none remain the input is returned
/// unchanged. Unknown names contribute no browsers.
pub fn filter_result<S: AsRef<str>>(
    filters: &[S],
    result: Vec<MinimumBrowserVersion>,
) -> Vec<MinimumBrowserVersion> {
    let requested: Vec<&str> = filters
        .iter()
        .map(|f| f.as_ref().trim())
        .filter(|f| !f.is_empty())
        .collect();

    if requested.is_empty() {
        return result;
    }

    let allowed: HashSet<&'static str> = requested
        .iter()
        .flat_map(|name| get_browser_filter(name))
        .map(|browser| browser.key())
        .collect();

    if allowed.is_empty() {
        return Vec::new();
    }

    result
        .into_iter()
        .filter(|verdict| allowed.contains(verdict.browser().as_str().to_lowercase().as_str()))
        .collect()
}
