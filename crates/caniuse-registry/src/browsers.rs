//! Known browsers and their display names.
use serde::Serialize;
use std::borrow::Cow;

use caniuse_core::BrowserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserName {
    Chrome,
    ChromeAndroid,
    Deno,
    Edge,
    Firefox,
    FirefoxAndroid,
    Ie,
    Nodejs,
    Oculus,
    Opera,
    OperaAndroid,
    Safari,
    SafariIos,
    SamsunginternetAndroid,
    WebviewAndroid,
    WebviewIos,
}

impl BrowserName {
    pub const ALL: [BrowserName; 16] = [
        BrowserName::Chrome,
        BrowserName::ChromeAndroid,
        BrowserName::Deno,
        BrowserName::Edge,
        BrowserName::Firefox,
        BrowserName::FirefoxAndroid,
        BrowserName::Ie,
        BrowserName::Nodejs,
        BrowserName::Oculus,
        BrowserName::Opera,
        BrowserName::OperaAndroid,
        BrowserName::Safari,
        BrowserName::SafariIos,
        BrowserName::SamsunginternetAndroid,
        BrowserName::WebviewAndroid,
        BrowserName::WebviewIos,
    ];

    /// Dataset key, e.g. `"chrome_android"`.
    pub fn key(self) -> &'static str {
        match self {
            BrowserName::Chrome => "chrome",
            BrowserName::ChromeAndroid => "chrome_android",
            BrowserName::Deno => "deno",
            BrowserName::Edge => "edge",
            BrowserName::Firefox => "firefox",
            BrowserName::FirefoxAndroid => "firefox_android",
            BrowserName::Ie => "ie",
            BrowserName::Nodejs => "nodejs",
            BrowserName::Oculus => "oculus",
            BrowserName::Opera => "opera",
            BrowserName::OperaAndroid => "opera_android",
            BrowserName::Safari => "safari",
            BrowserName::SafariIos => "safari_ios",
            BrowserName::SamsunginternetAndroid => "samsunginternet_android",
            BrowserName::WebviewAndroid => "webview_android",
            BrowserName::WebviewIos => "webview_ios",
        }
    }

    /// English display name.
    pub fn display_name(self) -> &'static str {
        match self {
            BrowserName::Chrome => "Chrome",
            BrowserName::ChromeAndroid => "Chrome Android",
            BrowserName::Deno => "Deno",
            BrowserName::Edge => "Edge",
            BrowserName::Firefox => "Firefox",
            BrowserName::FirefoxAndroid => "Firefox Android",
            BrowserName::Ie => "Internet Explorer",
            BrowserName::Nodejs => "Node.js",
            BrowserName::Oculus => "Oculus Browser",
            BrowserName::Opera => "Opera",
            BrowserName::OperaAndroid => "Opera Android",
            BrowserName::Safari => "Safari",
            BrowserName::SafariIos => "Safari iOS",
            BrowserName::SamsunginternetAndroid => "Samsung Internet",
            BrowserName::WebviewAndroid => "Android WebView",
            BrowserName::WebviewIos => "iOS WebView",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|browser| browser.key().eq_ignore_ascii_case(key))
    }
}

/// Display name for a dataset browser key; unknown keys are shown as-is.
pub fn browser_display_name(browser: &BrowserId) -> Cow<'_, str> {
    match BrowserName::from_key(browser.as_str()) {
        Some(known) => Cow::Borrowed(known.display_name()),
        None => Cow::Borrowed(browser.as_str()),
    }
}
