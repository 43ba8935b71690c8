//! caniuse-registry: browser display names and filter groups
//!
//! Static lookup tables consumed by the presentation layers. The resolver
//! never reads them.
pub mod browsers;
pub mod filters;

pub use browsers::{browser_display_name, BrowserName};
pub use filters::{all_filter_names, filter_result, get_browser_filter, BrowserFilter};
