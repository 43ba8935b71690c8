//! caniuse-core: minimum browser versions from browser-compat-data
//!
//! Reduces each browser's add/remove support timeline for a feature to a
//! single verdict, and merges verdicts across features into the earliest
//! release where all of them are available.
//!
//! # Example
//!
//! ```
//! use caniuse_core::{CompatDataset, Resolver};
//!
//! let dataset = CompatDataset::from_json_str(r#"{
//!     "api": { "AbortController": { "__compat": { "support": {
//!         "chrome": { "version_added": "66" },
//!         "safari": [{ "version_added": "12.1" }, { "version_added": "11.1", "version_removed": "12" }]
//!     } } } }
//! }"#).unwrap();
//!
//! let verdicts = Resolver::new(&dataset)
//!     .get_lowest_version_for_feature("api:abortcontroller")
//!     .unwrap();
//!
//! assert_eq!(verdicts[0].minimum_version().unwrap().to_string(), "66.0.0");
//! assert!(verdicts[1].is_supported());
//! ```

pub mod compat;
pub mod dataset;
pub mod error;
pub mod resolver;
pub mod verdict;
pub mod version;

pub use compat::{BrowserId, CompatStatement, SupportEntry, SupportStatement, VersionValue};
pub use dataset::{CompatDataset, Feature, PATH_SEPARATOR};
pub use error::CompatError;
pub use resolver::{find_feature_support, Resolver};
pub use verdict::MinimumBrowserVersion;
pub use version::{Version, VersionParseError};

/// Library version
pub const CANIUSE_VERSION: &str = env!("CARGO_PKG_VERSION");
