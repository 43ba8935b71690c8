//! Server configuration from the environment.
use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_DATA_PATH: &str = "data/bcd.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address (`CANIUSE_ADDR`)
    pub addr: String,
    /// Compatibility dataset (`CANIUSE_DATA`)
    pub data_path: PathBuf,
    /// Badge templates overriding the embedded ones (`CANIUSE_TEMPLATES`)
    pub templates_path: Option<String>,
    /// Skips the CORS and security headers (`DEBUG=true`)
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            templates_path: None,
            debug: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            addr: lookup("CANIUSE_ADDR").unwrap_or(defaults.addr),
            data_path: lookup("CANIUSE_DATA").map(PathBuf::from).unwrap_or(defaults.data_path),
            templates_path: lookup("CANIUSE_TEMPLATES").filter(|p| !p.is_empty()),
            debug: lookup("DEBUG").is_some_and(|v| v == "true"),
        }
    }
}
