//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompatError {
    #[error("Feature \"{0}\" not found in browser compatibility data.")]
    FeatureNotFound(String),

    /// A browser's support data was an empty list. Malformed upstream data,
    /// not "unsupported".
    #[error("TIMELINE/no support information for browser \"{browser}\"")]
    EmptyTimeline { browser: String },

    #[error("DATASET/invalid compatibility record at \"{path}\": {source}")]
    InvalidFeature {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("DATASET/{0}")]
    Dataset(#[from] serde_json::Error),

    #[error("IO/{0}")]
    Io(#[from] std::io::Error),
}
