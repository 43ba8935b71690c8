//! The browser compatibility dataset.
//!
//! Loaded once from a BCD-shaped JSON document and flattened into an ordered
//! list of features keyed by their colon-joined path (`api:AbortController`,
//! `api:AbortController:abort`, ...). The dataset is read-only after
//! construction and is shared by reference.

use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::compat::CompatStatement;
use crate::error::CompatError;

/// Member holding a feature's compatibility record.
const COMPAT_KEY: &str = "__compat";

/// Separator between path segments of a feature key.
pub const PATH_SEPARATOR: char = ':';

#[derive(Debug, Clone)]
pub struct Feature {
    /// Key as written in the dataset.
    pub path: String,
    /// Lower-cased key used for lookups.
    pub key: String,
    pub compat: CompatStatement,
}

#[derive(Debug, Clone, Default)]
pub struct CompatDataset {
    features: Vec<Feature>,
}

impl CompatDataset {
    /// Load a dataset from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CompatError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            features = dataset.len(),
            "loaded compatibility dataset"
        );
        Ok(dataset)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, CompatError> {
        let root: Value = serde_json::from_reader(reader)?;
        Self::from_value(&root)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CompatError> {
        let root: Value = serde_json::from_str(json)?;
        Self::from_value(&root)
    }

    pub fn from_value(root: &Value) -> Result<Self, CompatError> {
        let mut features = Vec::new();
        collect_features(root, "", &mut features)?;
        Ok(Self { features })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// `(path, record)` pairs with the path as written, in document order.
    pub fn catalog(&self) -> impl Iterator<Item = (&str, &CompatStatement)> {
        self.features.iter().map(|f| (f.path.as_str(), &f.compat))
    }

    /// Every feature key, lower-cased, in document order.
    pub fn feature_keys(&self) -> Vec<String> {
        self.features.iter().map(|f| f.key.clone()).collect()
    }

    /// Case-insensitive exact lookup of a feature key.
    pub fn find(&self, feature: &str) -> Result<&Feature, CompatError> {
        let normalized = feature.to_lowercase();
        self.features
            .iter()
            .find(|f| f.key == normalized)
            .ok_or_else(|| CompatError::FeatureNotFound(feature.to_string()))
    }
}

fn collect_features(node: &Value, prefix: &str, out: &mut Vec<Feature>) -> Result<(), CompatError> {
    let Value::Object(members) = node else {
        return Ok(());
    };

    for (name, child) in members {
        if name.starts_with("__") || !child.is_object() {
            continue;
        }

        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}{}{}", prefix, PATH_SEPARATOR, name)
        };

        if let Some(record) = child.get(COMPAT_KEY) {
            let compat = CompatStatement::deserialize(record).map_err(|source| {
                CompatError::InvalidFeature {
                    path: path.clone(),
                    source,
                }
            })?;
            out.push(Feature {
                key: path.to_lowercase(),
                path: path.clone(),
                compat,
            });
        }

        collect_features(child, &path, out)?;
    }

    Ok(())
}
