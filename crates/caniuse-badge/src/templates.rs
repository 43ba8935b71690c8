//! Badge template file loading.
//!
//! Templates live in a YAML file with named Handlebars templates and named
//! partials shared between them. The default file is embedded at build time.

use serde::Deserialize;
use std::collections::HashMap;

use crate::BadgeError;

/// Embedded default templates
const EMBEDDED_TEMPLATES: &str = include_str!("../templates/badges.yaml");

/// Top-level templates file structure
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: HashMap<String, Template>,
    #[serde(default)]
    pub partials: HashMap<String, String>,
}

/// A single template definition
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub description: String,
    pub template: String,
}

impl TemplatesFile {
    /// The templates shipped with the crate
    pub fn embedded() -> Result<Self, BadgeError> {
        Self::from_yaml(EMBEDDED_TEMPLATES)
    }

    /// Load templates from a YAML file
    pub fn load(path: &str) -> Result<Self, BadgeError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BadgeError::Template(format!("failed to read {}: {}", path, e)))?;
        Self::from_yaml(&content)
    }

    /// Parse templates from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, BadgeError> {
        serde_yaml::from_str(yaml).map_err(|e| BadgeError::Template(e.to_string()))
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }
}
