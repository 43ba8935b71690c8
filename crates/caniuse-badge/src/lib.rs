//! caniuse-badge: SVG support badges
//!
//! Turns resolved verdicts into an SVG image with one row per browser,
//! showing the browser name, the first usable major version and a check
//! mark (or a cross when the feature set is unsupported or only available
//! behind a flag).
//!
//! # Example
//!
//! ```
//! use caniuse_badge::{BadgeLine, BadgeRenderer, RenderOptions};
//!
//! let renderer = BadgeRenderer::embedded().unwrap();
//! let svg = renderer
//!     .render_badge(&[BadgeLine::checked("Chrome", "66"), BadgeLine::unchecked("Internet Explorer")], RenderOptions::default())
//!     .unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod renderer;
pub mod templates;
pub mod text;

use caniuse_core::MinimumBrowserVersion;
use caniuse_registry::browser_display_name;
use renderer::TemplateRenderer;
use serde::Serialize;
use serde_json::json;
use std::str::FromStr;
use templates::TemplatesFile;
use text::{px, text_width, DEFAULT_FONT_SIZE};
use thiserror::Error;

const ROW_HEIGHT: f64 = 40.0;
const ROW_PADDING: f64 = 2.0;
const MIN_ROW_WIDTH: f64 = 110.0;
/// Left edge of the browser name.
const NAME_X: f64 = 40.0;
const ERROR_TITLE: &str = "An error occurred while rendering the badge.";
const ERROR_FONT_SIZE: f64 = 14.0;

/// Errors that can occur during badge rendering
#[derive(Debug, Error)]
pub enum BadgeError {
    #[error("Template load failed: {0}")]
    Template(String),
    #[error("Template not found: {0}")]
    MissingTemplate(String),
    #[error("Render failed: {0}")]
    Render(String),
}

/// One browser row of a badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeLine {
    pub browser_name: String,
    /// Shown only on checked rows.
    pub version: Option<String>,
    pub is_checked: bool,
}

impl BadgeLine {
    pub fn checked(browser_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            browser_name: browser_name.into(),
            version: Some(version.into()),
            is_checked: true,
        }
    }

    pub fn unchecked(browser_name: impl Into<String>) -> Self {
        Self {
            browser_name: browser_name.into(),
            version: None,
            is_checked: false,
        }
    }

    /// Checked when supported without a flag; the version is the major release.
    pub fn from_verdict(verdict: &MinimumBrowserVersion) -> Self {
        let name = browser_display_name(verdict.browser()).into_owned();
        match verdict {
            MinimumBrowserVersion::Supported {
                minimum_version,
                is_behind_flag: false,
                ..
            } => Self::checked(name, minimum_version.major.to_string()),
            _ => Self::unchecked(name),
        }
    }

    fn shown_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .filter(|v| self.is_checked && !v.is_empty())
    }

    fn version_x(&self) -> f64 {
        text_width(&self.browser_name, DEFAULT_FONT_SIZE) + 5.0 + NAME_X
    }

    fn width(&self) -> f64 {
        let version = self.shown_version().unwrap_or("");
        MIN_ROW_WIDTH.max(self.version_x() + text_width(version, DEFAULT_FONT_SIZE) + 10.0 + 20.0)
    }
}

pub fn badge_lines(verdicts: &[MinimumBrowserVersion]) -> Vec<BadgeLine> {
    verdicts.iter().map(BadgeLine::from_verdict).collect()
}

/// How rows are stacked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    #[default]
    Vertical,
    Horizontal,
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vertical" => Ok(Layout::Vertical),
            "horizontal" => Ok(Layout::Horizontal),
            other => Err(format!("unknown layout \"{}\" (expected vertical or horizontal)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub layout: Layout,
}

#[derive(Serialize)]
struct RowData {
    x: String,
    y: String,
    width: String,
    initial: String,
    name: String,
    version: Option<String>,
    version_x: String,
    mark_x: String,
    checked: bool,
}

/// Renders badges from the compiled templates.
#[derive(Debug, Clone)]
pub struct BadgeRenderer {
    renderer: TemplateRenderer,
}

impl BadgeRenderer {
    pub fn new(templates: &TemplatesFile) -> Result<Self, BadgeError> {
        Ok(Self {
            renderer: TemplateRenderer::new(templates)?,
        })
    }

    /// Renderer over the templates shipped with the crate.
    pub fn embedded() -> Result<Self, BadgeError> {
        Self::new(&TemplatesFile::embedded()?)
    }

    pub fn render_badge(&self, lines: &[BadgeLine], options: RenderOptions) -> Result<String, BadgeError> {
        let mut rows = Vec::with_capacity(lines.len());
        let mut offset = 0.0;
        let mut widest: f64 = 0.0;

        for line in lines {
            let width = line.width();
            let (x, y) = match options.layout {
                Layout::Vertical => (0.0, offset),
                Layout::Horizontal => (offset, 0.0),
            };
            let version = line.shown_version();
            let mark_x = line.version_x() + text_width(version.unwrap_or(""), DEFAULT_FONT_SIZE);

            rows.push(RowData {
                x: px(x),
                y: px(y),
                width: px(width),
                initial: line
                    .browser_name
                    .chars()
                    .next()
                    .map(|c| c.to_uppercase().to_string())
                    .unwrap_or_default(),
                name: line.browser_name.clone(),
                version: version.map(str::to_string),
                version_x: px(line.version_x()),
                mark_x: px(mark_x),
                checked: line.is_checked,
            });

            offset += match options.layout {
                Layout::Vertical => ROW_HEIGHT + ROW_PADDING,
                Layout::Horizontal => width + ROW_PADDING,
            };
            widest = widest.max(width);
        }

        let (width, height) = if lines.is_empty() {
            (MIN_ROW_WIDTH, 0.0)
        } else {
            match options.layout {
                Layout::Vertical => (widest, offset - ROW_PADDING),
                Layout::Horizontal => (offset - ROW_PADDING, ROW_HEIGHT),
            }
        };

        tracing::debug!(rows = lines.len(), width, height, "rendering badge");

        self.renderer.render(
            "badge",
            &json!({
                "width": px(width),
                "height": px(height),
                "rows": rows,
            }),
        )
    }

    pub fn render_error(&self, message: &str) -> Result<String, BadgeError> {
        let width = text_width(ERROR_TITLE, DEFAULT_FONT_SIZE).max(text_width(message, ERROR_FONT_SIZE)) + 10.0 + NAME_X;

        self.renderer.render(
            "error",
            &json!({
                "width": px(width),
                "title": ERROR_TITLE,
                "message": message,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caniuse_core::{BrowserId, Version};

    #[test]
    fn test_line_from_supported_verdict() {
        let verdict = MinimumBrowserVersion::supported(
            BrowserId::new("chrome_android"),
            Version::release(66, 1, 0),
            true,
            false,
        );
        assert_eq!(BadgeLine::from_verdict(&verdict), BadgeLine::checked("Chrome Android", "66"));
    }

    #[test]
    fn test_line_from_flagged_verdict_is_unchecked() {
        let verdict = MinimumBrowserVersion::supported(
            BrowserId::new("chrome"),
            Version::release(56, 0, 0),
            false,
            true,
        );
        assert_eq!(BadgeLine::from_verdict(&verdict), BadgeLine::unchecked("Chrome"));
    }

    #[test]
    fn test_line_from_unsupported_verdict() {
        let verdict = MinimumBrowserVersion::unsupported(BrowserId::new("ie"));
        assert_eq!(BadgeLine::from_verdict(&verdict), BadgeLine::unchecked("Internet Explorer"));
    }

    #[test]
    fn test_row_width_has_minimum() {
        assert_eq!(BadgeLine::unchecked("Ie").width(), MIN_ROW_WIDTH);
        assert!(BadgeLine::checked("Samsung Internet", "9").width() > MIN_ROW_WIDTH);
    }

    #[test]
    fn test_unchecked_row_ignores_version() {
        let line = BadgeLine {
            browser_name: "Safari".to_string(),
            version: Some("12".to_string()),
            is_checked: false,
        };
        assert_eq!(line.shown_version(), None);
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!("Horizontal".parse::<Layout>(), Ok(Layout::Horizontal));
        assert_eq!("vertical".parse::<Layout>(), Ok(Layout::Vertical));
        assert!("diagonal".parse::<Layout>().is_err());
    }
}
