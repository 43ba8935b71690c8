//! CLI definitions for the caniuse-embed command-line interface.
//!
//! Without `--list` or `--catalog` the tool resolves the given features,
//! applies the browser filters and writes an SVG badge to a file or stdout.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "caniuse-embed",
    about = "Minimum browser version badges from browser compatibility data",
    version
)]
pub struct Cli {
    /// Browser features to check (can be used multiple times)
    #[arg(short, long = "features", value_name = "FEATURES")]
    pub features: Vec<String>,

    /// Features given as plain arguments
    #[arg(value_name = "FEATURE")]
    pub positional: Vec<String>,

    /// Browser filters (chrome, firefox, safari, main, mobile, etc.)
    #[arg(long = "filter", value_name = "FILTERS")]
    pub filters: Vec<String>,

    /// Output file path (prints to stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// List all available features
    #[arg(short, long)]
    pub list: bool,

    /// Write a Markdown catalog of every feature to FILE
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Browser compatibility dataset (BCD JSON)
    #[arg(long, value_name = "FILE", env = "CANIUSE_DATA", default_value = "data/bcd.json")]
    pub data: PathBuf,

    /// Badge templates overriding the embedded ones
    #[arg(long, value_name = "FILE", env = "CANIUSE_TEMPLATES")]
    pub templates: Option<String>,

    /// Lay the badge rows out side by side
    #[arg(long)]
    pub horizontal: bool,
}

impl Cli {
    /// Features from `--features` followed by the positional ones.
    pub fn requested_features(&self) -> Vec<&str> {
        self.features
            .iter()
            .chain(&self.positional)
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect()
    }
}
