use std::fs;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use caniuse_badge::{badge_lines, templates::TemplatesFile, BadgeRenderer, Layout, RenderOptions};
use caniuse_core::{CompatDataset, Resolver};
use caniuse_registry::{all_filter_names, filter_result};

mod catalog;
mod cli;
use cli::Cli;

const LIST_COLUMNS: usize = 3;
const LIST_COLUMN_WIDTH: usize = 25;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let dataset = CompatDataset::load(&cli.data)
        .with_context(|| format!("loading dataset from {}", cli.data.display()))?;

    if cli.list {
        print!("{}", format_feature_list(Resolver::new(&dataset).get_list_of_features()));
        return Ok(());
    }

    if let Some(path) = &cli.catalog {
        fs::write(path, catalog::render(&dataset))
            .with_context(|| format!("writing catalog to {}", path.display()))?;
        eprintln!("✅ Feature catalog saved to: {}", path.display());
        return Ok(());
    }

    let features = cli.requested_features();
    if features.is_empty() {
        bail!(
            "No features specified.\n\
             Use --features <feature-name> or provide feature names as arguments.\n\
             Use --help for usage information or --list to see available features."
        );
    }

    eprintln!("Checking compatibility for features: {}", features.join(", "));

    let verdicts = Resolver::new(&dataset).get_lowest_version_for_features(&features)?;
    let verdicts = filter_result(&cli.filters, verdicts);
    if verdicts.is_empty() {
        let applied = if cli.filters.is_empty() {
            "none".to_string()
        } else {
            cli.filters.join(", ")
        };
        bail!(
            "No browsers match the applied filters: {}\nAvailable filters: {}",
            applied,
            all_filter_names().join(", ")
        );
    }
    tracing::debug!(browsers = verdicts.len(), "rendering badge");

    let renderer = match &cli.templates {
        Some(path) => BadgeRenderer::new(&TemplatesFile::load(path)?)?,
        None => BadgeRenderer::embedded()?,
    };
    let layout = if cli.horizontal {
        Layout::Horizontal
    } else {
        Layout::Vertical
    };
    let svg = renderer.render_badge(&badge_lines(&verdicts), RenderOptions { layout })?;

    match &cli.output {
        Some(path) => {
            fs::write(path, svg).with_context(|| format!("writing badge to {}", path.display()))?;
            eprintln!("✅ Badge saved to: {}", path.display());
        }
        None => println!("{}", svg),
    }
    Ok(())
}

/// Sorted feature keys laid out column-major, followed by a total.
fn format_feature_list(mut features: Vec<String>) -> String {
    features.sort();

    let mut out = format!("Available features ({} total):\n\n", features.len());
    let rows = features.len().div_ceil(LIST_COLUMNS);
    for row in 0..rows {
        let mut line = String::new();
        for column in 0..LIST_COLUMNS {
            if let Some(feature) = features.get(column * rows + row) {
                line.push_str(&format!("{:<width$}", feature, width = LIST_COLUMN_WIDTH));
            }
        }
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!("\nTotal: {} features available\n", features.len()));
    out
}
