//! Markdown catalog of every feature in the dataset.
//!
//! Feature paths are grouped by their `:` segments; each segment becomes a
//! heading one level deeper than its parent (capped at `######`).

use caniuse_core::{CompatDataset, CompatStatement, PATH_SEPARATOR};

const MAX_HEADING_LEVEL: usize = 6;

const PREAMBLE: &str = "# Can I Use Embed Features\n\n\
This document lists all available features in the Can I Use embed, organized by category and path.\n\n";

#[derive(Debug, Default)]
struct Group<'a> {
    features: Vec<(&'a str, &'a CompatStatement)>,
    /// Child groups in first-seen order
    children: Vec<(&'a str, Group<'a>)>,
}

impl<'a> Group<'a> {
    fn child(&mut self, segment: &'a str) -> &mut Group<'a> {
        let index = match self.children.iter().position(|(name, _)| *name == segment) {
            Some(index) => index,
            None => {
                self.children.push((segment, Group::default()));
                self.children.len() - 1
            }
        };
        &mut self.children[index].1
    }

    fn insert(&mut self, path: &'a str, compat: &'a CompatStatement) {
        let group = path
            .split(PATH_SEPARATOR)
            .fold(self, |group, segment| group.child(segment));
        group.features.push((path, compat));
    }
}

pub fn render(dataset: &CompatDataset) -> String {
    let mut root = Group::default();
    for (path, compat) in dataset.catalog() {
        root.insert(path, compat);
    }

    let mut out = String::from(PREAMBLE);
    render_children(&root, 1, &mut out);
    out
}

fn render_children(group: &Group<'_>, level: usize, out: &mut String) {
    let heading = "#".repeat((level + 1).min(MAX_HEADING_LEVEL));

    for (name, child) in &group.children {
        out.push_str(&format!("{} {}\n\n", heading, name));

        if !child.features.is_empty() {
            for (path, compat) in &child.features {
                out.push_str(&feature_line(path, compat));
                out.push('\n');
            }
            out.push('\n');
        }

        render_children(child, level + 1, out);
    }
}

fn feature_line(path: &str, compat: &CompatStatement) -> String {
    let mut line = format!("- **{}**", path);
    if let Some(description) = &compat.description {
        line.push_str(&format!(" - {}", description));
    }
    if let Some(url) = &compat.mdn_url {
        line.push_str(&format!(" ([MDN]({}))", url));
    }
    if !compat.tags.is_empty() {
        line.push_str(&format!(" `{}`", compat.tags.join("`, `")));
    }
    line
}
