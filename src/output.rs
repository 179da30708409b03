//! CLI output formatting for all commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every project is its semantic identity: positional index, title and
//! tags. Description and links follow as indented context lines. The same
//! header is used by `check`, `list`, `browse` and `build`, so a project
//! looks the same wherever it appears.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Catalog projects.json
//!
//! Projects
//! 001 Portfolio site [web]
//!     Description: Static pages with a filterable project gallery.
//!     Demo: https://example.com/portfolio
//! 002 Grep clone [rust, cli]
//!     Description: Line search over files, written for speed.
//!     Repo: https://example.com/grep
//!
//! Tags
//!     web (1)
//!     rust (1)
//!     cli (1)
//!
//! 2 projects, 3 tags
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Tag web → tag-web.html
//! 001 Portfolio site → project-1.html
//! Catalog → projects.json
//!
//! Generated 1 tag page, 1 project page in dist
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::card::{project_page, tag_page};
use crate::catalog::{Catalog, CatalogSource};
use crate::dom::{Document, MemoryDocument};
use crate::filter::{ALL_TAGS, Criteria};
use crate::gallery::{GalleryController, GalleryState};
use crate::generate::{BuildReport, CATALOG_COPY};
use crate::theme::Theme;
use crate::types::Project;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a project header: positional index + title, then tags if any.
///
/// ```text
/// 001 Grep clone [rust, cli]
/// 002 Untagged
/// ```
fn project_header(index: usize, project: &Project) -> String {
    if project.tags.is_empty() {
        format!("{} {}", format_index(index), project.title)
    } else {
        format!(
            "{} {} [{}]",
            format_index(index),
            project.title,
            project.tags.join(", ")
        )
    }
}

/// Indented description and link lines under a project header.
fn project_context(project: &Project, depth: usize, max_desc: usize) -> Vec<String> {
    let pad = indent(depth);
    let mut lines = vec![format!(
        "{}Description: {}",
        pad,
        truncate_desc(&project.description, max_desc)
    )];
    if let Some(url) = &project.demo_url {
        lines.push(format!("{}Demo: {}", pad, url));
    }
    if let Some(url) = &project.repo_url {
        lines.push(format!("{}Repo: {}", pad, url));
    }
    lines
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// One-line summary of non-default criteria, `None` when unfiltered.
fn criteria_line(criteria: &Criteria) -> Option<String> {
    let mut parts = Vec::new();
    if criteria.active_tag != ALL_TAGS {
        parts.push(format!("tag {}", criteria.active_tag));
    }
    if !criteria.search_query.is_empty() {
        parts.push(format!("search \"{}\"", criteria.search_query));
    }
    (!parts.is_empty()).then(|| format!("Filter: {}", parts.join(", ")))
}

// ============================================================================
// check
// ============================================================================

/// Format the catalog inventory: every project, then tag counts.
pub fn format_check_output(catalog: &Catalog, location: &str) -> Vec<String> {
    let mut lines = vec![format!("Catalog {}", location), String::new()];

    lines.push("Projects".to_string());
    for (idx, project) in catalog.projects().iter().enumerate() {
        lines.push(project_header(idx + 1, project));
        lines.extend(project_context(project, 1, 60));
    }

    let tags = catalog.tags_universe();
    if tags.len() > 1 {
        lines.push(String::new());
        lines.push("Tags".to_string());
        for tag in tags.iter().skip(1) {
            let count = catalog.projects().iter().filter(|p| p.has_tag(tag)).count();
            lines.push(format!("{}{} ({})", indent(1), tag, count));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{}, {}",
        plural(catalog.len(), "project"),
        plural(tags.len() - 1, "tag")
    ));
    lines
}

pub fn print_check_output(catalog: &Catalog, location: &str) {
    for line in format_check_output(catalog, location) {
        println!("{}", line);
    }
}

// ============================================================================
// list
// ============================================================================

/// Format a filtered view. Indices are positions in the view.
pub fn format_list_output(visible: &[&Project], criteria: &Criteria) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(filter) = criteria_line(criteria) {
        lines.push(filter);
    }
    if visible.is_empty() {
        lines.push("No projects match your filters.".to_string());
        return lines;
    }
    for (idx, project) in visible.iter().enumerate() {
        lines.push(project_header(idx + 1, project));
        lines.extend(project_context(project, 1, 60));
    }
    lines
}

pub fn print_list_output(visible: &[&Project], criteria: &Criteria) {
    for line in format_list_output(visible, criteria) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Format the pages written by a build, each with what it shows.
pub fn format_build_output(report: &BuildReport, output_dir: &Path) -> Vec<String> {
    let catalog = &report.catalog;
    let mut lines = Vec::new();
    let mut tag_pages = 0;
    let mut project_pages = 0;

    for file in &report.files {
        if file == "index.html" {
            lines.push(format!("Home \u{2192} {}", file));
        } else if file == CATALOG_COPY {
            lines.push(format!("Catalog \u{2192} {}", file));
        } else if let Some(tag) = catalog
            .tag_entries()
            .into_iter()
            .filter(|t| !t.is_all())
            .find(|t| tag_page(t) == *file)
        {
            tag_pages += 1;
            lines.push(format!("Tag {} \u{2192} {}", tag.name, file));
        } else if let Some((idx, (_, project))) = catalog
            .slugged()
            .enumerate()
            .find(|(_, (slug, _))| project_page(slug) == *file)
        {
            project_pages += 1;
            lines.push(format!("{} {} \u{2192} {}", format_index(idx + 1), project.title, file));
        } else {
            lines.push(file.clone());
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {} in {}",
        plural(tag_pages, "tag page"),
        plural(project_pages, "project page"),
        output_dir.display()
    ));
    lines
}

pub fn print_build_output(report: &BuildReport, output_dir: &Path) {
    for line in format_build_output(report, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// browse
// ============================================================================

/// Commands understood by `folio browse`.
pub fn format_browse_help() -> Vec<String> {
    [
        "Commands",
        "    tag <name>      show only projects with this tag (all = every project)",
        "    search <text>   filter by title or description, empty to clear",
        "    open <n>        open project n of the current list",
        "    tab / back      move focus inside the open project",
        "    close           close the open project (also: esc)",
        "    reset           clear tag and search",
        "    retry           reload the catalog after a failure",
        "    theme           toggle light/dark",
        "    copy            copy the contact email address",
        "    help            show this list",
        "    quit            leave",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Format what the page currently shows.
pub fn format_browse_frame<S: CatalogSource>(
    gallery: &GalleryController<S>,
    doc: &MemoryDocument,
) -> Vec<String> {
    let mut lines = Vec::new();

    match gallery.state() {
        GalleryState::Uninitialized | GalleryState::Loading => {
            lines.push("Loading projects...".to_string());
        }
        GalleryState::LoadFailed { message } => {
            lines.push(format!("Failed to load projects. {}", message));
            lines.push(format!("{}Type `retry` to try again.", indent(1)));
        }
        GalleryState::Ready => {
            if let Some(filter) = criteria_line(gallery.criteria()) {
                lines.push(filter);
            }
            let visible = gallery.visible().unwrap_or_default();
            if visible.is_empty() {
                lines.push("No projects match your filters.".to_string());
            }
            for (idx, project) in visible.iter().enumerate() {
                lines.push(project_header(idx + 1, project));
            }
        }
    }

    if let Some(project) = gallery.modal().current() {
        lines.push(String::new());
        lines.push(format!("[{}]", project.title));
        lines.push(format!("{}{}", indent(1), project.long_description()));
        if let Some(url) = &project.demo_url {
            lines.push(format!("{}Demo: {}", indent(1), url));
        }
        if let Some(url) = &project.repo_url {
            lines.push(format!("{}Repo: {}", indent(1), url));
        }
        if let Some(focused) = doc.focused() {
            lines.push(format!("{}Focus: {}", indent(1), focused));
        }
    }
    lines
}

pub fn print_browse_frame<S: CatalogSource>(gallery: &GalleryController<S>, doc: &MemoryDocument) {
    for line in format_browse_frame(gallery, doc) {
        println!("{}", line);
    }
}

pub fn format_toast(message: &str) -> String {
    format!("Notice: {}", message)
}

// ============================================================================
// theme
// ============================================================================

pub fn format_theme(theme: Theme, path: &Path) -> String {
    format!("Theme: {} ({})", theme.as_str(), path.display())
}

// ============================================================================
// Tests
// ============================================================================
