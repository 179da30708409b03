//! Shared test utilities for the folio test suite.
//!
//! Provides catalog payloads, a project builder, title extractors and a
//! scripted catalog source whose answers change from one fetch to the next.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let catalog = parse_catalog(SAMPLE_CATALOG).unwrap();
//! assert_eq!(titles(catalog.projects()), ["Portfolio site", "Grep clone", "Weather dashboard"]);
//!
//! let source = ScriptedSource::new([
//!     Response { status: 500, body: String::new() },
//!     Response::ok(TWO_PROJECTS),
//! ]);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::catalog::{CatalogError, CatalogSource, Response};
use crate::types::Project;

// =========================================================================
// Catalog payloads
// =========================================================================

/// Three projects covering the tags `web`, `rust`, `cli` and `api`.
pub const SAMPLE_CATALOG: &str = r#"[
  {
    "id": 1,
    "title": "Portfolio site",
    "description": "Static pages with a filterable project gallery.",
    "tags": ["web"],
    "thumbnail": "images/portfolio-thumb.png",
    "demoUrl": "https://example.com/portfolio"
  },
  {
    "id": 2,
    "title": "Grep clone",
    "description": "Line search over files, written for speed.",
    "longDescription": "Searches files line by line with regular expressions.",
    "tags": ["rust", "cli"],
    "repoUrl": "https://example.com/grep"
  },
  {
    "id": 3,
    "title": "Weather dashboard",
    "description": "Seven day forecast charts for any city.",
    "tags": ["web", "api"],
    "image": "images/weather.png",
    "imageAlt": "Forecast chart",
    "demoUrl": "https://example.com/weather",
    "repoUrl": "https://example.com/weather-src"
  }
]"#;

/// `A` tagged `web`, `B` tagged `cli`.
pub const TWO_PROJECTS: &str = r#"[
  {"title": "A", "description": "first", "tags": ["web"]},
  {"title": "B", "description": "second", "tags": ["cli"]}
]"#;

// =========================================================================
// Builders and extractors
// =========================================================================

/// Minimal project with the given title and tags and no links or images.
pub fn project(title: &str, tags: &[&str]) -> Project {
    Project {
        id: None,
        title: title.to_string(),
        description: "…".to_string(),
        long_description: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        thumbnail: None,
        thumbnail_alt: None,
        image: None,
        image_alt: None,
        demo_url: None,
        repo_url: None,
    }
}

/// Titles in catalog order.
pub fn titles(projects: &[Project]) -> Vec<&str> {
    projects.iter().map(|p| p.title.as_str()).collect()
}

/// Titles of a filtered view, in order.
pub fn titles_of<'a>(projects: &[&'a Project]) -> Vec<&'a str> {
    projects.iter().map(|p| p.title.as_str()).collect()
}

/// Text between the first `start` and the next `end`. Panics if either is
/// missing.
pub fn between<'a>(haystack: &'a str, start: &str, end: &str) -> &'a str {
    let from = haystack
        .find(start)
        .unwrap_or_else(|| panic!("'{start}' not found in: {haystack}"))
        + start.len();
    let len = haystack[from..]
        .find(end)
        .unwrap_or_else(|| panic!("'{end}' not found after '{start}'"));
    &haystack[from..from + len]
}

/// Undo the entity escaping Maud applies to text and attribute values.
pub fn decode_entities(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

// =========================================================================
// Catalog sources
// =========================================================================

/// Answers each fetch with the next scripted response. Once the script runs
/// out, the last response repeats.
pub struct ScriptedSource {
    responses: RefCell<VecDeque<Response>>,
}

impl ScriptedSource {
    pub fn new(responses: impl IntoIterator<Item = Response>) -> Self {
        Self {
            responses: RefCell::new(responses.into_iter().collect()),
        }
    }
}

impl CatalogSource for ScriptedSource {
    fn location(&self) -> String {
        "<scripted>".to_string()
    }

    fn fetch(&self) -> Result<Response, CatalogError> {
        let mut responses = self.responses.borrow_mut();
        let next = if responses.len() > 1 {
            responses.pop_front()
        } else {
            responses.front().cloned()
        };
        next.ok_or_else(|| CatalogError::Fetch {
            location: self.location(),
            reason: "no scripted response".to_string(),
            status: None,
        })
    }
}
