//! Catalog loading.
//!
//! The catalog is a JSON array of [`Project`] records fetched from a
//! [`CatalogSource`]: a local file, an HTTP(S) URL, or an in-memory body.
//!
//! ## Failure Modes
//!
//! - **Fetch**: the source could not be read, or answered with a status
//!   outside `200..300`.
//! - **Schema**: the payload is not JSON, not an array, or a record is
//!   missing `title`/`description` or has a wrongly typed field. The error
//!   names the offending record by index.
//!
//! Both are recoverable. The whole payload is parsed before anything is
//! stored, so a failed load leaves the previously held catalog untouched.

use crate::filter::ALL_TAGS;
use crate::slug::unique_slugs;
use crate::types::Project;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to fetch {location}: {reason}")]
    Fetch {
        location: String,
        reason: String,
        /// Transport status when the source answered at all.
        status: Option<u16>,
    },
    #[error("Invalid catalog: {0}")]
    Schema(String),
}

/// Raw answer from a catalog source, before any parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Where the catalog comes from.
pub trait CatalogSource {
    /// Human-readable location, used in error messages.
    fn location(&self) -> String;

    fn fetch(&self) -> Result<Response, CatalogError>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for Box<T> {
    fn location(&self) -> String {
        (**self).location()
    }

    fn fetch(&self) -> Result<Response, CatalogError> {
        (**self).fetch()
    }
}

/// Catalog stored as a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Response, CatalogError> {
        fs::read_to_string(&self.path)
            .map(Response::ok)
            .map_err(|e| CatalogError::Fetch {
                location: self.location(),
                reason: e.to_string(),
                status: None,
            })
    }
}

/// Catalog served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl CatalogSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<Response, CatalogError> {
        let transport = |e: reqwest::Error| CatalogError::Fetch {
            location: self.url.clone(),
            reason: e.to_string(),
            status: None,
        };
        let response = reqwest::blocking::get(&self.url).map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(transport)?;
        Ok(Response { status, body })
    }
}

/// Catalog body held in memory, with a fixed status.
#[derive(Debug, Clone)]
pub struct MemorySource {
    pub response: Response,
}

impl MemorySource {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            response: Response::ok(body),
        }
    }
}

impl CatalogSource for MemorySource {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn fetch(&self) -> Result<Response, CatalogError> {
        Ok(self.response.clone())
    }
}

/// Pick a source for a configured location.
///
/// `http://` and `https://` locations are fetched over the network; anything
/// else is a path relative to `base_dir`.
pub fn source_for(location: &str, base_dir: &Path) -> Box<dyn CatalogSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(base_dir.join(location)))
    }
}

/// Ordered, immutable list of projects for the session.
///
/// Each project also gets a slug that no other project in the catalog
/// shares. Element ids and page names are built from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    projects: Vec<Project>,
    slugs: Vec<String>,
}

/// A tag from [`Catalog::tags_universe`] with its catalog-unique slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub name: String,
    pub slug: String,
}

impl TagEntry {
    pub fn is_all(&self) -> bool {
        self.name == ALL_TAGS
    }
}

impl Catalog {
    pub fn new(projects: Vec<Project>) -> Self {
        let slugs = unique_slugs(projects.iter().map(Project::key));
        Self { projects, slugs }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Slug of the project at `index`.
    pub fn slug(&self, index: usize) -> Option<&str> {
        self.slugs.get(index).map(String::as_str)
    }

    /// Projects in catalog order, each with its slug.
    pub fn slugged(&self) -> impl Iterator<Item = (&str, &Project)> {
        self.slugs.iter().map(String::as_str).zip(&self.projects)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// `"all"` followed by every distinct tag, in first-seen order.
    pub fn tags_universe(&self) -> Vec<String> {
        let mut tags = vec![ALL_TAGS.to_string()];
        for tag in self.projects.iter().flat_map(|p| &p.tags) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }

    /// [`tags_universe`](Self::tags_universe) with slugs. `"all"` always
    /// keeps the plain `all` slug; tags that collide with it or with each
    /// other (`Web` and `web`) are numbered.
    pub fn tag_entries(&self) -> Vec<TagEntry> {
        tag_entries(self.tags_universe())
    }
}

fn tag_entries(names: Vec<String>) -> Vec<TagEntry> {
    let slugs = unique_slugs(names.iter().map(String::as_str));
    names
        .into_iter()
        .zip(slugs)
        .map(|(name, slug)| TagEntry { name, slug })
        .collect()
}

/// Parse a catalog payload.
pub fn parse_catalog(body: &str) -> Result<Catalog, CatalogError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| CatalogError::Schema(format!("not valid JSON: {e}")))?;
    let serde_json::Value::Array(items) = value else {
        return Err(CatalogError::Schema(
            "expected an array of projects".to_string(),
        ));
    };
    let projects = items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value::<Project>(item)
                .map_err(|e| CatalogError::Schema(format!("project {idx}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Catalog::new(projects))
}

/// Holds the catalog for the session.
#[derive(Debug, Default)]
pub struct CatalogStore {
    catalog: Option<Catalog>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and parse, replacing the held catalog on success.
    pub fn load(&mut self, source: &dyn CatalogSource) -> Result<&Catalog, CatalogError> {
        let fetched = source.fetch();
        self.accept(&source.location(), fetched)
    }

    /// Second half of [`load`](Self::load), for hosts that fetch on their own.
    pub fn accept(
        &mut self,
        location: &str,
        fetched: Result<Response, CatalogError>,
    ) -> Result<&Catalog, CatalogError> {
        let response = fetched?;
        if !response.is_success() {
            warn!(location, status = response.status, "catalog fetch failed");
            return Err(CatalogError::Fetch {
                location: location.to_string(),
                reason: format!("HTTP {}", response.status),
                status: Some(response.status),
            });
        }
        let catalog = parse_catalog(&response.body)?;
        debug!(location, projects = catalog.len(), "catalog loaded");
        Ok(self.catalog.insert(catalog))
    }

    /// The held catalog, `None` until the first successful load.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn tags_universe(&self) -> Vec<String> {
        match &self.catalog {
            Some(catalog) => catalog.tags_universe(),
            None => vec![ALL_TAGS.to_string()],
        }
    }

    pub fn tag_entries(&self) -> Vec<TagEntry> {
        tag_entries(self.tags_universe())
    }
}
