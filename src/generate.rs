//! Static site generation.
//!
//! Runs a full page session against a [`MemoryDocument`] and serializes the
//! document after each step into a standalone page. No script is shipped:
//! every interaction the gallery supports becomes a link to a pre-rendered
//! state.
//!
//! ## Generated Pages
//!
//! - **Index page** (`index.html`): gallery with default criteria
//! - **Tag pages** (`tag-{slug}.html`): gallery filtered to one tag
//! - **Project pages** (`project-{slug}.html`): index with that project's
//!   detail modal open
//! - **Catalog copy** (`projects.json`): the catalog payload as fetched
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── tag-web.html
//! ├── tag-rust.html
//! ├── project-grep-clone.html
//! ├── ...
//! └── projects.json
//! ```
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time; the color custom
//! properties generated from `config.toml` are prepended to it.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Region contents come from the card renderer, which already escaped every
//! catalog string, and are spliced in verbatim.

use crate::app::{App, RenderError};
use crate::card::{project_page, tag_page};
use crate::catalog::{self, Catalog, CatalogError, MemorySource};
use crate::config::{self, SiteConfig};
use crate::dom::{MemoryDocument, MountPoint};
use crate::modal::OVERLAY_ID;
use crate::theme::{JsonFileStore, StoreError, Theme};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Preference store error: {0}")]
    Store(#[from] StoreError),
}

/// Name of the catalog copy written next to the pages.
pub const CATALOG_COPY: &str = "projects.json";

const CSS_STATIC: &str = include_str!("../static/style.css");

/// What [`generate`] wrote.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    /// The catalog the pages were rendered from.
    pub catalog: Catalog,
    /// Written files relative to the output directory, in write order.
    pub files: Vec<String>,
}

pub fn generate(
    config: &SiteConfig,
    site_dir: &Path,
    output_dir: &Path,
) -> Result<BuildReport, GenerateError> {
    let source = catalog::source_for(&config.catalog.source, site_dir);
    let response = source.fetch()?;
    let store = JsonFileStore::open(site_dir.join(&config.theme.state_file))?;

    let color_css = config::generate_color_css(&config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    let mut app = App::new(
        MemorySource {
            response: response.clone(),
        },
        store,
        config,
    );
    let mut doc = MemoryDocument::with_all_mounts();
    if let Err(err) = app.start(&mut doc) {
        // Missing mounts cannot happen on a full document; surface the
        // catalog failure with its original location.
        return Err(match err {
            RenderError::Catalog(CatalogError::Fetch { reason, status, .. }) => {
                CatalogError::Fetch {
                    location: source.location(),
                    reason,
                    status,
                }
                .into()
            }
            other => other.into(),
        });
    }

    fs::create_dir_all(output_dir)?;
    let mut report = BuildReport::default();
    let mut write = |name: String, page: Markup| -> Result<(), GenerateError> {
        fs::write(output_dir.join(&name), page.into_string())?;
        debug!(file = %name, "generated");
        report.files.push(name);
        Ok(())
    };

    write("index.html".to_string(), render_page(config, &doc, &css, "index.html"))?;

    for tag in app.gallery().tag_entries().iter().filter(|t| !t.is_all()) {
        app.gallery_mut().set_active_tag(&mut doc, &tag.name);
        let name = tag_page(tag);
        let page = render_page(config, &doc, &css, &name);
        write(name, page)?;
    }
    app.gallery_mut().reset_filters(&mut doc);

    let catalog = app.gallery().catalog().cloned().unwrap_or_default();
    for (idx, (slug, _)) in catalog.slugged().enumerate() {
        let name = project_page(slug);
        app.gallery_mut().open_project(&mut doc, idx);
        let page = render_page(config, &doc, &css, "index.html");
        app.gallery_mut().close_modal(&mut doc);
        write(name, page)?;
    }

    fs::write(output_dir.join(CATALOG_COPY), &response.body)?;
    report.files.push(CATALOG_COPY.to_string());
    report.catalog = catalog;
    Ok(report)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, theme: Theme, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" data-theme=(theme.as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                a.skip-link href="#projects-grid" { "Skip to projects" }
                (content)
            }
        }
    }
}

/// Renders the site header with title, tagline and theme toggle
fn site_header(config: &SiteConfig, doc: &MemoryDocument) -> Markup {
    let toggle = MountPoint::ThemeToggle;
    html! {
        header.site-header {
            div.site-brand {
                a.site-title href="index.html" { (config.site.title) }
                @if !config.site.tagline.is_empty() {
                    p.site-tagline { (config.site.tagline) }
                }
            }
            button.theme-toggle
                id=(toggle.element_id())
                type="button"
                aria-pressed=[doc.attribute(toggle, "aria-pressed")]
                aria-label=[doc.attribute(toggle, "aria-label")] {
                span.theme-icon aria-hidden="true" {}
            }
        }
    }
}

/// Search box, tag filters, grid and no-results block.
fn gallery_section(doc: &MemoryDocument) -> Markup {
    html! {
        section.projects aria-labelledby="projects-heading" {
            h2 id="projects-heading" { "Projects" }
            div.filter-bar {
                form.search-form action="index.html" role="search" {
                    label.visually-hidden for=(MountPoint::SearchInput.element_id()) { "Search projects" }
                    input.search-input
                        id=(MountPoint::SearchInput.element_id())
                        type="search"
                        name="q"
                        placeholder="Search projects…"
                        value=(doc.value(MountPoint::SearchInput));
                }
                nav.filter-tags
                    id=(MountPoint::TagFilters.element_id())
                    aria-label="Filter by tag" {
                    (PreEscaped(doc.html(MountPoint::TagFilters)))
                }
            }
            div.projects-grid id=(MountPoint::Grid.element_id()) aria-live="polite" {
                (PreEscaped(doc.html(MountPoint::Grid)))
            }
            div.no-results
                id=(MountPoint::NoResults.element_id())
                hidden[doc.is_hidden(MountPoint::NoResults)] {
                (PreEscaped(doc.html(MountPoint::NoResults)))
            }
        }
    }
}

/// Contact form, only when an endpoint is configured.
fn contact_section(config: &SiteConfig, doc: &MemoryDocument) -> Markup {
    html! {
        @if let Some(endpoint) = &config.contact.endpoint {
            section.contact aria-labelledby="contact-heading" {
                h2 id="contact-heading" { "Contact" }
                @if let Some(email) = &config.contact.email {
                    p.contact-email { a href={ "mailto:" (email) } { (email) } }
                }
                form.contact-form action=(endpoint) method="POST" {
                    label for="contact-name" { "Name" }
                    input id="contact-name" name="name" type="text" required minlength="2";
                    label for="contact-email" { "Email" }
                    input id="contact-email" name="email" type="email" required;
                    label for="contact-message" { "Message" }
                    textarea id="contact-message" name="message" required minlength="10" {}
                    button.btn.btn-primary type="submit" { "Send" }
                    div.form-status id=(MountPoint::FormStatus.element_id()) role="status" {
                        (PreEscaped(doc.html(MountPoint::FormStatus)))
                    }
                }
            }
        }
    }
}

/// Detail dialog. `back` is the page its close controls return to.
fn modal(doc: &MemoryDocument, back: &str) -> Markup {
    html! {
        div.modal
            id=(MountPoint::Modal.element_id())
            role="dialog"
            aria-modal="true"
            aria-labelledby="modal-title"
            hidden[doc.is_hidden(MountPoint::Modal)] {
            a.modal-overlay id=(OVERLAY_ID) href=(back) tabindex="-1" aria-hidden="true" {}
            div.modal-content {
                a.modal-close
                    id=(MountPoint::ModalClose.element_id())
                    href=(back)
                    aria-label="Close project details" {
                    "×"
                }
                div.modal-body id=(MountPoint::ModalBody.element_id()) {
                    (PreEscaped(doc.html(MountPoint::ModalBody)))
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Serialize the document's current state into a full page.
pub fn render_page(config: &SiteConfig, doc: &MemoryDocument, css: &str, back: &str) -> Markup {
    let theme = doc.theme().unwrap_or(config.theme.default);
    let content = html! {
        (site_header(config, doc))
        main {
            (gallery_section(doc))
            (contact_section(config, doc))
        }
        (modal(doc, back))
        div.toast
            id=(MountPoint::Toast.element_id())
            role="status"
            hidden[doc.is_hidden(MountPoint::Toast)] {
            (PreEscaped(doc.html(MountPoint::Toast)))
        }
        div.visually-hidden aria-live="polite" {
            @if let Some(message) = doc.announcements().last() {
                (message)
            }
        }
        footer.site-footer {
            @if !config.site.author.is_empty() {
                p { "© " (config.site.author) }
            }
        }
    };

    base_document(&config.site.title, css, theme, content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn site_with_catalog(body: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("projects.json"), body).unwrap();
        tmp
    }

    fn build(body: &str) -> (TempDir, BuildReport) {
        let site = site_with_catalog(body);
        let out = site.path().join("dist");
        let report = generate(&SiteConfig::default(), site.path(), &out).unwrap();
        (site, report)
    }

    fn read(site: &TempDir, name: &str) -> String {
        fs::read_to_string(site.path().join("dist").join(name)).unwrap()
    }

    #[test]
    fn base_document_includes_doctype_and_theme() {
        let page = base_document("Test", "body {}", Theme::Dark, html! { p { "x" } }).into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"data-theme="dark""#));
    }

    #[test]
    fn builds_index_tag_and_project_pages() {
        let (_site, report) = build(SAMPLE_CATALOG);
        assert_eq!(report.catalog.len(), 3);
        assert_eq!(
            report.files,
            [
                "index.html",
                "tag-web.html",
                "tag-rust.html",
                "tag-cli.html",
                "tag-api.html",
                "project-1.html",
                "project-2.html",
                "project-3.html",
                "projects.json",
            ]
        );
    }

    #[test]
    fn index_shows_every_card_and_hidden_modal() {
        let (site, _) = build(SAMPLE_CATALOG);
        let index = read(&site, "index.html");
        assert_eq!(index.matches(r#"class="project-card""#).count(), 3);
        assert!(index.contains(r#"id="project-modal""#));
        assert!(between(&index, r#"id="project-modal""#, ">").contains("hidden"));
        assert!(between(&index, r#"id="no-results""#, ">").contains("hidden"));
    }

    #[test]
    fn tag_page_shows_only_tagged_projects() {
        let (site, _) = build(SAMPLE_CATALOG);
        let page = read(&site, "tag-cli.html");
        assert_eq!(page.matches(r#"class="project-card""#).count(), 1);
        assert!(page.contains("Grep clone"));
        assert!(!page.contains("Weather dashboard"));
    }

    #[test]
    fn project_page_has_open_modal() {
        let (site, _) = build(SAMPLE_CATALOG);
        let page = read(&site, "project-3.html");
        assert!(!between(&page, r#"id="project-modal""#, ">").contains("hidden"));
        assert!(page.contains("Forecast chart"));
        assert!(page.contains("Project details for Weather dashboard opened"));
    }

    #[test]
    fn colliding_keys_get_separate_pages() {
        let (site, report) = build(
            r#"[{"title": "C++", "description": "plus"}, {"title": "C#", "description": "sharp"}]"#,
        );
        assert_eq!(
            report.files,
            ["index.html", "project-c.html", "project-c-2.html", "projects.json"]
        );
        let index = read(&site, "index.html");
        assert!(index.contains(r#"href="project-c-2.html""#));
        let page = read(&site, "project-c-2.html");
        assert!(page.contains("Project details for C# opened"));
    }

    #[test]
    fn case_variant_tags_get_separate_pages() {
        let (site, report) = build(
            r#"[{"title": "A", "description": "a", "tags": ["Web"]},
                {"title": "B", "description": "b", "tags": ["web"]}]"#,
        );
        assert!(report.files.contains(&"tag-web.html".to_string()));
        assert!(report.files.contains(&"tag-web-2.html".to_string()));
        let page = read(&site, "tag-web-2.html");
        assert_eq!(page.matches(r#"class="project-card""#).count(), 1);
        assert!(page.contains(">B<"));
    }

    #[test]
    fn catalog_copied_verbatim() {
        let (site, _) = build(TWO_PROJECTS);
        assert_eq!(read(&site, CATALOG_COPY), TWO_PROJECTS);
    }

    #[test]
    fn empty_catalog_shows_no_results() {
        let (site, report) = build("[]");
        assert_eq!(report.files, ["index.html", "projects.json"]);
        let index = read(&site, "index.html");
        assert!(!between(&index, r#"id="no-results""#, ">").contains("hidden"));
        assert!(index.contains("No projects match your filters."));
    }

    #[test]
    fn invalid_catalog_fails_build() {
        let site = site_with_catalog(r#"[{"title": "no description"}]"#);
        let result = generate(&SiteConfig::default(), site.path(), &site.path().join("dist"));
        assert!(matches!(
            result,
            Err(GenerateError::Render(RenderError::Catalog(CatalogError::Schema(_))))
        ));
    }

    #[test]
    fn missing_catalog_names_location() {
        let site = TempDir::new().unwrap();
        let err = generate(&SiteConfig::default(), site.path(), &site.path().join("dist"))
            .unwrap_err();
        assert!(err.to_string().contains("projects.json"), "error was: {err}");
    }

    #[test]
    fn contact_section_only_with_endpoint() {
        let site = site_with_catalog("[]");
        let mut config = SiteConfig::default();
        let out = site.path().join("dist");
        generate(&config, site.path(), &out).unwrap();
        let index = read(&site, "index.html");
        assert!(!index.contains(r#"class="contact-form""#));
        assert!(!index.contains(r#"id="contact-heading""#));

        config.contact.endpoint = Some("https://forms.example/me".to_string());
        generate(&config, site.path(), &out).unwrap();
        let index = read(&site, "index.html");
        assert!(index.contains(r#"action="https://forms.example/me""#));
        assert!(index.contains(r#"id="form-status""#));
    }

    #[test]
    fn saved_theme_preference_used_for_pages() {
        let site = site_with_catalog("[]");
        fs::write(site.path().join(".folio-state.json"), r#"{"theme": "dark"}"#).unwrap();
        generate(&SiteConfig::default(), site.path(), &site.path().join("dist")).unwrap();
        assert!(read(&site, "index.html").contains(r#"data-theme="dark""#));
    }

    #[test]
    fn catalog_text_is_escaped_in_pages() {
        let (site, _) = build(r#"[{"title": "<script>x()</script>", "description": "d"}]"#);
        let index = read(&site, "index.html");
        assert!(!index.contains("<script>x()"));
        assert!(index.contains("&lt;script&gt;"));
    }
}
