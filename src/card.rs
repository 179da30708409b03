//! Gallery fragments.
//!
//! Every function here is pure: project data in, [`Fragment`] out. Catalog
//! text is untrusted, and all of it (titles, descriptions, tags, alt text,
//! link targets) goes through Maud interpolation, which escapes it. Nothing
//! in this module uses `PreEscaped` on catalog data.
//!
//! ## Element Ids
//!
//! Interactive elements get ids built from the catalog-unique slug of the
//! project or tag (see [`Catalog::slug`](crate::catalog::Catalog::slug) and
//! [`Catalog::tag_entries`](crate::catalog::Catalog::tag_entries)) so
//! the controllers can route clicks and move focus:
//!
//! | Element | Id |
//! |---------|----|
//! | View details | `view-{slug}` |
//! | Card demo link | `demo-{slug}` |
//! | Tag button | `tag-{slug}` |
//! | Retry after failed load | `retry-load` |
//! | Reset filters | `reset-filters` |
//! | Modal demo / repo links | `modal-demo`, `modal-repo` |

use crate::catalog::TagEntry;
use crate::dom::{ElementId, Fragment};
use crate::slug::tag_label;
use crate::types::Project;
use maud::{PreEscaped, html};

pub const RETRY_ID: &str = "retry-load";
pub const RESET_ID: &str = "reset-filters";
pub const MODAL_DEMO_ID: &str = "modal-demo";
pub const MODAL_REPO_ID: &str = "modal-repo";

pub fn view_details_id(slug: &str) -> ElementId {
    ElementId::new(format!("view-{slug}"))
}

pub fn demo_id(slug: &str) -> ElementId {
    ElementId::new(format!("demo-{slug}"))
}

pub fn tag_button_id(slug: &str) -> ElementId {
    ElementId::new(format!("tag-{slug}"))
}

/// Snapshot page showing the gallery filtered to `tag`.
pub fn tag_page(tag: &TagEntry) -> String {
    if tag.is_all() {
        "index.html".to_string()
    } else {
        format!("tag-{}.html", tag.slug)
    }
}

/// Snapshot page showing the project with this slug in the detail modal.
pub fn project_page(slug: &str) -> String {
    format!("project-{slug}.html")
}

/// A single project card.
pub fn render_card(project: &Project, slug: &str) -> Fragment {
    let view_id = view_details_id(slug);
    let demo = project.demo_url.as_deref().map(|url| (demo_id(slug), url));

    let markup = html! {
        article.project-card {
            @if let Some(thumb) = &project.thumbnail {
                img.project-thumbnail src=(thumb) alt=(project.thumbnail_alt()) loading="lazy";
            }
            div.project-body {
                h3.project-title { (project.title) }
                div.project-tags {
                    @for tag in &project.tags {
                        span.project-tag { (tag) }
                    }
                }
                p.project-description { (project.description) }
                div.project-actions {
                    a.btn.btn-primary.view-details
                        id=(view_id.as_str())
                        href=(project_page(slug))
                        role="button"
                        aria-label={ "View details for " (project.title) } {
                        "View Details"
                    }
                    @if let Some((id, url)) = &demo {
                        a.btn.btn-secondary
                            id=(id.as_str())
                            href=(url)
                            target="_blank"
                            rel="noopener noreferrer"
                            aria-label={ "Open live demo for " (project.title) } {
                            "Live Demo"
                        }
                    }
                }
            }
        }
    };

    let mut focusables = vec![view_id];
    if let Some((id, _)) = demo {
        focusables.push(id);
    }
    Fragment::new(markup, focusables)
}

/// All visible cards, each wrapped with a staggered animation delay.
pub fn render_grid(projects: &[(&str, &Project)], stagger_ms: u32) -> Fragment {
    let mut focusables = Vec::new();
    let cards: Vec<Fragment> = projects
        .iter()
        .map(|(slug, project)| render_card(project, slug))
        .collect();
    let markup = html! {
        @for (idx, card) in cards.iter().enumerate() {
            div.project-card-wrapper style={ "animation-delay: " (idx as u64 * u64::from(stagger_ms)) "ms" } {
                (PreEscaped(&card.html))
            }
        }
    };
    for card in cards {
        focusables.extend(card.focusables);
    }
    Fragment::new(markup, focusables)
}

/// Tag filter buttons, `active` marked.
pub fn render_tag_filters(tags: &[TagEntry], active: &str) -> Fragment {
    let markup = html! {
        @for tag in tags {
            @let is_active = tag.name == active;
            a.tag-btn.active[is_active]
                id=(tag_button_id(&tag.slug).as_str())
                href=(tag_page(tag))
                data-tag=(tag.name)
                role="button"
                aria-pressed=(if is_active { "true" } else { "false" }) {
                (tag_label(&tag.name))
            }
        }
    };
    Fragment::new(markup, tags.iter().map(|t| tag_button_id(&t.slug)).collect())
}

/// Placeholder cards shown while the catalog loads.
pub fn render_skeletons(count: usize) -> Fragment {
    let markup = html! {
        @for _ in 0..count {
            div.skeleton-card aria-hidden="true" {
                div.skeleton-thumbnail {}
                div.skeleton-body {
                    div.skeleton-line.title {}
                    div.skeleton-line.tags {}
                    div.skeleton-line."desc-1" {}
                    div.skeleton-line."desc-2" {}
                    div.skeleton-line.button {}
                }
            }
        }
    };
    Fragment::new(markup, vec![])
}

/// Inline load failure with a retry action.
pub fn render_load_error(message: &str) -> Fragment {
    let markup = html! {
        div.error-message role="alert" {
            p { "Failed to load projects. " (message) }
            button.btn.btn-primary id=(RETRY_ID) type="button" { "Try Again" }
        }
    };
    Fragment::new(markup, vec![ElementId::new(RETRY_ID)])
}

/// Contents of the no-results mount.
pub fn render_no_results() -> Fragment {
    let markup = html! {
        p { "No projects match your filters." }
        button.btn.btn-secondary id=(RESET_ID) type="button" { "Reset filters" }
    };
    Fragment::new(markup, vec![ElementId::new(RESET_ID)])
}

/// Body of the detail modal.
pub fn render_modal_body(project: &Project) -> Fragment {
    let markup = html! {
        @if let Some(image) = &project.image {
            img.modal-image src=(image) alt=(project.image_alt());
        }
        h2.modal-title id="modal-title" { (project.title) }
        @if !project.tags.is_empty() {
            div.project-tags {
                @for tag in &project.tags {
                    span.project-tag { (tag) }
                }
            }
        }
        p.modal-description { (project.long_description()) }
        div.modal-actions {
            @if let Some(url) = &project.demo_url {
                a.btn.btn-primary id=(MODAL_DEMO_ID) href=(url) target="_blank" rel="noopener noreferrer" {
                    "View Live Demo"
                }
            }
            @if let Some(url) = &project.repo_url {
                a.btn.btn-secondary id=(MODAL_REPO_ID) href=(url) target="_blank" rel="noopener noreferrer" {
                    "View Source"
                }
            }
        }
    };

    let mut focusables = Vec::new();
    if project.demo_url.is_some() {
        focusables.push(ElementId::new(MODAL_DEMO_ID));
    }
    if project.repo_url.is_some() {
        focusables.push(ElementId::new(MODAL_REPO_ID));
    }
    Fragment::new(markup, focusables)
}
