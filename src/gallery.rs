//! Project gallery controller.
//!
//! Orchestrates fetch → store → filter → render, and routes page events.
//!
//! ## States
//!
//! ```text
//! Uninitialized ──initialize──▶ Loading ──ok──▶ Ready ◀─┐ criteria change
//!                                  ▲      │             └─ (re-render only)
//!                                  │      └─err─▶ LoadFailed
//!                                  └────retry──────┘
//! ```
//!
//! The filter criteria are owned here and change only through
//! [`set_active_tag`](GalleryController::set_active_tag),
//! [`set_search_query`](GalleryController::set_search_query) and
//! [`reset_filters`](GalleryController::reset_filters). Each of them
//! re-derives the visible set through [`filter::apply`] and re-renders
//! synchronously; the catalog is never re-fetched for a criteria change.
//!
//! The fetch is the only step that would suspend in a browser host, so
//! `initialize` is split into [`begin_load`](GalleryController::begin_load)
//! and [`finish_load`](GalleryController::finish_load) for hosts that need
//! to yield in between.

use crate::card::{
    RESET_ID, RETRY_ID, render_grid, render_load_error, render_no_results, render_skeletons,
    render_tag_filters, tag_button_id, view_details_id,
};
use crate::catalog::{Catalog, CatalogError, CatalogSource, CatalogStore, Response, TagEntry};
use crate::config::GalleryConfig;
use crate::dom::{Document, ElementId, Fragment, MountPoint};
use crate::filter::{self, Criteria};
use crate::modal::{KeyPress, ModalController, OVERLAY_ID};
use crate::types::Project;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryState {
    Uninitialized,
    Loading,
    Ready,
    LoadFailed { message: String },
}

/// Input from the page.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Click(ElementId),
    /// New value of the search input.
    Search(String),
    Key(KeyPress),
}

pub struct GalleryController<S: CatalogSource> {
    source: S,
    settings: GalleryConfig,
    state: GalleryState,
    store: CatalogStore,
    criteria: Criteria,
    modal: ModalController,
    /// View-details element → catalog index, for the cards currently shown.
    card_targets: Vec<(ElementId, usize)>,
    /// Tag button element → tag.
    tag_targets: Vec<(ElementId, String)>,
}

impl<S: CatalogSource> GalleryController<S> {
    pub fn new(source: S, settings: GalleryConfig) -> Self {
        Self {
            source,
            settings,
            state: GalleryState::Uninitialized,
            store: CatalogStore::new(),
            criteria: Criteria::default(),
            modal: ModalController::new(),
            card_targets: Vec::new(),
            tag_targets: Vec::new(),
        }
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.store.catalog()
    }

    pub fn tags(&self) -> Vec<String> {
        self.store.tags_universe()
    }

    pub fn tag_entries(&self) -> Vec<TagEntry> {
        self.store.tag_entries()
    }

    /// Button id of the tag named exactly `name`.
    pub fn tag_target(&self, name: &str) -> Option<&ElementId> {
        self.tag_targets
            .iter()
            .find(|(_, tag)| tag == name)
            .map(|(id, _)| id)
    }

    /// View-details id of the card at `position` (0-based) in the grid.
    pub fn card_target(&self, position: usize) -> Option<&ElementId> {
        self.card_targets.get(position).map(|(id, _)| id)
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    /// Visible projects, or `None` while no catalog is ready to show.
    pub fn visible(&self) -> Option<Vec<&Project>> {
        match (&self.state, self.store.catalog()) {
            (GalleryState::Ready, Some(catalog)) => {
                Some(filter::apply(catalog.projects(), &self.criteria))
            }
            _ => None,
        }
    }

    /// Load the catalog and render the gallery, or the failure message.
    ///
    /// The error is also surfaced in the document with a retry action.
    pub fn initialize(&mut self, doc: &mut dyn Document) -> Result<(), CatalogError> {
        self.begin_load(doc);
        let fetched = self.source.fetch();
        self.finish_load(doc, fetched)
    }

    /// Enter `Loading` and show placeholder cards.
    pub fn begin_load(&mut self, doc: &mut dyn Document) {
        debug!(location = %self.source.location(), "loading catalog");
        self.modal.close(doc);
        self.state = GalleryState::Loading;
        self.card_targets.clear();
        doc.set_hidden(MountPoint::NoResults, true);
        doc.render(
            MountPoint::Grid,
            render_skeletons(self.settings.skeleton_cards),
        );
    }

    /// Apply a fetch result and leave `Loading`.
    pub fn finish_load(
        &mut self,
        doc: &mut dyn Document,
        fetched: Result<Response, CatalogError>,
    ) -> Result<(), CatalogError> {
        let location = self.source.location();
        match self.store.accept(&location, fetched) {
            Ok(catalog) => {
                info!(projects = catalog.len(), "gallery ready");
                self.state = GalleryState::Ready;
                self.criteria = Criteria::default();
                doc.set_value(MountPoint::SearchInput, "");
                self.refresh(doc);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "catalog load failed");
                let message = err.to_string();
                self.card_targets.clear();
                doc.render(MountPoint::Grid, render_load_error(&message));
                self.state = GalleryState::LoadFailed { message };
                Err(err)
            }
        }
    }

    /// Re-run [`initialize`](Self::initialize) after a failed load. Does
    /// nothing in any other state.
    pub fn retry(&mut self, doc: &mut dyn Document) -> Result<(), CatalogError> {
        if !matches!(self.state, GalleryState::LoadFailed { .. }) {
            debug!(state = ?self.state, "retry ignored");
            return Ok(());
        }
        self.initialize(doc)
    }

    pub fn set_active_tag(&mut self, doc: &mut dyn Document, tag: &str) {
        self.criteria.active_tag = tag.to_string();
        self.refresh(doc);
    }

    pub fn set_search_query(&mut self, doc: &mut dyn Document, query: &str) {
        self.criteria.search_query = query.to_string();
        self.refresh(doc);
    }

    /// Back to `"all"` with an empty search box.
    pub fn reset_filters(&mut self, doc: &mut dyn Document) {
        self.criteria = Criteria::default();
        doc.set_value(MountPoint::SearchInput, "");
        self.refresh(doc);
    }

    /// Open the modal for the catalog entry at `index`.
    pub fn open_project(&mut self, doc: &mut dyn Document, index: usize) -> bool {
        let Some(project) = self
            .store
            .catalog()
            .and_then(|c| c.projects().get(index))
            .cloned()
        else {
            return false;
        };
        self.modal.open(doc, project);
        true
    }

    pub fn close_modal(&mut self, doc: &mut dyn Document) -> bool {
        self.modal.close(doc)
    }

    /// Route a page event. Returns true when the gallery consumed it.
    pub fn handle(&mut self, doc: &mut dyn Document, event: UiEvent) -> bool {
        match event {
            UiEvent::Key(press) => self.modal.handle_key(doc, press),
            UiEvent::Search(_) if self.modal.is_open() => false,
            UiEvent::Search(query) => {
                doc.set_value(MountPoint::SearchInput, &query);
                self.set_search_query(doc, &query);
                true
            }
            UiEvent::Click(target) => self.handle_click(doc, &target),
        }
    }

    fn handle_click(&mut self, doc: &mut dyn Document, target: &ElementId) -> bool {
        if self.modal.is_open() {
            // The overlay sits above the page; only the dialog's own
            // controls are reachable.
            let closes = target.as_str() == OVERLAY_ID || *target == MountPoint::ModalClose.id();
            return closes && self.modal.close(doc);
        }

        if target.as_str() == RETRY_ID {
            if !matches!(self.state, GalleryState::LoadFailed { .. }) {
                return false;
            }
            // A second failure is rendered into the grid with a fresh retry action.
            if let Err(err) = self.retry(doc) {
                debug!(error = %err, "retry failed");
            }
            return true;
        }
        if target.as_str() == RESET_ID {
            self.reset_filters(doc);
            return true;
        }
        if let Some(tag) = lookup(&self.tag_targets, target).cloned() {
            self.set_active_tag(doc, &tag);
            return true;
        }
        if let Some(index) = lookup(&self.card_targets, target).copied() {
            return self.open_project(doc, index);
        }
        false
    }

    /// Re-derive the visible set and re-render tags, grid and no-results.
    fn refresh(&mut self, doc: &mut dyn Document) {
        if self.state != GalleryState::Ready {
            return;
        }
        let Some(catalog) = self.store.catalog() else {
            return;
        };

        let tags = catalog.tag_entries();
        self.tag_targets = tags
            .iter()
            .map(|t| (tag_button_id(&t.slug), t.name.clone()))
            .collect();
        doc.render(
            MountPoint::TagFilters,
            render_tag_filters(&tags, &self.criteria.active_tag),
        );

        let visible: Vec<(usize, &str, &Project)> = catalog
            .slugged()
            .enumerate()
            .filter(|(_, (_, p))| filter::matches(p, &self.criteria))
            .map(|(idx, (slug, p))| (idx, slug, p))
            .collect();
        debug!(
            tag = %self.criteria.active_tag,
            query = %self.criteria.search_query,
            visible = visible.len(),
            "gallery filtered"
        );

        self.card_targets = visible
            .iter()
            .map(|(idx, slug, _)| (view_details_id(slug), *idx))
            .collect();

        if visible.is_empty() {
            doc.render(MountPoint::Grid, Fragment::empty());
            doc.render(MountPoint::NoResults, render_no_results());
            doc.set_hidden(MountPoint::NoResults, false);
        } else {
            let projects: Vec<(&str, &Project)> =
                visible.iter().map(|(_, slug, p)| (*slug, *p)).collect();
            doc.render(
                MountPoint::Grid,
                render_grid(&projects, self.settings.effective_stagger_ms()),
            );
            doc.set_hidden(MountPoint::NoResults, true);
        }
    }

    /// True when the no-results indicator applies: loaded, and nothing matches.
    pub fn shows_no_results(&self) -> bool {
        self.visible().is_some_and(|v| v.is_empty())
    }
}

fn lookup<'a, T>(targets: &'a [(ElementId, T)], id: &ElementId) -> Option<&'a T> {
    targets.iter().find(|(el, _)| el == id).map(|(_, v)| v)
}
