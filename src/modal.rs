//! Project detail dialog.
//!
//! `Closed → Open → Closed`. Opening records whichever element had focus,
//! renders the project into the modal body, shows the dialog and moves focus
//! to the close control. While open, Tab and Shift+Tab cycle through the
//! trap ring (close control first, then the body's links) and never leave
//! it. Closing hides the dialog, clears the body and hands focus back to the
//! recorded element if it is still in the document.

use crate::card::render_modal_body;
use crate::dom::{Document, ElementId, Fragment, MountPoint};
use crate::types::Project;
use tracing::debug;

/// Backdrop behind the dialog. Clicking it closes the modal.
pub const OVERLAY_ID: &str = "modal-overlay";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

#[derive(Debug, Default)]
pub struct ModalController {
    is_open: bool,
    current: Option<Project>,
    previously_focused: Option<ElementId>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn current(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    /// Show `project`. Opening over an already open modal swaps the content
    /// and keeps the original focus origin.
    pub fn open(&mut self, doc: &mut dyn Document, project: Project) {
        if !self.is_open {
            self.previously_focused = doc.focused();
        }
        debug!(project = project.key(), "opening modal");

        doc.render(MountPoint::ModalBody, render_modal_body(&project));
        doc.set_hidden(MountPoint::Modal, false);
        doc.focus(&MountPoint::ModalClose.id());
        doc.announce(&format!("Project details for {} opened", project.title));

        self.current = Some(project);
        self.is_open = true;
    }

    /// Hide the dialog. Returns false when it was already closed.
    pub fn close(&mut self, doc: &mut dyn Document) -> bool {
        if !self.is_open {
            return false;
        }
        self.is_open = false;
        self.current = None;

        doc.set_hidden(MountPoint::Modal, true);
        doc.render(MountPoint::ModalBody, Fragment::empty());
        if let Some(origin) = self.previously_focused.take() {
            if doc.contains(&origin) {
                doc.focus(&origin);
            } else {
                debug!(element = %origin, "focus origin gone, not restoring");
            }
        }
        doc.announce("Project details closed");
        true
    }

    /// Elements focus may visit while the modal is open, in tab order.
    pub fn trap_ring(&self, doc: &dyn Document) -> Vec<ElementId> {
        let mut ring = vec![MountPoint::ModalClose.id()];
        ring.extend(doc.focusables(MountPoint::ModalBody));
        ring
    }

    /// Keyboard handling while open. Returns true when the key was consumed.
    pub fn handle_key(&mut self, doc: &mut dyn Document, press: KeyPress) -> bool {
        if !self.is_open {
            return false;
        }
        match press.key {
            Key::Escape => self.close(doc),
            Key::Tab => {
                let ring = self.trap_ring(doc);
                let position = doc.focused().and_then(|f| ring.iter().position(|id| *id == f));
                let last = ring.len() - 1;
                let next = match (position, press.shift) {
                    (Some(0), true) | (None, true) => last,
                    (Some(i), true) => i - 1,
                    (Some(i), false) if i == last => 0,
                    (Some(i), false) => i + 1,
                    (None, false) => 0,
                };
                doc.focus(&ring[next]);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{MODAL_DEMO_ID, MODAL_REPO_ID};
    use crate::dom::MemoryDocument;
    use crate::test_helpers::*;

    fn linked_project() -> Project {
        let mut p = project("Linked", &["web"]);
        p.demo_url = Some("https://demo.example".to_string());
        p.repo_url = Some("https://repo.example".to_string());
        p
    }

    fn doc_focused_on_search() -> MemoryDocument {
        let mut doc = MemoryDocument::with_all_mounts();
        doc.focus(&MountPoint::SearchInput.id());
        doc
    }

    #[test]
    fn open_shows_modal_and_focuses_close() {
        let mut doc = doc_focused_on_search();
        let mut modal = ModalController::new();
        modal.open(&mut doc, linked_project());

        assert!(modal.is_open());
        assert!(!doc.is_hidden(MountPoint::Modal));
        assert_eq!(doc.focused(), Some(MountPoint::ModalClose.id()));
        assert!(doc.html(MountPoint::ModalBody).contains("Linked"));
    }

    #[test]
    fn tab_cycles_within_modal() {
        let mut doc = doc_focused_on_search();
        let mut modal = ModalController::new();
        modal.open(&mut doc, linked_project());

        let expected = [MODAL_DEMO_ID, MODAL_REPO_ID, "modal-close", MODAL_DEMO_ID];
        for id in expected {
            assert!(modal.handle_key(&mut doc, KeyPress::new(Key::Tab)));
            assert_eq!(doc.focused(), Some(ElementId::new(id)));
        }
    }

    #[test]
    fn shift_tab_wraps_backwards() {
        let mut doc = doc_focused_on_search();
        let mut modal = ModalController::new();
        modal.open(&mut doc, linked_project());

        modal.handle_key(&mut doc, KeyPress::shifted(Key::Tab));
        assert_eq!(doc.focused(), Some(ElementId::new(MODAL_REPO_ID)));
        modal.handle_key(&mut doc, KeyPress::shifted(Key::Tab));
        assert_eq!(doc.focused(), Some(ElementId::new(MODAL_DEMO_ID)));
    }

    #[test]
    fn tab_with_only_close_control_stays_put() {
        let mut doc = doc_focused_on_search();
        let mut modal = ModalController::new();
        modal.open(&mut doc, project("Plain", &[]));

        modal.handle_key(&mut doc, KeyPress::new(Key::Tab));
        modal.handle_key(&mut doc, KeyPress::shifted(Key::Tab));
        assert_eq!(doc.focused(), Some(MountPoint::ModalClose.id()));
    }

    #[test]
    fn escape_restores_previous_focus() {
        let mut doc = doc_focused_on_search();
        let mut modal = ModalController::new();
        modal.open(&mut doc, linked_project());
        modal.handle_key(&mut doc, KeyPress::new(Key::Tab));

        assert!(modal.handle_key(&mut doc, KeyPress::new(Key::Escape)));
        assert!(!modal.is_open());
        assert!(modal.current().is_none());
        assert!(doc.is_hidden(MountPoint::Modal));
        assert_eq!(doc.focused(), Some(MountPoint::SearchInput.id()));
    }

    #[test]
    fn close_when_closed_is_noop() {
        let mut doc = MemoryDocument::with_all_mounts();
        let mut modal = ModalController::new();
        assert!(!modal.close(&mut doc));
        assert!(doc.announcements().is_empty());
    }

    #[test]
    fn keys_ignored_while_closed() {
        let mut doc = MemoryDocument::with_all_mounts();
        let mut modal = ModalController::new();
        assert!(!modal.handle_key(&mut doc, KeyPress::new(Key::Tab)));
    }

    #[test]
    fn vanished_origin_is_not_refocused() {
        let mut doc = MemoryDocument::with_all_mounts();
        doc.render(
            MountPoint::Grid,
            Fragment::new(maud::html! { a id="view-x" {} }, vec![ElementId::new("view-x")]),
        );
        doc.focus(&ElementId::new("view-x"));

        let mut modal = ModalController::new();
        modal.open(&mut doc, project("X", &[]));
        doc.render(MountPoint::Grid, Fragment::empty());
        modal.close(&mut doc);

        assert_ne!(doc.focused(), Some(ElementId::new("view-x")));
    }

    #[test]
    fn reopening_keeps_original_origin() {
        let mut doc = doc_focused_on_search();
        let mut modal = ModalController::new();
        modal.open(&mut doc, project("One", &[]));
        modal.open(&mut doc, project("Two", &[]));
        assert_eq!(modal.current().map(|p| p.title.as_str()), Some("Two"));

        modal.close(&mut doc);
        assert_eq!(doc.focused(), Some(MountPoint::SearchInput.id()));
    }

    #[test]
    fn modal_content_is_escaped() {
        let mut doc = MemoryDocument::with_all_mounts();
        let mut modal = ModalController::new();
        modal.open(&mut doc, project("<img src=x onerror=alert(1)>", &[]));
        assert!(!doc.html(MountPoint::ModalBody).contains("<img src=x"));
    }
}
