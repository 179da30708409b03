//! Document abstraction used by the controllers.
//!
//! The gallery and modal never touch a real page. They read and write named
//! [`MountPoint`]s through the [`Document`] trait: render a [`Fragment`] into
//! a mount, toggle its `hidden` flag, move focus between element ids. A host
//! page implements the trait over its own element lookups; the CLI and the
//! tests use [`MemoryDocument`], which records everything and can be turned
//! back into HTML by [`crate::generate`].
//!
//! ## Mount Points
//!
//! | Mount | Element id | Required |
//! |-------|------------|----------|
//! | `Grid` | `projects-grid` | yes |
//! | `TagFilters` | `filter-tags` | yes |
//! | `SearchInput` | `search-input` | yes |
//! | `Modal` | `project-modal` | yes |
//! | `ModalBody` | `modal-body` | yes |
//! | `ModalClose` | `modal-close` | yes |
//! | `ThemeToggle` | `theme-toggle` | yes |
//! | `NoResults` | `no-results` | no |
//! | `FormStatus` | `form-status` | no |
//! | `Toast` | `toast` | no |

use crate::theme::Theme;
use maud::Markup;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MountPoint {
    Grid,
    TagFilters,
    SearchInput,
    NoResults,
    Modal,
    ModalBody,
    ModalClose,
    ThemeToggle,
    FormStatus,
    Toast,
}

impl MountPoint {
    /// Mounts without which nothing on the page can work.
    pub const REQUIRED: [MountPoint; 7] = [
        MountPoint::Grid,
        MountPoint::TagFilters,
        MountPoint::SearchInput,
        MountPoint::Modal,
        MountPoint::ModalBody,
        MountPoint::ModalClose,
        MountPoint::ThemeToggle,
    ];

    pub const ALL: [MountPoint; 10] = [
        MountPoint::Grid,
        MountPoint::TagFilters,
        MountPoint::SearchInput,
        MountPoint::NoResults,
        MountPoint::Modal,
        MountPoint::ModalBody,
        MountPoint::ModalClose,
        MountPoint::ThemeToggle,
        MountPoint::FormStatus,
        MountPoint::Toast,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            MountPoint::Grid => "projects-grid",
            MountPoint::TagFilters => "filter-tags",
            MountPoint::SearchInput => "search-input",
            MountPoint::NoResults => "no-results",
            MountPoint::Modal => "project-modal",
            MountPoint::ModalBody => "modal-body",
            MountPoint::ModalClose => "modal-close",
            MountPoint::ThemeToggle => "theme-toggle",
            MountPoint::FormStatus => "form-status",
            MountPoint::Toast => "toast",
        }
    }

    pub fn id(self) -> ElementId {
        ElementId::new(self.element_id())
    }
}

/// Value of an element's `id` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Rendered HTML plus the ids of the focusable elements inside it, in
/// document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub html: String,
    pub focusables: Vec<ElementId>,
}

impl Fragment {
    pub fn new(markup: Markup, focusables: Vec<ElementId>) -> Self {
        Self {
            html: markup.into_string(),
            focusables,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Everything the controllers need from a page.
pub trait Document {
    fn has_mount(&self, mount: MountPoint) -> bool;

    /// Replace the contents of `mount`.
    fn render(&mut self, mount: MountPoint, fragment: Fragment);

    fn set_hidden(&mut self, mount: MountPoint, hidden: bool);

    /// Set the value of an input mount.
    fn set_value(&mut self, mount: MountPoint, value: &str);

    fn set_attribute(&mut self, mount: MountPoint, name: &str, value: &str);

    /// Focusable elements currently rendered inside `mount`.
    fn focusables(&self, mount: MountPoint) -> Vec<ElementId>;

    fn contains(&self, id: &ElementId) -> bool;

    fn focused(&self) -> Option<ElementId>;

    /// Move focus. Returns false when no such element exists.
    fn focus(&mut self, id: &ElementId) -> bool;

    /// Polite live-region message for assistive technology.
    fn announce(&mut self, message: &str);

    fn set_theme(&mut self, theme: Theme);

    /// Put `text` on the system clipboard. Returns false when the host
    /// refuses.
    fn copy_text(&mut self, text: &str) -> bool;

    /// Throw away the page and show `fragment` instead.
    fn replace_page(&mut self, fragment: Fragment);
}

/// State of one mount inside a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    pub html: String,
    pub focusables: Vec<ElementId>,
    pub hidden: bool,
    pub value: String,
    pub attributes: BTreeMap<String, String>,
}

/// In-memory [`Document`].
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    regions: BTreeMap<MountPoint, Region>,
    focused: Option<ElementId>,
    announcements: Vec<String>,
    theme: Option<Theme>,
    replaced: Option<String>,
    clipboard: Option<String>,
    clipboard_blocked: bool,
}

impl MemoryDocument {
    /// A document with every mount point, modal, no-results and toast hidden.
    pub fn with_all_mounts() -> Self {
        Self::with_mounts(MountPoint::ALL)
    }

    pub fn with_mounts(mounts: impl IntoIterator<Item = MountPoint>) -> Self {
        let regions = mounts
            .into_iter()
            .map(|mount| {
                let hidden = matches!(
                    mount,
                    MountPoint::Modal | MountPoint::NoResults | MountPoint::Toast
                );
                (
                    mount,
                    Region {
                        hidden,
                        ..Region::default()
                    },
                )
            })
            .collect();
        Self {
            regions,
            ..Self::default()
        }
    }

    pub fn region(&self, mount: MountPoint) -> Option<&Region> {
        self.regions.get(&mount)
    }

    /// Rendered HTML of a mount, empty when the mount is missing.
    pub fn html(&self, mount: MountPoint) -> &str {
        self.region(mount).map(|r| r.html.as_str()).unwrap_or("")
    }

    /// Missing mounts count as hidden.
    pub fn is_hidden(&self, mount: MountPoint) -> bool {
        self.region(mount).is_none_or(|r| r.hidden)
    }

    pub fn value(&self, mount: MountPoint) -> &str {
        self.region(mount).map(|r| r.value.as_str()).unwrap_or("")
    }

    pub fn attribute(&self, mount: MountPoint, name: &str) -> Option<&str> {
        self.region(mount)
            .and_then(|r| r.attributes.get(name))
            .map(String::as_str)
    }

    pub fn announcements(&self) -> &[String] {
        &self.announcements
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    /// Last text copied through [`Document::copy_text`].
    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    /// Make every later [`Document::copy_text`] fail.
    pub fn block_clipboard(&mut self) {
        self.clipboard_blocked = true;
    }

    /// Page content set by [`Document::replace_page`], if any.
    pub fn replaced_page(&self) -> Option<&str> {
        self.replaced.as_deref()
    }
}

impl Document for MemoryDocument {
    fn has_mount(&self, mount: MountPoint) -> bool {
        self.regions.contains_key(&mount)
    }

    fn render(&mut self, mount: MountPoint, fragment: Fragment) {
        if let Some(region) = self.regions.get_mut(&mount) {
            region.html = fragment.html;
            region.focusables = fragment.focusables;
        }
        if let Some(focused) = &self.focused {
            if !self.contains(focused) {
                self.focused = None;
            }
        }
    }

    fn set_hidden(&mut self, mount: MountPoint, hidden: bool) {
        if let Some(region) = self.regions.get_mut(&mount) {
            region.hidden = hidden;
        }
    }

    fn set_value(&mut self, mount: MountPoint, value: &str) {
        if let Some(region) = self.regions.get_mut(&mount) {
            region.value = value.to_string();
        }
    }

    fn set_attribute(&mut self, mount: MountPoint, name: &str, value: &str) {
        if let Some(region) = self.regions.get_mut(&mount) {
            region.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn focusables(&self, mount: MountPoint) -> Vec<ElementId> {
        self.region(mount)
            .map(|r| r.focusables.clone())
            .unwrap_or_default()
    }

    fn contains(&self, id: &ElementId) -> bool {
        self.regions
            .iter()
            .any(|(mount, region)| mount.element_id() == id.as_str() || region.focusables.contains(id))
    }

    fn focused(&self) -> Option<ElementId> {
        self.focused.clone()
    }

    fn focus(&mut self, id: &ElementId) -> bool {
        if self.contains(id) {
            self.focused = Some(id.clone());
            true
        } else {
            false
        }
    }

    fn announce(&mut self, message: &str) {
        self.announcements.push(message.to_string());
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }

    fn copy_text(&mut self, text: &str) -> bool {
        if self.clipboard_blocked {
            return false;
        }
        self.clipboard = Some(text.to_string());
        true
    }

    fn replace_page(&mut self, fragment: Fragment) {
        self.regions.clear();
        self.focused = None;
        self.replaced = Some(fragment.html);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maud::html;

    #[test]
    fn new_document_hides_modal_and_no_results() {
        let doc = MemoryDocument::with_all_mounts();
        assert!(doc.is_hidden(MountPoint::Modal));
        assert!(doc.is_hidden(MountPoint::NoResults));
        assert!(!doc.is_hidden(MountPoint::Grid));
    }

    #[test]
    fn mount_elements_are_focusable_targets() {
        let mut doc = MemoryDocument::with_all_mounts();
        assert!(doc.focus(&MountPoint::SearchInput.id()));
        assert_eq!(doc.focused(), Some(ElementId::new("search-input")));
    }

    #[test]
    fn focus_on_unknown_element_fails() {
        let mut doc = MemoryDocument::with_all_mounts();
        assert!(!doc.focus(&ElementId::new("nowhere")));
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn rendered_focusables_can_take_focus() {
        let mut doc = MemoryDocument::with_all_mounts();
        let fragment = Fragment::new(
            html! { button id="view-a" { "View" } },
            vec![ElementId::new("view-a")],
        );
        doc.render(MountPoint::Grid, fragment);
        assert!(doc.focus(&ElementId::new("view-a")));
        assert!(doc.html(MountPoint::Grid).contains("view-a"));
    }

    #[test]
    fn rerender_drops_focus_on_removed_element() {
        let mut doc = MemoryDocument::with_all_mounts();
        doc.render(
            MountPoint::Grid,
            Fragment::new(html! { button id="a" {} }, vec![ElementId::new("a")]),
        );
        doc.focus(&ElementId::new("a"));
        doc.render(MountPoint::Grid, Fragment::empty());
        assert_eq!(doc.focused(), None);
        assert!(!doc.contains(&ElementId::new("a")));
    }

    #[test]
    fn missing_mount_ignores_writes() {
        let mut doc = MemoryDocument::with_mounts([MountPoint::Grid]);
        doc.render(MountPoint::TagFilters, Fragment::empty());
        assert!(!doc.has_mount(MountPoint::TagFilters));
        assert_eq!(doc.html(MountPoint::TagFilters), "");
    }

    #[test]
    fn clipboard_records_copies_unless_blocked() {
        let mut doc = MemoryDocument::with_all_mounts();
        assert!(doc.copy_text("ada@example.com"));
        assert_eq!(doc.clipboard(), Some("ada@example.com"));

        doc.block_clipboard();
        assert!(!doc.copy_text("other@example.com"));
        assert_eq!(doc.clipboard(), Some("ada@example.com"));
    }

    #[test]
    fn replace_page_removes_everything() {
        let mut doc = MemoryDocument::with_all_mounts();
        doc.replace_page(Fragment::new(html! { h1 { "Broken" } }, vec![]));
        assert!(!doc.has_mount(MountPoint::Grid));
        assert_eq!(doc.replaced_page(), Some("<h1>Broken</h1>"));
    }
}
