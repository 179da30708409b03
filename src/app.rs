//! Page session: gallery, theme and global shortcuts wired to one document.
//!
//! [`App::start`] is the entry point. It refuses to run against a page that
//! lacks any of [`MountPoint::REQUIRED`] and replaces such a page with an
//! initialization diagnostic instead. After start, every page event goes
//! through [`App::handle`]:
//!
//! | Event | Effect |
//! |-------|--------|
//! | `/` | focus the search input |
//! | `t` / `T` | toggle the theme |
//! | click on `theme-toggle` | toggle the theme |
//! | click on `copy-email` | copy the contact address, confirm in a toast |
//! | anything else | gallery / modal routing |
//!
//! The single-character shortcuts are ignored while the search input has
//! focus, and everything outside the dialog is inert while the modal is open.
//!
//! A toast stays up until the next page event.

use crate::catalog::{CatalogError, CatalogSource};
use crate::config::SiteConfig;
use crate::contact::{self, COPY_EMAIL_ID, ContactForm, Delivery, FieldError};
use crate::dom::{Document, Fragment, MountPoint};
use crate::gallery::{GalleryController, UiEvent};
use crate::modal::Key;
use crate::theme::{PreferenceStore, StoreError, ThemeSwitcher};
use maud::html;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Page is missing required elements: {}", .missing.join(", "))]
    MissingMounts { missing: Vec<&'static str> },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub struct App<S: CatalogSource, P: PreferenceStore> {
    gallery: GalleryController<S>,
    theme: ThemeSwitcher<P>,
    contact_email: Option<String>,
    toast: Option<String>,
}

impl<S: CatalogSource, P: PreferenceStore> App<S, P> {
    pub fn new(source: S, store: P, config: &SiteConfig) -> Self {
        Self {
            gallery: GalleryController::new(source, config.gallery.clone()),
            theme: ThemeSwitcher::new(store, config.theme.default),
            contact_email: config.contact.email.clone(),
            toast: None,
        }
    }

    pub fn gallery(&self) -> &GalleryController<S> {
        &self.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut GalleryController<S> {
        &mut self.gallery
    }

    pub fn theme(&self) -> &ThemeSwitcher<P> {
        &self.theme
    }

    /// Message of the toast currently shown.
    pub fn toast(&self) -> Option<&str> {
        self.toast.as_deref()
    }

    /// Check the page, apply the theme and load the gallery.
    ///
    /// A catalog failure is already shown in the grid with a retry action
    /// when it is returned here.
    pub fn start(&mut self, doc: &mut dyn Document) -> Result<(), RenderError> {
        let missing: Vec<&'static str> = MountPoint::REQUIRED
            .into_iter()
            .filter(|m| !doc.has_mount(*m))
            .map(MountPoint::element_id)
            .collect();
        if !missing.is_empty() {
            error!(?missing, "required page elements not found");
            doc.replace_page(render_init_error(&missing));
            return Err(RenderError::MissingMounts { missing });
        }

        self.theme.apply(doc);
        self.gallery.initialize(doc)?;
        info!("page started");
        Ok(())
    }

    /// Route a page event. Returns true when something consumed it.
    pub fn handle(&mut self, doc: &mut dyn Document, event: UiEvent) -> Result<bool, StoreError> {
        if self.toast.take().is_some() {
            doc.set_hidden(MountPoint::Toast, true);
        }
        if self.gallery.modal().is_open() {
            return Ok(self.gallery.handle(doc, event));
        }

        let in_search = doc.focused() == Some(MountPoint::SearchInput.id());
        match &event {
            UiEvent::Key(press) if !in_search => match press.key {
                Key::Char('/') => return Ok(doc.focus(&MountPoint::SearchInput.id())),
                Key::Char('t' | 'T') => {
                    self.theme.toggle(doc)?;
                    return Ok(true);
                }
                _ => {}
            },
            UiEvent::Click(target) if *target == MountPoint::ThemeToggle.id() => {
                self.theme.toggle(doc)?;
                return Ok(true);
            }
            UiEvent::Click(target) if target.as_str() == COPY_EMAIL_ID => {
                return Ok(self.copy_email(doc));
            }
            _ => {}
        }
        Ok(self.gallery.handle(doc, event))
    }

    /// Validate the contact form and render the outcome into the status mount.
    pub fn submit_contact(&mut self, doc: &mut dyn Document, form: &ContactForm) -> Vec<FieldError> {
        let errors = contact::validate(form);
        doc.render(MountPoint::FormStatus, contact::render_status(&errors));
        errors
    }

    /// Show what the endpoint made of a submission that passed validation.
    pub fn finish_contact(&mut self, doc: &mut dyn Document, delivery: Delivery) {
        info!(?delivery, "contact form submitted");
        doc.render(MountPoint::FormStatus, contact::render_delivery(delivery));
    }

    /// Copy the contact address. False when none is configured.
    fn copy_email(&mut self, doc: &mut dyn Document) -> bool {
        let Some(email) = self.contact_email.clone() else {
            return false;
        };
        let message = if doc.copy_text(&email) {
            contact::COPIED_TOAST
        } else {
            debug!("clipboard refused the contact address");
            contact::COPY_FAILED_TOAST
        };
        self.show_toast(doc, message);
        true
    }

    fn show_toast(&mut self, doc: &mut dyn Document, message: &str) {
        doc.render(MountPoint::Toast, render_toast(message));
        doc.set_hidden(MountPoint::Toast, false);
        doc.announce(message);
        self.toast = Some(message.to_string());
    }
}

fn render_toast(message: &str) -> Fragment {
    let markup = html! {
        p.toast-message { (message) }
    };
    Fragment::new(markup, vec![])
}

/// Page shown instead of the site when required elements are missing.
pub fn render_init_error(missing: &[&str]) -> Fragment {
    let markup = html! {
        div.init-error role="alert" {
            h1 { "Initialization Error" }
            p { "The page is missing elements the gallery needs:" }
            ul {
                @for id in missing {
                    li { code { "#" (id) } }
                }
            }
        }
    };
    Fragment::new(markup, vec![])
}
