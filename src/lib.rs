//! # Folio
//!
//! A project portfolio renderer. A JSON catalog of projects becomes a
//! filterable card gallery with a detail modal, either as a live session
//! against a host page or as a set of static HTML snapshots.
//!
//! # Architecture: Controllers Over a Document
//!
//! ```text
//! CatalogSource ─fetch─▶ CatalogStore ─▶ GalleryController ─render─▶ Document
//!                                          │  filter::apply            ▲
//!                                          └─ ModalController ─────────┘
//! ```
//!
//! The controllers never see a real page. They write [`dom::Fragment`]s
//! into named [`dom::MountPoint`]s through the [`dom::Document`] trait and
//! move focus between element ids. That keeps the whole interaction model
//! (filtering, the modal's focus trap, retry after a failed load) testable
//! in memory, and lets [`generate`] turn any reachable state into a page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Catalog sources (file, HTTP, memory), parsing, and the session store |
//! | [`filter`] | Pure tag + search filtering over the catalog |
//! | [`card`] | Maud fragments: cards, tag buttons, skeletons, errors, modal body |
//! | [`gallery`] | Load state machine, filter criteria, click routing |
//! | [`modal`] | Detail dialog with focus trap and focus restore |
//! | [`app`] | Page session: required-element check, theme, global shortcuts, contact form |
//! | [`dom`] | `Document` trait and the in-memory document |
//! | [`theme`] | Light/dark preference and its persistence |
//! | [`contact`] | Contact form validation |
//! | [`generate`] | Static snapshot pages from a page session |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | The `Project` record as it appears in the catalog JSON |
//! | [`slug`] | URL-safe slugs for element ids and page names |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Catalog Text Is Untrusted
//!
//! Every string from the catalog reaches HTML through Maud interpolation,
//! which escapes it. Fragments are assembled from already-escaped Maud output
//! only, so there is no code path that splices raw catalog text into markup.
//!
//! ## No Script in the Output
//!
//! Static builds ship plain HTML and CSS. Tag buttons link to per-tag pages
//! and "View Details" links to a page with that project's modal open. The
//! same controllers produce those pages that drive a live session, so both
//! always agree.

pub mod app;
pub mod card;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod dom;
pub mod filter;
pub mod gallery;
pub mod generate;
pub mod modal;
pub mod output;
pub mod slug;
pub mod theme;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
