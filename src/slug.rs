//! Slugs for element ids and snapshot filenames.
//!
//! Project keys and tags are free text from the catalog. Anything that ends
//! up in an `id` attribute or a filename goes through [`slugify`] first:
//! lowercase ASCII alphanumerics, every other run of characters collapsed to
//! a single dash.
//!
//! - `"Portfolio Site"` → `"portfolio-site"`
//! - `"C++ / Rust"` → `"c-rust"`
//! - `"  web  "` → `"web"`
//! - `"日本"` → `"item"` (nothing left to keep)
//!
//! Different texts can share a slug (`"C++"` and `"C#"` are both `"c"`), so
//! anything that must be unique across a catalog goes through
//! [`unique_slugs`], which numbers the repeats.

use std::collections::HashSet;

const EMPTY_SLUG: &str = "item";

pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

/// Slugs for `texts` in order, unique within the list. A repeat gets the
/// first free `-2`, `-3`, ... suffix.
pub fn unique_slugs<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();
    texts
        .into_iter()
        .map(|text| {
            let base = slugify(text);
            let mut slug = base.clone();
            let mut n = 2;
            while !taken.insert(slug.clone()) {
                slug = format!("{base}-{n}");
                n += 1;
            }
            slug
        })
        .collect()
}

/// Label shown on a tag filter button. The catch-all tag reads "All".
pub fn tag_label(tag: &str) -> &str {
    if tag == crate::filter::ALL_TAGS {
        "All"
    } else {
        tag
    }
}
