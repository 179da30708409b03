//! Tag and search filtering.
//!
//! Pure functions over a project slice. A project is visible when both hold:
//!
//! - the active tag is `"all"`, or the project carries it
//! - the search query is empty, or the title or description contains it,
//!   ignoring case
//!
//! Results keep catalog order. An empty result is a normal outcome.

use crate::types::Project;

/// Tag that matches every project.
pub const ALL_TAGS: &str = "all";

/// Current tag/search filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    pub active_tag: String,
    pub search_query: String,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            active_tag: ALL_TAGS.to_string(),
            search_query: String::new(),
        }
    }
}

impl Criteria {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

pub fn matches(project: &Project, criteria: &Criteria) -> bool {
    let tag_ok = criteria.active_tag == ALL_TAGS || project.has_tag(&criteria.active_tag);
    tag_ok && matches_query(project, &criteria.search_query)
}

fn matches_query(project: &Project, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    project.title.to_lowercase().contains(&needle)
        || project.description.to_lowercase().contains(&needle)
}

/// Visible subset of `projects` under `criteria`, in catalog order.
pub fn apply<'a>(projects: &'a [Project], criteria: &Criteria) -> Vec<&'a Project> {
    projects.iter().filter(|p| matches(p, criteria)).collect()
}
