//! Project records as they appear in the catalog JSON.
//!
//! Field names follow the catalog's camelCase convention (`longDescription`,
//! `demoUrl`, ...). `title` and `description` are required; everything else
//! is optional. An absent or `null` `tags` field loads as an empty list.

use serde::{Deserialize, Deserializer, Serialize};

/// Alt text used when a record has a thumbnail but no `thumbnailAlt`.
pub const DEFAULT_THUMBNAIL_ALT: &str = "Project screenshot";
/// Alt text used when a record has an image but no `imageAlt`.
pub const DEFAULT_IMAGE_ALT: &str = "Project detail view";

/// A single portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable identifier. Numeric ids are accepted and kept as strings.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub title: String,
    /// Short text shown on the card and searched by the filter.
    pub description: String,
    /// Longer text shown in the detail modal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    /// Tags matched exactly by the filter. A record without `tags` (or with
    /// `null`) is accepted with no tags instead of being rejected.
    #[serde(default, deserialize_with = "tags_or_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
}

impl Project {
    /// Identity of the record: `id` when present, otherwise the title.
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.title)
    }

    pub fn long_description(&self) -> &str {
        self.long_description
            .as_deref()
            .unwrap_or(&self.description)
    }

    pub fn thumbnail_alt(&self) -> &str {
        self.thumbnail_alt.as_deref().unwrap_or(DEFAULT_THUMBNAIL_ALT)
    }

    pub fn image_alt(&self) -> &str {
        self.image_alt.as_deref().unwrap_or(DEFAULT_IMAGE_ALT)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

fn tags_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tags_load_as_empty() {
        let p: Project =
            serde_json::from_str(r#"{"title": "A", "description": "d"}"#).unwrap();
        assert!(p.tags.is_empty());
    }

    #[test]
    fn null_tags_load_as_empty() {
        let p: Project =
            serde_json::from_str(r#"{"title": "A", "description": "d", "tags": null}"#).unwrap();
        assert!(p.tags.is_empty());
    }

    #[test]
    fn camel_case_fields() {
        let p: Project = serde_json::from_str(
            r#"{
                "title": "A",
                "description": "short",
                "longDescription": "long",
                "demoUrl": "https://demo.example",
                "thumbnailAlt": "thumb"
            }"#,
        )
        .unwrap();
        assert_eq!(p.long_description(), "long");
        assert_eq!(p.demo_url.as_deref(), Some("https://demo.example"));
        assert_eq!(p.thumbnail_alt(), "thumb");
    }

    #[test]
    fn long_description_falls_back_to_description() {
        let p: Project = serde_json::from_str(r#"{"title": "A", "description": "d"}"#).unwrap();
        assert_eq!(p.long_description(), "d");
        assert_eq!(p.image_alt(), DEFAULT_IMAGE_ALT);
    }

    #[test]
    fn key_prefers_id_and_accepts_numbers() {
        let p: Project =
            serde_json::from_str(r#"{"id": 7, "title": "A", "description": "d"}"#).unwrap();
        assert_eq!(p.key(), "7");

        let p: Project = serde_json::from_str(r#"{"title": "A", "description": "d"}"#).unwrap();
        assert_eq!(p.key(), "A");
    }

    #[test]
    fn missing_title_is_rejected() {
        let result: Result<Project, _> = serde_json::from_str(r#"{"description": "d"}"#);
        assert!(result.is_err());
    }
}
