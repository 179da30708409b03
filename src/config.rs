//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by the user's file in the site directory; the file only needs
//! the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Portfolio"
//! author = ""
//! tagline = ""
//!
//! [catalog]
//! source = "projects.json"  # Path relative to the site dir, or an http(s) URL
//!
//! [gallery]
//! skeleton_cards = 6        # Placeholder cards while the catalog loads
//! stagger_ms = 50           # Card animation delay step
//! reduced_motion = false    # true = no staggering
//!
//! [theme]
//! default = "light"         # Used when no preference has been saved
//! state_file = ".folio-state.json"
//!
//! [contact]
//! # endpoint = "https://formsubmit.co/you@example.com"
//! # email = "you@example.com"
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"
//! border = "#e0e0e0"
//! accent = "#2f6fde"
//! accent_text = "#ffffff"
//!
//! [colors.dark]
//! background = "#0f1115"
//! text = "#eeeeee"
//! text_muted = "#9a9a9a"
//! border = "#2c2f36"
//! accent = "#7aa2ff"
//! accent_text = "#0f1115"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::contact::is_valid_email;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page title and byline.
    pub site: SiteInfo,
    /// Where the project catalog lives.
    pub catalog: CatalogConfig,
    /// Gallery rendering settings.
    pub gallery: GalleryConfig,
    /// Theme default and preference storage.
    pub theme: ThemeConfig,
    /// Contact form target.
    pub contact: ContactConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.source.trim().is_empty() {
            return Err(ConfigError::Validation(
                "catalog.source must not be empty".into(),
            ));
        }
        if !(1..=MAX_SKELETON_CARDS).contains(&self.gallery.skeleton_cards) {
            return Err(ConfigError::Validation(format!(
                "gallery.skeleton_cards must be 1-{MAX_SKELETON_CARDS}"
            )));
        }
        if let Some(endpoint) = &self.contact.endpoint {
            if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
                return Err(ConfigError::Validation(
                    "contact.endpoint must be an http(s) URL".into(),
                ));
            }
        }
        if let Some(email) = &self.contact.email {
            if !is_valid_email(email) {
                return Err(ConfigError::Validation(format!(
                    "contact.email is not an email address: {email}"
                )));
            }
        }
        Ok(())
    }
}

const MAX_SKELETON_CARDS: usize = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    pub author: String,
    /// Line shown under the title in the page header.
    pub tagline: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: String::new(),
            tagline: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Path relative to the site directory, or an `http(s)://` URL.
    pub source: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: "projects.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Number of placeholder cards shown while loading.
    pub skeleton_cards: usize,
    /// Animation delay added per card, in milliseconds.
    pub stagger_ms: u32,
    /// Disable staggered card animation.
    pub reduced_motion: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            skeleton_cards: 6,
            stagger_ms: 50,
            reduced_motion: false,
        }
    }
}

impl GalleryConfig {
    /// Stagger step after applying `reduced_motion`.
    pub fn effective_stagger_ms(&self) -> u32 {
        if self.reduced_motion {
            0
        } else {
            self.stagger_ms
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Theme used when no preference has been saved.
    pub default: Theme,
    /// Preference file, relative to the site directory.
    pub state_file: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: Theme::Light,
            state_file: ".folio-state.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Form submission URL. No contact section without it.
    pub endpoint: Option<String>,
    /// Address shown next to the form.
    pub email: Option<String>,
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Tags, captions, secondary text.
    pub text_muted: String,
    pub border: String,
    /// Buttons, active tag, links.
    pub accent: String,
    /// Text on accent backgrounds.
    pub accent_text: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            accent: "#2f6fde".to_string(),
            accent_text: "#ffffff".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0f1115".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#9a9a9a".to_string(),
            border: "#2c2f36".to_string(),
            accent: "#7aa2ff".to_string(),
            accent_text: "#0f1115".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
title = "Portfolio"
author = ""
# Line shown under the title.
tagline = ""

# ---------------------------------------------------------------------------
# Project catalog
# ---------------------------------------------------------------------------
[catalog]
# JSON array of projects. Path relative to this directory, or an http(s) URL.
source = "projects.json"

# ---------------------------------------------------------------------------
# Gallery
# ---------------------------------------------------------------------------
[gallery]
# Placeholder cards shown while the catalog loads (1-24).
skeleton_cards = 6

# Animation delay added per card, in milliseconds.
stagger_ms = 50

# Set to true to drop the staggered card animation.
reduced_motion = false

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# "light" or "dark", used until a preference is saved.
default = "light"

# Where the saved preference lives, relative to this directory.
state_file = ".folio-state.json"

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# Form submission URL. The contact section is omitted without it.
# endpoint = "https://formsubmit.co/you@example.com"
# email = "you@example.com"

# ---------------------------------------------------------------------------
# Colors - Light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"
border = "#e0e0e0"
accent = "#2f6fde"
accent_text = "#ffffff"

# ---------------------------------------------------------------------------
# Colors - Dark mode
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0f1115"
text = "#eeeeee"
text_muted = "#9a9a9a"
border = "#2c2f36"
accent = "#7aa2ff"
accent_text = "#0f1115"
"##
}

/// Generate CSS custom properties from color config.
///
/// Light values sit on `:root`; dark values apply under `[data-theme="dark"]`,
/// which the theme toggle sets on the document element.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
    --color-accent-text: {light_accent_text};
}}

[data-theme="dark"] {{
    --color-bg: {dark_bg};
    --color-text: {dark_text};
    --color-text-muted: {dark_text_muted};
    --color-border: {dark_border};
    --color-accent: {dark_accent};
    --color-accent-text: {dark_accent_text};
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        light_accent_text = colors.light.accent_text,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
        dark_accent_text = colors.dark.accent_text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.site.title, "Portfolio");
        assert_eq!(config.catalog.source, "projects.json");
        assert_eq!(config.gallery.skeleton_cards, 6);
        assert_eq!(config.gallery.stagger_ms, 50);
        assert_eq!(config.theme.default, Theme::Light);
        assert!(config.contact.endpoint.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.light]
background = "#fafafa"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.light.background, "#fafafa");
        assert_eq!(config.colors.light.text, "#111111");
        assert_eq!(config.colors.dark.background, "#0f1115");
        assert_eq!(config.gallery.skeleton_cards, 6);
    }

    #[test]
    fn parse_theme_default() {
        let config: SiteConfig = toml::from_str("[theme]\ndefault = \"dark\"\n").unwrap();
        assert_eq!(config.theme.default, Theme::Dark);
        assert_eq!(config.theme.state_file, ".folio-state.json");
    }

    #[test]
    fn reduced_motion_zeroes_stagger() {
        let mut gallery = GalleryConfig::default();
        assert_eq!(gallery.effective_stagger_ms(), 50);
        gallery.reduced_motion = true;
        assert_eq!(gallery.effective_stagger_ms(), 0);
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-bg: #1a1a1a"));
        assert!(css.contains(r#"[data-theme="dark"]"#));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.catalog.source, "projects.json");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[site]
title = "Ada's Work"

[catalog]
source = "https://example.com/projects.json"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Ada's Work");
        assert_eq!(config.catalog.source, "https://example.com/projects.json");
        assert_eq!(config.gallery.stagger_ms, 50);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[gallery]\nskeleton_cards = 0\n",
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge tests
    // =========================================================================

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fff"
text = "#000"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fafafa"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let light = merged.get("colors").unwrap().get("light").unwrap();
        assert_eq!(light.get("background").unwrap().as_str(), Some("#fafafa"));
        assert_eq!(light.get("text").unwrap().as_str(), Some("#000"));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("stagger_ms = 50").unwrap();
        let overlay: toml::Value = toml::from_str("stagger_ms = 0").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("stagger_ms").unwrap().as_integer(), Some(0));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[gallery]\nskeleton = 3\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[galery]\nstagger_ms = 3\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_catalog_source() {
        let mut config = SiteConfig::default();
        config.catalog.source = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_contact_endpoint_scheme() {
        let mut config = SiteConfig::default();
        config.contact.endpoint = Some("formsubmit.co/me".to_string());
        assert!(config.validate().is_err());
        config.contact.endpoint = Some("https://formsubmit.co/me".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_contact_email() {
        let mut config = SiteConfig::default();
        config.contact.email = Some("not-an-email".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("contact.email"));
    }

    // =========================================================================
    // stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.catalog.source, defaults.catalog.source);
        assert_eq!(config.gallery.skeleton_cards, defaults.gallery.skeleton_cards);
        assert_eq!(config.theme.default, defaults.theme.default);
        assert_eq!(config.colors.dark.accent, defaults.colors.dark.accent);
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        for section in ["site", "catalog", "gallery", "theme", "contact", "colors"] {
            assert!(val.get(section).is_some(), "missing [{section}]");
        }
    }
}
