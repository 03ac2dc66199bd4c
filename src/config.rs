//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top of it, so
//! a config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! [clinic]
//! whatsapp = "+20 100 000 0000"   # International number for wa.me links
//! phone = "+20 2 2345 6789"
//! email = "hello@example-dental.com"
//! base_url = "https://example-dental.com"
//! opening_hours = ["Sa-Th 10:00-22:00"]
//! price_range = "$$"
//!
//! [clinic.name]
//! en = "Bright Smile Dental"
//! ar = "عيادة الابتسامة المشرقة"
//!
//! [locales]
//! default = "ar"                 # Locale the site root redirects to
//!
//! [interaction]
//! swipe_threshold = 50.0         # Minimum swipe travel in px
//!
//! [interaction.card]
//! long_press_ms = 450
//! reveal_ms = 2500
//! move_tolerance = 10.0
//!
//! [carousels.gallery]
//! policy = "clamp"               # clamp | wrap
//!
//! [carousels.reviews]
//! policy = "wrap"
//!
//! [colors]
//! primary = "#0e7490"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::contact::whatsapp_digits;
use crate::interaction::{BoundaryPolicy, CardTimings};
use crate::locale::Locale;
use crate::types::LocalizedText;

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
    /// Clinic identity and contact details.
    pub clinic: ClinicConfig,
    /// Locale settings.
    pub locales: LocalesConfig,
    /// Touch and hover interaction tuning.
    pub interaction: InteractionConfig,
    /// Boundary behavior per carousel.
    pub carousels: CarouselsConfig,
    /// Brand colors.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clinic.name.en.trim().is_empty() {
            return Err(ConfigError::Validation(
                "clinic.name.en must not be empty".into(),
            ));
        }
        if whatsapp_digits(&self.clinic.whatsapp).len() < 8 {
            return Err(ConfigError::Validation(
                "clinic.whatsapp must contain at least 8 digits".into(),
            ));
        }
        if !(self.clinic.base_url.starts_with("https://")
            || self.clinic.base_url.starts_with("http://"))
        {
            return Err(ConfigError::Validation(
                "clinic.base_url must start with http:// or https://".into(),
            ));
        }
        if self.interaction.swipe_threshold <= 0.0 {
            return Err(ConfigError::Validation(
                "interaction.swipe_threshold must be positive".into(),
            ));
        }
        let card = &self.interaction.card;
        if card.long_press_ms == 0 || card.reveal_ms == 0 {
            return Err(ConfigError::Validation(
                "interaction.card timings must be non-zero".into(),
            ));
        }
        if card.move_tolerance < 0.0 {
            return Err(ConfigError::Validation(
                "interaction.card.move_tolerance must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Public base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.clinic.base_url.trim_end_matches('/')
    }
}

/// Clinic identity and contact details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClinicConfig {
    /// Clinic name as shown in the header and structured data.
    pub name: LocalizedText,
    /// Hero banner headline.
    pub tagline: LocalizedText,
    /// Street address.
    pub address: LocalizedText,
    /// WhatsApp number in international format; formatting is ignored.
    pub whatsapp: String,
    /// Phone number shown for calls.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Public URL the site is deployed at (canonical links, sitemap).
    pub base_url: String,
    /// schema.org `openingHours` entries, e.g. `"Sa-Th 10:00-22:00"`.
    pub opening_hours: Vec<String>,
    /// schema.org `priceRange`.
    pub price_range: String,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            name: LocalizedText::new("Bright Smile Dental", "عيادة الابتسامة المشرقة"),
            tagline: LocalizedText::new(
                "Gentle, modern dentistry for confident smiles",
                "طب أسنان حديث ولطيف لابتسامة واثقة",
            ),
            address: LocalizedText::new("12 Nile Street, Cairo", "١٢ شارع النيل، القاهرة"),
            whatsapp: "+20 100 000 0000".to_string(),
            phone: "+20 2 2345 6789".to_string(),
            email: "hello@example-dental.com".to_string(),
            base_url: "https://example-dental.com".to_string(),
            opening_hours: vec!["Sa-Th 10:00-22:00".to_string()],
            price_range: "$$".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalesConfig {
    /// Locale the bare site root redirects to.
    pub default: Locale,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            default: Locale::Ar,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InteractionConfig {
    /// Minimum horizontal travel (px) for a swipe to count.
    pub swipe_threshold: f64,
    /// Service card tap / long-press timings.
    pub card: CardTimings,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: crate::interaction::swipe::DEFAULT_SWIPE_THRESHOLD,
            card: CardTimings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// `clamp` stops at the ends, `wrap` continues from the other end.
    pub policy: BoundaryPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselsConfig {
    /// Before/after gallery.
    pub gallery: CarouselConfig,
    /// Patient reviews.
    pub reviews: CarouselConfig,
}

impl Default for CarouselsConfig {
    fn default() -> Self {
        Self {
            gallery: CarouselConfig {
                policy: BoundaryPolicy::Clamp,
            },
            reviews: CarouselConfig {
                policy: BoundaryPolicy::Wrap,
            },
        }
    }
}

/// Brand colors, emitted as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub primary: String,
    pub primary_dark: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_muted: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            primary: "#0e7490".to_string(),
            primary_dark: "#155e75".to_string(),
            accent: "#f59e0b".to_string(),
            background: "#ffffff".to_string(),
            surface: "#f1f5f9".to_string(),
            text: "#0f172a".to_string(),
            text_muted: "#64748b".to_string(),
        }
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

/// Load config from `config.toml` in the content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(root = %root.display(), default_locale = %config.locales.default, "config loaded");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Clinic Site Configuration
# =========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Clinic identity
# ---------------------------------------------------------------------------
[clinic]
# WhatsApp number in international format. Spaces and punctuation are ignored.
whatsapp = "+20 100 000 0000"
phone = "+20 2 2345 6789"
email = "hello@example-dental.com"
# Public URL of the deployed site (canonical links, sitemap, structured data).
base_url = "https://example-dental.com"
# schema.org openingHours entries.
opening_hours = ["Sa-Th 10:00-22:00"]
price_range = "$$"

# Text fields come in both languages. An empty "ar" falls back to "en".
[clinic.name]
en = "Bright Smile Dental"
ar = "عيادة الابتسامة المشرقة"

[clinic.tagline]
en = "Gentle, modern dentistry for confident smiles"
ar = "طب أسنان حديث ولطيف لابتسامة واثقة"

[clinic.address]
en = "12 Nile Street, Cairo"
ar = "١٢ شارع النيل، القاهرة"

# ---------------------------------------------------------------------------
# Locales
# ---------------------------------------------------------------------------
[locales]
# Locale the site root (/) redirects to: "ar" or "en".
default = "ar"

# ---------------------------------------------------------------------------
# Interaction
# ---------------------------------------------------------------------------
[interaction]
# Minimum horizontal finger travel (px) before a swipe changes slides.
swipe_threshold = 50.0

# Service cards: hover on desktop, tap or long-press on phones.
[interaction.card]
# Hold this long (ms) to reveal a card instead of opening it.
long_press_ms = 450
# A long-press reveal hides itself after this long (ms).
reveal_ms = 2500
# Finger travel (px) after which a press counts as scrolling.
move_tolerance = 10.0

# ---------------------------------------------------------------------------
# Carousels: "clamp" stops at the ends, "wrap" continues from the other end.
# ---------------------------------------------------------------------------
[carousels.gallery]
policy = "clamp"

[carousels.reviews]
policy = "wrap"

# ---------------------------------------------------------------------------
# Brand colors
# ---------------------------------------------------------------------------
[colors]
primary = "#0e7490"
primary_dark = "#155e75"
accent = "#f59e0b"
background = "#ffffff"
surface = "#f1f5f9"
text = "#0f172a"
text_muted = "#64748b"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-primary: {primary};
    --color-primary-dark: {primary_dark};
    --color-accent: {accent};
    --color-bg: {background};
    --color-surface: {surface};
    --color-text: {text};
    --color-text-muted: {text_muted};
}}"#,
        primary = colors.primary,
        primary_dark = colors.primary_dark,
        accent = colors.accent,
        background = colors.background,
        surface = colors.surface,
        text = colors.text,
        text_muted = colors.text_muted,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn default_carousel_policies_differ() {
        let config = SiteConfig::default();
        assert_eq!(config.carousels.gallery.policy, BoundaryPolicy::Clamp);
        assert_eq!(config.carousels.reviews.policy, BoundaryPolicy::Wrap);
    }

    #[test]
    fn default_locale_is_arabic() {
        assert_eq!(SiteConfig::default().locales.default, Locale::Ar);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[carousels.gallery]
policy = "wrap"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.carousels.gallery.policy, BoundaryPolicy::Wrap);
        // Untouched sections keep their defaults
        assert_eq!(config.carousels.reviews.policy, BoundaryPolicy::Wrap);
        assert_eq!(config.interaction.card.long_press_ms, 450);
    }

    #[test]
    fn parse_interaction_settings() {
        let toml = r#"
[interaction]
swipe_threshold = 80.0

[interaction.card]
long_press_ms = 400
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.interaction.swipe_threshold, 80.0);
        assert_eq!(config.interaction.card.long_press_ms, 400);
        assert_eq!(config.interaction.card.reveal_ms, 2500);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let mut config = SiteConfig::default();
        config.clinic.base_url = "https://example.com/".into();
        assert_eq!(config.base_url(), "https://example.com");
    }

    #[test]
    fn generate_css_includes_all_variables() {
        let css = generate_color_css(&ColorConfig::default());
        for var in [
            "--color-primary:",
            "--color-primary-dark:",
            "--color-accent:",
            "--color-bg:",
            "--color-surface:",
            "--color-text:",
            "--color-text-muted:",
        ] {
            assert!(css.contains(var), "{var}");
        }
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.primary = "#123456".to_string();
        assert!(generate_color_css(&colors).contains("--color-primary: #123456"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.clinic.name.en, "Bright Smile Dental");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[clinic]
whatsapp = "+971 50 123 4567"

[clinic.name]
en = "Pearl Dental"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.clinic.name.en, "Pearl Dental");
        // Arabic name not overridden: merge keeps the stock value
        assert_eq!(config.clinic.name.ar, "عيادة الابتسامة المشرقة");
        assert_eq!(config.clinic.whatsapp, "+971 50 123 4567");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[clinic]
whatsapp = "123"
"#,
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("threshold = 50").unwrap();
        let overlay: toml::Value = toml::from_str("threshold = 70").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("threshold").unwrap().as_integer(), Some(70));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r#"
[clinic.name]
en = "A"
ar = "ب"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[clinic.name]
en = "B"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let name = merged.get("clinic").unwrap().get("name").unwrap();
        assert_eq!(name.get("en").unwrap().as_str(), Some("B"));
        assert_eq!(name.get("ar").unwrap().as_str(), Some("ب"));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str(r#"hours = ["a", "b"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"hours = ["c"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("hours").unwrap().as_array().unwrap().len(), 1);
    }

    // =========================================================================
    // Unknown key rejection and validation
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[clinic]\nwhatsap = \"1\"");
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }

    #[test]
    fn unknown_policy_rejected() {
        let result: Result<SiteConfig, _> =
            toml::from_str("[carousels.gallery]\npolicy = \"bounce\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_locale_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[locales]\ndefault = \"fr\"");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_relative_base_url() {
        let mut config = SiteConfig::default();
        config.clinic.base_url = "example.com".into();
        assert!(config.validate().unwrap_err().to_string().contains("base_url"));
    }

    #[test]
    fn validate_rejects_zero_timings() {
        let mut config = SiteConfig::default();
        config.interaction.card.reveal_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_threshold() {
        let mut config = SiteConfig::default();
        config.interaction.swipe_threshold = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_name() {
        let mut config = SiteConfig::default();
        config.clinic.name.en = " ".into();
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // stock config
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.clinic.name, defaults.clinic.name);
        assert_eq!(config.clinic.whatsapp, defaults.clinic.whatsapp);
        assert_eq!(config.locales.default, defaults.locales.default);
        assert_eq!(config.interaction.card, defaults.interaction.card);
        assert_eq!(config.carousels.reviews.policy, BoundaryPolicy::Wrap);
        assert_eq!(config.colors.primary, defaults.colors.primary);
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        for section in ["clinic", "locales", "interaction", "carousels", "colors"] {
            assert!(val.get(section).is_some(), "{section}");
        }
    }

    #[test]
    fn resolve_config_with_overlay() {
        let overlay: toml::Value = toml::from_str("[locales]\ndefault = \"en\"").unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.locales.default, Locale::En);
        assert_eq!(config.colors.primary, "#0e7490");
    }
}
