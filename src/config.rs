//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a `config.toml` in the site source directory overrides
//! any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Shopfloor Manufacturing"
//! language = "en"           # Loads i18n/<language>.json over the built-in English
//!
//! [carousel]
//! interval_ms = 5000        # Autoplay cadence
//! render_width = 1200       # Viewport width assumed for the static home page
//!
//! [carousel.breakpoints]
//! desktop = 1200            # width >= desktop → slides.desktop cards
//! tablet = 768              # width >= tablet  → slides.tablet cards
//!
//! [carousel.slides]
//! desktop = 2
//! tablet = 2
//! mobile = 1
//!
//! [[carousel.cards]]
//! title = "HOME.CNC_MACHINING"
//! description = "HOME.CNC_MACHINING_DESC"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [carousel.slides]
//! desktop = 3
//! ```
//!
//! Arrays replace rather than merge: a `[[carousel.cards]]` list in the user
//! file is the complete card list.
//!
//! Unknown keys are rejected to catch typos early.

use crate::carousel::{CarouselSettings, SlidePolicy};
use crate::types::{Card, default_cards};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
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
    /// Site identity and language.
    pub site: SiteInfo,
    /// Home-page carousel behavior and content.
    pub carousel: CarouselConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.language must not be empty".into(),
            ));
        }
        let language = &self.site.language;
        if language.contains(['/', '\\']) || language.contains("..") {
            return Err(ConfigError::Validation(format!(
                "site.language must be a plain language code, got '{language}'"
            )));
        }
        let carousel = &self.carousel;
        if carousel.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.interval_ms must be greater than zero".into(),
            ));
        }
        let slides = &carousel.slides;
        if slides.desktop == 0 || slides.tablet == 0 || slides.mobile == 0 {
            return Err(ConfigError::Validation(
                "carousel.slides values must be at least 1".into(),
            ));
        }
        if carousel.breakpoints.tablet >= carousel.breakpoints.desktop {
            return Err(ConfigError::Validation(
                "carousel.breakpoints.tablet must be below carousel.breakpoints.desktop".into(),
            ));
        }
        if carousel.cards.is_empty() {
            return Err(ConfigError::Validation(
                "carousel.cards must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Company name shown in the header, footer, and page titles.
    pub name: String,
    /// Language code of the translation catalog to load.
    pub language: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Shopfloor Manufacturing".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Carousel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Milliseconds between autoplay advances.
    pub interval_ms: u64,
    /// Viewport width the static home page is rendered for.
    pub render_width: u32,
    /// Minimum widths of the desktop and tablet layouts.
    pub breakpoints: BreakpointsConfig,
    /// Cards visible at once in each layout.
    pub slides: SlidesConfig,
    /// Card list, as translation keys.
    pub cards: Vec<Card>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            render_width: 1200,
            breakpoints: BreakpointsConfig::default(),
            slides: SlidesConfig::default(),
            cards: default_cards(),
        }
    }
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn policy(&self) -> SlidePolicy {
        SlidePolicy {
            desktop_min_width: self.breakpoints.desktop,
            tablet_min_width: self.breakpoints.tablet,
            desktop: self.slides.desktop,
            tablet: self.slides.tablet,
            mobile: self.slides.mobile,
        }
    }

    pub fn settings(&self) -> CarouselSettings {
        CarouselSettings {
            policy: self.policy(),
            interval: self.interval(),
        }
    }
}

/// Minimum viewport widths of the wider layouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreakpointsConfig {
    pub desktop: u32,
    pub tablet: u32,
}

impl Default for BreakpointsConfig {
    fn default() -> Self {
        Self {
            desktop: 1200,
            tablet: 768,
        }
    }
}

/// Visible card count per layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlidesConfig {
    pub desktop: usize,
    pub tablet: usize,
    pub mobile: usize,
}

impl Default for SlidesConfig {
    fn default() -> Self {
        Self {
            desktop: 2,
            tablet: 2,
            mobile: 1,
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
/// Returns `Ok(None)` if the directory has no `config.toml`.
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
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(root)?;
    if overlay.is_none() {
        tracing::debug!(root = %root.display(), "no config.toml, using stock defaults");
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Shopfloor Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at <source>/config.toml. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Company name shown in the header, footer, and page titles.
name = "Shopfloor Manufacturing"

# Translation catalog to use. English is built in; any other language is
# read from <source>/i18n/<language>.json and falls back to English per key.
language = "en"

# ---------------------------------------------------------------------------
# Home page carousel
# ---------------------------------------------------------------------------
[carousel]
# Milliseconds between automatic advances. A manual jump to a slide restarts
# this countdown.
interval_ms = 5000

# Viewport width the static home page is laid out for.
render_width = 1200

# Layout thresholds in CSS pixels.
[carousel.breakpoints]
desktop = 1200   # width >= desktop          -> slides.desktop
tablet = 768     # tablet <= width < desktop -> slides.tablet, else slides.mobile

# Cards visible at once in each layout (at least 1).
[carousel.slides]
desktop = 2
tablet = 2
mobile = 1

# Cards, as translation keys. A list here replaces the whole default list.
[[carousel.cards]]
title = "HOME.CNC_MACHINING"
description = "HOME.CNC_MACHINING_DESC"

[[carousel.cards]]
title = "HOME.INJECTION_MOLDING"
description = "HOME.INJECTION_MOLDING_DESC"

[[carousel.cards]]
title = "HOME.QUALITY_ASSURANCE"
description = "HOME.QUALITY_ASSURANCE_DESC"

[[carousel.cards]]
title = "HOME.CUSTOM_FABRICATION"
description = "HOME.CUSTOM_FABRICATION_DESC"
"##
}
