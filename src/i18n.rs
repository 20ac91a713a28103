//! Translation catalog.
//!
//! Catalogs are nested JSON objects; a dotted key walks the nesting:
//!
//! ```json
//! { "HOME": { "CNC_MACHINING": "CNC Machining" } }
//! ```
//!
//! `HOME.CNC_MACHINING` → `"CNC Machining"`.
//!
//! ## Layering
//!
//! The English catalog is compiled into the binary and always forms the base
//! layer. A site can ship `i18n/<language>.json` next to its `config.toml`;
//! that file is merged over the base key by key, so an incomplete
//! translation falls back to English for whatever it leaves out.
//!
//! ## Missing Keys
//!
//! Lookup never fails. An unknown key (or one that names a whole section
//! rather than a string) renders as the key itself, which keeps gaps visible
//! on the page without breaking the build.

use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use thiserror::Error;

const EMBEDDED_EN: &str = include_str!("../static/i18n/en.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("translation file {path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("translation file {0} must contain a JSON object at the top level")]
    NotAnObject(String),
}

/// A loaded set of translations for one language.
#[derive(Debug, Clone)]
pub struct Catalog {
    language: String,
    root: Map<String, Value>,
}

impl Catalog {
    /// Build a catalog from an already-parsed JSON object.
    pub fn from_value(language: impl Into<String>, value: Value) -> Option<Self> {
        match value {
            Value::Object(root) => Some(Self {
                language: language.into(),
                root,
            }),
            _ => None,
        }
    }

    /// The English catalog shipped with the binary.
    pub fn embedded() -> Self {
        let value: Value =
            serde_json::from_str(EMBEDDED_EN).expect("embedded en.json must be valid JSON");
        Self::from_value("en", value).expect("embedded en.json must be a JSON object")
    }

    /// Load the catalog for `language`, layering `<source>/i18n/<language>.json`
    /// (if present) over the embedded English strings.
    pub fn load(source: &Path, language: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self::embedded();
        catalog.language = language.to_string();

        let path = source.join("i18n").join(format!("{language}.json"));
        if !path.exists() {
            if language != "en" {
                tracing::warn!(
                    path = %path.display(),
                    "no translation file for {language}; falling back to English"
                );
            }
            return Ok(catalog);
        }

        let content = fs::read_to_string(&path)?;
        let overlay: Value = serde_json::from_str(&content).map_err(|source| CatalogError::Json {
            path: path.display().to_string(),
            source,
        })?;
        let Value::Object(overlay) = overlay else {
            return Err(CatalogError::NotAnObject(path.display().to_string()));
        };
        merge_json(&mut catalog.root, overlay);
        Ok(catalog)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Resolve a dotted key, or `None` if it does not name a string.
    pub fn get(&self, key: &str) -> Option<&str> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut node = self.root.get(first)?;
        for part in parts {
            node = node.as_object()?.get(part)?;
        }
        node.as_str()
    }

    /// Resolve a dotted key, falling back to the key itself.
    pub fn translate<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        match self.get(key) {
            Some(text) => Cow::Borrowed(text),
            None => {
                tracing::debug!(key, language = %self.language, "missing translation");
                Cow::Borrowed(key)
            }
        }
    }
}

/// Recursively merge `overlay` into `base`.
///
/// Objects merge key by key; anything else in `overlay` replaces what was in
/// `base`.
pub fn merge_json(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, overlay_val) in overlay {
        match overlay_val {
            Value::Object(overlay_obj) => {
                if let Some(Value::Object(base_obj)) = base.get_mut(&key) {
                    merge_json(base_obj, overlay_obj);
                } else {
                    base.insert(key, Value::Object(overlay_obj));
                }
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}
