//! Shared types used by config, content scanning, and generation.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// A piece of text in both site languages.
///
/// English is the reference language. An empty Arabic value falls back to
/// the English one, so partially translated content still renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalizedText {
    pub en: String,
    pub ar: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar if !self.ar.trim().is_empty() => &self.ar,
            _ => &self.en,
        }
    }

    /// Whether `locale` has its own text rather than the English fallback.
    pub fn has(&self, locale: Locale) -> bool {
        match locale {
            Locale::En => !self.en.trim().is_empty(),
            Locale::Ar => !self.ar.trim().is_empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.en.trim().is_empty() && self.ar.trim().is_empty()
    }
}
