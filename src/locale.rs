//! Locales, text direction, and locale-aware paths.
//!
//! Every page lives under a locale prefix: `/ar/...` or `/en/...`. The path
//! is the single source of truth for which language is shown and which nav
//! entry is active; nothing about either is stored separately.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ar,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Ar, Locale::En];

    pub fn code(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Self::Ar => Direction::Rtl,
            Self::En => Direction::Ltr,
        }
    }

    /// Name of the language in itself, for the language switcher.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::Ar => "العربية",
            Self::En => "English",
        }
    }

    /// Open Graph locale tag.
    pub fn og_locale(self) -> &'static str {
        match self {
            Self::Ar => "ar_EG",
            Self::En => "en_US",
        }
    }

    /// The other locale of the pair.
    pub fn other(self) -> Self {
        match self {
            Self::Ar => Self::En,
            Self::En => Self::Ar,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ar" => Some(Self::Ar),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("unknown locale '{s}' (expected 'ar' or 'en')"))
    }
}

/// Split `path` into its path part and the `?query#fragment` suffix.
fn split_suffix(path: &str) -> (&str, &str) {
    match path.find(['?', '#']) {
        Some(i) => path.split_at(i),
        None => (path, ""),
    }
}

/// Locale named by the first path segment, if any.
pub fn locale_from_path(path: &str) -> Option<Locale> {
    let (path, _) = split_suffix(path);
    path.trim_start_matches('/')
        .split('/')
        .next()
        .and_then(Locale::from_code)
}

/// The path with any leading locale segment removed. Always starts with `/`.
pub fn strip_locale(path: &str) -> String {
    let (path, suffix) = split_suffix(path);
    let trimmed = path.trim_start_matches('/');
    let rest = match trimmed.split_once('/') {
        Some((first, rest)) if Locale::from_code(first).is_some() => rest,
        None if Locale::from_code(trimmed).is_some() => "",
        _ => trimmed,
    };
    format!("/{rest}{suffix}")
}

/// Rewrite the leading locale segment of `path` to `target`.
///
/// ```
/// use clinic_site::locale::{switch_locale_path, Locale};
/// assert_eq!(switch_locale_path("/ar/services/implants", Locale::En), "/en/services/implants");
/// assert_eq!(switch_locale_path("/about", Locale::Ar), "/ar/about");
/// ```
pub fn switch_locale_path(path: &str, target: Locale) -> String {
    let rest = strip_locale(path);
    if rest == "/" {
        format!("/{}/", target.code())
    } else {
        format!("/{}{}", target.code(), rest)
    }
}

/// Absolute path of `rel` (no leading slash) under `locale`.
pub fn localized_path(locale: Locale, rel: &str) -> String {
    let rel = rel.trim_start_matches('/');
    if rel.is_empty() {
        format!("/{}/", locale.code())
    } else {
        format!("/{}/{}", locale.code(), rel)
    }
}

/// Whether the nav entry pointing at `href` is active for `current_path`.
///
/// The home entry is active only on the home page itself; other entries are
/// active on their own page and everything below it.
pub fn is_active_nav(current_path: &str, href: &str) -> bool {
    let current = strip_locale(current_path);
    let target = strip_locale(href);
    let (current, _) = split_suffix(&current);
    let current = current.trim_end_matches('/');
    let target = target.trim_end_matches('/');
    if target.is_empty() {
        return current.is_empty();
    }
    current == target || current.starts_with(&format!("{target}/"))
}
