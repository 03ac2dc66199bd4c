//! Parsing of the `NNN-name` convention used for content entries.
//!
//! Services, blog posts and gallery cases are ordered by an optional numeric
//! prefix on their file or directory name:
//!
//! - `010-implants.toml` → number 10, slug `implants`, title "implants"
//! - `020-First-Visit/` → number 20, slug `first-visit`, title "First Visit"
//! - `draft-whitening.toml` → unnumbered: generated, but left out of listings
//!
//! The slug becomes the URL segment; the title is only a fallback for
//! entries whose content does not provide one.

/// Result of parsing an entry name like `020-First-Visit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryName {
    /// Number prefix if present.
    pub number: Option<u32>,
    /// URL segment: the name part, lowercased. Empty if the entry is number-only.
    pub slug: String,
    /// Fallback display title: the name part with dashes as spaces.
    pub title: String,
}

impl EntryName {
    /// Numbered entries appear in listings.
    pub fn is_listed(&self) -> bool {
        self.number.is_some()
    }

    /// Ordering key: numbered entries first by number, unnumbered last.
    pub fn sort_key(&self) -> u32 {
        self.number.unwrap_or(u32::MAX)
    }
}

/// Parse a file stem or directory name following the `NNN-name` convention.
pub fn parse_entry_name(name: &str) -> EntryName {
    let (number, rest) = match name.split_once('-') {
        Some((prefix, rest)) => match prefix.parse::<u32>() {
            Ok(n) => (Some(n), rest),
            Err(_) => (None, name),
        },
        None => match name.parse::<u32>() {
            Ok(n) => (Some(n), ""),
            Err(_) => (None, name),
        },
    };
    EntryName {
        number,
        slug: rest.to_lowercase(),
        title: rest.replace('-', " "),
    }
}
