//! Eager image warm-up for the before/after gallery.
//!
//! The visible slide fetches its own images through the normal rendering
//! path. This cache only tracks a second, eager load of every case image so
//! the browser cache is warm when the visitor swipes to a later slide.
//! Every identifier is requested once per gallery instance; completions are
//! recorded, failures are dropped and never retried.

use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Before,
    After,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `case-{index}-before` / `case-{index}-after`.
pub fn image_id(case_index: usize, side: Side) -> String {
    format!("case-{case_index}-{side}")
}

/// URLs for one gallery case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub before: String,
    pub after: String,
}

/// A load the host should start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadRequest {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct PreloadCache {
    requested: BTreeSet<String>,
    loaded: BTreeSet<String>,
}

impl PreloadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading every image not already requested by this instance.
    pub fn begin(&mut self, pairs: &[ImagePair]) -> Vec<PreloadRequest> {
        let mut requests = Vec::new();
        for (index, pair) in pairs.iter().enumerate() {
            for (side, url) in [(Side::Before, &pair.before), (Side::After, &pair.after)] {
                let id = image_id(index, side);
                if self.requested.insert(id.clone()) {
                    requests.push(PreloadRequest {
                        id,
                        url: url.clone(),
                    });
                }
            }
        }
        tracing::debug!(count = requests.len(), "preload: requests issued");
        requests
    }

    /// Record a completed load. Unknown identifiers are ignored.
    pub fn on_load(&mut self, id: &str) {
        if self.requested.contains(id) {
            self.loaded.insert(id.to_string());
        }
    }

    /// A failed load leaves no trace; the slide still loads its own image.
    pub fn on_error(&mut self, id: &str) {
        tracing::debug!(id, "preload: load failed, dropped");
    }

    pub fn is_loaded(&self, id: &str) -> bool {
        self.loaded.contains(id)
    }

    /// Both images of a case have completed.
    pub fn is_case_ready(&self, case_index: usize) -> bool {
        self.is_loaded(&image_id(case_index, Side::Before))
            && self.is_loaded(&image_id(case_index, Side::After))
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn loaded(&self) -> impl Iterator<Item = &str> {
        self.loaded.iter().map(String::as_str)
    }
}
