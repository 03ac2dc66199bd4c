//! # Clinic Site
//!
//! A static site generator for a bilingual (Arabic/English) dental clinic
//! website, plus the interaction state machines its pages run on.
//!
//! The filesystem is the data source: service files, blog post directories
//! and before/after gallery cases are ordered by numeric prefix, and a
//! single `config.toml` holds the clinic's details and brand colors.
//!
//! # Architecture: Two-Stage Build
//!
//! ```text
//! 1. Scan      content/  →  Manifest   (filesystem → structured data)
//! 2. Generate  Manifest  →  dist/      (HTML per locale, CSS, JS, SEO files)
//! ```
//!
//! The manifest serializes to JSON, so a scan can be inspected on its own
//! with `clinic-site check --json`.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: reads services, blog posts, gallery cases, reviews and FAQ |
//! | [`generate`] | Stage 2: renders every page in both locales with Maud, plus sitemap and `_headers` |
//! | [`interaction`] | Pure state machines: swipe, carousel, revealable card, image preload, timers |
//! | [`contact`] | Contact form validation and the WhatsApp hand-off link |
//! | [`locale`] | Locales, text direction, locale switching and active-nav derivation from the path |
//! | [`i18n`] | Typed interface strings with English fallback |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared types (`LocalizedText`) |
//! | [`naming`] | `NNN-name` filename convention parser |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Path Is the State
//!
//! Every page lives under `/ar/` or `/en/`. The active language, the text
//! direction and the highlighted nav entry are all derived from the page's
//! path at render time; nothing about them is stored elsewhere. Switching
//! language is a path rewrite ([`locale::switch_locale_path`]).
//!
//! ## Interaction as Data
//!
//! Touch and pointer behavior (long press to reveal a card, swipe to move a
//! carousel) is modelled as plain state machines driven by timestamped
//! events. Timers are data ([`interaction::TimerSlot`]), listener lifetimes
//! are RAII guards ([`interaction::ListenerGuard`]). The generator uses the
//! same types to compute each widget's initial state, and the browser
//! runtime in `static/site.js` mirrors their transitions.
//!
//! ## No Backend
//!
//! The contact form validates locally and opens a `wa.me` link with the
//! message prefilled. The output is plain files for any static host.

pub mod config;
pub mod contact;
pub mod generate;
pub mod i18n;
pub mod interaction;
pub mod locale;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
