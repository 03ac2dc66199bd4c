//! CLI output formatting for the build commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entry (service, post, gallery case) is its positional index and
//! English title, with the source path shown as secondary context on an
//! indented `Source:` line.
//!
//! Unlisted entries (no number prefix) are marked `(unlisted)`: they are
//! built but do not appear in listings or the sitemap.
//!
//! # Output Format
//!
//! ## Scan / check
//!
//! ```text
//! Services
//! 001 Dental Implants
//!     Source: services/010-implants.toml
//! 002 Veneers (unlisted)
//!     Source: services/draft-veneers.toml
//!
//! Blog
//! 001 Your First Visit [en, ar]
//!     Source: blog/010-first-visit
//!
//! Gallery
//! 001 Smile Makeover
//!     Source: gallery/010-smile-makeover
//!
//! Reviews: 3 (average 4.7)
//! FAQ: 2
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! ar: 12 pages
//! en: 12 pages
//! Copied 4 gallery images, 1 asset
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use std::path::Path;

use crate::generate::GenerateReport;
use crate::locale::Locale;
use crate::scan::Manifest;
use crate::types::LocalizedText;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn entry_header(index: usize, title: &str, listed: bool) -> String {
    if listed {
        format!("{} {}", format_index(index), title)
    } else {
        format!("{} {} (unlisted)", format_index(index), title)
    }
}

/// Locales that have their own text, e.g. `[en, ar]`.
fn locale_tags(text: &LocalizedText) -> String {
    let tags: Vec<&str> = Locale::ALL
        .iter()
        .rev()
        .filter(|l| text.has(**l))
        .map(|l| l.code())
        .collect();
    format!("[{}]", tags.join(", "))
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    if !manifest.services.is_empty() {
        lines.push("Services".to_string());
        for (i, service) in manifest.services.iter().enumerate() {
            lines.push(entry_header(i + 1, &service.title.en, service.listed));
            lines.push(format!("{}Source: {}", indent(1), service.source));
        }
        lines.push(String::new());
    }

    if !manifest.posts.is_empty() {
        lines.push("Blog".to_string());
        for (i, post) in manifest.posts.iter().enumerate() {
            lines.push(format!(
                "{} {}",
                entry_header(i + 1, &post.title.en, post.listed),
                locale_tags(&post.body)
            ));
            lines.push(format!("{}Source: {}", indent(1), post.source));
        }
        lines.push(String::new());
    }

    if !manifest.cases.is_empty() {
        lines.push("Gallery".to_string());
        for (i, case) in manifest.cases.iter().enumerate() {
            lines.push(entry_header(i + 1, &case.title.en, case.listed));
            lines.push(format!("{}Source: {}", indent(1), case.source));
        }
        lines.push(String::new());
    }

    if !manifest.reviews.is_empty() {
        let total: u32 = manifest.reviews.iter().map(|r| u32::from(r.rating)).sum();
        let average = f64::from(total) / manifest.reviews.len() as f64;
        lines.push(format!(
            "Reviews: {} (average {:.1})",
            manifest.reviews.len(),
            average
        ));
    }
    if !manifest.faqs.is_empty() {
        lines.push(format!("FAQ: {}", manifest.faqs.len()));
    }

    let config_exists = source_root.join("config.toml").exists();
    if config_exists || manifest.assets.is_some() {
        if !manifest.reviews.is_empty() || !manifest.faqs.is_empty() {
            lines.push(String::new());
        }
        lines.push("Config".to_string());
        if config_exists {
            lines.push(format!("{}config.toml", indent(1)));
        }
        if let Some(assets) = &manifest.assets {
            lines.push(format!("{}{}/", indent(1), assets));
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines: Vec<String> = Locale::ALL
        .iter()
        .map(|locale| {
            let prefix = format!("{}/", locale.code());
            let count = report.pages.iter().filter(|p| p.starts_with(&prefix)).count();
            format!("{}: {}", locale.code(), plural(count, "page", "pages"))
        })
        .collect();
    lines.push(format!(
        "Copied {}, {}",
        plural(report.images, "gallery image", "gallery images"),
        plural(report.assets, "asset", "assets")
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;
    use crate::test_helpers::*;

    #[test]
    fn scan_output_lists_sections_in_order() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());

        let services = lines.iter().position(|l| l == "Services").unwrap();
        let blog = lines.iter().position(|l| l == "Blog").unwrap();
        let gallery = lines.iter().position(|l| l == "Gallery").unwrap();
        assert!(services < blog && blog < gallery);
        assert_eq!(lines[services + 1], "001 Dental Implants");
        assert_eq!(
            lines[services + 2],
            "    Source: services/010-implants.toml"
        );
    }

    #[test]
    fn unlisted_entries_are_marked() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());
        assert!(lines.contains(&"003 Veneers (unlisted)".to_string()));
    }

    #[test]
    fn posts_show_translations() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());
        assert!(lines.contains(&"001 Your First Visit [en, ar]".to_string()));
        assert!(lines.contains(&"002 Why Flossing Matters [en]".to_string()));
    }

    #[test]
    fn reviews_summary_and_config() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());
        assert!(lines.contains(&"Reviews: 3 (average 4.7)".to_string()));
        assert!(lines.contains(&"FAQ: 2".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("    assets/"));
    }

    #[test]
    fn empty_manifest_prints_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(format_scan_output(&manifest, tmp.path()).is_empty());
    }

    #[test]
    fn generate_output_counts_pages_per_locale() {
        let report = GenerateReport {
            pages: vec![
                "ar/index.html".into(),
                "ar/contact/index.html".into(),
                "en/index.html".into(),
            ],
            images: 1,
            assets: 0,
        };
        assert_eq!(
            format_generate_output(&report),
            vec!["ar: 2 pages", "en: 1 page", "Copied 1 gallery image, 0 assets"]
        );
    }
}
