//! Shared test utilities for the clinic-site test suite.
//!
//! Provides fixture setup and lookup helpers over scan-phase data
//! structures (`Manifest`, `Service`, `Post`, `GalleryCase`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let implants = find_service(&manifest, "implants");
//! assert_eq!(implants.title.en, "Dental Implants");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::{GalleryCase, Manifest, Post, Service};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write a solid-color PNG of the given size.
pub fn write_png(path: &Path, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([200, 200, 200]))
        .save(path)
        .unwrap();
}

// =========================================================================
// Manifest lookups (panic with a clear message on miss)
// =========================================================================

pub fn find_service<'a>(manifest: &'a Manifest, slug: &str) -> &'a Service {
    manifest
        .services
        .iter()
        .find(|s| s.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.services.iter().map(|s| s.slug.as_str()).collect();
            panic!("service '{slug}' not found. Available: {slugs:?}")
        })
}

pub fn find_post<'a>(manifest: &'a Manifest, slug: &str) -> &'a Post {
    manifest
        .posts
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.posts.iter().map(|p| p.slug.as_str()).collect();
            panic!("post '{slug}' not found. Available: {slugs:?}")
        })
}

pub fn find_case<'a>(manifest: &'a Manifest, slug: &str) -> &'a GalleryCase {
    manifest
        .cases
        .iter()
        .find(|c| c.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.cases.iter().map(|c| c.slug.as_str()).collect();
            panic!("gallery case '{slug}' not found. Available: {slugs:?}")
        })
}
