//! Content scanning and manifest generation.
//!
//! Stage 1 of the build. Reads the content directory into a [`Manifest`]
//! that the generate stage renders for both locales.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                      # Site configuration (optional)
//! ├── services/
//! │   ├── 010-implants.toml            # [title] [summary] [body], en + ar
//! │   └── 020-whitening.toml
//! ├── blog/
//! │   └── 010-first-visit/
//! │       ├── en.md                    # Required; title from first "# " line
//! │       └── ar.md                    # Optional; falls back to en.md
//! ├── gallery/
//! │   └── 010-smile-makeover/
//! │       ├── before.jpg               # Required
//! │       ├── after.jpg                # Required
//! │       └── case.toml                # Optional [title] / [description]
//! ├── reviews.toml                     # [[review]] author, rating, [review.text]
//! ├── faq.toml                         # [[faq]] [faq.question] [faq.answer]
//! └── assets/                          # Copied to the output root verbatim
//! ```
//!
//! Every section is optional. Numbered entries (`NNN-name`) are listed in
//! number order; unnumbered ones are generated but left out of listings.
//!
//! ## Validation
//!
//! - No duplicate numbers within a section
//! - Every gallery case has both a before and an after image
//! - Every blog post has an `en.md`
//! - Review ratings are between 1 and 5

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{self, SiteConfig};
use crate::interaction::Side;
use crate::naming::{EntryName, parse_entry_name};
use crate::types::LocalizedText;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("TOML error in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Duplicate number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
    #[error("Duplicate slug '{0}' in {1}")]
    DuplicateSlug(String, PathBuf),
    #[error("Gallery case {case} has no {side} image")]
    MissingImage { case: PathBuf, side: Side },
    #[error("Blog post {0} has no en.md")]
    MissingEnglish(PathBuf),
    #[error("Review by {author} has rating {rating}; expected 1-5")]
    InvalidRating { author: String, rating: u8 },
}

/// Everything the generate stage needs.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub services: Vec<Service>,
    pub posts: Vec<Post>,
    pub cases: Vec<GalleryCase>,
    pub reviews: Vec<Review>,
    pub faqs: Vec<Faq>,
    /// Content-relative path of the assets directory, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<String>,
    pub config: SiteConfig,
}

impl Manifest {
    pub fn listed_services(&self) -> impl Iterator<Item = &Service> {
        self.services.iter().filter(|s| s.listed)
    }

    pub fn listed_posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| p.listed)
    }

    pub fn listed_cases(&self) -> impl Iterator<Item = &GalleryCase> {
        self.cases.iter().filter(|c| c.listed)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub slug: String,
    pub listed: bool,
    pub sort_key: u32,
    pub source: String,
    /// Short glyph or emoji shown on the card.
    pub icon: String,
    pub title: LocalizedText,
    pub summary: LocalizedText,
    /// Markdown.
    pub body: LocalizedText,
}

#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub slug: String,
    pub listed: bool,
    pub sort_key: u32,
    pub source: String,
    pub title: LocalizedText,
    /// First paragraph, used on the blog index and as meta description.
    pub summary: LocalizedText,
    /// Markdown, including the title heading.
    pub body: LocalizedText,
}

#[derive(Debug, Clone, Serialize)]
pub struct GalleryCase {
    pub slug: String,
    pub listed: bool,
    pub sort_key: u32,
    pub source: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub before: CaseImage,
    pub after: CaseImage,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseImage {
    /// Content-relative source path.
    pub source: String,
    /// File name (`before.jpg`), reused in the output.
    pub filename: String,
    /// Pixel size, when the file could be decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Review {
    pub author: String,
    pub rating: u8,
    pub text: LocalizedText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Faq {
    pub question: LocalizedText,
    pub answer: LocalizedText,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;

    let services = scan_services(root, &root.join("services"))?;
    let posts = scan_posts(root, &root.join("blog"))?;
    let cases = scan_gallery(root, &root.join("gallery"))?;
    let reviews = load_reviews(&root.join("reviews.toml"))?;
    let faqs = load_faqs(&root.join("faq.toml"))?;
    let assets = root.join("assets").is_dir().then(|| "assets".to_string());

    tracing::debug!(
        services = services.len(),
        posts = posts.len(),
        cases = cases.len(),
        reviews = reviews.len(),
        faqs = faqs.len(),
        "scan complete"
    );

    Ok(Manifest {
        services,
        posts,
        cases,
        reviews,
        faqs,
        assets,
        config,
    })
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ScanError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| ScanError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Sorted entries of `dir` matching `keep`, with their parsed names.
///
/// Fails on two numbered entries sharing a number, and on two entries
/// sharing a slug (they would be written to the same page). A missing
/// directory is an empty section.
fn numbered_entries(
    dir: &Path,
    keep: impl Fn(&Path) -> bool,
) -> Result<Vec<(PathBuf, EntryName)>, ScanError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut entries: Vec<(PathBuf, EntryName)> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| keep(p))
        .filter_map(|p| {
            let stem = p.file_stem()?.to_string_lossy().to_string();
            Some((p, parse_entry_name(&stem)))
        })
        .filter(|(_, name)| !name.slug.is_empty())
        .collect();

    let mut seen = BTreeSet::new();
    for n in entries.iter().filter_map(|(_, name)| name.number) {
        if !seen.insert(n) {
            return Err(ScanError::DuplicateNumber(n, dir.to_path_buf()));
        }
    }
    let mut slugs = BTreeSet::new();
    for (_, name) in &entries {
        if !slugs.insert(name.slug.as_str()) {
            return Err(ScanError::DuplicateSlug(name.slug.clone(), dir.to_path_buf()));
        }
    }

    entries.sort_by(|(pa, a), (pb, b)| a.sort_key().cmp(&b.sort_key()).then_with(|| pa.cmp(pb)));
    Ok(entries)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

// ============================================================================
// Services
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceFile {
    #[serde(default)]
    icon: String,
    #[serde(default)]
    title: LocalizedText,
    #[serde(default)]
    summary: LocalizedText,
    #[serde(default)]
    body: LocalizedText,
}

fn scan_services(root: &Path, dir: &Path) -> Result<Vec<Service>, ScanError> {
    let entries = numbered_entries(dir, |p| p.is_file() && has_extension(p, "toml"))?;
    let mut services = Vec::with_capacity(entries.len());
    for (path, name) in entries {
        let file: ServiceFile = read_toml(&path)?;
        let mut title = file.title;
        if title.en.trim().is_empty() {
            title.en = name.title.clone();
        }
        services.push(Service {
            slug: name.slug.clone(),
            listed: name.is_listed(),
            sort_key: name.sort_key(),
            source: relative(root, &path),
            icon: file.icon,
            title,
            summary: file.summary,
            body: file.body,
        });
    }
    Ok(services)
}

// ============================================================================
// Blog
// ============================================================================

/// Title from the first `# ` heading, summary from the first paragraph after it.
fn split_markdown(markdown: &str) -> (Option<String>, String) {
    let title = markdown
        .lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string());

    let summary = markdown
        .split("\n\n")
        .map(str::trim)
        .find(|block| !block.is_empty() && !block.starts_with('#'))
        .map(|block| block.lines().map(str::trim).collect::<Vec<_>>().join(" "))
        .unwrap_or_default();

    (title, summary)
}

fn scan_posts(root: &Path, dir: &Path) -> Result<Vec<Post>, ScanError> {
    let entries = numbered_entries(dir, |p| p.is_dir())?;
    let mut posts = Vec::with_capacity(entries.len());
    for (path, name) in entries {
        let en_path = path.join("en.md");
        if !en_path.is_file() {
            return Err(ScanError::MissingEnglish(path));
        }
        let en = fs::read_to_string(&en_path)?;
        let ar_path = path.join("ar.md");
        let ar = if ar_path.is_file() {
            fs::read_to_string(&ar_path)?
        } else {
            String::new()
        };

        let (en_title, en_summary) = split_markdown(&en);
        let (ar_title, ar_summary) = split_markdown(&ar);

        posts.push(Post {
            slug: name.slug.clone(),
            listed: name.is_listed(),
            sort_key: name.sort_key(),
            source: relative(root, &path),
            title: LocalizedText::new(
                en_title.unwrap_or_else(|| name.title.clone()),
                ar_title.unwrap_or_default(),
            ),
            summary: LocalizedText::new(en_summary, ar_summary),
            body: LocalizedText::new(en, ar),
        });
    }
    Ok(posts)
}

// ============================================================================
// Gallery
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CaseFile {
    title: LocalizedText,
    description: LocalizedText,
}

fn find_case_image(root: &Path, case_dir: &Path, side: Side) -> Result<CaseImage, ScanError> {
    let found = IMAGE_EXTENSIONS
        .iter()
        .map(|ext| case_dir.join(format!("{side}.{ext}")))
        .find(|p| p.is_file())
        .ok_or_else(|| ScanError::MissingImage {
            case: case_dir.to_path_buf(),
            side,
        })?;

    let dimensions = match image::image_dimensions(&found) {
        Ok(dims) => Some(dims),
        Err(e) => {
            tracing::warn!(path = %found.display(), error = %e, "could not read image size");
            None
        }
    };

    Ok(CaseImage {
        source: relative(root, &found),
        filename: found
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default(),
        dimensions,
    })
}

fn scan_gallery(root: &Path, dir: &Path) -> Result<Vec<GalleryCase>, ScanError> {
    let entries = numbered_entries(dir, |p| p.is_dir())?;
    let mut cases = Vec::with_capacity(entries.len());
    for (path, name) in entries {
        let before = find_case_image(root, &path, Side::Before)?;
        let after = find_case_image(root, &path, Side::After)?;

        let case_toml = path.join("case.toml");
        let file: CaseFile = if case_toml.is_file() {
            read_toml(&case_toml)?
        } else {
            CaseFile::default()
        };
        let mut title = file.title;
        if title.en.trim().is_empty() {
            title.en = name.title.clone();
        }

        cases.push(GalleryCase {
            slug: name.slug.clone(),
            listed: name.is_listed(),
            sort_key: name.sort_key(),
            source: relative(root, &path),
            title,
            description: file.description,
            before,
            after,
        });
    }
    Ok(cases)
}

// ============================================================================
// Reviews and FAQ
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ReviewsFile {
    review: Vec<Review>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FaqFile {
    faq: Vec<Faq>,
}

fn load_reviews(path: &Path) -> Result<Vec<Review>, ScanError> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let file: ReviewsFile = read_toml(path)?;
    if let Some(bad) = file.review.iter().find(|r| !(1..=5).contains(&r.rating)) {
        return Err(ScanError::InvalidRating {
            author: bad.author.clone(),
            rating: bad.rating,
        });
    }
    Ok(file.review)
}

fn load_faqs(path: &Path) -> Result<Vec<Faq>, ScanError> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let file: FaqFile = read_toml(path)?;
    Ok(file.faq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn empty_directory_scans_to_empty_manifest() {
        let tmp = TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.services.is_empty());
        assert!(manifest.posts.is_empty());
        assert!(manifest.cases.is_empty());
        assert!(manifest.assets.is_none());
    }

    #[test]
    fn services_are_ordered_by_number() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let slugs: Vec<&str> = manifest.services.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs[..2], ["implants", "whitening"]);
    }

    #[test]
    fn unnumbered_service_is_generated_but_unlisted() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let draft = find_service(&manifest, "draft-veneers");
        assert!(!draft.listed);
        assert!(manifest.listed_services().all(|s| s.slug != "draft-veneers"));
    }

    #[test]
    fn service_text_in_both_languages() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let implants = find_service(&manifest, "implants");
        assert_eq!(implants.title.en, "Dental Implants");
        assert_eq!(implants.title.ar, "زراعة الأسنان");
        assert!(!implants.icon.is_empty());
    }

    #[test]
    fn post_title_and_summary_from_markdown() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let post = find_post(&manifest, "first-visit");
        assert_eq!(post.title.en, "Your First Visit");
        assert!(post.summary.en.starts_with("What to expect"));
        assert!(post.title.has(crate::locale::Locale::Ar));
    }

    #[test]
    fn post_without_arabic_falls_back() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let post = find_post(&manifest, "flossing");
        assert!(post.body.ar.is_empty());
        assert_eq!(post.title.get(crate::locale::Locale::Ar), "Why Flossing Matters");
    }

    #[test]
    fn post_without_english_is_error() {
        let tmp = setup_fixtures();
        let dir = tmp.path().join("blog/030-orphan");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("ar.md"), "# عنوان\n").unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::MissingEnglish(_))));
    }

    #[test]
    fn gallery_cases_have_both_images() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let case = find_case(&manifest, "smile-makeover");
        assert_eq!(case.before.filename, "before.png");
        assert_eq!(case.after.filename, "after.png");
        assert_eq!(case.before.dimensions, Some((8, 6)));
        assert_eq!(case.title.en, "Smile Makeover");
    }

    #[test]
    fn gallery_case_title_falls_back_to_directory_name() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let case = find_case(&manifest, "gap-closure");
        assert_eq!(case.title.en, "gap closure");
    }

    #[test]
    fn gallery_case_missing_after_is_error() {
        let tmp = setup_fixtures();
        let dir = tmp.path().join("gallery/030-broken");
        fs::create_dir_all(&dir).unwrap();
        write_png(&dir.join("before.png"), 4, 4);
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            ScanError::MissingImage {
                side: Side::After,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_numbers_are_rejected() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("services/010-braces.toml"),
            "[title]\nen = \"Braces\"\n",
        )
        .unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::DuplicateNumber(10, _))
        ));
    }

    #[test]
    fn numbered_and_unnumbered_entries_cannot_share_a_slug() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("services/implants.toml"),
            "[title]\nen = \"Implants draft\"\n",
        )
        .unwrap();
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::DuplicateSlug(ref slug, _) if slug == "implants"));
    }

    #[test]
    fn blog_slugs_are_unique_too() {
        let tmp = setup_fixtures();
        let dir = tmp.path().join("blog/030-flossing");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("en.md"), "# Flossing again\n").unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::DuplicateSlug(ref slug, _)) if slug == "flossing"
        ));
    }

    #[test]
    fn reviews_and_faq_are_loaded() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.reviews.len(), 3);
        assert_eq!(manifest.faqs.len(), 2);
        assert_eq!(manifest.reviews[0].rating, 5);
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("reviews.toml"),
            "[[review]]\nauthor = \"X\"\nrating = 9\n[review.text]\nen = \"hm\"\n",
        )
        .unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::InvalidRating { rating: 9, .. })
        ));
    }

    #[test]
    fn malformed_toml_names_the_file() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("faq.toml"), "[[faq]\n").unwrap();
        let err = scan(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("faq.toml"));
    }

    #[test]
    fn assets_directory_detected() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.assets.as_deref(), Some("assets"));
    }

    #[test]
    fn split_markdown_extracts_title_and_first_paragraph() {
        let (title, summary) = split_markdown("# Hello\n\nFirst line\nsecond line.\n\nMore.");
        assert_eq!(title.as_deref(), Some("Hello"));
        assert_eq!(summary, "First line second line.");
    }

    #[test]
    fn split_markdown_without_heading() {
        let (title, summary) = split_markdown("Just text.");
        assert_eq!(title, None);
        assert_eq!(summary, "Just text.");
    }
}
