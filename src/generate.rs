//! HTML site generation.
//!
//! Stage 2 of the build. Takes the scanned [`Manifest`] and writes the
//! final static site, once per locale.
//!
//! ## Generated Pages
//!
//! For each locale (`/ar/`, `/en/`):
//!
//! - **Home** (`/{locale}/`): hero, service cards, before/after carousel,
//!   reviews carousel and FAQ
//! - **Services** (`/{locale}/services/`, `/{locale}/services/{slug}/`)
//! - **Blog** (`/{locale}/blog/`, `/{locale}/blog/{slug}/`)
//! - **Gallery** (`/{locale}/gallery/`): the before/after carousel plus a grid
//! - **Contact** (`/{locale}/contact/`): the WhatsApp booking form
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Redirect to the default locale
//! ├── style.css                  # Brand colors + static/style.css
//! ├── site.js                    # Browser runtime (static/site.js)
//! ├── _headers                   # Cache-Control rules
//! ├── sitemap.xml                # Every listed page, with hreflang alternates
//! ├── robots.txt
//! ├── gallery/010-smile-makeover/before.jpg, after.jpg
//! ├── ar/
//! │   ├── index.html
//! │   ├── services/implants/index.html
//! │   └── ...
//! └── en/
//!     └── ...
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/site.js`: Swipe, carousel, card reveal and contact form runtime
//!
//! Both are linked with a `?v=` content fingerprint so a week-long cache
//! never serves a stale stylesheet after a deploy.
//!
//! The runtime is configured entirely through `data-*` attributes. Initial
//! states (first carousel slide, idle cards, image preload hints) are
//! computed here with the same [`crate::interaction`] types the runtime mirrors.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::{self, SiteConfig};
use crate::contact::{PHONE_PATTERN_SOURCE, whatsapp_chat_url, whatsapp_digits};
use crate::i18n::{TextKey, t};
use crate::interaction::{
    BoundaryPolicy, CardState, Carousel, ImagePair, PreloadCache, PreloadRequest,
    card::MOBILE_BREAKPOINT,
};
use crate::locale::{Locale, is_active_nav, localized_path, switch_locale_path};
use crate::scan::{GalleryCase, Manifest, Post, Review, Service};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Error walking assets: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Seconds a CDN may serve a cached response before revalidating: one week.
pub const REVALIDATE_SECONDS: u64 = 604_800;

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// What a build wrote, for the CLI summary.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    /// Output-relative paths of every HTML page, in write order.
    pub pages: Vec<String>,
    pub images: usize,
    pub assets: usize,
}

pub fn generate(
    manifest: &Manifest,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let config = &manifest.config;

    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );

    fs::create_dir_all(output_dir)?;
    fs::write(output_dir.join("style.css"), &css)?;
    fs::write(output_dir.join("site.js"), JS)?;

    let site = Site {
        manifest,
        config,
        css_href: format!("/style.css?v={}", fingerprint(css.as_bytes())),
        js_href: format!("/site.js?v={}", fingerprint(JS.as_bytes())),
    };

    let mut report = GenerateReport {
        images: copy_gallery_images(manifest, source_dir, output_dir)?,
        ..Default::default()
    };
    if let Some(assets) = &manifest.assets {
        report.assets = copy_assets(&source_dir.join(assets), output_dir)?;
    }

    let mut sitemap_paths = Vec::new();
    for locale in Locale::ALL {
        for (page, content) in site.pages(locale) {
            let path = page.path();
            let html = base_document(&site, &page, content)?;
            let file = output_dir.join(path.trim_start_matches('/')).join("index.html");
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&file, html.into_string())?;
            tracing::debug!(path = %path, "generated page");
            report
                .pages
                .push(format!("{}index.html", path.trim_start_matches('/')));
            if page.in_sitemap && locale == config.locales.default {
                sitemap_paths.push(page.rel.clone());
            }
        }
    }

    fs::write(
        output_dir.join("index.html"),
        render_root_redirect(config).into_string(),
    )?;
    fs::write(output_dir.join("_headers"), render_headers())?;
    fs::write(
        output_dir.join("sitemap.xml"),
        render_sitemap(config, &sitemap_paths),
    )?;
    fs::write(output_dir.join("robots.txt"), render_robots(config))?;

    Ok(report)
}

/// First 10 hex digits of the SHA-256 of `bytes`.
fn fingerprint(bytes: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(bytes));
    digest[..10].to_string()
}

fn case_image_url(case: &GalleryCase, filename: &str) -> String {
    format!("/gallery/{}/{}", case.slug, filename)
}

fn copy_gallery_images(
    manifest: &Manifest,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for case in &manifest.cases {
        let dir = output_dir.join("gallery").join(&case.slug);
        fs::create_dir_all(&dir)?;
        for image in [&case.before, &case.after] {
            fs::copy(source_dir.join(&image.source), dir.join(&image.filename))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Copy `assets/` into the output root, keeping its structure.
fn copy_assets(assets_dir: &Path, output_dir: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(assets_dir) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(assets_dir) else {
            continue;
        };
        let dst: PathBuf = output_dir.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else {
            fs::copy(entry.path(), &dst)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

/// JSON for embedding in a `<script>` element.
fn json_ld_string(value: &Value) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

// ============================================================================
// Page model
// ============================================================================

/// Everything `base_document` needs besides the page body.
struct Page {
    locale: Locale,
    /// Locale-relative path, e.g. `services/implants/`; empty for home.
    rel: String,
    title: String,
    description: String,
    json_ld: Vec<Value>,
    preload: Vec<PreloadRequest>,
    in_sitemap: bool,
}

impl Page {
    fn new(locale: Locale, rel: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            locale,
            rel: rel.into(),
            title: title.into(),
            description: String::new(),
            json_ld: Vec::new(),
            preload: Vec::new(),
            in_sitemap: true,
        }
    }

    fn path(&self) -> String {
        localized_path(self.locale, &self.rel)
    }
}

struct Site<'a> {
    manifest: &'a Manifest,
    config: &'a SiteConfig,
    css_href: String,
    js_href: String,
}

impl Site<'_> {
    fn clinic_name(&self, locale: Locale) -> &str {
        self.config.clinic.name.get(locale)
    }

    fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    fn page_title(&self, locale: Locale, heading: &str) -> String {
        format!("{} | {}", heading, self.clinic_name(locale))
    }

    /// All pages of one locale with their rendered bodies.
    fn pages(&self, locale: Locale) -> Vec<(Page, Markup)> {
        let mut pages = vec![
            self.home_page(locale),
            self.services_page(locale),
            self.gallery_page(locale),
            self.blog_index_page(locale),
            self.contact_page(locale),
        ];
        for service in &self.manifest.services {
            pages.push(self.service_page(locale, service));
        }
        for post in &self.manifest.posts {
            pages.push(self.post_page(locale, post));
        }
        pages
    }

    /// Before/after image pairs of the listed cases, in carousel order.
    fn gallery_pairs(&self) -> Vec<ImagePair> {
        self.manifest
            .listed_cases()
            .map(|case| ImagePair {
                before: case_image_url(case, &case.before.filename),
                after: case_image_url(case, &case.after.filename),
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // JSON-LD
    // ------------------------------------------------------------------------

    fn dentist_ld(&self, locale: Locale) -> Value {
        let clinic = &self.config.clinic;
        let mut ld = json!({
            "@context": "https://schema.org",
            "@type": "Dentist",
            "name": clinic.name.get(locale),
            "url": self.absolute(&localized_path(locale, "")),
            "telephone": clinic.phone,
            "priceRange": clinic.price_range,
            "openingHours": clinic.opening_hours,
            "address": {
                "@type": "PostalAddress",
                "streetAddress": clinic.address.get(locale),
            },
        });
        if !clinic.email.is_empty() {
            ld["email"] = json!(clinic.email);
        }
        let reviews = &self.manifest.reviews;
        if !reviews.is_empty() {
            let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
            let average = f64::from(total) / reviews.len() as f64;
            ld["aggregateRating"] = json!({
                "@type": "AggregateRating",
                "ratingValue": format!("{average:.1}"),
                "reviewCount": reviews.len(),
            });
        }
        ld
    }

    fn breadcrumbs_ld(&self, locale: Locale, trail: &[(&str, String)]) -> Value {
        let items: Vec<Value> = std::iter::once((t(locale, TextKey::NavHome), localized_path(locale, "")))
            .chain(trail.iter().map(|(name, rel)| (*name, localized_path(locale, rel))))
            .enumerate()
            .map(|(i, (name, path))| {
                json!({
                    "@type": "ListItem",
                    "position": i + 1,
                    "name": name,
                    "item": self.absolute(&path),
                })
            })
            .collect();
        json!({
            "@context": "https://schema.org",
            "@type": "BreadcrumbList",
            "itemListElement": items,
        })
    }

    fn faq_ld(&self, locale: Locale) -> Option<Value> {
        if self.manifest.faqs.is_empty() {
            return None;
        }
        let entities: Vec<Value> = self
            .manifest
            .faqs
            .iter()
            .map(|faq| {
                json!({
                    "@type": "Question",
                    "name": faq.question.get(locale),
                    "acceptedAnswer": {
                        "@type": "Answer",
                        "text": faq.answer.get(locale),
                    },
                })
            })
            .collect();
        Some(json!({
            "@context": "https://schema.org",
            "@type": "FAQPage",
            "mainEntity": entities,
        }))
    }

    // ------------------------------------------------------------------------
    // Pages
    // ------------------------------------------------------------------------

    fn home_page(&self, locale: Locale) -> (Page, Markup) {
        let clinic = &self.config.clinic;
        let mut page = Page::new(locale, "", self.clinic_name(locale));
        page.description = clinic.tagline.get(locale).to_string();
        page.json_ld.push(self.dentist_ld(locale));
        page.json_ld.extend(self.faq_ld(locale));
        page.preload = PreloadCache::new().begin(&self.gallery_pairs());

        let services: Vec<&Service> = self.manifest.listed_services().collect();
        let content = html! {
            section.hero {
                h1 { (clinic.name.get(locale)) }
                @if !clinic.tagline.is_empty() {
                    p.tagline { (clinic.tagline.get(locale)) }
                }
                div.hero-actions {
                    a.btn.btn-primary href=(localized_path(locale, "contact/")) {
                        (t(locale, TextKey::HeroCta))
                    }
                    a.btn.btn-whatsapp href=(whatsapp_chat_url(&clinic.whatsapp)) target="_blank" rel="noopener" {
                        (t(locale, TextKey::WhatsApp))
                    }
                }
            }
            @if !services.is_empty() {
                section.services #services {
                    h2 { (t(locale, TextKey::ServicesHeading)) }
                    p.section-intro { (t(locale, TextKey::ServicesIntro)) }
                    (self.service_cards(locale, &services))
                }
            }
            @if self.manifest.listed_cases().next().is_some() {
                section.gallery #gallery {
                    h2 { (t(locale, TextKey::GalleryHeading)) }
                    p.section-intro { (t(locale, TextKey::GalleryIntro)) }
                    (self.gallery_carousel(locale))
                }
            }
            @if !self.manifest.reviews.is_empty() {
                section.reviews #reviews {
                    h2 { (t(locale, TextKey::ReviewsHeading)) }
                    (self.reviews_carousel(locale, &self.manifest.reviews))
                }
            }
            @if !self.manifest.faqs.is_empty() {
                section.faq #faq {
                    h2 { (t(locale, TextKey::FaqHeading)) }
                    @for faq in &self.manifest.faqs {
                        details.faq-item {
                            summary { (faq.question.get(locale)) }
                            p { (faq.answer.get(locale)) }
                        }
                    }
                }
            }
        };
        (page, content)
    }

    fn services_page(&self, locale: Locale) -> (Page, Markup) {
        let heading = t(locale, TextKey::ServicesHeading);
        let mut page = Page::new(locale, "services/", self.page_title(locale, heading));
        page.description = t(locale, TextKey::ServicesIntro).to_string();
        page.json_ld
            .push(self.breadcrumbs_ld(locale, &[(heading, "services/".to_string())]));

        let services: Vec<&Service> = self.manifest.listed_services().collect();
        let content = html! {
            section.services {
                h1 { (heading) }
                p.section-intro { (t(locale, TextKey::ServicesIntro)) }
                (self.service_cards(locale, &services))
            }
        };
        (page, content)
    }

    fn service_page(&self, locale: Locale, service: &Service) -> (Page, Markup) {
        let rel = format!("services/{}/", service.slug);
        let title = service.title.get(locale);
        let mut page = Page::new(locale, rel.clone(), self.page_title(locale, title));
        page.description = service.summary.get(locale).to_string();
        page.in_sitemap = service.listed;
        let url = self.absolute(&page.path());
        page.json_ld.push(json!({
            "@context": "https://schema.org",
            "@type": "Service",
            "name": title,
            "description": service.summary.get(locale),
            "url": url,
            "provider": {
                "@type": "Dentist",
                "name": self.clinic_name(locale),
                "url": self.absolute(&localized_path(locale, "")),
            },
        }));
        page.json_ld.push(self.breadcrumbs_ld(
            locale,
            &[
                (t(locale, TextKey::NavServices), "services/".to_string()),
                (title, rel),
            ],
        ));

        let content = html! {
            article.service-detail {
                h1 {
                    @if !service.icon.is_empty() {
                        span.service-icon aria-hidden="true" { (service.icon) } " "
                    }
                    (title)
                }
                p.lead { (service.summary.get(locale)) }
                div.prose { (PreEscaped(render_markdown(service.body.get(locale)))) }
                a.btn.btn-primary href={ (localized_path(locale, "contact/")) "?service=" (service.slug) } {
                    (t(locale, TextKey::HeroCta))
                }
            }
        };
        (page, content)
    }

    fn gallery_page(&self, locale: Locale) -> (Page, Markup) {
        let heading = t(locale, TextKey::GalleryHeading);
        let mut page = Page::new(locale, "gallery/", self.page_title(locale, heading));
        page.description = t(locale, TextKey::GalleryIntro).to_string();
        page.preload = PreloadCache::new().begin(&self.gallery_pairs());
        page.json_ld.push(self.breadcrumbs_ld(
            locale,
            &[(t(locale, TextKey::NavGallery), "gallery/".to_string())],
        ));

        let content = html! {
            section.gallery {
                h1 { (heading) }
                p.section-intro { (t(locale, TextKey::GalleryIntro)) }
                (self.gallery_carousel(locale))
                div.case-grid {
                    @for case in self.manifest.listed_cases() {
                        figure.case-card {
                            (case_pair(locale, case, "lazy"))
                            figcaption {
                                strong { (case.title.get(locale)) }
                                @if !case.description.is_empty() {
                                    " " span { (case.description.get(locale)) }
                                }
                            }
                        }
                    }
                }
            }
        };
        (page, content)
    }

    fn blog_index_page(&self, locale: Locale) -> (Page, Markup) {
        let heading = t(locale, TextKey::BlogHeading);
        let mut page = Page::new(locale, "blog/", self.page_title(locale, heading));
        page.description = t(locale, TextKey::BlogIntro).to_string();
        page.json_ld.push(self.breadcrumbs_ld(
            locale,
            &[(t(locale, TextKey::NavBlog), "blog/".to_string())],
        ));

        let content = html! {
            section.blog-index {
                h1 { (heading) }
                p.section-intro { (t(locale, TextKey::BlogIntro)) }
                ul.post-list {
                    @for post in self.manifest.listed_posts() {
                        @let href = localized_path(locale, &format!("blog/{}/", post.slug));
                        li.post-summary {
                            h2 { a href=(href) { (post.title.get(locale)) } }
                            p { (post.summary.get(locale)) }
                            a.read-more href=(href) { (t(locale, TextKey::ReadMore)) }
                        }
                    }
                }
            }
        };
        (page, content)
    }

    fn post_page(&self, locale: Locale, post: &Post) -> (Page, Markup) {
        let rel = format!("blog/{}/", post.slug);
        let title = post.title.get(locale);
        let mut page = Page::new(locale, rel.clone(), self.page_title(locale, title));
        page.description = post.summary.get(locale).to_string();
        page.in_sitemap = post.listed;
        // A post without its own translation is served in English.
        let content_locale = if post.body.has(locale) {
            locale
        } else {
            Locale::En
        };
        let url = self.absolute(&page.path());
        page.json_ld.push(json!({
            "@context": "https://schema.org",
            "@type": "BlogPosting",
            "headline": title,
            "description": post.summary.get(locale),
            "inLanguage": content_locale.code(),
            "url": url,
            "author": { "@type": "Organization", "name": self.clinic_name(locale) },
            "publisher": { "@type": "Organization", "name": self.clinic_name(locale) },
        }));
        page.json_ld.push(self.breadcrumbs_ld(
            locale,
            &[
                (t(locale, TextKey::NavBlog), "blog/".to_string()),
                (title, rel),
            ],
        ));

        let content = html! {
            article.post lang=(content_locale.code()) dir=(content_locale.direction().as_str()) {
                div.prose { (PreEscaped(render_markdown(post.body.get(locale)))) }
            }
            a.back-link href=(localized_path(locale, "blog/")) { (t(locale, TextKey::BackToBlog)) }
        };
        (page, content)
    }

    fn contact_page(&self, locale: Locale) -> (Page, Markup) {
        let heading = t(locale, TextKey::ContactHeading);
        let clinic = &self.config.clinic;
        let mut page = Page::new(locale, "contact/", self.page_title(locale, heading));
        page.description = t(locale, TextKey::ContactIntro).to_string();
        page.json_ld.push(self.dentist_ld(locale));
        page.json_ld.push(self.breadcrumbs_ld(
            locale,
            &[(t(locale, TextKey::NavContact), "contact/".to_string())],
        ));

        let content = html! {
            section.contact {
                h1 { (heading) }
                p.section-intro { (t(locale, TextKey::ContactIntro)) }
                form #contact-form.contact-form novalidate
                    data-whatsapp=(whatsapp_digits(&clinic.whatsapp))
                    data-phone-pattern=(PHONE_PATTERN_SOURCE)
                    data-label-name=(t(locale, TextKey::FieldName))
                    data-label-phone=(t(locale, TextKey::FieldPhone))
                    data-label-service=(t(locale, TextKey::FieldService))
                    data-label-message=(t(locale, TextKey::FieldMessage))
                    data-error-name=(t(locale, TextKey::NameRequired))
                    data-error-phone=(t(locale, TextKey::PhoneInvalid))
                    data-error-service=(t(locale, TextKey::ServiceRequired)) {
                    div.field {
                        label for="cf-name" { (t(locale, TextKey::FieldName)) }
                        input #cf-name type="text" name="name" autocomplete="name" required
                            aria-describedby="cf-name-error";
                        p #cf-name-error.field-error data-error-for="name" aria-live="polite" {}
                    }
                    div.field {
                        label for="cf-phone" { (t(locale, TextKey::FieldPhone)) }
                        input #cf-phone type="tel" name="phone" inputmode="tel" autocomplete="tel"
                            dir="ltr" required aria-describedby="cf-phone-error";
                        p #cf-phone-error.field-error data-error-for="phone" aria-live="polite" {}
                    }
                    div.field {
                        label for="cf-service" { (t(locale, TextKey::FieldService)) }
                        select #cf-service name="service" required aria-describedby="cf-service-error" {
                            option value="" { (t(locale, TextKey::ChooseService)) }
                            @for service in self.manifest.listed_services() {
                                option value=(service.title.get(locale)) data-slug=(service.slug) {
                                    (service.title.get(locale))
                                }
                            }
                        }
                        p #cf-service-error.field-error data-error-for="service" aria-live="polite" {}
                    }
                    div.field {
                        label for="cf-message" { (t(locale, TextKey::FieldMessage)) }
                        textarea #cf-message name="message" rows="4" {}
                    }
                    button.btn.btn-whatsapp type="submit" { (t(locale, TextKey::Submit)) }
                }
                (contact_details(locale, self.config))
            }
        };
        (page, content)
    }

    // ------------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------------

    /// Service cards. On touch screens the first tap reveals the summary
    /// and a long press keeps it up; see [`crate::interaction::card`].
    fn service_cards(&self, locale: Locale, services: &[&Service]) -> Markup {
        let timings = &self.config.interaction.card;
        html! {
            div.service-grid {
                @for service in services {
                    a.service-card
                        href=(localized_path(locale, &format!("services/{}/", service.slug)))
                        data-card
                        data-state=(CardState::Idle.as_str())
                        data-long-press-ms=(timings.long_press_ms)
                        data-reveal-ms=(timings.reveal_ms)
                        data-move-tolerance=(timings.move_tolerance)
                        data-breakpoint=(MOBILE_BREAKPOINT) {
                        @if !service.icon.is_empty() {
                            span.service-icon aria-hidden="true" { (service.icon) }
                        }
                        h3 { (service.title.get(locale)) }
                        div.card-reveal {
                            p { (service.summary.get(locale)) }
                            span.learn-more { (t(locale, TextKey::LearnMore)) }
                        }
                    }
                }
            }
        }
    }

    fn gallery_carousel(&self, locale: Locale) -> Markup {
        let cases: Vec<&GalleryCase> = self.manifest.listed_cases().collect();
        let policy = self.config.carousels.gallery.policy;
        let carousel = Carousel::new(cases.len(), policy);
        let direction = locale.direction();

        html! {
            div.carousel.ba-carousel data-carousel="gallery"
                data-policy=(policy.as_str()) data-count=(carousel.count())
                data-current=(carousel.current()) data-dir=(direction.as_str()) {
                div.carousel-viewport {
                    div.carousel-track style={ "transform: " (carousel.track_transform_percent(direction)) } {
                        @for (i, case) in cases.iter().enumerate() {
                            figure.carousel-slide data-index=(i)
                                aria-hidden=[(i != carousel.current()).then_some("true")] {
                                (case_pair(locale, case, if i == 0 { "eager" } else { "lazy" }))
                                figcaption { (case.title.get(locale)) }
                            }
                        }
                    }
                }
                (carousel_controls(locale, &carousel))
            }
        }
    }

    fn reviews_carousel(&self, locale: Locale, reviews: &[Review]) -> Markup {
        let policy = self.config.carousels.reviews.policy;
        let carousel = Carousel::new(reviews.len(), policy);
        html! {
            div.carousel.review-carousel data-carousel="reviews"
                data-policy=(policy.as_str()) data-count=(carousel.count())
                data-current=(carousel.current()) data-dir=(locale.direction().as_str()) {
                div.review-stage {
                    @for (i, review) in reviews.iter().enumerate() {
                        blockquote class={ "review " (position_class(carousel.relative_position(i))) }
                            data-index=(i) {
                            p.stars aria-label={ (review.rating) "/5" } { (stars(review.rating)) }
                            p { (review.text.get(locale)) }
                            footer { "— " (review.author) }
                        }
                    }
                }
                (carousel_controls(locale, &carousel))
            }
        }
    }
}

/// Slide placement class from its distance to the current slide.
fn position_class(relative: isize) -> &'static str {
    match relative {
        0 => "is-current",
        -1 => "is-prev",
        1 => "is-next",
        _ => "is-hidden",
    }
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn case_pair(locale: Locale, case: &GalleryCase, loading: &str) -> Markup {
    let title = case.title.get(locale);
    html! {
        div.ba-pair {
            @for (image, key) in [(&case.before, TextKey::Before), (&case.after, TextKey::After)] {
                figure.ba-side {
                    img src=(case_image_url(case, &image.filename))
                        alt={ (title) " (" (t(locale, key)) ")" }
                        width=[image.dimensions.map(|(w, _)| w)]
                        height=[image.dimensions.map(|(_, h)| h)]
                        loading=(loading) decoding="async";
                    span.ba-label { (t(locale, key)) }
                }
            }
        }
    }
}

fn carousel_controls(locale: Locale, carousel: &Carousel) -> Markup {
    let clamped = carousel.policy() == BoundaryPolicy::Clamp;
    html! {
        @if carousel.count() > 1 {
            div.carousel-controls {
                button.carousel-prev type="button" data-action="prev"
                    aria-label=(t(locale, TextKey::Previous))
                    disabled[clamped && carousel.is_first()] { "‹" }
                div.carousel-dots {
                    @for i in 0..carousel.count() {
                        button.carousel-dot type="button" data-go=(i)
                            aria-label={ (i + 1) "/" (carousel.count()) }
                            aria-current=[(i == carousel.current()).then_some("true")] {}
                    }
                }
                button.carousel-next type="button" data-action="next"
                    aria-label=(t(locale, TextKey::Next))
                    disabled[clamped && carousel.is_last()] { "›" }
            }
        }
    }
}

fn contact_details(locale: Locale, config: &SiteConfig) -> Markup {
    let clinic = &config.clinic;
    html! {
        address.contact-details {
            @if !clinic.address.is_empty() {
                p { (clinic.address.get(locale)) }
            }
            @if !clinic.phone.is_empty() {
                p {
                    (t(locale, TextKey::CallUs)) ": "
                    a href={ "tel:" (whatsapp_digits(&clinic.phone)) } dir="ltr" { (clinic.phone) }
                }
            }
            p {
                a href=(whatsapp_chat_url(&clinic.whatsapp)) target="_blank" rel="noopener" {
                    (t(locale, TextKey::WhatsApp))
                }
            }
            @if !clinic.email.is_empty() {
                p { a href={ "mailto:" (clinic.email) } { (clinic.email) } }
            }
        }
    }
}

// ============================================================================
// HTML Components
// ============================================================================

const NAV_ENTRIES: [(TextKey, &str); 5] = [
    (TextKey::NavHome, ""),
    (TextKey::NavServices, "services/"),
    (TextKey::NavGallery, "gallery/"),
    (TextKey::NavBlog, "blog/"),
    (TextKey::NavContact, "contact/"),
];

/// Renders the navigation menu. The active entry comes from the path alone.
fn render_nav(locale: Locale, current_path: &str) -> Markup {
    html! {
        input.nav-toggle type="checkbox" id="nav-toggle";
        label.nav-hamburger for="nav-toggle" {
            span.hamburger-line {}
            span.hamburger-line {}
            span.hamburger-line {}
        }
        nav.site-nav {
            ul {
                @for (key, rel) in NAV_ENTRIES {
                    @let href = localized_path(locale, rel);
                    @let active = is_active_nav(current_path, &href);
                    li class=[active.then_some("current")] {
                        a href=(href) aria-current=[active.then_some("page")] { (t(locale, key)) }
                    }
                }
            }
        }
    }
}

/// Link to the same page in the other language.
fn render_language_switch(locale: Locale, current_path: &str) -> Markup {
    let other = locale.other();
    html! {
        a.lang-switch href=(switch_locale_path(current_path, other))
            hreflang=(other.code()) lang=(other.code())
            title=(t(locale, TextKey::Language)) {
            (other.native_name())
        }
    }
}

/// Renders the base HTML document structure
fn base_document(site: &Site, page: &Page, content: Markup) -> Result<Markup, GenerateError> {
    let locale = page.locale;
    let path = page.path();
    let config = site.config;
    let json_ld = page
        .json_ld
        .iter()
        .map(json_ld_string)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(html! {
        (DOCTYPE)
        html lang=(locale.code()) dir=(locale.direction().as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page.title) }
                @if !page.description.is_empty() {
                    meta name="description" content=(page.description);
                }
                link rel="canonical" href=(site.absolute(&path));
                @for alt in Locale::ALL {
                    link rel="alternate" hreflang=(alt.code())
                        href=(site.absolute(&switch_locale_path(&path, alt)));
                }
                link rel="alternate" hreflang="x-default"
                    href=(site.absolute(&switch_locale_path(&path, config.locales.default)));
                meta property="og:type" content="website";
                meta property="og:title" content=(page.title);
                meta property="og:locale" content=(locale.og_locale());
                meta property="og:url" content=(site.absolute(&path));
                meta name="theme-color" content=(config.colors.primary);
                link rel="stylesheet" href=(site.css_href);
                @for request in &page.preload {
                    link rel="preload" as="image" href=(request.url) data-preload-id=(request.id);
                }
                @for ld in &json_ld {
                    script type="application/ld+json" { (PreEscaped(ld)) }
                }
            }
            body data-swipe-threshold=(config.interaction.swipe_threshold)
                data-dir=(locale.direction().as_str()) {
                a.skip-link href="#main" { (t(locale, TextKey::SkipToContent)) }
                header.site-header {
                    a.brand href=(localized_path(locale, "")) { (site.clinic_name(locale)) }
                    (render_nav(locale, &path))
                    (render_language_switch(locale, &path))
                }
                main #main {
                    (content)
                }
                footer.site-footer {
                    (contact_details(locale, config))
                    p.copyright {
                        "© " (site.clinic_name(locale)) ". " (t(locale, TextKey::RightsReserved))
                    }
                }
                script src=(site.js_href) defer {}
            }
        }
    })
}

/// `/index.html`: sends visitors to the default locale.
fn render_root_redirect(config: &SiteConfig) -> Markup {
    let target = localized_path(config.locales.default, "");
    html! {
        (DOCTYPE)
        html lang=(config.locales.default.code()) {
            head {
                meta charset="UTF-8";
                title { (config.clinic.name.get(config.locales.default)) }
                meta http-equiv="refresh" content={ "0; url=" (target) };
                link rel="canonical" href={ (config.base_url()) (target) };
                @for locale in Locale::ALL {
                    link rel="alternate" hreflang=(locale.code())
                        href={ (config.base_url()) (localized_path(locale, "")) };
                }
            }
            body {
                ul {
                    @for locale in Locale::ALL {
                        li { a href=(localized_path(locale, "")) lang=(locale.code()) { (locale.native_name()) } }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Non-HTML outputs
// ============================================================================

/// `_headers` for static hosts that read it (Netlify, Cloudflare Pages).
fn render_headers() -> String {
    let cache = format!(
        "public, max-age={REVALIDATE_SECONDS}, stale-while-revalidate={REVALIDATE_SECONDS}"
    );
    let mut out = String::new();
    for pattern in ["/*", "/style.css", "/site.js", "/gallery/*", "/assets/*"] {
        out.push_str(pattern);
        out.push('\n');
        out.push_str(&format!("  Cache-Control: {cache}\n"));
        if pattern == "/*" {
            out.push_str("  X-Content-Type-Options: nosniff\n");
            out.push_str("  Referrer-Policy: strict-origin-when-cross-origin\n");
        }
    }
    out
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// One `<url>` per listed page and locale, each naming all its translations.
fn render_sitemap(config: &SiteConfig, rels: &[String]) -> String {
    let base = config.base_url();
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" \
         xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );
    for rel in rels {
        for locale in Locale::ALL {
            out.push_str("  <url>\n");
            out.push_str(&format!(
                "    <loc>{}</loc>\n",
                xml_escape(&format!("{base}{}", localized_path(locale, rel)))
            ));
            for alt in Locale::ALL {
                out.push_str(&format!(
                    "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>\n",
                    alt.code(),
                    xml_escape(&format!("{base}{}", localized_path(alt, rel)))
                ));
            }
            out.push_str("  </url>\n");
        }
    }
    out.push_str("</urlset>\n");
    out
}

fn render_robots(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        config.base_url()
    )
}

// ============================================================================
// Tests
// ============================================================================
