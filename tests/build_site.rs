//! End-to-end build of the fixture content, through the library and the CLI.

use std::fs;
use std::path::Path;
use std::process::Command;

use clinic_site::generate::generate;
use clinic_site::locale::Locale;
use clinic_site::scan::scan;
use tempfile::TempDir;
use walkdir::WalkDir;

fn fixtures() -> TempDir {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    let tmp = TempDir::new().unwrap();
    for entry in WalkDir::new(&src) {
        let entry = entry.unwrap();
        let dst = tmp.path().join(entry.path().strip_prefix(&src).unwrap());
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst).unwrap();
        } else {
            fs::copy(entry.path(), &dst).unwrap();
        }
    }
    tmp
}

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_clinic-site"))
}

#[test]
fn library_build_produces_mirrored_locales() {
    let src = fixtures();
    let out = TempDir::new().unwrap();
    let manifest = scan(src.path()).unwrap();
    let report = generate(&manifest, src.path(), out.path()).unwrap();

    let ar: Vec<&String> = report.pages.iter().filter(|p| p.starts_with("ar/")).collect();
    let en: Vec<&String> = report.pages.iter().filter(|p| p.starts_with("en/")).collect();
    assert_eq!(ar.len(), en.len());
    for page in ar {
        let twin = format!("en/{}", &page["ar/".len()..]);
        assert!(out.path().join(&twin).exists(), "{twin}");
    }

    for file in ["index.html", "style.css", "site.js", "_headers", "sitemap.xml", "robots.txt"] {
        assert!(out.path().join(file).exists(), "{file}");
    }
}

#[test]
fn every_page_links_to_its_translation() {
    let src = fixtures();
    let out = TempDir::new().unwrap();
    let manifest = scan(src.path()).unwrap();
    let report = generate(&manifest, src.path(), out.path()).unwrap();

    for page in &report.pages {
        let html = fs::read_to_string(out.path().join(page)).unwrap();
        let (code, rest) = page.split_once('/').unwrap();
        let locale = Locale::from_code(code).unwrap();
        let dir = rest.trim_end_matches("index.html");
        let expected = format!(
            r#"class="lang-switch" href="/{}/{}""#,
            locale.other().code(),
            dir
        );
        assert!(html.contains(&expected), "{page} missing {expected}");
    }
}

#[test]
fn cli_build_writes_site() {
    let src = fixtures();
    let out = TempDir::new().unwrap();
    let status = bin()
        .arg("--source")
        .arg(src.path())
        .arg("--output")
        .arg(out.path())
        .arg("build")
        .status()
        .unwrap();
    assert!(status.success());
    assert!(out.path().join("ar/index.html").exists());
}

#[test]
fn cli_check_rejects_broken_gallery() {
    let src = fixtures();
    fs::remove_file(src.path().join("gallery/020-gap-closure/after.png")).unwrap();
    let output = bin()
        .arg("--source")
        .arg(src.path())
        .arg("check")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("gap-closure"));
}

#[test]
fn cli_check_json_prints_manifest() {
    let src = fixtures();
    let output = bin()
        .arg("--source")
        .arg(src.path())
        .args(["check", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let manifest: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(manifest["services"][0]["slug"], "implants");
    assert_eq!(manifest["services"][0]["title"]["ar"], "زراعة الأسنان");
    assert_eq!(manifest["cases"][0]["before"]["dimensions"][0], 8);
    assert_eq!(manifest["reviews"].as_array().map(Vec::len), Some(3));
    assert_eq!(manifest["config"]["locales"]["default"], "ar");
}

#[test]
fn cli_contact_link_encodes_message() {
    let src = fixtures();
    let output = bin()
        .arg("--source")
        .arg(src.path())
        .args([
            "contact-link",
            "--name",
            "Ali",
            "--phone",
            "0100 329 4050",
            "--service",
            "Implants",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let url = String::from_utf8_lossy(&output.stdout);
    assert!(url.starts_with("https://wa.me/201003294050?text="));
    assert!(url.contains("Name%3A%20Ali%0APhone%3A%200100%20329%204050%0AService%3A%20Implants"));
}

#[test]
fn cli_contact_link_rejects_short_phone() {
    let src = fixtures();
    let output = bin()
        .arg("--source")
        .arg(src.path())
        .args(["contact-link", "--name", "Ali", "--phone", "12", "--service", "Implants"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("phone: Please enter a valid phone number"));
    assert!(output.stdout.is_empty());
}

#[test]
fn cli_switch_locale_preserves_rest_of_path() {
    let output = bin()
        .args(["switch-locale", "/ar/blog/first-visit?ref=home", "--to", "en"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "/en/blog/first-visit?ref=home"
    );
}

#[test]
fn cli_gen_config_round_trips() {
    let src = TempDir::new().unwrap();
    let output = bin().arg("gen-config").output().unwrap();
    assert!(output.status.success());
    fs::write(src.path().join("config.toml"), &output.stdout).unwrap();
    let manifest = scan(src.path()).unwrap();
    assert_eq!(manifest.config.locales.default, Locale::Ar);
}
