use clap::{Parser, Subcommand};
use clinic_site::contact::{self, ContactForm, Field, SubmitOutcome};
use clinic_site::locale::{self, Locale};
use clinic_site::{config, generate, output, scan};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn version_string() -> &'static str {
    let on_tag = env!("CLINIC_SITE_ON_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("CLINIC_SITE_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "clinic-site")]
#[command(about = "Static site generator for a bilingual dental clinic website")]
#[command(long_about = "\
Static site generator for a bilingual (Arabic/English) dental clinic website

Every page is built twice, under /ar/ (right-to-left) and /en/. Entries are
ordered by numeric prefix; entries without one are built but not listed.

Content structure:

  content/
  ├── config.toml                  # Clinic details, locales, colors (optional)
  ├── services/
  │   └── 010-implants.toml        # icon, [title] [summary] [body] with en/ar
  ├── blog/
  │   └── 010-first-visit/
  │       ├── en.md                # Required, title from first '# ' heading
  │       └── ar.md                # Optional, falls back to English
  ├── gallery/
  │   └── 010-smile-makeover/
  │       ├── before.jpg
  │       ├── after.jpg
  │       └── case.toml            # Optional [title] [description]
  ├── reviews.toml                 # [[review]] author, rating, [review.text]
  ├── faq.toml                     # [[faq]] [faq.question] [faq.answer]
  └── assets/                      # Copied to the output root

Run 'clinic-site gen-config' to generate a documented config.toml.
Set RUST_LOG=debug for diagnostic logging.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory and generate the site
    Build,
    /// Validate the content directory without building
    Check {
        /// Print the scanned manifest as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Validate contact details and print the WhatsApp link they produce
    ContactLink {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        service: String,
        #[arg(long, default_value = "")]
        message: String,
        /// Language of the message labels
        #[arg(long, default_value = "en")]
        locale: Locale,
    },
    /// Print the same page path in another locale
    SwitchLocale {
        path: String,
        #[arg(long)]
        to: Locale,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check { json: true } => {
            let manifest = scan::scan(&cli.source)?;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        Command::Check { json: false } => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::ContactLink {
            name,
            phone,
            service,
            message,
            locale,
        } => {
            let site_config = config::load_config(&cli.source)?;
            let form = ContactForm {
                name,
                phone,
                service,
                message,
            };
            match contact::submit(&form, &site_config.clinic.whatsapp, locale) {
                SubmitOutcome::OpenWhatsApp(url) => println!("{url}"),
                SubmitOutcome::Invalid(report) => {
                    for field in Field::ALL {
                        if let Some(msg) = report.error(field) {
                            eprintln!("{}: {}", field.as_str(), msg);
                        }
                    }
                    return Err("contact details are invalid".into());
                }
            }
        }
        Command::SwitchLocale { path, to } => {
            println!("{}", locale::switch_locale_path(&path, to));
        }
    }

    Ok(())
}
