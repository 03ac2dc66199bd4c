//! Contact form validation and the WhatsApp hand-off.
//!
//! Nothing is submitted to a server. A valid form becomes a short plain-text
//! message which is URL-encoded into a `https://wa.me/<number>?text=...`
//! link; opening that link is the whole "submission".
//!
//! Validation never fails loudly: it produces a [`ValidationReport`] mapping
//! each invalid field to a localized message. [`ContactFormState`] adds the
//! interactive behavior of the rendered form: editing a field clears its
//! error, leaving it (blur) re-validates just that field.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::i18n::{TextKey, t};
use crate::locale::Locale;

/// Digits, spaces, hyphens, parentheses and `+`, eight characters or more.
/// Also handed to the browser runtime as the form's `data-phone-pattern`.
pub const PHONE_PATTERN_SOURCE: &str = r"^[0-9\s\-()+]{8,}$";

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN_SOURCE).expect("phone pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Phone,
    Service,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Phone, Field::Service];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Service => "service",
        }
    }

    fn error_key(self) -> TextKey {
        match self {
            Self::Name => TextKey::NameRequired,
            Self::Phone => TextKey::PhoneInvalid,
            Self::Service => TextKey::ServiceRequired,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub service: String,
    /// Optional free text.
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }
}

/// The check for a single field. `None` means the value is acceptable.
pub fn validate_field(form: &ContactForm, field: Field, locale: Locale) -> Option<String> {
    let ok = match field {
        Field::Name => !form.name.trim().is_empty(),
        Field::Phone => PHONE_PATTERN.is_match(form.phone.trim()),
        Field::Service => !form.service.trim().is_empty(),
    };
    (!ok).then(|| t(locale, field.error_key()).to_string())
}

pub fn validate(form: &ContactForm, locale: Locale) -> ValidationReport {
    let errors = Field::ALL
        .into_iter()
        .filter_map(|field| validate_field(form, field, locale).map(|msg| (field, msg)))
        .collect();
    ValidationReport { errors }
}

/// The plain-text message sent to the clinic, one `Label: value` per line.
pub fn compose_message(form: &ContactForm, locale: Locale) -> String {
    let mut lines = vec![
        format!("{}: {}", t(locale, TextKey::FieldName), form.name.trim()),
        format!("{}: {}", t(locale, TextKey::FieldPhone), form.phone.trim()),
        format!("{}: {}", t(locale, TextKey::FieldService), form.service.trim()),
    ];
    let message = form.message.trim();
    if !message.is_empty() {
        lines.push(format!("{}: {}", t(locale, TextKey::FieldMessage), message));
    }
    lines.join("\n")
}

/// `wa.me` accepts the international number as bare digits.
pub fn whatsapp_digits(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

pub fn whatsapp_url(number: &str, text: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        whatsapp_digits(number),
        urlencoding::encode(text)
    )
}

/// Plain chat link without a prefilled message (header/footer buttons).
pub fn whatsapp_chat_url(number: &str) -> String {
    format!("https://wa.me/{}", whatsapp_digits(number))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Open this URL in a new tab.
    OpenWhatsApp(String),
    /// Stay on the form and show these errors.
    Invalid(ValidationReport),
}

/// Validate and, when valid, build the WhatsApp link.
pub fn submit(form: &ContactForm, whatsapp_number: &str, locale: Locale) -> SubmitOutcome {
    let report = validate(form, locale);
    if !report.is_valid() {
        tracing::debug!(errors = report.errors.len(), "contact: submission rejected");
        return SubmitOutcome::Invalid(report);
    }
    SubmitOutcome::OpenWhatsApp(whatsapp_url(
        whatsapp_number,
        &compose_message(form, locale),
    ))
}

/// Live form state: values plus the errors currently shown inline.
#[derive(Debug, Clone)]
pub struct ContactFormState {
    locale: Locale,
    form: ContactForm,
    shown: ValidationReport,
}

impl ContactFormState {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            form: ContactForm::default(),
            shown: ValidationReport::default(),
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn shown_errors(&self) -> &ValidationReport {
        &self.shown
    }

    /// The user typed into `field`; its error disappears immediately.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.form.name = value,
            Field::Phone => self.form.phone = value,
            Field::Service => self.form.service = value,
        }
        self.shown.errors.remove(&field);
    }

    pub fn edit_message(&mut self, value: impl Into<String>) {
        self.form.message = value.into();
    }

    /// The user left `field`; re-check only that field.
    pub fn blur(&mut self, field: Field) {
        match validate_field(&self.form, field, self.locale) {
            Some(msg) => {
                self.shown.errors.insert(field, msg);
            }
            None => {
                self.shown.errors.remove(&field);
            }
        }
    }

    pub fn submit(&mut self, whatsapp_number: &str) -> SubmitOutcome {
        let outcome = submit(&self.form, whatsapp_number, self.locale);
        self.shown = match &outcome {
            SubmitOutcome::Invalid(report) => report.clone(),
            SubmitOutcome::OpenWhatsApp(_) => ValidationReport::default(),
        };
        outcome
    }
}
