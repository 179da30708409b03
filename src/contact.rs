//! Contact form validation.
//!
//! The form posts to a third-party endpoint configured in `[contact]`. The
//! checks run before anything is sent; the host performs the request and
//! reports back a [`Delivery`], which replaces the status line.
//!
//! | Field | Rule |
//! |-------|------|
//! | name | required, at least 2 characters after trimming |
//! | email | required, `local@domain.tld` shape |
//! | message | required, at least 10 characters after trimming |

use crate::dom::Fragment;
use maud::html;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Status line shown when any field fails.
pub const INVALID_STATUS: &str = "Please fix the errors above";
pub const SENT_STATUS: &str = "Message sent successfully! I'll get back to you soon.";
pub const FAILED_STATUS: &str = "Failed to send message. Please try again or email directly.";

/// Button that copies the contact address.
pub const COPY_EMAIL_ID: &str = "copy-email";
pub const COPIED_TOAST: &str = "Email copied to clipboard!";
pub const COPY_FAILED_TOAST: &str = "Failed to copy email";

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Message is required")]
    MessageRequired,
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
}

impl FieldError {
    /// Form field the error belongs to.
    pub fn field(self) -> &'static str {
        match self {
            FieldError::NameRequired | FieldError::NameTooShort => "name",
            FieldError::EmailRequired | FieldError::EmailInvalid => "email",
            FieldError::MessageRequired | FieldError::MessageTooShort => "message",
        }
    }
}

/// Outcome of posting a valid form to the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_name(name: &str) -> Result<(), FieldError> {
    let name = name.trim();
    if name.is_empty() {
        Err(FieldError::NameRequired)
    } else if name.chars().count() < MIN_NAME_CHARS {
        Err(FieldError::NameTooShort)
    } else {
        Ok(())
    }
}

pub fn validate_email(email: &str) -> Result<(), FieldError> {
    if email.trim().is_empty() {
        Err(FieldError::EmailRequired)
    } else if !is_valid_email(email) {
        Err(FieldError::EmailInvalid)
    } else {
        Ok(())
    }
}

pub fn validate_message(message: &str) -> Result<(), FieldError> {
    let message = message.trim();
    if message.is_empty() {
        Err(FieldError::MessageRequired)
    } else if message.chars().count() < MIN_MESSAGE_CHARS {
        Err(FieldError::MessageTooShort)
    } else {
        Ok(())
    }
}

/// Every failing field, in form order.
pub fn validate(form: &ContactForm) -> Vec<FieldError> {
    [
        validate_name(&form.name),
        validate_email(&form.email),
        validate_message(&form.message),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}

/// Contents of the form status mount after a validation pass.
pub fn render_status(errors: &[FieldError]) -> Fragment {
    let markup = html! {
        @if errors.is_empty() {
            p.form-status.ready { "Sending…" }
        } @else {
            p.form-status.error role="alert" { (INVALID_STATUS) }
            ul.field-errors {
                @for err in errors {
                    li data-field=(err.field()) { (err.to_string()) }
                }
            }
        }
    };
    Fragment::new(markup, vec![])
}

pub fn render_delivery(delivery: Delivery) -> Fragment {
    let markup = html! {
        @match delivery {
            Delivery::Sent => {
                p.form-status.success { "✓ " (SENT_STATUS) }
            }
            Delivery::Failed => {
                p.form-status.error role="alert" { "✗ " (FAILED_STATUS) }
            }
        }
    };
    Fragment::new(markup, vec![])
}
