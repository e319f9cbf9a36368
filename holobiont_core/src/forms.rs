// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Newsletter and contact form submission.
//!
//! A submission goes through three steps. `prepare_*` validates the trimmed
//! field values and resolves the endpoint, producing a [`Submission`] or a
//! [`FormError`]. The backend then POSTs the fields once as
//! `application/x-www-form-urlencoded`. Finally [`interpret`] turns the HTTP
//! outcome into `Ok(())` or a [`ResponseError`]. Each step has a matching
//! [`Status`] for the form's `.form-status` element.
//!
//! The two forms read a JSON response body differently:
//!
//! | body                         | newsletter | contact |
//! |------------------------------|------------|---------|
//! | not JSON / not an object     | success    | failure |
//! | object without `ok`          | success    | failure |
//! | `ok` present and truthy      | success    | success |
//! | `ok` present and falsy       | failure    | failure |
//!
//! A non-2xx status is always a failure.

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Which form a submission belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// `[data-newsletter-form]`.
    Newsletter,
    /// `[data-contact-form]`.
    Contact,
}

impl FormKind {
    /// Selector locating the form.
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Newsletter => "[data-newsletter-form]",
            Self::Contact => "[data-contact-form]",
        }
    }

    /// Returns `true` if this form's status element carries `data-state`.
    #[must_use]
    pub const fn tracks_state(self) -> bool {
        matches!(self, Self::Newsletter)
    }

    const fn pending_message(self) -> &'static str {
        match self {
            Self::Newsletter => "Submitting...",
            Self::Contact => "Sending...",
        }
    }

    const fn success_message(self) -> &'static str {
        match self {
            Self::Newsletter => "Thanks for subscribing.",
            Self::Contact => "Message sent. Thank you.",
        }
    }

    const fn failure_message(self) -> &'static str {
        match self {
            Self::Newsletter => "Subscription failed. Please try again.",
            Self::Contact => "Message failed. Please try again.",
        }
    }
}

/// Selector for a form's status element.
pub const STATUS_SELECTOR: &str = ".form-status";

/// The `data-state` attribute value of a status element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusState {
    /// Request in flight.
    Pending,
    /// Request accepted.
    Success,
    /// Validation, configuration, or request failure.
    Error,
}

impl StatusState {
    /// Returns the attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Text and state for a form's status element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    /// User-facing message.
    pub message: Cow<'static, str>,
    /// Machine-readable state.
    pub state: StatusState,
}

impl Status {
    /// The in-flight status.
    #[must_use]
    pub fn pending(kind: FormKind) -> Self {
        Self {
            message: Cow::Borrowed(kind.pending_message()),
            state: StatusState::Pending,
        }
    }

    /// The accepted status. The backend also resets the form.
    #[must_use]
    pub fn success(kind: FormKind) -> Self {
        Self {
            message: Cow::Borrowed(kind.success_message()),
            state: StatusState::Success,
        }
    }

    /// The status for a rejected submission attempt.
    #[must_use]
    pub fn invalid(error: &FormError) -> Self {
        Self {
            message: Cow::Borrowed(error.message()),
            state: StatusState::Error,
        }
    }

    /// The status for a failed request.
    #[must_use]
    pub fn failed(kind: FormKind, error: &ResponseError) -> Self {
        let message = match error {
            ResponseError::Rejected {
                reason: Some(reason),
            } => Cow::Owned(reason.clone()),
            ResponseError::Rejected { reason: None } | ResponseError::Transport => {
                Cow::Borrowed(kind.failure_message())
            }
        };
        Self {
            message,
            state: StatusState::Error,
        }
    }
}

/// Newsletter delivery mode from `data-newsletter-mode`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum NewsletterMode {
    /// Submit to the form's own `action`.
    #[default]
    Local,
    /// Submit to an external provider; the value is the mode name.
    Provider(String),
}

impl NewsletterMode {
    /// Parses the attribute. Absent, empty, or `local` means local.
    #[must_use]
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            None | Some("" | "local") => Self::Local,
            Some(other) => Self::Provider(other.to_string()),
        }
    }
}

/// Newsletter configuration read from the page body.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct NewsletterConfig {
    /// Delivery mode.
    pub mode: NewsletterMode,
    /// Provider endpoint from `data-newsletter-url`; never empty.
    pub provider_url: Option<String>,
}

impl NewsletterConfig {
    /// Builds a config, treating an empty URL as absent.
    #[must_use]
    pub fn new(mode: NewsletterMode, provider_url: Option<&str>) -> Self {
        Self {
            mode,
            provider_url: provider_url.filter(|u| !u.is_empty()).map(ToString::to_string),
        }
    }

    /// Resolves where to POST, given the form's `action` attribute.
    fn endpoint(&self, action: Option<&str>) -> Result<String, FormError> {
        let chosen = match (&self.mode, &self.provider_url) {
            (NewsletterMode::Provider(_), Some(url)) => Some(url.as_str()),
            _ => action,
        };
        chosen
            .filter(|e| !e.is_empty())
            .map(ToString::to_string)
            .ok_or(FormError::NotConfigured(FormKind::Newsletter))
    }
}

/// A validated request ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// Which form produced it.
    pub kind: FormKind,
    /// Absolute or page-relative URL.
    pub endpoint: String,
    /// Body fields in order, values already trimmed.
    pub fields: Vec<(&'static str, String)>,
}

/// Content type of every submission body.
pub const CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Why a submission was not sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormError {
    /// No usable endpoint.
    NotConfigured(FormKind),
    /// The newsletter email is empty.
    MissingEmail,
    /// A required contact field is empty.
    MissingFields,
}

impl FormError {
    /// The user-facing status text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotConfigured(FormKind::Newsletter) => "Newsletter endpoint is not configured.",
            Self::NotConfigured(FormKind::Contact) => "Contact endpoint is not configured.",
            Self::MissingEmail => "Please enter a valid email.",
            Self::MissingFields => "Please complete all required fields.",
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl core::error::Error for FormError {}

/// Validates a newsletter signup.
///
/// A provider mode without a provider URL fails before the email is
/// checked.
pub fn prepare_newsletter(
    config: &NewsletterConfig,
    action: Option<&str>,
    email: &str,
    company: &str,
) -> Result<Submission, FormError> {
    if matches!(config.mode, NewsletterMode::Provider(_)) && config.provider_url.is_none() {
        return Err(FormError::NotConfigured(FormKind::Newsletter));
    }
    let email = email.trim();
    if email.is_empty() {
        return Err(FormError::MissingEmail);
    }
    let endpoint = config.endpoint(action)?;
    Ok(Submission {
        kind: FormKind::Newsletter,
        endpoint,
        fields: alloc::vec![
            ("email", email.to_string()),
            ("company", company.trim().to_string()),
        ],
    })
}

/// Raw contact form values, untrimmed.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContactFields<'a> {
    /// `input[name="name"]`.
    pub name: &'a str,
    /// `input[name="email"]`.
    pub email: &'a str,
    /// `textarea[name="message"]`.
    pub message: &'a str,
    /// `input[name="company"]`, a honeypot passed through unchecked.
    pub company: &'a str,
}

/// Validates a contact message.
///
/// Required fields are checked before the endpoint.
pub fn prepare_contact(
    action: Option<&str>,
    fields: ContactFields<'_>,
) -> Result<Submission, FormError> {
    let name = fields.name.trim();
    let email = fields.email.trim();
    let message = fields.message.trim();
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(FormError::MissingFields);
    }
    let endpoint = action
        .filter(|a| !a.is_empty())
        .ok_or(FormError::NotConfigured(FormKind::Contact))?;
    Ok(Submission {
        kind: FormKind::Contact,
        endpoint: endpoint.to_string(),
        fields: alloc::vec![
            ("name", name.to_string()),
            ("email", email.to_string()),
            ("message", message.to_string()),
            ("company", fields.company.trim().to_string()),
        ],
    })
}

/// Why a sent submission did not succeed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseError {
    /// The request never produced a response.
    Transport,
    /// The server answered but did not accept the submission.
    Rejected {
        /// The response's `error` text, if it sent a non-empty one.
        reason: Option<String>,
    },
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => f.write_str("request failed before a response"),
            Self::Rejected { reason: Some(r) } => write!(f, "submission rejected: {r}"),
            Self::Rejected { reason: None } => f.write_str("submission rejected"),
        }
    }
}

impl core::error::Error for ResponseError {}

#[derive(Debug, Deserialize)]
struct Payload {
    // Absent and `null` differ: only absence counts as success for the
    // newsletter.
    #[serde(default, deserialize_with = "present")]
    ok: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(d).map(Some)
}

fn parse_payload(body: &str) -> Option<Payload> {
    let value: Value = serde_json::from_str(body).ok()?;
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

/// Loose truthiness for JSON values: `null`, `false`, `0`, and `""` are
/// falsy.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn reason(payload: Option<&Payload>) -> Option<String> {
    let error = payload?.error.as_ref().filter(|e| truthy(e))?;
    Some(match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Interprets a completed HTTP exchange.
///
/// `transport_ok` is the response's 2xx check; `body` is the response text
/// (empty if unreadable).
pub fn interpret(kind: FormKind, transport_ok: bool, body: &str) -> Result<(), ResponseError> {
    let payload = parse_payload(body);
    let accepted = match kind {
        FormKind::Newsletter => payload
            .as_ref()
            .and_then(|p| p.ok.as_ref())
            .is_none_or(truthy),
        FormKind::Contact => payload.as_ref().and_then(|p| p.ok.as_ref()).is_some_and(truthy),
    };
    if transport_ok && accepted {
        Ok(())
    } else {
        Err(ResponseError::Rejected {
            reason: reason(payload.as_ref()),
        })
    }
}
