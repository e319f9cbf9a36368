// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-level configuration from `<body data-*>` attributes.

use alloc::string::String;

use crate::forms::{NewsletterConfig, NewsletterMode};
use crate::notice::Notice;

/// Dataset key for the newsletter mode (`data-newsletter-mode`).
pub const NEWSLETTER_MODE_KEY: &str = "newsletterMode";
/// Dataset key for the newsletter provider URL (`data-newsletter-url`).
pub const NEWSLETTER_URL_KEY: &str = "newsletterUrl";
/// Dataset key for the notice banner text (`data-notice`).
pub const NOTICE_KEY: &str = "notice";
/// Dataset key enabling console tracing (`data-trace`).
pub const TRACE_KEY: &str = "trace";

/// Everything the page body configures.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SiteConfig {
    /// Newsletter delivery.
    pub newsletter: NewsletterConfig,
    /// Banner to show, if any.
    pub notice: Option<Notice>,
    /// Whether to log trace events to the console.
    pub trace: bool,
}

impl SiteConfig {
    /// Reads the configuration through `lookup`, which maps a dataset key to
    /// its value.
    ///
    /// Empty values are treated as absent, except for `trace`, which is on
    /// whenever the attribute is present and not `"false"` or `"0"`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mode = lookup(NEWSLETTER_MODE_KEY);
        let url = lookup(NEWSLETTER_URL_KEY);
        let notice = lookup(NOTICE_KEY);
        let trace = lookup(TRACE_KEY).is_some_and(|v| v != "false" && v != "0");
        Self {
            newsletter: NewsletterConfig::new(
                NewsletterMode::from_attr(mode.as_deref()),
                url.as_deref(),
            ),
            notice: Notice::from_config(notice.as_deref()),
            trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn empty_body_gives_defaults() {
        let c = SiteConfig::from_lookup(lookup(&[]));
        assert_eq!(c, SiteConfig::default());
        assert_eq!(c.newsletter.mode, NewsletterMode::Local);
        assert!(!c.trace);
    }

    #[test]
    fn all_keys_are_read() {
        let c = SiteConfig::from_lookup(lookup(&[
            ("newsletterMode", "provider"),
            ("newsletterUrl", "https://example.test/join"),
            ("notice", "Maintenance tonight"),
            ("trace", ""),
        ]));
        assert_eq!(
            c.newsletter.mode,
            NewsletterMode::Provider("provider".to_string())
        );
        assert_eq!(
            c.newsletter.provider_url.as_deref(),
            Some("https://example.test/join")
        );
        assert_eq!(
            c.notice.as_ref().map(Notice::text),
            Some("Maintenance tonight")
        );
        assert!(c.trace, "a bare data-trace attribute enables tracing");
    }

    #[test]
    fn empty_values_are_absent() {
        let c = SiteConfig::from_lookup(lookup(&[
            ("newsletterUrl", ""),
            ("notice", ""),
            ("trace", "false"),
        ]));
        assert_eq!(c.newsletter.provider_url, None);
        assert_eq!(c.notice, None);
        assert!(!c.trace);
    }
}
