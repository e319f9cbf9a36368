// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The site-wide notice banner.

use alloc::format;
use alloc::string::String;

/// Class of the banner element.
pub const BANNER_CLASS: &str = "site-notice-banner";

/// Inline style of the banner element.
pub const BANNER_STYLE: &str = "background: #ffb84d; color: #000; padding: 10px; \
     text-align: center; font-weight: bold; position: relative; z-index: 9999;";

/// Inline style of the dismiss button.
pub const DISMISS_STYLE: &str = "background:none; border:none; color:inherit; \
     font:inherit; cursor:pointer; margin-left:1rem; font-size:1.2em;";

/// Text of the dismiss button.
pub const DISMISS_LABEL: &str = "\u{d7}";

/// Accessible label of the dismiss button.
pub const DISMISS_ARIA_LABEL: &str = "Dismiss notice";

/// A notice to show above the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    text: String,
}

impl Notice {
    /// Returns a notice for a non-empty configured message.
    #[must_use]
    pub fn from_config(text: Option<&str>) -> Option<Self> {
        let text = text?;
        if text.is_empty() {
            return None;
        }
        Some(Self { text: text.into() })
    }

    /// The configured message.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The banner text, prefixed with a construction sign.
    ///
    /// Inserted as text, never as markup.
    #[must_use]
    pub fn banner_text(&self) -> String {
        format!("\u{1f6a7} {}", self.text)
    }
}
