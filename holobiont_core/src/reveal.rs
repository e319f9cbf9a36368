// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-triggered reveals and in-page smooth scrolling.

use crate::animation::MotionPreference;

/// One class of element that gains a class the first time it scrolls into
/// view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealRule {
    /// Elements to watch.
    pub selector: &'static str,
    /// Class added on first intersection.
    pub class: &'static str,
    /// Visible fraction that counts as intersecting.
    pub threshold: f64,
}

/// Reveal rules for the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    /// Section fade-ins.
    pub reveal: RevealRule,
    /// Longer scroll-driven reveals.
    pub scroll_reveal: RevealRule,
}

impl RevealConfig {
    /// The site's reveal rules.
    pub const DEFAULT: Self = Self {
        reveal: RevealRule {
            selector: ".reveal",
            class: "is-visible",
            threshold: 0.2,
        },
        scroll_reveal: RevealRule {
            selector: ".scroll-reveal",
            class: "revealed",
            threshold: 0.1,
        },
    };

    /// Both rules, in setup order.
    #[must_use]
    pub const fn rules(&self) -> [RevealRule; 2] {
        [self.reveal, self.scroll_reveal]
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl MotionPreference {
    /// Returns `true` if reveal classes should be applied up front instead
    /// of on intersection.
    #[must_use]
    pub const fn reveals_immediately(self) -> bool {
        self.is_reduced()
    }

    /// The `behavior` for `scrollIntoView`.
    #[must_use]
    pub const fn scroll_behavior(self) -> ScrollBehavior {
        match self {
            Self::Full => ScrollBehavior::Smooth,
            Self::Reduced => ScrollBehavior::Auto,
        }
    }
}

/// How an in-page jump scrolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    /// Animated scroll.
    Smooth,
    /// Instant jump.
    Auto,
}

/// Selector for links that may scroll in-page.
pub const IN_PAGE_LINK_SELECTOR: &str = "a[href^=\"#\"]";

/// Returns the element id an in-page `href` points at.
///
/// `None` for a bare `#` or anything that is not a fragment.
#[must_use]
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_match_page_classes() {
        let [reveal, scroll] = RevealConfig::DEFAULT.rules();
        assert_eq!((reveal.selector, reveal.class), (".reveal", "is-visible"));
        assert!((reveal.threshold - 0.2).abs() < f64::EPSILON);
        assert_eq!((scroll.selector, scroll.class), (".scroll-reveal", "revealed"));
        assert!((scroll.threshold - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn reduced_motion_reveals_and_jumps() {
        assert!(MotionPreference::Reduced.reveals_immediately());
        assert!(!MotionPreference::Full.reveals_immediately());
        assert_eq!(MotionPreference::Reduced.scroll_behavior(), ScrollBehavior::Auto);
        assert_eq!(MotionPreference::Full.scroll_behavior(), ScrollBehavior::Smooth);
    }

    #[test]
    fn fragment_targets() {
        assert_eq!(fragment_target("#about"), Some("about"));
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target(""), None);
        assert_eq!(fragment_target("/page#x"), None);
    }
}
