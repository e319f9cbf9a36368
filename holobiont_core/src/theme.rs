// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rhizome section's two-theme switch.
//!
//! [`Theme`] is the only state. The container class and both buttons'
//! `active` flags are derived from it, so they cannot disagree.

/// Selector for the themed container.
pub const CONTAINER_SELECTOR: &str = ".rhizome-container";

/// Class a theme button carries while its theme is selected.
pub const ACTIVE_CLASS: &str = "active";

/// The selected visual theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    /// Organic palette.
    #[default]
    Bio,
    /// Circuit palette.
    Techno,
}

impl Theme {
    /// Both themes, in button order.
    pub const ALL: [Self; 2] = [Self::Bio, Self::Techno];

    /// The container class for this theme.
    #[must_use]
    pub const fn container_class(self) -> &'static str {
        match self {
            Self::Bio => "theme-bio",
            Self::Techno => "theme-techno",
        }
    }

    /// The id of the button selecting this theme.
    #[must_use]
    pub const fn button_id(self) -> &'static str {
        match self {
            Self::Bio => "bio-theme-btn",
            Self::Techno => "techno-theme-btn",
        }
    }

    /// Returns the class changes for the container when this theme is
    /// selected: `(class, present)` for every theme class.
    #[must_use]
    pub fn container_classes(self) -> [(&'static str, bool); 2] {
        Self::ALL.map(|t| (t.container_class(), t == self))
    }

    /// Returns whether `button`'s theme is this one.
    #[must_use]
    pub fn is_active(self, button: Self) -> bool {
        self == button
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_container_class() {
        for theme in Theme::ALL {
            let classes = theme.container_classes();
            assert_eq!(classes.iter().filter(|c| c.1).count(), 1);
            assert!(classes.contains(&(theme.container_class(), true)));
        }
    }

    #[test]
    fn active_button_matches_theme() {
        assert!(Theme::Techno.is_active(Theme::Techno));
        assert!(!Theme::Techno.is_active(Theme::Bio));
        assert_eq!(
            Theme::ALL.map(|b| Theme::Bio.is_active(b)),
            [true, false]
        );
    }

    #[test]
    fn ids_and_classes() {
        assert_eq!(Theme::Bio.button_id(), "bio-theme-btn");
        assert_eq!(Theme::Techno.button_id(), "techno-theme-btn");
        assert_eq!(Theme::Techno.container_class(), "theme-techno");
        assert_eq!(Theme::default(), Theme::Bio);
    }
}
