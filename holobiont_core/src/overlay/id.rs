// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay identity types and the trigger markup contract.

use alloc::format;
use alloc::string::String;
use core::fmt;

/// DOM id of the navigation menu overlay.
pub const MENU_ELEMENT_ID: &str = "burger-menu";

/// Prefix joining a trigger's `data-overlay-id` to its overlay's DOM id.
pub const OVERLAY_ID_PREFIX: &str = "overlay-";

/// A handle to an overlay registered with an
/// [`OverlayManager`](super::OverlayManager).
///
/// Handles are dense indices assigned in registration order and stay valid
/// for the lifetime of the manager.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayId(pub(crate) u32);

impl OverlayId {
    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OverlayId({})", self.0)
    }
}

/// Which family of overlay surface this is.
///
/// The two kinds differ only in how a pointer-down dismisses them and in
/// the menu's companion toggle control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// The single navigation menu (`.burger-menu-overlay`).
    Menu,
    /// A content/detail overlay (`.project-overlay`).
    Content,
}

impl OverlayKind {
    /// Returns the CSS class that marks this kind of overlay root.
    #[must_use]
    pub const fn root_class(self) -> &'static str {
        match self {
            Self::Menu => "burger-menu-overlay",
            Self::Content => "project-overlay",
        }
    }

    /// Returns the kind of the overlay root with DOM id `id`.
    ///
    /// Only [`MENU_ELEMENT_ID`] is the menu, so the registered menu and
    /// the element its links are bound under are always the same root.
    #[must_use]
    pub fn for_element_id(id: &str) -> Self {
        if id == MENU_ELEMENT_ID {
            Self::Menu
        } else {
            Self::Content
        }
    }
}

/// Resolves a trigger's `data-overlay-id` value to its overlay's DOM id.
///
/// Whitespace around the identifier is ignored; an empty identifier yields
/// `None` since no overlay can be named `overlay-`.
#[must_use]
pub fn overlay_element_id(trigger_id: &str) -> Option<String> {
    let trimmed = trigger_id.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("{OVERLAY_ID_PREFIX}{trimmed}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_resolves_to_prefixed_id() {
        assert_eq!(
            overlay_element_id("reef").as_deref(),
            Some("overlay-reef"),
            "trigger id should gain the overlay- prefix"
        );
        assert_eq!(overlay_element_id(" 7 ").as_deref(), Some("overlay-7"));
    }

    #[test]
    fn only_the_menu_id_is_a_menu() {
        assert_eq!(OverlayKind::for_element_id(MENU_ELEMENT_ID), OverlayKind::Menu);
        assert_eq!(OverlayKind::for_element_id("overlay-reef"), OverlayKind::Content);
        assert_eq!(
            OverlayKind::for_element_id(""),
            OverlayKind::Content,
            "an unnamed root is never the menu"
        );
    }

    #[test]
    fn empty_trigger_resolves_to_nothing() {
        assert_eq!(overlay_element_id(""), None);
        assert_eq!(overlay_element_id("   "), None);
    }
}
