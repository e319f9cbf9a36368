// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard focus trapping.
//!
//! A [`FocusTrap`] is a snapshot of an overlay's focusable descendants taken
//! when the overlay opens. The set is not refreshed while the overlay stays
//! open; elements added afterwards are outside the wrap cycle.

use alloc::vec::Vec;

/// Selector matching the elements a trap cycles through.
pub const FOCUSABLE_SELECTOR: &str = "a[href], button:not([disabled]), textarea, input, select, \
     [tabindex]:not([tabindex=\"-1\"])";

/// A keyboard key the overlay layer reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Tab navigation; `shift` moves backwards.
    Tab {
        /// Whether Shift was held.
        shift: bool,
    },
    /// The cancel key (`Escape`).
    Escape,
    /// Anything else.
    Other,
}

impl Key {
    /// Classifies a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str, shift: bool) -> Self {
        match key {
            "Tab" => Self::Tab { shift },
            "Escape" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// What a trap wants done with a key event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrapAction<E> {
    /// Let the browser handle the event.
    Pass,
    /// Prevent the default action and focus this element.
    Focus(E),
}

/// Focusable-descendant snapshot for one open overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusTrap<E> {
    focusables: Vec<E>,
}

impl<E: Clone + PartialEq> FocusTrap<E> {
    /// Creates a trap over the given focusables, in document order.
    #[must_use]
    pub fn new(focusables: Vec<E>) -> Self {
        Self { focusables }
    }

    /// Returns the first focusable element, if any.
    #[must_use]
    pub fn first(&self) -> Option<&E> {
        self.focusables.first()
    }

    /// Returns the last focusable element, if any.
    #[must_use]
    pub fn last(&self) -> Option<&E> {
        self.focusables.last()
    }

    /// Returns the number of elements in the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.focusables.len()
    }

    /// Returns `true` if the overlay had nothing focusable when it opened.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.focusables.is_empty()
    }

    /// Handles a key press given the currently focused element.
    #[must_use]
    pub fn on_key(&self, key: Key, active: Option<&E>) -> TrapAction<E> {
        match key {
            Key::Tab { shift } => self.on_tab(shift, active),
            Key::Escape | Key::Other => TrapAction::Pass,
        }
    }

    /// Handles tab navigation.
    ///
    /// A single focusable is pinned in both directions. With more than one,
    /// focus wraps from the first element backwards to the last and from the
    /// last forwards to the first; every other move is left to the browser.
    #[must_use]
    pub fn on_tab(&self, shift: bool, active: Option<&E>) -> TrapAction<E> {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return TrapAction::Pass;
        };
        if self.focusables.len() == 1 {
            return TrapAction::Focus(first.clone());
        }
        match (shift, active) {
            (true, Some(a)) if a == first => TrapAction::Focus(last.clone()),
            (false, Some(a)) if a == last => TrapAction::Focus(first.clone()),
            _ => TrapAction::Pass,
        }
    }
}
