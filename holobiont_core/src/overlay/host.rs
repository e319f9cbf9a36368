// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for overlay side effects.
//!
//! The [`OverlayManager`](super::OverlayManager) decides *what* happens when
//! an overlay opens or closes; an [`OverlayHost`] carries it out against the
//! live UI tree. The web backend implements this trait over `web-sys`
//! elements, and the core tests implement it over plain integers.

use alloc::vec::Vec;

use kurbo::{Rect, Size};

use super::focus::FocusTrap;
use super::id::OverlayId;
use super::origin::Origin;

/// Where a pointer-down landed relative to an overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// Directly on the overlay root element.
    Root,
    /// On the overlay's backdrop region (`.overlay-backdrop`).
    Backdrop,
    /// Anywhere inside the overlay's content.
    Content,
}

/// Applies overlay state to a platform-native UI tree.
///
/// Every method is a direct side effect; none of them call back into the
/// manager.
pub trait OverlayHost {
    /// A handle to a focusable element.
    type Element: Clone + PartialEq;

    /// Keeps an installed focus-trap handler alive until
    /// [`remove_trap`](Self::remove_trap) consumes it.
    type TrapHandle;

    /// Returns the viewport size in CSS pixels.
    fn viewport_size(&self) -> Size;

    /// Returns an element's client rectangle.
    fn element_rect(&self, element: &Self::Element) -> Rect;

    /// Returns the element that currently holds focus, if any.
    fn active_element(&self) -> Option<Self::Element>;

    /// Enumerates the overlay's focusable descendants in document order.
    fn focusable_descendants(&self, overlay: OverlayId) -> Vec<Self::Element>;

    /// Marks the overlay open or closed, including its `aria-hidden` mirror.
    fn apply_open_state(&mut self, overlay: OverlayId, open: bool);

    /// Writes the open-animation origin onto the overlay.
    fn apply_origin(&mut self, overlay: OverlayId, origin: Origin);

    /// Locks or unlocks page scrolling.
    fn set_scroll_locked(&mut self, locked: bool);

    /// Attaches a keydown handler driving `trap` to the overlay root.
    fn install_trap(
        &mut self,
        overlay: OverlayId,
        trap: FocusTrap<Self::Element>,
    ) -> Self::TrapHandle;

    /// Detaches the handler created by [`install_trap`](Self::install_trap).
    fn remove_trap(&mut self, overlay: OverlayId, handle: Self::TrapHandle);

    /// Moves focus to `element` without scrolling.
    fn focus(&mut self, element: &Self::Element);

    /// Makes the overlay root programmatically focusable and focuses it.
    fn focus_root(&mut self, overlay: OverlayId);

    /// Returns `true` if `element` can still receive focus.
    fn can_focus(&self, element: &Self::Element) -> bool;

    /// Mirrors the menu's open state onto its toggle control.
    fn set_expanded(&mut self, toggle: &Self::Element, expanded: bool);
}
