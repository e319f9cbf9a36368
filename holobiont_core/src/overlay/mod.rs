// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay surfaces and keyboard accessibility.
//!
//! An *overlay* is a full-surface modal panel: the navigation menu or a
//! content detail view. Each overlay has:
//!
//! - An identity ([`OverlayId`]) assigned at registration, plus the DOM id it
//!   was registered under so trigger markup can find it.
//! - An open flag, mirrored onto `aria-hidden` by the host.
//! - While open, exactly one focus-trap registration and one return-focus
//!   record, both keyed by [`OverlayId`] inside the [`OverlayManager`].
//!
//! Page scrolling is locked iff at least one overlay is open. The lock is
//! recomputed on every close, since several overlays may be open at once.

mod focus;
mod host;
mod id;
mod manager;
mod origin;

pub use focus::{FOCUSABLE_SELECTOR, FocusTrap, Key, TrapAction};
pub use host::{OverlayHost, PointerTarget};
pub use id::{MENU_ELEMENT_ID, OVERLAY_ID_PREFIX, OverlayId, OverlayKind, overlay_element_id};
pub use manager::OverlayManager;
pub use origin::{ORIGIN_MAX_Y_PERCENT, ORIGIN_X_VAR, ORIGIN_Y_VAR, Origin};
