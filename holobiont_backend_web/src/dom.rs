// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM overlay host.
//!
//! [`DomHost`] implements [`OverlayHost`] over live `web-sys` elements. Each
//! registered overlay is bound to its root element with
//! [`attach`](DomHost::attach); side effects are class, attribute, style,
//! and focus changes on that root.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use holobiont_core::overlay::{
    FOCUSABLE_SELECTOR, FocusTrap, Key, ORIGIN_X_VAR, ORIGIN_Y_VAR, Origin, OverlayHost,
    OverlayId, TrapAction,
};
use kurbo::{Rect, Size};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, FocusOptions, HtmlElement, KeyboardEvent, Window};

use crate::query_all;

/// Class marking an open overlay root.
pub const OPEN_CLASS: &str = "active";

/// Keeps a focus-trap keydown listener alive while its overlay is open.
pub struct TrapListener {
    closure: Closure<dyn FnMut(KeyboardEvent)>,
}

impl core::fmt::Debug for TrapListener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrapListener").finish_non_exhaustive()
    }
}

/// Applies overlay state to the document.
pub struct DomHost {
    window: Window,
    document: Document,
    body: Option<HtmlElement>,
    roots: BTreeMap<OverlayId, HtmlElement>,
}

impl core::fmt::Debug for DomHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomHost")
            .field("roots", &self.roots.len())
            .finish_non_exhaustive()
    }
}

impl DomHost {
    /// Creates a host over `document`.
    #[must_use]
    pub fn new(window: Window, document: Document) -> Self {
        let body = document.body();
        Self {
            window,
            document,
            body,
            roots: BTreeMap::new(),
        }
    }

    /// Binds a registered overlay to its root element.
    pub fn attach(&mut self, id: OverlayId, root: HtmlElement) {
        self.roots.insert(id, root);
    }

    /// Returns the root element of an overlay.
    #[must_use]
    pub fn root(&self, id: OverlayId) -> Option<&HtmlElement> {
        self.roots.get(&id)
    }

    /// Returns the overlay whose root is `element`.
    #[must_use]
    pub fn overlay_of(&self, element: &Element) -> Option<OverlayId> {
        self.roots
            .iter()
            .find(|(_, root)| AsRef::<Element>::as_ref(*root) == element)
            .map(|(&id, _)| id)
    }
}

/// Focuses `element` without scrolling it into view.
pub fn focus_without_scroll(element: &HtmlElement) {
    let options = FocusOptions::new();
    options.set_prevent_scroll(true);
    let _ = element.focus_with_options(&options);
}

fn active_html_element(document: &Document) -> Option<HtmlElement> {
    document.active_element()?.dyn_into::<HtmlElement>().ok()
}

impl OverlayHost for DomHost {
    type Element = HtmlElement;
    type TrapHandle = TrapListener;

    fn viewport_size(&self) -> Size {
        let width = self.window.inner_width().ok().and_then(|w| w.as_f64());
        let height = self.window.inner_height().ok().and_then(|h| h.as_f64());
        match (width, height) {
            (Some(w), Some(h)) => Size::new(w, h),
            _ => Size::ZERO,
        }
    }

    fn element_rect(&self, element: &HtmlElement) -> Rect {
        let r = element.get_bounding_client_rect();
        Rect::from_origin_size((r.left(), r.top()), (r.width(), r.height()))
    }

    fn active_element(&self) -> Option<HtmlElement> {
        active_html_element(&self.document)
    }

    fn focusable_descendants(&self, overlay: OverlayId) -> Vec<HtmlElement> {
        let Some(root) = self.roots.get(&overlay) else {
            return Vec::new();
        };
        query_all(root, FOCUSABLE_SELECTOR)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn apply_open_state(&mut self, overlay: OverlayId, open: bool) {
        let Some(root) = self.roots.get(&overlay) else {
            return;
        };
        let _ = root.class_list().toggle_with_force(OPEN_CLASS, open);
        let _ = root.set_attribute("aria-hidden", if open { "false" } else { "true" });
    }

    fn apply_origin(&mut self, overlay: OverlayId, origin: Origin) {
        let Some(root) = self.roots.get(&overlay) else {
            return;
        };
        let style = root.style();
        let _ = style.set_property(ORIGIN_X_VAR, &origin.css_x());
        let _ = style.set_property(ORIGIN_Y_VAR, &origin.css_y());
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        let Some(body) = &self.body else {
            return;
        };
        let style = body.style();
        if locked {
            let _ = style.set_property("overflow", "hidden");
        } else {
            let _ = style.remove_property("overflow");
        }
    }

    fn install_trap(&mut self, overlay: OverlayId, trap: FocusTrap<HtmlElement>) -> TrapListener {
        let document = self.document.clone();
        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let key = Key::from_dom(&event.key(), event.shift_key());
            let active = active_html_element(&document);
            if let TrapAction::Focus(target) = trap.on_key(key, active.as_ref()) {
                event.prevent_default();
                let _ = target.focus();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        if let Some(root) = self.roots.get(&overlay) {
            let _ = root
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        }
        TrapListener { closure }
    }

    fn remove_trap(&mut self, overlay: OverlayId, handle: TrapListener) {
        if let Some(root) = self.roots.get(&overlay) {
            let _ = root.remove_event_listener_with_callback(
                "keydown",
                handle.closure.as_ref().unchecked_ref(),
            );
        }
    }

    fn focus(&mut self, element: &HtmlElement) {
        focus_without_scroll(element);
    }

    fn focus_root(&mut self, overlay: OverlayId) {
        if let Some(root) = self.roots.get(&overlay) {
            let _ = root.set_attribute("tabindex", "-1");
            focus_without_scroll(root);
        }
    }

    fn can_focus(&self, element: &HtmlElement) -> bool {
        element.is_connected()
    }

    fn set_expanded(&mut self, toggle: &HtmlElement, expanded: bool) {
        let _ = toggle.set_attribute("aria-expanded", if expanded { "true" } else { "false" });
    }
}
