// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay and burger-menu wiring.
//!
//! Every listener funnels into one shared [`OverlayManager`]. Handlers hold
//! the manager's borrow only for the duration of a single transition, and
//! the host's own trap listeners never touch the manager, so no handler can
//! observe it mid-update.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use holobiont_backend_web::{DomHost, TraceHandle, query_all, query_html};
use holobiont_core::overlay::{
    MENU_ELEMENT_ID, OverlayId, OverlayKind, OverlayManager, PointerTarget, overlay_element_id,
};
use holobiont_core::trace::{OverlayAction, OverlayEvent};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent};

use crate::Page;

const ROOT_SELECTOR: &str = ".project-overlay, .burger-menu-overlay";
const TOGGLE_SELECTOR: &str = ".burger-toggle";
const TRIGGER_SELECTOR: &str = "[data-type=\"overlay\"]";
const CLOSER_SELECTOR: &str = "[data-close-overlay]";
const BACKDROP_CLASS: &str = "overlay-backdrop";
const TOGGLE_FN: &str = "toggleBurgerMenu";

#[derive(Clone)]
struct Overlays {
    manager: Rc<RefCell<OverlayManager<DomHost>>>,
    trace: TraceHandle,
}

impl Overlays {
    fn open(&self, id: OverlayId, trigger: Option<&HtmlElement>) {
        let mut manager = self.manager.borrow_mut();
        if manager.open(id, trigger) {
            self.record(&manager, id, OverlayAction::Opened);
        }
    }

    fn close(&self, id: OverlayId) {
        let mut manager = self.manager.borrow_mut();
        if manager.close(id) {
            self.record(&manager, id, OverlayAction::Closed);
        }
    }

    fn toggle_menu(&self) {
        let mut manager = self.manager.borrow_mut();
        let Some(menu) = manager.menu() else {
            return;
        };
        let action = if manager.toggle_menu() {
            OverlayAction::Opened
        } else {
            OverlayAction::Closed
        };
        self.record(&manager, menu, action);
    }

    fn close_all(&self) {
        let mut manager = self.manager.borrow_mut();
        let open: Vec<OverlayId> = manager.ids().filter(|&id| manager.is_open(id)).collect();
        manager.close_all();
        for id in open {
            self.record(&manager, id, OverlayAction::Closed);
        }
    }

    fn pointer_down(&self, id: OverlayId, target: PointerTarget) {
        let mut manager = self.manager.borrow_mut();
        if manager.pointer_down(id, target) {
            self.record(&manager, id, OverlayAction::Closed);
        }
    }

    fn record(&self, manager: &OverlayManager<DomHost>, id: OverlayId, action: OverlayAction) {
        if let Some(event) = OverlayEvent::capture(manager, id, action) {
            self.trace.with(|tracer| tracer.overlay(&event));
        }
    }

    fn find(&self, name: &str) -> Option<OverlayId> {
        self.manager.borrow().find(name)
    }
}

/// Registers every overlay root and binds triggers, closers, pointer
/// dismissal, menu links and the escape key.
pub(crate) fn setup(page: &Page) -> Result<(), JsValue> {
    let roots = query_html(&page.document, ROOT_SELECTOR);
    if roots.is_empty() {
        return Ok(());
    }

    let mut manager = OverlayManager::new(DomHost::new(
        page.window.clone(),
        page.document.clone(),
    ));
    let mut registered = Vec::with_capacity(roots.len());
    for root in roots {
        let name = root.id();
        let id = manager.register(OverlayKind::for_element_id(&name), name);
        manager.host_mut().attach(id, root.clone());
        registered.push((id, root));
    }
    if let Some(toggle) = query_html(&page.document, TOGGLE_SELECTOR).into_iter().next() {
        manager.set_menu_toggle(toggle);
    }

    let overlays = Overlays {
        manager: Rc::new(RefCell::new(manager)),
        trace: page.trace.clone(),
    };

    expose_menu_toggle(page, &overlays)?;
    bind_triggers(page, &overlays)?;
    bind_closers(page, &overlays)?;
    for (id, root) in &registered {
        bind_pointer_dismiss(&overlays, *id, root)?;
    }
    bind_menu_links(&overlays)?;
    bind_escape(page, &overlays)?;
    Ok(())
}

/// Publishes `window.toggleBurgerMenu` for the page's inline handlers.
fn expose_menu_toggle(page: &Page, overlays: &Overlays) -> Result<(), JsValue> {
    let overlays = overlays.clone();
    let toggle = Closure::wrap(Box::new(move || {
        overlays.toggle_menu();
    }) as Box<dyn FnMut()>);
    js_sys::Reflect::set(
        &page.window,
        &JsValue::from_str(TOGGLE_FN),
        toggle.as_ref(),
    )?;
    toggle.forget();
    Ok(())
}

fn bind_triggers(page: &Page, overlays: &Overlays) -> Result<(), JsValue> {
    for trigger in query_html(&page.document, TRIGGER_SELECTOR) {
        let overlays = overlays.clone();
        let target = trigger.clone();
        let on_click = Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            let Some(name) = target
                .get_attribute("data-overlay-id")
                .and_then(|raw| overlay_element_id(&raw))
            else {
                return;
            };
            if let Some(id) = overlays.find(&name) {
                overlays.open(id, Some(&target));
            }
        }) as Box<dyn FnMut(_)>);
        trigger.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

fn bind_closers(page: &Page, overlays: &Overlays) -> Result<(), JsValue> {
    let content_root = alloc::format!(".{}", OverlayKind::Content.root_class());
    for closer in query_html(&page.document, CLOSER_SELECTOR) {
        let Some(root) = closer.closest(&content_root)? else {
            continue;
        };
        let Some(id) = overlays.manager.borrow().host().overlay_of(&root) else {
            continue;
        };
        let overlays = overlays.clone();
        let on_click = Closure::wrap(Box::new(move |_event: Event| {
            overlays.close(id);
        }) as Box<dyn FnMut(_)>);
        closer.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

fn bind_pointer_dismiss(
    overlays: &Overlays,
    id: OverlayId,
    root: &HtmlElement,
) -> Result<(), JsValue> {
    let overlays = overlays.clone();
    let root_el: Element = root.clone().into();
    let on_down = Closure::wrap(Box::new(move |event: Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        overlays.pointer_down(id, classify(&target, &root_el));
    }) as Box<dyn FnMut(_)>);
    root.add_event_listener_with_callback("pointerdown", on_down.as_ref().unchecked_ref())?;
    on_down.forget();
    Ok(())
}

fn classify(target: &Element, root: &Element) -> PointerTarget {
    if target == root {
        PointerTarget::Root
    } else if target.class_list().contains(BACKDROP_CLASS) {
        PointerTarget::Backdrop
    } else {
        PointerTarget::Content
    }
}

fn bind_menu_links(overlays: &Overlays) -> Result<(), JsValue> {
    let Some(menu) = overlays.find(MENU_ELEMENT_ID) else {
        return Ok(());
    };
    let links = match overlays.manager.borrow().host().root(menu) {
        Some(root) => query_all(root, "a"),
        None => return Ok(()),
    };
    for link in links {
        let overlays = overlays.clone();
        let on_click = Closure::wrap(Box::new(move |_event: Event| {
            overlays.close(menu);
        }) as Box<dyn FnMut(_)>);
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

fn bind_escape(page: &Page, overlays: &Overlays) -> Result<(), JsValue> {
    let overlays = overlays.clone();
    let on_key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if event.key() == "Escape" {
            overlays.close_all();
        }
    }) as Box<dyn FnMut(_)>);
    page.document
        .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    wasm_bindgen_test_configure!(run_in_browser);

    fn element(tag: &str) -> Element {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("browser document")
            .create_element(tag)
            .expect("create element")
    }

    #[wasm_bindgen_test]
    fn pointer_targets_classify_by_root_then_backdrop() {
        let root = element("div");
        let backdrop = element("div");
        backdrop.set_class_name(BACKDROP_CLASS);
        let panel = element("section");
        root.append_child(&backdrop).expect("append backdrop");
        root.append_child(&panel).expect("append panel");

        assert_eq!(classify(&root, &root), PointerTarget::Root);
        assert_eq!(classify(&backdrop, &root), PointerTarget::Backdrop);
        assert_eq!(
            classify(&panel, &root),
            PointerTarget::Content,
            "anything else inside the overlay is content"
        );
    }

    #[wasm_bindgen_test]
    fn root_carrying_the_backdrop_class_is_still_the_root() {
        let root = element("div");
        root.set_class_name(BACKDROP_CLASS);
        assert_eq!(classify(&root, &root), PointerTarget::Root);
    }
}
