// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-triggered reveals and in-page link scrolling.

use alloc::boxed::Box;

use holobiont_backend_web::{observe_once, query_document, query_html};
use holobiont_core::reveal::{IN_PAGE_LINK_SELECTOR, RevealConfig, ScrollBehavior, fragment_target};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, ScrollIntoViewOptions};

use crate::Page;

/// Adds each rule's class the first time its elements scroll into view.
///
/// Under reduced motion every class is added immediately.
pub(crate) fn setup_reveal(page: &Page) -> Result<(), JsValue> {
    for rule in RevealConfig::DEFAULT.rules() {
        let items = query_document(&page.document, rule.selector);
        if page.motion.reveals_immediately() {
            for item in &items {
                let _ = item.class_list().add_1(rule.class);
            }
            continue;
        }
        let class = rule.class;
        observe_once(&items, rule.threshold, move |target: &Element| {
            let _ = target.class_list().add_1(class);
        })?;
    }
    Ok(())
}

fn web_behavior(behavior: ScrollBehavior) -> web_sys::ScrollBehavior {
    match behavior {
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
    }
}

/// Scrolls in-page links to their target instead of jumping.
///
/// A link whose fragment names no element keeps its default behavior.
pub(crate) fn setup_smooth_scroll(page: &Page) -> Result<(), JsValue> {
    let behavior = web_behavior(page.motion.scroll_behavior());
    for link in query_html(&page.document, IN_PAGE_LINK_SELECTOR) {
        let document = page.document.clone();
        let source = link.clone();
        let on_click = Closure::wrap(Box::new(move |event: Event| {
            let Some(href) = source.get_attribute("href") else {
                return;
            };
            let Some(target) = fragment_target(&href).and_then(|id| document.get_element_by_id(id))
            else {
                return;
            };
            event.prevent_default();
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(behavior);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        }) as Box<dyn FnMut(_)>);
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}
