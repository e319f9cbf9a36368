// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decorative spores, halo parallax and card pulses.

use alloc::boxed::Box;
use alloc::format;

use holobiont_backend_web::{observe_once, query_document, query_html};
use holobiont_core::decor::{
    DecorConfig, HALO_SELECTOR, PULSE_ANIMATION, PULSE_SELECTOR, SPORE_SELECTOR, halo_offset,
    halo_opacity, halo_transform, spore_push, spore_transform,
};
use kurbo::{Point, Size};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlElement, MouseEvent};

use crate::Page;

const CONFIG: DecorConfig = DecorConfig::DEFAULT;

fn centre(element: &HtmlElement) -> Point {
    let r = element.get_bounding_client_rect();
    Point::new(r.left() + r.width() / 2.0, r.top() + r.height() / 2.0)
}

/// Wires pointer, scroll and intersection effects.
pub(crate) fn setup(page: &Page) -> Result<(), JsValue> {
    let spores = query_html(&page.document, SPORE_SELECTOR);
    let halo = page
        .document
        .query_selector(HALO_SELECTOR)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    let window = page.window.clone();
    let pointer_halo = halo.clone();
    let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
        let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
        for spore in &spores {
            let push = spore_push(centre(spore), pointer, &CONFIG);
            let _ = spore.style().set_property("transform", &spore_transform(push));
        }
        if let Some(halo) = &pointer_halo {
            let viewport = Size::new(
                window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0),
                window.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0),
            );
            let offset = halo_offset(pointer, viewport, &CONFIG);
            let _ = halo.style().set_property("transform", &halo_transform(offset));
        }
    }) as Box<dyn FnMut(_)>);
    page.document
        .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    on_move.forget();

    if let Some(halo) = halo {
        let window = page.window.clone();
        let on_scroll = Closure::wrap(Box::new(move |_event: Event| {
            let scrolled = window.scroll_y().unwrap_or(0.0);
            let opacity = halo_opacity(scrolled, &CONFIG);
            let _ = halo.style().set_property("opacity", &format!("{opacity}"));
        }) as Box<dyn FnMut(_)>);
        page.window
            .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
        on_scroll.forget();
    }

    let cards = query_document(&page.document, PULSE_SELECTOR);
    observe_once(&cards, CONFIG.pulse_threshold, |card: &Element| {
        if let Some(card) = card.dyn_ref::<HtmlElement>() {
            let _ = card.style().set_property("animation", PULSE_ANIMATION);
        }
    })?;
    Ok(())
}
