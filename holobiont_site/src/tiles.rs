// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Profile tiles: lazy backgrounds, pointer tilt and idle float.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use holobiont_backend_web::{RafLoop, query_html, set_style_var};
use holobiont_core::animation::{
    FLOAT_OFFSET_VAR, FLOAT_X_VAR, LoopCommand, StyleSink, Tier, Tile, TileAnimator,
    TiltState, TiltTracker, parse_offset,
};
use holobiont_core::time::FrameTick;
use holobiont_core::trace::{FrameEvent, LoopSource};
use kurbo::{Point, Rect};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, MouseEvent};

use crate::Page;

const BACKGROUND_SELECTOR: &str = "[data-bg]";
const TILT_SELECTOR: &str = ".profile-row--upper .profile-tile";
const FLOAT_SELECTOR: &str = ".profile-tile";

/// Copies each `data-bg` URL into `background-image`, unless one is set.
pub(crate) fn setup_backgrounds(page: &Page) -> Result<(), JsValue> {
    for node in query_html(&page.document, BACKGROUND_SELECTOR) {
        let Some(url) = node.get_attribute("data-bg").filter(|url| !url.is_empty()) else {
            continue;
        };
        let style = node.style();
        let current = style.get_property_value("background-image").unwrap_or_default();
        if current.is_empty() {
            style.set_property("background-image", &format!("url('{url}')"))?;
        }
    }
    Ok(())
}

fn write_tilt(tile: &HtmlElement, state: &TiltState) {
    for (name, value) in state.css_vars() {
        set_style_var(tile, name, &value);
    }
}

fn client_rect(element: &HtmlElement) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::from_origin_size((r.left(), r.top()), (r.width(), r.height()))
}

/// Tilts each upper-row tile toward the pointer, at most once per frame.
pub(crate) fn setup_tilt(page: &Page) -> Result<(), JsValue> {
    if page.motion.is_reduced() {
        return Ok(());
    }
    for tile in query_html(&page.document, TILT_SELECTOR) {
        let tracker = Rc::new(RefCell::new(TiltTracker::new(page.motion)));

        let frame_tracker = Rc::clone(&tracker);
        let frame_tile = tile.clone();
        let raf = Rc::new(RafLoop::new(
            move |_tick: FrameTick| {
                let state = frame_tracker.borrow_mut().on_frame();
                if let Some(state) = state {
                    write_tilt(&frame_tile, &state);
                }
                LoopCommand::None
            },
            LoopSource::Tilt,
            page.trace.clone(),
        ));

        let move_tracker = Rc::clone(&tracker);
        let move_raf = Rc::clone(&raf);
        let move_tile = tile.clone();
        let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            let command = move_tracker
                .borrow_mut()
                .on_move(pointer, client_rect(&move_tile));
            move_raf.execute(command);
        }) as Box<dyn FnMut(_)>);
        tile.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();

        let leave_tile = tile.clone();
        let on_leave = Closure::wrap(Box::new(move |_event: Event| {
            let (command, rest) = tracker.borrow_mut().on_leave();
            raf.execute(command);
            write_tilt(&leave_tile, &rest);
        }) as Box<dyn FnMut(_)>);
        tile.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
        on_leave.forget();
    }
    Ok(())
}

/// Writes float offsets onto the tile elements, by document order.
struct TileStyles<'a> {
    tiles: &'a [HtmlElement],
    written: usize,
}

impl StyleSink for TileStyles<'_> {
    fn set_var(&mut self, tile: usize, name: &str, value: &str) {
        let Some(element) = self.tiles.get(tile) else {
            return;
        };
        set_style_var(element, name, value);
        if name == FLOAT_X_VAR {
            self.written += 1;
        }
    }
}

/// Starts the idle float loop over every profile tile.
///
/// The loop pauses while the page is hidden; a hovered tile rests at zero.
pub(crate) fn setup_float(page: &Page) -> Result<(), JsValue> {
    let elements = query_html(&page.document, FLOAT_SELECTOR);
    let tiles: Vec<Tile> = elements
        .iter()
        .enumerate()
        .map(|(index, el)| {
            let tier = Tier::from_attr(el.get_attribute("data-tier").as_deref());
            let declared = el
                .style()
                .get_property_value(FLOAT_OFFSET_VAR)
                .ok()
                .and_then(|v| parse_offset(&v));
            Tile::new(index, tier, declared)
        })
        .collect();

    let animator = TileAnimator::new(page.motion, tiles);
    if !animator.is_enabled() {
        return Ok(());
    }
    let animator = Rc::new(RefCell::new(animator));
    let elements: Rc<[HtmlElement]> = elements.into();

    let frame_animator = Rc::clone(&animator);
    let frame_elements = Rc::clone(&elements);
    let trace = page.trace.clone();
    let raf = Rc::new(RafLoop::new(
        move |tick: FrameTick| {
            let mut sink = TileStyles {
                tiles: &frame_elements,
                written: 0,
            };
            let next = frame_animator.borrow_mut().tick(&tick, &mut sink);
            if sink.written > 0 {
                trace.with(|tracer| tracer.frame(&FrameEvent::new(&tick, sink.written)));
            }
            next
        },
        LoopSource::Float,
        page.trace.clone(),
    ));

    for (index, element) in elements.iter().enumerate() {
        for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
            let hover_animator = Rc::clone(&animator);
            let on_hover = Closure::wrap(Box::new(move |_event: Event| {
                hover_animator.borrow_mut().set_hovered(index, hovered);
            }) as Box<dyn FnMut(_)>);
            element.add_event_listener_with_callback(event, on_hover.as_ref().unchecked_ref())?;
            on_hover.forget();
        }
    }

    let visibility_animator = Rc::clone(&animator);
    let visibility_raf = Rc::clone(&raf);
    let document = page.document.clone();
    let on_visibility = Closure::wrap(Box::new(move |_event: Event| {
        let command = visibility_animator
            .borrow_mut()
            .set_visible(!document.hidden());
        visibility_raf.execute(command);
    }) as Box<dyn FnMut(_)>);
    page.document
        .add_event_listener_with_callback("visibilitychange", on_visibility.as_ref().unchecked_ref())?;
    on_visibility.forget();

    let command = animator.borrow_mut().start();
    raf.execute(command);
    Ok(())
}
