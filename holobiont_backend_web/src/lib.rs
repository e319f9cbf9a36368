// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for holobiont.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` executor for core `LoopCommand`s
//! - [`DomHost`]: DOM implementation of the core `OverlayHost`
//! - [`observe_once`]: one-shot `IntersectionObserver` wiring
//! - [`post_form`]: urlencoded `fetch` transport for form submissions
//! - [`ConsoleSink`] / [`TraceHandle`]: trace lines on the browser console

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "browser bindings are only called on wasm32")
)]

extern crate alloc;

mod console;
mod dom;
mod fetch;
mod observe;
mod raf;

pub use console::{ConsoleSink, TraceHandle};
pub use dom::{DomHost, OPEN_CLASS, TrapListener, focus_without_scroll};
pub use fetch::post_form;
pub use holobiont_core::overlay::OverlayHost;
pub use observe::observe_once;
pub use raf::RafLoop;

use alloc::vec::Vec;

use holobiont_core::animation::MotionPreference;
use wasm_bindgen::JsCast as _;
use web_sys::{Element, HtmlElement};

/// Media query matching a reduced-motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Reads the user's motion preference once.
///
/// A browser without `matchMedia` counts as [`MotionPreference::Full`].
#[must_use]
pub fn motion_preference(window: &web_sys::Window) -> MotionPreference {
    let reduced = window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    MotionPreference::from_reduced(reduced)
}

/// Collects every element under `root` matching `selector`.
///
/// An invalid selector yields no elements.
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    node_list_elements(root.query_selector_all(selector).ok())
}

/// Collects every element in `document` matching `selector`.
pub fn query_document(document: &web_sys::Document, selector: &str) -> Vec<Element> {
    node_list_elements(document.query_selector_all(selector).ok())
}

/// Like [`query_document`], keeping only `HtmlElement`s.
pub fn query_html(document: &web_sys::Document, selector: &str) -> Vec<HtmlElement> {
    query_document(document, selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn node_list_elements(list: Option<web_sys::NodeList>) -> Vec<Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Sets a CSS custom property on an element, ignoring failures.
pub fn set_style_var(element: &HtmlElement, name: &str, value: &str) {
    let _ = element.style().set_property(name, value);
}

