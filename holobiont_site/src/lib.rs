// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser entry point for the holobiont site.
//!
//! Build with: `wasm-pack build --target web holobiont_site`
//! Then load the generated module from the site's pages.
//!
//! On `DOMContentLoaded` (or immediately, if the document has already
//! parsed) this reads the page configuration from `<body data-*>` and wires
//! every interactive feature to the DOM. A feature whose markup is missing
//! is skipped.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

mod decor;
mod forms;
mod notice;
mod overlays;
mod reveal;
mod theme;
mod tiles;

use holobiont_backend_web::{TraceHandle, motion_preference};
use holobiont_core::animation::MotionPreference;
use holobiont_core::config::SiteConfig;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, Window};

/// Everything a setup routine may need.
#[derive(Debug)]
pub(crate) struct Page {
    pub(crate) window: Window,
    pub(crate) document: Document,
    pub(crate) config: SiteConfig,
    pub(crate) motion: MotionPreference,
    pub(crate) trace: TraceHandle,
}

/// Entry point: runs [`boot`] once the document has parsed.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let Some(window) = web_sys::window() else {
        return Ok(());
    };
    let Some(document) = window.document() else {
        return Ok(());
    };

    if document.ready_state() != "loading" {
        return boot(window, document);
    }

    let target = document.clone();
    let on_ready = Closure::once(move |_event: Event| {
        if let Err(err) = boot(window, document) {
            web_sys::console::error_1(&err);
        }
    });
    target.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

/// A named setup routine.
type Step<T, E> = (&'static str, fn(&T) -> Result<(), E>);

/// Every feature, in page order.
const STEPS: [Step<Page, JsValue>; 11] = [
    ("notice", notice::setup),
    ("reveal", reveal::setup_reveal),
    ("backgrounds", tiles::setup_backgrounds),
    ("tilt", tiles::setup_tilt),
    ("float", tiles::setup_float),
    ("overlays", overlays::setup),
    ("smooth-scroll", reveal::setup_smooth_scroll),
    ("newsletter", forms::setup_newsletter),
    ("contact", forms::setup_contact),
    ("theme", theme::setup),
    ("decor", decor::setup),
];

/// Runs every step against `target`, handing each failure to `report`.
///
/// A failing step never stops the ones after it. Returns how many steps
/// succeeded.
fn run_steps<T, E>(
    target: &T,
    steps: &[Step<T, E>],
    mut report: impl FnMut(&'static str, E),
) -> usize {
    let mut succeeded = 0;
    for (name, step) in steps {
        match step(target) {
            Ok(()) => succeeded += 1,
            Err(err) => report(*name, err),
        }
    }
    succeeded
}

/// Wires every feature, in page order.
fn boot(window: Window, document: Document) -> Result<(), JsValue> {
    let config = document.body().map_or_else(SiteConfig::default, |body| {
        let dataset = body.dataset();
        SiteConfig::from_lookup(|key| dataset.get(key))
    });
    let page = Page {
        motion: motion_preference(&window),
        trace: TraceHandle::from_flag(config.trace),
        window,
        document,
        config,
    };

    run_steps(&page, &STEPS, |name, err| {
        web_sys::console::error_2(&JsValue::from_str(name), &err);
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    type Log = RefCell<Vec<&'static str>>;

    fn ok_a(log: &Log) -> Result<(), &'static str> {
        log.borrow_mut().push("a");
        Ok(())
    }

    fn fails(log: &Log) -> Result<(), &'static str> {
        log.borrow_mut().push("b");
        Err("no observer")
    }

    fn ok_c(log: &Log) -> Result<(), &'static str> {
        log.borrow_mut().push("c");
        Ok(())
    }

    #[test]
    fn failing_step_leaves_later_steps_wired() {
        let log = Log::default();
        let mut failures = Vec::new();
        let steps: [Step<Log, &'static str>; 3] = [("a", ok_a), ("b", fails), ("c", ok_c)];
        let succeeded = run_steps(&log, &steps, |name, err| failures.push((name, err)));
        assert_eq!(succeeded, 2, "two of three steps succeed");
        assert_eq!(*log.borrow(), ["a", "b", "c"], "every step ran in order");
        assert_eq!(failures, [("b", "no observer")], "the failure was reported once");
    }

    #[test]
    fn steps_cover_every_feature() {
        let names: Vec<&str> = STEPS.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            [
                "notice",
                "reveal",
                "backgrounds",
                "tilt",
                "float",
                "overlays",
                "smooth-scroll",
                "newsletter",
                "contact",
                "theme",
                "decor"
            ],
            "setup order"
        );
    }
}
