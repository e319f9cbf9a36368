// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismissible notice banner.

use alloc::boxed::Box;

use holobiont_core::notice::{
    BANNER_CLASS, BANNER_STYLE, DISMISS_ARIA_LABEL, DISMISS_LABEL, DISMISS_STYLE,
};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Event;

use crate::Page;

/// Prepends the configured banner to the body, if any.
pub(crate) fn setup(page: &Page) -> Result<(), JsValue> {
    let Some(notice) = &page.config.notice else {
        return Ok(());
    };
    let Some(body) = page.document.body() else {
        return Ok(());
    };

    let banner = page.document.create_element("div")?;
    banner.set_class_name(BANNER_CLASS);
    banner.set_attribute("style", BANNER_STYLE)?;
    banner.set_attribute("role", "status")?;

    let text = page.document.create_element("span")?;
    text.set_text_content(Some(notice.banner_text().as_str()));
    banner.append_child(&text)?;

    let dismiss = page.document.create_element("button")?;
    dismiss.set_attribute("type", "button")?;
    dismiss.set_attribute("style", DISMISS_STYLE)?;
    dismiss.set_attribute("aria-label", DISMISS_ARIA_LABEL)?;
    dismiss.set_text_content(Some(DISMISS_LABEL));
    banner.append_child(&dismiss)?;

    let target = banner.clone();
    let on_dismiss = Closure::wrap(Box::new(move |_event: Event| {
        target.remove();
    }) as Box<dyn FnMut(_)>);
    dismiss.add_event_listener_with_callback("click", on_dismiss.as_ref().unchecked_ref())?;
    on_dismiss.forget();

    body.prepend_with_node_1(&banner)?;
    Ok(())
}
