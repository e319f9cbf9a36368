// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Form submission transport.

use alloc::string::String;

use holobiont_core::forms::{CONTENT_TYPE, ResponseError, Submission, interpret};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response, UrlSearchParams, Window};

/// POSTs `submission` once and interprets the response.
///
/// Network failures and unreadable responses map to
/// [`ResponseError::Transport`]. No retry.
pub async fn post_form(window: &Window, submission: &Submission) -> Result<(), ResponseError> {
    let (ok, body) = send(window, submission)
        .await
        .map_err(|_| ResponseError::Transport)?;
    interpret(submission.kind, ok, &body)
}

async fn send(window: &Window, submission: &Submission) -> Result<(bool, String), JsValue> {
    let params = UrlSearchParams::new()?;
    for (name, value) in &submission.fields {
        params.append(name, value);
    }

    let headers = Headers::new()?;
    headers.set("Content-Type", CONTENT_TYPE)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&params);

    let request = Request::new_with_str_and_init(&submission.endpoint, &init)?;
    let resp: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    // An unreadable body is treated as empty; the status still decides.
    let body = match resp.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|text| text.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };
    Ok((resp.ok(), body))
}
