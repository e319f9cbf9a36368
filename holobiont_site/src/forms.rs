// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Newsletter and contact form submission.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;

use holobiont_backend_web::{TraceHandle, post_form};
use holobiont_core::forms::{
    ContactFields, FormError, FormKind, STATUS_SELECTOR, Status, Submission, prepare_contact,
    prepare_newsletter,
};
use holobiont_core::trace::FormEvent;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, Window};

use crate::Page;

/// A bound form and the element its status is written to.
struct FormUi {
    kind: FormKind,
    form: HtmlFormElement,
    status: Option<Element>,
    trace: TraceHandle,
}

impl FormUi {
    fn show(&self, status: &Status) {
        if let Some(el) = &self.status {
            el.set_text_content(Some(&*status.message));
            if self.kind.tracks_state() {
                let _ = el.set_attribute("data-state", status.state.as_str());
            }
        }
        let event = FormEvent {
            kind: self.kind,
            state: status.state,
        };
        self.trace.with(|tracer| tracer.form(&event));
    }

    fn action(&self) -> Option<String> {
        self.form.get_attribute("action")
    }

    /// Trimming is left to the validators.
    fn input(&self, name: &str) -> String {
        let selector = alloc::format!("input[name=\"{name}\"]");
        self.form
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn textarea(&self, name: &str) -> String {
        let selector = alloc::format!("textarea[name=\"{name}\"]");
        self.form
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
            .map(|area| area.value())
            .unwrap_or_default()
    }
}

/// Shows `prepared`'s outcome, sending it if it validated.
fn submit(ui: &Rc<FormUi>, window: &Window, prepared: Result<Submission, FormError>) {
    let submission = match prepared {
        Ok(submission) => submission,
        Err(error) => {
            ui.show(&Status::invalid(&error));
            return;
        }
    };
    ui.show(&Status::pending(ui.kind));

    let ui = Rc::clone(ui);
    let window = window.clone();
    spawn_local(async move {
        match post_form(&window, &submission).await {
            Ok(()) => {
                ui.show(&Status::success(ui.kind));
                ui.form.reset();
            }
            Err(error) => ui.show(&Status::failed(ui.kind, &error)),
        }
    });
}

/// Finds the form for `kind` and routes its submit event to `on_submit`.
fn bind(
    page: &Page,
    kind: FormKind,
    on_submit: impl Fn(&Rc<FormUi>) -> Result<Submission, FormError> + 'static,
) -> Result<(), JsValue> {
    let Some(form) = page
        .document
        .query_selector(kind.selector())?
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        return Ok(());
    };
    let status = form.query_selector(STATUS_SELECTOR)?;
    let ui = Rc::new(FormUi {
        kind,
        form: form.clone(),
        status,
        trace: page.trace.clone(),
    });

    let window = page.window.clone();
    let on_event = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        let prepared = on_submit(&ui);
        submit(&ui, &window, prepared);
    }) as Box<dyn FnMut(_)>);
    form.add_event_listener_with_callback("submit", on_event.as_ref().unchecked_ref())?;
    on_event.forget();
    Ok(())
}

/// Binds `[data-newsletter-form]` using the body's newsletter config.
pub(crate) fn setup_newsletter(page: &Page) -> Result<(), JsValue> {
    let config = page.config.newsletter.clone();
    bind(page, FormKind::Newsletter, move |ui| {
        prepare_newsletter(
            &config,
            ui.action().as_deref(),
            &ui.input("email"),
            &ui.input("company"),
        )
    })
}

/// Binds `[data-contact-form]`.
pub(crate) fn setup_contact(page: &Page) -> Result<(), JsValue> {
    bind(page, FormKind::Contact, |ui| {
        let (name, email, message, company) = (
            ui.input("name"),
            ui.input("email"),
            ui.textarea("message"),
            ui.input("company"),
        );
        prepare_contact(
            ui.action().as_deref(),
            ContactFields {
                name: &name,
                email: &email,
                message: &message,
                company: &company,
            },
        )
    })
}
