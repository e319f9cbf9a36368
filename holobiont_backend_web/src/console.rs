// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output on the browser console.
//!
//! [`ConsoleSink`] implements [`TraceSink`] and writes one line per event
//! through `console.log`. [`TraceHandle`] is the shared, cloneable entry
//! point every event handler holds.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use holobiont_core::animation::LoopCommand;
use holobiont_core::forms::FormKind;
use holobiont_core::overlay::OverlayKind;
use holobiont_core::trace::{
    FormEvent, FrameEvent, LoopEvent, LoopSource, OverlayAction, OverlayEvent, TraceSink, Tracer,
};
use wasm_bindgen::JsValue;

/// Writes human-readable trace lines to the browser console.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    lines: u64,
}

impl ConsoleSink {
    /// Creates a sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many lines were written.
    #[must_use]
    pub fn lines(&self) -> u64 {
        self.lines
    }

    fn write(&mut self, line: &str) {
        self.lines += 1;
        web_sys::console::log_1(&JsValue::from_str(line));
    }
}

fn kind_name(kind: OverlayKind) -> &'static str {
    match kind {
        OverlayKind::Menu => "menu",
        OverlayKind::Content => "content",
    }
}

fn source_name(source: LoopSource) -> &'static str {
    match source {
        LoopSource::Float => "float",
        LoopSource::Tilt => "tilt",
    }
}

fn form_name(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Newsletter => "newsletter",
        FormKind::Contact => "contact",
    }
}

fn overlay_line(e: &OverlayEvent) -> String {
    let action = match e.action {
        OverlayAction::Opened => "open",
        OverlayAction::Closed => "close",
    };
    format!(
        "[overlay:{action}] id={} kind={} open={}",
        e.overlay.index(),
        kind_name(e.kind),
        e.open_count,
    )
}

fn frame_line(e: &FrameEvent) -> String {
    format!(
        "[frame] frame={} now={:.1}ms tiles={}",
        e.frame_index,
        e.now.as_millis(),
        e.tiles_written,
    )
}

fn loop_line(e: &LoopEvent) -> String {
    let command = match e.command {
        LoopCommand::None => "none",
        LoopCommand::Request => "request",
        LoopCommand::Cancel => "cancel",
    };
    format!("[loop:{}] {command}", source_name(e.source))
}

fn form_line(e: &FormEvent) -> String {
    format!("[form:{}] {}", form_name(e.kind), e.state.as_str())
}

impl TraceSink for ConsoleSink {
    fn on_overlay(&mut self, e: &OverlayEvent) {
        self.write(&overlay_line(e));
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.write(&frame_line(e));
    }

    fn on_loop(&mut self, e: &LoopEvent) {
        self.write(&loop_line(e));
    }

    fn on_form(&mut self, e: &FormEvent) {
        self.write(&form_line(e));
    }
}

/// A cloneable handle to an optional shared [`ConsoleSink`].
///
/// Disabled handles skip the closure entirely.
#[derive(Clone, Debug, Default)]
pub struct TraceHandle {
    sink: Option<Rc<RefCell<ConsoleSink>>>,
}

impl TraceHandle {
    /// A handle that logs to the console.
    #[must_use]
    pub fn console() -> Self {
        Self {
            sink: Some(Rc::new(RefCell::new(ConsoleSink::new()))),
        }
    }

    /// A handle that discards everything.
    #[must_use]
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    /// Returns a console handle when `enabled`, else a disabled one.
    #[must_use]
    pub fn from_flag(enabled: bool) -> Self {
        if enabled {
            Self::console()
        } else {
            Self::disabled()
        }
    }

    /// Returns `true` if events reach a sink.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Runs `f` with a [`Tracer`] over the shared sink.
    ///
    /// Does nothing when disabled, or when called from inside another
    /// `with` on the same handle.
    pub fn with(&self, f: impl FnOnce(&mut Tracer<'_>)) {
        let Some(sink) = &self.sink else {
            return;
        };
        let Ok(mut sink) = sink.try_borrow_mut() else {
            return;
        };
        let mut tracer = Tracer::new(&mut *sink);
        f(&mut tracer);
    }
}
