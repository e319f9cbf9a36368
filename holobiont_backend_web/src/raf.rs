// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` tick source.
//!
//! [`RafLoop`] executes the [`LoopCommand`]s returned by the core frame
//! loops. It never decides on its own whether to request another frame:
//! the callback returns the next command and the loop carries it out.
//! Each callback receives a [`DOMHighResTimeStamp`][mdn] (milliseconds from
//! `performance.now()`), converted to microsecond [`HostTime`] ticks.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp
//! [`HostTime`]: holobiont_core::time::HostTime

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use holobiont_core::animation::LoopCommand;
use holobiont_core::time::{FrameTick, HostTime};
use holobiont_core::trace::LoopSource;

use crate::console::TraceHandle;

// Direct global bindings instead of `web_sys::Window` methods: avoids
// fetching (and unwrapping) the Window object on every frame.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// A `requestAnimationFrame` executor for [`LoopCommand`]s.
///
/// Create with [`RafLoop::new`], then pass every command a core frame loop
/// returns to [`execute`](Self::execute). At most one request is ever
/// outstanding: a second [`LoopCommand::Request`] while one is pending is
/// ignored. Dropping the `RafLoop` cancels the pending request.
pub struct RafLoop {
    inner: Rc<RafInner>,
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct RafInner {
    /// The JS closure registered with `requestAnimationFrame`.
    ///
    /// Stored in its own `RefCell` so it can be set once in `new()` and
    /// referenced from inside itself without conflicting with `callback`.
    closure: RefCell<Option<RafClosure>>,

    /// Receives each [`FrameTick`] and returns the next command.
    callback: RefCell<Box<dyn FnMut(FrameTick) -> LoopCommand>>,

    /// Monotonically increasing frame counter (becomes `FrameTick::frame_index`).
    frame_counter: Cell<u64>,

    /// The ID of the outstanding `requestAnimationFrame` call, if any.
    raf_id: Cell<Option<i32>>,

    /// Which core loop this executes, for tracing.
    source: LoopSource,

    trace: TraceHandle,
}

impl RafInner {
    fn execute(&self, command: LoopCommand) {
        match command {
            LoopCommand::None => return,
            LoopCommand::Request => {
                if self.raf_id.get().is_some() {
                    return;
                }
                let Some(ref closure) = *self.closure.borrow() else {
                    return;
                };
                let id = request_animation_frame(closure.as_ref().unchecked_ref());
                self.raf_id.set(Some(id));
            }
            LoopCommand::Cancel => {
                let Some(id) = self.raf_id.take() else {
                    return;
                };
                cancel_animation_frame(id);
            }
        }
        self.trace
            .with(|tracer| tracer.loop_command(self.source, command));
    }
}

impl RafLoop {
    /// Creates a `RafLoop` with no frame requested.
    ///
    /// `callback` receives a [`FrameTick`] on each delivered frame and
    /// returns the command to execute next (usually the result of the core
    /// loop's `end_frame`).
    pub fn new(
        callback: impl FnMut(FrameTick) -> LoopCommand + 'static,
        source: LoopSource,
        trace: TraceHandle,
    ) -> Self {
        let inner = Rc::new(RafInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            frame_counter: Cell::new(0),
            raf_id: Cell::new(None),
            source,
            trace,
        });

        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            // The request that produced this callback is spent.
            inner.raf_id.set(None);

            let frame_index = inner.frame_counter.get();
            inner.frame_counter.set(frame_index + 1);

            let tick = FrameTick {
                now: HostTime::from_millis(timestamp_ms),
                frame_index,
            };

            // The borrow is scoped so it doesn't overlap with `execute`.
            let next = inner.callback.borrow_mut()(tick);
            inner.execute(next);
        }) as Box<dyn FnMut(f64)>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Carries out a command from a core frame loop.
    pub fn execute(&self, command: LoopCommand) {
        self.inner.execute(command);
    }

    /// Returns `true` if a frame request is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.raf_id.get().is_some()
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.execute(LoopCommand::Cancel);
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for RafLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafLoop")
            .field("pending", &self.inner.raf_id.get().is_some())
            .field("frame_counter", &self.inner.frame_counter.get())
            .field("source", &self.inner.source)
            .finish()
    }
}
