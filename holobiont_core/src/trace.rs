// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing for overlays, frames, and form submissions.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! backends call as they drive the core state machines. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.

use crate::animation::LoopCommand;
use crate::forms::{FormKind, StatusState};
use crate::overlay::{OverlayHost, OverlayId, OverlayKind, OverlayManager};
use crate::time::{FrameTick, HostTime};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What happened to an overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayAction {
    /// The overlay became visible.
    Opened,
    /// The overlay was dismissed.
    Closed,
}

/// Which frame loop issued a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoopSource {
    /// The continuous tile float loop.
    Float,
    /// A tile's one-shot tilt loop.
    Tilt,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after an overlay opens or closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayEvent {
    /// Which overlay.
    pub overlay: OverlayId,
    /// Menu or content.
    pub kind: OverlayKind,
    /// What happened.
    pub action: OverlayAction,
    /// Overlays open after the transition.
    pub open_count: usize,
}

impl OverlayEvent {
    /// Captures the manager's state after `action` was applied to `overlay`.
    ///
    /// Returns `None` for an id the manager does not know.
    #[must_use]
    pub fn capture<H: OverlayHost>(
        manager: &OverlayManager<H>,
        overlay: OverlayId,
        action: OverlayAction,
    ) -> Option<Self> {
        Some(Self {
            overlay,
            kind: manager.kind(overlay)?,
            action,
            open_count: manager.open_count(),
        })
    }
}

/// Emitted after the float loop handles a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Host time of the frame.
    pub now: HostTime,
    /// Tiles whose style variables were written.
    pub tiles_written: usize,
}

impl FrameEvent {
    /// Creates an event for `tick` that wrote `tiles_written` tiles.
    #[must_use]
    pub fn new(tick: &FrameTick, tiles_written: usize) -> Self {
        Self {
            frame_index: tick.frame_index,
            now: tick.now,
            tiles_written,
        }
    }
}

/// Emitted when a backend executes a non-trivial [`LoopCommand`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopEvent {
    /// Which loop issued it.
    pub source: LoopSource,
    /// The command executed.
    pub command: LoopCommand,
}

/// Emitted when a form's status changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormEvent {
    /// Which form.
    pub kind: FormKind,
    /// The new state.
    pub state: StatusState,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a backend.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after an overlay opens or closes.
    fn on_overlay(&mut self, e: &OverlayEvent) {
        _ = e;
    }

    /// Called after a float frame.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called when a frame request is issued or cancelled.
    fn on_loop(&mut self, e: &LoopEvent) {
        _ = e;
    }

    /// Called when a form status changes.
    fn on_form(&mut self, e: &FormEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`OverlayEvent`].
    #[inline]
    pub fn overlay(&mut self, e: &OverlayEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_overlay(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LoopEvent`] unless the command is [`LoopCommand::None`].
    #[inline]
    pub fn loop_command(&mut self, source: LoopSource, command: LoopCommand) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink
            && command != LoopCommand::None
        {
            s.on_loop(&LoopEvent { source, command });
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (source, command);
        }
    }

    /// Emits a [`FormEvent`].
    #[inline]
    pub fn form(&mut self, e: &FormEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_form(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tick() -> FrameTick {
        FrameTick {
            now: HostTime(16_000),
            frame_index: 42,
        }
    }

    #[test]
    fn frame_event_from_tick() {
        let evt = FrameEvent::new(&sample_tick(), 6);
        assert_eq!(evt.frame_index, 42);
        assert_eq!(evt.now, HostTime(16_000));
        assert_eq!(evt.tiles_written, 6);
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_frame(&FrameEvent::new(&sample_tick(), 0));
        sink.on_form(&FormEvent {
            kind: FormKind::Contact,
            state: StatusState::Pending,
        });
        sink.on_loop(&LoopEvent {
            source: LoopSource::Tilt,
            command: LoopCommand::Cancel,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.frame(&FrameEvent::new(&sample_tick(), 1));
        tracer.loop_command(LoopSource::Float, LoopCommand::Request);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            frames: Vec<u64>,
            loops: Vec<LoopCommand>,
        }
        impl TraceSink for RecordingSink {
            fn on_frame(&mut self, e: &FrameEvent) {
                self.frames.push(e.frame_index);
            }
            fn on_loop(&mut self, e: &LoopEvent) {
                self.loops.push(e.command);
            }
        }

        let mut sink = RecordingSink {
            frames: Vec::new(),
            loops: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame(&FrameEvent::new(&sample_tick(), 3));
        tracer.loop_command(LoopSource::Float, LoopCommand::None);
        tracer.loop_command(LoopSource::Float, LoopCommand::Request);
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.frames, &[42]);
        assert_eq!(sink.loops, &[LoopCommand::Request], "None is not traced");
    }
}
