// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-outstanding-frame scheduling.
//!
//! [`FrameLoop`] is an explicit state machine over [`LoopState`]. Every
//! transition returns a [`LoopCommand`] that the backend executes against
//! its tick source (`requestAnimationFrame` / `cancelAnimationFrame` on the
//! web). The loop only ever returns [`LoopCommand::Request`] from
//! [`LoopState::Idle`], so at most one frame request is outstanding.
//!
//! ```text
//!          start / visible            frame fires
//!   Idle ──────────────────► Scheduled ───────────► Running
//!    ▲                         │                      │
//!    │       hidden / stop     │                      │ end_frame
//!    └─────────────────────────┘◄─────────────────────┘
//!             (Cancel)            (Request if continuous,
//!                                  active and visible)
//! ```

/// Where the loop is in its frame cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LoopState {
    /// No frame requested.
    #[default]
    Idle,
    /// One frame requested and not yet delivered.
    Scheduled,
    /// Inside a frame callback.
    Running,
}

/// What the backend must do after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use = "a LoopCommand must be executed by the tick source"]
pub enum LoopCommand {
    /// Nothing.
    None,
    /// Request one animation frame.
    Request,
    /// Cancel the outstanding animation frame request.
    Cancel,
}

/// Whether a frame re-arms itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoopMode {
    /// Keep requesting frames while active and visible (tile float).
    Continuous,
    /// Deliver one frame per [`start`](FrameLoop::start) (tilt coalescing).
    OneShot,
}

/// Explicit `{Idle, Scheduled, Running}` frame scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameLoop {
    state: LoopState,
    mode: LoopMode,
    active: bool,
    visible: bool,
}

impl FrameLoop {
    /// Creates an idle, inactive loop. The page is assumed visible.
    #[must_use]
    pub const fn new(mode: LoopMode) -> Self {
        Self {
            state: LoopState::Idle,
            mode,
            active: false,
            visible: true,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> LoopState {
        self.state
    }

    /// Returns `true` if a frame request is outstanding.
    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        matches!(self.state, LoopState::Scheduled)
    }

    /// Returns `true` between [`start`](Self::start) and
    /// [`stop`](Self::stop).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Activates the loop and requests a frame if none is outstanding.
    pub fn start(&mut self) -> LoopCommand {
        self.active = true;
        self.schedule()
    }

    /// Deactivates the loop, cancelling any outstanding request.
    pub fn stop(&mut self) -> LoopCommand {
        self.active = false;
        self.unschedule()
    }

    /// Records page visibility.
    ///
    /// Hiding cancels the outstanding request; showing requests a new one if
    /// the loop is active. Phase continuity across a hide is not preserved.
    pub fn set_visible(&mut self, visible: bool) -> LoopCommand {
        self.visible = visible;
        if visible {
            self.schedule()
        } else {
            self.unschedule()
        }
    }

    /// Enters a frame callback.
    ///
    /// Returns `false` for a stale callback (one that fired after its
    /// request was cancelled); the caller must then do nothing.
    pub fn begin_frame(&mut self) -> bool {
        if self.state != LoopState::Scheduled {
            return false;
        }
        self.state = LoopState::Running;
        true
    }

    /// Leaves a frame callback, re-arming a continuous loop.
    pub fn end_frame(&mut self) -> LoopCommand {
        if self.state != LoopState::Running {
            return LoopCommand::None;
        }
        self.state = LoopState::Idle;
        match self.mode {
            LoopMode::Continuous => self.schedule(),
            LoopMode::OneShot => {
                self.active = false;
                LoopCommand::None
            }
        }
    }

    fn schedule(&mut self) -> LoopCommand {
        if self.active && self.visible && self.state == LoopState::Idle {
            self.state = LoopState::Scheduled;
            LoopCommand::Request
        } else {
            LoopCommand::None
        }
    }

    fn unschedule(&mut self) -> LoopCommand {
        if self.state == LoopState::Scheduled {
            self.state = LoopState::Idle;
            LoopCommand::Cancel
        } else {
            LoopCommand::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_requests_once() {
        let mut l = FrameLoop::new(LoopMode::Continuous);
        assert_eq!(l.start(), LoopCommand::Request);
        assert_eq!(l.start(), LoopCommand::None, "no double scheduling");
        assert_eq!(l.set_visible(true), LoopCommand::None);
        assert!(l.is_scheduled());
    }

    #[test]
    fn continuous_frame_rearms() {
        let mut l = FrameLoop::new(LoopMode::Continuous);
        let _ = l.start();
        assert!(l.begin_frame());
        assert_eq!(l.state(), LoopState::Running);
        assert_eq!(l.start(), LoopCommand::None, "no request while running");
        assert_eq!(l.end_frame(), LoopCommand::Request);
        assert_eq!(l.state(), LoopState::Scheduled);
    }

    #[test]
    fn hide_cancels_and_show_resumes() {
        let mut l = FrameLoop::new(LoopMode::Continuous);
        let _ = l.start();
        assert_eq!(l.set_visible(false), LoopCommand::Cancel);
        assert_eq!(l.state(), LoopState::Idle);
        assert!(!l.begin_frame(), "stale callback after cancel is ignored");
        assert_eq!(l.set_visible(false), LoopCommand::None);
        assert_eq!(l.set_visible(true), LoopCommand::Request);
    }

    #[test]
    fn hide_during_frame_stops_rearming() {
        let mut l = FrameLoop::new(LoopMode::Continuous);
        let _ = l.start();
        assert!(l.begin_frame());
        assert_eq!(l.set_visible(false), LoopCommand::None);
        assert_eq!(l.end_frame(), LoopCommand::None);
        assert_eq!(l.state(), LoopState::Idle);
    }

    #[test]
    fn visible_before_start_does_not_request() {
        let mut l = FrameLoop::new(LoopMode::Continuous);
        assert_eq!(l.set_visible(true), LoopCommand::None);
        assert_eq!(l.state(), LoopState::Idle);
    }

    #[test]
    fn one_shot_delivers_a_single_frame() {
        let mut l = FrameLoop::new(LoopMode::OneShot);
        assert_eq!(l.start(), LoopCommand::Request);
        assert!(l.begin_frame());
        assert_eq!(l.end_frame(), LoopCommand::None);
        assert!(!l.is_active());
        assert_eq!(l.start(), LoopCommand::Request);
    }

    #[test]
    fn stop_cancels_outstanding_request() {
        let mut l = FrameLoop::new(LoopMode::OneShot);
        let _ = l.start();
        assert_eq!(l.stop(), LoopCommand::Cancel);
        assert_eq!(l.stop(), LoopCommand::None);
    }

    #[test]
    fn never_two_outstanding_requests() {
        let mut l = FrameLoop::new(LoopMode::Continuous);
        let mut outstanding = 0_i32;
        let mut state: u32 = 7;
        for _ in 0..1000 {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let cmd = match (state >> 16) % 5 {
                0 => l.start(),
                1 => l.stop(),
                2 => l.set_visible((state >> 8) & 1 == 0),
                _ => {
                    if outstanding == 1 {
                        outstanding = 0;
                        assert!(l.begin_frame(), "delivered frame must be expected");
                        l.end_frame()
                    } else {
                        LoopCommand::None
                    }
                }
            };
            match cmd {
                LoopCommand::Request => outstanding += 1,
                LoopCommand::Cancel => outstanding -= 1,
                LoopCommand::None => {}
            }
            assert!((0..=1).contains(&outstanding), "outstanding = {outstanding}");
            assert_eq!(outstanding == 1, l.is_scheduled());
        }
    }
}
