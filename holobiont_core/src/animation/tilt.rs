// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-driven tilt and glow for upper-row tiles.
//!
//! Pointer moves only record the latest position; the style write happens in
//! the next animation frame, so a burst of moves costs one write. Scheduling
//! uses a [`LoopMode::OneShot`] [`FrameLoop`].

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Rect};

use super::MotionPreference;
use super::frame_loop::{FrameLoop, LoopCommand, LoopMode};

/// CSS custom property receiving the X-axis rotation.
pub const TILT_X_VAR: &str = "--tile-tilt-x";
/// CSS custom property receiving the Y-axis rotation.
pub const TILT_Y_VAR: &str = "--tile-tilt-y";
/// CSS custom property receiving the glow's horizontal position.
pub const GLOW_X_VAR: &str = "--glow-x";
/// CSS custom property receiving the glow's vertical position.
pub const GLOW_Y_VAR: &str = "--glow-y";

/// Tilt constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltConfig {
    /// Degrees of X rotation at the top or bottom edge, times two.
    pub x_gain: f64,
    /// Degrees of Y rotation at the left or right edge, times two.
    pub y_gain: f64,
    /// Glow position when the pointer is away, in percent.
    pub rest_glow: (f64, f64),
}

impl TiltConfig {
    /// The site's tilt constants.
    pub const DEFAULT: Self = Self {
        x_gain: 10.0,
        y_gain: 12.0,
        rest_glow: (50.0, 25.0),
    };
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One tile's tilt and glow values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltState {
    /// X rotation in degrees.
    pub tilt_x: f64,
    /// Y rotation in degrees.
    pub tilt_y: f64,
    /// Glow horizontal position in percent.
    pub glow_x: f64,
    /// Glow vertical position in percent.
    pub glow_y: f64,
}

impl TiltState {
    /// The resting state.
    pub const NEUTRAL: Self = Self {
        tilt_x: 0.0,
        tilt_y: 0.0,
        glow_x: TiltConfig::DEFAULT.rest_glow.0,
        glow_y: TiltConfig::DEFAULT.rest_glow.1,
    };

    /// Computes the state for a pointer at normalized `(x, y)` in the tile.
    #[must_use]
    pub fn at(x: f64, y: f64, config: &TiltConfig) -> Self {
        Self {
            tilt_x: (0.5 - y) * config.x_gain,
            tilt_y: (x - 0.5) * config.y_gain,
            glow_x: x * 100.0,
            glow_y: y * 100.0,
        }
    }

    /// `"{:.2}deg"` for [`TILT_X_VAR`].
    #[must_use]
    pub fn css_tilt_x(&self) -> String {
        format!("{:.2}deg", snap(self.tilt_x, 0.005))
    }

    /// `"{:.2}deg"` for [`TILT_Y_VAR`].
    #[must_use]
    pub fn css_tilt_y(&self) -> String {
        format!("{:.2}deg", snap(self.tilt_y, 0.005))
    }

    /// `"{:.1}%"` for [`GLOW_X_VAR`].
    #[must_use]
    pub fn css_glow_x(&self) -> String {
        format!("{:.1}%", snap(self.glow_x, 0.05))
    }

    /// `"{:.1}%"` for [`GLOW_Y_VAR`].
    #[must_use]
    pub fn css_glow_y(&self) -> String {
        format!("{:.1}%", snap(self.glow_y, 0.05))
    }

    /// Returns `(name, value)` pairs for all four variables.
    #[must_use]
    pub fn css_vars(&self) -> [(&'static str, String); 4] {
        [
            (TILT_X_VAR, self.css_tilt_x()),
            (TILT_Y_VAR, self.css_tilt_y()),
            (GLOW_X_VAR, self.css_glow_x()),
            (GLOW_Y_VAR, self.css_glow_y()),
        ]
    }
}

impl Default for TiltState {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Rounds values that would print as negative zero to zero.
fn snap(v: f64, eps: f64) -> f64 {
    if v.abs() < eps { 0.0 } else { v }
}

/// Coalesces pointer moves over one tile into at most one write per frame.
#[derive(Clone, Debug)]
pub struct TiltTracker {
    motion: MotionPreference,
    config: TiltConfig,
    frame_loop: FrameLoop,
    pending: Option<TiltState>,
}

impl TiltTracker {
    /// Creates a tracker with [`TiltConfig::DEFAULT`].
    #[must_use]
    pub fn new(motion: MotionPreference) -> Self {
        Self::with_config(motion, TiltConfig::DEFAULT)
    }

    /// Creates a tracker with explicit constants.
    #[must_use]
    pub fn with_config(motion: MotionPreference, config: TiltConfig) -> Self {
        Self {
            motion,
            config,
            frame_loop: FrameLoop::new(LoopMode::OneShot),
            pending: None,
        }
    }

    /// Returns `true` unless reduced motion is in effect.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.motion == MotionPreference::Full
    }

    /// Returns `true` if a frame request is outstanding.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.frame_loop.is_scheduled()
    }

    /// Records a pointer move at `pointer` over a tile occupying `rect`.
    ///
    /// Returns [`LoopCommand::Request`] only for the first move since the
    /// last delivered frame. A zero-area rect is ignored.
    pub fn on_move(&mut self, pointer: Point, rect: Rect) -> LoopCommand {
        if !self.is_enabled() || rect.width() <= 0.0 || rect.height() <= 0.0 {
            return LoopCommand::None;
        }
        let x = (pointer.x - rect.x0) / rect.width();
        let y = (pointer.y - rect.y0) / rect.height();
        self.pending = Some(TiltState::at(x, y, &self.config));
        self.frame_loop.start()
    }

    /// Delivers the coalesced state for this frame.
    ///
    /// Returns `None` for a stale frame or when nothing moved.
    pub fn on_frame(&mut self) -> Option<TiltState> {
        if !self.frame_loop.begin_frame() {
            return None;
        }
        let state = self.pending.take();
        let next = self.frame_loop.end_frame();
        debug_assert_eq!(next, LoopCommand::None, "one-shot frames never re-arm");
        state
    }

    /// Handles the pointer leaving the tile.
    ///
    /// Cancels any pending frame and returns the neutral state to write.
    pub fn on_leave(&mut self) -> (LoopCommand, TiltState) {
        self.pending = None;
        let rest = TiltState {
            tilt_x: 0.0,
            tilt_y: 0.0,
            glow_x: self.config.rest_glow.0,
            glow_y: self.config.rest_glow.1,
        };
        (self.frame_loop.stop(), rest)
    }
}
