// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-driven tile motion.
//!
//! - [`FrameLoop`]: single-outstanding-frame scheduling as an explicit
//!   state machine.
//! - [`TileAnimator`]: continuous float of every tile, paused while the page
//!   is hidden.
//! - [`TiltTracker`]: per-tile pointer tilt, coalesced to one write per
//!   frame.
//!
//! Everything here is inert under [`MotionPreference::Reduced`].

mod animator;
mod frame_loop;
mod tile;
mod tilt;

pub use animator::{FLOAT_X_VAR, FLOAT_Y_VAR, StyleSink, TileAnimator};
pub use frame_loop::{FrameLoop, LoopCommand, LoopMode, LoopState};
pub use tile::{FloatOffset, PHASE_STEP, Tier, TierParams, Tile, parse_offset};
pub use tilt::{
    GLOW_X_VAR, GLOW_Y_VAR, TILT_X_VAR, TILT_Y_VAR, TiltConfig, TiltState, TiltTracker,
};

/// CSS custom property a tile may declare to pin its phase.
pub const FLOAT_OFFSET_VAR: &str = "--float-offset";

/// The user's motion preference, read once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MotionPreference {
    /// Animations run.
    #[default]
    Full,
    /// `prefers-reduced-motion: reduce` matched.
    Reduced,
}

impl MotionPreference {
    /// Maps the media query result.
    #[must_use]
    pub const fn from_reduced(reduced: bool) -> Self {
        if reduced { Self::Reduced } else { Self::Full }
    }

    /// Returns `true` for [`MotionPreference::Reduced`].
    #[must_use]
    pub const fn is_reduced(self) -> bool {
        matches!(self, Self::Reduced)
    }
}
