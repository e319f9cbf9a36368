// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame tile float driver.

use alloc::vec::Vec;

use super::MotionPreference;
use super::frame_loop::{FrameLoop, LoopCommand, LoopMode};
use super::tile::Tile;
use crate::time::FrameTick;

/// CSS custom property receiving the horizontal float offset.
pub const FLOAT_X_VAR: &str = "--float-x";
/// CSS custom property receiving the vertical float offset.
pub const FLOAT_Y_VAR: &str = "--float-y";

/// Receives tile-local style variables.
///
/// `tile` is the tile's index in the order it was handed to the driver.
pub trait StyleSink {
    /// Sets a CSS custom property on one tile.
    fn set_var(&mut self, tile: usize, name: &str, value: &str);
}

/// Runs the continuous float loop over a fixed set of tiles.
///
/// Under [`MotionPreference::Reduced`] the animator is inert: it never asks
/// for a frame and never writes a style variable.
#[derive(Clone, Debug)]
pub struct TileAnimator {
    motion: MotionPreference,
    frame_loop: FrameLoop,
    tiles: Vec<Tile>,
    hovered: Vec<bool>,
}

impl TileAnimator {
    /// Creates an animator over `tiles` in document order.
    #[must_use]
    pub fn new(motion: MotionPreference, tiles: Vec<Tile>) -> Self {
        let hovered = alloc::vec![false; tiles.len()];
        Self {
            motion,
            frame_loop: FrameLoop::new(LoopMode::Continuous),
            tiles,
            hovered,
        }
    }

    /// Returns the tracked tiles.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Returns the underlying frame loop.
    #[must_use]
    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    /// Returns `true` if this animator will ever animate.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.motion == MotionPreference::Full && !self.tiles.is_empty()
    }

    /// Starts the loop.
    pub fn start(&mut self) -> LoopCommand {
        if !self.is_enabled() {
            return LoopCommand::None;
        }
        self.frame_loop.start()
    }

    /// Pauses on hide, resumes on show.
    pub fn set_visible(&mut self, visible: bool) -> LoopCommand {
        if !self.is_enabled() {
            return LoopCommand::None;
        }
        self.frame_loop.set_visible(visible)
    }

    /// Records whether the pointer is over tile `index`.
    pub fn set_hovered(&mut self, index: usize, hovered: bool) {
        if let Some(slot) = self.hovered.get_mut(index) {
            *slot = hovered;
        }
    }

    /// Returns `true` if the pointer is over tile `index`.
    #[must_use]
    pub fn is_hovered(&self, index: usize) -> bool {
        self.hovered.get(index).copied().unwrap_or(false)
    }

    /// Handles one animation frame, writing every tile's offsets to `sink`.
    ///
    /// Returns the command re-arming the loop. Stale ticks (delivered after
    /// a cancel) write nothing.
    pub fn tick(&mut self, tick: &FrameTick, sink: &mut impl StyleSink) -> LoopCommand {
        if !self.is_enabled() || !self.frame_loop.begin_frame() {
            return LoopCommand::None;
        }
        let time_ms = tick.now.as_millis();
        for (index, (tile, &hovered)) in self.tiles.iter().zip(&self.hovered).enumerate() {
            let offset = tile.offset_at(time_ms, hovered);
            sink.set_var(index, FLOAT_Y_VAR, &offset.css_y());
            sink.set_var(index, FLOAT_X_VAR, &offset.css_x());
        }
        self.frame_loop.end_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Tier;
    use crate::time::HostTime;
    use alloc::string::{String, ToString};
    use alloc::vec;

    #[derive(Default)]
    struct RecordingSink {
        writes: Vec<(usize, String, String)>,
    }

    impl StyleSink for RecordingSink {
        fn set_var(&mut self, tile: usize, name: &str, value: &str) {
            self.writes.push((tile, name.to_string(), value.to_string()));
        }
    }

    fn tiles() -> Vec<Tile> {
        vec![
            Tile::new(0, Tier::Upper, None),
            Tile::new(1, Tier::Lower, None),
        ]
    }

    fn tick(ms: f64, frame_index: u64) -> FrameTick {
        FrameTick {
            now: HostTime::from_millis(ms),
            frame_index,
        }
    }

    #[test]
    fn reduced_motion_never_writes_or_requests() {
        let mut a = TileAnimator::new(MotionPreference::Reduced, tiles());
        let mut sink = RecordingSink::default();
        assert_eq!(a.start(), LoopCommand::None);
        assert_eq!(a.set_visible(false), LoopCommand::None);
        assert_eq!(a.set_visible(true), LoopCommand::None);
        for i in 0..10 {
            assert_eq!(a.tick(&tick(16.0 * i as f64, i), &mut sink), LoopCommand::None);
        }
        assert!(sink.writes.is_empty(), "reduced motion must not touch styles");
    }

    #[test]
    fn empty_tile_list_is_inert() {
        let mut a = TileAnimator::new(MotionPreference::Full, Vec::new());
        assert_eq!(a.start(), LoopCommand::None);
    }

    #[test]
    fn tick_writes_every_tile_and_rearms() {
        let mut a = TileAnimator::new(MotionPreference::Full, tiles());
        let mut sink = RecordingSink::default();
        assert_eq!(a.start(), LoopCommand::Request);
        assert_eq!(a.tick(&tick(0.0, 0), &mut sink), LoopCommand::Request);
        assert_eq!(sink.writes.len(), 4);
        assert_eq!(sink.writes[1], (0, "--float-x".to_string(), "3.00px".to_string()));
    }

    #[test]
    fn hovered_tile_gets_zero_offsets() {
        let mut a = TileAnimator::new(MotionPreference::Full, tiles());
        let mut sink = RecordingSink::default();
        a.set_hovered(1, true);
        let _ = a.start();
        let _ = a.tick(&tick(4321.0, 0), &mut sink);
        let hovered: Vec<_> = sink.writes.iter().filter(|w| w.0 == 1).collect();
        assert_eq!(hovered.len(), 2);
        assert!(hovered.iter().all(|w| w.2 == "0.00px"), "got {hovered:?}");
        a.set_hovered(7, true);
        assert!(!a.is_hovered(7), "out-of-range hover is ignored");
    }

    #[test]
    fn stale_tick_after_hide_writes_nothing() {
        let mut a = TileAnimator::new(MotionPreference::Full, tiles());
        let mut sink = RecordingSink::default();
        let _ = a.start();
        assert_eq!(a.set_visible(false), LoopCommand::Cancel);
        assert_eq!(a.tick(&tick(10.0, 0), &mut sink), LoopCommand::None);
        assert!(sink.writes.is_empty());
        assert_eq!(a.set_visible(true), LoopCommand::Request);
    }
}
