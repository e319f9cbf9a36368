// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open-animation anchoring.

use alloc::format;
use alloc::string::String;

use kurbo::{Rect, Size};

/// Largest vertical origin, in percent of viewport height.
///
/// Keeps the open animation from anchoring below the fold.
pub const ORIGIN_MAX_Y_PERCENT: f64 = 60.0;

/// CSS custom property receiving [`Origin::x_percent`].
pub const ORIGIN_X_VAR: &str = "--origin-x";
/// CSS custom property receiving [`Origin::y_percent`].
pub const ORIGIN_Y_VAR: &str = "--origin-y";

/// The point an overlay's open animation grows from, as viewport percentages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Origin {
    /// Horizontal position, percent of viewport width.
    pub x_percent: f64,
    /// Vertical position, percent of viewport height (at most 60).
    pub y_percent: f64,
}

impl Origin {
    /// Computes the origin from a trigger's client rectangle.
    ///
    /// Returns `None` for a degenerate viewport, where percentages are
    /// meaningless.
    #[must_use]
    pub fn from_trigger(trigger: Rect, viewport: Size) -> Option<Self> {
        if !(viewport.width > 0.0 && viewport.height > 0.0) {
            return None;
        }
        let center = trigger.center();
        let x_percent = center.x / viewport.width * 100.0;
        let y_percent = center.y / viewport.height * 100.0;
        Some(Self {
            x_percent,
            y_percent: y_percent.min(ORIGIN_MAX_Y_PERCENT),
        })
    }

    /// Formats the horizontal component as a CSS percentage (`"50.00%"`).
    #[must_use]
    pub fn css_x(&self) -> String {
        format!("{:.2}%", self.x_percent)
    }

    /// Formats the vertical component as a CSS percentage (`"60.00%"`).
    #[must_use]
    pub fn css_y(&self) -> String {
        format!("{:.2}%", self.y_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1000.0, 800.0);

    #[test]
    fn centered_trigger_anchors_at_center() {
        let trigger = Rect::new(480.0, 380.0, 520.0, 420.0);
        let origin = Origin::from_trigger(trigger, VIEWPORT).expect("valid viewport");
        assert_eq!(origin.css_x(), "50.00%");
        assert_eq!(origin.css_y(), "50.00%");
    }

    #[test]
    fn low_trigger_is_clamped_to_sixty_percent() {
        // Center at y = 760 of 800 → 95%.
        let trigger = Rect::new(100.0, 740.0, 140.0, 780.0);
        let origin = Origin::from_trigger(trigger, VIEWPORT).expect("valid viewport");
        assert_eq!(origin.css_y(), "60.00%", "vertical origin must clamp");
        assert_eq!(origin.css_x(), "12.00%");
    }

    #[test]
    fn zero_viewport_yields_no_origin() {
        let trigger = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(Origin::from_trigger(trigger, Size::ZERO), None);
    }
}
