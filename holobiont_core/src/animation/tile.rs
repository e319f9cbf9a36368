// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floating profile tiles.

use alloc::format;
use alloc::string::String;

/// Per-tile phase spacing when no explicit offset is declared.
pub const PHASE_STEP: f64 = 0.6;

/// Which row a tile belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Tier {
    /// Upper row: faster, wider oscillation.
    Upper,
    /// Lower row (the default for untagged tiles).
    #[default]
    Lower,
}

impl Tier {
    /// Parses a `data-tier` attribute; anything but `upper` is lower.
    #[must_use]
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("upper") => Self::Upper,
            _ => Self::Lower,
        }
    }

    /// Returns the animation constants for this tier.
    #[must_use]
    pub const fn params(self) -> TierParams {
        match self {
            Self::Upper => TierParams::upper(),
            Self::Lower => TierParams::lower(),
        }
    }
}

/// Oscillation constants for one tier.
///
/// `speed` is in radians per millisecond; amplitudes are CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierParams {
    /// Vertical amplitude.
    pub amplitude_y: f64,
    /// Horizontal amplitude.
    pub amplitude_x: f64,
    /// Angular speed.
    pub speed: f64,
}

impl TierParams {
    /// Constants for [`Tier::Upper`].
    #[must_use]
    pub const fn upper() -> Self {
        Self {
            amplitude_y: 4.5,
            amplitude_x: 3.0,
            speed: 0.0008,
        }
    }

    /// Constants for [`Tier::Lower`].
    #[must_use]
    pub const fn lower() -> Self {
        Self {
            amplitude_y: 2.5,
            amplitude_x: 1.8,
            speed: 0.000_65,
        }
    }
}

/// A float displacement in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FloatOffset {
    /// Horizontal displacement.
    pub x: f64,
    /// Vertical displacement.
    pub y: f64,
}

impl FloatOffset {
    /// No displacement.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Formats the horizontal component (`"1.23px"`).
    #[must_use]
    pub fn css_x(&self) -> String {
        css_px(self.x)
    }

    /// Formats the vertical component (`"-0.50px"`).
    #[must_use]
    pub fn css_y(&self) -> String {
        css_px(self.y)
    }
}

fn css_px(v: f64) -> String {
    // Avoid "-0.00px" for values that round to zero.
    let v = if v.abs() < 0.005 { 0.0 } else { v };
    format!("{v:.2}px")
}

/// A tile's fixed animation identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    /// Row tier, fixed at creation.
    pub tier: Tier,
    /// Phase offset in radians, stable for the tile's lifetime.
    pub phase: f64,
}

impl Tile {
    /// Creates a tile for position `index` in document order.
    ///
    /// An explicit non-zero `declared_offset` (the tile's `--float-offset`)
    /// wins over the index-derived phase.
    #[must_use]
    pub fn new(index: usize, tier: Tier, declared_offset: Option<f64>) -> Self {
        let derived = index as f64 * PHASE_STEP;
        let phase = match declared_offset {
            Some(offset) if offset.is_finite() && offset != 0.0 => offset,
            _ => derived,
        };
        Self { tier, phase }
    }

    /// Computes the float displacement at `time_ms`.
    ///
    /// A hovered tile is always at rest.
    #[must_use]
    pub fn offset_at(&self, time_ms: f64, hovered: bool) -> FloatOffset {
        if hovered {
            return FloatOffset::ZERO;
        }
        let p = self.tier.params();
        let angle = time_ms * p.speed + self.phase;
        FloatOffset {
            x: libm::cos(angle) * p.amplitude_x,
            y: libm::sin(angle) * p.amplitude_y,
        }
    }
}

/// Parses a CSS custom-property value such as `"1.2"` or `" 0.8 "`.
///
/// The longest leading decimal literal is used: an optional sign, digits
/// with at most one `.`, and an optional exponent. Anything after it is
/// ignored, so `"1.5rad"` is `1.5` and `"1.2.3"` is `1.2`.
#[must_use]
pub fn parse_offset(value: &str) -> Option<f64> {
    let text = value.trim();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_start = end + 1 + sign;
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_parsing_defaults_to_lower() {
        assert_eq!(Tier::from_attr(Some("upper")), Tier::Upper);
        assert_eq!(Tier::from_attr(Some("lower")), Tier::Lower);
        assert_eq!(Tier::from_attr(Some("UPPER")), Tier::Lower);
        assert_eq!(Tier::from_attr(None), Tier::Lower);
    }

    #[test]
    fn upper_tier_is_faster_and_wider() {
        let (u, l) = (TierParams::upper(), TierParams::lower());
        assert!(u.speed > l.speed);
        assert!(u.amplitude_x > l.amplitude_x && u.amplitude_y > l.amplitude_y);
    }

    #[test]
    fn phase_derives_from_index_unless_declared() {
        assert!((Tile::new(3, Tier::Lower, None).phase - 1.8).abs() < 1e-12);
        assert_eq!(Tile::new(3, Tier::Lower, Some(0.25)).phase, 0.25);
        // A zero offset counts as undeclared.
        assert!((Tile::new(2, Tier::Lower, Some(0.0)).phase - 1.2).abs() < 1e-12);
    }

    #[test]
    fn hovered_tile_is_at_rest_for_any_time() {
        let tile = Tile::new(1, Tier::Upper, None);
        for t in [0.0, 1.0, 1234.5, 9.9e6] {
            assert_eq!(tile.offset_at(t, true), FloatOffset::ZERO, "t = {t}");
        }
    }

    #[test]
    fn offset_follows_sin_cos() {
        let tile = Tile::new(0, Tier::Upper, None);
        // At t = 0 with phase 0: x = cos(0) * 3, y = sin(0) * 4.5.
        let at_zero = tile.offset_at(0.0, false);
        assert!((at_zero.x - 3.0).abs() < 1e-12);
        assert!(at_zero.y.abs() < 1e-12);
        assert_eq!(at_zero.css_x(), "3.00px");
        assert_eq!(at_zero.css_y(), "0.00px");

        // Quarter period: angle = π/2.
        let quarter = core::f64::consts::FRAC_PI_2 / TierParams::upper().speed;
        let q = tile.offset_at(quarter, false);
        assert!((q.y - 4.5).abs() < 1e-9, "y = {}", q.y);
        assert!(q.x.abs() < 1e-9, "x = {}", q.x);
    }

    #[test]
    fn offset_parsing_is_lenient() {
        assert_eq!(parse_offset("1.5"), Some(1.5));
        assert_eq!(parse_offset(" 0.8rad "), Some(0.8));
        assert_eq!(parse_offset("-2"), Some(-2.0));
        assert_eq!(parse_offset(""), None);
        assert_eq!(parse_offset("abc"), None);
    }

    #[test]
    fn offset_parsing_takes_longest_leading_literal() {
        assert_eq!(parse_offset("1e2"), Some(100.0), "exponent");
        assert_eq!(parse_offset("2.5E-1"), Some(0.25), "signed exponent");
        assert_eq!(parse_offset("3e"), Some(3.0), "bare e is a suffix");
        assert_eq!(parse_offset("4e+px"), Some(4.0), "exponent needs digits");
        assert_eq!(parse_offset("1.2.3"), Some(1.2), "second dot ends the literal");
        assert_eq!(parse_offset(".5"), Some(0.5), "leading dot");
        assert_eq!(parse_offset("-.5"), Some(-0.5), "signed leading dot");
        assert_eq!(parse_offset("7."), Some(7.0), "trailing dot");
        assert_eq!(parse_offset("+"), None, "sign alone");
        assert_eq!(parse_offset("."), None, "dot alone");
        assert_eq!(parse_offset("-e5"), None, "exponent without mantissa");
    }
}
