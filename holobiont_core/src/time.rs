// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic page time and frame ticks.
//!
//! [`HostTime`] is a point on the page's monotonic clock in microsecond ticks.
//! On the web this is `performance.now()` (or the `requestAnimationFrame`
//! timestamp) scaled from milliseconds. The float animation is specified in
//! milliseconds, so [`HostTime::as_millis`] is the usual way back out.

use core::fmt;

/// A point in time expressed as microsecond ticks since page load.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Creates a [`HostTime`] from a `DOMHighResTimeStamp` in milliseconds.
    ///
    /// Negative and non-finite inputs clamp to zero.
    #[inline]
    #[must_use]
    pub fn from_millis(ms: f64) -> Self {
        if !ms.is_finite() || ms <= 0.0 {
            return Self(0);
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "page timestamps are small positive f64; µs fits in u64"
        )]
        let us = (ms * 1000.0) as u64;
        Self(us)
    }

    /// Returns this time in (fractional) milliseconds.
    #[inline]
    #[must_use]
    pub fn as_millis(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({})", self.0)
    }
}

/// A frame opportunity delivered by the backend's tick source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Page time when the frame callback fired.
    pub now: HostTime,
    /// Monotonically increasing frame counter for this tick source.
    pub frame_index: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_round_trip() {
        let t = HostTime::from_millis(16.5);
        assert_eq!(t, HostTime(16_500));
        assert!((t.as_millis() - 16.5).abs() < 1e-9, "got {}", t.as_millis());
    }

    #[test]
    fn negative_and_nan_clamp_to_zero() {
        assert_eq!(HostTime::from_millis(-3.0), HostTime(0));
        assert_eq!(HostTime::from_millis(f64::NAN), HostTime(0));
    }
}
