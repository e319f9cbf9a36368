// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decorative background motion: drifting spores and the halo.
//!
//! Pure math over pointer and scroll positions. The backend reads element
//! centres, calls into here, and writes the resulting style strings.

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Size, Vec2};

/// Decorative motion constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecorConfig {
    /// Spores farther than this from the pointer (px) rest in place.
    pub repel_radius: f64,
    /// Push distance is `(repel_radius - dist) / repel_divisor`.
    pub repel_divisor: f64,
    /// Halo offset is `(pointer - viewport / 2) / parallax_divisor`.
    pub parallax_divisor: f64,
    /// Halo opacity at the top of the page.
    pub halo_opacity_max: f64,
    /// Lowest halo opacity, reached after scrolling far enough.
    pub halo_opacity_min: f64,
    /// Opacity lost per scrolled pixel.
    pub halo_fade_per_px: f64,
    /// Visible fraction at which a card starts its pulse.
    pub pulse_threshold: f64,
}

impl DecorConfig {
    /// The site's decorative motion constants.
    pub const DEFAULT: Self = Self {
        repel_radius: 200.0,
        repel_divisor: 10.0,
        parallax_divisor: 50.0,
        halo_opacity_max: 0.8,
        halo_opacity_min: 0.2,
        halo_fade_per_px: 0.001,
        pulse_threshold: 0.2,
    };
}

impl Default for DecorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Selector for the spore elements.
pub const SPORE_SELECTOR: &str = ".bio-spores span";
/// Selector for the halo element.
pub const HALO_SELECTOR: &str = ".bio-halo";
/// Selector for elements that pulse when scrolled into view.
pub const PULSE_SELECTOR: &str = ".card, .content-block";
/// Animation shorthand applied to a pulsing element.
pub const PULSE_ANIMATION: &str = "organicPulse 2s ease-out forwards";

/// Returns how far a spore centred at `spore` is pushed away from `pointer`.
///
/// Zero when the spore is outside the repel radius. A spore exactly under
/// the pointer has no direction and is pushed along `+x` at full force.
#[must_use]
pub fn spore_push(spore: Point, pointer: Point, config: &DecorConfig) -> Vec2 {
    let d = spore - pointer;
    let dist = libm::sqrt(d.x * d.x + d.y * d.y);
    if dist >= config.repel_radius {
        return Vec2::ZERO;
    }
    let force = (config.repel_radius - dist) / config.repel_divisor;
    if dist == 0.0 {
        return Vec2::new(force, 0.0);
    }
    Vec2::new(d.x / dist * force, d.y / dist * force)
}

/// Formats a spore push as a `transform` value.
#[must_use]
pub fn spore_transform(push: Vec2) -> String {
    if push == Vec2::ZERO {
        String::from("translate(0, 0)")
    } else {
        format!("translate({:.2}px, {:.2}px)", push.x, push.y)
    }
}

/// Returns the halo's parallax offset for a pointer in a viewport.
#[must_use]
pub fn halo_offset(pointer: Point, viewport: Size, config: &DecorConfig) -> Vec2 {
    Vec2::new(
        (pointer.x - viewport.width / 2.0) / config.parallax_divisor,
        (pointer.y - viewport.height / 2.0) / config.parallax_divisor,
    )
}

/// Formats a halo offset as a `transform` value.
///
/// The halo stays centred on its anchor and slightly enlarged.
#[must_use]
pub fn halo_transform(offset: Vec2) -> String {
    format!(
        "translate(calc(-50% + {:.2}px), calc(-50% + {:.2}px)) scale(1.1)",
        offset.x, offset.y
    )
}

/// Returns the halo opacity after scrolling `scroll_y` pixels.
#[must_use]
pub fn halo_opacity(scroll_y: f64, config: &DecorConfig) -> f64 {
    let faded = config.halo_opacity_max - scroll_y * config.halo_fade_per_px;
    faded.max(config.halo_opacity_min)
}
