// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-free state machines for the holobiont site.
//!
//! `holobiont_core` holds everything about the site's interactive behavior
//! that does not need a browser: which overlays are open and who gets focus
//! back, where the focus trap wraps, when the next animation frame may be
//! requested, and what a form submission should say to the user. It is
//! `no_std` compatible (with `alloc`) so the same logic runs in wasm and in
//! host-side unit tests.
//!
//! # Architecture
//!
//! Backends translate DOM events into calls on the core types and execute
//! the commands those calls return:
//!
//! ```text
//!   DOM event ──► OverlayManager::{open, close, close_all, pointer_down}
//!                      │
//!                      ▼
//!                 OverlayHost (class/aria/focus/scroll-lock side effects)
//!
//!   rAF tick  ──► TileAnimator::tick ──► StyleSink (--float-x, --float-y)
//!                      │
//!                      ▼
//!                 LoopCommand ──► backend request/cancel
//! ```
//!
//! **[`overlay`]**: Overlay registry, open/close bookkeeping, focus trap,
//! and the [`OverlayHost`](overlay::OverlayHost) trait that backends implement.
//!
//! **[`animation`]**: Explicit `{Idle, Scheduled, Running}` frame loop,
//! per-tier tile float math, and the coalescing tilt tracker.
//!
//! **[`decor`]**: Pointer repulsion, halo parallax, and scroll fade math.
//!
//! **[`forms`]**: Newsletter and contact submission preparation and
//! response interpretation.
//!
//! **[`reveal`]**, **[`theme`]**, **[`notice`]**, **[`config`]**: Small
//! page-level collaborators.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animation;
pub mod config;
pub mod decor;
pub mod forms;
pub mod notice;
pub mod overlay;
pub mod reveal;
pub mod theme;
pub mod time;
pub mod trace;
