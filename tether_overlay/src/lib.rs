// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tether Overlay: a deterministic, `no_std` lifecycle for anchored floating panels.
//!
//! ## Overview
//!
//! An [`Overlay`] keeps one popover-style panel attached to its trigger:
//!
//! - **Lifecycle** ([`Phase`]): `Closed → Measuring → Visible → Closing → Closed`.
//!   The panel mounts invisibly, is revealed only once it has a placement, and stays
//!   mounted for a fixed grace period after closing so an exit transition can run.
//! - **Measurement**: sampling happens in frame callbacks, never synchronously.
//!   Content that reports zero area is re-sampled on the next frame; the placement
//!   calculator never sees it.
//! - **Tracking**: while visible, scroll and resize silently re-run placement.
//! - **Dismissal**: Escape, pointer-down outside, and focus moving outside request a
//!   close, unless a [`DismissHandlers`] callback prevents it.
//!
//! Placement itself comes from [`tether_placement`].
//!
//! ## The host seam
//!
//! The engine owns no threads, clocks or event loop. Everything it needs from the
//! environment goes through the [`Host`] trait, passed explicitly to each call:
//! viewport and element geometry, frame and timeout scheduling, and listener
//! installation. The host calls back with [`Overlay::on_frame`] and
//! [`Overlay::on_timer`] using the [`FrameId`]/[`TimerId`] it was given; a
//! callback for anything but the currently pending id is ignored, so superseded
//! or cancelled work can never act on stale geometry.
//!
//! Listener installs follow the phase: dismissal listeners while `Measuring` or
//! `Visible`, scroll/resize only while `Visible`. After every call the installed
//! set equals what the phase needs.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use tether_overlay::{
//!     FrameId, Host, IdSource, Key, Listeners, Overlay, OverlayConfig, Phase, TimerId,
//! };
//! use tether_placement::PlacementRequest;
//!
//! #[derive(Default)]
//! struct Queue {
//!     frames: Vec<FrameId>,
//!     timers: Vec<TimerId>,
//!     listeners: Listeners,
//! }
//!
//! impl Host for Queue {
//!     fn viewport(&self) -> Size { Size::new(1000.0, 800.0) }
//!     fn trigger_rect(&self) -> Option<Rect> {
//!         Some(Rect::from_origin_size((100.0, 100.0), (40.0, 20.0)))
//!     }
//!     fn content_size(&self) -> Option<Size> { Some(Size::new(200.0, 80.0)) }
//!     fn request_frame(&mut self, id: FrameId) { self.frames.push(id) }
//!     fn cancel_frame(&mut self, id: FrameId) { self.frames.retain(|f| *f != id) }
//!     fn set_timeout(&mut self, id: TimerId, _delay_ms: u64) { self.timers.push(id) }
//!     fn clear_timeout(&mut self, id: TimerId) { self.timers.retain(|t| *t != id) }
//!     fn subscribe(&mut self, l: Listeners) { self.listeners |= l }
//!     fn unsubscribe(&mut self, l: Listeners) { self.listeners -= l }
//! }
//!
//! let mut host = Queue::default();
//! let config = OverlayConfig::new(PlacementRequest::default().with_side_offset(8.0));
//! let mut overlay = Overlay::new(config, &mut IdSource::new());
//!
//! overlay.open(&mut host);
//! assert_eq!(overlay.phase(), Phase::Measuring);
//!
//! // Paint frames: one to measure, one to arm the enter transition.
//! while let Some(id) = host.frames.pop() {
//!     overlay.on_frame(&mut host, id);
//! }
//! let placement = overlay.revealed_placement().unwrap();
//! assert_eq!((placement.top, placement.left), (128.0, 20.0));
//!
//! // Escape closes; the panel unmounts when the grace timer fires.
//! overlay.on_key_down(&mut host, Key::Escape);
//! assert_eq!(overlay.phase(), Phase::Closing);
//! let timer = host.timers.pop().unwrap();
//! overlay.on_timer(&mut host, timer);
//! assert_eq!(overlay.phase(), Phase::Closed);
//! assert!(host.listeners.is_empty());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: `Serialize`/`Deserialize` for [`OverlayConfig`].
//!
//! Diagnostics are emitted through `tracing`; install a subscriber to see them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod dismiss;
mod error;
mod host;
mod ids;
mod measure;
mod overlay;
mod phase;
mod tracker;

#[cfg(test)]
mod testing;

pub use config::{DEFAULT_CLOSE_DELAY_MS, OverlayConfig};
pub use dismiss::{
    DismissEvent, DismissHandler, DismissHandlers, DismissReason, FocusTarget, Key,
};
pub use error::MeasureError;
pub use host::{Host, Listeners};
pub use ids::{ContentId, FrameId, IdSource, TimerId};
pub use overlay::Overlay;
pub use phase::{Phase, Transition};
