// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tether Placement: anchor-relative positioning for floating panels.
//!
//! Given a trigger rectangle, a measured panel size, a [`PlacementRequest`] and the
//! viewport size, [`compute_placement`] returns a [`Placement`]: the panel's top-left
//! corner in viewport coordinates plus the side that was actually used.
//!
//! - Offset the panel from the trigger along the requested [`Side`] and align it on the
//!   perpendicular axis per [`Align`].
//! - With `avoid_collisions`, flip once to the opposite side when the panel would
//!   leave the viewport. There is no search over the remaining sides; a flipped side
//!   that still overflows is accepted.
//! - Always clamp the perpendicular (cross) axis so the panel keeps
//!   `collision_padding` (default [`DEFAULT_COLLISION_PADDING`]) from the viewport edges.
//!
//! Everything here is a pure function of its inputs, so placement can be tested
//! without a live layout engine. Measurement timing, tracking a moving trigger and
//! the open/close lifecycle live in `tether_overlay`.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use tether_placement::{Align, PlacementRequest, Side, compute_placement};
//!
//! let trigger = Rect::from_origin_size((100.0, 100.0), (40.0, 20.0));
//! let content = Size::new(200.0, 80.0);
//! let request = PlacementRequest::new(Side::Bottom, Align::Center).with_side_offset(8.0);
//!
//! // Plenty of room below.
//! let p = compute_placement(trigger, content, &request, Size::new(1000.0, 800.0));
//! assert_eq!(p.side, Side::Bottom);
//! assert_eq!((p.top, p.left), (128.0, 20.0));
//!
//! // A short viewport pushes the panel above the trigger.
//! let p = compute_placement(trigger, content, &request, Size::new(1000.0, 140.0));
//! assert_eq!(p.side, Side::Top);
//! assert_eq!(p.top, 12.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in `kurbo`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: `Serialize`/`Deserialize` for requests, sides, alignment and results.
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

mod compute;
mod metrics;
mod types;

pub use compute::{base_position, compute_placement, overflows};
pub use metrics::{available_space, transform_origin};
pub use types::{Align, Axis, DEFAULT_COLLISION_PADDING, Placement, PlacementRequest, Side};

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Size};

    #[test]
    fn opposite_is_an_involution() {
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
            assert_ne!(side.opposite(), side);
            assert_eq!(side.opposite().axis(), side.axis());
        }
    }

    #[test]
    fn cross_axis_is_perpendicular() {
        assert_eq!(Side::Top.axis().cross(), Axis::Horizontal);
        assert_eq!(Side::Right.axis().cross(), Axis::Vertical);
    }

    #[test]
    fn defaults_match_documented_values() {
        let req = PlacementRequest::default();
        assert_eq!(req.side, Side::Bottom);
        assert_eq!(req.align, Align::Center);
        assert!(req.avoid_collisions);
        assert_eq!(req.collision_padding, DEFAULT_COLLISION_PADDING);
    }

    #[test]
    fn bounds_follow_origin() {
        let p = Placement { top: 12.0, left: 20.0, side: Side::Top };
        assert_eq!(p.bounds(Size::new(200.0, 80.0)), Rect::new(20.0, 12.0, 220.0, 92.0));
    }

    #[test]
    fn placement_is_deterministic() {
        let trigger = Rect::from_origin_size((300.0, 500.0), (64.0, 24.0));
        let req = PlacementRequest::new(Side::Right, Align::End).with_align_offset(3.5);
        let viewport = Size::new(640.0, 480.0);
        let a = compute_placement(trigger, Size::new(120.0, 90.0), &req, viewport);
        let b = compute_placement(trigger, Size::new(120.0, 90.0), &req, viewport);
        assert_eq!(a, b);
    }
}
