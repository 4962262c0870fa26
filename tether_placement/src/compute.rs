// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placement pass: base position, single flip, cross-axis clamp.

use kurbo::{Point, Rect, Size};

use crate::types::{Align, Axis, Placement, PlacementRequest, Side};

/// Compute where a panel of size `content` goes relative to `trigger`.
///
/// 1. Place the panel against `request.side`, `request.side_offset` away from the
///    trigger, aligned per `request.align` and shifted by `request.align_offset`.
/// 2. If `request.avoid_collisions` is set and that position leaves the viewport
///    on the side's axis, flip once to the opposite side. The flipped side is kept
///    even if it also overflows.
/// 3. Clamp the cross axis so the panel stays `request.collision_padding` away
///    from the viewport edges. When the panel is too large for that, the leading
///    edge wins.
///
/// The primary axis is never clamped: a panel that overflows on both sides of the
/// trigger keeps its flipped position.
///
/// Geometry inputs are assumed finite. A NaN `collision_padding` (for example
/// from a hand-edited config) is treated as zero. `content` should have non-zero
/// area; callers that measure asynchronously are expected to wait until it does.
///
/// ```
/// use kurbo::{Rect, Size};
/// use tether_placement::{Align, PlacementRequest, Side, compute_placement};
///
/// let trigger = Rect::from_origin_size((100.0, 100.0), (40.0, 20.0));
/// let request = PlacementRequest::new(Side::Bottom, Align::Center).with_side_offset(8.0);
/// let p = compute_placement(trigger, Size::new(200.0, 80.0), &request, Size::new(1000.0, 800.0));
/// assert_eq!((p.top, p.left, p.side), (128.0, 20.0, Side::Bottom));
/// ```
pub fn compute_placement(
    trigger: Rect,
    content: Size,
    request: &PlacementRequest,
    viewport: Size,
) -> Placement {
    let mut side = request.side;
    let mut origin = base_position(trigger, content, side, request);

    if request.avoid_collisions && overflows(side, origin, content, viewport) {
        side = side.opposite();
        origin = base_position(trigger, content, side, request);
    }

    let padding = request.collision_padding;
    match side.axis().cross() {
        Axis::Horizontal => {
            origin.x = clamp_span(origin.x, content.width, viewport.width, padding);
        }
        Axis::Vertical => {
            origin.y = clamp_span(origin.y, content.height, viewport.height, padding);
        }
    }

    Placement {
        top: origin.y,
        left: origin.x,
        side,
    }
}

/// Unflipped, unclamped top-left corner of the panel against `side`.
///
/// `request.side` is ignored in favor of `side`; the offsets and alignment are
/// taken from `request`.
pub fn base_position(trigger: Rect, content: Size, side: Side, request: &PlacementRequest) -> Point {
    let main = match side {
        Side::Top => trigger.y0 - content.height - request.side_offset,
        Side::Bottom => trigger.y1 + request.side_offset,
        Side::Left => trigger.x0 - content.width - request.side_offset,
        Side::Right => trigger.x1 + request.side_offset,
    };
    match side.axis() {
        Axis::Vertical => {
            let cross = align_span(trigger.x0, trigger.x1, content.width, request.align);
            Point::new(cross + request.align_offset, main)
        }
        Axis::Horizontal => {
            let cross = align_span(trigger.y0, trigger.y1, content.height, request.align);
            Point::new(main, cross + request.align_offset)
        }
    }
}

/// Whether a panel at `origin` leaves the viewport on `side`'s axis.
///
/// Only the edge the panel grows toward is checked: a `Bottom` panel overflows
/// past the viewport's bottom edge, a `Top` panel past its top edge.
pub fn overflows(side: Side, origin: Point, content: Size, viewport: Size) -> bool {
    match side {
        Side::Top => origin.y < 0.0,
        Side::Bottom => origin.y + content.height > viewport.height,
        Side::Left => origin.x < 0.0,
        Side::Right => origin.x + content.width > viewport.width,
    }
}

fn align_span(lead: f64, trail: f64, extent: f64, align: Align) -> f64 {
    match align {
        Align::Start => lead,
        Align::Center => (lead + trail) / 2.0 - extent / 2.0,
        Align::End => trail - extent,
    }
}

/// Clamp `start` into `[padding, limit - extent - padding]`, preferring `padding`
/// when the range is empty.
fn clamp_span(start: f64, extent: f64, limit: f64, padding: f64) -> f64 {
    // `f64::clamp` panics on a NaN bound.
    let padding = if padding.is_nan() { 0.0 } else { padding };
    let max = (limit - extent - padding).max(padding);
    start.clamp(padding, max)
}
