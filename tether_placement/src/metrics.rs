// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Values derived from a finished placement that widgets commonly need.

use kurbo::{Point, Rect, Size};

use crate::types::{Placement, Side};

/// Panel-local point nearest the trigger, for scale/slide-in animations.
///
/// The point sits on the panel edge facing the trigger and tracks the trigger's
/// center along that edge, clamped to the panel's extent.
pub fn transform_origin(placement: &Placement, trigger: Rect, content: Size) -> Point {
    let center = trigger.center();
    let along_x = (center.x - placement.left).clamp(0.0, content.width.max(0.0));
    let along_y = (center.y - placement.top).clamp(0.0, content.height.max(0.0));
    match placement.side {
        Side::Bottom => Point::new(along_x, 0.0),
        Side::Top => Point::new(along_x, content.height),
        Side::Right => Point::new(0.0, along_y),
        Side::Left => Point::new(content.width, along_y),
    }
}

/// Room between the trigger and the viewport edge on `side`, less `padding`.
///
/// Never negative. Widgets use this to cap the size of scrollable panels.
pub fn available_space(trigger: Rect, side: Side, viewport: Size, padding: f64) -> f64 {
    let room = match side {
        Side::Top => trigger.y0,
        Side::Bottom => viewport.height - trigger.y1,
        Side::Left => trigger.x0,
        Side::Right => viewport.width - trigger.x1,
    };
    (room - padding).max(0.0)
}
