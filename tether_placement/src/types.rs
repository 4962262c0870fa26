// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for placement: sides, alignment, requests and results.

use kurbo::{Point, Rect, Size};

/// Margin kept between a clamped panel and the viewport edges.
pub const DEFAULT_COLLISION_PADDING: f64 = 8.0;

/// Edge of the trigger that the panel is placed against.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Above the trigger.
    Top,
    /// Below the trigger.
    #[default]
    Bottom,
    /// Left of the trigger.
    Left,
    /// Right of the trigger.
    Right,
}

impl Side {
    /// All four sides, in declaration order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// The side across the trigger from this one.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The axis along which the panel is offset from the trigger.
    ///
    /// `Top`/`Bottom` move the panel vertically, `Left`/`Right` horizontally.
    pub const fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }
}

/// A screen axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Alignment of the panel along the axis perpendicular to its [`Side`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Align {
    /// Flush with the trigger's leading edge (left or top).
    Start,
    /// Centered on the trigger.
    #[default]
    Center,
    /// Flush with the trigger's trailing edge (right or bottom).
    End,
}

/// What the calling widget asks for.
///
/// Immutable per render. Construct with [`PlacementRequest::new`] or
/// [`Default`] and refine with the `with_*` builders.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementRequest {
    /// Preferred side.
    pub side: Side,
    /// Alignment along the cross axis.
    pub align: Align,
    /// Gap between trigger and panel along the side's axis.
    pub side_offset: f64,
    /// Shift along the cross axis, applied after alignment.
    pub align_offset: f64,
    /// Flip to the opposite side when the preferred side overflows.
    pub avoid_collisions: bool,
    /// Margin kept from the viewport edges when clamping the cross axis.
    pub collision_padding: f64,
}

impl Default for PlacementRequest {
    fn default() -> Self {
        Self {
            side: Side::Bottom,
            align: Align::Center,
            side_offset: 0.0,
            align_offset: 0.0,
            avoid_collisions: true,
            collision_padding: DEFAULT_COLLISION_PADDING,
        }
    }
}

impl PlacementRequest {
    /// Request for `side` and `align` with no offsets and collisions avoided.
    pub fn new(side: Side, align: Align) -> Self {
        Self {
            side,
            align,
            ..Self::default()
        }
    }

    /// Set the preferred side.
    #[must_use]
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Set the cross-axis alignment.
    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set the gap between trigger and panel.
    #[must_use]
    pub fn with_side_offset(mut self, offset: f64) -> Self {
        self.side_offset = offset;
        self
    }

    /// Set the cross-axis shift.
    #[must_use]
    pub fn with_align_offset(mut self, offset: f64) -> Self {
        self.align_offset = offset;
        self
    }

    /// Enable or disable the single collision flip.
    #[must_use]
    pub fn with_avoid_collisions(mut self, avoid: bool) -> Self {
        self.avoid_collisions = avoid;
        self
    }

    /// Set the viewport margin used by cross-axis clamping.
    #[must_use]
    pub fn with_collision_padding(mut self, padding: f64) -> Self {
        self.collision_padding = padding;
        self
    }
}

/// Where the panel goes, in viewport coordinates.
///
/// This is the only value a view layer needs to apply absolute positioning.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Distance from the viewport top to the panel's top edge.
    pub top: f64,
    /// Distance from the viewport left to the panel's left edge.
    pub left: f64,
    /// The side actually used. Differs from the requested side after a flip.
    pub side: Side,
}

impl Placement {
    /// Top-left corner of the panel.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Panel bounds for a panel of the given size.
    pub fn bounds(&self, content: Size) -> Rect {
        Rect::from_origin_size(self.origin(), content)
    }

    /// Whether this placement used a different side than `request` asked for.
    pub fn flipped(&self, request: &PlacementRequest) -> bool {
        self.side != request.side
    }
}
