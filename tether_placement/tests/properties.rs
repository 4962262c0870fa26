// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for `compute_placement`.

use kurbo::{Rect, Size};
use proptest::prelude::*;
use tether_placement::{
    Align, Axis, DEFAULT_COLLISION_PADDING, PlacementRequest, Side, base_position,
    compute_placement, overflows,
};

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![
        Just(Side::Top),
        Just(Side::Bottom),
        Just(Side::Left),
        Just(Side::Right),
    ]
}

fn align() -> impl Strategy<Value = Align> {
    prop_oneof![Just(Align::Start), Just(Align::Center), Just(Align::End)]
}

fn trigger() -> impl Strategy<Value = Rect> {
    (-100.0..1200.0_f64, -100.0..900.0_f64, 0.0..200.0_f64, 0.0..100.0_f64)
        .prop_map(|(x, y, w, h)| Rect::from_origin_size((x, y), (w, h)))
}

fn viewport() -> impl Strategy<Value = Size> {
    (200.0..1600.0_f64, 200.0..1200.0_f64).prop_map(|(w, h)| Size::new(w, h))
}

fn request() -> impl Strategy<Value = PlacementRequest> {
    (side(), align(), 0.0..24.0_f64, -40.0..40.0_f64, any::<bool>()).prop_map(
        |(side, align, side_offset, align_offset, avoid)| {
            PlacementRequest::new(side, align)
                .with_side_offset(side_offset)
                .with_align_offset(align_offset)
                .with_avoid_collisions(avoid)
        },
    )
}

proptest! {
    #[test]
    fn cross_axis_stays_within_margin(
        trigger in trigger(),
        viewport in viewport(),
        request in request(),
        fw in 0.01..1.0_f64,
        fh in 0.01..1.0_f64,
    ) {
        let m = DEFAULT_COLLISION_PADDING;
        // Content that fits inside the padded viewport on both axes.
        let content = Size::new(fw * (viewport.width - 2.0 * m), fh * (viewport.height - 2.0 * m));
        let p = compute_placement(trigger, content, &request, viewport);
        let bounds = p.bounds(content);
        let eps = 1e-9;
        match p.side.axis().cross() {
            Axis::Horizontal => {
                prop_assert!(bounds.x0 >= m - eps, "left {} past margin", bounds.x0);
                prop_assert!(bounds.x1 <= viewport.width - m + eps, "right {} past margin", bounds.x1);
            }
            Axis::Vertical => {
                prop_assert!(bounds.y0 >= m - eps, "top {} past margin", bounds.y0);
                prop_assert!(bounds.y1 <= viewport.height - m + eps, "bottom {} past margin", bounds.y1);
            }
        }
    }

    #[test]
    fn disabled_collisions_never_flip(
        trigger in trigger(),
        viewport in viewport(),
        request in request(),
        w in 1.0..600.0_f64,
        h in 1.0..600.0_f64,
    ) {
        let request = request.with_avoid_collisions(false);
        let p = compute_placement(trigger, Size::new(w, h), &request, viewport);
        prop_assert_eq!(p.side, request.side);
    }

    #[test]
    fn flip_happens_only_on_overflow(
        trigger in trigger(),
        viewport in viewport(),
        request in request(),
        w in 1.0..600.0_f64,
        h in 1.0..600.0_f64,
    ) {
        let content = Size::new(w, h);
        let p = compute_placement(trigger, content, &request, viewport);
        let base = base_position(trigger, content, request.side, &request);
        let expected = if request.avoid_collisions && overflows(request.side, base, content, viewport) {
            request.side.opposite()
        } else {
            request.side
        };
        prop_assert_eq!(p.side, expected);
    }

    #[test]
    fn bottom_center_is_centered_on_trigger(
        x in 120.0..700.0_f64,
        y in 0.0..300.0_f64,
        tw in 0.0..200.0_f64,
        cw in 1.0..150.0_f64,
        ch in 1.0..200.0_f64,
        align_offset in -20.0..20.0_f64,
    ) {
        let trigger = Rect::from_origin_size((x, y), (tw, 20.0));
        let request = PlacementRequest::new(Side::Bottom, Align::Center)
            .with_side_offset(8.0)
            .with_align_offset(align_offset);
        let viewport = Size::new(1200.0, 800.0);
        let p = compute_placement(trigger, Size::new(cw, ch), &request, viewport);
        prop_assert_eq!(p.side, Side::Bottom);
        let center = p.left + cw / 2.0;
        let expected = trigger.center().x + align_offset;
        prop_assert!((center - expected).abs() < 1e-9, "{} != {}", center, expected);
    }
}
