// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeps a visible panel glued to a trigger that may move.
//!
//! Re-positioning is silent: it never re-enters `Measuring`, so the panel does
//! not flash. If the content momentarily reports no area, the last good size is
//! used.

use tether_placement::PlacementRequest;

use crate::config::OverlayConfig;
use crate::error::MeasureError;
use crate::host::{Host, Listeners};
use crate::measure::Snapshot;
use crate::phase::Phase;

/// Tracking listeners an overlay in `phase` should hold.
pub(crate) fn tracking_listeners(phase: Phase, config: &OverlayConfig) -> Listeners {
    if phase.is_tracking() && config.track_position {
        Listeners::TRACKING
    } else {
        Listeners::empty()
    }
}

/// Recompute placement from fresh trigger and content geometry.
///
/// Fails only when the trigger is gone.
pub(crate) fn reposition(
    host: &impl Host,
    request: &PlacementRequest,
    prev: &Snapshot,
) -> Result<Snapshot, MeasureError> {
    let trigger = host.trigger_rect().ok_or(MeasureError::AnchorDetached)?;
    let content = match host.content_size() {
        Some(size) if size.width > 0.0 && size.height > 0.0 => size,
        _ => prev.content,
    };
    Ok(Snapshot::compute(trigger, content, request, host.viewport()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;
    use kurbo::{Rect, Size};
    use tether_placement::Side;

    fn placed(host: &FakeHost, request: &PlacementRequest) -> Snapshot {
        Snapshot::compute(
            host.trigger.expect("trigger"),
            host.content.expect("content"),
            request,
            host.viewport,
        )
    }

    #[test]
    fn follows_a_moving_trigger() {
        let mut host = FakeHost::new();
        let request = PlacementRequest::default().with_side_offset(8.0);
        let prev = placed(&host, &request);

        host.trigger = Some(Rect::from_origin_size((100.0, 60.0), (40.0, 20.0)));
        let next = reposition(&host, &request, &prev).expect("trigger present");
        assert_eq!(next.placement.top, 88.0);
        assert_eq!(next.placement.left, prev.placement.left);
    }

    #[test]
    fn resize_can_flip() {
        let mut host = FakeHost::new();
        let request = PlacementRequest::default().with_side_offset(8.0);
        let prev = placed(&host, &request);
        host.viewport = Size::new(1000.0, 140.0);
        let next = reposition(&host, &request, &prev).expect("trigger present");
        assert_eq!(next.placement.side, Side::Top);
    }

    #[test]
    fn zero_size_keeps_last_content_size() {
        let mut host = FakeHost::new();
        let request = PlacementRequest::default();
        let prev = placed(&host, &request);
        host.content = Some(Size::ZERO);
        let next = reposition(&host, &request, &prev).expect("trigger present");
        assert_eq!(next.content, prev.content);
        assert_eq!(next.placement, prev.placement);
    }

    #[test]
    fn lost_anchor_is_reported() {
        let mut host = FakeHost::new();
        let request = PlacementRequest::default();
        let prev = placed(&host, &request);
        host.trigger = None;
        assert_eq!(reposition(&host, &request, &prev), Err(MeasureError::AnchorDetached));
    }

    #[test]
    fn only_visible_panels_track() {
        let config = OverlayConfig::default();
        assert_eq!(tracking_listeners(Phase::Visible, &config), Listeners::TRACKING);
        for phase in [Phase::Closed, Phase::Measuring, Phase::Closing] {
            assert!(tracking_listeners(phase, &config).is_empty());
        }
        let config = config.with_track_position(false);
        assert!(tracking_listeners(Phase::Visible, &config).is_empty());
    }
}
