// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-overlay configuration.

use tether_placement::PlacementRequest;

/// Default grace period between `close()` and unmount, matching a typical exit
/// transition.
pub const DEFAULT_CLOSE_DELAY_MS: u64 = 200;

/// How an overlay places itself and when it closes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayConfig {
    /// Side, alignment and offsets relative to the trigger.
    pub placement: PlacementRequest,
    /// Milliseconds between entering `Closing` and unmounting.
    pub close_delay_ms: u64,
    /// Give up (and close) after this many sampling frames without a usable size.
    ///
    /// `None` keeps sampling until the content is laid out or the overlay is torn
    /// down.
    pub max_measure_frames: Option<u32>,
    /// Re-position on scroll and resize while visible.
    pub track_position: bool,
    /// Close on Escape.
    pub dismiss_on_escape: bool,
    /// Close on pointer down outside the trigger and the panel.
    pub dismiss_on_outside_pointer: bool,
    /// Close when focus moves outside the trigger and the panel.
    pub dismiss_on_focus_outside: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            placement: PlacementRequest::default(),
            close_delay_ms: DEFAULT_CLOSE_DELAY_MS,
            max_measure_frames: None,
            track_position: true,
            dismiss_on_escape: true,
            dismiss_on_outside_pointer: true,
            dismiss_on_focus_outside: true,
        }
    }
}

impl OverlayConfig {
    /// Default configuration with the given placement.
    pub fn new(placement: PlacementRequest) -> Self {
        Self {
            placement,
            ..Self::default()
        }
    }

    /// Set the placement request.
    #[must_use]
    pub fn with_placement(mut self, placement: PlacementRequest) -> Self {
        self.placement = placement;
        self
    }

    /// Set the close grace period.
    #[must_use]
    pub fn with_close_delay_ms(mut self, ms: u64) -> Self {
        self.close_delay_ms = ms;
        self
    }

    /// Cap the number of sampling frames.
    #[must_use]
    pub fn with_max_measure_frames(mut self, frames: Option<u32>) -> Self {
        self.max_measure_frames = frames;
        self
    }

    /// Enable or disable scroll/resize tracking.
    #[must_use]
    pub fn with_track_position(mut self, track: bool) -> Self {
        self.track_position = track;
        self
    }

    /// Enable or disable all three dismissal gestures at once.
    #[must_use]
    pub fn with_dismissal(mut self, enabled: bool) -> Self {
        self.dismiss_on_escape = enabled;
        self.dismiss_on_outside_pointer = enabled;
        self.dismiss_on_focus_outside = enabled;
        self
    }
}
