// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay: lifecycle, measurement, tracking and dismissal for one panel.

use core::fmt;

use kurbo::{Point, Rect};
use tether_placement::{Placement, transform_origin};

use crate::config::OverlayConfig;
use crate::dismiss::{
    DismissHandlers, DismissReason, FocusTarget, Key, dismissal_listeners, is_outside,
};
use crate::error::MeasureError;
use crate::host::{Host, ListenerSet, Listeners};
use crate::ids::{ContentId, FrameId, IdSource, TimerId, Tokens};
use crate::measure::{FrameOutcome, Measurement, Snapshot};
use crate::phase::{Lifecycle, Phase, Transition};
use crate::tracker::{reposition, tracking_listeners};

/// One anchored floating panel.
///
/// ## Usage
///
/// - The owning widget keeps the open/closed boolean and calls [`Overlay::open`] /
///   [`Overlay::close`] (or [`Overlay::set_open`]) when it changes.
/// - The host delivers frames, timers and events back through [`Overlay::on_frame`],
///   [`Overlay::on_timer`], [`Overlay::on_scroll`], [`Overlay::on_resize`],
///   [`Overlay::on_key_down`], [`Overlay::on_pointer_down`] and
///   [`Overlay::on_focus_in`]. Only the listeners currently reported by
///   [`Overlay::listeners`] need to be delivered; anything else is ignored.
/// - The widget renders while [`Phase::is_mounted`], at [`Overlay::placement`],
///   with opacity keyed off [`Phase::is_revealed`].
/// - Dismissal methods return the [`DismissReason`] when they closed the panel so
///   the widget can update its boolean.
///
/// After every call, the listeners installed on the host are exactly those the
/// current phase needs.
pub struct Overlay {
    config: OverlayConfig,
    content_id: ContentId,
    tokens: Tokens,
    lifecycle: Lifecycle,
    measurement: Measurement,
    listeners: ListenerSet,
    snapshot: Option<Snapshot>,
    last_error: Option<MeasureError>,
    handlers: DismissHandlers,
}

impl fmt::Debug for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overlay")
            .field("content_id", &self.content_id)
            .field("phase", &self.lifecycle.phase())
            .field("placement", &self.placement())
            .field("listeners", &self.listeners.installed())
            .finish_non_exhaustive()
    }
}

impl Overlay {
    /// A closed overlay.
    pub fn new(config: OverlayConfig, ids: &mut IdSource) -> Self {
        Self {
            config,
            content_id: ids.content_id(),
            tokens: Tokens::default(),
            lifecycle: Lifecycle::default(),
            measurement: Measurement::default(),
            listeners: ListenerSet::default(),
            snapshot: None,
            last_error: None,
            handlers: DismissHandlers::default(),
        }
    }

    /// Attach dismissal handlers.
    #[must_use]
    pub fn with_handlers(mut self, handlers: DismissHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    /// Dismissal handlers, for replacing individual callbacks.
    pub fn handlers_mut(&mut self) -> &mut DismissHandlers {
        &mut self.handlers
    }

    /// Current configuration.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// Listener needs are re-evaluated immediately, and a visible panel is
    /// re-positioned with the new placement request.
    pub fn set_config(&mut self, host: &mut impl Host, config: OverlayConfig) {
        self.config = config;
        if self.phase().is_tracking() {
            self.refresh(host);
        }
        self.sync_listeners(host);
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    /// Identifier for the content node.
    pub fn content_id(&self) -> ContentId {
        self.content_id
    }

    /// Last computed placement.
    ///
    /// While `Measuring` this may be left over from an earlier cycle; use
    /// [`Overlay::revealed_placement`] for a value that is safe to show.
    pub fn placement(&self) -> Option<Placement> {
        self.snapshot.map(|s| s.placement)
    }

    /// Placement, only while the panel may be shown.
    pub fn revealed_placement(&self) -> Option<Placement> {
        self.placement().filter(|_| self.phase().is_revealed())
    }

    /// Panel bounds in viewport coordinates, only while the panel may be shown.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.revealed_snapshot().map(|s| s.content_bounds())
    }

    /// Panel-local point nearest the trigger, for enter/exit animations.
    ///
    /// `None` unless the panel may be shown.
    pub fn transform_origin(&self) -> Option<Point> {
        self.revealed_snapshot()
            .map(|s| transform_origin(&s.placement, s.trigger, s.content))
    }

    fn revealed_snapshot(&self) -> Option<Snapshot> {
        self.snapshot.filter(|_| self.phase().is_revealed())
    }

    /// Sampling frames spent in the current (or last) measuring cycle.
    pub fn attempts(&self) -> u32 {
        self.measurement.attempts()
    }

    /// Why the last sampling frame did not produce a placement, if it didn't.
    pub fn last_measure_error(&self) -> Option<MeasureError> {
        self.last_error
    }

    /// Listeners currently installed on the host.
    pub fn listeners(&self) -> Listeners {
        self.listeners.installed()
    }

    /// Frame callback currently requested from the host.
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.measurement.pending_frame()
    }

    /// Mount the panel and start measuring. No-op while `Measuring` or `Visible`.
    ///
    /// Re-opening while `Closing` cancels the pending unmount.
    pub fn open(&mut self, host: &mut impl Host) -> Option<Transition> {
        let transition = self.lifecycle.open(host)?;
        self.last_error = None;
        self.measurement.start(host, &mut self.tokens);
        self.sync_listeners(host);
        tracing::debug!(content = %self.content_id, from = ?transition.from, "overlay opened");
        Some(transition)
    }

    /// Start closing. No-op while `Closing` or `Closed`.
    ///
    /// A visible panel stays mounted for `close_delay_ms`; a panel that is still
    /// measuring unmounts at once.
    pub fn close(&mut self, host: &mut impl Host) -> Option<Transition> {
        let transition =
            self.lifecycle
                .close(host, &mut self.tokens, self.config.close_delay_ms)?;
        self.measurement.cancel(host);
        self.sync_listeners(host);
        tracing::debug!(content = %self.content_id, to = ?transition.to, "overlay closing");
        Some(transition)
    }

    /// [`Overlay::open`] or [`Overlay::close`] to match a boolean.
    pub fn set_open(&mut self, host: &mut impl Host, open: bool) -> Option<Transition> {
        if open {
            self.open(host)
        } else {
            self.close(host)
        }
    }

    /// The trigger left the tree. Closes immediately from any phase.
    pub fn anchor_unmounted(&mut self, host: &mut impl Host) -> Option<Transition> {
        tracing::debug!(content = %self.content_id, "anchor unmounted");
        self.force_close(host)
    }

    /// The overlay itself is going away: cancel every pending callback and release
    /// every listener.
    pub fn teardown(&mut self, host: &mut impl Host) {
        self.force_close(host);
    }

    /// Frame callback for `id`.
    ///
    /// Returns the `Measuring → Visible` transition on the arm frame, or the
    /// transition to `Closed` if measuring had to give up.
    pub fn on_frame(&mut self, host: &mut impl Host, id: FrameId) -> Option<Transition> {
        if self.phase() != Phase::Measuring {
            return None;
        }
        let outcome = self.measurement.on_frame(
            host,
            &mut self.tokens,
            id,
            &self.config.placement,
            self.config.max_measure_frames,
        );
        match outcome {
            FrameOutcome::Stale => None,
            FrameOutcome::Retry(err) => {
                self.last_error = Some(err);
                None
            }
            FrameOutcome::Placed(snapshot) => {
                self.last_error = None;
                self.snapshot = Some(snapshot);
                None
            }
            FrameOutcome::Armed => {
                // The trigger or the request may have changed since sampling.
                if let Some(prev) = self.snapshot {
                    match reposition(host, &self.config.placement, &prev) {
                        Ok(next) => self.snapshot = Some(next),
                        Err(err) => {
                            self.last_error = Some(err);
                            tracing::debug!(content = %self.content_id, %err, "measuring failed");
                            return self.force_close(host);
                        }
                    }
                }
                let transition = self.lifecycle.arm();
                self.sync_listeners(host);
                transition
            }
            FrameOutcome::Failed(err) => {
                self.last_error = Some(err);
                if matches!(err, MeasureError::FrameBudgetExhausted { .. }) {
                    tracing::warn!(content = %self.content_id, %err, "giving up on measuring");
                } else {
                    tracing::debug!(content = %self.content_id, %err, "measuring failed");
                }
                self.force_close(host)
            }
        }
    }

    /// Timer callback for `id`. Returns `Closing → Closed` for the pending close
    /// timer; anything else is ignored.
    pub fn on_timer(&mut self, host: &mut impl Host, id: TimerId) -> Option<Transition> {
        let transition = self.lifecycle.timer_fired(id)?;
        self.sync_listeners(host);
        tracing::debug!(content = %self.content_id, "overlay unmounted");
        Some(transition)
    }

    /// Scroll anywhere in the window. Returns the new placement if it changed.
    pub fn on_scroll(&mut self, host: &mut impl Host) -> Option<Placement> {
        self.track(host)
    }

    /// Viewport resize. Returns the new placement if it changed.
    pub fn on_resize(&mut self, host: &mut impl Host) -> Option<Placement> {
        self.track(host)
    }

    /// Key down anywhere in the window.
    pub fn on_key_down(&mut self, host: &mut impl Host, key: Key) -> Option<DismissReason> {
        if key != Key::Escape || !self.config.dismiss_on_escape {
            return None;
        }
        self.dismiss(host, DismissReason::EscapeKey)
    }

    /// Pointer down at `at`, in viewport coordinates.
    ///
    /// Presses on the trigger or on a revealed panel are not dismissals. While
    /// measuring the panel is invisible, so only the trigger counts as inside.
    pub fn on_pointer_down(&mut self, host: &mut impl Host, at: Point) -> Option<DismissReason> {
        if !self.config.dismiss_on_outside_pointer {
            return None;
        }
        let content = if self.phase().is_revealed() {
            self.content_bounds()
        } else {
            None
        };
        if !is_outside(at, host.trigger_rect(), content) {
            return None;
        }
        self.dismiss(host, DismissReason::PointerDownOutside { at })
    }

    /// Focus moved. The host decides whether the new target is inside.
    pub fn on_focus_in(
        &mut self,
        host: &mut impl Host,
        target: FocusTarget,
    ) -> Option<DismissReason> {
        if target == FocusTarget::Inside || !self.config.dismiss_on_focus_outside {
            return None;
        }
        self.dismiss(host, DismissReason::FocusOutside)
    }

    fn dismiss(&mut self, host: &mut impl Host, reason: DismissReason) -> Option<DismissReason> {
        if !self.phase().accepts_dismissal() {
            return None;
        }
        if !self.handlers.dispatch(reason) {
            tracing::trace!(content = %self.content_id, ?reason, "dismissal prevented");
            return None;
        }
        tracing::debug!(content = %self.content_id, ?reason, "dismissed");
        self.close(host);
        Some(reason)
    }

    fn track(&mut self, host: &mut impl Host) -> Option<Placement> {
        if !self.phase().is_tracking() || !self.config.track_position {
            return None;
        }
        self.refresh(host)
    }

    fn refresh(&mut self, host: &mut impl Host) -> Option<Placement> {
        let prev = self.snapshot?;
        match reposition(host, &self.config.placement, &prev) {
            Ok(next) => {
                self.snapshot = Some(next);
                if next.placement == prev.placement {
                    return None;
                }
                tracing::trace!(
                    top = next.placement.top,
                    left = next.placement.left,
                    side = ?next.placement.side,
                    "repositioned"
                );
                Some(next.placement)
            }
            Err(err) => {
                tracing::debug!(content = %self.content_id, %err, "lost anchor while tracking");
                self.last_error = Some(err);
                self.force_close(host);
                None
            }
        }
    }

    fn force_close(&mut self, host: &mut impl Host) -> Option<Transition> {
        self.measurement.cancel(host);
        let transition = self.lifecycle.force_close(host);
        self.sync_listeners(host);
        transition
    }

    fn sync_listeners(&mut self, host: &mut impl Host) {
        let phase = self.phase();
        let wanted =
            dismissal_listeners(phase, &self.config) | tracking_listeners(phase, &self.config);
        self.listeners.sync(host, wanted);
    }
}
