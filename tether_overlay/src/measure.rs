// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measure-until-stable loop run while a panel is `Measuring`.
//!
//! The content has not necessarily been laid out when it mounts, so nothing is
//! sampled synchronously. Each sampling pass runs in a frame callback; a panel
//! that still reports no area schedules another frame. Once a placement exists,
//! one more frame passes before the panel is armed, so the enter transition
//! starts from its final position.
//!
//! At most one frame is pending per panel. Scheduling a new one cancels the
//! previous request, and a callback for any other id is ignored.

use kurbo::{Rect, Size};
use tether_placement::{Placement, PlacementRequest, compute_placement};

use crate::error::MeasureError;
use crate::host::Host;
use crate::ids::{FrameId, Tokens};

/// One consistent view of trigger, content and the placement derived from them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Snapshot {
    pub(crate) trigger: Rect,
    pub(crate) content: Size,
    pub(crate) placement: Placement,
}

impl Snapshot {
    pub(crate) fn compute(
        trigger: Rect,
        content: Size,
        request: &PlacementRequest,
        viewport: Size,
    ) -> Self {
        Self {
            trigger,
            content,
            placement: compute_placement(trigger, content, request, viewport),
        }
    }

    pub(crate) fn content_bounds(&self) -> Rect {
        self.placement.bounds(self.content)
    }
}

/// Read the trigger rectangle and a usable (non-zero area) content size.
pub(crate) fn sample(host: &impl Host) -> Result<(Rect, Size), MeasureError> {
    let trigger = host.trigger_rect().ok_or(MeasureError::AnchorDetached)?;
    let content = host.content_size().ok_or(MeasureError::ContentDetached)?;
    if content.width > 0.0 && content.height > 0.0 {
        Ok((trigger, content))
    } else {
        Err(MeasureError::ZeroSized {
            width: content.width,
            height: content.height,
        })
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum Stage {
    #[default]
    Idle,
    Sampling(FrameId),
    Arming(FrameId),
}

/// What a frame callback amounted to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum FrameOutcome {
    /// Not the pending frame.
    Stale,
    /// No usable size yet; another frame was requested.
    Retry(MeasureError),
    /// A placement exists; the arm frame was requested.
    Placed(Snapshot),
    /// The arm frame elapsed; the panel may be revealed.
    Armed,
    /// Measuring cannot succeed; the panel should close.
    Failed(MeasureError),
}

/// The sampling loop for one panel.
#[derive(Clone, Debug, Default)]
pub(crate) struct Measurement {
    stage: Stage,
    attempts: u32,
}

impl Measurement {
    /// Sampling passes spent in the current (or last) measuring cycle.
    pub(crate) fn attempts(&self) -> u32 {
        self.attempts
    }

    pub(crate) fn pending_frame(&self) -> Option<FrameId> {
        match self.stage {
            Stage::Idle => None,
            Stage::Sampling(id) | Stage::Arming(id) => Some(id),
        }
    }

    fn schedule(&mut self, host: &mut impl Host, tokens: &mut Tokens) -> FrameId {
        if let Some(old) = self.pending_frame() {
            host.cancel_frame(old);
        }
        let id = tokens.frame();
        host.request_frame(id);
        id
    }

    /// Begin a fresh cycle, superseding any pending frame.
    pub(crate) fn start(&mut self, host: &mut impl Host, tokens: &mut Tokens) {
        self.attempts = 0;
        self.stage = Stage::Sampling(self.schedule(host, tokens));
    }

    /// Drop any pending frame.
    pub(crate) fn cancel(&mut self, host: &mut impl Host) {
        if let Some(id) = self.pending_frame() {
            host.cancel_frame(id);
        }
        self.stage = Stage::Idle;
    }

    pub(crate) fn on_frame(
        &mut self,
        host: &mut impl Host,
        tokens: &mut Tokens,
        id: FrameId,
        request: &PlacementRequest,
        max_frames: Option<u32>,
    ) -> FrameOutcome {
        match self.stage {
            Stage::Sampling(pending) if pending == id => {}
            Stage::Arming(pending) if pending == id => {
                self.stage = Stage::Idle;
                // The anchor may have gone away during the arm frame.
                if host.trigger_rect().is_none() {
                    return FrameOutcome::Failed(MeasureError::AnchorDetached);
                }
                return FrameOutcome::Armed;
            }
            _ => {
                tracing::trace!(frame = id.get(), "ignoring stale frame");
                return FrameOutcome::Stale;
            }
        }

        self.stage = Stage::Idle;
        self.attempts = self.attempts.saturating_add(1);
        match sample(host) {
            Ok((trigger, content)) => {
                let snapshot = Snapshot::compute(trigger, content, request, host.viewport());
                tracing::debug!(
                    attempts = self.attempts,
                    top = snapshot.placement.top,
                    left = snapshot.placement.left,
                    side = ?snapshot.placement.side,
                    "placement ready"
                );
                self.stage = Stage::Arming(self.schedule(host, tokens));
                FrameOutcome::Placed(snapshot)
            }
            Err(err) if err.is_transient() => {
                if max_frames.is_some_and(|max| self.attempts >= max) {
                    return FrameOutcome::Failed(MeasureError::FrameBudgetExhausted {
                        frames: self.attempts,
                    });
                }
                tracing::trace!(attempts = self.attempts, %err, "content not ready, retrying");
                self.stage = Stage::Sampling(self.schedule(host, tokens));
                FrameOutcome::Retry(err)
            }
            Err(err) => FrameOutcome::Failed(err),
        }
    }
}
