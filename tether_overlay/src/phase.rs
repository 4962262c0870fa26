// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility lifecycle of one panel.
//!
//! State machine: `Closed → Measuring → Visible → Closing → Closed`.
//!
//! - `Measuring → Visible` only happens through [`Lifecycle::arm`], which the
//!   overlay calls after a placement exists.
//! - `Closing → Closed` happens when the close timer fires. The timer is a fixed
//!   grace period, not an animation-end event, so a panel closed mid-enter still
//!   unmounts.
//! - Re-opening while `Closing` clears the timer and starts over at `Measuring`.
//! - Any phase can be forced to `Closed` (stale anchor, teardown).

use crate::host::Host;
use crate::ids::{TimerId, Tokens};

/// Where a panel is in its open/close lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not in the render tree.
    #[default]
    Closed,
    /// In the tree but kept invisible while its size is obtained.
    Measuring,
    /// Positioned; the enter transition may run.
    Visible,
    /// Still in the tree, animating out.
    Closing,
}

impl Phase {
    /// Whether the content belongs in the render tree.
    pub fn is_mounted(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether the content may be shown (non-zero opacity).
    ///
    /// A `Measuring` panel may hold coordinates from an earlier cycle; those are
    /// never revealed.
    pub fn is_revealed(self) -> bool {
        matches!(self, Self::Visible | Self::Closing)
    }

    /// Whether scroll and resize should re-position the panel.
    pub fn is_tracking(self) -> bool {
        matches!(self, Self::Visible)
    }

    /// Whether dismissal gestures are listened for.
    pub fn accepts_dismissal(self) -> bool {
        matches!(self, Self::Measuring | Self::Visible)
    }
}

/// A phase change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Phase before.
    pub from: Phase,
    /// Phase after.
    pub to: Phase,
}

/// Phase plus the close timer it owns.
#[derive(Clone, Debug, Default)]
pub(crate) struct Lifecycle {
    phase: Phase,
    close_timer: Option<TimerId>,
}

impl Lifecycle {
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    fn go(&mut self, to: Phase) -> Option<Transition> {
        let from = self.phase;
        self.phase = to;
        tracing::debug!(?from, ?to, "phase transition");
        Some(Transition { from, to })
    }

    fn clear_timer(&mut self, host: &mut impl Host) {
        if let Some(id) = self.close_timer.take() {
            host.clear_timeout(id);
        }
    }

    /// `Closed | Closing → Measuring`. No-op while already open.
    pub(crate) fn open(&mut self, host: &mut impl Host) -> Option<Transition> {
        match self.phase {
            Phase::Closed => self.go(Phase::Measuring),
            Phase::Closing => {
                self.clear_timer(host);
                self.go(Phase::Measuring)
            }
            Phase::Measuring | Phase::Visible => None,
        }
    }

    /// `Measuring → Visible`.
    pub(crate) fn arm(&mut self) -> Option<Transition> {
        match self.phase {
            Phase::Measuring => self.go(Phase::Visible),
            _ => None,
        }
    }

    /// `Visible → Closing` (arming the grace timer), or `Measuring → Closed`.
    ///
    /// A panel that never became visible has nothing to animate out. Closing an
    /// already-closing panel keeps the original timer.
    pub(crate) fn close(
        &mut self,
        host: &mut impl Host,
        tokens: &mut Tokens,
        delay_ms: u64,
    ) -> Option<Transition> {
        match self.phase {
            Phase::Visible => {
                let id = tokens.timer();
                host.set_timeout(id, delay_ms);
                self.close_timer = Some(id);
                self.go(Phase::Closing)
            }
            Phase::Measuring => self.go(Phase::Closed),
            Phase::Closing | Phase::Closed => None,
        }
    }

    /// `Closing → Closed` when `id` is the pending close timer. Stale ids are ignored.
    pub(crate) fn timer_fired(&mut self, id: TimerId) -> Option<Transition> {
        if self.phase != Phase::Closing || self.close_timer != Some(id) {
            tracing::trace!(timer = id.get(), "ignoring stale timer");
            return None;
        }
        self.close_timer = None;
        self.go(Phase::Closed)
    }

    /// Any phase `→ Closed`, clearing a pending close timer.
    pub(crate) fn force_close(&mut self, host: &mut impl Host) -> Option<Transition> {
        self.clear_timer(host);
        match self.phase {
            Phase::Closed => None,
            _ => self.go(Phase::Closed),
        }
    }

    #[cfg(test)]
    pub(crate) fn close_timer(&self) -> Option<TimerId> {
        self.close_timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    fn visible(host: &mut FakeHost) -> Lifecycle {
        let mut lc = Lifecycle::default();
        lc.open(host);
        lc.arm();
        lc
    }

    #[test]
    fn full_cycle() {
        let mut host = FakeHost::new();
        let mut tokens = Tokens::default();
        let mut lc = Lifecycle::default();

        assert_eq!(
            lc.open(&mut host),
            Some(Transition { from: Phase::Closed, to: Phase::Measuring })
        );
        assert_eq!(lc.arm().map(|t| t.to), Some(Phase::Visible));
        assert_eq!(lc.close(&mut host, &mut tokens, 200).map(|t| t.to), Some(Phase::Closing));
        let (id, delay) = host.timers[0];
        assert_eq!(delay, 200);
        assert_eq!(lc.timer_fired(id).map(|t| t.to), Some(Phase::Closed));
        assert!(lc.close_timer().is_none());
    }

    #[test]
    fn arm_requires_measuring() {
        let mut lc = Lifecycle::default();
        assert!(lc.arm().is_none());
        assert_eq!(lc.phase(), Phase::Closed);
    }

    #[test]
    fn open_is_idempotent_while_open() {
        let mut host = FakeHost::new();
        let mut lc = Lifecycle::default();
        assert!(lc.open(&mut host).is_some());
        assert!(lc.open(&mut host).is_none());
        lc.arm();
        assert!(lc.open(&mut host).is_none());
        assert_eq!(lc.phase(), Phase::Visible);
    }

    #[test]
    fn reopen_while_closing_clears_timer() {
        let mut host = FakeHost::new();
        let mut tokens = Tokens::default();
        let mut lc = visible(&mut host);
        lc.close(&mut host, &mut tokens, 150);
        let (id, _) = host.timers[0];

        assert_eq!(lc.open(&mut host).map(|t| t.to), Some(Phase::Measuring));
        assert!(host.timers.is_empty(), "pending close timer must be cleared");
        // The old callback arriving anyway must not unmount the panel.
        assert!(lc.timer_fired(id).is_none());
        assert_eq!(lc.phase(), Phase::Measuring);
    }

    #[test]
    fn close_while_measuring_skips_closing() {
        let mut host = FakeHost::new();
        let mut tokens = Tokens::default();
        let mut lc = Lifecycle::default();
        lc.open(&mut host);
        assert_eq!(
            lc.close(&mut host, &mut tokens, 200),
            Some(Transition { from: Phase::Measuring, to: Phase::Closed })
        );
        assert!(host.timers.is_empty());
    }

    #[test]
    fn close_is_idempotent() {
        let mut host = FakeHost::new();
        let mut tokens = Tokens::default();
        let mut lc = Lifecycle::default();
        assert!(lc.close(&mut host, &mut tokens, 200).is_none());

        let mut lc = visible(&mut host);
        lc.close(&mut host, &mut tokens, 200);
        let first = lc.close_timer();
        assert!(lc.close(&mut host, &mut tokens, 200).is_none());
        assert_eq!(lc.close_timer(), first);
        assert_eq!(host.timers.len(), 1);
    }

    #[test]
    fn force_close_from_any_phase() {
        let mut host = FakeHost::new();
        let mut tokens = Tokens::default();

        let mut lc = Lifecycle::default();
        assert!(lc.force_close(&mut host).is_none());

        lc.open(&mut host);
        assert_eq!(lc.force_close(&mut host).map(|t| t.from), Some(Phase::Measuring));

        let mut lc = visible(&mut host);
        lc.close(&mut host, &mut tokens, 200);
        assert_eq!(lc.force_close(&mut host).map(|t| t.from), Some(Phase::Closing));
        assert!(host.timers.is_empty());
    }

    #[test]
    fn phase_predicates() {
        assert!(!Phase::Closed.is_mounted());
        assert!(Phase::Measuring.is_mounted() && !Phase::Measuring.is_revealed());
        assert!(Phase::Visible.is_revealed() && Phase::Visible.is_tracking());
        assert!(Phase::Closing.is_revealed() && !Phase::Closing.is_tracking());
        assert!(Phase::Measuring.accepts_dismissal() && Phase::Visible.accepts_dismissal());
        assert!(!Phase::Closing.accepts_dismissal() && !Phase::Closed.accepts_dismissal());
    }
}
