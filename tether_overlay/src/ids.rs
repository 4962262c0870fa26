// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instance-scoped identifiers.
//!
//! Nothing here is global. An [`IdSource`] is created by whoever owns a group of
//! overlays (a window, a test, a request) and threaded into [`Overlay::new`].
//! Frame and timer tokens are minted per overlay and only compared against that
//! overlay's own pending callbacks.
//!
//! [`Overlay::new`]: crate::Overlay::new

use core::fmt;

/// Handle for a pending "before next paint" callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

impl FrameId {
    /// Raw value, for hosts that key their callback tables by integer.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Handle for a pending delayed callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw value, for hosts that key their timer tables by integer.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Stable identifier for an overlay's content node.
///
/// Widgets use it to link the trigger to the panel (for example as the target of
/// an `aria-controls` attribute). Formats as `tether-content-N`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(u64);

impl ContentId {
    /// Raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tether-content-{}", self.0)
    }
}

/// Counter that hands out [`ContentId`]s for one scope.
#[derive(Clone, Debug, Default)]
pub struct IdSource {
    next: u64,
}

impl IdSource {
    /// A fresh source starting at zero.
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Mint the next content id.
    pub fn content_id(&mut self) -> ContentId {
        let id = ContentId(self.next);
        self.next += 1;
        id
    }
}

/// Per-overlay token counter for frames and timers.
#[derive(Clone, Debug, Default)]
pub(crate) struct Tokens {
    next: u64,
}

impl Tokens {
    fn bump(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    pub(crate) fn frame(&mut self) -> FrameId {
        FrameId(self.bump())
    }

    pub(crate) fn timer(&mut self) -> TimerId {
        TimerId(self.bump())
    }
}
