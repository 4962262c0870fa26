// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the engine and its environment.
//!
//! The engine never reaches for ambient state. Every operation on
//! [`Overlay`](crate::Overlay) takes the host explicitly, and the host is
//! responsible for turning requests (frames, timeouts, listener installs) into
//! real callbacks that it later feeds back through
//! [`Overlay::on_frame`](crate::Overlay::on_frame),
//! [`Overlay::on_timer`](crate::Overlay::on_timer) and the event methods.

use kurbo::{Rect, Size};

use crate::ids::{FrameId, TimerId};

bitflags::bitflags! {
    /// Window-level event listeners an overlay may hold.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Listeners: u8 {
        /// Scroll of the window or any ancestor scroll container.
        ///
        /// Hosts must install this in capture mode so scrolls of nested
        /// containers are observed.
        const SCROLL       = 0b0000_0001;
        /// Viewport resize.
        const RESIZE       = 0b0000_0010;
        /// Key down anywhere in the window.
        const KEY_DOWN     = 0b0000_0100;
        /// Pointer down anywhere in the window.
        const POINTER_DOWN = 0b0000_1000;
        /// Focus moving to a new element.
        const FOCUS_IN     = 0b0001_0000;
    }
}

impl Listeners {
    /// Listeners that keep a visible panel glued to its trigger.
    pub const TRACKING: Self = Self::SCROLL.union(Self::RESIZE);
    /// Listeners that detect dismissal gestures.
    pub const DISMISSAL: Self = Self::KEY_DOWN
        .union(Self::POINTER_DOWN)
        .union(Self::FOCUS_IN);
}

/// Everything an overlay consumes from its environment.
///
/// Rectangles and sizes are in viewport coordinates.
pub trait Host {
    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Bounding rectangle of the trigger, or `None` once it has left the tree.
    fn trigger_rect(&self) -> Option<Rect>;

    /// Measured size of the panel's root node, or `None` while it is not mounted.
    ///
    /// May be zero-sized before the first layout pass.
    fn content_size(&self) -> Option<Size>;

    /// Call back with `id` before the next paint.
    fn request_frame(&mut self, id: FrameId);

    /// Drop a frame callback requested earlier. Unknown ids are ignored.
    fn cancel_frame(&mut self, id: FrameId);

    /// Call back with `id` after `delay_ms` milliseconds.
    fn set_timeout(&mut self, id: TimerId, delay_ms: u64);

    /// Drop a timeout set earlier. Unknown ids are ignored.
    fn clear_timeout(&mut self, id: TimerId);

    /// Start delivering the given events.
    ///
    /// Never called with a listener that is already installed.
    fn subscribe(&mut self, listeners: Listeners);

    /// Stop delivering the given events.
    ///
    /// Only called with listeners that are currently installed.
    fn unsubscribe(&mut self, listeners: Listeners);
}

/// The set of listeners an overlay currently holds on its host.
///
/// All installs and removals go through [`ListenerSet::sync`], which only issues
/// the difference between what is installed and what is wanted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ListenerSet {
    installed: Listeners,
}

impl ListenerSet {
    pub(crate) fn installed(&self) -> Listeners {
        self.installed
    }

    pub(crate) fn sync(&mut self, host: &mut impl Host, wanted: Listeners) {
        let remove = self.installed.difference(wanted);
        let add = wanted.difference(self.installed);
        if !remove.is_empty() {
            host.unsubscribe(remove);
            tracing::trace!(?remove, "listeners removed");
        }
        if !add.is_empty() {
            host.subscribe(add);
            tracing::trace!(?add, "listeners installed");
        }
        self.installed = wanted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    #[test]
    fn sync_issues_only_the_difference() {
        let mut host = FakeHost::new();
        let mut set = ListenerSet::default();

        set.sync(&mut host, Listeners::DISMISSAL);
        assert_eq!(host.listeners, Listeners::DISMISSAL);
        assert_eq!(host.subscribe_calls, 1);

        set.sync(&mut host, Listeners::DISMISSAL | Listeners::TRACKING);
        assert_eq!(host.listeners, Listeners::all());
        assert_eq!(host.subscribe_calls, 2);

        // Already in the wanted state: no host traffic.
        set.sync(&mut host, Listeners::all());
        assert_eq!(host.subscribe_calls, 2);
        assert_eq!(host.unsubscribe_calls, 0);

        set.sync(&mut host, Listeners::empty());
        assert!(host.listeners.is_empty());
        assert!(set.installed().is_empty());
        assert_eq!(host.unsubscribe_calls, 1);
    }

    #[test]
    fn groups_partition_all_listeners() {
        assert!(!Listeners::TRACKING.intersects(Listeners::DISMISSAL));
        assert_eq!(Listeners::TRACKING | Listeners::DISMISSAL, Listeners::all());
    }
}
