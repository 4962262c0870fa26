// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic host for unit tests: frames and timers queue up until a test
//! delivers them.

use alloc::vec::Vec;

use kurbo::{Rect, Size};

use crate::host::{Host, Listeners};
use crate::ids::{FrameId, TimerId};

#[derive(Debug)]
pub(crate) struct FakeHost {
    pub(crate) viewport: Size,
    pub(crate) trigger: Option<Rect>,
    pub(crate) content: Option<Size>,
    pub(crate) frames: Vec<FrameId>,
    pub(crate) timers: Vec<(TimerId, u64)>,
    pub(crate) listeners: Listeners,
    pub(crate) frame_requests: usize,
    pub(crate) subscribe_calls: usize,
    pub(crate) unsubscribe_calls: usize,
}

impl FakeHost {
    /// Trigger `{100, 100, 40x20}`, content `200x80`, viewport `1000x800`.
    pub(crate) fn new() -> Self {
        Self {
            viewport: Size::new(1000.0, 800.0),
            trigger: Some(Rect::from_origin_size((100.0, 100.0), (40.0, 20.0))),
            content: Some(Size::new(200.0, 80.0)),
            frames: Vec::new(),
            timers: Vec::new(),
            listeners: Listeners::empty(),
            frame_requests: 0,
            subscribe_calls: 0,
            unsubscribe_calls: 0,
        }
    }

    /// Remove and return the oldest pending frame, as a paint would.
    pub(crate) fn take_frame(&mut self) -> Option<FrameId> {
        (!self.frames.is_empty()).then(|| self.frames.remove(0))
    }

    /// Remove and return the oldest pending timer.
    pub(crate) fn take_timer(&mut self) -> Option<TimerId> {
        (!self.timers.is_empty()).then(|| self.timers.remove(0).0)
    }
}

impl Host for FakeHost {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn trigger_rect(&self) -> Option<Rect> {
        self.trigger
    }

    fn content_size(&self) -> Option<Size> {
        self.content
    }

    fn request_frame(&mut self, id: FrameId) {
        self.frame_requests += 1;
        self.frames.push(id);
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.retain(|f| *f != id);
    }

    fn set_timeout(&mut self, id: TimerId, delay_ms: u64) {
        self.timers.push((id, delay_ms));
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.retain(|(t, _)| *t != id);
    }

    fn subscribe(&mut self, listeners: Listeners) {
        assert!(
            !self.listeners.intersects(listeners),
            "double subscribe: {listeners:?} while holding {:?}",
            self.listeners
        );
        self.subscribe_calls += 1;
        self.listeners.insert(listeners);
    }

    fn unsubscribe(&mut self, listeners: Listeners) {
        assert!(
            self.listeners.contains(listeners),
            "unsubscribe of {listeners:?} not held"
        );
        self.unsubscribe_calls += 1;
        self.listeners.remove(listeners);
    }
}
