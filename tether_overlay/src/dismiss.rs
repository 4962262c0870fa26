// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismissal gestures and the handlers that may intercept them.
//!
//! A gesture becomes a [`DismissEvent`] that is handed to the matching handler and
//! then to `on_interact_outside` for the two "outside" gestures. Handlers mark the
//! event with [`DismissEvent::prevent_default`] to keep the panel open; the
//! overlay closes only when no handler did.
//!
//! ```
//! use kurbo::Point;
//! use tether_overlay::{DismissEvent, DismissHandlers, DismissReason};
//!
//! let mut handlers = DismissHandlers::default()
//!     .with_on_pointer_down_outside(|ev: &mut DismissEvent| {
//!         // Clicks in the left gutter do not dismiss.
//!         if let DismissReason::PointerDownOutside { at } = ev.reason() {
//!             if at.x < 50.0 {
//!                 ev.prevent_default();
//!             }
//!         }
//!     });
//!
//! assert!(!handlers.dispatch(DismissReason::PointerDownOutside { at: Point::new(10.0, 10.0) }));
//! assert!(handlers.dispatch(DismissReason::PointerDownOutside { at: Point::new(90.0, 10.0) }));
//! assert!(handlers.dispatch(DismissReason::EscapeKey));
//! ```

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Rect};

use crate::config::OverlayConfig;
use crate::host::Listeners;
use crate::phase::Phase;

/// Keys the overlay distinguishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The Escape key.
    Escape,
    /// Any other key.
    Other,
}

/// Where focus went, relative to the trigger and the panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// The trigger, the panel, or something inside either.
    Inside,
    /// Anywhere else.
    Outside,
}

/// The gesture that asked for the panel to close.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DismissReason {
    /// Escape was pressed.
    EscapeKey,
    /// A pointer went down outside the trigger and the panel.
    PointerDownOutside {
        /// Pointer position in viewport coordinates.
        at: Point,
    },
    /// Focus moved outside the trigger and the panel.
    FocusOutside,
}

impl DismissReason {
    /// Whether this gesture happened outside the trigger and the panel.
    pub fn is_outside(&self) -> bool {
        matches!(self, Self::PointerDownOutside { .. } | Self::FocusOutside)
    }
}

/// A dismissal gesture in flight.
#[derive(Clone, Debug)]
pub struct DismissEvent {
    reason: DismissReason,
    default_prevented: bool,
}

impl DismissEvent {
    pub(crate) fn new(reason: DismissReason) -> Self {
        Self {
            reason,
            default_prevented: false,
        }
    }

    /// The gesture.
    pub fn reason(&self) -> DismissReason {
        self.reason
    }

    /// Keep the panel open.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler has kept the panel open.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Interception callback for a dismissal gesture.
pub type DismissHandler = Box<dyn FnMut(&mut DismissEvent)>;

/// Optional handlers consulted before a gesture closes the panel.
#[derive(Default)]
pub struct DismissHandlers {
    /// Escape pressed while the panel is open.
    pub on_escape_key_down: Option<DismissHandler>,
    /// Pointer down outside the trigger and the panel.
    pub on_pointer_down_outside: Option<DismissHandler>,
    /// Focus moved outside the trigger and the panel.
    pub on_focus_outside: Option<DismissHandler>,
    /// Runs after either of the two "outside" handlers, on the same event.
    pub on_interact_outside: Option<DismissHandler>,
}

impl fmt::Debug for DismissHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissHandlers")
            .field("on_escape_key_down", &self.on_escape_key_down.is_some())
            .field("on_pointer_down_outside", &self.on_pointer_down_outside.is_some())
            .field("on_focus_outside", &self.on_focus_outside.is_some())
            .field("on_interact_outside", &self.on_interact_outside.is_some())
            .finish()
    }
}

impl DismissHandlers {
    /// Set the Escape handler.
    #[must_use]
    pub fn with_on_escape_key_down(mut self, f: impl FnMut(&mut DismissEvent) + 'static) -> Self {
        self.on_escape_key_down = Some(Box::new(f));
        self
    }

    /// Set the outside pointer-down handler.
    #[must_use]
    pub fn with_on_pointer_down_outside(
        mut self,
        f: impl FnMut(&mut DismissEvent) + 'static,
    ) -> Self {
        self.on_pointer_down_outside = Some(Box::new(f));
        self
    }

    /// Set the focus-outside handler.
    #[must_use]
    pub fn with_on_focus_outside(mut self, f: impl FnMut(&mut DismissEvent) + 'static) -> Self {
        self.on_focus_outside = Some(Box::new(f));
        self
    }

    /// Set the handler shared by both "outside" gestures.
    #[must_use]
    pub fn with_on_interact_outside(mut self, f: impl FnMut(&mut DismissEvent) + 'static) -> Self {
        self.on_interact_outside = Some(Box::new(f));
        self
    }

    /// Run the handlers for `reason`. Returns `true` when the panel should close.
    pub fn dispatch(&mut self, reason: DismissReason) -> bool {
        let mut event = DismissEvent::new(reason);
        let first = match reason {
            DismissReason::EscapeKey => &mut self.on_escape_key_down,
            DismissReason::PointerDownOutside { .. } => &mut self.on_pointer_down_outside,
            DismissReason::FocusOutside => &mut self.on_focus_outside,
        };
        if let Some(handler) = first {
            handler(&mut event);
        }
        if reason.is_outside() {
            if let Some(handler) = &mut self.on_interact_outside {
                handler(&mut event);
            }
        }
        !event.is_default_prevented()
    }
}

/// Dismissal listeners an overlay in `phase` should hold.
pub(crate) fn dismissal_listeners(phase: Phase, config: &OverlayConfig) -> Listeners {
    let mut wanted = Listeners::empty();
    if phase.accepts_dismissal() {
        wanted.set(Listeners::KEY_DOWN, config.dismiss_on_escape);
        wanted.set(Listeners::POINTER_DOWN, config.dismiss_on_outside_pointer);
        wanted.set(Listeners::FOCUS_IN, config.dismiss_on_focus_outside);
    }
    wanted
}

/// Whether `at` lies outside both the trigger and the panel.
///
/// A missing rectangle counts as empty.
pub(crate) fn is_outside(at: Point, trigger: Option<Rect>, content: Option<Rect>) -> bool {
    let inside = |r: Option<Rect>| r.is_some_and(|r| r.contains(at));
    !inside(trigger) && !inside(content)
}
