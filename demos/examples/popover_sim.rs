// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted popover session against a simulated window.
//!
//! The simulated host lays the panel out late (it measures 0x0 for the first two
//! paints), so the overlay retries before revealing it. The script then scrolls
//! the page, dismisses with Escape, re-opens inside the close grace period, and
//! finally dismisses with a click outside.
//!
//! Run:
//! - `cargo run -p tether_demos --example popover_sim`
//! - `RUST_LOG=trace cargo run -p tether_demos --example popover_sim` for every
//!   frame and listener change.

use kurbo::{Point, Rect, Size, Vec2};
use tether_overlay::{
    DismissEvent, DismissHandlers, FrameId, Host, IdSource, Key, Listeners, Overlay,
    OverlayConfig, TimerId,
};
use tether_placement::{Align, PlacementRequest, Side};
use tracing_subscriber::EnvFilter;

/// A window with one trigger button and one panel.
#[derive(Debug)]
struct SimWindow {
    viewport: Size,
    trigger: Rect,
    panel: Size,
    /// Paints before the panel gets a layout.
    layout_after: u32,
    paints: u32,
    now_ms: u64,
    frames: Vec<FrameId>,
    timers: Vec<(TimerId, u64)>,
    listeners: Listeners,
}

impl SimWindow {
    fn new() -> Self {
        Self {
            viewport: Size::new(800.0, 600.0),
            trigger: Rect::from_origin_size((360.0, 500.0), (80.0, 28.0)),
            panel: Size::new(240.0, 120.0),
            layout_after: 2,
            paints: 0,
            now_ms: 0,
            frames: Vec::new(),
            timers: Vec::new(),
            listeners: Listeners::empty(),
        }
    }

    /// Deliver every requested frame, one paint at a time, until none are left.
    fn paint(&mut self, overlay: &mut Overlay) {
        while !self.frames.is_empty() {
            let id = self.frames.remove(0);
            self.paints += 1;
            if let Some(t) = overlay.on_frame(self, id) {
                tracing::info!(paint = self.paints, from = ?t.from, to = ?t.to, "transition");
            }
        }
    }

    /// Let `ms` pass and fire any timer that came due.
    fn advance(&mut self, overlay: &mut Overlay, ms: u64) {
        self.now_ms += ms;
        let now = self.now_ms;
        let (due, pending): (Vec<_>, Vec<_>) = self.timers.drain(..).partition(|(_, at)| *at <= now);
        self.timers = pending;
        for (id, _) in due {
            if let Some(t) = overlay.on_timer(self, id) {
                tracing::info!(now_ms = now, from = ?t.from, to = ?t.to, "transition");
            }
        }
    }

    fn scroll_by(&mut self, overlay: &mut Overlay, dy: f64) {
        self.trigger = self.trigger - Vec2::new(0.0, dy);
        if self.listeners.contains(Listeners::SCROLL) {
            overlay.on_scroll(self);
        }
    }
}

impl Host for SimWindow {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn trigger_rect(&self) -> Option<Rect> {
        Some(self.trigger)
    }

    fn content_size(&self) -> Option<Size> {
        if self.paints <= self.layout_after {
            Some(Size::ZERO)
        } else {
            Some(self.panel)
        }
    }

    fn request_frame(&mut self, id: FrameId) {
        tracing::trace!(frame = id.get(), "frame requested");
        self.frames.push(id);
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.retain(|f| *f != id);
    }

    fn set_timeout(&mut self, id: TimerId, delay_ms: u64) {
        self.timers.push((id, self.now_ms + delay_ms));
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.retain(|(t, _)| *t != id);
    }

    fn subscribe(&mut self, listeners: Listeners) {
        tracing::trace!(?listeners, "subscribe");
        self.listeners |= listeners;
    }

    fn unsubscribe(&mut self, listeners: Listeners) {
        tracing::trace!(?listeners, "unsubscribe");
        self.listeners -= listeners;
    }
}

fn report(overlay: &Overlay) {
    match overlay.revealed_placement() {
        Some(p) => tracing::info!(
            phase = ?overlay.phase(),
            top = p.top,
            left = p.left,
            side = ?p.side,
            origin = ?overlay.transform_origin(),
            "panel shown"
        ),
        None => tracing::info!(phase = ?overlay.phase(), "panel hidden"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tether_overlay=debug")),
        )
        .with_target(false)
        .init();

    let mut ids = IdSource::new();
    let config = OverlayConfig::new(
        PlacementRequest::new(Side::Bottom, Align::Center).with_side_offset(6.0),
    );
    let handlers = DismissHandlers::default().with_on_interact_outside(|ev: &mut DismissEvent| {
        tracing::info!(reason = ?ev.reason(), "outside interaction");
    });
    let mut overlay = Overlay::new(config, &mut ids).with_handlers(handlers);
    let mut window = SimWindow::new();
    tracing::info!(content = %overlay.content_id(), "created");

    tracing::info!("== open: the panel has no layout for two paints ==");
    overlay.open(&mut window);
    report(&overlay);
    window.paint(&mut overlay);
    tracing::info!(attempts = overlay.attempts(), "measured");
    // The trigger sits near the bottom edge, so the panel flips above it.
    report(&overlay);

    tracing::info!("== scroll the page by 300px ==");
    window.scroll_by(&mut overlay, 300.0);
    report(&overlay);

    tracing::info!("== Escape ==");
    overlay.on_key_down(&mut window, Key::Escape);
    report(&overlay);

    tracing::info!("== re-open 50ms into the grace period ==");
    window.advance(&mut overlay, 50);
    overlay.open(&mut window);
    window.paint(&mut overlay);
    report(&overlay);

    tracing::info!("== click outside ==");
    overlay.on_pointer_down(&mut window, Point::new(20.0, 20.0));
    report(&overlay);
    let delay = overlay.config().close_delay_ms;
    window.advance(&mut overlay, delay);
    report(&overlay);

    tracing::info!(listeners = ?window.listeners, pending_frames = window.frames.len(), "done");
}
