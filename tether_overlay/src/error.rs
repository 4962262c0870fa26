// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Why a measurement did not produce a placement.
//!
//! None of these reach the caller as a failure. Each maps to a local recovery:
//! transient errors retry on the next frame, the rest force the overlay closed.

/// Reason a sample of the trigger and content could not be used for placement.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum MeasureError {
    /// The trigger is no longer in the tree.
    #[error("trigger is no longer mounted")]
    AnchorDetached,
    /// The content node has not been mounted yet.
    #[error("content is not mounted yet")]
    ContentDetached,
    /// The content has not been laid out yet.
    #[error("content measured {width}x{height}, expected a non-zero area")]
    ZeroSized {
        /// Measured width.
        width: f64,
        /// Measured height.
        height: f64,
    },
    /// A configured frame cap ran out before the content had a size.
    #[error("content still had no size after {frames} frames")]
    FrameBudgetExhausted {
        /// Frames spent sampling.
        frames: u32,
    },
}

impl MeasureError {
    /// Whether waiting another frame can resolve this.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ContentDetached | Self::ZeroSized { .. })
    }
}
