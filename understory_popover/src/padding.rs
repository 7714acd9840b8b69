// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping the overlay away from the viewport edges.

use crate::alignment::Alignment;
use crate::anchor::AnchorFrame;
use crate::rect::PixelInsets;
use crate::target::Target;

/// Runs the inner alignment against a viewport shrunk by the given padding.
///
/// Start and end padding resolve to left and right through the anchor's
/// direction. The inner alignment receives a derived [`AnchorFrame`]; the
/// caller's frame is never modified, so nothing needs restoring afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowPadding<A> {
    inner: A,
    start: i32,
    end: i32,
    top: i32,
    bottom: i32,
}

impl<A: Alignment> WindowPadding<A> {
    /// Wraps `inner` with per-edge padding.
    #[must_use]
    pub fn new(inner: A, start: i32, end: i32, top: i32, bottom: i32) -> Self {
        Self {
            inner,
            start,
            end,
            top,
            bottom,
        }
    }

    /// Wraps `inner` with the same padding on every edge.
    #[must_use]
    pub fn all(inner: A, padding: i32) -> Self {
        Self::new(inner, padding, padding, padding, padding)
    }

    /// The wrapped alignment.
    #[must_use]
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Physical insets for the given frame's direction.
    #[must_use]
    pub fn insets(&self, anchor: &AnchorFrame) -> PixelInsets {
        let (left, right) = anchor.direction().to_physical(self.start, self.end);
        PixelInsets::new(left, self.top, right, self.bottom)
    }
}

impl<A: Alignment> Alignment for WindowPadding<A> {
    fn compute(&self, anchor: &AnchorFrame, target: &mut Target) {
        let viewport = anchor.viewport_rect().inset_by(self.insets(anchor));
        self.inner.compute(&anchor.with_viewport(viewport), target);
    }
}
