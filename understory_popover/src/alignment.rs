// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The alignment strategy interface and its combinators.

use alloc::boxed::Box;
use core::fmt;

use crate::anchor::AnchorFrame;
use crate::margin::AnchorMargin;
use crate::padding::WindowPadding;
use crate::shadow::{ShadowInset, ShadowStyle};
use crate::target::Target;

/// Pass limit used by the engine and by iterating decorators unless
/// configured otherwise.
pub const DEFAULT_MAX_PASSES: usize = 8;

/// A rule that moves and resizes [`Target::rect`] relative to an anchor.
///
/// On entry the target rectangle has the measured content size with its
/// top-left corner at the anchor's bottom-left corner. Implementations adjust
/// it in place. Rules are relative: they offset whatever rectangle they are
/// given rather than rebuilding it from the anchor, which is what lets
/// decorators such as [`AnchorMargin`] steer them by moving the input.
///
/// Anything that changes content size (for example the side an arrow is drawn
/// on) must be followed by [`Target::mark_needs_remeasure`].
pub trait Alignment: fmt::Debug {
    /// Applies the rule.
    fn compute(&self, anchor: &AnchorFrame, target: &mut Target);
}

impl<A: Alignment + ?Sized> Alignment for &A {
    fn compute(&self, anchor: &AnchorFrame, target: &mut Target) {
        (**self).compute(anchor, target);
    }
}

impl<A: Alignment + ?Sized> Alignment for Box<A> {
    fn compute(&self, anchor: &AnchorFrame, target: &mut Target) {
        (**self).compute(anchor, target);
    }
}

/// Wraps a closure as an [`Alignment`].
///
/// ```rust
/// use understory_popover::{Alignment, AnchorFrame, Direction, PixelRect, Target, from_fn};
///
/// // Always sit 4px to the right of where we were seeded.
/// let nudge = from_fn(|_anchor: &AnchorFrame, target: &mut Target| {
///     target.rect = target.rect.offset(4, 0);
/// });
///
/// let frame = AnchorFrame::new(
///     PixelRect::new(0, 0, 10, 10),
///     PixelRect::new(0, 0, 100, 100),
///     Direction::Ltr,
/// );
/// let mut target = Target::new();
/// target.rect = PixelRect::new(0, 10, 20, 20);
/// nudge.compute(&frame, &mut target);
/// assert_eq!(target.rect.left, 4);
/// ```
pub fn from_fn<F>(f: F) -> FnAlignment<F>
where
    F: Fn(&AnchorFrame, &mut Target),
{
    FnAlignment(f)
}

/// [`Alignment`] returned by [`from_fn`].
pub struct FnAlignment<F>(F);

impl<F> fmt::Debug for FnAlignment<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAlignment").finish_non_exhaustive()
    }
}

impl<F> Alignment for FnAlignment<F>
where
    F: Fn(&AnchorFrame, &mut Target),
{
    fn compute(&self, anchor: &AnchorFrame, target: &mut Target) {
        (self.0)(anchor, target);
    }
}

/// Decorator combinators available on every [`Alignment`].
pub trait AlignmentExt: Alignment + Sized {
    /// Keeps the result at least `margin` pixels away from the anchor.
    fn with_anchor_margin(self, margin: i32) -> AnchorMargin<Self> {
        AnchorMargin::new(self, margin)
    }

    /// Keeps the result `padding` pixels away from every viewport edge.
    fn with_window_padding(self, padding: i32) -> WindowPadding<Self> {
        WindowPadding::all(self, padding)
    }

    /// Positions the content box inside a shadow/arrow frame.
    fn with_shadow(self, style: ShadowStyle) -> ShadowInset<Self> {
        ShadowInset::new(self, style)
    }
}

impl<A: Alignment> AlignmentExt for A {}
