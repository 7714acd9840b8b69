// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay being positioned and its measurement hook.

use core::fmt;

use crate::rect::{PixelRect, PixelSize, Side};

/// Host layout system: measures overlay content under an upper bound.
///
/// Implementations must use "at most" semantics. The returned size may be
/// smaller than `max` but is never forced to equal it. The current
/// [`Decoration`] is passed along because content padding may depend on which
/// edge carries a pointer arrow.
pub trait Measure {
    /// Returns the natural size of the content, constrained to `max`.
    fn measure(&mut self, max: PixelSize, decoration: &Decoration) -> PixelSize;
}

/// Content with a fixed natural size.
impl Measure for PixelSize {
    fn measure(&mut self, max: PixelSize, _decoration: &Decoration) -> PixelSize {
        self.min(max)
    }
}

impl<M: Measure + ?Sized> Measure for &mut M {
    fn measure(&mut self, max: PixelSize, decoration: &Decoration) -> PixelSize {
        (**self).measure(max, decoration)
    }
}

/// Wraps a closure as a [`Measure`] implementation.
pub fn measure_fn<F>(f: F) -> MeasureFn<F>
where
    F: FnMut(PixelSize, &Decoration) -> PixelSize,
{
    MeasureFn(f)
}

/// [`Measure`] implementation returned by [`measure_fn`].
pub struct MeasureFn<F>(F);

impl<F> fmt::Debug for MeasureFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasureFn").finish_non_exhaustive()
    }
}

impl<F> Measure for MeasureFn<F>
where
    F: FnMut(PixelSize, &Decoration) -> PixelSize,
{
    fn measure(&mut self, max: PixelSize, decoration: &Decoration) -> PixelSize {
        (self.0)(max, decoration)
    }
}

/// Cosmetic shadow/arrow state recorded while aligning.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Decoration {
    /// Side of the anchor the overlay ended up on, if any.
    pub side: Option<Side>,
    /// Position of the pointer arrow along the facing edge, in pixels from
    /// the content's left (for top/bottom) or top (for left/right) edge.
    pub arrow_offset: i32,
    /// How far along the viewport the overlay landed, in `0.0..=1.0`.
    pub shadow_bias: f64,
}

/// The overlay's solved rectangle plus measurement state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Target {
    /// Working rectangle, rewritten by each alignment step.
    pub rect: PixelRect,
    /// Decoration state carried between passes and solves.
    pub decoration: Decoration,
    measured: PixelSize,
    needs_remeasure: bool,
}

impl Target {
    /// Creates a target with an empty rectangle and no decoration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Measures the content under `max` and records the result.
    ///
    /// The result is clamped into `0..=max` on each axis and the remeasure
    /// flag is cleared.
    pub fn pre_measure<M: Measure + ?Sized>(&mut self, measure: &mut M, max: PixelSize) {
        let max = PixelSize::new(max.width.max(0), max.height.max(0));
        self.measured = measure.measure(max, &self.decoration).min(max);
        self.needs_remeasure = false;
    }

    /// Size recorded by the last [`Target::pre_measure`].
    #[must_use]
    pub fn measured(&self) -> PixelSize {
        self.measured
    }

    /// Requests another measure pass before the rectangle is final.
    ///
    /// Alignments call this after changing anything that can affect content
    /// size.
    pub fn mark_needs_remeasure(&mut self) {
        self.needs_remeasure = true;
    }

    /// Returns `true` if the content must be measured again.
    #[must_use]
    pub fn needs_remeasure(&self) -> bool {
        self.needs_remeasure
    }

    pub(crate) fn clear_remeasure(&mut self) {
        self.needs_remeasure = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{Decoration, Target, measure_fn};
    use crate::rect::{PixelSize, Side};

    #[test]
    fn pre_measure_uses_at_most_semantics() {
        let mut target = Target::new();
        let mut content = PixelSize::new(120, 900);
        target.pre_measure(&mut content, PixelSize::new(400, 800));
        assert_eq!(target.measured(), PixelSize::new(120, 800));
    }

    #[test]
    fn pre_measure_clears_remeasure_flag() {
        let mut target = Target::new();
        target.mark_needs_remeasure();
        assert!(target.needs_remeasure());
        target.pre_measure(&mut PixelSize::new(10, 10), PixelSize::new(100, 100));
        assert!(!target.needs_remeasure());
    }

    #[test]
    fn oversized_or_negative_measurements_are_clamped() {
        let mut target = Target::new();
        let mut m = measure_fn(|max: PixelSize, _: &Decoration| {
            PixelSize::new(max.width + 50, -3)
        });
        target.pre_measure(&mut m, PixelSize::new(100, 100));
        assert_eq!(target.measured(), PixelSize::new(100, 0));
    }

    #[test]
    fn measure_sees_current_decoration() {
        let mut target = Target::new();
        target.decoration.side = Some(Side::Bottom);
        let mut m = measure_fn(|_: PixelSize, d: &Decoration| {
            if d.side.is_some() {
                PixelSize::new(50, 58)
            } else {
                PixelSize::new(50, 50)
            }
        });
        target.pre_measure(&mut m, PixelSize::new(400, 400));
        assert_eq!(target.measured().height, 58);
    }
}
