// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimum distance between the overlay and its anchor.

use crate::alignment::{Alignment, DEFAULT_MAX_PASSES};
use crate::anchor::AnchorFrame;
use crate::rect::PixelRect;
use crate::target::Target;

/// Keeps the inner alignment's result at least `margin` pixels from the
/// anchor.
///
/// After each run of the inner alignment, the gap between the result and the
/// anchor edge it faces is measured on both axes. Any shortfall is added to an
/// offset applied to the incoming rectangle, and the inner alignment runs
/// again from there. This stops once no shortfall remains or after
/// `max_passes` runs, keeping the last result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnchorMargin<A> {
    inner: A,
    margin: i32,
    max_passes: usize,
}

impl<A: Alignment> AnchorMargin<A> {
    /// Wraps `inner` with the given margin.
    #[must_use]
    pub fn new(inner: A, margin: i32) -> Self {
        Self {
            inner,
            margin,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Overrides the pass limit. Zero is treated as one.
    #[must_use]
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// The wrapped alignment.
    #[must_use]
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

impl<A: Alignment> Alignment for AnchorMargin<A> {
    fn compute(&self, anchor: &AnchorFrame, target: &mut Target) {
        if self.margin <= 0 {
            self.inner.compute(anchor, target);
            return;
        }

        let seed = target.rect;
        let anchor_rect = anchor.anchor_rect();
        let (mut dx, mut dy) = (0, 0);
        let max_passes = self.max_passes.max(1);

        for pass in 1..=max_passes {
            target.rect = seed.offset(dx, dy);
            self.inner.compute(anchor, target);

            if target.rect.is_empty() {
                return;
            }
            let (gx, gy) = shortfall(target.rect, anchor_rect, self.margin);
            if gx == 0 && gy == 0 {
                return;
            }
            if pass == max_passes {
                tracing::warn!(
                    passes = max_passes,
                    margin = self.margin,
                    rect = ?target.rect,
                    "anchor margin did not settle"
                );
                return;
            }
            dx += gx;
            dy += gy;
        }
    }
}

/// Signed push needed on each axis to open the gap to `margin`.
fn shortfall(rect: PixelRect, anchor: PixelRect, margin: i32) -> (i32, i32) {
    let dx = if rect.right <= anchor.left {
        -((margin - (anchor.left - rect.right)).max(0))
    } else if rect.left >= anchor.right {
        (margin - (rect.left - anchor.right)).max(0)
    } else {
        0
    };
    let dy = if rect.bottom <= anchor.top {
        -((margin - (anchor.top - rect.bottom)).max(0))
    } else if rect.top >= anchor.bottom {
        (margin - (rect.top - anchor.bottom)).max(0)
    } else {
        0
    };
    (dx, dy)
}

#[cfg(test)]
mod tests {
    use super::{AnchorMargin, shortfall};
    use crate::alignment::{Alignment, AlignmentExt};
    use crate::anchor::AnchorFrame;
    use crate::rect::{Direction, PixelRect, PixelSize};
    use crate::relative::{Horizontal, RelativeAlignment, Vertical};
    use crate::target::Target;

    fn run(rule: &impl Alignment, anchor: PixelRect, viewport: PixelRect, size: PixelSize) -> PixelRect {
        let frame = AnchorFrame::new(anchor, viewport, Direction::Ltr);
        let mut target = Target::new();
        target.rect = PixelRect::from_origin_size(anchor.left, anchor.bottom, size);
        rule.compute(&frame, &mut target);
        target.rect
    }

    #[test]
    fn pushes_below_placement_down() {
        let rule = RelativeAlignment::new(Vertical::below(), Horizontal::align_end())
            .with_anchor_margin(8);
        let r = run(
            &rule,
            PixelRect::new(100, 200, 180, 240),
            PixelRect::new(0, 0, 400, 800),
            PixelSize::new(120, 100),
        );
        assert_eq!(r, PixelRect::new(60, 248, 180, 348));
    }

    #[test]
    fn pushes_above_placement_up() {
        let rule = RelativeAlignment::new(Vertical::above(), Horizontal::align_start())
            .with_anchor_margin(8);
        let r = run(
            &rule,
            PixelRect::new(100, 200, 180, 240),
            PixelRect::new(0, 0, 400, 800),
            PixelSize::new(120, 100),
        );
        assert_eq!((r.top, r.bottom), (92, 192));
    }

    #[test]
    fn pushes_side_placement_on_both_axes() {
        let rule = RelativeAlignment::new(Vertical::below(), Horizontal::to_right())
            .with_anchor_margin(5);
        let r = run(
            &rule,
            PixelRect::new(100, 200, 180, 240),
            PixelRect::new(0, 0, 400, 800),
            PixelSize::new(50, 50),
        );
        assert_eq!(r, PixelRect::new(185, 245, 235, 295));
    }

    #[test]
    fn existing_gap_is_left_alone() {
        let rule = RelativeAlignment::new(Vertical::below().with_spacing(20), Horizontal::align_start())
            .with_anchor_margin(8);
        let r = run(
            &rule,
            PixelRect::new(100, 200, 180, 240),
            PixelRect::new(0, 0, 400, 800),
            PixelSize::new(50, 50),
        );
        assert_eq!(r.top, 260);
    }

    #[test]
    fn pinned_by_viewport_stops_at_pass_limit() {
        // Below is forced and the viewport ends right under the anchor, so the
        // clamp keeps undoing the push.
        let rule = AnchorMargin::new(
            RelativeAlignment::new(Vertical::below(), Horizontal::align_start()),
            10,
        )
        .with_max_passes(3);
        let r = run(
            &rule,
            PixelRect::new(100, 200, 180, 240),
            PixelRect::new(0, 0, 400, 290),
            PixelSize::new(50, 50),
        );
        assert_eq!((r.top, r.bottom), (240, 290));
    }

    #[test]
    fn shortfall_is_zero_when_overlapping() {
        let anchor = PixelRect::new(100, 100, 200, 200);
        assert_eq!(shortfall(PixelRect::new(150, 150, 250, 250), anchor, 10), (0, 0));
        assert_eq!(shortfall(PixelRect::new(0, 203, 50, 250), anchor, 10), (0, 7));
        assert_eq!(shortfall(PixelRect::new(0, 0, 98, 100), anchor, 10), (-8, -10));
    }
}
