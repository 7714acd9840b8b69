// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shadow and pointer-arrow inset correction.
//!
//! A decorated overlay's window is larger than its visible content: a shadow
//! surrounds it, and a pointer arrow sticks out of the edge that faces the
//! anchor. [`ShadowInset`] lets the inner alignment position the content box
//! and grows the result back out to window bounds. Because the arrow edge
//! depends on where the content lands, the insets are recomputed until they
//! stop changing.

use crate::alignment::{Alignment, DEFAULT_MAX_PASSES};
use crate::anchor::AnchorFrame;
use crate::rect::{PixelInsets, PixelRect, Side};
use crate::target::{Decoration, Target};

/// Size of the shadow and arrow around the content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShadowStyle {
    /// Shadow extent on each edge of the content.
    pub shadow: PixelInsets,
    /// How far the arrow protrudes from the edge facing the anchor.
    pub arrow: i32,
}

impl ShadowStyle {
    /// Uniform shadow with an arrow of the given length.
    #[must_use]
    pub const fn new(shadow: i32, arrow: i32) -> Self {
        Self {
            shadow: PixelInsets::uniform(shadow),
            arrow,
        }
    }

    /// Window insets around the content when it sits on `side` of the anchor.
    ///
    /// The arrow is added to the content edge facing the anchor, which is the
    /// opposite of `side`. With no side there is no arrow.
    #[must_use]
    pub fn insets(&self, side: Option<Side>) -> PixelInsets {
        let mut insets = self.shadow;
        match side {
            Some(Side::Bottom) => insets.top += self.arrow,
            Some(Side::Top) => insets.bottom += self.arrow,
            Some(Side::Right) => insets.left += self.arrow,
            Some(Side::Left) => insets.right += self.arrow,
            None => {}
        }
        insets
    }
}

/// Positions the content box of a shadowed overlay, then reports the window
/// bounds.
///
/// Each pass shrinks the incoming rectangle's size by the current insets
/// (keeping its top-left corner), runs the inner alignment on that content
/// box, and classifies which side of the anchor it landed on. A side change is
/// recorded in [`Target::decoration`] and requests a remeasure, since the
/// arrow changes content padding. The content box is then grown by the insets
/// used for the pass. Passes repeat until the insets for the new side equal
/// the ones just used, or `max_passes` is reached.
///
/// The inner alignment sees the viewport shrunk by the same insets, so a
/// clamped content box grows back into a window that still fits the viewport.
/// An empty content box is passed through unchanged and clears the
/// decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShadowInset<A> {
    inner: A,
    style: ShadowStyle,
    max_passes: usize,
}

impl<A: Alignment> ShadowInset<A> {
    /// Wraps `inner` with the given shadow style.
    #[must_use]
    pub fn new(inner: A, style: ShadowStyle) -> Self {
        Self {
            inner,
            style,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Overrides the pass limit. Zero is treated as one.
    #[must_use]
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// The shadow style.
    #[must_use]
    pub fn style(&self) -> ShadowStyle {
        self.style
    }

    /// The wrapped alignment.
    #[must_use]
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

impl<A: Alignment> Alignment for ShadowInset<A> {
    fn compute(&self, anchor: &AnchorFrame, target: &mut Target) {
        let seed = target.rect;
        let anchor_rect = anchor.anchor_rect();
        let viewport = anchor.viewport_rect();
        let max_passes = self.max_passes.max(1);

        for pass in 1..=max_passes {
            let insets = self.style.insets(target.decoration.side);
            target.rect = seed.with_size(seed.size().shrink(insets));
            self.inner.compute(&anchor.with_viewport(viewport.inset_by(insets)), target);

            let content = target.rect;
            if content.is_empty() {
                // No room; growing by the insets would hide that from the host.
                if target.decoration.side.is_some() {
                    target.mark_needs_remeasure();
                }
                target.decoration = Decoration::default();
                return;
            }
            let side = Side::of(content, anchor_rect);
            if side != target.decoration.side {
                tracing::trace!(from = ?target.decoration.side, to = ?side, pass, "arrow side changed");
                target.decoration.side = side;
                target.mark_needs_remeasure();
            }
            target.decoration.arrow_offset = arrow_offset(content, anchor_rect, side);
            target.decoration.shadow_bias = shadow_bias(content, viewport, side);
            target.rect = content.outset_by(insets);

            if self.style.insets(side) == insets {
                return;
            }
            if pass == max_passes {
                tracing::warn!(
                    passes = max_passes,
                    side = ?side,
                    "shadow insets did not settle"
                );
            }
        }
    }
}

/// Arrow position along the facing edge, pointing at the anchor's center and
/// kept within the content box.
fn arrow_offset(content: PixelRect, anchor: PixelRect, side: Option<Side>) -> i32 {
    match side {
        Some(side) if side.is_vertical() => {
            (anchor.center_x() - content.left).clamp(0, content.width())
        }
        Some(_) => (anchor.center_y() - content.top).clamp(0, content.height()),
        None => 0,
    }
}

/// Where the content landed within the viewport along the facing axis, as a
/// fraction in `0.0..=1.0`. Zero-sized viewports give `0.0`.
fn shadow_bias(content: PixelRect, viewport: PixelRect, side: Option<Side>) -> f64 {
    let (offset, extent) = match side {
        Some(Side::Left | Side::Right) => (content.left - viewport.left, viewport.width()),
        _ => (content.top - viewport.top, viewport.height()),
    };
    if extent <= 0 {
        return 0.0;
    }
    (f64::from(offset) / f64::from(extent)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::{ShadowInset, ShadowStyle, arrow_offset, shadow_bias};
    use crate::alignment::{Alignment, AlignmentExt, from_fn};
    use crate::anchor::AnchorFrame;
    use crate::rect::{Direction, PixelInsets, PixelRect, PixelSize, Side};
    use crate::relative::{Horizontal, RelativeAlignment, Vertical};
    use crate::target::{Decoration, Target};

    const VIEWPORT: PixelRect = PixelRect {
        left: 0,
        top: 0,
        right: 400,
        bottom: 800,
    };
    const ANCHOR: PixelRect = PixelRect {
        left: 100,
        top: 200,
        right: 180,
        bottom: 240,
    };

    fn seeded(size: PixelSize) -> Target {
        let mut target = Target::new();
        target.rect = PixelRect::from_origin_size(ANCHOR.left, ANCHOR.bottom, size);
        target
    }

    #[test]
    fn insets_add_arrow_on_the_facing_edge() {
        let style = ShadowStyle::new(4, 8);
        assert_eq!(style.insets(None), PixelInsets::uniform(4));
        assert_eq!(style.insets(Some(Side::Bottom)), PixelInsets::new(4, 12, 4, 4));
        assert_eq!(style.insets(Some(Side::Top)), PixelInsets::new(4, 4, 4, 12));
        assert_eq!(style.insets(Some(Side::Right)), PixelInsets::new(12, 4, 4, 4));
        assert_eq!(style.insets(Some(Side::Left)), PixelInsets::new(4, 4, 12, 4));
    }

    #[test]
    fn first_solve_records_side_and_requests_remeasure() {
        let rule = RelativeAlignment::new(Vertical::below(), Horizontal::align_start())
            .with_shadow(ShadowStyle::new(4, 8));
        let frame = AnchorFrame::new(ANCHOR, VIEWPORT, Direction::Ltr);
        // Measured with the shadow only (no side known yet).
        let mut target = seeded(PixelSize::new(128, 108));
        rule.compute(&frame, &mut target);

        assert_eq!(target.decoration.side, Some(Side::Bottom));
        assert!(target.needs_remeasure());
        // Second pass uses the arrow insets: content is 120x92 flush below
        // the anchor, window grows by (4, 12, 4, 4).
        assert_eq!(target.rect, PixelRect::new(96, 228, 224, 336));
    }

    #[test]
    fn stable_side_does_not_request_remeasure() {
        let rule = RelativeAlignment::new(Vertical::below(), Horizontal::align_start())
            .with_shadow(ShadowStyle::new(4, 8));
        let frame = AnchorFrame::new(ANCHOR, VIEWPORT, Direction::Ltr);
        let mut target = seeded(PixelSize::new(128, 116));
        target.decoration.side = Some(Side::Bottom);
        rule.compute(&frame, &mut target);

        assert!(!target.needs_remeasure());
        // Content box 120x100 at (100, 240).
        assert_eq!(target.rect, PixelRect::new(96, 228, 224, 344));
        assert_eq!(target.decoration.arrow_offset, 40);
    }

    #[test]
    fn above_placement_puts_arrow_below_content() {
        let rule = RelativeAlignment::default().with_shadow(ShadowStyle::new(0, 10));
        let anchor = PixelRect::new(100, 700, 180, 760);
        let frame = AnchorFrame::new(anchor, VIEWPORT, Direction::Ltr);
        let mut target = Target::new();
        target.rect = PixelRect::from_origin_size(100, 760, PixelSize::new(50, 110));
        target.decoration.side = Some(Side::Top);
        rule.compute(&frame, &mut target);

        assert_eq!(target.decoration.side, Some(Side::Top));
        // Content 50x100 sits above the anchor; arrow adds 10 below it.
        assert_eq!(target.rect, PixelRect::new(100, 600, 150, 710));
    }

    #[test]
    fn overlapping_content_has_no_side() {
        let overlap = from_fn(|anchor: &AnchorFrame, target: &mut Target| {
            let a = anchor.anchor_rect();
            target.rect = target.rect.offset(0, -a.height());
        });
        let rule = ShadowInset::new(overlap, ShadowStyle::new(2, 6));
        let frame = AnchorFrame::new(ANCHOR, VIEWPORT, Direction::Ltr);
        let mut target = seeded(PixelSize::new(40, 40));
        rule.compute(&frame, &mut target);
        assert_eq!(target.decoration.side, None);
        assert!(!target.needs_remeasure());
        assert_eq!(target.decoration.arrow_offset, 0);
    }

    #[test]
    fn oscillating_inner_rule_is_capped() {
        // Goes above whenever the last recorded side was below, and below
        // otherwise, so the arrow edge never settles.
        let flip = from_fn(|anchor: &AnchorFrame, target: &mut Target| {
            if target.decoration.side == Some(Side::Bottom) {
                let h = target.rect.height();
                target.rect = target.rect.offset(0, -(h + anchor.height()));
            }
        });
        let rule = ShadowInset::new(flip, ShadowStyle::new(0, 1)).with_max_passes(5);
        let frame = AnchorFrame::new(ANCHOR, VIEWPORT, Direction::Ltr);
        let mut target = seeded(PixelSize::new(40, 40));
        rule.compute(&frame, &mut target);
        assert!(target.needs_remeasure());
        assert!(!target.rect.is_empty());
    }

    #[test]
    fn empty_content_stays_empty() {
        let rule = RelativeAlignment::default().with_shadow(ShadowStyle::new(4, 8));
        let frame = AnchorFrame::detached();
        let mut target = Target::new();
        rule.compute(&frame, &mut target);
        assert!(target.rect.is_empty());
        assert_eq!(target.decoration.side, None);
        assert!(!target.needs_remeasure());
    }

    #[test]
    fn collapsing_to_empty_clears_a_previous_side() {
        let rule = RelativeAlignment::default().with_shadow(ShadowStyle::new(4, 8));
        let mut target = Target::new();
        target.decoration = Decoration {
            side: Some(Side::Bottom),
            arrow_offset: 40,
            shadow_bias: 0.3,
        };
        rule.compute(&AnchorFrame::detached(), &mut target);
        assert!(target.rect.is_empty());
        assert_eq!(target.decoration, Decoration::default());
        assert!(target.needs_remeasure());
    }

    #[test]
    fn window_stays_inside_the_viewport() {
        let rule = RelativeAlignment::default().with_shadow(ShadowStyle::new(4, 8));
        let corners = [
            PixelRect::new(0, 0, 10, 10),
            PixelRect::new(390, 0, 400, 10),
            PixelRect::new(0, 790, 10, 800),
            PixelRect::new(390, 790, 400, 800),
        ];
        for anchor in corners {
            let frame = AnchorFrame::new(anchor, VIEWPORT, Direction::Ltr);
            for size in [PixelSize::new(400, 800), PixelSize::new(300, 500)] {
                let mut target = Target::new();
                target.rect = PixelRect::from_origin_size(anchor.left, anchor.bottom, size);
                rule.compute(&frame, &mut target);
                assert!(
                    VIEWPORT.contains_rect(target.rect),
                    "{:?} escaped for anchor {anchor:?} size {size:?}",
                    target.rect
                );
            }
        }
    }

    #[test]
    fn bias_guards_zero_viewports() {
        let content = PixelRect::new(10, 20, 30, 40);
        assert_eq!(shadow_bias(content, PixelRect::EMPTY, Some(Side::Bottom)), 0.0);
        assert_eq!(shadow_bias(content, PixelRect::EMPTY, Some(Side::Left)), 0.0);
        let bias = shadow_bias(PixelRect::new(0, 200, 10, 300), VIEWPORT, Some(Side::Bottom));
        assert!((bias - 0.25).abs() < 1e-9);
        let bias = shadow_bias(PixelRect::new(100, 0, 110, 10), VIEWPORT, Some(Side::Right));
        assert!((bias - 0.25).abs() < 1e-9);
    }

    #[test]
    fn arrow_offset_is_clamped_into_content() {
        let anchor = PixelRect::new(300, 100, 340, 140);
        let content = PixelRect::new(0, 140, 100, 200);
        assert_eq!(arrow_offset(content, anchor, Some(Side::Bottom)), 100);
        let beside = PixelRect::new(340, 90, 400, 200);
        assert_eq!(arrow_offset(beside, anchor, Some(Side::Right)), 30);
    }
}
