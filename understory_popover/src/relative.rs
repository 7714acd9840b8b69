// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side and edge rules relative to the anchor.
//!
//! Each rule assumes the target was seeded at the anchor's bottom-left corner
//! and offsets it from there. With `clamp_to_viewport` set (the default), the
//! rule then slides the rectangle back into the viewport along its axis and
//! clips whatever still does not fit.

use crate::alignment::Alignment;
use crate::anchor::AnchorFrame;
use crate::rect::PixelRect;
use crate::target::Target;

/// Where to place the target vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalMode {
    /// Bottom edge above the anchor's top edge.
    Above,
    /// Top edge aligned with the anchor's top edge.
    AlignTop,
    /// Centered on the anchor.
    Center,
    /// Bottom edge aligned with the anchor's bottom edge.
    AlignBottom,
    /// Top edge below the anchor's bottom edge.
    Below,
    /// [`VerticalMode::Below`] if it fits, else [`VerticalMode::Above`] if
    /// that fits, else whichever side has more room (ties go below).
    BelowOrAbove,
}

/// Vertical rule: a [`VerticalMode`] plus spacing and clamping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vertical {
    /// Placement mode.
    pub mode: VerticalMode,
    /// Gap to the anchor for [`VerticalMode::Above`] and
    /// [`VerticalMode::Below`]. Ignored by the aligning modes.
    pub spacing: i32,
    /// Keep the result inside the viewport.
    pub clamp_to_viewport: bool,
}

impl Default for Vertical {
    fn default() -> Self {
        Self::below_or_above()
    }
}

impl Vertical {
    /// Rule with the given mode, no spacing, and clamping on.
    #[must_use]
    pub const fn new(mode: VerticalMode) -> Self {
        Self {
            mode,
            spacing: 0,
            clamp_to_viewport: true,
        }
    }

    /// See [`VerticalMode::Above`].
    #[must_use]
    pub const fn above() -> Self {
        Self::new(VerticalMode::Above)
    }

    /// See [`VerticalMode::AlignTop`].
    #[must_use]
    pub const fn align_top() -> Self {
        Self::new(VerticalMode::AlignTop)
    }

    /// See [`VerticalMode::Center`].
    #[must_use]
    pub const fn center() -> Self {
        Self::new(VerticalMode::Center)
    }

    /// See [`VerticalMode::AlignBottom`].
    #[must_use]
    pub const fn align_bottom() -> Self {
        Self::new(VerticalMode::AlignBottom)
    }

    /// See [`VerticalMode::Below`].
    #[must_use]
    pub const fn below() -> Self {
        Self::new(VerticalMode::Below)
    }

    /// See [`VerticalMode::BelowOrAbove`].
    #[must_use]
    pub const fn below_or_above() -> Self {
        Self::new(VerticalMode::BelowOrAbove)
    }

    /// Sets the gap to the anchor.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Enables or disables viewport clamping.
    #[must_use]
    pub const fn clamped(mut self, clamp: bool) -> Self {
        self.clamp_to_viewport = clamp;
        self
    }

    /// Resolves [`VerticalMode::BelowOrAbove`] against the available space.
    ///
    /// Other modes are returned unchanged.
    #[must_use]
    pub fn resolve(&self, anchor: &AnchorFrame, height: i32) -> VerticalMode {
        if self.mode != VerticalMode::BelowOrAbove {
            return self.mode;
        }
        let remaining = anchor.remaining();
        if remaining.bottom >= height {
            VerticalMode::Below
        } else if remaining.top >= height {
            VerticalMode::Above
        } else if remaining.bottom >= remaining.top {
            VerticalMode::Below
        } else {
            VerticalMode::Above
        }
    }
}

impl Alignment for Vertical {
    fn compute(&self, anchor: &AnchorFrame, target: &mut Target) {
        let h = target.rect.height();
        let dy = match self.resolve(anchor, h) {
            VerticalMode::Above => -(h + anchor.height()) - self.spacing,
            VerticalMode::AlignTop => -anchor.height(),
            VerticalMode::Center => -(h / 2 + anchor.height() / 2),
            VerticalMode::AlignBottom => -h,
            VerticalMode::Below | VerticalMode::BelowOrAbove => self.spacing,
        };
        target.rect = target.rect.offset(0, dy);
        if self.clamp_to_viewport {
            let viewport = anchor.viewport_rect();
            let shift = slide_into(
                target.rect.top,
                target.rect.bottom,
                viewport.top,
                viewport.bottom,
            );
            target.rect = target.rect.offset(0, shift).intersect(viewport);
        }
    }
}

/// Where to place the target horizontally.
///
/// Start/end modes resolve to physical sides through the anchor's
/// [`Direction`](crate::Direction) at the leaf, so they mirror correctly
/// wherever they appear in a decorator chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalMode {
    /// Right edge left of the anchor's left edge.
    ToLeft,
    /// Left edge aligned with the anchor's left edge.
    AlignLeft,
    /// Centered on the anchor.
    Center,
    /// Right edge aligned with the anchor's right edge.
    AlignRight,
    /// Left edge right of the anchor's right edge.
    ToRight,
    /// Outside the anchor's start edge.
    ToStart,
    /// Aligned with the anchor's start edge.
    AlignStart,
    /// Aligned with the anchor's end edge.
    AlignEnd,
    /// Outside the anchor's end edge.
    ToEnd,
    /// [`HorizontalMode::AlignStart`] if it fits, else
    /// [`HorizontalMode::AlignEnd`] if that fits, else whichever has more
    /// room (ties go to start).
    AlignStartOrEnd,
    /// Like [`HorizontalMode::AlignStartOrEnd`] but preferring the end edge.
    AlignEndOrStart,
}

/// Horizontal rule: a [`HorizontalMode`] plus spacing and clamping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Horizontal {
    /// Placement mode.
    pub mode: HorizontalMode,
    /// Gap to the anchor for the `To*` modes. Ignored by the aligning modes.
    pub spacing: i32,
    /// Keep the result inside the viewport.
    pub clamp_to_viewport: bool,
}

impl Default for Horizontal {
    fn default() -> Self {
        Self::align_start_or_end()
    }
}

impl Horizontal {
    /// Rule with the given mode, no spacing, and clamping on.
    #[must_use]
    pub const fn new(mode: HorizontalMode) -> Self {
        Self {
            mode,
            spacing: 0,
            clamp_to_viewport: true,
        }
    }

    /// See [`HorizontalMode::ToLeft`].
    #[must_use]
    pub const fn to_left() -> Self {
        Self::new(HorizontalMode::ToLeft)
    }

    /// See [`HorizontalMode::AlignLeft`].
    #[must_use]
    pub const fn align_left() -> Self {
        Self::new(HorizontalMode::AlignLeft)
    }

    /// See [`HorizontalMode::Center`].
    #[must_use]
    pub const fn center() -> Self {
        Self::new(HorizontalMode::Center)
    }

    /// See [`HorizontalMode::AlignRight`].
    #[must_use]
    pub const fn align_right() -> Self {
        Self::new(HorizontalMode::AlignRight)
    }

    /// See [`HorizontalMode::ToRight`].
    #[must_use]
    pub const fn to_right() -> Self {
        Self::new(HorizontalMode::ToRight)
    }

    /// See [`HorizontalMode::ToStart`].
    #[must_use]
    pub const fn to_start() -> Self {
        Self::new(HorizontalMode::ToStart)
    }

    /// See [`HorizontalMode::AlignStart`].
    #[must_use]
    pub const fn align_start() -> Self {
        Self::new(HorizontalMode::AlignStart)
    }

    /// See [`HorizontalMode::AlignEnd`].
    #[must_use]
    pub const fn align_end() -> Self {
        Self::new(HorizontalMode::AlignEnd)
    }

    /// See [`HorizontalMode::ToEnd`].
    #[must_use]
    pub const fn to_end() -> Self {
        Self::new(HorizontalMode::ToEnd)
    }

    /// See [`HorizontalMode::AlignStartOrEnd`].
    #[must_use]
    pub const fn align_start_or_end() -> Self {
        Self::new(HorizontalMode::AlignStartOrEnd)
    }

    /// See [`HorizontalMode::AlignEndOrStart`].
    #[must_use]
    pub const fn align_end_or_start() -> Self {
        Self::new(HorizontalMode::AlignEndOrStart)
    }

    /// Sets the gap to the anchor.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Enables or disables viewport clamping.
    #[must_use]
    pub const fn clamped(mut self, clamp: bool) -> Self {
        self.clamp_to_viewport = clamp;
        self
    }

    /// Resolves direction-relative and space-dependent modes to one of the
    /// five physical modes.
    #[must_use]
    pub fn resolve(&self, anchor: &AnchorFrame, width: i32) -> HorizontalMode {
        use HorizontalMode as M;

        let rtl = anchor.direction().is_rtl();
        match self.mode {
            M::ToStart => {
                if rtl {
                    M::ToRight
                } else {
                    M::ToLeft
                }
            }
            M::AlignStart => {
                if rtl {
                    M::AlignRight
                } else {
                    M::AlignLeft
                }
            }
            M::AlignEnd => {
                if rtl {
                    M::AlignLeft
                } else {
                    M::AlignRight
                }
            }
            M::ToEnd => {
                if rtl {
                    M::ToLeft
                } else {
                    M::ToRight
                }
            }
            M::AlignStartOrEnd | M::AlignEndOrStart => {
                let remaining = anchor.remaining();
                // Aligning with one edge lets the content run across the
                // anchor and into the space past the opposite edge.
                let (past_start, past_end) = if rtl {
                    (remaining.right, remaining.left)
                } else {
                    (remaining.left, remaining.right)
                };
                let start_room = anchor.width() + past_end;
                let end_room = anchor.width() + past_start;
                let start_first = self.mode == M::AlignStartOrEnd;
                let (first, first_room, second, second_room) = if start_first {
                    (M::AlignStart, start_room, M::AlignEnd, end_room)
                } else {
                    (M::AlignEnd, end_room, M::AlignStart, start_room)
                };
                let pick = if first_room >= width {
                    first
                } else if second_room >= width {
                    second
                } else if first_room >= second_room {
                    first
                } else {
                    second
                };
                Self { mode: pick, ..*self }.resolve(anchor, width)
            }
            physical => physical,
        }
    }
}

impl Alignment for Horizontal {
    fn compute(&self, anchor: &AnchorFrame, target: &mut Target) {
        let w = target.rect.width();
        let dx = match self.resolve(anchor, w) {
            HorizontalMode::ToLeft => -w - self.spacing,
            HorizontalMode::Center => -(w / 2 - anchor.width() / 2),
            HorizontalMode::AlignRight => -(w - anchor.width()),
            HorizontalMode::ToRight => anchor.width() + self.spacing,
            _ => 0,
        };
        target.rect = target.rect.offset(dx, 0);
        if self.clamp_to_viewport {
            let viewport = anchor.viewport_rect();
            let shift = slide_into(
                target.rect.left,
                target.rect.right,
                viewport.left,
                viewport.right,
            );
            target.rect = target.rect.offset(shift, 0).intersect(viewport);
        }
    }
}

/// Shift that moves `start..end` inside `min..max` where possible.
///
/// Overflow past `max` is corrected first; if the span is longer than the
/// range, the second correction pins it to `min` and the caller's intersect
/// trims the far end.
fn slide_into(start: i32, end: i32, min: i32, max: i32) -> i32 {
    let mut shift = 0;
    if end > max {
        shift = max - end;
    }
    if start + shift < min {
        shift = min - start;
    }
    shift
}

/// Default strategy: independent horizontal and vertical rules.
///
/// Both rules run against the same incoming rectangle; the horizontal result
/// supplies the left/right edges, the vertical result the top/bottom edges,
/// and the combination is intersected with the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RelativeAlignment {
    /// Vertical rule.
    pub vertical: Vertical,
    /// Horizontal rule.
    pub horizontal: Horizontal,
}

impl RelativeAlignment {
    /// Combines a vertical and a horizontal rule.
    #[must_use]
    pub const fn new(vertical: Vertical, horizontal: Horizontal) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

impl Alignment for RelativeAlignment {
    fn compute(&self, anchor: &AnchorFrame, target: &mut Target) {
        let start = target.rect;

        self.horizontal.compute(anchor, target);
        let h = target.rect;

        target.rect = start;
        self.vertical.compute(anchor, target);
        let v = target.rect;

        target.rect = PixelRect {
            left: h.left,
            top: v.top,
            right: h.right,
            bottom: v.bottom,
        }
        .intersect(anchor.viewport_rect());
    }
}
