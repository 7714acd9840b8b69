// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer pixel geometry used by the positioning engine.

/// Axis-aligned rectangle on the integer pixel grid.
///
/// Edges are stored as `left <= right` and `top <= bottom`. Every operation in
/// this crate preserves that invariant, so widths and heights are never
/// negative. An empty rectangle (zero width or height) is a legal value and
/// means "no space".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge (inclusive).
    pub left: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl PixelRect {
    /// The empty rectangle at the origin.
    pub const EMPTY: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    /// Largest coordinate magnitude accepted from host geometry.
    ///
    /// Keeps sums of a coordinate and a couple of extents inside `i32`.
    pub const COORD_LIMIT: i32 = 1 << 28;

    /// Creates a rectangle from its edges, swapping them if they are reversed.
    #[must_use]
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// Creates a rectangle with its top-left corner at `(x, y)`.
    #[must_use]
    pub fn from_origin_size(x: i32, y: i32, size: PixelSize) -> Self {
        Self {
            left: x,
            top: y,
            right: x.saturating_add(size.width.max(0)),
            bottom: y.saturating_add(size.height.max(0)),
        }
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Width and height as a [`PixelSize`].
    #[must_use]
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width(), self.height())
    }

    /// Horizontal center, rounded toward the left edge.
    #[must_use]
    pub fn center_x(&self) -> i32 {
        self.left.saturating_add(self.width() / 2)
    }

    /// Vertical center, rounded toward the top edge.
    #[must_use]
    pub fn center_y(&self) -> i32 {
        self.top.saturating_add(self.height() / 2)
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Returns the rectangle translated by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left.saturating_add(dx),
            top: self.top.saturating_add(dy),
            right: self.right.saturating_add(dx),
            bottom: self.bottom.saturating_add(dy),
        }
    }

    /// Returns a rectangle of the same top-left corner and a new size.
    #[must_use]
    pub fn with_size(self, size: PixelSize) -> Self {
        Self::from_origin_size(self.left, self.top, size)
    }

    /// Returns the overlap of two rectangles.
    ///
    /// Each axis is clipped independently. When the inputs do not overlap on
    /// an axis, the result collapses to zero extent on that axis instead of
    /// going negative, so a disjoint pair yields an empty rectangle.
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        Self {
            left,
            top,
            right: self.right.min(other.right).max(left),
            bottom: self.bottom.min(other.bottom).max(top),
        }
    }

    /// Returns `true` if `other` lies entirely inside `self`.
    #[must_use]
    pub fn contains_rect(&self, other: Self) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Moves each edge inward by the matching inset.
    ///
    /// The result saturates at zero extent rather than inverting.
    #[must_use]
    pub fn inset_by(self, insets: PixelInsets) -> Self {
        let left = self.left.saturating_add(insets.left);
        let top = self.top.saturating_add(insets.top);
        Self {
            left,
            top,
            right: self.right.saturating_sub(insets.right).max(left),
            bottom: self.bottom.saturating_sub(insets.bottom).max(top),
        }
    }

    /// Moves each edge outward by the matching inset.
    #[must_use]
    pub fn outset_by(self, insets: PixelInsets) -> Self {
        Self::new(
            self.left.saturating_sub(insets.left),
            self.top.saturating_sub(insets.top),
            self.right.saturating_add(insets.right),
            self.bottom.saturating_add(insets.bottom),
        )
    }

    /// Snaps a host-space `kurbo` rectangle to the pixel grid.
    ///
    /// Coordinates are rounded to the nearest integer and limited to
    /// [`PixelRect::COORD_LIMIT`] in magnitude; NaN collapses to zero.
    #[must_use]
    pub fn from_kurbo(rect: kurbo::Rect) -> Self {
        let r = rect.abs().round();
        Self::new(to_px(r.x0), to_px(r.y0), to_px(r.x1), to_px(r.y1))
    }

    /// Converts to a `kurbo` rectangle.
    #[must_use]
    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.right),
            f64::from(self.bottom),
        )
    }
}

impl From<PixelRect> for kurbo::Rect {
    fn from(rect: PixelRect) -> Self {
        rect.to_kurbo()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is rounded and clamped to `COORD_LIMIT`; `as` maps NaN to 0"
)]
fn to_px(value: f64) -> i32 {
    value.clamp(-f64::from(PixelRect::COORD_LIMIT), f64::from(PixelRect::COORD_LIMIT)) as i32
}

/// Width and height on the pixel grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelSize {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl PixelSize {
    /// The zero size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a new size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Component-wise minimum, also clamping each component at zero.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self {
            width: self.width.min(other.width).max(0),
            height: self.height.min(other.height).max(0),
        }
    }

    /// Removes the insets from the size, saturating at zero.
    #[must_use]
    pub fn shrink(self, insets: PixelInsets) -> Self {
        Self {
            width: self.width.saturating_sub(insets.horizontal()).max(0),
            height: self.height.saturating_sub(insets.vertical()).max(0),
        }
    }
}

/// Per-edge distances, used for remaining space, window padding, and
/// shadow/arrow insets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelInsets {
    /// Distance on the left edge.
    pub left: i32,
    /// Distance on the top edge.
    pub top: i32,
    /// Distance on the right edge.
    pub right: i32,
    /// Distance on the bottom edge.
    pub bottom: i32,
}

impl PixelInsets {
    /// All edges zero.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Creates insets from explicit edges.
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same distance on every edge.
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of the left and right edges.
    #[must_use]
    pub fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of the top and bottom edges.
    #[must_use]
    pub fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }
}

/// Side of an anchor that a rectangle lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Entirely above the anchor.
    Top,
    /// Entirely below the anchor.
    Bottom,
    /// Entirely left of the anchor.
    Left,
    /// Entirely right of the anchor.
    Right,
}

impl Side {
    /// Classifies where `rect` sits relative to `anchor`.
    ///
    /// Vertical placement is checked first. Returns `None` when the rectangle
    /// overlaps the anchor on both axes.
    #[must_use]
    pub fn of(rect: PixelRect, anchor: PixelRect) -> Option<Self> {
        if rect.top >= anchor.bottom {
            Some(Self::Bottom)
        } else if rect.bottom <= anchor.top {
            Some(Self::Top)
        } else if rect.left >= anchor.right {
            Some(Self::Right)
        } else if rect.right <= anchor.left {
            Some(Self::Left)
        } else {
            None
        }
    }

    /// Returns `true` for [`Side::Top`] and [`Side::Bottom`].
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Text direction of the anchor, used to resolve start/end rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Start is left, end is right.
    #[default]
    Ltr,
    /// Start is right, end is left.
    Rtl,
}

impl Direction {
    /// Returns `true` for right-to-left layouts.
    #[must_use]
    pub fn is_rtl(self) -> bool {
        self == Self::Rtl
    }

    /// Maps `(start, end)` values to `(left, right)`.
    #[must_use]
    pub fn to_physical<T>(self, start: T, end: T) -> (T, T) {
        match self {
            Self::Ltr => (start, end),
            Self::Rtl => (end, start),
        }
    }
}
