// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor geometry: the host contract and the per-frame cache.

use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::rect::{Direction, PixelInsets, PixelRect};

/// Raw anchor geometry reported by the host, in host coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnchorGeometry {
    /// Bounds of the anchor element.
    pub anchor: Rect,
    /// Visible bounds of the surface the anchor is displayed in.
    pub viewport: Rect,
}

/// Host windowing system as seen by the engine.
///
/// Handles are non-owning: the engine never keeps an anchor alive, it only
/// asks the host whether a handle still refers to something on screen.
pub trait AnchorSource {
    /// Non-owning reference to an anchor element (an index, key, or id).
    type Handle: Copy + PartialEq + Debug;

    /// Returns `true` while `handle` refers to an element attached to a
    /// display surface.
    fn is_alive(&self, handle: Self::Handle) -> bool;

    /// Current anchor and viewport bounds, or `None` if they are unavailable.
    fn geometry(&self, handle: Self::Handle) -> Option<AnchorGeometry>;

    /// Text direction at the anchor.
    fn direction(&self, handle: Self::Handle) -> Direction {
        let _ = handle;
        Direction::Ltr
    }
}

/// Snapshot of an anchor's geometry for one frame.
///
/// Rectangles are normalized so that the viewport's top-left corner is the
/// origin. Alignments receive this by shared reference; decorators that need a
/// different viewport derive a copy with [`AnchorFrame::with_viewport`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnchorFrame {
    anchor_rect: PixelRect,
    viewport_rect: PixelRect,
    direction: Direction,
    origin: Point,
    remaining: PixelInsets,
}

impl AnchorFrame {
    /// Creates a frame from viewport-relative rectangles.
    #[must_use]
    pub fn new(anchor_rect: PixelRect, viewport_rect: PixelRect, direction: Direction) -> Self {
        Self {
            anchor_rect,
            viewport_rect,
            direction,
            origin: Point::ZERO,
            remaining: remaining_space(anchor_rect, viewport_rect),
        }
    }

    /// Normalizes host geometry into a frame.
    ///
    /// The viewport's host-space origin is kept so results can be mapped back
    /// with [`AnchorFrame::to_host`].
    #[must_use]
    pub fn from_geometry(geometry: AnchorGeometry, direction: Direction) -> Self {
        let viewport = geometry.viewport.abs();
        let shift = viewport.origin().to_vec2();
        let mut frame = Self::new(
            PixelRect::from_kurbo(geometry.anchor - shift),
            PixelRect::from_kurbo(viewport - shift),
            direction,
        );
        frame.origin = viewport.origin();
        frame
    }

    /// The frame used for an anchor that is no longer displayed.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// Anchor bounds relative to the viewport origin.
    #[must_use]
    pub fn anchor_rect(&self) -> PixelRect {
        self.anchor_rect
    }

    /// Viewport bounds.
    #[must_use]
    pub fn viewport_rect(&self) -> PixelRect {
        self.viewport_rect
    }

    /// Anchor width.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.anchor_rect.width()
    }

    /// Anchor height.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.anchor_rect.height()
    }

    /// Text direction at the anchor.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Distance from each anchor edge to the matching viewport edge, floored
    /// at zero.
    #[must_use]
    pub fn remaining(&self) -> PixelInsets {
        self.remaining
    }

    /// Host-space position of the viewport origin.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Returns a copy of this frame with a different viewport.
    ///
    /// Remaining space is recomputed against the new viewport.
    #[must_use]
    pub fn with_viewport(&self, viewport_rect: PixelRect) -> Self {
        Self {
            viewport_rect,
            remaining: remaining_space(self.anchor_rect, viewport_rect),
            ..*self
        }
    }

    /// Maps a viewport-relative rectangle back into host coordinates.
    #[must_use]
    pub fn to_host(&self, rect: PixelRect) -> Rect {
        rect.to_kurbo() + self.origin.to_vec2()
    }
}

fn remaining_space(anchor: PixelRect, viewport: PixelRect) -> PixelInsets {
    PixelInsets {
        left: anchor.left.saturating_sub(viewport.left).max(0),
        top: anchor.top.saturating_sub(viewport.top).max(0),
        right: viewport.right.saturating_sub(anchor.right).max(0),
        bottom: viewport.bottom.saturating_sub(anchor.bottom).max(0),
    }
}

/// Lazily refreshed cache of an anchor's [`AnchorFrame`].
///
/// The cache is recomputed on the first read after [`AnchorState::invalidate`]
/// and is otherwise served as-is, so reads within one frame may observe
/// geometry that is up to one frame old. The positioning engine invalidates
/// it from its per-frame callback.
#[derive(Clone, Debug)]
pub struct AnchorState<H> {
    handle: H,
    frame: AnchorFrame,
    dirty: bool,
    detached: bool,
    generation: u64,
}

impl<H: Copy + PartialEq + Debug> AnchorState<H> {
    /// Creates a state for `handle`. Nothing is read until the first access.
    #[must_use]
    pub fn new(handle: H) -> Self {
        Self {
            handle,
            frame: AnchorFrame::detached(),
            dirty: true,
            detached: false,
            generation: 0,
        }
    }

    /// The anchor handle this state tracks.
    #[must_use]
    pub fn handle(&self) -> H {
        self.handle
    }

    /// Marks the cached frame stale. The next [`AnchorState::frame`] call
    /// recomputes it.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Returns `true` if the next read will recompute.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns `true` if the last refresh found the anchor gone.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Number of refreshes performed so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The last computed frame, without refreshing.
    #[must_use]
    pub fn cached(&self) -> &AnchorFrame {
        &self.frame
    }

    /// Returns the current frame, refreshing it first if it is stale.
    pub fn frame<S>(&mut self, source: &S) -> &AnchorFrame
    where
        S: AnchorSource<Handle = H> + ?Sized,
    {
        if self.dirty {
            self.refresh(source);
        }
        &self.frame
    }

    fn refresh<S>(&mut self, source: &S)
    where
        S: AnchorSource<Handle = H> + ?Sized,
    {
        self.dirty = false;
        self.generation = self.generation.wrapping_add(1);

        let geometry = if source.is_alive(self.handle) {
            source.geometry(self.handle)
        } else {
            None
        };

        match geometry {
            Some(geometry) => {
                if self.detached {
                    tracing::debug!(handle = ?self.handle, "popover anchor reattached");
                }
                self.detached = false;
                self.frame = AnchorFrame::from_geometry(geometry, source.direction(self.handle));
            }
            None => {
                if !self.detached {
                    tracing::warn!(handle = ?self.handle, "popover anchor is not displayed");
                }
                self.detached = true;
                self.frame = AnchorFrame::detached();
            }
        }
    }

    /// Snapshot of the cache state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> AnchorStateDebugInfo<H> {
        AnchorStateDebugInfo {
            handle: self.handle,
            frame: self.frame,
            dirty: self.dirty,
            detached: self.detached,
            generation: self.generation,
        }
    }
}

/// Debug snapshot of an [`AnchorState`].
#[derive(Clone, Debug)]
pub struct AnchorStateDebugInfo<H> {
    /// Tracked anchor handle.
    pub handle: H,
    /// Last computed frame.
    pub frame: AnchorFrame,
    /// Whether the next read recomputes.
    pub dirty: bool,
    /// Whether the anchor was missing at the last refresh.
    pub detached: bool,
    /// Number of refreshes performed.
    pub generation: u64,
}
