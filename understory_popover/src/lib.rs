// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_popover --heading-base-level=0

//! Understory Popover: anchor-relative overlay positioning.
//!
//! This crate computes where a popup, dropdown, or tooltip should go given an
//! anchor element, the viewport it lives in, and the overlay's measured size.
//! It focuses on:
//! - Picking a side of the anchor (above/below, start/end) based on the room
//!   available, with right-to-left mirroring.
//! - Keeping the result inside the viewport by sliding and then clipping.
//! - Composable decorators: a minimum gap to the anchor ([`AnchorMargin`]),
//!   viewport padding ([`WindowPadding`]), and shadow/arrow insets
//!   ([`ShadowInset`]).
//! - Iterating measure and align until content size and placement agree.
//!
//! It does **not** own windows, views, or rendering. Callers are expected to:
//! - Implement [`AnchorSource`] so the engine can read anchor and viewport
//!   bounds on demand.
//! - Implement [`Measure`] with "at most" semantics for the overlay content.
//! - Implement [`OverlayHost`] to apply the final [`Placement`] and any
//!   shadow/arrow decoration.
//! - Call [`PositioningEngine::on_frame`] once per rendered frame.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_popover::{
//!     AlignmentExt, AnchorGeometry, AnchorSource, Horizontal, OverlayHost, PixelRect,
//!     PixelSize, Placement, PositioningEngine, RelativeAlignment, TransitionHint, Vertical,
//! };
//!
//! // A single button in a 400x800 window.
//! struct Window;
//!
//! impl AnchorSource for Window {
//!     type Handle = u32;
//!
//!     fn is_alive(&self, _button: u32) -> bool {
//!         true
//!     }
//!
//!     fn geometry(&self, _button: u32) -> Option<AnchorGeometry> {
//!         Some(AnchorGeometry {
//!             anchor: Rect::new(100.0, 200.0, 180.0, 240.0),
//!             viewport: Rect::new(0.0, 0.0, 400.0, 800.0),
//!         })
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Overlay(Option<Rect>);
//!
//! impl OverlayHost for Overlay {
//!     fn on_result(&mut self, placement: &Placement) {
//!         self.0 = Some(placement.host_rect);
//!     }
//! }
//!
//! let rule = RelativeAlignment::new(Vertical::below_or_above(), Horizontal::align_start())
//!     .with_anchor_margin(8)
//!     .with_window_padding(8);
//! let mut engine = PositioningEngine::new(rule);
//! let mut overlay = Overlay::default();
//!
//! // Content wants 120x300.
//! let placement = engine.show(&Window, 7, &mut PixelSize::new(120, 300), &mut overlay);
//! assert_eq!(placement.rect, PixelRect::new(100, 248, 220, 548));
//! assert_eq!(placement.transition, TransitionHint::FromTop);
//! assert_eq!(overlay.0, Some(Rect::new(100.0, 248.0, 220.0, 548.0)));
//!
//! // Next frame: geometry is re-read on the next solve.
//! engine.on_frame();
//! let again = engine.update(&Window, &mut PixelSize::new(120, 300), &mut overlay);
//! assert_eq!(again.map(|p| p.rect), Some(placement.rect));
//!
//! engine.dismiss();
//! assert!(!engine.is_showing());
//! ```
//!
//! ## Custom rules
//!
//! Any type implementing [`Alignment`] can be used, and [`from_fn`] wraps a
//! closure. Rules receive the target rectangle seeded at the anchor's
//! bottom-left corner and move it relative to that position.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod alignment;
mod anchor;
mod engine;
mod margin;
mod padding;
mod rect;
mod relative;
mod shadow;
mod target;

pub use alignment::{Alignment, AlignmentExt, DEFAULT_MAX_PASSES, FnAlignment, from_fn};
pub use anchor::{AnchorFrame, AnchorGeometry, AnchorSource, AnchorState, AnchorStateDebugInfo};
pub use engine::{
    DecorationKind, EngineConfig, EngineDebugInfo, OverlayHost, Placement, PositioningEngine,
    Solve, TransitionHint,
};
pub use margin::AnchorMargin;
pub use padding::WindowPadding;
pub use rect::{Direction, PixelInsets, PixelRect, PixelSize, Side};
pub use relative::{Horizontal, HorizontalMode, RelativeAlignment, Vertical, VerticalMode};
pub use shadow::{ShadowInset, ShadowStyle};
pub use target::{Decoration, Measure, MeasureFn, Target, measure_fn};
