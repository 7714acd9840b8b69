// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The measure/align solve loop and the show/update/dismiss entry points.

use alloc::boxed::Box;
use core::fmt::Debug;

use kurbo::Rect;

use crate::alignment::{Alignment, DEFAULT_MAX_PASSES};
use crate::anchor::{AnchorFrame, AnchorSource, AnchorState, AnchorStateDebugInfo};
use crate::rect::{PixelRect, Side};
use crate::relative::RelativeAlignment;
use crate::target::{Decoration, Measure, Target};

/// Engine tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on measure/align passes per solve. Zero is treated as one.
    pub max_passes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// Suggested show/hide transition, derived from where the overlay landed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransitionHint {
    /// Overlay is below the anchor: drop down from the top.
    FromTop,
    /// Overlay is above the anchor: rise up from the bottom.
    FromBottom,
    /// Overlay is centered on the anchor: fade in place.
    #[default]
    FromCenter,
}

impl TransitionHint {
    /// Classifies `rect` by comparing its vertical center with the anchor's.
    #[must_use]
    pub fn classify(rect: PixelRect, anchor: PixelRect) -> Self {
        // Doubled centers avoid rounding odd heights.
        let rect_center = i64::from(rect.top) + i64::from(rect.bottom);
        let anchor_center = i64::from(anchor.top) + i64::from(anchor.bottom);
        match rect_center.cmp(&anchor_center) {
            core::cmp::Ordering::Greater => Self::FromTop,
            core::cmp::Ordering::Less => Self::FromBottom,
            core::cmp::Ordering::Equal => Self::FromCenter,
        }
    }
}

/// Outcome of one [`PositioningEngine::compute_target`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Solve {
    /// Final rectangle, relative to the viewport origin.
    pub rect: PixelRect,
    /// Measure/align passes performed.
    pub passes: usize,
    /// `false` if the pass limit was hit while a remeasure was still pending.
    pub converged: bool,
}

/// What the host needs to position the overlay window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Final rectangle, relative to the viewport origin.
    pub rect: PixelRect,
    /// `rect` mapped back into host coordinates.
    pub host_rect: Rect,
    /// Suggested transition.
    pub transition: TransitionHint,
    /// Shadow/arrow state to draw.
    pub decoration: Decoration,
    /// Measure/align passes performed.
    pub passes: usize,
    /// See [`Solve::converged`].
    pub converged: bool,
}

impl Placement {
    /// Returns `true` if there is no room to show the overlay; hosts should
    /// skip showing or updating it.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }
}

/// Kind of cosmetic decoration reported to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    /// Drop shadow; the offset is the `0.0..=1.0` bias along the viewport.
    Shadow,
    /// Pointer arrow; the offset is its pixel position along the facing edge.
    Arrow,
}

/// Host callbacks for the overlay surface.
pub trait OverlayHost {
    /// Updates a decoration. Purely cosmetic; `side` is `None` when the
    /// overlay overlaps the anchor.
    fn apply_decoration(&mut self, kind: DecorationKind, side: Option<Side>, offset: f64) {
        let _ = (kind, side, offset);
    }

    /// Receives the final placement.
    fn on_result(&mut self, placement: &Placement);
}

/// Positions an overlay relative to an anchor.
///
/// The engine owns the configured [`Alignment`], the [`Target`] it refines,
/// and an [`AnchorState`] while attached. It is driven synchronously from the
/// host's UI thread; [`PositioningEngine::on_frame`] must be called once per
/// rendered frame so anchor geometry is re-read at most once per frame.
#[derive(Debug)]
pub struct PositioningEngine<H> {
    alignment: Box<dyn Alignment>,
    config: EngineConfig,
    target: Target,
    anchor: Option<AnchorState<H>>,
    showing: bool,
}

impl<H: Copy + PartialEq + Debug> Default for PositioningEngine<H> {
    fn default() -> Self {
        Self::new(RelativeAlignment::default())
    }
}

impl<H: Copy + PartialEq + Debug> PositioningEngine<H> {
    /// Creates an engine using `alignment` and the default configuration.
    #[must_use]
    pub fn new(alignment: impl Alignment + 'static) -> Self {
        Self {
            alignment: Box::new(alignment),
            config: EngineConfig::default(),
            target: Target::new(),
            anchor: None,
            showing: false,
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Replaces the alignment. Takes effect on the next solve.
    pub fn set_alignment(&mut self, alignment: impl Alignment + 'static) {
        self.alignment = Box::new(alignment);
    }

    /// The committed target from the last solve.
    #[must_use]
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Starts tracking `handle`, replacing any previous anchor.
    pub fn attach(&mut self, handle: H) {
        self.anchor = Some(AnchorState::new(handle));
    }

    /// Stops tracking the anchor.
    pub fn detach(&mut self) {
        self.anchor = None;
    }

    /// The tracked anchor, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<&AnchorState<H>> {
        self.anchor.as_ref()
    }

    /// Per-frame callback: marks cached anchor geometry stale.
    pub fn on_frame(&mut self) {
        if let Some(anchor) = self.anchor.as_mut() {
            anchor.invalidate();
        }
    }

    /// Returns `true` between [`PositioningEngine::show`] and
    /// [`PositioningEngine::dismiss`].
    #[must_use]
    pub fn is_showing(&self) -> bool {
        self.showing
    }

    /// Runs the measure/align loop against the attached anchor.
    ///
    /// Returns `None` if no anchor is attached.
    pub fn compute_target<S, M>(&mut self, source: &S, measure: &mut M) -> Option<Solve>
    where
        S: AnchorSource<Handle = H> + ?Sized,
        M: Measure + ?Sized,
    {
        let frame = *self.anchor.as_mut()?.frame(source);
        Some(self.solve(&frame, measure))
    }

    /// Runs the measure/align loop against an explicit frame.
    ///
    /// Each pass measures the content under the viewport size, seeds the
    /// rectangle at the anchor's bottom-left corner, and runs the alignment.
    /// Passes repeat while the alignment requests a remeasure, up to
    /// [`EngineConfig::max_passes`]. Work happens on a copy of the target that
    /// is committed when the loop ends.
    pub fn solve<M>(&mut self, frame: &AnchorFrame, measure: &mut M) -> Solve
    where
        M: Measure + ?Sized,
    {
        let max_passes = self.config.max_passes.max(1);
        let max = frame.viewport_rect().size();
        let anchor = frame.anchor_rect();

        let mut target = self.target;
        target.rect = PixelRect::EMPTY;

        let mut passes = 0;
        let converged = loop {
            passes += 1;
            target.pre_measure(measure, max);
            target.rect = PixelRect::from_origin_size(anchor.left, anchor.bottom, target.measured());
            self.alignment.compute(frame, &mut target);
            tracing::trace!(pass = passes, rect = ?target.rect, remeasure = target.needs_remeasure(), "popover pass");

            if !target.needs_remeasure() {
                break true;
            }
            if passes >= max_passes {
                tracing::warn!(
                    passes,
                    rect = ?target.rect,
                    "popover layout did not converge; using last result"
                );
                break false;
            }
        };

        // A remeasure still pending here was cut off by the pass limit.
        target.clear_remeasure();
        self.target = target;
        tracing::debug!(passes, converged, rect = ?target.rect, "popover solved");

        Solve {
            rect: target.rect,
            passes,
            converged,
        }
    }

    /// Attaches `handle`, solves, and reports the placement to `host`.
    pub fn show<S, M, O>(&mut self, source: &S, handle: H, measure: &mut M, host: &mut O) -> Placement
    where
        S: AnchorSource<Handle = H> + ?Sized,
        M: Measure + ?Sized,
        O: OverlayHost + ?Sized,
    {
        self.attach(handle);
        self.showing = true;
        self.place(source, measure, host)
    }

    /// Re-solves against the current anchor, for example after the alignment
    /// or content changed. Returns `None` if nothing is attached.
    pub fn update<S, M, O>(&mut self, source: &S, measure: &mut M, host: &mut O) -> Option<Placement>
    where
        S: AnchorSource<Handle = H> + ?Sized,
        M: Measure + ?Sized,
        O: OverlayHost + ?Sized,
    {
        self.anchor.as_ref()?;
        Some(self.place(source, measure, host))
    }

    /// Detaches the anchor. The alignment and target are kept for the next
    /// [`PositioningEngine::show`].
    pub fn dismiss(&mut self) {
        self.detach();
        self.showing = false;
    }

    fn place<S, M, O>(&mut self, source: &S, measure: &mut M, host: &mut O) -> Placement
    where
        S: AnchorSource<Handle = H> + ?Sized,
        M: Measure + ?Sized,
        O: OverlayHost + ?Sized,
    {
        let frame = match self.anchor.as_mut() {
            Some(anchor) => *anchor.frame(source),
            None => AnchorFrame::detached(),
        };
        let solve = self.solve(&frame, measure);
        let decoration = self.target.decoration;
        let placement = Placement {
            rect: solve.rect,
            host_rect: frame.to_host(solve.rect),
            transition: TransitionHint::classify(solve.rect, frame.anchor_rect()),
            decoration,
            passes: solve.passes,
            converged: solve.converged,
        };

        host.apply_decoration(DecorationKind::Shadow, decoration.side, decoration.shadow_bias);
        host.apply_decoration(
            DecorationKind::Arrow,
            decoration.side,
            f64::from(decoration.arrow_offset),
        );
        host.on_result(&placement);
        placement
    }

    /// Snapshot of the engine state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> EngineDebugInfo<H> {
        EngineDebugInfo {
            config: self.config,
            target: self.target,
            anchor: self.anchor.as_ref().map(AnchorState::debug_info),
            showing: self.showing,
        }
    }
}

/// Debug snapshot of a [`PositioningEngine`].
#[derive(Clone, Debug)]
pub struct EngineDebugInfo<H> {
    /// Current configuration.
    pub config: EngineConfig,
    /// Committed target from the last solve.
    pub target: Target,
    /// Anchor cache state, if attached.
    pub anchor: Option<AnchorStateDebugInfo<H>>,
    /// Whether the overlay is showing.
    pub showing: bool,
}
