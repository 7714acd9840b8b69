// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_popover::{
    AlignmentExt, AnchorFrame, AnchorGeometry, AnchorSource, Decoration, Direction, Horizontal,
    PixelRect, PixelSize, PositioningEngine, RelativeAlignment, ShadowStyle, Vertical, measure_fn,
};

/// A grid of anchors covering a 1280x800 window.
struct Grid {
    viewport: Rect,
    cols: u32,
}

impl Grid {
    fn anchor(&self, index: u32) -> Rect {
        let col = f64::from(index % self.cols);
        let row = f64::from(index / self.cols);
        Rect::new(col * 80.0, row * 40.0, col * 80.0 + 72.0, row * 40.0 + 32.0)
    }
}

impl AnchorSource for Grid {
    type Handle = u32;

    fn is_alive(&self, _handle: u32) -> bool {
        true
    }

    fn geometry(&self, handle: u32) -> Option<AnchorGeometry> {
        Some(AnchorGeometry {
            anchor: self.anchor(handle),
            viewport: self.viewport,
        })
    }
}

fn frames() -> Vec<AnchorFrame> {
    let grid = Grid {
        viewport: Rect::new(0.0, 0.0, 1280.0, 800.0),
        cols: 16,
    };
    (0..320)
        .filter_map(|i| grid.geometry(i))
        .map(|geometry| AnchorFrame::from_geometry(geometry, Direction::Ltr))
        .collect()
}

fn bench_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("popover/solve");
    let frames = frames();
    let content = PixelSize::new(240, 360);

    group.bench_function("relative_default", |b| {
        let mut engine = PositioningEngine::<u32>::default();
        b.iter(|| {
            for frame in &frames {
                let mut size = content;
                black_box(engine.solve(frame, &mut size));
            }
        });
    });

    group.bench_function("margin_and_padding", |b| {
        let rule = RelativeAlignment::new(Vertical::below_or_above(), Horizontal::align_end())
            .with_anchor_margin(8)
            .with_window_padding(8);
        let mut engine = PositioningEngine::<u32>::new(rule);
        b.iter(|| {
            for frame in &frames {
                let mut size = content;
                black_box(engine.solve(frame, &mut size));
            }
        });
    });

    // Arrow side changes between neighboring anchors, so most solves take a
    // second measure pass.
    group.bench_function("shadow_arrow", |b| {
        let style = ShadowStyle::new(6, 10);
        let rule = RelativeAlignment::default().with_shadow(style);
        let mut engine = PositioningEngine::<u32>::new(rule);
        let mut measure = measure_fn(|max: PixelSize, decoration: &Decoration| {
            let insets = style.insets(decoration.side);
            PixelSize::new(240 + insets.horizontal(), 360 + insets.vertical()).min(max)
        });
        b.iter(|| {
            for frame in &frames {
                black_box(engine.solve(frame, &mut measure));
            }
        });
    });

    group.finish();
}

fn bench_anchor_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("popover/anchor_cache");
    let grid = Grid {
        viewport: Rect::new(0.0, 0.0, 1280.0, 800.0),
        cols: 16,
    };

    for reads_per_frame in [1_u32, 8, 64] {
        group.bench_with_input(
            BenchmarkId::new("reads_per_frame", reads_per_frame),
            &reads_per_frame,
            |b, &reads| {
                let mut engine = PositioningEngine::<u32>::default();
                engine.attach(42);
                b.iter(|| {
                    engine.on_frame();
                    for _ in 0..reads {
                        let mut size = PixelSize::new(120, 300);
                        black_box(engine.compute_target(&grid, &mut size));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_clamp_only(c: &mut Criterion) {
    // Oversized content against a small viewport: every solve clamps.
    let frame = AnchorFrame::new(
        PixelRect::new(100, 100, 180, 140),
        PixelRect::new(0, 0, 320, 240),
        Direction::Rtl,
    );
    let mut engine = PositioningEngine::<u32>::default();
    c.bench_function("popover/clamp_oversized", |b| {
        b.iter(|| {
            let mut size = PixelSize::new(4_000, 4_000);
            black_box(engine.solve(black_box(&frame), &mut size))
        });
    });
}

criterion_group!(benches, bench_rules, bench_anchor_cache, bench_clamp_only);
criterion_main!(benches);
