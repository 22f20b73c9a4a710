//! Benchmark: index resolution and directive planning on long lists.
//!
//! Run with: `cargo bench -p ftui-reorder --bench reorder_bench`
//!
//! Every pointer move re-resolves the target over all siblings and re-plans
//! every item, so both scale with list length.

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ftui_reorder::{
    ListConfig, ListController, ListInput, ListLayout, PointerEvent, StackLayout, resolve_index,
};
use web_time::Instant;

const SIZES: [usize; 3] = [10, 100, 1_000];

// ===========================================================================
// Index resolution
// ===========================================================================

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_index");
    for size in SIZES {
        let heights: Vec<f32> = (0..size).map(|i| 20.0 + (i % 7) as f32).collect();
        let total: f32 = heights.iter().sum();
        group.bench_with_input(BenchmarkId::from_parameter(size), &heights, |b, heights| {
            b.iter(|| {
                resolve_index(
                    black_box(total * 0.75),
                    black_box(0.0),
                    heights.iter().copied(),
                )
            });
        });
    }
    group.finish();
}

// ===========================================================================
// Move + plan
// ===========================================================================

fn bench_drag_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_move_and_plan");
    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut list = ListController::new(ListConfig::default()).expect("valid config");
            let mut layout = StackLayout::uniform(size, 20.0);
            let t0 = Instant::now();
            let press = ListInput::PointerDown {
                index: 0,
                event: PointerEvent::primary(10.0, 10.0),
            };
            list.process(&press, &layout, t0);
            list.process(&ListInput::Tick, &layout, t0 + Duration::from_millis(200));

            let span = size as f32 * 20.0;
            let mut step = 0u32;
            b.iter(|| {
                step = step.wrapping_add(1);
                let y = (step % 97) as f32 / 97.0 * span;
                let dispatch = list.process(
                    &ListInput::PointerMove(PointerEvent::primary(10.0, y)),
                    &layout,
                    t0 + Duration::from_millis(250),
                );
                let directives = list.directives(layout.len());
                layout.apply(&directives);
                black_box((dispatch, directives))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_drag_move);
criterion_main!(benches);
