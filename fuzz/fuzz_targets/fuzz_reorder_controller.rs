#![no_main]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use arbitrary::Arbitrary;
use ftui_reorder::{
    CaptureCommand, ListConfig, ListController, ListInput, ListLayout, ListSignal, PointerButton,
    PointerEvent, StackLayout, TouchPoint,
};
use libfuzzer_sys::fuzz_target;
use web_time::Instant;

#[derive(Debug, Arbitrary)]
enum FuzzOp {
    Down { index: u8, x: f32, y: f32, secondary: bool },
    TouchDown { index: u8, id: u8, x: f32, y: f32 },
    Move { x: f32, y: f32, touch: Option<u8> },
    Up { x: f32, y: f32, touch: Option<u8> },
    Cancel,
    Blur,
    Tick { ms: u16 },
    Delete { index: u8, height: f32 },
    TransitionEnd { transform: bool },
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    heights: Vec<u8>,
    draggable: bool,
    transitions: bool,
    ops: Vec<FuzzOp>,
}

fn event(touch: Option<u8>, x: f32, y: f32) -> PointerEvent {
    match touch {
        Some(id) => PointerEvent::from_target_touches(&[TouchPoint::new(u32::from(id), x, y)])
            .unwrap_or_else(|| PointerEvent::primary(x, y)),
        None => PointerEvent::primary(x, y),
    }
}

fuzz_target!(|input: FuzzInput| {
    let config = ListConfig::default()
        .with_draggable(input.draggable)
        .with_delete_transitions(input.transitions);
    let Ok(mut list) = ListController::new(config) else {
        return;
    };
    let mut layout = StackLayout::new(0.0, input.heights.iter().take(64).map(|h| f32::from(*h)));
    let t0 = Instant::now();
    let mut now = Duration::ZERO;
    let mut held = 0i32;
    let requested = Rc::new(Cell::new(0u32));
    let completed = Rc::new(Cell::new(0u32));

    for op in input.ops.into_iter().take(512) {
        now += Duration::from_millis(3);
        let dispatch = match op {
            FuzzOp::Down { index, x, y, secondary } => {
                let button = if secondary { PointerButton::Secondary } else { PointerButton::Primary };
                list.process(
                    &ListInput::PointerDown { index: usize::from(index), event: PointerEvent::mouse(button, x, y) },
                    &layout,
                    t0 + now,
                )
            }
            FuzzOp::TouchDown { index, id, x, y } => list.process(
                &ListInput::PointerDown { index: usize::from(index), event: event(Some(id), x, y) },
                &layout,
                t0 + now,
            ),
            FuzzOp::Move { x, y, touch } => {
                list.process(&ListInput::PointerMove(event(touch, x, y)), &layout, t0 + now)
            }
            FuzzOp::Up { x, y, touch } => {
                list.process(&ListInput::PointerUp(event(touch, x, y)), &layout, t0 + now)
            }
            FuzzOp::Cancel => list.process(&ListInput::PointerCancel, &layout, t0 + now),
            FuzzOp::Blur => list.process(&ListInput::FocusLost, &layout, t0 + now),
            FuzzOp::Tick { ms } => {
                now += Duration::from_millis(u64::from(ms));
                list.process(&ListInput::Tick, &layout, t0 + now)
            }
            FuzzOp::Delete { index, height } => {
                let done = Rc::clone(&completed);
                requested.set(requested.get() + 1);
                let count = layout.len().saturating_sub(1);
                list.request_delete(usize::from(index), height, count, move || {
                    done.set(done.get() + 1);
                })
            }
            FuzzOp::TransitionEnd { transform } => {
                let property = if transform { "transform" } else { "opacity" };
                list.process(
                    &ListInput::TransitionEnd { index: 0, property: property.to_string() },
                    &layout,
                    t0 + now,
                )
            }
        };

        for command in &dispatch.capture {
            held += match command {
                CaptureCommand::Acquire { .. } => 1,
                CaptureCommand::Release { .. } => -1,
            };
            assert!((0..=1).contains(&held), "capture imbalance");
        }
        assert_eq!(held, i32::from(list.is_dragging()));
        for signal in &dispatch.signals {
            if let ListSignal::Reorder { from, to } = *signal {
                assert_ne!(from, to);
                assert!(from < layout.len() && to < layout.len());
            }
        }
        assert!(completed.get() <= requested.get());

        let directives = list.directives(layout.len());
        assert!(directives.iter().filter(|d| d.is_dragging()).count() <= 1);
        if list.is_delete_pending() {
            assert!(
                directives.iter().any(|d| d.transform.is_some_and(|t| t.offset().y != 0.0)),
                "pending delete with nothing to animate"
            );
        }
        layout.apply(&directives);
    }

    let _ = list.process(
        &ListInput::TransitionEnd { index: 0, property: "transform".to_string() },
        &layout,
        t0 + now,
    );
    assert_eq!(completed.get(), requested.get(), "delete callback lost");
});
