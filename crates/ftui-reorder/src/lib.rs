#![forbid(unsafe_code)]

//! Headless core of a drag-to-reorder list with animated removal.
//!
//! # Role
//! `ftui-reorder` decides what a reorderable list should look like while the
//! user presses, drags and releases items, and while removed items animate
//! out. It never touches a rendering tree: the host reports geometry through
//! [`ListLayout`], feeds [`ListInput`]s, and applies the returned
//! [`ItemDirective`]s and [`CaptureCommand`]s.
//!
//! # Primary responsibilities
//! - **PointerGestureClassifier**: click vs drag by press duration.
//! - **IndexResolver**: drop target from the dragged item's midpoint.
//! - **DragSession** and the sibling planner: per-item transforms while dragging.
//! - **DeleteTransitionCoordinator**: one removal animation at a time.
//! - **ListController**: the orchestrator the host talks to.
//!
//! # How it fits in the system
//! Time is injected (`now`) and the click timer is polled, so every run is
//! deterministic. `ftui-reorder-harness` drives the controller against a
//! simulated [`StackLayout`] and records a JSONL trace.
//!
//! ```
//! use ftui_reorder::{ListConfig, ListController, ListInput, ListLayout, PointerEvent, StackLayout};
//! use std::time::Duration;
//! use web_time::Instant;
//!
//! let mut list = ListController::new(ListConfig::default()).unwrap();
//! let mut layout = StackLayout::uniform(5, 10.0);
//! let t0 = Instant::now();
//!
//! let press = ListInput::PointerDown { index: 0, event: PointerEvent::primary(5.0, 5.0) };
//! list.process(&press, &layout, t0);
//! list.process(&ListInput::Tick, &layout, t0 + Duration::from_millis(200));
//!
//! let drag = ListInput::PointerMove(PointerEvent::primary(5.0, 25.0));
//! list.process(&drag, &layout, t0 + Duration::from_millis(250));
//! layout.apply(&list.directives(layout.len()));
//!
//! let release = ListInput::PointerUp(PointerEvent::primary(5.0, 25.0));
//! let done = list.process(&release, &layout, t0 + Duration::from_millis(300));
//! assert_eq!(done.reorder(), Some((0, 2)));
//! ```

pub mod config;
pub mod controller;
pub mod delete;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod index;
pub mod layout;
pub mod logging;
pub mod order;
pub mod planner;
pub mod session;

pub use config::{ListConfig, ListConfigError};
pub use controller::{
    CaptureCommand, DispatchOutcome, IgnoredReason, ListController, ListDispatch, ListSignal,
};
pub use delete::{DeleteOutcome, DeleteTransitionCoordinator, ImmediateReason};
pub use event::{ListInput, PointerButton, PointerEvent, PointerId, TouchPoint};
pub use geometry::{Point, Rect};
pub use gesture::{GestureState, PointerGestureClassifier};
pub use index::{resolve_in_layout, resolve_index};
pub use layout::{ListLayout, StackLayout};
pub use order::{ListOrder, OrderError};
pub use planner::{ItemDirective, ItemFlags, Transform};
pub use session::DragSession;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
