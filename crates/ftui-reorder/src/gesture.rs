#![forbid(unsafe_code)]

//! Pointer gesture classification: click versus drag.
//!
//! [`PointerGestureClassifier`] turns a press/release pair on a list item into
//! either a [`GestureSignal::Click`] or a drag lifecycle
//! ([`GestureSignal::DragStart`] … [`GestureSignal::DragEnd`]), using a
//! one-shot timer instead of a movement threshold.
//!
//! # State Machine
//!
//! ```text
//! Idle --down--> Armed --timer--> Dragging --up--> Idle
//!                  \----up-----> Idle (Click)
//! ```
//!
//! # Invariants
//!
//! 1. Click and DragStart never both emit for the same press.
//! 2. The timer is owned by the classifier and is cancelled on every path out
//!    of `Armed` that is not the timer itself firing.
//! 3. At most one gesture is tracked; a second press (another button, another
//!    finger) is rejected until the first one resolves.
//! 4. Only [`PointerButton::Primary`](crate::event::PointerButton::Primary)
//!    presses start a gesture.
//!
//! # Time
//!
//! The timer is polled, not scheduled: callers pass `now` and call
//! [`poll`](PointerGestureClassifier::poll) before feeding any other event, so
//! a release that arrives late without an intervening tick still resolves as
//! a drag.

use std::time::Duration;

use web_time::Instant;

use crate::event::{PointerEvent, PointerId};
use crate::geometry::{Point, Rect};

/// Press duration separating a click from a drag.
pub const CLICK_THRESHOLD: Duration = Duration::from_millis(200);

// ---------------------------------------------------------------------------
// Timer
// ---------------------------------------------------------------------------

/// Owned, cancellable one-shot deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickTimer {
    deadline: Option<Instant>,
}

impl ClickTimer {
    /// Arm the timer to fire `after` from `now`, replacing any prior deadline.
    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }

    /// Disarm the timer. Returns `true` if it was armed.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Whether a deadline is pending.
    #[inline]
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Pending deadline, if armed.
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the deadline if it has been reached. Fires at most once.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Observable classifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Armed,
    Dragging,
}

/// Output of the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSignal {
    /// Released before the threshold.
    Click { index: usize },
    /// Threshold reached while held. `offset` is the pointer position relative
    /// to the item's bounding rectangle at press time.
    DragStart {
        index: usize,
        pointer: PointerId,
        offset: Point,
    },
    /// Released while dragging.
    DragEnd { index: usize },
}

/// Why the classifier refused an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureRejection {
    /// Secondary/auxiliary buttons never start or finish a gesture.
    NonPrimaryButton,
    /// A press arrived while another gesture is still tracked.
    GestureInProgress,
    /// The event came from a pointer other than the tracked one.
    PointerMismatch,
    /// Nothing is pressed.
    NotPressed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Armed {
        index: usize,
        pointer: PointerId,
        pressed_at: Instant,
        offset: Point,
    },
    Dragging {
        index: usize,
        pointer: PointerId,
    },
}

// ---------------------------------------------------------------------------
// PointerGestureClassifier
// ---------------------------------------------------------------------------

/// Click/drag disambiguation for a single pointer.
#[derive(Debug, Clone)]
pub struct PointerGestureClassifier {
    threshold: Duration,
    drag_enabled: bool,
    phase: Phase,
    timer: ClickTimer,
}

impl Default for PointerGestureClassifier {
    fn default() -> Self {
        Self::new(CLICK_THRESHOLD)
    }
}

impl PointerGestureClassifier {
    /// Create a classifier with the given click/drag threshold.
    #[must_use]
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            drag_enabled: true,
            phase: Phase::Idle,
            timer: ClickTimer::default(),
        }
    }

    /// When disabled, presses still classify as clicks but the timer is never
    /// armed, so no drag can start.
    #[must_use]
    pub fn with_drag_enabled(mut self, enabled: bool) -> Self {
        self.drag_enabled = enabled;
        self
    }

    /// Configured threshold.
    #[inline]
    #[must_use]
    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        match self.phase {
            Phase::Idle => GestureState::Idle,
            Phase::Armed { .. } => GestureState::Armed,
            Phase::Dragging { .. } => GestureState::Dragging,
        }
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Time of the tracked press, while armed.
    #[must_use]
    pub fn pressed_at(&self) -> Option<Instant> {
        match self.phase {
            Phase::Armed { pressed_at, .. } => Some(pressed_at),
            _ => None,
        }
    }

    /// Read-only view of the owned timer.
    #[must_use]
    pub fn timer(&self) -> &ClickTimer {
        &self.timer
    }

    /// Press on the item at `index` whose bounding rectangle is `item_rect`.
    pub fn pointer_down(
        &mut self,
        index: usize,
        event: &PointerEvent,
        item_rect: Rect,
        now: Instant,
    ) -> Result<(), GestureRejection> {
        if !event.is_primary() {
            return Err(GestureRejection::NonPrimaryButton);
        }
        if !matches!(self.phase, Phase::Idle) {
            return Err(GestureRejection::GestureInProgress);
        }

        let offset = (event.position.sanitized() - item_rect.origin()).sanitized();
        self.phase = Phase::Armed {
            index,
            pointer: event.pointer,
            pressed_at: now,
            offset,
        };
        if self.drag_enabled {
            self.timer.arm(now, self.threshold);
        }
        Ok(())
    }

    /// Fire the timer if due. Returns `DragStart` exactly once per press that
    /// is held past the threshold.
    pub fn poll(&mut self, now: Instant) -> Option<GestureSignal> {
        if !self.timer.fire(now) {
            return None;
        }
        // A fired timer outside Armed means the press already resolved.
        let Phase::Armed {
            index,
            pointer,
            offset,
            ..
        } = self.phase
        else {
            return None;
        };
        self.phase = Phase::Dragging { index, pointer };
        Some(GestureSignal::DragStart {
            index,
            pointer,
            offset,
        })
    }

    /// Release. Call [`poll`](Self::poll) first with the same `now`.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> Result<GestureSignal, GestureRejection> {
        let (index, pointer, dragging) = match self.phase {
            Phase::Idle => return Err(GestureRejection::NotPressed),
            Phase::Armed { index, pointer, .. } => (index, pointer, false),
            Phase::Dragging { index, pointer } => (index, pointer, true),
        };
        if event.pointer != pointer {
            return Err(GestureRejection::PointerMismatch);
        }
        if !event.is_primary() {
            return Err(GestureRejection::NonPrimaryButton);
        }

        self.timer.cancel();
        self.phase = Phase::Idle;
        if dragging {
            Ok(GestureSignal::DragEnd { index })
        } else {
            Ok(GestureSignal::Click { index })
        }
    }

    /// Check that a move belongs to the active drag; returns the dragged index.
    pub fn track_move(&self, event: &PointerEvent) -> Result<usize, GestureRejection> {
        match self.phase {
            Phase::Dragging { index, pointer } if pointer == event.pointer => Ok(index),
            Phase::Dragging { .. } => Err(GestureRejection::PointerMismatch),
            // Moves before the drag starts are not observed.
            Phase::Idle | Phase::Armed { .. } => Err(GestureRejection::NotPressed),
        }
    }

    /// Abandon any tracked gesture. Returns the dragged index if a drag was
    /// interrupted.
    pub fn cancel(&mut self) -> Option<usize> {
        self.timer.cancel();
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging { index, .. } => Some(index),
            Phase::Idle | Phase::Armed { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{PointerButton, TouchPoint};

    const MS_50: Duration = Duration::from_millis(50);
    const MS_199: Duration = Duration::from_millis(199);
    const MS_200: Duration = Duration::from_millis(200);
    const MS_300: Duration = Duration::from_millis(300);

    fn item() -> Rect {
        Rect::new(0.0, 10.0, 100.0, 10.0)
    }

    fn down(gc: &mut PointerGestureClassifier, now: Instant) {
        gc.pointer_down(0, &PointerEvent::primary(5.0, 15.0), item(), now)
            .expect("primary press accepted");
    }

    #[test]
    fn quick_release_is_click() {
        let mut gc = PointerGestureClassifier::default();
        let t = Instant::now();
        down(&mut gc, t);
        assert_eq!(gc.state(), GestureState::Armed);

        assert!(gc.poll(t + MS_50).is_none());
        let signal = gc.pointer_up(&PointerEvent::primary(5.0, 15.0));
        assert_eq!(signal, Ok(GestureSignal::Click { index: 0 }));
        assert_eq!(gc.state(), GestureState::Idle);
        assert!(!gc.timer().is_armed());
    }

    #[test]
    fn timer_after_release_is_noop() {
        let mut gc = PointerGestureClassifier::default();
        let t = Instant::now();
        down(&mut gc, t);
        assert!(gc.poll(t + MS_199).is_none());
        gc.pointer_up(&PointerEvent::primary(5.0, 15.0)).expect("click");

        assert!(gc.poll(t + MS_300).is_none());
        assert_eq!(gc.state(), GestureState::Idle);
    }

    #[test]
    fn held_past_threshold_starts_drag_once() {
        let mut gc = PointerGestureClassifier::default();
        let t = Instant::now();
        down(&mut gc, t);

        let signal = gc.poll(t + MS_200);
        assert_eq!(
            signal,
            Some(GestureSignal::DragStart {
                index: 0,
                pointer: PointerId::Mouse,
                offset: Point::new(5.0, 5.0),
            })
        );
        assert!(gc.is_dragging());
        assert!(gc.poll(t + MS_300).is_none());

        let end = gc.pointer_up(&PointerEvent::primary(5.0, 40.0));
        assert_eq!(end, Ok(GestureSignal::DragEnd { index: 0 }));
    }

    #[test]
    fn non_primary_press_rejected() {
        let mut gc = PointerGestureClassifier::default();
        let result = gc.pointer_down(
            0,
            &PointerEvent::mouse(PointerButton::Secondary, 0.0, 0.0),
            item(),
            Instant::now(),
        );
        assert_eq!(result, Err(GestureRejection::NonPrimaryButton));
        assert_eq!(gc.state(), GestureState::Idle);
    }

    #[test]
    fn second_press_rejected_while_armed() {
        let mut gc = PointerGestureClassifier::default();
        let t = Instant::now();
        down(&mut gc, t);
        let result = gc.pointer_down(1, &PointerEvent::primary(5.0, 25.0), item(), t + MS_50);
        assert_eq!(result, Err(GestureRejection::GestureInProgress));
        assert_eq!(gc.pressed_at(), Some(t));
    }

    #[test]
    fn second_finger_ignored() {
        let mut gc = PointerGestureClassifier::default();
        let t = Instant::now();
        let first = PointerEvent::from_target_touches(&[TouchPoint::new(1, 5.0, 15.0)])
            .expect("touch");
        gc.pointer_down(0, &first, item(), t).expect("first finger");
        gc.poll(t + MS_200).expect("drag start");

        let other = PointerEvent::from_target_touches(&[TouchPoint::new(2, 5.0, 40.0)])
            .expect("touch");
        assert_eq!(gc.track_move(&other), Err(GestureRejection::PointerMismatch));
        assert_eq!(gc.pointer_up(&other), Err(GestureRejection::PointerMismatch));
        assert!(gc.is_dragging());
        assert_eq!(gc.track_move(&first), Ok(0));
    }

    #[test]
    fn moves_before_drag_are_not_tracked() {
        let mut gc = PointerGestureClassifier::default();
        let t = Instant::now();
        down(&mut gc, t);
        assert_eq!(
            gc.track_move(&PointerEvent::primary(5.0, 30.0)),
            Err(GestureRejection::NotPressed)
        );
    }

    #[test]
    fn drag_disabled_always_clicks() {
        let mut gc = PointerGestureClassifier::default().with_drag_enabled(false);
        let t = Instant::now();
        down(&mut gc, t);
        assert!(!gc.timer().is_armed());
        assert!(gc.poll(t + Duration::from_secs(5)).is_none());
        assert_eq!(
            gc.pointer_up(&PointerEvent::primary(5.0, 15.0)),
            Ok(GestureSignal::Click { index: 0 })
        );
    }

    #[test]
    fn cancel_reports_interrupted_drag() {
        let mut gc = PointerGestureClassifier::default();
        let t = Instant::now();
        down(&mut gc, t);
        assert_eq!(gc.cancel(), None);

        down(&mut gc, t);
        gc.poll(t + MS_200);
        assert_eq!(gc.cancel(), Some(0));
        assert_eq!(gc.state(), GestureState::Idle);
        assert!(!gc.timer().is_armed());
    }

    #[test]
    fn release_without_press() {
        let mut gc = PointerGestureClassifier::default();
        assert_eq!(
            gc.pointer_up(&PointerEvent::primary(0.0, 0.0)),
            Err(GestureRejection::NotPressed)
        );
    }

    #[test]
    fn timer_fires_once() {
        let mut timer = ClickTimer::default();
        let t = Instant::now();
        timer.arm(t, MS_200);
        assert!(!timer.fire(t + MS_50));
        assert!(timer.fire(t + MS_200));
        assert!(!timer.fire(t + MS_300));
        assert!(!timer.cancel());
    }
}
