#![forbid(unsafe_code)]

//! Top-level orchestration of gestures, drags and removals for one list.
//!
//! [`ListController`] consumes [`ListInput`] from the rendering layer together
//! with a [`ListLayout`] it can query, and answers with a [`ListDispatch`]:
//! host-facing [`ListSignal`]s, pointer-capture commands, and an outcome that
//! says whether the input was applied or deliberately ignored. Render
//! directives are pulled separately via
//! [`directives`](ListController::directives) after each dispatch.
//!
//! # Lifecycle
//!
//! ```text
//! PointerDown -> (Tick ...) -> DragStarted + Acquire
//!             -> PointerMove* -> TargetChanged*
//!             -> PointerUp -> Reorder? + Release
//! ```
//!
//! # Invariants
//!
//! 1. At most one [`DragSession`] and at most one pending
//!    [`DeleteTransition`](crate::delete::DeleteTransition) exist.
//! 2. `CaptureCommand::Acquire` is emitted exactly when a session opens and
//!    `CaptureCommand::Release` exactly when it closes, on every exit path
//!    (release, cancel, focus loss, forced cancel by a delete, `reset`).
//! 3. `Reorder { from, to }` is emitted only at drag end and only when
//!    `from != to`.
//! 4. Nothing here panics or surfaces an error at runtime; inputs that make
//!    no sense in the current state come back as
//!    [`DispatchOutcome::Ignored`].
//!
//! # Conflict policy
//!
//! - A delete request while a press is armed or a drag is open cancels the
//!   gesture first (`DragCancelled`, no reorder), then proceeds.
//! - A press while a removal is animating is ignored
//!   ([`IgnoredReason::DeletePending`]).

use web_time::Instant;

use crate::config::{ListConfig, ListConfigError};
use crate::delete::{
    DeleteOutcome, DeleteTransition, DeleteTransitionCoordinator, FinishRejection,
};
use crate::event::{ListInput, PointerEvent, PointerId};
use crate::gesture::{GestureRejection, GestureSignal, GestureState, PointerGestureClassifier};
use crate::layout::ListLayout;
use crate::planner::{ItemDirective, drag_directive};
use crate::session::DragSession;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Host-facing notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "signal", rename_all = "snake_case"))]
pub enum ListSignal {
    /// The item was pressed and released before the drag threshold.
    Click { index: usize },
    /// A drag opened on the item.
    DragStarted { index: usize },
    /// The drop target moved while dragging.
    TargetChanged { from: usize, to: usize },
    /// The drag ended away from its origin; the host should move the item.
    Reorder { from: usize, to: usize },
    /// The drag was abandoned without reordering.
    DragCancelled { index: usize },
    /// A removal animation began.
    DeleteStarted { index: usize, height: f32 },
    /// A removal's completion callback ran.
    DeleteCompleted { index: usize, animated: bool },
}

/// Global pointer listener management, scoped to the drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaptureCommand {
    /// Start routing this pointer's move/up events to the controller.
    Acquire { pointer: PointerId },
    /// Stop routing them.
    Release { pointer: PointerId },
}

/// Why an input was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IgnoredReason {
    NonPrimaryButton,
    GestureInProgress,
    DeletePending,
    UnknownItem,
    NoActiveGesture,
    PointerMismatch,
    UnrelatedProperty,
    NoPendingTransition,
    NothingDue,
}

impl From<GestureRejection> for IgnoredReason {
    fn from(rejection: GestureRejection) -> Self {
        match rejection {
            GestureRejection::NonPrimaryButton => Self::NonPrimaryButton,
            GestureRejection::GestureInProgress => Self::GestureInProgress,
            GestureRejection::PointerMismatch => Self::PointerMismatch,
            GestureRejection::NotPressed => Self::NoActiveGesture,
        }
    }
}

impl From<FinishRejection> for IgnoredReason {
    fn from(rejection: FinishRejection) -> Self {
        match rejection {
            FinishRejection::NoPendingTransition => Self::NoPendingTransition,
            FinishRejection::UnrelatedProperty => Self::UnrelatedProperty,
        }
    }
}

/// Whether the input itself was acted on.
///
/// A due timer fires before any input is handled, so an ignored input can
/// still carry a `DragStarted` signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DispatchOutcome {
    #[default]
    Applied,
    Ignored(IgnoredReason),
}

/// Result of one controller call.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListDispatch {
    pub signals: Vec<ListSignal>,
    pub capture: Vec<CaptureCommand>,
    pub outcome: DispatchOutcome,
}

impl ListDispatch {
    /// The reorder emitted by this dispatch, if any.
    #[must_use]
    pub fn reorder(&self) -> Option<(usize, usize)> {
        self.signals.iter().find_map(|signal| match *signal {
            ListSignal::Reorder { from, to } => Some((from, to)),
            _ => None,
        })
    }

    /// Whether any signal matches `predicate`.
    pub fn any(&self, predicate: impl Fn(&ListSignal) -> bool) -> bool {
        self.signals.iter().any(predicate)
    }

    /// Whether the input was ignored.
    #[inline]
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self.outcome, DispatchOutcome::Ignored(_))
    }
}

// ---------------------------------------------------------------------------
// ListController
// ---------------------------------------------------------------------------

/// Owns the gesture classifier, the drag session and the delete coordinator
/// for one list.
#[derive(Debug)]
pub struct ListController {
    config: ListConfig,
    gesture: PointerGestureClassifier,
    session: Option<DragSession>,
    deletes: DeleteTransitionCoordinator,
}

impl ListController {
    /// Create a controller after validating `config`.
    pub fn new(config: ListConfig) -> Result<Self, ListConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            gesture: PointerGestureClassifier::new(config.click_threshold)
                .with_drag_enabled(config.is_draggable),
            session: None,
            deletes: DeleteTransitionCoordinator::new(config.enable_delete_transitions),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Whether a drag session is open.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The open drag session, if any.
    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Click/drag classifier state.
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    /// Whether a removal is animating.
    #[inline]
    #[must_use]
    pub fn is_delete_pending(&self) -> bool {
        self.deletes.is_pending()
    }

    /// The animating removal, if any.
    #[must_use]
    pub fn pending_delete(&self) -> Option<&DeleteTransition> {
        self.deletes.pending()
    }

    /// Feed one input.
    pub fn process<L>(&mut self, input: &ListInput, layout: &L, now: Instant) -> ListDispatch
    where
        L: ListLayout + ?Sized,
    {
        let mut dispatch = ListDispatch::default();
        self.poll_timer(layout, now, &mut dispatch);

        let result = match input {
            ListInput::PointerDown { index, event } => {
                self.on_pointer_down(*index, event, layout, now)
            }
            ListInput::PointerMove(event) => self.on_pointer_move(event, layout, &mut dispatch),
            ListInput::PointerUp(event) => self.on_pointer_up(event, layout, &mut dispatch),
            ListInput::PointerCancel | ListInput::FocusLost => self.on_cancel(&mut dispatch),
            ListInput::Tick => {
                if dispatch.signals.is_empty() {
                    Err(IgnoredReason::NothingDue)
                } else {
                    Ok(())
                }
            }
            ListInput::TransitionEnd { property, .. } => {
                self.on_transition_end(property, &mut dispatch)
            }
        };
        dispatch.outcome = match result {
            Ok(()) => DispatchOutcome::Applied,
            Err(reason) => DispatchOutcome::Ignored(reason),
        };

        #[cfg(feature = "tracing")]
        self.trace_dispatch(input.name(), &dispatch);

        dispatch
    }

    /// The host removed the item that was at `index` (outer height `height`);
    /// `item_count` is the host's item count after the removal.
    ///
    /// `on_complete` runs once the shift animation finishes, or right away if
    /// there is nothing to animate.
    pub fn request_delete(
        &mut self,
        index: usize,
        height: f32,
        item_count: usize,
        on_complete: impl FnOnce() + 'static,
    ) -> ListDispatch {
        let mut dispatch = ListDispatch::default();
        if self.gesture.state() != GestureState::Idle {
            self.gesture.cancel();
            self.close_session(false, &mut dispatch);
        }

        let outcome = self
            .deletes
            .request_delete(index, height, item_count, on_complete);
        dispatch.signals.push(match outcome {
            DeleteOutcome::Pending => ListSignal::DeleteStarted {
                index,
                height: self.deletes.pending().map_or(0.0, DeleteTransition::height),
            },
            DeleteOutcome::Completed(_) => ListSignal::DeleteCompleted {
                index,
                animated: false,
            },
        });

        #[cfg(feature = "tracing")]
        {
            let _span = tracing::debug_span!(
                "reorder.delete",
                index,
                height = f64::from(height),
                outcome = ?outcome
            )
            .entered();
        }

        dispatch
    }

    /// Abandon any gesture without reordering. Pending removals are kept.
    pub fn reset(&mut self) -> ListDispatch {
        let mut dispatch = ListDispatch::default();
        self.gesture.cancel();
        self.close_session(false, &mut dispatch);
        dispatch
    }

    /// Directive for the item at `index`.
    #[must_use]
    pub fn directive(&self, index: usize) -> ItemDirective {
        if let Some(session) = &self.session {
            return drag_directive(session, index, self.config.transition_duration);
        }
        match self.deletes.shift_for(index) {
            Some(shift) => ItemDirective::shifted(index, shift, self.config.transition_duration),
            None => ItemDirective::rest(index),
        }
    }

    /// Directives for items `0..item_count`.
    #[must_use]
    pub fn directives(&self, item_count: usize) -> Vec<ItemDirective> {
        (0..item_count).map(|index| self.directive(index)).collect()
    }

    /// Directives for `0..item_count`, or `None` when they equal `previous`
    /// and the host can skip re-rendering.
    #[must_use]
    pub fn directives_if_changed(
        &self,
        previous: &[ItemDirective],
        item_count: usize,
    ) -> Option<Vec<ItemDirective>> {
        let next = self.directives(item_count);
        (next.as_slice() != previous).then_some(next)
    }
}

// ---------------------------------------------------------------------------
// Internal handlers
// ---------------------------------------------------------------------------

impl ListController {
    fn poll_timer<L>(&mut self, layout: &L, now: Instant, dispatch: &mut ListDispatch)
    where
        L: ListLayout + ?Sized,
    {
        let Some(GestureSignal::DragStart {
            index,
            pointer,
            offset,
        }) = self.gesture.poll(now)
        else {
            return;
        };
        if index >= layout.len() {
            // The pressed item went away while armed.
            self.gesture.cancel();
            return;
        }

        self.session = Some(DragSession::start(
            index,
            pointer,
            offset,
            layout.outer_height(index),
        ));
        dispatch.capture.push(CaptureCommand::Acquire { pointer });
        dispatch.signals.push(ListSignal::DragStarted { index });
    }

    fn on_pointer_down<L>(
        &mut self,
        index: usize,
        event: &PointerEvent,
        layout: &L,
        now: Instant,
    ) -> Result<(), IgnoredReason>
    where
        L: ListLayout + ?Sized,
    {
        if self.deletes.is_pending() {
            return Err(IgnoredReason::DeletePending);
        }
        let rect = layout.item_rect(index).ok_or(IgnoredReason::UnknownItem)?;
        self.gesture.pointer_down(index, event, rect, now)?;
        Ok(())
    }

    fn on_pointer_move<L>(
        &mut self,
        event: &PointerEvent,
        layout: &L,
        dispatch: &mut ListDispatch,
    ) -> Result<(), IgnoredReason>
    where
        L: ListLayout + ?Sized,
    {
        self.gesture.track_move(event)?;
        let session = self.session.as_mut().ok_or(IgnoredReason::NoActiveGesture)?;
        let update = session
            .update(event.position, layout)
            .ok_or(IgnoredReason::UnknownItem)?;
        if update.target_changed() {
            dispatch.signals.push(ListSignal::TargetChanged {
                from: update.previous_target,
                to: update.target,
            });
        }
        Ok(())
    }

    fn on_pointer_up<L>(
        &mut self,
        event: &PointerEvent,
        layout: &L,
        dispatch: &mut ListDispatch,
    ) -> Result<(), IgnoredReason>
    where
        L: ListLayout + ?Sized,
    {
        match self.gesture.pointer_up(event)? {
            GestureSignal::Click { index } => dispatch.signals.push(ListSignal::Click { index }),
            GestureSignal::DragEnd { .. } => {
                if let Some(session) = self.session.as_mut() {
                    // The release position is the final sample.
                    session.update(event.position, layout);
                }
                self.close_session(true, dispatch);
            }
            GestureSignal::DragStart { .. } => {}
        }
        Ok(())
    }

    fn on_cancel(&mut self, dispatch: &mut ListDispatch) -> Result<(), IgnoredReason> {
        if self.gesture.state() == GestureState::Idle && self.session.is_none() {
            return Err(IgnoredReason::NoActiveGesture);
        }
        self.gesture.cancel();
        self.close_session(false, dispatch);
        Ok(())
    }

    fn on_transition_end(
        &mut self,
        property: &str,
        dispatch: &mut ListDispatch,
    ) -> Result<(), IgnoredReason> {
        let index = self.deletes.transition_finished(property)?;
        dispatch.signals.push(ListSignal::DeleteCompleted {
            index,
            animated: true,
        });
        Ok(())
    }

    /// Single exit path for a drag session.
    fn close_session(&mut self, commit: bool, dispatch: &mut ListDispatch) {
        let Some(session) = self.session.take() else {
            return;
        };
        dispatch.capture.push(CaptureCommand::Release {
            pointer: session.pointer(),
        });
        let origin = session.origin_index();
        if !commit {
            dispatch
                .signals
                .push(ListSignal::DragCancelled { index: origin });
        } else if session.is_displaced() {
            dispatch.signals.push(ListSignal::Reorder {
                from: origin,
                to: session.target_index(),
            });
        }
    }

    #[cfg(feature = "tracing")]
    fn trace_dispatch(&self, input: &'static str, dispatch: &ListDispatch) {
        let _span = tracing::debug_span!(
            "reorder.dispatch",
            input,
            outcome = ?dispatch.outcome,
            signals = dispatch.signals.len(),
            dragging = self.is_dragging(),
            delete_pending = self.deletes.is_pending()
        )
        .entered();
        if let Some((from, to)) = dispatch.reorder() {
            tracing::debug!(from, to, "reorder");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::StackLayout;
    use std::time::Duration;

    const MS_50: Duration = Duration::from_millis(50);
    const MS_200: Duration = Duration::from_millis(200);

    fn controller() -> ListController {
        ListController::new(ListConfig::default()).expect("default config is valid")
    }

    fn down(index: usize, x: f32, y: f32) -> ListInput {
        ListInput::PointerDown {
            index,
            event: PointerEvent::primary(x, y),
        }
    }

    #[test]
    fn invalid_config_rejected() {
        let config = ListConfig::default().with_click_threshold(Duration::ZERO);
        assert!(ListController::new(config).is_err());
    }

    #[test]
    fn click_then_nothing_due() {
        let mut lc = controller();
        let layout = StackLayout::uniform(3, 10.0);
        let t = Instant::now();

        let d = lc.process(&down(1, 5.0, 15.0), &layout, t);
        assert_eq!(d.outcome, DispatchOutcome::Applied);
        assert!(d.signals.is_empty());

        let d = lc.process(
            &ListInput::PointerUp(PointerEvent::primary(5.0, 15.0)),
            &layout,
            t + MS_50,
        );
        assert_eq!(d.signals, vec![ListSignal::Click { index: 1 }]);
        assert!(d.capture.is_empty());

        let d = lc.process(&ListInput::Tick, &layout, t + MS_200);
        assert_eq!(d.outcome, DispatchOutcome::Ignored(IgnoredReason::NothingDue));
    }

    #[test]
    fn drag_acquires_and_releases_capture() {
        let mut lc = controller();
        let layout = StackLayout::uniform(3, 10.0);
        let t = Instant::now();

        lc.process(&down(0, 5.0, 5.0), &layout, t);
        let d = lc.process(&ListInput::Tick, &layout, t + MS_200);
        assert_eq!(d.signals, vec![ListSignal::DragStarted { index: 0 }]);
        assert_eq!(
            d.capture,
            vec![CaptureCommand::Acquire {
                pointer: PointerId::Mouse
            }]
        );
        assert!(lc.is_dragging());

        let d = lc.process(&ListInput::FocusLost, &layout, t + MS_200);
        assert_eq!(d.signals, vec![ListSignal::DragCancelled { index: 0 }]);
        assert_eq!(
            d.capture,
            vec![CaptureCommand::Release {
                pointer: PointerId::Mouse
            }]
        );
        assert!(!lc.is_dragging());
    }

    #[test]
    fn unknown_item_press_ignored() {
        let mut lc = controller();
        let layout = StackLayout::uniform(2, 10.0);
        let d = lc.process(&down(5, 0.0, 0.0), &layout, Instant::now());
        assert_eq!(d.outcome, DispatchOutcome::Ignored(IgnoredReason::UnknownItem));
    }

    #[test]
    fn cancel_without_gesture_ignored() {
        let mut lc = controller();
        let layout = StackLayout::uniform(2, 10.0);
        let d = lc.process(&ListInput::PointerCancel, &layout, Instant::now());
        assert_eq!(
            d.outcome,
            DispatchOutcome::Ignored(IgnoredReason::NoActiveGesture)
        );
    }

    #[test]
    fn rest_directives_have_no_transform() {
        let lc = controller();
        let directives = lc.directives(3);
        assert_eq!(directives.len(), 3);
        assert!(directives.iter().all(|d| *d == ItemDirective::rest(d.index)));
        assert!(lc.directives_if_changed(&directives, 3).is_none());
        assert!(lc.directives_if_changed(&directives, 4).is_some());
    }

    #[test]
    fn configured_transition_duration_reaches_directives() {
        let config = ListConfig::default().with_transition_duration(Duration::from_millis(120));
        let mut lc = ListController::new(config).expect("valid config");
        let layout = StackLayout::uniform(4, 10.0);
        let t = Instant::now();

        lc.process(&down(0, 5.0, 5.0), &layout, t);
        lc.process(&ListInput::Tick, &layout, t + MS_200);
        lc.process(
            &ListInput::PointerMove(PointerEvent::primary(5.0, 15.0)),
            &layout,
            t + MS_200,
        );
        assert_eq!(lc.directive(0).transition, None);
        assert_eq!(
            lc.directive(1).css_transition().as_deref(),
            Some("transform 120ms")
        );
        assert_eq!(lc.directive(3).transition, Some(Duration::from_millis(120)));

        lc.reset();
        lc.request_delete(1, 10.0, 3, || {});
        assert_eq!(lc.directive(0).transition, None);
        assert_eq!(
            lc.directive(2).css_transition().as_deref(),
            Some("transform 120ms")
        );
    }

    #[test]
    fn reset_closes_session() {
        let mut lc = controller();
        let layout = StackLayout::uniform(3, 10.0);
        let t = Instant::now();
        lc.process(&down(2, 5.0, 25.0), &layout, t);
        lc.process(&ListInput::Tick, &layout, t + MS_200);

        let d = lc.reset();
        assert_eq!(d.signals, vec![ListSignal::DragCancelled { index: 2 }]);
        assert_eq!(d.capture.len(), 1);
        assert_eq!(lc.gesture_state(), GestureState::Idle);
        assert!(lc.reset().signals.is_empty());
    }
}
