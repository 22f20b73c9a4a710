#![forbid(unsafe_code)]

//! Animated removal, one at a time.
//!
//! When the host removes an item, everything from the removed position down
//! slides up by the removed item's outer height. The host finalizes the
//! removal only after the rendering layer reports that the `transform`
//! transition finished.
//!
//! # Invariants
//!
//! 1. At most one [`DeleteTransition`] is pending.
//! 2. A second request while one is pending never queues: its callback runs
//!    immediately and the pending transition is left untouched. Stacking two
//!    shifts would compound offsets; the second item jumps instead.
//! 3. Each callback runs exactly once.
//! 4. Finish signals for other properties, or with nothing pending, are
//!    ignored. A late signal can never re-run a callback.
//! 5. A request that would shift nothing (index at or past the end, zero or
//!    non-finite height) never becomes pending: no `transform` transition
//!    would start, so its finish signal would never arrive.

use std::fmt;

use crate::event::TRANSFORM_PROPERTY;
use crate::geometry::non_negative_length;
use crate::planner::Transform;

/// Completion callback handed over by the host.
pub type DeleteCallback = Box<dyn FnOnce()>;

/// One pending removal animation.
pub struct DeleteTransition {
    index: usize,
    height: f32,
    on_complete: DeleteCallback,
}

impl DeleteTransition {
    /// Position of the removed item.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Distance the items below shift up.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }
}

impl fmt::Debug for DeleteTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeleteTransition")
            .field("index", &self.index)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Why a request completed without animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImmediateReason {
    /// The index is at or past the end; nothing sits below it.
    PastEnd,
    /// The removed item had no usable height (zero or non-finite), so nothing
    /// would move.
    ZeroHeight,
    /// Delete transitions are disabled in the list configuration.
    TransitionsDisabled,
    /// Another removal is still animating.
    AlreadyPending,
}

/// Result of [`DeleteTransitionCoordinator::request_delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The shift was requested; the callback waits for the finish signal.
    Pending,
    /// The callback already ran.
    Completed(ImmediateReason),
}

/// Why a finish signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishRejection {
    NoPendingTransition,
    UnrelatedProperty,
}

/// Serializes removal animations.
#[derive(Debug)]
pub struct DeleteTransitionCoordinator {
    enabled: bool,
    pending: Option<DeleteTransition>,
}

impl Default for DeleteTransitionCoordinator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DeleteTransitionCoordinator {
    /// Create a coordinator. With `enabled == false` every request completes
    /// immediately.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            pending: None,
        }
    }

    /// Whether a removal is animating.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending removal, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&DeleteTransition> {
        self.pending.as_ref()
    }

    /// Request the removal animation for the item that was at `index`.
    ///
    /// `item_count` is the number of items currently mounted.
    pub fn request_delete(
        &mut self,
        index: usize,
        height: f32,
        item_count: usize,
        on_complete: impl FnOnce() + 'static,
    ) -> DeleteOutcome {
        let height = non_negative_length(height);
        let reason = if index >= item_count {
            Some(ImmediateReason::PastEnd)
        } else if height == 0.0 {
            Some(ImmediateReason::ZeroHeight)
        } else if !self.enabled {
            Some(ImmediateReason::TransitionsDisabled)
        } else if self.pending.is_some() {
            Some(ImmediateReason::AlreadyPending)
        } else {
            None
        };

        if let Some(reason) = reason {
            on_complete();
            return DeleteOutcome::Completed(reason);
        }

        self.pending = Some(DeleteTransition {
            index,
            height,
            on_complete: Box::new(on_complete),
        });
        DeleteOutcome::Pending
    }

    /// The rendering layer finished a transition on `property`.
    ///
    /// Returns the index of the completed removal.
    pub fn transition_finished(&mut self, property: &str) -> Result<usize, FinishRejection> {
        if self.pending.is_none() {
            return Err(FinishRejection::NoPendingTransition);
        }
        if property != TRANSFORM_PROPERTY {
            return Err(FinishRejection::UnrelatedProperty);
        }
        let Some(transition) = self.pending.take() else {
            return Err(FinishRejection::NoPendingTransition);
        };
        (transition.on_complete)();
        Ok(transition.index)
    }

    /// Shift for the item at `index` while a removal is pending.
    #[must_use]
    pub fn shift_for(&self, index: usize) -> Option<Transform> {
        let pending = self.pending.as_ref()?;
        (index >= pending.index).then(|| Transform::TranslateY(-pending.height))
    }
}
