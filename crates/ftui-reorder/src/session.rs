#![forbid(unsafe_code)]

//! State of one in-progress drag.
//!
//! A [`DragSession`] exists from the moment the click threshold elapses with
//! the pointer still held until the pointer is released or the drag is
//! cancelled. The owning controller guarantees at most one is alive.
//!
//! # Accumulated translation
//!
//! The host reports the dragged item's bounding rectangle *including* the
//! translation applied so far. Each move therefore contributes only the
//! residual `pointer - rect.origin - pointer_offset`, and the session adds it
//! to the running total. Recomputing the translation from the absolute
//! pointer position would re-introduce the initial grab offset, so the total
//! is never reset mid-drag.

use crate::event::PointerId;
use crate::geometry::{Point, non_negative_length};
use crate::index::resolve_in_layout;
use crate::layout::ListLayout;

/// Result of applying one pointer sample to a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionUpdate {
    /// Translation added by this sample.
    pub delta: Point,
    /// Target index before the sample.
    pub previous_target: usize,
    /// Target index after the sample.
    pub target: usize,
}

impl SessionUpdate {
    /// Whether the sample moved the drop target.
    #[inline]
    #[must_use]
    pub fn target_changed(&self) -> bool {
        self.previous_target != self.target
    }
}

/// One open drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    origin_index: usize,
    pointer: PointerId,
    pointer_offset: Point,
    accumulated: Point,
    target_index: usize,
    item_height: f32,
}

impl DragSession {
    /// Open a session for the item at `origin_index`.
    ///
    /// `pointer_offset` is where the item was grabbed, relative to its
    /// bounding rectangle; `item_height` its outer height.
    #[must_use]
    pub fn start(
        origin_index: usize,
        pointer: PointerId,
        pointer_offset: Point,
        item_height: f32,
    ) -> Self {
        Self {
            origin_index,
            pointer,
            pointer_offset: pointer_offset.sanitized(),
            accumulated: Point::ZERO,
            target_index: origin_index,
            item_height: non_negative_length(item_height),
        }
    }

    #[inline]
    #[must_use]
    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    #[inline]
    #[must_use]
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    #[inline]
    #[must_use]
    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    #[inline]
    #[must_use]
    pub fn pointer_offset(&self) -> Point {
        self.pointer_offset
    }

    /// Total translation of the dragged item since the drag started.
    #[inline]
    #[must_use]
    pub fn accumulated(&self) -> Point {
        self.accumulated
    }

    /// Outer height of the dragged item, the unit siblings shift by.
    #[inline]
    #[must_use]
    pub fn item_height(&self) -> f32 {
        self.item_height
    }

    /// Override the drop target.
    pub fn set_target_index(&mut self, target: usize) {
        self.target_index = target;
    }

    /// Whether dropping now would change the order.
    #[inline]
    #[must_use]
    pub fn is_displaced(&self) -> bool {
        self.target_index != self.origin_index
    }

    /// Apply a pointer sample at client `position`.
    ///
    /// Returns `None` if the layout no longer reports a rectangle for the
    /// dragged item; the session is left untouched in that case.
    pub fn update<L>(&mut self, position: Point, layout: &L) -> Option<SessionUpdate>
    where
        L: ListLayout + ?Sized,
    {
        let rect = layout.item_rect(self.origin_index)?;
        let delta = (position.sanitized() - rect.origin() - self.pointer_offset).sanitized();
        self.accumulated = (self.accumulated + delta).sanitized();
        self.item_height = non_negative_length(layout.outer_height(self.origin_index));

        // Where the item's midpoint lands once this delta is rendered.
        let midpoint = rect.center_y() + delta.y;
        let previous_target = self.target_index;
        self.target_index = resolve_in_layout(midpoint, layout, self.origin_index);

        Some(SessionUpdate {
            delta,
            previous_target,
            target: self.target_index,
        })
    }
}
