#![forbid(unsafe_code)]

//! Canonical input types delivered by the rendering layer.
//!
//! # Design Notes
//!
//! - Coordinates are client (viewport) pixels, y grows downward.
//! - Mouse input has a single implicit pointer, [`PointerId::Mouse`].
//! - Touch input arrives as a target-touch list; only its first entry is
//!   ever turned into a [`PointerEvent`]. Additional fingers never start or
//!   steer a gesture.

use crate::geometry::Point;

/// CSS property name whose transition completion finishes a removal.
pub const TRANSFORM_PROPERTY: &str = "transform";

/// Identifies the pointer that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerId {
    /// The (single) mouse pointer.
    Mouse,
    /// A touch point, by its host-assigned identifier.
    Touch(u32),
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerButton {
    /// Left mouse button, or any touch contact.
    #[default]
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button (scroll wheel click).
    Auxiliary,
}

/// One entry of a touch event's target-touch list.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchPoint {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    /// Create a new touch point.
    #[must_use]
    pub const fn new(id: u32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// A pointer (mouse or first-touch) sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    /// Which pointer produced the sample.
    pub pointer: PointerId,
    /// Button involved; always [`PointerButton::Primary`] for touch.
    pub button: PointerButton,
    /// Client coordinates.
    pub position: Point,
}

impl PointerEvent {
    /// Create a mouse sample.
    #[must_use]
    pub const fn mouse(button: PointerButton, x: f32, y: f32) -> Self {
        Self {
            pointer: PointerId::Mouse,
            button,
            position: Point::new(x, y),
        }
    }

    /// Create a primary-button mouse sample.
    #[must_use]
    pub const fn primary(x: f32, y: f32) -> Self {
        Self::mouse(PointerButton::Primary, x, y)
    }

    /// Build a sample from a touch event's target-touch list.
    ///
    /// Only the first entry is used. Returns `None` for an empty list.
    #[must_use]
    pub fn from_target_touches(touches: &[TouchPoint]) -> Option<Self> {
        let first = touches.first()?;
        Some(Self {
            pointer: PointerId::Touch(first.id),
            button: PointerButton::Primary,
            position: Point::new(first.x, first.y),
        })
    }

    /// Whether this sample may start or continue a gesture.
    #[inline]
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }
}

/// Input consumed by [`ListController::process`](crate::controller::ListController::process).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListInput {
    /// Pointer pressed on the item currently at `index`.
    PointerDown { index: usize, event: PointerEvent },
    /// Pointer moved anywhere in the viewport.
    PointerMove(PointerEvent),
    /// Pointer released anywhere in the viewport.
    PointerUp(PointerEvent),
    /// The host aborted the pointer stream (pointercancel, lost capture).
    PointerCancel,
    /// The window lost focus.
    FocusLost,
    /// Periodic poll; fires the click/drag timer when due.
    Tick,
    /// A CSS transition finished on the item at `index`.
    TransitionEnd { index: usize, property: String },
}

impl ListInput {
    /// Short operation name for logs and traces.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::PointerDown { .. } => "pointer_down",
            Self::PointerMove(_) => "pointer_move",
            Self::PointerUp(_) => "pointer_up",
            Self::PointerCancel => "pointer_cancel",
            Self::FocusLost => "focus_lost",
            Self::Tick => "tick",
            Self::TransitionEnd { .. } => "transition_end",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_touch_wins() {
        let touches = [TouchPoint::new(7, 1.0, 2.0), TouchPoint::new(9, 50.0, 60.0)];
        let event = PointerEvent::from_target_touches(&touches).expect("non-empty touch list");
        assert_eq!(event.pointer, PointerId::Touch(7));
        assert_eq!(event.position, Point::new(1.0, 2.0));
        assert!(event.is_primary());
    }

    #[test]
    fn empty_touch_list_yields_nothing() {
        assert!(PointerEvent::from_target_touches(&[]).is_none());
    }

    #[test]
    fn secondary_mouse_is_not_primary() {
        let event = PointerEvent::mouse(PointerButton::Secondary, 0.0, 0.0);
        assert!(!event.is_primary());
        assert_eq!(event.pointer, PointerId::Mouse);
    }

    #[test]
    fn input_names() {
        assert_eq!(ListInput::Tick.name(), "tick");
        assert_eq!(
            ListInput::PointerMove(PointerEvent::primary(0.0, 0.0)).name(),
            "pointer_move"
        );
    }
}
