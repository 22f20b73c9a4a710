#![forbid(unsafe_code)]

//! Per-item render directives and the sibling transform rule.
//!
//! While a drag is open every item gets a fresh directive on each move:
//!
//! - the dragged item follows the pointer with its accumulated translation;
//! - items between the origin and the target slide by one outer height toward
//!   the origin, closing the gap the dragged item left and opening one where
//!   it will land;
//! - everything else stays put.
//!
//! Transforms are visual-only. The rendering layer must not reflow on them,
//! otherwise the sibling heights fed back into index resolution would shift
//! under the drag.

use std::fmt;
use std::time::Duration;

use bitflags::bitflags;

use crate::geometry::{Point, finite_or_zero};
use crate::session::DragSession;

/// A 2D visual translation requested for one item.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transform {
    /// Free translation (the dragged item).
    Translate { x: f32, y: f32 },
    /// Vertical-only translation (siblings and delete shifts).
    TranslateY(f32),
}

impl Transform {
    /// Translation as a point.
    #[must_use]
    pub fn offset(self) -> Point {
        match self {
            Self::Translate { x, y } => Point::new(x, y),
            Self::TranslateY(y) => Point::new(0.0, y),
        }
    }

    /// CSS `transform` value, e.g. `translate(3px, 4px)` or `translateY(-10px)`.
    #[must_use]
    pub fn to_css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Translate { x, y } => write!(
                f,
                "translate({}px, {}px)",
                finite_or_zero(x),
                finite_or_zero(y)
            ),
            Self::TranslateY(y) => write!(f, "translateY({}px)", finite_or_zero(y)),
        }
    }
}

bitflags! {
    /// Render flags attached to a directive.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ItemFlags: u8 {
        /// The item is the one being dragged.
        const DRAGGING   = 0b0000_0001;
        /// The item is displaced to make room for the dragged item.
        const SHIFTED    = 0b0000_0010;
        /// The host should animate transform changes on this item.
        const TRANSITION = 0b0000_0100;
    }
}

/// What the rendering layer should apply to the item at `index`.
///
/// `transition` is set exactly when `flags` contains [`ItemFlags::TRANSITION`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDirective {
    pub index: usize,
    pub transform: Option<Transform>,
    pub flags: ItemFlags,
    /// How long transform changes on this item should animate.
    pub transition: Option<Duration>,
}

impl ItemDirective {
    /// A directive with no transform and no flags.
    #[must_use]
    pub const fn rest(index: usize) -> Self {
        Self {
            index,
            transform: None,
            flags: ItemFlags::empty(),
            transition: None,
        }
    }

    /// Shift directive for an item displaced by a removal.
    #[must_use]
    pub const fn shifted(index: usize, transform: Transform, transition: Duration) -> Self {
        Self {
            index,
            transform: Some(transform),
            flags: ItemFlags::SHIFTED.union(ItemFlags::TRANSITION),
            transition: Some(transition),
        }
    }

    /// Whether transform changes should animate.
    #[inline]
    #[must_use]
    pub fn transition_enabled(&self) -> bool {
        self.flags.contains(ItemFlags::TRANSITION)
    }

    /// Whether this is the dragged item.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.flags.contains(ItemFlags::DRAGGING)
    }

    /// CSS text for the transform, if any.
    #[must_use]
    pub fn css_transform(&self) -> Option<String> {
        self.transform.map(Transform::to_css)
    }

    /// CSS `transition` value, e.g. `transform 300ms`.
    #[must_use]
    pub fn css_transition(&self) -> Option<String> {
        self.transition
            .map(|duration| format!("transform {}ms", duration.as_millis()))
    }
}

/// Transform for the item at `index` under the sibling rule.
#[must_use]
pub fn sibling_transform(session: &DragSession, index: usize) -> Option<Transform> {
    let origin = session.origin_index();
    let target = session.target_index();
    if index == origin {
        let offset = session.accumulated();
        return Some(Transform::Translate {
            x: offset.x,
            y: offset.y,
        });
    }

    let height = session.item_height();
    if target < origin && (target..origin).contains(&index) {
        Some(Transform::TranslateY(height))
    } else if target > origin && index > origin && index <= target {
        Some(Transform::TranslateY(-height))
    } else {
        None
    }
}

/// Directive for the item at `index` while `session` is open.
///
/// Siblings animate into their new slots over `transition`; the dragged item
/// tracks the pointer without one.
#[must_use]
pub fn drag_directive(
    session: &DragSession,
    index: usize,
    transition: Duration,
) -> ItemDirective {
    let transform = sibling_transform(session, index);
    let flags = if index == session.origin_index() {
        ItemFlags::DRAGGING
    } else if transform.is_some() {
        ItemFlags::SHIFTED | ItemFlags::TRANSITION
    } else {
        ItemFlags::TRANSITION
    };
    ItemDirective {
        index,
        transform,
        flags,
        transition: flags.contains(ItemFlags::TRANSITION).then_some(transition),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PointerId;

    fn session(origin: usize, target: usize) -> DragSession {
        let mut session = DragSession::start(origin, PointerId::Mouse, Point::ZERO, 10.0);
        session.set_target_index(target);
        session
    }

    #[test]
    fn css_strings() {
        assert_eq!(
            Transform::Translate { x: 3.0, y: -4.5 }.to_css(),
            "translate(3px, -4.5px)"
        );
        assert_eq!(Transform::TranslateY(10.0).to_css(), "translateY(10px)");
        assert_eq!(Transform::TranslateY(-10.0).to_css(), "translateY(-10px)");
        assert_eq!(Transform::TranslateY(f32::NAN).to_css(), "translateY(0px)");
    }

    #[test]
    fn dragging_down_shifts_between_up() {
        let s = session(0, 2);
        assert_eq!(sibling_transform(&s, 1), Some(Transform::TranslateY(-10.0)));
        assert_eq!(sibling_transform(&s, 2), Some(Transform::TranslateY(-10.0)));
        assert_eq!(sibling_transform(&s, 3), None);
        assert!(matches!(
            sibling_transform(&s, 0),
            Some(Transform::Translate { .. })
        ));
    }

    #[test]
    fn dragging_up_shifts_between_down() {
        let s = session(3, 1);
        assert_eq!(sibling_transform(&s, 0), None);
        assert_eq!(sibling_transform(&s, 1), Some(Transform::TranslateY(10.0)));
        assert_eq!(sibling_transform(&s, 2), Some(Transform::TranslateY(10.0)));
        assert_eq!(sibling_transform(&s, 4), None);
    }

    #[test]
    fn unmoved_drag_shifts_nothing() {
        let s = session(2, 2);
        for i in [0, 1, 3, 4] {
            assert_eq!(sibling_transform(&s, i), None);
        }
    }

    #[test]
    fn directive_flags() {
        let s = session(0, 1);
        let duration = Duration::from_millis(150);
        let dragged = drag_directive(&s, 0, duration);
        assert!(dragged.is_dragging());
        assert!(!dragged.transition_enabled());
        assert_eq!(dragged.css_transition(), None);

        let shifted = drag_directive(&s, 1, duration);
        assert!(shifted.flags.contains(ItemFlags::SHIFTED));
        assert!(shifted.transition_enabled());
        assert_eq!(shifted.css_transform().as_deref(), Some("translateY(-10px)"));
        assert_eq!(shifted.css_transition().as_deref(), Some("transform 150ms"));

        let still = drag_directive(&s, 4, duration);
        assert_eq!(still.transform, None);
        assert_eq!(still.transition, Some(duration));
    }

    #[test]
    fn removal_shift_directive() {
        let d = ItemDirective::shifted(3, Transform::TranslateY(-12.0), Duration::from_millis(300));
        assert_eq!(d.flags, ItemFlags::SHIFTED | ItemFlags::TRANSITION);
        assert_eq!(d.css_transition().as_deref(), Some("transform 300ms"));
        assert_eq!(ItemDirective::rest(3).css_transition(), None);
    }
}
