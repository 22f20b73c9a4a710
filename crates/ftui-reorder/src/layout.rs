#![forbid(unsafe_code)]

//! Geometry contract with the rendering layer.
//!
//! The core never measures anything itself. It asks a [`ListLayout`] for the
//! list's top edge, each item's *visual* bounding rectangle (including any
//! transform currently applied) and each item's *outer* height (layout height
//! plus vertical margins, unaffected by transforms).
//!
//! [`StackLayout`] is a headless implementation: items stacked top to bottom
//! with visual offsets that never reflow their siblings. The harness and the
//! tests drive the controller against it.

use crate::geometry::{Point, Rect, non_negative_length};
use crate::planner::ItemDirective;

/// Geometry queries answered by the rendering layer.
pub trait ListLayout {
    /// Number of items currently mounted.
    fn len(&self) -> usize;

    /// Whether no items are mounted.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top edge of the list container in client coordinates.
    fn list_top(&self) -> f32;

    /// Visual bounding rectangle of the item at `index`, transform included.
    fn item_rect(&self, index: usize) -> Option<Rect>;

    /// Rendered height plus vertical margins of the item at `index`.
    fn outer_height(&self, index: usize) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct StackItem {
    height: f32,
    offset: Point,
}

/// Vertically stacked items with out-of-flow visual offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayout {
    top: f32,
    left: f32,
    width: f32,
    margin_top: f32,
    margin_bottom: f32,
    items: Vec<StackItem>,
}

impl Default for StackLayout {
    fn default() -> Self {
        Self {
            top: 0.0,
            left: 0.0,
            width: 200.0,
            margin_top: 0.0,
            margin_bottom: 0.0,
            items: Vec::new(),
        }
    }
}

impl StackLayout {
    /// Items with the given content heights, starting at `top`.
    #[must_use]
    pub fn new(top: f32, heights: impl IntoIterator<Item = f32>) -> Self {
        Self {
            top,
            items: heights
                .into_iter()
                .map(|height| StackItem {
                    height: non_negative_length(height),
                    offset: Point::ZERO,
                })
                .collect(),
            ..Self::default()
        }
    }

    /// `count` items of equal `height`, starting at 0.
    #[must_use]
    pub fn uniform(count: usize, height: f32) -> Self {
        Self::new(0.0, std::iter::repeat_n(height, count))
    }

    /// Vertical margins applied to every item.
    #[must_use]
    pub fn with_margins(mut self, top: f32, bottom: f32) -> Self {
        self.margin_top = non_negative_length(top);
        self.margin_bottom = non_negative_length(bottom);
        self
    }

    /// Horizontal placement of the items.
    #[must_use]
    pub fn with_columns(mut self, left: f32, width: f32) -> Self {
        self.left = left;
        self.width = non_negative_length(width);
        self
    }

    /// Append an item at the bottom.
    pub fn push(&mut self, height: f32) {
        self.items.push(StackItem {
            height: non_negative_length(height),
            offset: Point::ZERO,
        });
    }

    /// Unmount the item at `index`, returning its outer height.
    pub fn remove(&mut self, index: usize) -> Option<f32> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        Some(item.height + self.margin_top + self.margin_bottom)
    }

    /// Set the visual offset of one item.
    pub fn set_offset(&mut self, index: usize, offset: Point) {
        if let Some(item) = self.items.get_mut(index) {
            item.offset = offset.sanitized();
        }
    }

    /// Current visual offset of one item.
    #[must_use]
    pub fn offset(&self, index: usize) -> Option<Point> {
        self.items.get(index).map(|item| item.offset)
    }

    /// Render a set of directives: offsets follow transforms, absent
    /// transforms reset to zero.
    pub fn apply(&mut self, directives: &[ItemDirective]) {
        for directive in directives {
            let offset = directive
                .transform
                .map_or(Point::ZERO, |transform| transform.offset());
            self.set_offset(directive.index, offset);
        }
    }

    /// Clear every visual offset.
    pub fn reset_offsets(&mut self) {
        for item in &mut self.items {
            item.offset = Point::ZERO;
        }
    }

    /// Untransformed rectangle of the item at `index`.
    #[must_use]
    pub fn natural_rect(&self, index: usize) -> Option<Rect> {
        let item = self.items.get(index)?;
        let above: f32 = (0..index).map(|i| self.outer_height(i)).sum();
        Some(Rect::new(
            self.left,
            self.top + above + self.margin_top,
            self.width,
            item.height,
        ))
    }
}

impl ListLayout for StackLayout {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn list_top(&self) -> f32 {
        self.top
    }

    fn item_rect(&self, index: usize) -> Option<Rect> {
        let offset = self.items.get(index)?.offset;
        self.natural_rect(index).map(|rect| rect.translated(offset))
    }

    fn outer_height(&self, index: usize) -> f32 {
        self.items
            .get(index)
            .map_or(0.0, |item| item.height + self.margin_top + self.margin_bottom)
    }
}
