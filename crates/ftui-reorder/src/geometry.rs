#![forbid(unsafe_code)]

//! Geometric primitives in client (viewport) coordinates.
//!
//! Hosts report geometry in floating-point pixels. Nothing here trusts the
//! host to hand over finite values: every accessor the drag math depends on
//! goes through [`finite_or_zero`] so a malformed rectangle can never turn
//! into `NaN` downstream.

use std::ops::{Add, AddAssign, Sub};

/// Replace `NaN` and infinities with `0.0`.
#[inline]
#[must_use]
pub fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Sanitize a length: non-finite or negative values become `0.0`.
#[inline]
#[must_use]
pub fn non_negative_length(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// A 2D point or translation in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin / zero translation.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Copy with both components passed through [`finite_or_zero`].
    #[inline]
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            x: finite_or_zero(self.x),
            y: finite_or_zero(self.y),
        }
    }

    /// True if both components are exactly zero.
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A bounding rectangle as reported by the rendering layer.
///
/// Origin at the top-left of the viewport, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge (alias for x).
    #[inline]
    #[must_use]
    pub fn left(&self) -> f32 {
        finite_or_zero(self.x)
    }

    /// Top edge (alias for y).
    #[inline]
    #[must_use]
    pub fn top(&self) -> f32 {
        finite_or_zero(self.y)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top() + non_negative_length(self.height)
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    /// Vertical midpoint; degenerate heights collapse onto the top edge.
    #[inline]
    #[must_use]
    pub fn center_y(&self) -> f32 {
        self.top() + non_negative_length(self.height) / 2.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.left() + non_negative_length(self.width)
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// The same rectangle moved by `offset`.
    #[inline]
    #[must_use]
    pub fn translated(&self, offset: Point) -> Rect {
        let offset = offset.sanitized();
        Rect {
            x: self.left() + offset.x,
            y: self.top() + offset.y,
            width: self.width,
            height: self.height,
        }
    }
}
