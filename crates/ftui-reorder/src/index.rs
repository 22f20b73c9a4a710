#![forbid(unsafe_code)]

//! Drop-index resolution.
//!
//! Maps the dragged item's vertical midpoint to the position it would take
//! if dropped now, by walking the non-dragged siblings from the list top.
//!
//! # Invariants
//!
//! 1. The result lies in `[0, n]` where `n` is the number of siblings.
//! 2. A sibling whose bottom edge equals the midpoint counts as "before"
//!    (the walk advances only while `stop <= midpoint`).
//! 3. Monotonic: for fixed sibling geometry, a larger midpoint never yields a
//!    smaller index. Small jitter therefore cannot make the target oscillate
//!    unless it straddles a sibling boundary.
//!
//! # Failure Modes
//!
//! - Non-finite or negative heights count as zero.
//! - A non-finite list top is treated as `0.0`.
//! - A `NaN` midpoint resolves to `0`.

use crate::geometry::{finite_or_zero, non_negative_length};
use crate::layout::ListLayout;

/// Resolve the target index for `midpoint_y` given sibling outer heights in
/// list order (dragged item excluded).
#[must_use]
pub fn resolve_index<I>(midpoint_y: f32, list_top: f32, sibling_heights: I) -> usize
where
    I: IntoIterator<Item = f32>,
{
    if midpoint_y.is_nan() {
        return 0;
    }

    let mut stop = finite_or_zero(list_top);
    let mut index = 0;
    for height in sibling_heights {
        stop += non_negative_length(height);
        if stop > midpoint_y {
            break;
        }
        index += 1;
    }
    index
}

/// Resolve against a live layout, skipping the item at `dragged`.
#[must_use]
pub fn resolve_in_layout<L>(midpoint_y: f32, layout: &L, dragged: usize) -> usize
where
    L: ListLayout + ?Sized,
{
    let heights = (0..layout.len())
        .filter(|&i| i != dragged)
        .map(|i| layout.outer_height(i));
    resolve_index(midpoint_y, layout.list_top(), heights)
}
