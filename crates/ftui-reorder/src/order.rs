#![forbid(unsafe_code)]

//! Host-side ordered sequence.
//!
//! The controller only ever emits `Reorder { from, to }`; applying it is the
//! host's job. [`ListOrder`] makes that step explicit: every mutation consumes
//! the old order and yields a new one, so no two holders can splice the same
//! backing array out from under each other.
//!
//! `moved(a, b)` followed by `moved(b, a)` restores the original order.

use std::fmt;

/// An ordered list of host items.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListOrder<T> {
    items: Vec<T>,
}

impl<T> Default for ListOrder<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> ListOrder<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// The order with the element at `from` moved to `to`.
    pub fn moved(mut self, from: usize, to: usize) -> Result<Self, OrderError> {
        let len = self.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(OrderError::OutOfRange { index, len });
            }
        }
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
        Ok(self)
    }

    /// The order without the element at `index`, plus that element.
    pub fn removed(mut self, index: usize) -> Result<(Self, T), OrderError> {
        let len = self.items.len();
        if index >= len {
            return Err(OrderError::OutOfRange { index, len });
        }
        let item = self.items.remove(index);
        Ok((self, item))
    }

    /// The order with `item` appended.
    #[must_use]
    pub fn pushed(mut self, item: T) -> Self {
        self.items.push(item);
        self
    }

    /// Apply `f` to the element at `index` in place.
    pub fn update(&mut self, index: usize, f: impl FnOnce(&mut T)) -> Result<(), OrderError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(OrderError::OutOfRange { index, len })?;
        f(item);
        Ok(())
    }
}

impl<T> FromIterator<T> for ListOrder<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a ListOrder<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Ordering errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderError {
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for list of length {len}")
            }
        }
    }
}

impl std::error::Error for OrderError {}
