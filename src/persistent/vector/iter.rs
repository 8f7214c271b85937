//! Iterators over [`PersistentVector`].
//!
//! Both iterators walk the vector by index and cache the leaf they are
//! currently reading, so a full pass descends the trie once per leaf rather
//! than once per element.

use std::iter::FusedIterator;
use std::slice;

use super::PersistentVector;
use super::node::{MASK, Node};
use crate::persistent::ReferenceCounter;

// =============================================================================
// Borrowing Iterator
// =============================================================================

/// An iterator over references to the elements of a [`PersistentVector`].
///
/// Created by [`PersistentVector::iter`]. Iterating twice over the same
/// vector yields the same elements in the same order.
pub struct PersistentVectorIterator<'a, T> {
    vector: &'a PersistentVector<T>,
    /// Index of the next element yielded from the front.
    front: usize,
    /// One past the index of the next element yielded from the back.
    back: usize,
    /// Unread elements of the leaf holding `front`.
    front_leaf: slice::Iter<'a, T>,
    /// Unread elements of the leaf holding `back - 1`.
    back_leaf: slice::Iter<'a, T>,
}

impl<'a, T> PersistentVectorIterator<'a, T> {
    pub(super) fn new(vector: &'a PersistentVector<T>) -> Self {
        Self {
            vector,
            front: 0,
            back: vector.len(),
            front_leaf: slice::Iter::default(),
            back_leaf: slice::Iter::default(),
        }
    }

    /// The elements of the leaf holding `index`.
    fn leaf_elements(&self, index: usize) -> &'a [T] {
        self.vector
            .leaf(index)
            .and_then(|leaf| leaf.elements())
            .unwrap_or_default()
    }
}

impl<'a, T> Iterator for PersistentVectorIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        if self.front_leaf.as_slice().is_empty() {
            let elements = self.leaf_elements(self.front);
            self.front_leaf = elements
                .get(self.front & MASK..)
                .unwrap_or_default()
                .iter();
        }
        self.front += 1;
        self.front_leaf.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, count: usize) -> Option<Self::Item> {
        if count >= self.back - self.front {
            self.front = self.back;
            return None;
        }
        if count < self.front_leaf.len() {
            if count > 0 {
                self.front_leaf.nth(count - 1);
            }
        } else {
            self.front_leaf = slice::Iter::default();
        }
        self.front += count;
        self.next()
    }
}

impl<T> DoubleEndedIterator for PersistentVectorIterator<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        if self.back_leaf.as_slice().is_empty() {
            let last = self.back - 1;
            let elements = self.leaf_elements(last);
            self.back_leaf = elements
                .get(..=(last & MASK))
                .unwrap_or_default()
                .iter();
        }
        self.back -= 1;
        self.back_leaf.next_back()
    }
}

impl<T> ExactSizeIterator for PersistentVectorIterator<'_, T> {}

impl<T> FusedIterator for PersistentVectorIterator<'_, T> {}

impl<T> Clone for PersistentVectorIterator<'_, T> {
    fn clone(&self) -> Self {
        Self {
            vector: self.vector,
            front: self.front,
            back: self.back,
            front_leaf: self.front_leaf.clone(),
            back_leaf: self.back_leaf.clone(),
        }
    }
}

// =============================================================================
// Owning Iterator
// =============================================================================

/// An owning iterator over the elements of a [`PersistentVector`].
///
/// Leaves may be shared with other vectors, so elements are cloned out of
/// them rather than moved.
pub struct PersistentVectorIntoIterator<T> {
    vector: PersistentVector<T>,
    front: usize,
    back: usize,
    /// The leaf holding `front`, kept alive independently of `vector`.
    front_leaf: Option<ReferenceCounter<Node<T>>>,
    /// The leaf holding `back - 1`.
    back_leaf: Option<ReferenceCounter<Node<T>>>,
}

impl<T> PersistentVectorIntoIterator<T> {
    pub(super) fn new(vector: PersistentVector<T>) -> Self {
        let back = vector.len();
        Self {
            vector,
            front: 0,
            back,
            front_leaf: None,
            back_leaf: None,
        }
    }

    /// Returns the cached leaf for `index`, refreshing `cache` when `index`
    /// starts a new leaf or nothing is cached yet.
    fn cached_leaf<'a>(
        vector: &PersistentVector<T>,
        cache: &'a mut Option<ReferenceCounter<Node<T>>>,
        index: usize,
        refresh: bool,
    ) -> Option<&'a ReferenceCounter<Node<T>>> {
        if refresh || cache.is_none() {
            *cache = vector.leaf(index).cloned();
        }
        cache.as_ref()
    }
}

impl<T: Clone> Iterator for PersistentVectorIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        let starts_leaf = index & MASK == 0;
        let leaf = Self::cached_leaf(&self.vector, &mut self.front_leaf, index, starts_leaf)?;
        leaf.elements()?.get(index & MASK).cloned()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> DoubleEndedIterator for PersistentVectorIntoIterator<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        let index = self.back;
        let ends_leaf = index & MASK == MASK;
        let leaf = Self::cached_leaf(&self.vector, &mut self.back_leaf, index, ends_leaf)?;
        leaf.elements()?.get(index & MASK).cloned()
    }
}

impl<T: Clone> ExactSizeIterator for PersistentVectorIntoIterator<T> {}

impl<T: Clone> FusedIterator for PersistentVectorIntoIterator<T> {}
