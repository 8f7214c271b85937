//! Persistent (immutable) vector based on a bit-partitioned trie.
//!
//! This module provides [`PersistentVector`], an immutable dynamic array
//! that uses structural sharing for efficient operations, and
//! [`VectorBuilder`], the append-only accumulator that constructs it.
//!
//! # Overview
//!
//! `PersistentVector` is a 32-way branching trie. A vector is the triple
//! `(root, depth, length)`: leaves hold up to 32 elements, internal nodes hold
//! up to 32 children, and each trie level consumes 5 bits of an index. It
//! provides:
//!
//! - O(log32 N) random access (at most six array lookups, no allocation)
//! - O(log32 N) `appended`, `updated` and `pop_back` by path copying
//! - O(N) construction through [`VectorBuilder`]
//! - O(1) `len`, `is_empty` and `clone`
//!
//! All operations return new vectors without modifying the original, and
//! every subtree untouched by an operation is shared between the versions.
//!
//! # Internal Structure
//!
//! The trie always has the minimum depth for its length and is left-dense:
//! every node except those on the rightmost path is full. The empty vector
//! has no root at all.
//!
//! # Examples
//!
//! ```rust
//! use vectrie::persistent::PersistentVector;
//!
//! let vector = PersistentVector::new()
//!     .appended(1)
//!     .appended(2)
//!     .appended(3);
//!
//! assert_eq!(vector.get(0), Some(&1));
//! assert_eq!(vector.get(2), Some(&3));
//!
//! // Structural sharing: the original vector is preserved
//! let extended = vector.appended(4);
//! assert_eq!(vector.len(), 3);
//! assert_eq!(extended.len(), 4);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::Index;

use super::ReferenceCounter;
use crate::collection::{IndexOutOfBounds, Sequence};
use crate::typeclass::{Foldable, Functor, FunctorMut, Monoid, Semigroup, TypeConstructor};

mod builder;
mod iter;
mod node;

pub use builder::VectorBuilder;
pub use iter::{PersistentVectorIntoIterator, PersistentVectorIterator};

use node::{Children, Leaf, MASK, MAX_DEPTH, Node, capacity, depth_for, slot};

// =============================================================================
// PersistentVector Definition
// =============================================================================

/// A persistent (immutable) vector based on a 32-way bit-partitioned trie.
///
/// # Time Complexity
///
/// | Operation    | Complexity                    |
/// |--------------|-------------------------------|
/// | `new`        | O(1)                          |
/// | `get`        | O(log32 N)                    |
/// | `appended`   | O(log32 N)                    |
/// | `updated`    | O(log32 N)                    |
/// | `pop_back`   | O(log32 N)                    |
/// | `prepended`  | O(N)                          |
/// | `concat`     | O(M + N / 32)                 |
/// | `take`       | O(N / 32)                     |
/// | `len`        | O(1)                          |
/// | `iter`       | O(1) to create, O(N) to iterate |
///
/// # Examples
///
/// ```rust
/// use vectrie::persistent::PersistentVector;
///
/// let vector: PersistentVector<i32> = (0..100).collect();
/// assert_eq!(vector.len(), 100);
/// assert_eq!(vector.get(50), Some(&50));
/// ```
pub struct PersistentVector<T> {
    /// Root of the trie; `None` only for the empty vector
    root: Option<ReferenceCounter<Node<T>>>,
    /// Number of internal levels above the leaves
    depth: usize,
    /// Total number of elements
    length: usize,
}

impl<T> PersistentVector<T> {
    /// Creates a new empty vector.
    ///
    /// Every empty vector shares this representation; no node is allocated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = PersistentVector::new();
    /// assert!(vector.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            depth: 0,
            length: 0,
        }
    }

    /// Creates a vector containing a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let vector = PersistentVector::singleton(42);
    /// assert_eq!(vector.len(), 1);
    /// assert_eq!(vector.get(0), Some(&42));
    /// ```
    #[must_use]
    pub fn singleton(element: T) -> Self {
        let mut leaf = Leaf::new();
        leaf.push(element);
        Self::from_parts(ReferenceCounter::new(Node::Leaf(leaf)), 0, 1)
    }

    /// Returns an empty [`VectorBuilder`].
    #[inline]
    #[must_use]
    pub fn builder() -> VectorBuilder<T> {
        VectorBuilder::new()
    }

    fn from_parts(root: ReferenceCounter<Node<T>>, depth: usize, length: usize) -> Self {
        debug_assert!(length > 0);
        debug_assert_eq!(depth, depth_for(length));
        Self {
            root: Some(root),
            depth,
            length,
        }
    }

    #[inline]
    const fn root(&self) -> Option<&ReferenceCounter<Node<T>>> {
        self.root.as_ref()
    }

    /// Returns the number of elements in the vector.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of internal trie levels above the leaves.
    ///
    /// Vectors of up to 32 elements have depth 0; the depth grows by one each
    /// time the length crosses a power of 32 (1024, 32768, ...).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let small: PersistentVector<i32> = (0..32).collect();
    /// let large: PersistentVector<i32> = (0..33).collect();
    /// assert_eq!(small.depth(), 0);
    /// assert_eq!(large.depth(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the leaf holding `index`.
    ///
    /// The descent is unrolled per depth; callers check `index` against the
    /// length first.
    #[inline]
    fn leaf(&self, index: usize) -> Option<&ReferenceCounter<Node<T>>> {
        let root = self.root.as_ref()?;
        match self.depth {
            0 => Some(root),
            1 => root.child(slot(index, 1)),
            2 => root.child(slot(index, 2))?.child(slot(index, 1)),
            3 => root
                .child(slot(index, 3))?
                .child(slot(index, 2))?
                .child(slot(index, 1)),
            4 => root
                .child(slot(index, 4))?
                .child(slot(index, 3))?
                .child(slot(index, 2))?
                .child(slot(index, 1)),
            5 => root
                .child(slot(index, 5))?
                .child(slot(index, 4))?
                .child(slot(index, 3))?
                .child(slot(index, 2))?
                .child(slot(index, 1)),
            depth => unreachable!("trie depth {depth} exceeds the maximum of {MAX_DEPTH}"),
        }
    }

    /// Returns a reference to the element at the given index.
    ///
    /// Returns `None` if the index is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log32 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// assert_eq!(vector.get(0), Some(&1));
    /// assert_eq!(vector.get(4), Some(&5));
    /// assert_eq!(vector.get(10), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.length {
            return None;
        }
        self.leaf(index)?.elements()?.get(index & MASK)
    }

    /// Returns a reference to the element at the given index, or an
    /// [`IndexOutOfBounds`] error carrying the index and the length.
    ///
    /// # Errors
    ///
    /// Fails when `index >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::collection::IndexOutOfBounds;
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// assert_eq!(vector.try_get(1), Ok(&2));
    /// assert_eq!(
    ///     vector.try_get(5),
    ///     Err(IndexOutOfBounds { index: 5, length: 5 })
    /// );
    /// ```
    #[inline]
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.get(index).ok_or(IndexOutOfBounds {
            index,
            length: self.length,
        })
    }

    /// Returns a reference to the first element, or `None` if the vector is
    /// empty.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a reference to the last element, or `None` if the vector is
    /// empty.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.length.checked_sub(1).and_then(|index| self.get(index))
    }

    /// Returns an iterator over references to the elements, front to back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// let collected: Vec<&i32> = vector.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3, &4, &5]);
    /// ```
    #[inline]
    #[must_use]
    pub fn iter(&self) -> PersistentVectorIterator<'_, T> {
        PersistentVectorIterator::new(self)
    }

    /// Finds the index of the first element that satisfies the predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// assert_eq!(vector.find_index(|x| *x > 3), Some(3));
    /// assert_eq!(vector.find_index(|x| *x > 10), None);
    /// ```
    #[must_use]
    pub fn find_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().position(predicate)
    }

    /// Returns a new vector with `function` applied to every element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=3).collect();
    /// let labels = vector.map(|value| format!("#{value}"));
    /// assert_eq!(labels.get(2), Some(&"#3".to_string()));
    /// ```
    #[must_use]
    pub fn map<B, F>(&self, function: F) -> PersistentVector<B>
    where
        F: FnMut(&T) -> B,
    {
        let mut builder = VectorBuilder::with_capacity(self.length);
        builder.extend(self.iter().map(function));
        builder.build()
    }
}

impl<T: Clone> PersistentVector<T> {
    /// Returns a new vector with the element at `index` replaced.
    ///
    /// Only the nodes on the path from the root to the modified leaf are
    /// copied; every other node is shared with `self`.
    ///
    /// # Errors
    ///
    /// Fails with [`IndexOutOfBounds`] when `index >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log32 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// let updated = vector.updated(2, 100).unwrap();
    ///
    /// assert_eq!(updated.get(2), Some(&100));
    /// assert_eq!(vector.get(2), Some(&3)); // Original unchanged
    /// assert!(vector.updated(5, 0).is_err());
    /// ```
    pub fn updated(&self, index: usize, element: T) -> Result<Self, IndexOutOfBounds> {
        let index = IndexOutOfBounds::check(index, self.length)?;
        let Some(root) = self.root.as_ref() else {
            unreachable!("a vector of length {} has no root", self.length);
        };
        let root = root.updated(self.depth, index, element);
        Ok(Self::from_parts(
            ReferenceCounter::new(root),
            self.depth,
            self.length,
        ))
    }

    /// Returns a new vector with `element` appended at the back.
    ///
    /// The rightmost path is copied; when the trie is full at its current
    /// depth, a new root is allocated whose first child is the old root.
    ///
    /// # Panics
    ///
    /// Panics if the vector already holds 32^6 elements.
    ///
    /// # Complexity
    ///
    /// O(log32 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (0..32).collect();
    /// let extended = vector.appended(32);
    ///
    /// assert_eq!(extended.len(), 33);
    /// assert_eq!(extended.depth(), 1);
    /// assert_eq!(vector.len(), 32);
    /// ```
    #[must_use]
    pub fn appended(&self, element: T) -> Self {
        let Some(root) = self.root.as_ref() else {
            return Self::singleton(element);
        };
        let index = self.length;

        if index < capacity(self.depth) {
            let root = root.appended(self.depth, index, element);
            return Self::from_parts(ReferenceCounter::new(root), self.depth, index + 1);
        }

        assert!(
            self.depth < MAX_DEPTH,
            "capacity overflow: a vector holds at most {} elements",
            capacity(MAX_DEPTH)
        );
        let mut leaf = Leaf::new();
        leaf.push(element);
        let mut children = Children::new();
        children.push(ReferenceCounter::clone(root));
        children.push(ReferenceCounter::new(Node::path(self.depth, Node::Leaf(leaf))));
        log::debug!(
            "vector of {} elements grew a root level to depth {}",
            index + 1,
            self.depth + 1
        );
        Self::from_parts(
            ReferenceCounter::new(Node::Internal(children)),
            self.depth + 1,
            index + 1,
        )
    }

    /// Returns a new vector with `element` inserted at the front.
    ///
    /// Every index shifts by one, so the result is rebuilt; the original is
    /// left untouched.
    ///
    /// # Complexity
    ///
    /// O(N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=3).collect();
    /// let extended = vector.prepended(0);
    /// assert_eq!(extended.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    /// ```
    #[must_use]
    pub fn prepended(&self, element: T) -> Self {
        let mut builder = VectorBuilder::with_capacity(self.length + 1);
        builder.append(element);
        builder.extend(self.iter().cloned());
        builder.build()
    }

    /// Removes the last element.
    ///
    /// Returns `None` if the vector is empty, otherwise the new vector and
    /// the removed element. Emptied nodes are dropped and the trie shrinks
    /// back to the minimum depth for the new length.
    ///
    /// # Complexity
    ///
    /// O(log32 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (0..33).collect();
    /// let (remaining, element) = vector.pop_back().unwrap();
    ///
    /// assert_eq!(element, 32);
    /// assert_eq!(remaining.len(), 32);
    /// assert_eq!(remaining.depth(), 0);
    /// ```
    #[must_use]
    pub fn pop_back(&self) -> Option<(Self, T)> {
        let root = self.root.as_ref()?;
        let element = self.last()?.clone();
        let Some(remaining) = root.without_last() else {
            return Some((Self::new(), element));
        };

        let mut root = ReferenceCounter::new(remaining);
        let mut depth = self.depth;
        while depth > 0 {
            let only_child = match root.children() {
                Some([only_child]) => ReferenceCounter::clone(only_child),
                _ => break,
            };
            root = only_child;
            depth -= 1;
        }
        Some((Self::from_parts(root, depth, self.length - 1), element))
    }

    /// Returns a new vector with the elements of `other` after those of
    /// `self`.
    ///
    /// The full leaves of `self` are shared with the result, and so are those
    /// of `other` whenever `self` ends on a leaf boundary.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let left: PersistentVector<i32> = (1..=3).collect();
    /// let right: PersistentVector<i32> = (4..=6).collect();
    /// let combined = left.concat(&right);
    ///
    /// assert_eq!(combined.len(), 6);
    /// assert_eq!(combined.get(3), Some(&4));
    /// ```
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let mut builder = VectorBuilder::from_prefix(self, self.length);
        builder.append_prefix(other, other.length);
        builder.build()
    }

    /// Returns a new vector containing the first `count` elements.
    ///
    /// If `count` exceeds the length, the whole vector is returned. Full
    /// leaves of the prefix are shared with `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// assert_eq!(vector.take(3).len(), 3);
    /// assert_eq!(vector.take(10), vector);
    /// assert!(vector.take(0).is_empty());
    /// ```
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        if count >= self.length {
            return self.clone();
        }
        VectorBuilder::from_prefix(self, count).build()
    }

    /// Returns a new vector with the first `count` elements removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// assert_eq!(vector.drop_first(2).first(), Some(&3));
    /// assert!(vector.drop_first(10).is_empty());
    /// ```
    #[must_use]
    pub fn drop_first(&self, count: usize) -> Self {
        if count == 0 {
            return self.clone();
        }
        let mut builder = VectorBuilder::with_capacity(self.length.saturating_sub(count));
        builder.extend(self.iter().skip(count).cloned());
        builder.build()
    }

    /// Splits the vector at `index`: `(self.take(index), self.drop_first(index))`.
    #[must_use]
    pub fn split_at(&self, index: usize) -> (Self, Self) {
        (self.take(index), self.drop_first(index))
    }

    /// Returns a new vector with only the elements satisfying `predicate`,
    /// in their original order.
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        self.iter()
            .filter(|element| predicate(element))
            .cloned()
            .collect()
    }
}

/// Creates a [`PersistentVector`] containing the given elements.
///
/// # Examples
///
/// ```rust
/// use vectrie::vector;
///
/// let empty: vectrie::persistent::PersistentVector<i32> = vector![];
/// assert!(empty.is_empty());
///
/// let numbers = vector![1, 2, 3];
/// assert_eq!(numbers.len(), 3);
///
/// let zeros = vector![0; 40];
/// assert_eq!(zeros.len(), 40);
/// assert_eq!(zeros.depth(), 1);
/// ```
#[macro_export]
macro_rules! vector {
    () => {
        $crate::persistent::PersistentVector::new()
    };
    ($element:expr; $count:expr) => {{
        let element = $element;
        let count: usize = $count;
        let mut builder = $crate::persistent::VectorBuilder::with_capacity(count);
        for _ in 0..count {
            builder.append(::core::clone::Clone::clone(&element));
        }
        builder.build()
    }};
    ($($element:expr),+ $(,)?) => {{
        let mut builder = $crate::persistent::VectorBuilder::new();
        $(builder.append($element);)+
        builder.build()
    }};
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentVector<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            depth: self.depth,
            length: self.length,
        }
    }
}

impl<T> Default for PersistentVector<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for PersistentVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut builder = VectorBuilder::with_capacity(iter.size_hint().0);
        builder.extend(iter);
        builder.build()
    }
}

impl<T> From<Vec<T>> for PersistentVector<T> {
    #[inline]
    fn from(elements: Vec<T>) -> Self {
        elements.into_iter().collect()
    }
}

impl<T: Clone> IntoIterator for PersistentVector<T> {
    type Item = T;
    type IntoIter = PersistentVectorIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        PersistentVectorIntoIterator::new(self)
    }
}

impl<'a, T> IntoIterator for &'a PersistentVector<T> {
    type Item = &'a T;
    type IntoIter = PersistentVectorIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Index<usize> for PersistentVector<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics with the [`IndexOutOfBounds`] message when `index >= self.len()`.
    fn index(&self, index: usize) -> &T {
        match self.try_get(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T: PartialEq> PartialEq for PersistentVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for PersistentVector<T> {}

impl<T: PartialOrd> PartialOrd for PersistentVector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for PersistentVector<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

/// Hashes the length, then each element in order, so that equal vectors
/// hash equally regardless of how they were built.
impl<T: Hash> Hash for PersistentVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentVector<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentVector<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        for (position, element) in self.iter().enumerate() {
            if position > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

impl<T> Sequence for PersistentVector<T> {
    type Element = T;

    #[inline]
    fn length(&self) -> usize {
        self.length
    }

    #[inline]
    fn element(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.try_get(index)
    }
}

// =============================================================================
// Type Class Implementations
// =============================================================================

impl<T> TypeConstructor for PersistentVector<T> {
    type Inner = T;
    type WithType<B> = PersistentVector<B>;
}

impl<T: Clone> Functor for PersistentVector<T> {
    /// Maps the first element only, since `FnOnce` can be called once; the
    /// functor laws hold for [`FunctorMut::fmap_mut`], not for this method.
    fn fmap<B, F>(self, function: F) -> PersistentVector<B>
    where
        F: FnOnce(T) -> B,
    {
        self.first()
            .cloned()
            .map_or_else(PersistentVector::new, |first| {
                PersistentVector::singleton(function(first))
            })
    }

    fn fmap_ref<B, F>(&self, function: F) -> PersistentVector<B>
    where
        F: FnOnce(&T) -> B,
    {
        self.first().map_or_else(PersistentVector::new, |first| {
            PersistentVector::singleton(function(first))
        })
    }
}

impl<T: Clone> FunctorMut for PersistentVector<T> {
    fn fmap_mut<B, F>(self, function: F) -> PersistentVector<B>
    where
        F: FnMut(T) -> B,
    {
        self.into_iter().map(function).collect()
    }

    fn fmap_ref_mut<B, F>(&self, function: F) -> PersistentVector<B>
    where
        F: FnMut(&T) -> B,
    {
        self.map(function)
    }
}

impl<T: Clone> Foldable for PersistentVector<T> {
    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, T) -> B,
    {
        self.into_iter().fold(init, function)
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(T, B) -> B,
    {
        self.into_iter()
            .rev()
            .fold(init, |accumulator, element| function(element, accumulator))
    }
}

impl<T: Clone> Semigroup for PersistentVector<T> {
    fn combine(self, other: Self) -> Self {
        self.concat(&other)
    }
}

impl<T: Clone> Monoid for PersistentVector<T> {
    fn empty() -> Self {
        Self::new()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentVector<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentVectorVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentVectorVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = PersistentVector<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut builder = VectorBuilder::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            builder.append(element);
        }
        Ok(builder.build())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentVector<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentVectorVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn range(length: usize) -> PersistentVector<usize> {
        (0..length).collect()
    }

    /// Walks `before` and `after` together from `level` down, asserting that
    /// every node on the path to `index` was copied and every node off it is
    /// the same allocation. Returns how many off-path internal nodes were
    /// compared.
    fn assert_only_path_copied(
        before: &ReferenceCounter<Node<usize>>,
        after: &ReferenceCounter<Node<usize>>,
        level: usize,
        index: usize,
    ) -> usize {
        assert!(
            !ReferenceCounter::ptr_eq(before, after),
            "node on the path at level {level} is shared"
        );
        let (Some(old_children), Some(new_children)) = (before.children(), after.children())
        else {
            return 0;
        };
        assert!(new_children.len() >= old_children.len());

        let on_path = slot(index, level);
        let mut shared_internal = 0;
        for (position, (old_child, new_child)) in
            old_children.iter().zip(new_children).enumerate()
        {
            if position == on_path {
                shared_internal += assert_only_path_copied(old_child, new_child, level - 1, index);
            } else {
                assert!(
                    ReferenceCounter::ptr_eq(old_child, new_child),
                    "slot {position} at level {level} is off the path but was copied"
                );
                if old_child.children().is_some() {
                    shared_internal += 1;
                }
            }
        }
        shared_internal
    }

    // =========================================================================
    // Display
    // =========================================================================

    #[rstest]
    #[case(range(0), "[]")]
    #[case(range(1), "[0]")]
    #[case(range(3), "[0, 1, 2]")]
    fn display_lists_elements(#[case] vector: PersistentVector<usize>, #[case] expected: &str) {
        assert_eq!(format!("{vector}"), expected);
    }

    // =========================================================================
    // Canonical Empty Vector
    // =========================================================================

    #[rstest]
    fn every_empty_vector_has_no_root() {
        let popped = PersistentVector::singleton(1).pop_back().unwrap().0;
        let taken = range(10).take(0);
        for empty in [PersistentVector::new(), PersistentVector::default(), taken] {
            assert!(empty.root().is_none());
            assert_eq!(empty.depth(), 0);
        }
        assert!(popped.root().is_none());
    }

    // =========================================================================
    // Depth
    // =========================================================================

    #[rstest]
    #[case(0)]
    #[case(31)]
    #[case(32)]
    #[case(1023)]
    #[case(1024)]
    #[case(32_767)]
    #[case(32_768)]
    fn appended_matches_a_fresh_build(#[case] length: usize) {
        let appended = range(length).appended(length);
        let built = range(length + 1);
        assert_eq!(appended.depth(), built.depth());
        assert_eq!(appended, built);
    }

    #[rstest]
    fn appending_one_by_one_tracks_minimum_depth() {
        let mut vector = PersistentVector::new();
        for index in 0..2048 {
            vector = vector.appended(index);
            assert_eq!(vector.depth(), depth_for(index + 1));
        }
        assert!(vector.iter().copied().eq(0..2048));
    }

    #[rstest]
    #[case(33, 0)]
    #[case(1025, 1)]
    #[case(32_769, 2)]
    fn pop_back_collapses_single_child_roots(#[case] length: usize, #[case] expected: usize) {
        let (remaining, element) = range(length).pop_back().unwrap();
        assert_eq!(element, length - 1);
        assert_eq!(remaining.depth(), expected);
        assert_eq!(remaining, range(length - 1));
    }

    // =========================================================================
    // Structural Sharing
    // =========================================================================

    #[rstest]
    #[case(100, 5, 0)]
    #[case(2000, 1500, 0)]
    #[case(40_000, 12_345, 32)]
    #[case(40_000, 39_999, 8)]
    fn updated_copies_only_the_path(
        #[case] length: usize,
        #[case] index: usize,
        #[case] expected_shared_internal: usize,
    ) {
        let vector = range(length);
        let updated = vector.updated(index, usize::MAX).unwrap();

        let shared_internal = assert_only_path_copied(
            vector.root().unwrap(),
            updated.root().unwrap(),
            vector.depth(),
            index,
        );
        assert_eq!(shared_internal, expected_shared_internal);

        assert_eq!(vector.get(index), Some(&index));
        assert_eq!(updated.get(index), Some(&usize::MAX));
    }

    #[rstest]
    #[case(1000, 0)]
    #[case(2000, 0)]
    #[case(40_000, 8)]
    fn appended_copies_only_the_rightmost_path(
        #[case] length: usize,
        #[case] expected_shared_internal: usize,
    ) {
        let vector = range(length);
        let appended = vector.appended(length);
        assert_eq!(appended.depth(), vector.depth());

        let shared_internal = assert_only_path_copied(
            vector.root().unwrap(),
            appended.root().unwrap(),
            vector.depth(),
            length,
        );
        assert_eq!(shared_internal, expected_shared_internal);
    }

    #[rstest]
    fn updated_on_an_empty_vector_is_out_of_bounds() {
        let vector: PersistentVector<usize> = PersistentVector::new();
        assert_eq!(
            vector.updated(0, 1),
            Err(IndexOutOfBounds {
                index: 0,
                length: 0
            })
        );
    }

    #[rstest]
    fn appended_at_capacity_keeps_the_old_root_as_first_child() {
        let vector = range(1024);
        let appended = vector.appended(1024);
        let first = appended.root().unwrap().child(0).unwrap();
        assert!(ReferenceCounter::ptr_eq(first, vector.root().unwrap()));
    }

    #[rstest]
    fn concat_on_a_leaf_boundary_shares_both_sides() {
        let left = range(64);
        let right: PersistentVector<usize> = (64..200).collect();
        let combined = left.concat(&right);

        let mut leaves = Vec::new();
        Node::collect_leaves(combined.root().unwrap(), &mut leaves);
        let mut left_leaves = Vec::new();
        Node::collect_leaves(left.root().unwrap(), &mut left_leaves);
        let mut right_leaves = Vec::new();
        Node::collect_leaves(right.root().unwrap(), &mut right_leaves);

        assert!(ReferenceCounter::ptr_eq(leaves[0], left_leaves[0]));
        assert!(ReferenceCounter::ptr_eq(leaves[2], right_leaves[0]));
        assert!(combined.iter().copied().eq(0..200));
    }

    #[rstest]
    fn take_shares_full_prefix_leaves() {
        let vector = range(100);
        let taken = vector.take(70);
        let before = vector.root().unwrap().children().unwrap();
        let after = taken.root().unwrap().children().unwrap();
        assert!(ReferenceCounter::ptr_eq(&before[0], &after[0]));
        assert!(ReferenceCounter::ptr_eq(&before[1], &after[1]));
        assert!(taken.iter().copied().eq(0..70));
    }

    // =========================================================================
    // Equality and Ordering
    // =========================================================================

    #[rstest]
    fn equality_is_element_wise() {
        let vector = range(500);
        assert_eq!(vector.clone(), vector);
        assert_ne!(vector.updated(3, 0).unwrap(), vector);
    }

    #[rstest]
    fn ordering_is_lexicographic() {
        let shorter: PersistentVector<i32> = vector![1, 2];
        let longer: PersistentVector<i32> = vector![1, 2, 0];
        let bigger: PersistentVector<i32> = vector![1, 3];
        assert!(shorter < longer);
        assert!(longer < bigger);
    }

    #[rstest]
    #[should_panic(expected = "index 3 out of bounds for length 3")]
    fn index_operator_panics_out_of_bounds() {
        let vector: PersistentVector<i32> = vector![1, 2, 3];
        let _ = vector[3];
    }
}
