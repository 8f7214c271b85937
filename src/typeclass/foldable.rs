//! Foldable type class - folding over data structures.
//!
//! A `Foldable` can have its elements reduced into a single summary value.
//!
//! For associative operations `fold_left` and `fold_right` agree:
//!
//! ```text
//! fa.fold_left(init, f) == fa.fold_right(init, flip(f))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use vectrie::typeclass::Foldable;
//!
//! let numbers = vec![1, 2, 3, 4, 5];
//! let sum = numbers.fold_left(0, |accumulator, element| accumulator + element);
//! assert_eq!(sum, 15);
//! ```

use super::higher::TypeConstructor;
use super::monoid::Monoid;

/// A type class for data structures that can be folded to a summary value.
///
/// Only `fold_left` and `fold_right` are required; everything else is
/// derived from `fold_left`.
pub trait Foldable: TypeConstructor {
    /// Folds the structure from left to right.
    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, Self::Inner) -> B;

    /// Folds the structure from right to left.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::typeclass::Foldable;
    ///
    /// let result = vec![1, 2, 3].fold_right(String::new(), |element, accumulator| {
    ///     format!("{element}{accumulator}")
    /// });
    /// assert_eq!(result, "123");
    /// ```
    fn fold_right<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(Self::Inner, B) -> B;

    /// Maps each element into a [`Monoid`] and combines the results.
    fn fold_map<M, F>(self, mut function: F) -> M
    where
        M: Monoid,
        F: FnMut(Self::Inner) -> M,
        Self: Sized,
    {
        self.fold_left(M::empty(), |accumulator, element| {
            accumulator.combine(function(element))
        })
    }

    /// Collects every element into a `Vec`, in fold order.
    fn to_list(self) -> Vec<Self::Inner>
    where
        Self: Sized,
    {
        self.fold_left(Vec::new(), |mut accumulator, element| {
            accumulator.push(element);
            accumulator
        })
    }

    /// Returns the first element satisfying `predicate`.
    fn find<P>(self, mut predicate: P) -> Option<Self::Inner>
    where
        P: FnMut(&Self::Inner) -> bool,
        Self: Sized,
    {
        self.fold_left(None, |accumulator, element| {
            if accumulator.is_some() {
                accumulator
            } else if predicate(&element) {
                Some(element)
            } else {
                None
            }
        })
    }

    /// Returns `true` if any element satisfies `predicate`.
    fn exists<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Inner) -> bool,
        Self: Clone,
    {
        self.clone().find(|element| predicate(element)).is_some()
    }

    /// Returns `true` if every element satisfies `predicate`.
    ///
    /// Empty structures satisfy every predicate.
    fn for_all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Inner) -> bool,
        Self: Clone,
    {
        !self.exists(|element| !predicate(element))
    }
}

// =============================================================================
// Option<A> Implementation
// =============================================================================

impl<A> Foldable for Option<A> {
    fn fold_left<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(B, A) -> B,
    {
        match self {
            Some(element) => function(init, element),
            None => init,
        }
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(A, B) -> B,
    {
        match self {
            Some(element) => function(element, init),
            None => init,
        }
    }
}

// =============================================================================
// Vec<T> Implementation
// =============================================================================

impl<T> Foldable for Vec<T> {
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
