//! Semigroup type class - types with an associative binary operation.
//!
//! # Laws
//!
//! ## Associativity
//!
//! ```text
//! (a.combine(b)).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use vectrie::typeclass::Semigroup;
//!
//! let hello = String::from("Hello, ");
//! let world = String::from("World!");
//! assert_eq!(hello.combine(world), "Hello, World!");
//!
//! assert_eq!(vec![1, 2].combine(vec![3, 4]), vec![1, 2, 3, 4]);
//! ```

/// A type class for types with an associative binary operation.
pub trait Semigroup {
    /// Combines two values associatively.
    fn combine(self, other: Self) -> Self;

    /// Combines two borrowed values, leaving both untouched.
    fn combine_ref(&self, other: &Self) -> Self
    where
        Self: Clone,
    {
        self.clone().combine(other.clone())
    }

    /// Combines every value of `iterator` from left to right.
    ///
    /// Returns `None` for an empty iterator, since a semigroup has no
    /// identity element to fall back on.
    fn reduce_all<I>(iterator: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator.into_iter().reduce(Self::combine)
    }
}

impl Semigroup for String {
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl<T> Semigroup for Vec<T> {
    fn combine(mut self, mut other: Self) -> Self {
        self.append(&mut other);
        self
    }
}

impl<A: Semigroup> Semigroup for Option<A> {
    fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Some(left), Some(right)) => Some(left.combine(right)),
            (left @ Some(_), None) => left,
            (None, right) => right,
        }
    }
}
