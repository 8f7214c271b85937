//! Functor type class - mapping over container values.
//!
//! # Laws
//!
//! For containers holding at most one value (`Option`), `fmap` satisfies the
//! laws below. Multi-element containers (`Vec`, `PersistentVector`) satisfy
//! them through [`FunctorMut::fmap_mut`] only: their `fmap` takes a `FnOnce`
//! and therefore keeps just the first element.
//!
//! ## Identity Law
//!
//! ```text
//! fa.fmap(|x| x) == fa          // single-value containers
//! fa.fmap_mut(|x| x) == fa      // every container
//! ```
//!
//! ## Composition Law
//!
//! ```text
//! fa.fmap(f).fmap(g) == fa.fmap(|x| g(f(x)))
//! fa.fmap_mut(f).fmap_mut(g) == fa.fmap_mut(|x| g(f(x)))
//! ```
//!
//! ```rust
//! use vectrie::typeclass::{Functor, FunctorMut};
//!
//! let values = vec![1, 2, 3];
//! assert_eq!(values.clone().fmap_mut(|x| x), values);
//! assert_eq!(values.fmap(|x| x), vec![1]);
//! ```
//!
//! # Examples
//!
//! ```rust
//! use vectrie::typeclass::Functor;
//!
//! let x: Option<i32> = Some(5);
//! let y: Option<String> = x.fmap(|n| n.to_string());
//! assert_eq!(y, Some("5".to_string()));
//! ```

use super::higher::TypeConstructor;

/// A type class for containers whose single value can be transformed.
///
/// `fmap` takes a `FnOnce`, so it is only meaningful for containers holding
/// at most one value. Multi-element containers implement [`FunctorMut`] as
/// well, which is the form generic collection code should rely on.
pub trait Functor: TypeConstructor {
    /// Applies `function` to the value inside the functor.
    fn fmap<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> B;

    /// Applies `function` to a reference to the value inside the functor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vectrie::typeclass::Functor;
    ///
    /// let x: Option<String> = Some("hello".to_string());
    /// let y: Option<usize> = x.fmap_ref(|s| s.len());
    /// assert_eq!(y, Some(5));
    /// assert!(x.is_some());
    /// ```
    fn fmap_ref<B, F>(&self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(&Self::Inner) -> B;

    /// Replaces the value inside the functor with `value`.
    #[inline]
    fn replace<B>(self, value: B) -> Self::WithType<B>
    where
        Self: Sized,
    {
        self.fmap(|_| value)
    }
}

/// A [`Functor`] over containers with many elements.
///
/// # Examples
///
/// ```rust
/// use vectrie::typeclass::FunctorMut;
///
/// let numbers = vec![1, 2, 3];
/// let doubled: Vec<i32> = numbers.fmap_mut(|n| n * 2);
/// assert_eq!(doubled, vec![2, 4, 6]);
/// ```
pub trait FunctorMut: Functor {
    /// Applies `function` to every element, consuming the container.
    fn fmap_mut<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnMut(Self::Inner) -> B;

    /// Applies `function` to a reference to every element.
    fn fmap_ref_mut<B, F>(&self, function: F) -> Self::WithType<B>
    where
        F: FnMut(&Self::Inner) -> B;
}

// =============================================================================
// Option<A> Implementation
// =============================================================================

impl<A> Functor for Option<A> {
    #[inline]
    fn fmap<B, F>(self, function: F) -> Option<B>
    where
        F: FnOnce(A) -> B,
    {
        self.map(function)
    }

    #[inline]
    fn fmap_ref<B, F>(&self, function: F) -> Option<B>
    where
        F: FnOnce(&A) -> B,
    {
        self.as_ref().map(function)
    }
}

// =============================================================================
// Vec<T> Implementation
// =============================================================================

impl<T> Functor for Vec<T> {
    /// Maps the first element only, since `FnOnce` can be called once.
    fn fmap<B, F>(self, function: F) -> Vec<B>
    where
        F: FnOnce(T) -> B,
    {
        self.into_iter().next().map(function).into_iter().collect()
    }

    fn fmap_ref<B, F>(&self, function: F) -> Vec<B>
    where
        F: FnOnce(&T) -> B,
    {
        self.first().map(function).into_iter().collect()
    }
}

impl<T> FunctorMut for Vec<T> {
    #[inline]
    fn fmap_mut<B, F>(self, function: F) -> Vec<B>
    where
        F: FnMut(T) -> B,
    {
        self.into_iter().map(function).collect()
    }

    #[inline]
    fn fmap_ref_mut<B, F>(&self, function: F) -> Vec<B>
    where
        F: FnMut(&T) -> B,
    {
        self.iter().map(function).collect()
    }
}
