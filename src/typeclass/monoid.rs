//! Monoid type class - semigroups with an identity element.
//!
//! # Laws
//!
//! ```text
//! M::empty().combine(a) == a
//! a.combine(M::empty()) == a
//! ```

use super::semigroup::Semigroup;

/// A [`Semigroup`] with an identity element.
///
/// # Examples
///
/// ```rust
/// use vectrie::typeclass::{Monoid, Semigroup};
///
/// let value = String::from("hello");
/// assert_eq!(String::empty().combine(value.clone()), value);
/// assert_eq!(String::combine_all(vec!["a".to_string(), "b".to_string()]), "ab");
/// ```
pub trait Monoid: Semigroup {
    /// The identity element of [`Semigroup::combine`].
    fn empty() -> Self;

    /// Combines every value of `iterator`, starting from [`Monoid::empty`].
    fn combine_all<I>(iterator: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator.into_iter().fold(Self::empty(), Self::combine)
    }
}

impl Monoid for String {
    #[inline]
    fn empty() -> Self {
        Self::new()
    }
}

impl<T> Monoid for Vec<T> {
    #[inline]
    fn empty() -> Self {
        Self::new()
    }
}

impl<A: Semigroup> Monoid for Option<A> {
    #[inline]
    fn empty() -> Self {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn vec_identity_laws() {
        let value = vec![1, 2, 3];
        assert_eq!(Vec::empty().combine(value.clone()), value);
        assert_eq!(value.clone().combine(Vec::empty()), value);
    }

    #[rstest]
    fn combine_all_of_nothing_is_empty() {
        assert_eq!(String::combine_all(Vec::new()), "");
        assert_eq!(Option::<String>::combine_all(Vec::new()), None);
    }
}
