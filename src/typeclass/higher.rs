//! Higher-kinded type emulation through generic associated types.
//!
//! Rust cannot abstract over `PersistentVector<_>` or `Vec<_>` as type
//! constructors directly. [`TypeConstructor`] records the element type a
//! container is applied to and how to name the same container applied to a
//! different element type, which is all [`Functor`](super::Functor) and
//! [`Foldable`](super::Foldable) need.
//!
//! # Example
//!
//! ```rust
//! use vectrie::typeclass::TypeConstructor;
//!
//! fn rewrap<T: TypeConstructor>(_: &T) -> T::WithType<String>
//! where
//!     T::WithType<String>: Default,
//! {
//!     Default::default()
//! }
//!
//! let numbers = vec![1, 2, 3];
//! let strings: Vec<String> = rewrap(&numbers);
//! assert!(strings.is_empty());
//! ```

/// A type constructor applied to the element type [`Inner`](TypeConstructor::Inner).
///
/// # Laws
///
/// `<F as TypeConstructor>::WithType<F::Inner>` is `F` itself.
pub trait TypeConstructor {
    /// The element type this constructor is currently applied to.
    type Inner;

    /// The same constructor applied to `B`.
    type WithType<B>: TypeConstructor<Inner = B>;
}

impl<A> TypeConstructor for Option<A> {
    type Inner = A;
    type WithType<B> = Option<B>;
}

impl<T> TypeConstructor for Vec<T> {
    type Inner = T;
    type WithType<B> = Vec<B>;
}
