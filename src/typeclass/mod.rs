//! Type class traits for functional programming abstractions.
//!
//! These are the generic interfaces collections plug into:
//!
//! - [`Functor`]: Mapping over container values
//! - [`FunctorMut`]: Mapping with mutable functions for multi-element containers
//! - [`Foldable`]: Folding over structures to produce summary values
//! - [`Semigroup`]: Associative binary operations
//! - [`Monoid`]: Semigroup with identity element
//!
//! ## Higher-Kinded Types Emulation
//!
//! Rust does not have native support for higher-kinded types. This module
//! uses generic associated types ([`TypeConstructor`]) to emulate them.
//!
//! # Examples
//!
//! ```rust
//! use vectrie::typeclass::{Foldable, FunctorMut, Monoid, Semigroup};
//!
//! let doubled = vec![1, 2, 3].fmap_mut(|value| value * 2);
//! assert_eq!(doubled.clone().fold_left(0, |sum, value| sum + value), 12);
//! assert_eq!(Vec::empty().combine(doubled), vec![2, 4, 6]);
//! ```

mod foldable;
mod functor;
mod higher;
mod monoid;
mod semigroup;

pub use foldable::Foldable;
pub use functor::{Functor, FunctorMut};
pub use higher::TypeConstructor;
pub use monoid::Monoid;
pub use semigroup::Semigroup;
