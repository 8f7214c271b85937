//! # vectrie
//!
//! A persistent (immutable) vector for Rust, backed by a 32-way
//! bit-partitioned trie with structural sharing.
//!
//! ## Overview
//!
//! - **Persistent Vector**: O(log32 N) indexed reads, updates, appends and
//!   removals that never mutate the original; see
//!   [`PersistentVector`](persistent::PersistentVector)
//! - **Builder**: single-use, append-only construction in linear time; see
//!   [`VectorBuilder`](persistent::VectorBuilder)
//! - **Collection Contracts**: [`Sequence`](collection::Sequence),
//!   [`Collector`](collection::Collector) and
//!   [`Factory`](collection::Factory) for code generic over the container
//! - **Type Classes**: Functor, Foldable, Semigroup and Monoid
//!
//! ## Feature Flags
//!
//! - `typeclass`: Type class traits (Functor, Foldable, etc.)
//! - `persistent`: The persistent vector and its builder
//! - `arc`: Share nodes through `Arc` so vectors are `Send + Sync`
//! - `serde`: Serialize and deserialize vectors as sequences
//! - `full`: Enable all features except `arc`
//!
//! ## Example
//!
//! ```rust
//! use vectrie::prelude::*;
//!
//! let vector: PersistentVector<i32> = (1..=5).collect();
//! let doubled = vector.map(|value| value * 2);
//!
//! assert_eq!(doubled.get(4), Some(&10));
//! assert_eq!(vector.element(5), Err(IndexOutOfBounds { index: 5, length: 5 }));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use vectrie::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::*;

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;
}

pub mod collection;

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "persistent")]
pub mod persistent;
