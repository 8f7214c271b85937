//! Persistent (immutable) vector.
//!
//! This module provides [`PersistentVector`], an immutable sequence backed by
//! a 32-way bit-partitioned trie, and [`VectorBuilder`], the append-only
//! accumulator that constructs one in linear time.
//!
//! # Structural Sharing
//!
//! Every operation returns a new vector and leaves its input untouched.
//! Subtrees not on the modified path are shared between the two versions
//! through reference-counted handles, so a point update copies at most six
//! nodes.
//!
//! # Examples
//!
//! ```rust
//! use vectrie::persistent::PersistentVector;
//!
//! let vector: PersistentVector<i32> = (0..100).collect();
//! assert_eq!(vector.get(50), Some(&50));
//!
//! // Structural sharing: the original vector is preserved
//! let updated = vector.updated(50, 999).unwrap();
//! assert_eq!(vector.get(50), Some(&50));     // Original unchanged
//! assert_eq!(updated.get(50), Some(&999));   // New version
//! ```
//!
//! # Thread Safety
//!
//! With the `arc` feature, nodes are held by `Arc` and a vector is `Send` and
//! `Sync` whenever its elements are. Otherwise `Rc` is used and vectors stay
//! on the thread that created them.

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod vector;

pub use vector::PersistentVector;
pub use vector::PersistentVectorIntoIterator;
pub use vector::PersistentVectorIterator;
pub use vector::VectorBuilder;

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentVector<i32>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentVector<i32>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod reference_counter_tests {
    use super::ReferenceCounter;
    use rstest::rstest;

    #[rstest]
    fn clones_share_the_allocation() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        let reference_counter_clone = reference_counter.clone();
        assert!(ReferenceCounter::ptr_eq(
            &reference_counter,
            &reference_counter_clone
        ));
    }

    #[rstest]
    fn strong_count_tracks_live_handles() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 2);
        drop(reference_counter_clone);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
    }
}
