//! Integration tests for sharing vectors across threads.
//!
//! With the `arc` feature, nodes are reference counted atomically, so a
//! vector can be read and extended concurrently from several threads while
//! every version keeps its own contents.

#![cfg(all(feature = "arc", feature = "persistent"))]
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use rstest::rstest;
use std::sync::Arc;
use std::thread;
use vectrie::persistent::{PersistentVector, VectorBuilder};

static_assertions::assert_impl_all!(PersistentVector<String>: Send, Sync);
static_assertions::assert_impl_all!(VectorBuilder<String>: Send);

#[rstest]
fn test_vector_cross_thread_structural_sharing() {
    let original: Arc<PersistentVector<i32>> = Arc::new((0..2000).collect());

    let handles: Vec<_> = (0..4)
        .map(|index| {
            let vector_clone = Arc::clone(&original);
            thread::spawn(move || {
                // Each thread modifies a different element
                let modified = vector_clone.updated(index * 500, 999).unwrap();
                assert_eq!(modified.get(index * 500), Some(&999));
                // Original should be unchanged
                assert_eq!(
                    vector_clone.get(index * 500),
                    Some(&((index * 500) as i32))
                );
                modified
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("Thread panicked"))
        .collect();

    for (index, vector) in results.iter().enumerate() {
        assert_eq!(vector.get(index * 500), Some(&999));
        assert_eq!(
            vector.get(0),
            if index == 0 { Some(&999) } else { Some(&0) }
        );
    }

    for index in 0..2000 {
        assert_eq!(original.get(index), Some(&(index as i32)));
    }
}

#[rstest]
fn test_vector_moved_between_threads() {
    let vector: PersistentVector<String> = (0..100).map(|value| value.to_string()).collect();

    let extended = thread::spawn(move || vector.appended("100".to_string()))
        .join()
        .expect("Thread panicked");

    assert_eq!(extended.len(), 101);
    assert_eq!(extended.last(), Some(&"100".to_string()));
}

#[rstest]
fn test_concurrent_readers_see_the_same_elements() {
    let shared: PersistentVector<usize> = (0..10_000).collect();

    thread::scope(|scope| {
        for offset in 0..4 {
            let vector = &shared;
            scope.spawn(move || {
                let sum: usize = vector.iter().skip(offset).step_by(4).sum();
                let expected: usize = (offset..10_000).step_by(4).sum();
                assert_eq!(sum, expected);
            });
        }
    });
}
