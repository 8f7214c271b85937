//! Append-only construction of [`PersistentVector`]s.

use std::mem;

use super::PersistentVector;
use super::node::{BRANCHING_FACTOR, Children, Leaf, MAX_DEPTH, Node};
use crate::collection::{Collector, Factory};
use crate::persistent::ReferenceCounter;

/// A single-use, append-only accumulator that produces a [`PersistentVector`].
///
/// Elements are packed into 32-element leaves as they arrive; [`build`]
/// groups the leaves bottom-up into a trie of the minimum depth. Building
/// `n` elements costs O(n) and yields a trie where every node off the
/// rightmost path is full.
///
/// [`build`] consumes the builder, so it cannot be reused afterwards:
///
/// ```rust,compile_fail,E0382
/// use vectrie::persistent::VectorBuilder;
///
/// let mut builder = VectorBuilder::new();
/// builder.append(1);
/// let vector = builder.build();
/// builder.append(2); // the builder was moved by `build`
/// ```
///
/// # Examples
///
/// ```rust
/// use vectrie::persistent::VectorBuilder;
///
/// let mut builder = VectorBuilder::new();
/// for value in 0..100 {
///     builder.append(value);
/// }
/// let vector = builder.build();
///
/// assert_eq!(vector.len(), 100);
/// assert_eq!(vector.get(64), Some(&64));
/// ```
///
/// [`build`]: VectorBuilder::build
pub struct VectorBuilder<T> {
    /// The leaf being filled; never full between calls.
    current: Leaf<T>,
    /// Completed leaves, all full.
    blocks: Vec<ReferenceCounter<Node<T>>>,
    /// Total number of appended elements.
    length: usize,
}

impl<T> VectorBuilder<T> {
    /// Creates an empty builder.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Leaf::new(),
            blocks: Vec::new(),
            length: 0,
        }
    }

    /// Creates an empty builder with room for `capacity` elements' worth of
    /// leaves.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            current: Leaf::new(),
            blocks: Vec::with_capacity(capacity / BRANCHING_FACTOR),
            length: 0,
        }
    }

    /// Returns the number of elements appended so far.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if nothing has been appended yet.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Appends `element` at the end of the vector being built.
    ///
    /// # Complexity
    ///
    /// O(1) amortized
    pub fn append(&mut self, element: T) {
        self.current.push(element);
        self.length += 1;
        if self.current.is_full() {
            let leaf = mem::take(&mut self.current);
            self.blocks.push(ReferenceCounter::new(Node::Leaf(leaf)));
        }
    }

    /// Consumes the builder and returns the vector of every appended
    /// element, in append order.
    ///
    /// An empty builder yields the canonical empty vector without
    /// allocating.
    ///
    /// # Panics
    ///
    /// Panics if more than 32^6 elements were appended.
    #[must_use]
    pub fn build(self) -> PersistentVector<T> {
        let Self {
            current,
            mut blocks,
            length,
        } = self;

        if !current.is_empty() {
            blocks.push(ReferenceCounter::new(Node::Leaf(current)));
        }

        let leaf_count = blocks.len();
        let mut level = blocks;
        let mut depth = 0;
        while level.len() > 1 {
            level = group(level);
            depth += 1;
            assert!(
                depth <= MAX_DEPTH,
                "trie grouping exceeded the maximum depth of {MAX_DEPTH}"
            );
        }

        log::trace!(
            "assembled vector of {length} elements from {leaf_count} leaves at depth {depth}"
        );

        match level.pop() {
            Some(root) => PersistentVector::from_parts(root, depth, length),
            None => PersistentVector::new(),
        }
    }
}

impl<T: Clone> VectorBuilder<T> {
    /// Creates a builder pre-filled with the first `count` elements of
    /// `vector`.
    ///
    /// Full leaves of the prefix are shared with `vector` by reference; only
    /// the trailing partial leaf is cloned into the builder.
    pub(super) fn from_prefix(vector: &PersistentVector<T>, count: usize) -> Self {
        let mut builder = Self::with_capacity(count.min(vector.len()));
        builder.append_prefix(vector, count);
        builder
    }

    /// Appends the first `count` elements of `vector`.
    ///
    /// Only the leaves covering the prefix are visited. While the builder sits
    /// on a leaf boundary, full leaves of `vector` are pushed as shared
    /// blocks; anything else is cloned element by element.
    pub(super) fn append_prefix(&mut self, vector: &PersistentVector<T>, count: usize) {
        let count = count.min(vector.len());
        let mut index = 0;
        while index < count {
            let Some(leaf) = vector.leaf(index) else {
                break;
            };
            let Some(elements) = leaf.elements() else {
                break;
            };
            let remaining = count - index;
            if self.current.is_empty()
                && remaining >= BRANCHING_FACTOR
                && elements.len() == BRANCHING_FACTOR
            {
                self.blocks.push(ReferenceCounter::clone(leaf));
                self.length += BRANCHING_FACTOR;
            } else {
                for element in elements.iter().take(remaining) {
                    self.append(element.clone());
                }
            }
            index += BRANCHING_FACTOR;
        }
    }
}

/// Groups `nodes` into parents of up to 32 children each, preserving order.
fn group<T>(nodes: Vec<ReferenceCounter<Node<T>>>) -> Vec<ReferenceCounter<Node<T>>> {
    let mut parents = Vec::with_capacity(nodes.len().div_ceil(BRANCHING_FACTOR));
    let mut nodes = nodes.into_iter().peekable();
    while nodes.peek().is_some() {
        let children: Children<T> = nodes.by_ref().take(BRANCHING_FACTOR).collect();
        parents.push(ReferenceCounter::new(Node::Internal(children)));
    }
    parents
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for VectorBuilder<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for VectorBuilder<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.append(element);
        }
    }
}

impl<T> Collector for VectorBuilder<T> {
    type Element = T;
    type Output = PersistentVector<T>;

    #[inline]
    fn append(&mut self, element: T) {
        Self::append(self, element);
    }

    #[inline]
    fn finish(self) -> PersistentVector<T> {
        self.build()
    }
}

impl<T> Factory for PersistentVector<T> {
    type Element = T;
    type Collector = VectorBuilder<T>;

    #[inline]
    fn collector() -> VectorBuilder<T> {
        VectorBuilder::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for VectorBuilder<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("VectorBuilder")
            .field("length", &self.length)
            .field("blocks", &self.blocks.len())
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn build_range(length: usize) -> PersistentVector<usize> {
        let mut builder = VectorBuilder::new();
        builder.extend(0..length);
        builder.build()
    }

    #[rstest]
    fn empty_builder_yields_the_canonical_empty_vector() {
        let vector = VectorBuilder::<i32>::new().build();
        assert!(vector.root().is_none());
        assert_eq!(vector.depth(), 0);
        assert_eq!(vector, PersistentVector::new());
    }

    #[rstest]
    #[case(1, 0)]
    #[case(31, 0)]
    #[case(32, 0)]
    #[case(33, 1)]
    #[case(1024, 1)]
    #[case(1025, 2)]
    #[case(32_768, 2)]
    #[case(32_769, 3)]
    fn depth_changes_only_at_capacity_boundaries(
        #[case] length: usize,
        #[case] expected_depth: usize,
    ) {
        let vector = build_range(length);
        assert_eq!(vector.depth(), expected_depth);
        assert_eq!(vector.len(), length);
    }

    #[rstest]
    fn full_leaves_are_flushed_eagerly() {
        let mut builder = VectorBuilder::new();
        builder.extend(0..64);
        assert_eq!(builder.blocks.len(), 2);
        assert!(builder.current.is_empty());
        assert_eq!(builder.len(), 64);
    }

    #[rstest]
    fn single_leaf_becomes_the_root() {
        let vector = build_range(5);
        let root = vector.root().unwrap();
        assert_eq!(root.elements(), Some(&[0, 1, 2, 3, 4][..]));
    }

    #[rstest]
    fn grouping_fills_every_node_but_the_rightmost() {
        let vector = build_range(1025 + 40);
        let root = vector.root().unwrap();
        let children = root.children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].children().map(<[_]>::len), Some(32));
        assert_eq!(children[1].children().map(<[_]>::len), Some(2));
    }

    #[rstest]
    #[case(0)]
    #[case(31)]
    #[case(64)]
    #[case(100)]
    fn from_prefix_shares_full_leaves(#[case] count: usize) {
        let vector = build_range(100);
        let builder = VectorBuilder::from_prefix(&vector, count);
        assert_eq!(builder.len(), count);

        let mut original_leaves = Vec::new();
        Node::collect_leaves(vector.root().unwrap(), &mut original_leaves);
        for (block, leaf) in builder.blocks.iter().zip(original_leaves) {
            assert!(ReferenceCounter::ptr_eq(block, leaf));
        }

        let rebuilt = builder.build();
        assert!(rebuilt.iter().copied().eq(0..count));
    }

    #[rstest]
    #[case(1, 0)]
    #[case(70, 2)]
    #[case(1030, 32)]
    fn short_prefix_of_a_deep_vector(#[case] count: usize, #[case] shared: usize) {
        let vector = build_range(40_000);
        let builder = VectorBuilder::from_prefix(&vector, count);

        assert_eq!(builder.len(), count);
        assert_eq!(builder.blocks.len(), shared);
        assert_eq!(builder.current.len(), count % BRANCHING_FACTOR);
        for (position, block) in builder.blocks.iter().enumerate() {
            let leaf = vector.leaf(position * BRANCHING_FACTOR).unwrap();
            assert!(ReferenceCounter::ptr_eq(block, leaf));
        }

        let rebuilt = builder.build();
        assert!(rebuilt.iter().copied().eq(0..count));
    }

    #[rstest]
    fn append_prefix_off_a_leaf_boundary_clones_elements() {
        let vector = build_range(100);
        let mut builder = VectorBuilder::new();
        builder.append(usize::MAX);
        builder.append_prefix(&vector, 64);

        assert!(builder.blocks.iter().all(|block| {
            (0..100)
                .step_by(BRANCHING_FACTOR)
                .all(|index| !ReferenceCounter::ptr_eq(block, vector.leaf(index).unwrap()))
        }));
        let rebuilt = builder.build();
        assert_eq!(rebuilt.len(), 65);
        assert!(rebuilt.iter().skip(1).copied().eq(0..64));
    }

    #[rstest]
    fn collector_protocol_builds_vectors() {
        let vector = PersistentVector::collect_from(["a", "b", "c"]);
        assert_eq!(vector.len(), 3);
        assert_eq!(vector.get(2), Some(&"c"));
    }
}
