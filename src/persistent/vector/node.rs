//! Trie nodes and index arithmetic.
//!
//! A node is either a leaf of up to [`BRANCHING_FACTOR`] elements or an
//! internal node of up to [`BRANCHING_FACTOR`] shared children. The level of
//! a node (0 for leaves) is never stored; callers always know it from the
//! vector's depth.

use arrayvec::ArrayVec;

use super::super::ReferenceCounter;

// =============================================================================
// Constants
// =============================================================================

/// Bits of the index consumed per trie level.
pub(super) const BITS_PER_LEVEL: usize = 5;

/// Branching factor (2^5 = 32).
pub(super) const BRANCHING_FACTOR: usize = 1 << BITS_PER_LEVEL;

/// Bit mask for extracting a slot within a node.
pub(super) const MASK: usize = BRANCHING_FACTOR - 1;

/// Deepest supported trie: six levels, 32^6 elements.
pub(super) const MAX_DEPTH: usize = 5;

static_assertions::const_assert!(BRANCHING_FACTOR.is_power_of_two());
static_assertions::const_assert!(BITS_PER_LEVEL * (MAX_DEPTH + 1) < usize::BITS as usize);

/// The slot selecting the child at trie `level` for element `index`.
#[inline]
pub(super) const fn slot(index: usize, level: usize) -> usize {
    (index >> (BITS_PER_LEVEL * level)) & MASK
}

/// The number of elements a trie of `depth` internal levels can hold.
#[inline]
pub(super) const fn capacity(depth: usize) -> usize {
    1 << (BITS_PER_LEVEL * (depth + 1))
}

/// The minimum depth whose capacity fits `length` elements.
pub(super) const fn depth_for(length: usize) -> usize {
    let mut depth = 0;
    while depth < MAX_DEPTH && capacity(depth) < length {
        depth += 1;
    }
    depth
}

// =============================================================================
// Node Definition
// =============================================================================

pub(super) type Leaf<T> = ArrayVec<T, BRANCHING_FACTOR>;
pub(super) type Children<T> = ArrayVec<ReferenceCounter<Node<T>>, BRANCHING_FACTOR>;

/// A trie node.
#[derive(Clone)]
pub(super) enum Node<T> {
    /// Level 0: the elements themselves.
    Leaf(Leaf<T>),
    /// Level > 0: shared children one level down.
    Internal(Children<T>),
}

impl<T> Node<T> {
    /// Returns the child in `slot`, or `None` for leaves and empty slots.
    #[inline]
    pub(super) fn child(&self, slot: usize) -> Option<&ReferenceCounter<Self>> {
        match self {
            Self::Internal(children) => children.get(slot),
            Self::Leaf(_) => None,
        }
    }

    /// Returns the elements of a leaf.
    #[inline]
    pub(super) fn elements(&self) -> Option<&[T]> {
        match self {
            Self::Leaf(elements) => Some(elements.as_slice()),
            Self::Internal(_) => None,
        }
    }

    /// Returns the children of an internal node.
    #[inline]
    pub(super) fn children(&self) -> Option<&[ReferenceCounter<Self>]> {
        match self {
            Self::Internal(children) => Some(children.as_slice()),
            Self::Leaf(_) => None,
        }
    }

    /// Wraps `node` in `levels` single-child internal nodes.
    pub(super) fn path(levels: usize, node: Self) -> Self {
        (0..levels).fold(node, |child, _| {
            let mut children = Children::new();
            children.push(ReferenceCounter::new(child));
            Self::Internal(children)
        })
    }

    /// Appends every leaf of this subtree, left to right, to `leaves`.
    #[cfg(test)]
    pub(super) fn collect_leaves<'a>(
        node: &'a ReferenceCounter<Self>,
        leaves: &mut Vec<&'a ReferenceCounter<Self>>,
    ) {
        match node.as_ref() {
            Self::Leaf(_) => leaves.push(node),
            Self::Internal(children) => {
                for child in children {
                    Self::collect_leaves(child, leaves);
                }
            }
        }
    }
}

impl<T: Clone> Node<T> {
    /// Returns a copy of this subtree with the element at `index` replaced.
    ///
    /// Only the nodes on the path to `index` are copied; every sibling is
    /// shared with `self`.
    pub(super) fn updated(&self, level: usize, index: usize, element: T) -> Self {
        match self {
            Self::Leaf(elements) => {
                let mut elements = elements.clone();
                elements[slot(index, 0)] = element;
                Self::Leaf(elements)
            }
            Self::Internal(children) => {
                let slot = slot(index, level);
                let mut children = children.clone();
                let child = children[slot].updated(level - 1, index, element);
                children[slot] = ReferenceCounter::new(child);
                Self::Internal(children)
            }
        }
    }

    /// Returns a copy of this subtree with `element` stored at `index`, the
    /// first free position to the right.
    ///
    /// The subtree must have room for `index`; growing the root is the
    /// caller's job.
    pub(super) fn appended(&self, level: usize, index: usize, element: T) -> Self {
        match self {
            Self::Leaf(elements) => {
                debug_assert_eq!(elements.len(), slot(index, 0));
                let mut elements = elements.clone();
                elements.push(element);
                Self::Leaf(elements)
            }
            Self::Internal(children) => {
                let slot = slot(index, level);
                let mut children = children.clone();
                if let Some(child) = children.get(slot) {
                    let child = child.appended(level - 1, index, element);
                    children[slot] = ReferenceCounter::new(child);
                } else {
                    debug_assert_eq!(children.len(), slot);
                    let mut leaf = Leaf::new();
                    leaf.push(element);
                    let child = Self::path(level - 1, Self::Leaf(leaf));
                    children.push(ReferenceCounter::new(child));
                }
                Self::Internal(children)
            }
        }
    }

    /// Returns a copy of this subtree without its last element, or `None`
    /// when nothing would be left.
    pub(super) fn without_last(&self) -> Option<Self> {
        match self {
            Self::Leaf(elements) => {
                if elements.len() <= 1 {
                    return None;
                }
                let mut elements = elements.clone();
                elements.pop();
                Some(Self::Leaf(elements))
            }
            Self::Internal(children) => {
                let mut children = children.clone();
                let last = children.pop()?;
                if let Some(remaining) = last.without_last() {
                    children.push(ReferenceCounter::new(remaining));
                }
                if children.is_empty() {
                    None
                } else {
                    Some(Self::Internal(children))
                }
            }
        }
    }
}
