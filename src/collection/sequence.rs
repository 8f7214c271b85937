//! The indexed-sequence contract.

use super::error::IndexOutOfBounds;

/// A finite collection with O(1) length and indexed access.
///
/// Generic sequence code (searching, slicing, comparisons) is written
/// against this trait rather than against a concrete collection.
///
/// # Examples
///
/// ```rust
/// use vectrie::collection::{IndexOutOfBounds, Sequence};
///
/// fn middle<S: Sequence>(sequence: &S) -> Result<&S::Element, IndexOutOfBounds> {
///     sequence.element(sequence.length() / 2)
/// }
///
/// assert_eq!(middle(&vec![1, 2, 3]), Ok(&2));
/// assert!(middle(&Vec::<i32>::new()).is_err());
/// ```
pub trait Sequence {
    /// The element type.
    type Element;

    /// Returns the number of elements.
    fn length(&self) -> usize;

    /// Returns the element at `index`, or [`IndexOutOfBounds`] when
    /// `index >= self.length()`.
    fn element(&self, index: usize) -> Result<&Self::Element, IndexOutOfBounds>;

    /// Returns `true` if the sequence has no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// Returns the first element, if any.
    #[inline]
    fn first_element(&self) -> Option<&Self::Element> {
        self.element(0).ok()
    }

    /// Returns the last element, if any.
    #[inline]
    fn last_element(&self) -> Option<&Self::Element> {
        self.length()
            .checked_sub(1)
            .and_then(|index| self.element(index).ok())
    }
}

impl<T> Sequence for [T] {
    type Element = T;

    #[inline]
    fn length(&self) -> usize {
        self.len()
    }

    #[inline]
    fn element(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.get(index).ok_or(IndexOutOfBounds {
            index,
            length: self.len(),
        })
    }
}

impl<T> Sequence for Vec<T> {
    type Element = T;

    #[inline]
    fn length(&self) -> usize {
        self.len()
    }

    #[inline]
    fn element(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.as_slice().element(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn vec_element_in_range() {
        let values = vec![10, 20, 30];
        assert_eq!(values.element(1), Ok(&20));
        assert_eq!(values.first_element(), Some(&10));
        assert_eq!(values.last_element(), Some(&30));
    }

    #[rstest]
    #[case(3)]
    #[case(4)]
    #[case(usize::MAX)]
    fn slice_element_out_of_range(#[case] index: usize) {
        let values: &[i32] = &[1, 2, 3];
        assert_eq!(
            values.element(index),
            Err(IndexOutOfBounds { index, length: 3 })
        );
    }

    #[rstest]
    fn empty_sequence_has_no_ends() {
        let values: Vec<i32> = Vec::new();
        assert!(Sequence::is_empty(&values));
        assert_eq!(values.first_element(), None);
        assert_eq!(values.last_element(), None);
    }
}
