//! Error types for indexed collections.

/// An index outside `[0, length)` was passed to an indexed accessor.
///
/// This is the only recoverable failure in the crate: every other operation
/// is total.
///
/// # Examples
///
/// ```rust
/// use vectrie::collection::IndexOutOfBounds;
///
/// let error = IndexOutOfBounds { index: 7, length: 3 };
/// assert_eq!(format!("{error}"), "index 7 out of bounds for length 3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexOutOfBounds {
    /// The offending index.
    pub index: usize,
    /// The length of the collection at the time of the access.
    pub length: usize,
}

impl IndexOutOfBounds {
    /// Returns `Ok(index)` when `index < length`, the error otherwise.
    #[inline]
    pub const fn check(index: usize, length: usize) -> Result<usize, Self> {
        if index < length {
            Ok(index)
        } else {
            Err(Self { index, length })
        }
    }
}

impl std::fmt::Display for IndexOutOfBounds {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "index {} out of bounds for length {}",
            self.index, self.length
        )
    }
}

impl std::error::Error for IndexOutOfBounds {}
