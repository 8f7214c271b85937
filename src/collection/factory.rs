//! The "empty → accumulate → finish" construction protocol.
//!
//! A [`Factory`] hands out a fresh [`Collector`]; elements are appended to
//! it one at a time and [`Collector::finish`] turns it into the finished
//! collection. Generic code can therefore build any collection kind without
//! knowing how it is laid out internally.
//!
//! # Examples
//!
//! ```rust
//! use vectrie::collection::Factory;
//!
//! fn squares<C: Factory<Element = u64>>(count: u64) -> C {
//!     C::collect_from((0..count).map(|value| value * value))
//! }
//!
//! let squares: Vec<u64> = squares(4);
//! assert_eq!(squares, vec![0, 1, 4, 9]);
//! ```

/// A single-use, append-only accumulator.
///
/// [`finish`](Collector::finish) takes `self` by value, so a collector
/// cannot be appended to once it has produced its output.
pub trait Collector {
    /// The element type accepted by [`append`](Collector::append).
    type Element;
    /// The collection produced by [`finish`](Collector::finish).
    type Output;

    /// Adds `element` at the end of the collection being built.
    fn append(&mut self, element: Self::Element);

    /// Appends every element of `elements`, in order.
    fn append_all<I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = Self::Element>,
    {
        for element in elements {
            self.append(element);
        }
    }

    /// Consumes the collector and returns the collection.
    fn finish(self) -> Self::Output;
}

/// A collection that can be built through a [`Collector`].
pub trait Factory: Sized {
    /// The element type of the collection.
    type Element;
    /// The collector that builds this collection.
    type Collector: Collector<Element = Self::Element, Output = Self>;

    /// Returns an empty collector.
    fn collector() -> Self::Collector;

    /// Builds the collection from `elements`, in order.
    fn collect_from<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = Self::Element>,
    {
        let mut collector = Self::collector();
        collector.append_all(elements);
        collector.finish()
    }
}

impl<T> Collector for Vec<T> {
    type Element = T;
    type Output = Self;

    #[inline]
    fn append(&mut self, element: T) {
        self.push(element);
    }

    #[inline]
    fn append_all<I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.extend(elements);
    }

    #[inline]
    fn finish(self) -> Self {
        self
    }
}

impl<T> Factory for Vec<T> {
    type Element = T;
    type Collector = Self;

    #[inline]
    fn collector() -> Self {
        Self::new()
    }
}
