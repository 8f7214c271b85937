//! Generic collection contracts.
//!
//! - [`Sequence`]: O(1) length plus indexed access that reports
//!   [`IndexOutOfBounds`] instead of panicking
//! - [`Collector`] / [`Factory`]: the append-only construction protocol used
//!   to build a collection without knowing its layout
//!
//! [`PersistentVector`](crate::persistent::PersistentVector) implements all
//! of them; `Vec<T>` implements them as well so generic code can be exercised
//! against either.

mod error;
mod factory;
mod sequence;

pub use error::IndexOutOfBounds;
pub use factory::{Collector, Factory};
pub use sequence::Sequence;
