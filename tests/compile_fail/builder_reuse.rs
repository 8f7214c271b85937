//! A builder is consumed by `build` and cannot be used again.

use vectrie::persistent::VectorBuilder;
fn main() {
    let mut builder = VectorBuilder::<i32>::new();
    builder.append(1);
    let _first = builder.build();
    let _second = builder.build();
}
