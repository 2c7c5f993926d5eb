//! Typed wrappers over the remote collections

mod records;

pub use records::*;
