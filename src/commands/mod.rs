//! Command implementations driven by the binary

pub mod sync;
