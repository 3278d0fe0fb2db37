//! Directory scanning logic

mod walker;

pub use walker::{classify, scan_tree};
