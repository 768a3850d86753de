//! Individual lint checks

pub mod content;
pub mod placement;
pub mod structure;
