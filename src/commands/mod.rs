//! Command implementations for bedmerge.

pub mod merge;

pub use merge::{MergeCommand, MergeStats};
