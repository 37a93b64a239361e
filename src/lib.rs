//! bedmerge: two-way merge of coordinate-sorted BED files
//!
//! This library merges two BED4 inputs, each sorted by
//! `(chrom, chrom_start)`, into a single sorted output stream in linear
//! time without re-sorting.
//!
//! # Features
//!
//! - **Order checking**: unsorted or malformed input is rejected, never repaired
//! - **Deterministic ties**: on equal `(chrom, chrom_start)` A's record is
//!   written, then B's
//! - **Streaming I/O**: optional O(1)-memory mode for large files
//!
//! # Example
//!
//! ```rust,no_run
//! use bedmerge::commands::MergeCommand;
//!
//! let stdout = std::io::stdout();
//! let mut handle = stdout.lock();
//!
//! let stats = MergeCommand::new()
//!     .run("a.bed", "b.bed", &mut handle)
//!     .unwrap();
//! eprintln!("{}", stats);
//! ```

pub mod bed;
pub mod commands;
pub mod config;
pub mod interval;
pub mod streaming;

// Re-export commonly used types
pub use bed::{parse_record, BedError, BedReader};
pub use interval::{BedRecord, Positioned};
pub use streaming::{merge, read_sorted_sequence, SortedBedReader, TwoWayMerge};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bed::{parse_record, BedError, BedReader};
    pub use crate::commands::{MergeCommand, MergeStats};
    pub use crate::interval::{BedRecord, Positioned};
    pub use crate::streaming::{merge, read_sorted_sequence, SortedBedReader, TwoWayMerge};
}
