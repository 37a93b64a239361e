//! Streaming building blocks for the two-way merge.
//!
//! This module provides the shared components:
//! - Zero-allocation BED4 field parsing
//! - Sort validation and the validating reader
//! - The two-way merge engine
//! - Efficient output formatting
//!
//! Streaming merges hold O(1) records in memory per input.

pub mod output;
pub mod parsing;
pub mod sorted;
pub mod two_way;
pub mod validation;

pub use output::BedWriter;
pub use parsing::{parse_u64_fast, should_skip_line, split_bed4, Bed4Fields};
pub use sorted::{read_sorted_records, read_sorted_sequence, SortedBedReader};
pub use two_way::{merge, Side, TwoWayMerge};
pub use validation::SortValidator;
