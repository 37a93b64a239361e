//! Sort validation for BED streams.
//!
//! The merge requires each input to be in non-decreasing
//! `(chrom, chrom_start)` order, with chromosomes compared as plain strings
//! (chr1 < chr10 < chr2). Equal adjacent keys are allowed. Anything else is
//! reported as [`BedError::UnsortedInput`] and is never repaired.

use crate::bed::BedError;
use crate::interval::Positioned;
use std::cmp::Ordering;

/// Inline sort validator for use within streaming loops.
///
/// Remembers only the last accepted position, so memory use is independent
/// of input size.
#[derive(Debug, Default)]
pub struct SortValidator {
    prev_chrom: String,
    prev_start: u64,
    record_count: usize,
}

impl SortValidator {
    /// Create a new sort validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that the given record does not sort before the previous one.
    ///
    /// `input` and `line` are only used to build the error.
    #[inline]
    pub fn validate<T: Positioned>(
        &mut self,
        record: &T,
        input: &str,
        line: usize,
    ) -> Result<(), BedError> {
        let chrom = record.chrom();
        let start = record.chrom_start();

        if self.record_count > 0 {
            let order = chrom
                .cmp(self.prev_chrom.as_str())
                .then(start.cmp(&self.prev_start));
            if order == Ordering::Less {
                return Err(BedError::UnsortedInput {
                    input: input.to_string(),
                    line,
                    chrom: chrom.to_string(),
                    start,
                    prev_chrom: self.prev_chrom.clone(),
                    prev_start: self.prev_start,
                });
            }
        }

        if self.record_count == 0 || chrom != self.prev_chrom {
            self.prev_chrom.clear();
            self.prev_chrom.push_str(chrom);
        }
        self.prev_start = start;
        self.record_count += 1;

        Ok(())
    }

    /// Get the number of records accepted.
    pub fn record_count(&self) -> usize {
        self.record_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::BedRecord;

    fn rec(chrom: &str, start: u64) -> BedRecord {
        BedRecord::new(chrom, start, start + 10, "x")
    }

    #[test]
    fn test_sort_validator() {
        let mut validator = SortValidator::new();
        assert!(validator.validate(&rec("chr1", 100), "a", 1).is_ok());
        assert!(validator.validate(&rec("chr1", 200), "a", 2).is_ok());
        assert!(validator.validate(&rec("chr2", 100), "a", 3).is_ok());
        assert_eq!(validator.record_count(), 3);
    }

    #[test]
    fn test_sort_validator_equal_keys_allowed() {
        let mut validator = SortValidator::new();
        assert!(validator.validate(&rec("chr1", 100), "a", 1).is_ok());
        assert!(validator.validate(&rec("chr1", 100), "a", 2).is_ok());
    }

    #[test]
    fn test_sort_validator_lexicographic_chroms() {
        let mut validator = SortValidator::new();
        assert!(validator.validate(&rec("chr1", 100), "a", 1).is_ok());
        assert!(validator.validate(&rec("chr10", 5), "a", 2).is_ok());
        assert!(validator.validate(&rec("chr2", 1), "a", 3).is_ok());
    }

    #[test]
    fn test_sort_validator_position_backwards() {
        let mut validator = SortValidator::new();
        assert!(validator.validate(&rec("chr1", 100), "a.bed", 1).is_ok());
        let err = validator.validate(&rec("chr1", 50), "a.bed", 2).unwrap_err();

        match err {
            BedError::UnsortedInput {
                input,
                line,
                chrom,
                start,
                prev_chrom,
                prev_start,
            } => {
                assert_eq!(input, "a.bed");
                assert_eq!(line, 2);
                assert_eq!(chrom, "chr1");
                assert_eq!(start, 50);
                assert_eq!(prev_chrom, "chr1");
                assert_eq!(prev_start, 100);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sort_validator_chrom_backwards() {
        let mut validator = SortValidator::new();
        assert!(validator.validate(&rec("chr2", 100), "a", 1).is_ok());
        assert!(validator.validate(&rec("chr1", 500), "a", 2).is_err());
    }
}
