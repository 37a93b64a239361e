//! Sorted-stream reading: records in file order, checked as they arrive.

use crate::bed::{BedReader, Result};
use crate::interval::BedRecord;
use crate::streaming::validation::SortValidator;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A BED reader that rejects input not in `(chrom, chrom_start)` order.
///
/// Produces a lazy, single-pass sequence of records. The first parse or
/// order error is yielded once and then the iterator is exhausted.
pub struct SortedBedReader<R: Read> {
    reader: BedReader<R>,
    validator: SortValidator,
    failed: bool,
}

impl SortedBedReader<File> {
    /// Open a sorted BED file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(BedReader::from_path(path)?))
    }
}

impl<R: Read> SortedBedReader<R> {
    pub fn new(reader: BedReader<R>) -> Self {
        Self {
            reader,
            validator: SortValidator::new(),
            failed: false,
        }
    }

    /// The input name used in error messages.
    pub fn label(&self) -> &str {
        self.reader.label()
    }

    /// Number of records accepted so far.
    pub fn records_read(&self) -> usize {
        self.validator.record_count()
    }

    /// Read the next record, checking it against the previous one.
    pub fn read_record(&mut self) -> Result<Option<BedRecord>> {
        if self.failed {
            return Ok(None);
        }
        let result = self.read_checked();
        if result.is_err() {
            self.failed = true;
        }
        result
    }

    fn read_checked(&mut self) -> Result<Option<BedRecord>> {
        let Some(rec) = self.reader.read_record()? else {
            return Ok(None);
        };
        self.validator
            .validate(&rec, self.reader.label(), self.reader.line_number())?;
        Ok(Some(rec))
    }
}

impl<R: Read> Iterator for SortedBedReader<R> {
    type Item = Result<BedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Read a whole sorted input into memory.
///
/// An empty source gives an empty `Vec`. Fails with
/// [`crate::bed::BedError::UnsortedInput`] on the first record that sorts
/// before its predecessor, or `MalformedRecord` on a bad line.
pub fn read_sorted_sequence<R: Read>(reader: BedReader<R>) -> Result<Vec<BedRecord>> {
    SortedBedReader::new(reader).collect()
}

/// Read a whole sorted BED file into memory.
pub fn read_sorted_records<P: AsRef<Path>>(path: P) -> Result<Vec<BedRecord>> {
    SortedBedReader::from_path(path)?.collect()
}
