//! Streaming BED4 file parser.

use crate::config;
use crate::interval::BedRecord;
use crate::streaming::parsing::{
    count_fields, parse_u64_fast, should_skip_line, split_bed4, trim_line_end,
};
use std::convert::Infallible;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Label used for records read from standard input.
pub const STDIN_LABEL: &str = "<stdin>";

/// Errors that can occur while reading, merging or writing BED data.
#[derive(Error, Debug)]
pub enum BedError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{input}: malformed record at line {line}: {message}")]
    MalformedRecord {
        input: String,
        line: usize,
        message: String,
    },

    #[error(
        "{input} is not sorted: {chrom}:{start} at line {line} comes after {prev_chrom}:{prev_start}"
    )]
    UnsortedInput {
        input: String,
        line: usize,
        chrom: String,
        start: u64,
        prev_chrom: String,
        prev_start: u64,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, BedError>;

impl From<Infallible> for BedError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Parse one tab-separated line into a record.
///
/// The line must carry at least four fields; `chrom_start` and `chrom_end`
/// must be unsigned integers. Fields after the fourth are ignored.
/// `line_number` is only used for the error message.
pub fn parse_record(line: &[u8], input: &str, line_number: usize) -> Result<BedRecord> {
    let malformed = |message: String| BedError::MalformedRecord {
        input: input.to_string(),
        line: line_number,
        message,
    };

    let fields = split_bed4(line).ok_or_else(|| {
        malformed(format!(
            "Expected at least 4 fields, got {}",
            count_fields(line)
        ))
    })?;

    let chrom = std::str::from_utf8(fields.chrom)
        .map_err(|_| malformed("Chromosome name is not valid UTF-8".to_string()))?;
    let start = parse_u64_fast(fields.start).ok_or_else(|| {
        malformed(format!(
            "Invalid start position: '{}'",
            String::from_utf8_lossy(fields.start)
        ))
    })?;
    let end = parse_u64_fast(fields.end).ok_or_else(|| {
        malformed(format!(
            "Invalid end position: '{}'",
            String::from_utf8_lossy(fields.end)
        ))
    })?;
    let name = std::str::from_utf8(fields.name)
        .map_err(|_| malformed("Name is not valid UTF-8".to_string()))?;

    Ok(BedRecord::new(chrom, start, end, name))
}

/// A streaming BED reader.
///
/// Yields records in file order without checking their order; see
/// [`crate::streaming::SortedBedReader`] for the validating reader.
pub struct BedReader<R: Read> {
    reader: BufReader<R>,
    label: String,
    line_number: usize,
    buffer: Vec<u8>,
}

impl BedReader<File> {
    /// Open a BED file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let label = path.as_ref().display().to_string();
        let file = File::open(path.as_ref()).map_err(|source| BedError::Open {
            path: label.clone(),
            source,
        })?;
        Ok(Self::new(file).with_label(label))
    }
}

impl<R: Read> BedReader<R> {
    /// Create a new BED reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, config::input_buffer_size())
    }

    /// Create a BED reader with custom buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            label: STDIN_LABEL.to_string(),
            line_number: 0,
            buffer: Vec::with_capacity(config::DEFAULT_LINE_BUFFER),
        }
    }

    /// Set the name used for this input in error messages.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The name used for this input in error messages.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Physical line number of the last line read (1-based).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next BED record.
    pub fn read_record(&mut self) -> Result<Option<BedRecord>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            // Skip empty lines and comments
            let line = trim_line_end(&self.buffer);
            if should_skip_line(line) {
                continue;
            }

            return parse_record(line, &self.label, self.line_number).map(Some);
        }
    }

    /// Get an iterator over all records.
    pub fn records(self) -> BedRecordIter<R> {
        BedRecordIter { reader: self }
    }
}

/// Iterator over BED records.
pub struct BedRecordIter<R: Read> {
    reader: BedReader<R>,
}

impl<R: Read> Iterator for BedRecordIter<R> {
    type Item = Result<BedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}

/// Parse records from a string (useful for testing).
pub fn parse_records(content: &str) -> Result<Vec<BedRecord>> {
    let reader = BedReader::new(content.as_bytes());
    reader.records().collect()
}
