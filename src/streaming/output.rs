//! Buffered output formatting for merged records.
//!
//! Uses itoa for integer formatting to avoid allocation in the hot path.

use crate::bed::BedError;
use crate::config;
use crate::interval::BedRecord;
use std::io::{BufWriter, Write};

/// High-performance BED4 output writer.
///
/// Writes `chrom\tchrom_start\tchrom_end\tname\n` per record. Anything
/// still buffered is flushed on drop, so records written before an error
/// reach the sink.
pub struct BedWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    records_written: usize,
}

impl<W: Write> BedWriter<W> {
    /// Create a new BedWriter sized by the global low-memory setting.
    pub fn new(output: W) -> Self {
        Self::with_capacity(config::output_buffer_size(), output)
    }

    /// Create a new BedWriter with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
            records_written: 0,
        }
    }

    /// Write one record followed by newline.
    #[inline]
    pub fn write_record(&mut self, record: &BedRecord) -> Result<(), BedError> {
        self.writer.write_all(record.chrom.as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(record.chrom_start).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(record.chrom_end).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer.write_all(record.name.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.records_written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<(), BedError> {
        self.writer.flush()?;
        Ok(())
    }
}
