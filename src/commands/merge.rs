//! Two-way merge command implementation.
//!
//! Interleaves two coordinate-sorted BED files into one sorted stream.
//!
//! # Modes
//!
//! - In-memory (default): both inputs are read and order-checked in full
//!   before anything is written, so a bad input produces no output.
//! - Streaming: records are pulled one at a time from each input and checked
//!   inline. O(1) memory; on error, lines already written stay written.
//!
//! Both modes produce identical output on valid input.

use crate::bed::{BedError, BedReader, Result};
use crate::interval::{BedRecord, Positioned};
use crate::streaming::{read_sorted_sequence, BedWriter, SortedBedReader, TwoWayMerge};
use std::borrow::Borrow;
use std::convert::Infallible;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Merge command configuration.
#[derive(Debug, Clone, Default)]
pub struct MergeCommand {
    /// Pull records lazily instead of loading both inputs first
    pub streaming: bool,
}

impl MergeCommand {
    pub fn new() -> Self {
        Self { streaming: false }
    }

    /// Set streaming mode.
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Merge two BED files (either may be `-` for stdin) into `output`.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>, W: Write>(
        &self,
        path_a: P,
        path_b: Q,
        output: &mut W,
    ) -> Result<MergeStats> {
        let (path_a, path_b) = (path_a.as_ref(), path_b.as_ref());
        if is_stdin(path_a) && is_stdin(path_b) {
            return Err(BedError::InvalidArgument(
                "only one input can be read from stdin".to_string(),
            ));
        }

        let reader_a = open_input(path_a)?;
        let reader_b = open_input(path_b)?;
        self.run_readers(reader_a, reader_b, output)
    }

    /// Merge two readers using the configured mode.
    pub fn run_readers<RA: Read, RB: Read, W: Write>(
        &self,
        reader_a: BedReader<RA>,
        reader_b: BedReader<RB>,
        output: &mut W,
    ) -> Result<MergeStats> {
        log::debug!(
            "merging {} with {} ({} mode)",
            reader_a.label(),
            reader_b.label(),
            if self.streaming {
                "streaming"
            } else {
                "in-memory"
            }
        );

        let stats = if self.streaming {
            self.run_streaming(
                SortedBedReader::new(reader_a),
                SortedBedReader::new(reader_b),
                output,
            )?
        } else {
            let a = read_sorted_sequence(reader_a)?;
            let b = read_sorted_sequence(reader_b)?;
            log::debug!("loaded {} + {} records", a.len(), b.len());
            self.merge_sequences(&a, &b, output)?
        };

        log::debug!("merge finished: {}", stats);
        Ok(stats)
    }

    /// Merge two already-loaded sorted sequences.
    ///
    /// The sequences are not re-checked for order.
    pub fn merge_sequences<W: Write>(
        &self,
        a: &[BedRecord],
        b: &[BedRecord],
        output: &mut W,
    ) -> Result<MergeStats> {
        let engine = TwoWayMerge::new(
            a.iter().map(Ok::<_, Infallible>),
            b.iter().map(Ok::<_, Infallible>),
        );
        write_merged(engine, output)
    }

    /// Core streaming merge: one look-ahead record per input.
    pub fn run_streaming<RA: Read, RB: Read, W: Write>(
        &self,
        a: SortedBedReader<RA>,
        b: SortedBedReader<RB>,
        output: &mut W,
    ) -> Result<MergeStats> {
        write_merged(TwoWayMerge::new(a, b), output)
    }
}

/// Drain the engine into the writer and collect counters.
fn write_merged<A, B, T, E, W>(
    mut engine: TwoWayMerge<A, B, T>,
    output: &mut W,
) -> Result<MergeStats>
where
    A: Iterator<Item = std::result::Result<T, E>>,
    B: Iterator<Item = std::result::Result<T, E>>,
    T: Positioned + Borrow<BedRecord>,
    BedError: From<E>,
    W: Write,
{
    let mut writer = BedWriter::new(output);

    for item in engine.by_ref() {
        let rec = item?;
        writer.write_record(rec.borrow())?;
    }
    writer.flush()?;

    Ok(MergeStats {
        records_a: engine.emitted_a(),
        records_b: engine.emitted_b(),
        ties: engine.ties(),
        records_written: writer.records_written(),
    })
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn open_input(path: &Path) -> Result<BedReader<Box<dyn Read>>> {
    if is_stdin(path) {
        let stdin: Box<dyn Read> = Box::new(io::stdin().lock());
        return Ok(BedReader::new(stdin));
    }

    let file = File::open(path).map_err(|source| BedError::Open {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("opened {}", path.display());
    let file: Box<dyn Read> = Box::new(file);
    Ok(BedReader::new(file).with_label(path.display().to_string()))
}

/// Statistics from a merge operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    /// Records taken from the first input
    pub records_a: usize,
    /// Records taken from the second input
    pub records_b: usize,
    /// A/B record pairs emitted together on equal (chrom, chrom_start)
    pub ties: usize,
    /// Records written to the output
    pub records_written: usize,
}

impl std::fmt::Display for MergeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "A: {}, B: {}, Ties: {}, Written: {}",
            self.records_a, self.records_b, self.ties, self.records_written
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bed::parse_records;
    use tempfile::NamedTempFile;

    fn make_bed_content(records: &[(&str, u64, u64, &str)]) -> String {
        records
            .iter()
            .map(|(c, s, e, n)| format!("{}\t{}\t{}\t{}\n", c, s, e, n))
            .collect()
    }

    fn run_both_modes(a: &str, b: &str) -> Vec<Result<(String, MergeStats)>> {
        [false, true]
            .into_iter()
            .map(|streaming| -> Result<(String, MergeStats)> {
                let cmd = MergeCommand::new().with_streaming(streaming);
                let mut output = Vec::new();
                let stats = cmd.run_readers(
                    BedReader::new(a.as_bytes()).with_label("a.bed"),
                    BedReader::new(b.as_bytes()).with_label("b.bed"),
                    &mut output,
                )?;
                Ok((String::from_utf8(output).unwrap(), stats))
            })
            .collect()
    }

    #[test]
    fn test_basic_merge() {
        let a = make_bed_content(&[("chr1", 10, 20, "a"), ("chr2", 5, 15, "b")]);
        let b = make_bed_content(&[("chr1", 10, 30, "d"), ("chr1", 15, 25, "c")]);

        for result in run_both_modes(&a, &b) {
            let (output, stats) = result.unwrap();
            assert_eq!(
                output,
                "chr1\t10\t20\ta\nchr1\t10\t30\td\nchr1\t15\t25\tc\nchr2\t5\t15\tb\n"
            );
            assert_eq!(
                stats,
                MergeStats {
                    records_a: 2,
                    records_b: 2,
                    ties: 1,
                    records_written: 4,
                }
            );
        }
    }

    #[test]
    fn test_merge_with_empty_input() {
        let a = make_bed_content(&[("chr1", 1, 2, "x"), ("chr3", 1, 2, "y")]);

        for result in run_both_modes(&a, "") {
            let (output, stats) = result.unwrap();
            assert_eq!(output, a);
            assert_eq!(stats.records_written, 2);
        }
        for result in run_both_modes("", &a) {
            assert_eq!(result.unwrap().0, a);
        }
        for result in run_both_modes("", "") {
            assert_eq!(result.unwrap().0, "");
        }
    }

    #[test]
    fn test_extra_columns_dropped() {
        let a = "chr1\t1\t2\tx\t0\t+\n";
        let b = "chr1\t0\t5\ty\t9\t-\textra\n";

        for result in run_both_modes(a, b) {
            assert_eq!(result.unwrap().0, "chr1\t0\t5\ty\nchr1\t1\t2\tx\n");
        }
    }

    #[test]
    fn test_unsorted_input_rejected_in_memory() {
        let a = make_bed_content(&[("chr1", 1, 2, "ok")]);
        let b = make_bed_content(&[("chr1", 100, 200, "x"), ("chr1", 50, 150, "y")]);

        let cmd = MergeCommand::new();
        let mut output = Vec::new();
        let err = cmd
            .run_readers(
                BedReader::new(a.as_bytes()),
                BedReader::new(b.as_bytes()).with_label("b.bed"),
                &mut output,
            )
            .unwrap_err();

        assert!(matches!(err, BedError::UnsortedInput { line: 2, .. }));
        assert!(err.to_string().contains("b.bed is not sorted"));
        assert!(output.is_empty());
    }

    #[test]
    fn test_unsorted_input_rejected_streaming() {
        let a = make_bed_content(&[("chr1", 1, 2, "a1"), ("chr1", 500, 600, "a2")]);
        let b = make_bed_content(&[
            ("chr1", 100, 200, "b1"),
            ("chr1", 300, 400, "b2"),
            ("chr1", 50, 150, "b3"),
        ]);

        let mut output = Vec::new();
        let err = MergeCommand::new()
            .with_streaming(true)
            .run_readers(
                BedReader::new(a.as_bytes()),
                BedReader::new(b.as_bytes()),
                &mut output,
            )
            .unwrap_err();

        assert!(matches!(err, BedError::UnsortedInput { line: 3, .. }));
        // Records merged before the bad line are kept
        let written = String::from_utf8(output).unwrap();
        assert!(written.starts_with("chr1\t1\t2\ta1\nchr1\t100\t200\tb1\n"));
        assert!(!written.contains("b3"));
    }

    #[test]
    fn test_malformed_input_rejected() {
        for result in run_both_modes("chr1\t1\t2\n", "") {
            assert!(matches!(
                result.unwrap_err(),
                BedError::MalformedRecord { line: 1, .. }
            ));
        }
    }

    #[test]
    fn test_merge_sequences() {
        let a = parse_records("chr1\t5\t6\ta\n").unwrap();
        let b = parse_records("chr1\t1\t2\tb\nchr1\t5\t9\tc\n").unwrap();

        let mut output = Vec::new();
        let stats = MergeCommand::new()
            .merge_sequences(&a, &b, &mut output)
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "chr1\t1\t2\tb\nchr1\t5\t6\ta\nchr1\t5\t9\tc\n"
        );
        assert_eq!(stats.ties, 1);
    }

    #[test]
    fn test_run_from_files() {
        use std::io::Write as _;

        let mut file_a = NamedTempFile::new().unwrap();
        let mut file_b = NamedTempFile::new().unwrap();
        write!(file_a, "chr2\t1\t2\ta\n").unwrap();
        write!(file_b, "chr1\t1\t2\tb\n").unwrap();
        file_a.flush().unwrap();
        file_b.flush().unwrap();

        let mut output = Vec::new();
        MergeCommand::new()
            .run(file_a.path(), file_b.path(), &mut output)
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "chr1\t1\t2\tb\nchr2\t1\t2\ta\n"
        );
    }

    #[test]
    fn test_missing_file_reports_path() {
        let mut output = Vec::new();
        let err = MergeCommand::new()
            .run("/nonexistent/a.bed", "/nonexistent/b.bed", &mut output)
            .unwrap_err();

        assert!(matches!(err, BedError::Open { .. }));
        assert!(err.to_string().contains("/nonexistent/a.bed"));
    }

    #[test]
    fn test_both_stdin_rejected() {
        let mut output = Vec::new();
        let err = MergeCommand::new().run("-", "-", &mut output).unwrap_err();

        assert!(matches!(err, BedError::InvalidArgument(_)));
    }

    #[test]
    fn test_stats_display() {
        let stats = MergeStats {
            records_a: 3,
            records_b: 2,
            ties: 1,
            records_written: 5,
        };
        assert_eq!(stats.to_string(), "A: 3, B: 2, Ties: 1, Written: 5");
    }
}
