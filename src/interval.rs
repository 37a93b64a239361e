//! Core record type for genomic intervals and their sort order.

use std::cmp::Ordering;
use std::fmt;

/// Anything that sits at a genomic position.
///
/// Sorted BED input is ordered by chromosome name (plain byte-wise string
/// comparison, so `chr10` sorts before `chr2`) and then by start coordinate.
/// The end coordinate never takes part in the ordering.
pub trait Positioned {
    fn chrom(&self) -> &str;

    fn chrom_start(&self) -> u64;

    /// Compare two items by `(chrom, chrom_start)`.
    #[inline]
    fn cmp_position(&self, other: &Self) -> Ordering {
        self.chrom()
            .cmp(other.chrom())
            .then(self.chrom_start().cmp(&other.chrom_start()))
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    #[inline]
    fn chrom(&self) -> &str {
        (**self).chrom()
    }

    #[inline]
    fn chrom_start(&self) -> u64 {
        (**self).chrom_start()
    }
}

/// A BED4 record: chromosome, 0-based half-open coordinates and a name.
/// Uses 0-based, half-open coordinates (BED format).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BedRecord {
    pub chrom: String,
    pub chrom_start: u64,
    pub chrom_end: u64,
    pub name: String,
}

impl BedRecord {
    /// Create a new record.
    #[inline]
    pub fn new(
        chrom: impl Into<String>,
        chrom_start: u64,
        chrom_end: u64,
        name: impl Into<String>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            chrom_start,
            chrom_end,
            name: name.into(),
        }
    }
}

impl Positioned for BedRecord {
    #[inline]
    fn chrom(&self) -> &str {
        &self.chrom
    }

    #[inline]
    fn chrom_start(&self) -> u64 {
        self.chrom_start
    }
}

impl fmt::Display for BedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.chrom, self.chrom_start, self.chrom_end, self.name
        )
    }
}
