//! Two-way merge of coordinate-sorted streams.
//!
//! # Algorithm
//!
//! Classic sorted merge with one look-ahead slot per input:
//! 1. Keep the next unconsumed item of A and of B
//! 2. While both are present, emit the one that sorts first by
//!    `(chrom, chrom_start)`
//! 3. On equal keys emit A's item, then B's item, and only then pull the
//!    next item of either input
//! 4. Once one side is exhausted, drain the other without comparing
//!
//! Runs of equal keys present in both inputs therefore alternate pairwise
//! (a1, b1, a2, b2, ...), and each side keeps its own order.
//!
//! # Memory Complexity
//!
//! O(1) - two look-ahead items, regardless of input size.
//!
//! # Requirements
//!
//! Both inputs MUST already be sorted. The engine does not re-check this;
//! [`crate::streaming::SortedBedReader`] does.

use crate::interval::{BedRecord, Positioned};
use std::cmp::Ordering;
use std::convert::Infallible;

/// Which input a merged item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

/// Lazy merge of two fallible, sorted iterators.
///
/// Yields `Result<T, E>`. The first error from either input is passed
/// through and ends the merge. Single-pass and forward-only.
pub struct TwoWayMerge<A, B, T> {
    a: A,
    b: B,
    head_a: Option<T>,
    head_b: Option<T>,
    a_done: bool,
    b_done: bool,
    failed: bool,
    // B's head tied with the A item just emitted and goes out next
    tie_pending: bool,
    from_a: usize,
    from_b: usize,
    ties: usize,
}

impl<A, B, T, E> TwoWayMerge<A, B, T>
where
    A: Iterator<Item = Result<T, E>>,
    B: Iterator<Item = Result<T, E>>,
    T: Positioned,
{
    pub fn new(a: A, b: B) -> Self {
        Self {
            a,
            b,
            head_a: None,
            head_b: None,
            a_done: false,
            b_done: false,
            failed: false,
            tie_pending: false,
            from_a: 0,
            from_b: 0,
            ties: 0,
        }
    }

    /// Number of items emitted from input A so far.
    pub fn emitted_a(&self) -> usize {
        self.from_a
    }

    /// Number of items emitted from input B so far.
    pub fn emitted_b(&self) -> usize {
        self.from_b
    }

    /// Number of A/B pairs emitted together because their keys were equal.
    pub fn ties(&self) -> usize {
        self.ties
    }

    /// Like `next`, but also reports which input the item came from.
    pub fn next_with_side(&mut self) -> Option<Result<(Side, T), E>> {
        if self.failed {
            return None;
        }
        if self.tie_pending {
            self.tie_pending = false;
            if let Some(item) = self.head_b.take() {
                self.from_b += 1;
                return Some(Ok((Side::B, item)));
            }
        }
        if let Err(e) = self.fill() {
            self.failed = true;
            return Some(Err(e));
        }

        let side = match (&self.head_a, &self.head_b) {
            (None, None) => return None,
            (Some(_), None) => Side::A,
            (None, Some(_)) => Side::B,
            (Some(a), Some(b)) => match a.cmp_position(b) {
                Ordering::Less => Side::A,
                Ordering::Equal => {
                    self.ties += 1;
                    self.tie_pending = true;
                    Side::A
                }
                Ordering::Greater => Side::B,
            },
        };

        let item = match side {
            Side::A => {
                self.from_a += 1;
                self.head_a.take()
            }
            Side::B => {
                self.from_b += 1;
                self.head_b.take()
            }
        };
        item.map(|item| Ok((side, item)))
    }

    /// Pull the next item into any empty look-ahead slot.
    fn fill(&mut self) -> Result<(), E> {
        if self.head_a.is_none() && !self.a_done {
            match self.a.next() {
                Some(item) => self.head_a = Some(item?),
                None => self.a_done = true,
            }
        }
        if self.head_b.is_none() && !self.b_done {
            match self.b.next() {
                Some(item) => self.head_b = Some(item?),
                None => self.b_done = true,
            }
        }
        Ok(())
    }
}

impl<A, B, T, E> Iterator for TwoWayMerge<A, B, T>
where
    A: Iterator<Item = Result<T, E>>,
    B: Iterator<Item = Result<T, E>>,
    T: Positioned,
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_with_side()
            .map(|result| result.map(|(_, item)| item))
    }
}

/// Merge two sorted, in-memory sequences.
///
/// Returns a lazy iterator over references into `a` and `b`; its length is
/// always `a.len() + b.len()`.
pub fn merge<'a>(
    a: &'a [BedRecord],
    b: &'a [BedRecord],
) -> impl Iterator<Item = &'a BedRecord> + 'a {
    TwoWayMerge::new(
        a.iter().map(Ok::<_, Infallible>),
        b.iter().map(Ok::<_, Infallible>),
    )
    .map(|result| match result {
        Ok(rec) => rec,
        Err(never) => match never {},
    })
}
