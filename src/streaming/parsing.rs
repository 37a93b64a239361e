//! Zero-allocation BED field parsing.
//!
//! These functions split and decode the leading BED4 columns straight from
//! the line bytes without building an intermediate `Vec` of fields.

use memchr::{memchr, memchr_iter};

/// Raw byte slices for the four leading BED columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bed4Fields<'a> {
    pub chrom: &'a [u8],
    pub start: &'a [u8],
    pub end: &'a [u8],
    pub name: &'a [u8],
}

/// Fast u64 parsing - no allocation, no error formatting.
///
/// Returns None if the input is empty, contains non-digit characters
/// (including a sign) or does not fit in a u64.
#[inline(always)]
pub fn parse_u64_fast(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as u64)?;
    }
    Some(n)
}

/// Split the first four tab-separated fields using memchr.
///
/// Anything after the fourth field is ignored. Returns None if the line has
/// fewer than four fields.
#[inline(always)]
pub fn split_bed4(line: &[u8]) -> Option<Bed4Fields<'_>> {
    let tab1 = memchr(b'\t', line)?;
    let chrom = &line[..tab1];

    let rest1 = &line[tab1 + 1..];
    let tab2 = memchr(b'\t', rest1)?;
    let start = &rest1[..tab2];

    let rest2 = &rest1[tab2 + 1..];
    let tab3 = memchr(b'\t', rest2)?;
    let end = &rest2[..tab3];

    let rest3 = &rest2[tab3 + 1..];
    let name_len = memchr(b'\t', rest3).unwrap_or(rest3.len());
    let name = &rest3[..name_len];

    Some(Bed4Fields {
        chrom,
        start,
        end,
        name,
    })
}

/// Count tab-separated fields in a line.
#[inline]
pub fn count_fields(line: &[u8]) -> usize {
    memchr_iter(b'\t', line).count() + 1
}

/// Strip a trailing `\n` or `\r\n`.
#[inline(always)]
pub fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Check if a line should be skipped (empty, comment, or header).
///
/// `track` and `browser` only count as headers when followed by a space or
/// the end of the line, so records on chromosomes such as `track_1` are kept.
#[inline(always)]
pub fn should_skip_line(line: &[u8]) -> bool {
    line.is_empty() || line[0] == b'#' || is_header(line, b"track") || is_header(line, b"browser")
}

#[inline(always)]
fn is_header(line: &[u8], keyword: &[u8]) -> bool {
    match line.strip_prefix(keyword) {
        Some(rest) => rest.is_empty() || rest[0] == b' ',
        None => false,
    }
}
