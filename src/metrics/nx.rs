//! N-x length statistics over a multiset of sequence lengths.
//!
//! N50 is the median of the multiset obtained by repeating every length
//! `l` exactly `l` times. Building that expansion costs memory proportional
//! to the total base count, so every function here walks cumulative sums
//! over the sorted lengths instead and only ever indexes the expansion
//! virtually.

use crate::error::{AsmError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// Result of an N-x query.
///
/// When the quantile falls exactly between two expanded elements the
/// statistic is their mean, which may be a half-integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NxLength {
    Single(u64),
    Midpoint(u64, u64),
}

impl NxLength {
    pub fn value(&self) -> f64 {
        match *self {
            NxLength::Single(len) => len as f64,
            NxLength::Midpoint(lo, hi) => (lo as f64 + hi as f64) / 2.0,
        }
    }

    pub fn is_whole(&self) -> bool {
        match *self {
            NxLength::Single(_) => true,
            NxLength::Midpoint(lo, hi) => (lo + hi) % 2 == 0,
        }
    }
}

impl fmt::Display for NxLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NxLength::Single(len) => write!(f, "{}", len),
            NxLength::Midpoint(lo, hi) => {
                let sum = lo + hi;
                if sum % 2 == 0 {
                    write!(f, "{}", sum / 2)
                } else {
                    write!(f, "{}.5", sum / 2)
                }
            }
        }
    }
}

impl Serialize for NxLength {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match *self {
            NxLength::Single(len) => serializer.serialize_u64(len),
            NxLength::Midpoint(lo, hi) if self.is_whole() => serializer.serialize_u64((lo + hi) / 2),
            NxLength::Midpoint(..) => serializer.serialize_f64(self.value()),
        }
    }
}

/// Sequence lengths sorted ascending, one entry per sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LengthMultiset {
    lengths: Vec<u64>,
    total: u64,
}

impl LengthMultiset {
    pub fn from_lengths(mut lengths: Vec<u64>) -> Self {
        lengths.sort_unstable();
        let total = lengths.iter().sum();
        LengthMultiset { lengths, total }
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn largest(&self) -> Option<u64> {
        self.lengths.last().copied()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.lengths
    }

    pub fn n50(&self) -> Result<NxLength> {
        nx_sorted(&self.lengths, 50)
    }

    pub fn nx(&self, percent: u32) -> Result<NxLength> {
        nx_sorted(&self.lengths, percent)
    }

    pub fn lx(&self, percent: u32) -> Result<usize> {
        lx_sorted(&self.lengths, percent)
    }
}

/// N50 of an arbitrary-order length list.
pub fn n50(lengths: &[u64]) -> Result<NxLength> {
    nx(lengths, 50)
}

/// N-x of an arbitrary-order length list; `percent` in 1..=100.
pub fn nx(lengths: &[u64], percent: u32) -> Result<NxLength> {
    let mut sorted = lengths.to_vec();
    sorted.sort_unstable();
    nx_sorted(&sorted, percent)
}

/// N-x over lengths already sorted ascending. Unsorted input is
/// `InvalidInput`; use [`nx`] for arbitrary order.
///
/// With `T` the total and `r = T * percent / 100`: if `r` is a whole
/// number strictly inside `(0, T)` the result is the mean of expanded
/// elements `r - 1` and `r`, otherwise it is element `min(floor(r), T - 1)`.
/// At 50 this is exactly the median of the expansion.
pub fn nx_sorted(sorted: &[u64], percent: u32) -> Result<NxLength> {
    check_percent(percent)?;
    check_lengths(sorted)?;

    let total: u128 = sorted.iter().map(|&len| len as u128).sum();
    let scaled = total * percent as u128;
    let rank = scaled / 100;

    if scaled % 100 == 0 && rank > 0 && rank < total {
        let (lower, upper) = expanded_pair(sorted, rank - 1);
        if lower == upper {
            Ok(NxLength::Single(lower))
        } else {
            Ok(NxLength::Midpoint(lower, upper))
        }
    } else {
        Ok(NxLength::Single(expanded_at(sorted, rank.min(total - 1))))
    }
}

/// Number of sequences, largest first, needed to cover `percent` of the total.
pub fn lx_sorted(sorted: &[u64], percent: u32) -> Result<usize> {
    check_percent(percent)?;
    check_lengths(sorted)?;

    let total: u128 = sorted.iter().map(|&len| len as u128).sum();
    let target = total * percent as u128;
    let mut running: u128 = 0;
    for (i, &len) in sorted.iter().rev().enumerate() {
        running += len as u128;
        if running * 100 >= target {
            return Ok(i + 1);
        }
    }
    Ok(sorted.len())
}

fn check_percent(percent: u32) -> Result<()> {
    if percent == 0 || percent > 100 {
        return Err(AsmError::InvalidInput(format!(
            "N-x percent must be in 1..=100, got {}",
            percent
        )));
    }
    Ok(())
}

fn check_lengths(sorted: &[u64]) -> Result<()> {
    if sorted.is_empty() {
        return Err(AsmError::InvalidInput("length list is empty".into()));
    }
    if sorted.contains(&0) {
        return Err(AsmError::InvalidInput(
            "length list contains a zero-length sequence".into(),
        ));
    }
    if sorted.windows(2).any(|pair| pair[0] > pair[1]) {
        return Err(AsmError::InvalidInput(
            "length list is not sorted ascending".into(),
        ));
    }
    Ok(())
}

/// Element `index` of the ascending expansion.
fn expanded_at(sorted: &[u64], index: u128) -> u64 {
    let mut running: u128 = 0;
    for &len in sorted {
        running += len as u128;
        if running > index {
            return len;
        }
    }
    sorted.last().copied().unwrap_or(0)
}

/// Elements `index` and `index + 1` of the ascending expansion in one walk.
fn expanded_pair(sorted: &[u64], index: u128) -> (u64, u64) {
    let mut running: u128 = 0;
    let mut iter = sorted.iter();
    while let Some(&len) = iter.next() {
        running += len as u128;
        if running > index {
            // index + 1 is still inside this run unless index was its last slot
            if running > index + 1 {
                return (len, len);
            }
            let next = iter.next().copied().unwrap_or(len);
            return (len, next);
        }
    }
    let last = sorted.last().copied().unwrap_or(0);
    (last, last)
}
