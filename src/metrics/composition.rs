use crate::error::{AsmError, Result};
use serde::Serialize;

/// Per-sequence nucleotide tally.
///
/// `t` and `u` are kept apart while counting and only merged in
/// [`Composition::t_total`], so DNA and RNA input report the same column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Composition {
    pub a: u64,
    pub g: u64,
    pub c: u64,
    pub t: u64,
    pub u: u64,
    pub n: u64,
    pub gaps: u64,
    pub length: u64,
}

impl Composition {
    /// Count one sequence. Case-insensitive; an empty slice yields all zeros.
    pub fn count(seq: &[u8]) -> Self {
        let mut comp = Composition {
            length: seq.len() as u64,
            ..Default::default()
        };

        for &b in seq {
            match b.to_ascii_uppercase() {
                b'A' => comp.a += 1,
                b'G' => comp.g += 1,
                b'C' => comp.c += 1,
                b'T' => comp.t += 1,
                b'U' => comp.u += 1,
                b'N' => comp.n += 1,
                b'-' => comp.gaps += 1,
                _ => {}
            }
        }

        comp
    }

    pub fn t_total(&self) -> u64 {
        self.t + self.u
    }

    /// Ambiguity codes, gaps and anything else outside {A,G,T,U,C,N}.
    /// Residual of the length, never enumerated directly.
    pub fn other(&self) -> u64 {
        self.length - (self.a + self.g + self.t_total() + self.c + self.n)
    }

    pub fn gc_bases(&self) -> u64 {
        self.g + self.c
    }

    pub fn gc_percent(&self) -> Result<f64> {
        if self.length == 0 {
            return Err(AsmError::UndefinedStatistic(
                "GC percent of an empty sequence".into(),
            ));
        }
        Ok(self.gc_bases() as f64 / self.length as f64 * 100.0)
    }

    /// Percentage of `-` columns, used when screening aligned input.
    pub fn gap_percent(&self) -> Result<f64> {
        if self.length == 0 {
            return Err(AsmError::UndefinedStatistic(
                "gap percent of an empty sequence".into(),
            ));
        }
        Ok(self.gaps as f64 / self.length as f64 * 100.0)
    }
}
