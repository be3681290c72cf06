use crate::error::{AsmError, Result};
use crate::metrics::composition::Composition;
use crate::metrics::nx::LengthMultiset;
use serde::Serialize;

/// Totals over a whole sequence set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssemblySummary {
    pub sequence_count: u64,
    pub total_length: u64,
    pub largest_length: u64,
    pub total_gc_bases: u64,
}

impl AssemblySummary {
    pub fn gc_percent(&self) -> Result<f64> {
        if self.total_length == 0 {
            return Err(AsmError::UndefinedStatistic(
                "GC percent of a zero-length sequence set".into(),
            ));
        }
        Ok(self.total_gc_bases as f64 / self.total_length as f64 * 100.0)
    }
}

/// Running totals for one pass over a sequence set.
///
/// Owned by the pass that feeds it; `finish` consumes it so nothing can be
/// added once the summary has been read.
#[derive(Debug, Default)]
pub struct SummaryAccumulator {
    summary: AssemblySummary,
    lengths: Vec<u64>,
}

impl SummaryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, comp: &Composition) {
        self.summary.sequence_count += 1;
        self.summary.total_length += comp.length;
        self.summary.total_gc_bases += comp.gc_bases();
        self.summary.largest_length = self.summary.largest_length.max(comp.length);

        // empty sequences carry no weight in the N-x expansion
        if comp.length > 0 {
            self.lengths.push(comp.length);
        }
    }

    pub fn sequence_count(&self) -> u64 {
        self.summary.sequence_count
    }

    pub fn finish(self) -> (AssemblySummary, LengthMultiset) {
        (self.summary, LengthMultiset::from_lengths(self.lengths))
    }
}
