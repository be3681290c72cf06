use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AsmError, Result};
use crate::io::fasta::{dataset_label, discard_partial_outputs, read_fasta, FastaWriter};
use crate::metrics::Composition;

/// Thresholds for keeping a sequence. A zero `min_gc` or `max_gap` disables that check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    pub min_len: u64,
    pub min_gc: f64,
    pub max_gap: f64,
}

impl FilterParams {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("minimum GC percent", self.min_gc), ("maximum gap percent", self.max_gap)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(AsmError::InvalidInput(format!(
                    "{} must be between 0 and 100, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Empty sequences never pass: their GC percent is undefined.
    pub fn passes(&self, comp: &Composition) -> bool {
        if comp.length == 0 || comp.length < self.min_len {
            return false;
        }
        if self.min_gc > 0.0 && comp.gc_percent().map_or(true, |gc| gc < self.min_gc) {
            return false;
        }
        if self.max_gap > 0.0 && comp.gap_percent().map_or(true, |gap| gap > self.max_gap) {
            return false;
        }
        true
    }
}

#[derive(Debug)]
pub struct FilterOutcome {
    pub kept: usize,
    pub rejected: usize,
    pub rejected_path: PathBuf,
}

/// `out/kept.fa.gz` -> `out/kept_rejected.fa.gz`
pub fn rejected_path<P: AsRef<Path>>(output: P) -> Result<PathBuf> {
    let output = output.as_ref();
    let stem = dataset_label(output)?;
    let name = output
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let suffix = &name[stem.len()..];
    Ok(output.with_file_name(format!("{}_rejected{}", stem, suffix)))
}

/// Split `input` into `output` and its `_rejected` sibling. On error both
/// partial outputs are removed.
pub fn filter_fasta<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    params: &FilterParams,
) -> Result<FilterOutcome> {
    params.validate()?;
    let output = output.as_ref();
    let rejected_path = rejected_path(output)?;

    let result = write_split(input.as_ref(), output, &rejected_path, params);
    match result {
        Ok((kept, rejected)) => {
            info!(
                "Kept {} sequences in {}, {} rejected to {}",
                kept,
                output.display(),
                rejected,
                rejected_path.display()
            );
            Ok(FilterOutcome { kept, rejected, rejected_path })
        }
        Err(e) => {
            discard_partial_outputs(&[output, rejected_path.as_path()]);
            Err(e)
        }
    }
}

fn write_split(
    input: &Path,
    output: &Path,
    rejected_path: &Path,
    params: &FilterParams,
) -> Result<(usize, usize)> {
    let mut kept = FastaWriter::create(output)?;
    let mut rejected = FastaWriter::create(rejected_path)?;

    for record in read_fasta(input)? {
        let record = record?;
        let comp = Composition::count(record.seq());
        if params.passes(&comp) {
            kept.write_record(record.id(), record.desc(), record.seq())?;
        } else {
            debug!("Rejecting {} ({} bp)", record.id(), comp.length);
            rejected.write_record(record.id(), record.desc(), record.seq())?;
        }
    }

    Ok((kept.finish()?, rejected.finish()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_path() {
        assert_eq!(rejected_path("out/kept.fasta").unwrap(), PathBuf::from("out/kept_rejected.fasta"));
        assert_eq!(rejected_path("kept.fa.gz").unwrap(), PathBuf::from("kept_rejected.fa.gz"));
        assert!(rejected_path("kept.txt").is_err());
    }

    #[test]
    fn test_length_only() {
        let params = FilterParams { min_len: 5, min_gc: 0.0, max_gap: 0.0 };
        assert!(params.passes(&Composition::count(b"AAAAA")));
        assert!(!params.passes(&Composition::count(b"AAAA")));
        assert!(!params.passes(&Composition::count(b"")));
    }

    #[test]
    fn test_gc_and_gap_thresholds() {
        let params = FilterParams { min_len: 1, min_gc: 50.0, max_gap: 25.0 };
        assert!(params.passes(&Composition::count(b"GCGCAT-A")));
        // 25% GC
        assert!(!params.passes(&Composition::count(b"GCAT--AT")));
        // 50% GC but 50% gaps
        assert!(!params.passes(&Composition::count(b"GC--")));
    }

    #[test]
    fn test_validate_ranges() {
        let params = FilterParams { min_len: 1, min_gc: 120.0, max_gap: 0.0 };
        assert!(matches!(params.validate(), Err(AsmError::InvalidInput(_))));
    }
}
