use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::io::fasta::{discard_partial_outputs, read_fasta, FastaWriter};

#[derive(Debug, Default)]
pub struct SubsetOutcome {
    pub written: usize,
    pub missing: Vec<String>,
}

/// Copy the records whose id is in `wanted` from `input` to `output`.
/// On error the partial output is removed.
pub fn subset_fasta<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    wanted: &HashSet<String>,
) -> Result<SubsetOutcome> {
    let output = output.as_ref();
    let result = write_subset(input.as_ref(), output, wanted);
    if result.is_err() {
        discard_partial_outputs(&[output]);
    }
    result
}

fn write_subset(input: &Path, output: &Path, wanted: &HashSet<String>) -> Result<SubsetOutcome> {
    let mut writer = FastaWriter::create(output)?;
    let mut seen = HashSet::new();

    for record in read_fasta(input)? {
        let record = record?;
        if wanted.contains(record.id()) {
            writer.write_record(record.id(), record.desc(), record.seq())?;
            seen.insert(record.id().to_string());
        }
    }

    let mut missing: Vec<String> = wanted.difference(&seen).cloned().collect();
    missing.sort();
    if !missing.is_empty() {
        warn!("{} requested ids not present in input, e.g. {}", missing.len(), missing[0]);
    }

    let written = writer.finish()?;
    info!("Wrote {} of {} requested sequences", written, wanted.len());
    Ok(SubsetOutcome { written, missing })
}
