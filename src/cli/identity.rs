use std::path::Path;

use tracing::debug;

use crate::error::{AsmError, Result};
use crate::io::fasta::read_fasta;

/// Percent of alignment columns where every row has the same symbol.
///
/// Rows are compared byte for byte, so case and gap characters count.
/// Only the first row and a per-column flag are kept in memory.
pub fn percent_identity<I, S>(rows: I) -> Result<f64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut rows = rows.into_iter();
    let first = rows
        .next()
        .ok_or_else(|| AsmError::InvalidInput("alignment has no sequences".into()))?;
    let reference = first.as_ref().to_vec();
    let mut conserved = vec![true; reference.len()];

    for (i, row) in rows.enumerate() {
        let row = row.as_ref();
        if row.len() != reference.len() {
            return Err(AsmError::InvalidInput(format!(
                "alignment row {} has {} columns, expected {}",
                i + 2,
                row.len(),
                reference.len()
            )));
        }
        for ((flag, &a), &b) in conserved.iter_mut().zip(&reference).zip(row) {
            *flag &= a == b;
        }
    }

    if reference.is_empty() {
        return Err(AsmError::UndefinedStatistic(
            "percent identity of a zero-width alignment".into(),
        ));
    }

    let identical = conserved.iter().filter(|&&c| c).count();
    Ok(identical as f64 / reference.len() as f64 * 100.0)
}

/// Percent identity of an aligned FASTA file.
pub fn alignment_identity<P: AsRef<Path>>(path: P) -> Result<f64> {
    let mut failure = None;
    let rows = read_fasta(&path)?.map_while(|record| match record {
        Ok(record) => {
            debug!("Alignment row {}", record.id());
            Some(record.seq().to_vec())
        }
        Err(e) => {
            failure = Some(e);
            None
        }
    });
    let identity = percent_identity(rows);

    match failure {
        Some(e) => Err(e),
        None => identity,
    }
}
