use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::{AsmError, Result};
use crate::io::fasta::{discard_partial_outputs, read_fasta, FastaWriter};

/// Rewrite record ids through `table`. Descriptions are dropped.
///
/// Every input id must be in the table; on the first miss the partial
/// output is removed and `ResourceNotFound` is returned.
pub fn rename_fasta<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    table: &HashMap<String, String>,
) -> Result<usize> {
    let output = output.as_ref();
    let result = write_renamed(input.as_ref(), output, table);
    if result.is_err() {
        discard_partial_outputs(&[output]);
    }
    result
}

fn write_renamed(input: &Path, output: &Path, table: &HashMap<String, String>) -> Result<usize> {
    let mut writer = FastaWriter::create(output)?;
    for record in read_fasta(input)? {
        let record = record?;
        let new_id = table.get(record.id()).ok_or_else(|| {
            AsmError::ResourceNotFound(format!(
                "sequence id '{}' has no entry in the rename table",
                record.id()
            ))
        })?;
        writer.write_record(new_id, None, record.seq())?;
    }
    let renamed = writer.finish()?;
    info!("Renamed {} sequences into {}", renamed, output.display());
    Ok(renamed)
}
