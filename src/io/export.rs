use std::io::{self, Write};

use crate::metrics::Composition;
use crate::stats::AssemblyRecord;

pub const ASSEMBLY_HEADER: &str =
    "Sequence_ID\tTotal_Contigs\tGenome_length\tLargest_Contig\tN50\tGC_Percent";

pub const COMPOSITION_HEADER: &str =
    "Sequence_ID\tTotal_A\tTotal_G\tTotal_T\tTotal_C\tTotal_N\tWeird_chars\tTotal_bp\tGC_Percent";

/// Marker written in place of a percentage that has no defined value.
pub const UNDEFINED: &str = "NA";

fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => UNDEFINED.to_string(),
    }
}

pub fn assembly_row(record: &AssemblyRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        record.sequence_id,
        record.total_contigs,
        record.genome_length,
        record.largest_contig,
        record.n50,
        format_percent(record.gc_percent)
    )
}

pub fn composition_row(id: &str, comp: &Composition) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        id,
        comp.a,
        comp.g,
        comp.t_total(),
        comp.c,
        comp.n,
        comp.other(),
        comp.length,
        format_percent(comp.gc_percent().ok())
    )
}

/// Write aggregated records as TSV
pub fn write_assembly_tsv<W: Write>(
    writer: &mut W,
    records: &[AssemblyRecord],
    header: bool,
) -> io::Result<()> {
    if header {
        writeln!(writer, "{}", ASSEMBLY_HEADER)?;
    }
    for record in records {
        writeln!(writer, "{}", assembly_row(record))?;
    }
    Ok(())
}

/// Write aggregated records as a pretty-printed JSON array
pub fn write_assembly_json<W: Write>(writer: &mut W, records: &[AssemblyRecord]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, records)?;
    writeln!(writer)?;
    Ok(())
}
