use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{AsmError, Result};
use crate::io::export::composition_row;
use crate::io::fasta::read_fasta;
use crate::metrics::{AssemblySummary, Composition, LengthMultiset, NxLength, SummaryAccumulator};

/// An extra N-x / L-x pair requested on top of N50.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NxEntry {
    pub percent: u32,
    pub length: NxLength,
    pub count: usize,
}

/// One aggregated report line for a sequence set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssemblyRecord {
    pub sequence_id: String,
    pub total_contigs: u64,
    pub genome_length: u64,
    pub largest_contig: u64,
    pub n50: NxLength,
    pub l50: usize,
    /// `None` when the set has no bases
    pub gc_percent: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nx: Vec<NxEntry>,
}

impl AssemblyRecord {
    /// Build the record once the accumulation pass is complete.
    pub fn from_summary(
        sequence_id: &str,
        summary: &AssemblySummary,
        lengths: &LengthMultiset,
        extra_nx: &[u32],
    ) -> Result<Self> {
        let n50 = lengths.n50()?;
        let l50 = lengths.lx(50)?;

        let nx = extra_nx
            .iter()
            .map(|&percent| {
                Ok(NxEntry {
                    percent,
                    length: lengths.nx(percent)?,
                    count: lengths.lx(percent)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(AssemblyRecord {
            sequence_id: sequence_id.to_string(),
            total_contigs: summary.sequence_count,
            genome_length: summary.total_length,
            largest_contig: summary.largest_length,
            n50,
            l50,
            gc_percent: summary.gc_percent().ok(),
            nx,
        })
    }
}

/// Run the composition pass over one FASTA file and fold it into a summary.
pub fn summarize_fasta<P: AsRef<Path>>(path: P) -> Result<(AssemblySummary, LengthMultiset)> {
    let mut acc = SummaryAccumulator::new();
    for record in read_fasta(&path)? {
        let record = record?;
        let comp = Composition::count(record.seq());
        debug!("{}: {} bp", record.id(), comp.length);
        acc.add(&comp);
    }
    Ok(acc.finish())
}

/// Aggregated statistics for one FASTA file.
pub fn calculate_stats<P: AsRef<Path>>(path: P, label: &str, extra_nx: &[u32]) -> Result<AssemblyRecord> {
    let path = path.as_ref();
    let (summary, lengths) = summarize_fasta(path)?;

    if summary.sequence_count == 0 {
        return Err(AsmError::InvalidInput(format!(
            "no sequences found in {}",
            path.display()
        )));
    }
    if lengths.is_empty() {
        return Err(AsmError::InvalidInput(format!(
            "all {} sequences in {} are empty",
            summary.sequence_count,
            path.display()
        )));
    }

    info!(
        "{}: {} sequences, {} bp total",
        label, summary.sequence_count, summary.total_length
    );
    AssemblyRecord::from_summary(label, &summary, &lengths, extra_nx)
}

/// Per-sequence composition rows, streamed to `out`. Returns the row count.
pub fn composition_table<P: AsRef<Path>, W: Write>(path: P, out: &mut W) -> Result<usize> {
    let mut rows = 0;
    for record in read_fasta(path)? {
        let record = record?;
        let comp = Composition::count(record.seq());
        writeln!(out, "{}", composition_row(record.id(), &comp))?;
        rows += 1;
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_calculate_stats() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">contig_1").unwrap();
        writeln!(file, "ATCGATCGATCGATCGATCG").unwrap(); // 20 bp
        writeln!(file, ">contig_2").unwrap();
        writeln!(file, "GCTAGCTAGCTAGCTAGCTAGCTA").unwrap(); // 24 bp
        writeln!(file, ">contig_3").unwrap();
        writeln!(file, "ATCG").unwrap(); // 4 bp

        let stats = calculate_stats(file.path(), "asm", &[]).unwrap();

        assert_eq!(stats.total_contigs, 3);
        assert_eq!(stats.genome_length, 48);
        assert_eq!(stats.largest_contig, 24);
        // expansion of 4, 20, 24 has 48 slots; E[23] = 20, E[24] = 24
        assert_eq!(stats.n50, NxLength::Midpoint(20, 24));
        assert_eq!(stats.n50.to_string(), "22");
        assert!((stats.gc_percent.unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_stats_no_sequences() {
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(
            calculate_stats(file.path(), "empty", &[]),
            Err(AsmError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_extra_nx_entries() {
        let mut file = NamedTempFile::new().unwrap();
        for (i, len) in [100, 200, 300, 400].iter().enumerate() {
            writeln!(file, ">c{}", i).unwrap();
            writeln!(file, "{}", "A".repeat(*len)).unwrap();
        }

        let stats = calculate_stats(file.path(), "asm", &[90]).unwrap();
        assert_eq!(stats.n50, NxLength::Single(300));
        assert_eq!(stats.l50, 2);
        assert_eq!(stats.nx.len(), 1);
        assert_eq!(stats.nx[0].length, NxLength::Single(400));
        assert_eq!(stats.gc_percent, Some(0.0));
    }

    #[test]
    fn test_composition_table() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">s1").unwrap();
        writeln!(file, "acgtnRY").unwrap();
        writeln!(file, ">s2").unwrap();
        writeln!(file).unwrap();

        let mut out = Vec::new();
        let rows = composition_table(file.path(), &mut out).unwrap();
        assert_eq!(rows, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "s1\t1\t1\t1\t1\t1\t2\t7\t28.57");
        assert_eq!(lines[1], "s2\t0\t0\t0\t0\t0\t0\t0\tNA");
    }
}
