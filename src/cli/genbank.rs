use std::fs::File;
use std::io::Write;
use std::path::Path;

use gb_io::reader::SeqReader;
use gb_io::seq::{Feature, Seq};
use tracing::{debug, info};

use crate::error::{AsmError, Result};

pub const GENBANK_HEADER: &str =
    "Organism\tName\tTitle\tIsolation_Source\tHost\tSequence\tLength";

pub const NO_ISOLATION_SOURCE: &str = "no iso source in file";
pub const NO_HOST: &str = "no host in file";

/// One output line per GenBank record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenbankRow {
    /// Text of the SOURCE line
    pub organism: String,
    /// LOCUS name
    pub name: String,
    /// Title of the first reference, empty without references
    pub title: String,
    pub isolation_source: String,
    pub host: String,
    pub sequence: String,
    pub length: usize,
}

impl GenbankRow {
    pub fn from_seq(seq: &Seq) -> Self {
        let source_feature = seq
            .features
            .iter()
            .find(|f| f.kind.to_string().eq_ignore_ascii_case("source"));

        GenbankRow {
            organism: seq
                .source
                .as_ref()
                .map(|s| s.source.clone())
                .unwrap_or_default(),
            name: seq.name.clone().unwrap_or_default(),
            title: seq
                .references
                .first()
                .map(|r| r.title.clone())
                .unwrap_or_default(),
            isolation_source: first_qualifier(source_feature, "isolation_source")
                .unwrap_or_else(|| NO_ISOLATION_SOURCE.to_string()),
            host: first_qualifier(source_feature, "host")
                .unwrap_or_else(|| NO_HOST.to_string()),
            sequence: String::from_utf8_lossy(&seq.seq).into_owned(),
            length: seq.seq.len(),
        }
    }

    pub fn to_tsv(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.organism,
            self.name,
            self.title,
            self.isolation_source,
            self.host,
            self.sequence,
            self.length
        )
    }
}

fn first_qualifier(feature: Option<&Feature>, key: &str) -> Option<String> {
    feature?
        .qualifier_values(key.into())
        .next()
        .map(str::to_string)
}

/// Parse every record in a GenBank flat file. Syntax errors, and a file
/// with no records at all, are `AsmError::Parse`.
pub fn read_genbank<P: AsRef<Path>>(path: P) -> Result<Vec<GenbankRow>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let mut rows = Vec::new();
    for seq in SeqReader::new(file) {
        let seq = seq.map_err(|e| {
            AsmError::Parse(format!(
                "{} record {}: {}",
                path.display(),
                rows.len() + 1,
                e
            ))
        })?;
        debug!("Parsed GenBank record {:?}", seq.name);
        rows.push(GenbankRow::from_seq(&seq));
    }

    if rows.is_empty() {
        return Err(AsmError::Parse(format!(
            "no GenBank records found in {}",
            path.display()
        )));
    }
    Ok(rows)
}

/// Write the tab-separated extract for `path`; returns the number of rows.
pub fn extract_genbank<P: AsRef<Path>, W: Write>(
    path: P,
    writer: &mut W,
    header: bool,
) -> Result<usize> {
    let rows = read_genbank(&path)?;
    if header {
        writeln!(writer, "{}", GENBANK_HEADER)?;
    }
    for row in &rows {
        writeln!(writer, "{}", row.to_tsv())?;
    }
    info!(
        "Extracted {} GenBank records from {}",
        rows.len(),
        path.as_ref().display()
    );
    Ok(rows.len())
}
