// src/io/fasta.rs
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use bio::io::fasta;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::{debug, warn};

use crate::error::{AsmError, Result};

/// Extensions accepted as FASTA input, compared case-insensitively.
pub const FASTA_EXTENSIONS: [&str; 5] = ["fa", "fasta", "fna", "fas", "faa"];

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Open a FASTA file for reading, handles gzipped files automatically
pub fn open_fasta<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if is_gzipped(path) {
        debug!("Reading {} through gzip decoder", path.display());
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Streaming record iterator; holds one record in memory at a time.
pub struct FastaRecords {
    inner: fasta::Records<Box<dyn BufRead>>,
}

impl FastaRecords {
    pub fn from_reader(reader: Box<dyn BufRead>) -> Self {
        FastaRecords {
            inner: fasta::Reader::from_bufread(reader).records(),
        }
    }
}

impl Iterator for FastaRecords {
    type Item = Result<fasta::Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|rec| rec.map_err(parse_error))
    }
}

fn parse_error(e: io::Error) -> AsmError {
    match e.kind() {
        // bio reports structural problems (missing '>') as Other
        io::ErrorKind::InvalidData | io::ErrorKind::Other => AsmError::Parse(e.to_string()),
        _ => AsmError::Io(e),
    }
}

pub fn read_fasta<P: AsRef<Path>>(path: P) -> Result<FastaRecords> {
    Ok(FastaRecords::from_reader(open_fasta(path)?))
}

/// FASTA output, gzip-compressed when the path ends in `.gz`.
pub struct FastaWriter {
    sink: FastaSink,
    written: usize,
}

enum FastaSink {
    Plain(BufWriter<File>),
    Compressed(BufWriter<GzEncoder<File>>),
}

/// Format one record through bio's writer straight into `sink`. The
/// zero-capacity writer keeps no buffer of its own, so dropping it loses nothing.
fn write_to<W: Write>(sink: &mut W, id: &str, desc: Option<&str>, seq: &[u8]) -> io::Result<()> {
    fasta::Writer::with_capacity(0, sink).write(id, desc, seq)
}

impl FastaWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let sink = if is_gzipped(path) {
            let encoder = GzEncoder::new(file, Compression::default());
            FastaSink::Compressed(BufWriter::new(encoder))
        } else {
            FastaSink::Plain(BufWriter::new(file))
        };
        Ok(FastaWriter { sink, written: 0 })
    }

    pub fn write_record(&mut self, id: &str, desc: Option<&str>, seq: &[u8]) -> Result<()> {
        match &mut self.sink {
            FastaSink::Plain(writer) => write_to(writer, id, desc, seq)?,
            FastaSink::Compressed(writer) => write_to(writer, id, desc, seq)?,
        }
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush everything and, for gzip output, write the trailer. Errors from
    /// either step are returned rather than lost in a drop.
    pub fn finish(self) -> Result<usize> {
        match self.sink {
            FastaSink::Plain(mut writer) => writer.flush()?,
            FastaSink::Compressed(writer) => {
                let encoder = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
                encoder.finish()?;
            }
        }
        Ok(self.written)
    }
}

/// Remove outputs left behind by a failed run. Paths that were never
/// created are ignored.
pub fn discard_partial_outputs(paths: &[&Path]) {
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => debug!("Removed partial output {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove partial output {}: {}", path.display(), e),
        }
    }
}

/// Reject paths whose name does not carry a FASTA extension.
pub fn ensure_fasta_path<P: AsRef<Path>>(path: P) -> Result<()> {
    dataset_label(path).map(|_| ())
}

/// Dataset label for a FASTA path: the file name without its FASTA
/// extension, so `reads/sample1.fasta.gz` becomes `sample1`.
pub fn dataset_label<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AsmError::InvalidInput(format!("no file name in {}", path.display())))?;

    let name = strip_suffix_ignore_case(name, ".gz").unwrap_or(name);

    FASTA_EXTENSIONS
        .iter()
        .find_map(|ext| strip_suffix_ignore_case(name, &format!(".{}", ext)))
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            AsmError::InvalidInput(format!(
                "{} is not a recognized FASTA file (expected one of .{})",
                path.display(),
                FASTA_EXTENSIONS.join(", .")
            ))
        })
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    if name.len() < suffix.len() || !name.is_char_boundary(name.len() - suffix.len()) {
        return None;
    }
    let (head, tail) = name.split_at(name.len() - suffix.len());
    if tail.eq_ignore_ascii_case(suffix) {
        Some(head)
    } else {
        None
    }
}
