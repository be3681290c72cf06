use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "asmstat", version, about = "Length and composition metrics for sequence assemblies", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assembly summary (contigs, length, largest, N50, GC%) per FASTA file
    Stats {
        /// Input FASTA(.gz) files, one report line each
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<String>,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Tsv)]
        format: ReportFormat,

        /// Sequence_ID label; defaults to the file name without extension
        #[arg(long)]
        label: Option<String>,

        /// Omit the TSV header line
        #[arg(long)]
        no_header: bool,

        /// Extra N-x statistics to report in JSON output (e.g. --nx 90)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        nx: Vec<u32>,
    },

    /// Per-sequence base composition table
    Composition {
        /// Input FASTA(.gz) file
        #[arg(short, long)]
        input: String,

        /// Write the table here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Drop short, AT-rich or gappy sequences; rejects go to <output>_rejected
    Filter {
        /// Input FASTA(.gz) file
        #[arg(short, long)]
        input: String,

        /// Output FASTA(.gz) file for kept sequences
        #[arg(short, long)]
        output: String,

        /// Minimum sequence length to keep
        #[arg(short = 'l', long)]
        min_len: u64,

        /// Minimum GC percent to keep (0 disables)
        #[arg(short = 'g', long, default_value_t = 0.0)]
        min_gc: f64,

        /// Maximum gap percent to keep (0 disables)
        #[arg(short = 'G', long, default_value_t = 0.0)]
        max_gap: f64,
    },

    /// Extract the sequences listed in an id file
    Subset {
        /// Input FASTA(.gz) file
        #[arg(short, long)]
        input: String,

        /// Output FASTA(.gz) file
        #[arg(short, long)]
        output: String,

        /// File with one sequence id per line
        #[arg(short, long)]
        mapping: String,
    },

    /// Rename sequence ids from a tab-separated old/new table
    Rename {
        /// Input FASTA(.gz) file
        #[arg(short, long)]
        input: String,

        /// Output FASTA(.gz) file
        #[arg(short, long)]
        output: String,

        /// Tab-separated table: old id, new id
        #[arg(short, long)]
        mapping: String,
    },

    /// Tab-separated organism, reference title, isolation source, host and sequence per GenBank record
    Genbank {
        /// GenBank flat file
        #[arg(short, long)]
        input: String,

        /// Write the table here instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Omit the header line
        #[arg(long)]
        no_header: bool,
    },

    /// Percent of identical columns in an aligned FASTA file
    Identity {
        /// Aligned FASTA(.gz) file
        #[arg(short, long)]
        input: String,
    },
}
