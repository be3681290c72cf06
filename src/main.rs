mod cli_main;

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use asmstat::cli::{filter, genbank, identity, rename, subset};
use asmstat::io::export::{write_assembly_json, write_assembly_tsv, COMPOSITION_HEADER};
use asmstat::io::fasta::{dataset_label, ensure_fasta_path};
use asmstat::io::lookup::{read_id_list, read_rename_table};
use asmstat::stats::{calculate_stats, composition_table};
use asmstat::AsmError;
use cli_main::{Cli, Commands, ReportFormat};

fn main() {
    // ASMSTAT_LOG sets the default level; RUST_LOG takes precedence
    let log_level = std::env::var("ASMSTAT_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);

        let exit_code = match e.downcast_ref::<AsmError>() {
            Some(AsmError::InvalidInput(_)) => 2,
            Some(AsmError::Io(_)) => 3,
            Some(AsmError::Parse(_)) => 4,
            Some(AsmError::ResourceNotFound(_)) => 5,
            Some(AsmError::UndefinedStatistic(_)) => 6,
            None => 1,
        };
        std::process::exit(exit_code);
    }
}

fn open_output(path: Option<&str>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file = File::create(p).with_context(|| format!("Unable to create {}", p))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Stats { input, output, format, label, no_header, nx } => {
            if label.is_some() && input.len() > 1 {
                bail!(AsmError::InvalidInput(
                    "--label only applies to a single input file".into()
                ));
            }

            let mut records = Vec::with_capacity(input.len());
            for path in &input {
                info!("Calculating assembly statistics for: {}", path);
                let id = match &label {
                    Some(l) => l.clone(),
                    None => dataset_label(path)?,
                };
                let record = calculate_stats(path, &id, &nx)
                    .with_context(|| format!("Failed to summarize {}", path))?;
                records.push(record);
            }

            let mut out = open_output(output.as_deref())?;
            match format {
                ReportFormat::Tsv => write_assembly_tsv(&mut out, &records, !no_header)?,
                ReportFormat::Json => write_assembly_json(&mut out, &records)?,
            }
            out.flush()?;
        }

        Commands::Composition { input, output } => {
            ensure_fasta_path(&input)?;
            let mut out = open_output(output.as_deref())?;
            writeln!(out, "{}", COMPOSITION_HEADER)?;
            let rows = composition_table(&input, &mut out)
                .with_context(|| format!("Failed to count bases in {}", input))?;
            out.flush()?;
            info!("Wrote composition for {} sequences", rows);
        }

        Commands::Filter { input, output, min_len, min_gc, max_gap } => {
            let params = filter::FilterParams { min_len, min_gc, max_gap };
            let outcome = filter::filter_fasta(&input, &output, &params)?;
            println!(
                "The {} good sequences are in {}",
                outcome.kept, output
            );
            println!(
                "Please refer to {} for the {} sequences that were discarded",
                outcome.rejected_path.display(),
                outcome.rejected
            );
        }

        Commands::Subset { input, output, mapping } => {
            let wanted = read_id_list(&mapping)
                .with_context(|| format!("Failed to read id list {}", mapping))?;
            let outcome = subset::subset_fasta(&input, &output, &wanted)?;
            println!("Wrote {} sequences to {}", outcome.written, output);
            if !outcome.missing.is_empty() {
                eprintln!("{} requested ids were not found", outcome.missing.len());
            }
        }

        Commands::Rename { input, output, mapping } => {
            let table = read_rename_table(&mapping)
                .with_context(|| format!("Failed to read rename table {}", mapping))?;
            let renamed = rename::rename_fasta(&input, &output, &table)?;
            println!("Renamed {} sequences into {}", renamed, output);
        }

        Commands::Genbank { input, output, no_header } => {
            let mut out = open_output(output.as_deref())?;
            genbank::extract_genbank(&input, &mut out, !no_header)
                .with_context(|| format!("Failed to extract GenBank records from {}", input))?;
            out.flush()?;
        }

        Commands::Identity { input } => {
            let pid = identity::alignment_identity(&input)
                .with_context(|| format!("Failed to score alignment {}", input))?;
            println!("{:.4}", pid);
        }
    }

    Ok(())
}
