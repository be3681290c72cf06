use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use asmstat::cli::filter::{filter_fasta, FilterParams};
use asmstat::cli::identity::alignment_identity;
use asmstat::cli::rename::rename_fasta;
use asmstat::cli::subset::subset_fasta;
use asmstat::io::fasta::read_fasta;
use asmstat::metrics::NxLength;
use asmstat::stats::calculate_stats;
use asmstat::AsmError;
use tempfile::tempdir;

fn write_fasta(path: &Path, records: &[(&str, &str)]) {
    let mut text = String::new();
    for (id, seq) in records {
        text.push_str(&format!(">{}\n{}\n", id, seq));
    }
    fs::write(path, text).unwrap();
}

/// One good record, then a header that is not valid UTF-8.
fn write_corrupt_fasta(path: &Path) {
    let mut bytes = b">good\nACGTACGT\n>".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe]);
    bytes.extend_from_slice(b"\nGGCC\n");
    fs::write(path, bytes).unwrap();
}

fn ids(path: &Path) -> Vec<String> {
    read_fasta(path)
        .unwrap()
        .map(|r| r.unwrap().id().to_string())
        .collect()
}

#[test]
fn test_stats_worked_example_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("genome.fasta");
    let lengths = [2, 2, 2, 3, 3, 4, 8, 8];
    let records: Vec<(String, String)> = lengths
        .iter()
        .enumerate()
        .map(|(i, &l)| (format!("c{}", i), "GC".repeat(l).chars().take(l).collect()))
        .collect();
    let borrowed: Vec<(&str, &str)> = records.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
    write_fasta(&path, &borrowed);

    let record = calculate_stats(&path, "genome", &[]).unwrap();
    assert_eq!(record.total_contigs, 8);
    assert_eq!(record.genome_length, 32);
    assert_eq!(record.largest_contig, 8);
    assert_eq!(record.n50, NxLength::Midpoint(4, 8));
    assert_eq!(record.gc_percent, Some(100.0));
}

#[test]
fn test_stats_all_empty_sequences() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.fa");
    write_fasta(&path, &[("a", ""), ("b", "")]);

    assert!(matches!(
        calculate_stats(&path, "empty", &[]),
        Err(AsmError::InvalidInput(_))
    ));
}

#[test]
fn test_filter_splits_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fasta");
    let output = dir.path().join("kept.fasta");
    write_fasta(
        &input,
        &[
            ("long_gc", "GGGGCCCCAT"),
            ("short", "GC"),
            ("long_at", "AAAAATTTTT"),
        ],
    );

    let params = FilterParams { min_len: 5, min_gc: 40.0, max_gap: 0.0 };
    let outcome = filter_fasta(&input, &output, &params).unwrap();

    assert_eq!(outcome.kept, 1);
    assert_eq!(outcome.rejected, 2);
    assert_eq!(outcome.rejected_path, dir.path().join("kept_rejected.fasta"));
    assert_eq!(ids(&output), vec!["long_gc"]);
    assert_eq!(ids(&outcome.rejected_path), vec!["short", "long_at"]);
}

#[test]
fn test_filter_removes_partial_outputs_on_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fasta");
    let output = dir.path().join("kept.fa.gz");
    write_corrupt_fasta(&input);

    let params = FilterParams { min_len: 1, min_gc: 0.0, max_gap: 0.0 };
    assert!(matches!(
        filter_fasta(&input, &output, &params),
        Err(AsmError::Parse(_))
    ));
    assert!(!output.exists());
    assert!(!dir.path().join("kept_rejected.fa.gz").exists());
}

#[test]
fn test_filter_bad_params_leave_existing_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fasta");
    let output = dir.path().join("kept.fasta");
    write_fasta(&input, &[("a", "ACGT")]);
    fs::write(&output, ">previous\nAC\n").unwrap();

    let params = FilterParams { min_len: 1, min_gc: 150.0, max_gap: 0.0 };
    assert!(matches!(
        filter_fasta(&input, &output, &params),
        Err(AsmError::InvalidInput(_))
    ));
    assert_eq!(ids(&output), vec!["previous"]);
}

#[test]
fn test_subset_removes_partial_output_on_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fa");
    let output = dir.path().join("subset.fa");
    write_corrupt_fasta(&input);

    let wanted: HashSet<String> = ["good".to_string()].into_iter().collect();
    assert!(matches!(
        subset_fasta(&input, &output, &wanted),
        Err(AsmError::Parse(_))
    ));
    assert!(!output.exists());
}

#[test]
fn test_subset_reports_missing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fa");
    let output = dir.path().join("subset.fa");
    write_fasta(&input, &[("a", "ACGT"), ("b", "GGCC"), ("c", "TTAA")]);

    let wanted: HashSet<String> = ["c", "a", "zz"].iter().map(|s| s.to_string()).collect();
    let outcome = subset_fasta(&input, &output, &wanted).unwrap();

    assert_eq!(outcome.written, 2);
    assert_eq!(outcome.missing, vec!["zz".to_string()]);
    assert_eq!(ids(&output), vec!["a", "c"]);
}

#[test]
fn test_rename() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fa");
    let output = dir.path().join("renamed.fa");
    write_fasta(&input, &[("11189", "ACGT"), ("42", "GG")]);

    let table: HashMap<String, String> = [
        ("11189", "11189_Microbacteriaceae_Curtobacterium"),
        ("42", "answer"),
    ]
    .iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect();

    assert_eq!(rename_fasta(&input, &output, &table).unwrap(), 2);
    assert_eq!(
        ids(&output),
        vec!["11189_Microbacteriaceae_Curtobacterium", "answer"]
    );
}

#[test]
fn test_rename_missing_id() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fa");
    let output = dir.path().join("renamed.fa");
    write_fasta(&input, &[("known", "ACGT"), ("unknown", "GG")]);

    let mut table = HashMap::new();
    table.insert("known".to_string(), "renamed".to_string());

    assert!(matches!(
        rename_fasta(&input, &output, &table),
        Err(AsmError::ResourceNotFound(_))
    ));
    assert!(!output.exists());
}

#[test]
fn test_alignment_identity_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("aln.fasta");
    write_fasta(&path, &[("s1", "ACGTAC"), ("s2", "ACGTTC"), ("s3", "ACGTAC")]);

    let pid = alignment_identity(&path).unwrap();
    assert!((pid - 500.0 / 6.0).abs() < 1e-9);
}
