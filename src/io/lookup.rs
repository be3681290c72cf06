use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{AsmError, Result};

/// Read a list of wanted identifiers, one per line. Blank lines are skipped.
pub fn read_id_list<P: AsRef<Path>>(path: P) -> Result<HashSet<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut wanted = HashSet::new();
    for line in reader.lines() {
        let line = line?;
        let id = line.trim();
        if !id.is_empty() {
            wanted.insert(id.to_string());
        }
    }
    Ok(wanted)
}

/// Read a two-column `old<TAB>new` rename table.
pub fn read_rename_table<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut table = HashMap::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        match line.split_once('\t') {
            Some((old, new)) if !old.is_empty() && !new.trim().is_empty() => {
                table.insert(old.to_string(), new.trim().to_string());
            }
            _ => {
                return Err(AsmError::Parse(format!(
                    "rename table line {}: expected 'old<TAB>new', got '{}'",
                    lineno + 1,
                    line
                )))
            }
        }
    }
    Ok(table)
}
