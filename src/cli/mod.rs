//! FASTA and GenBank housekeeping tools that ride along with the metrics commands.

pub mod filter;
pub mod genbank;
pub mod identity;
pub mod rename;
pub mod subset;
