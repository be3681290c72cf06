pub mod export;
pub mod fasta;
pub mod lookup;
