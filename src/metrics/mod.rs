//! Assembly metrics engine: per-sequence composition, set-wide totals and N-x.

pub mod composition;
pub mod nx;
pub mod summary;

pub use composition::Composition;
pub use nx::{lx_sorted, n50, nx, nx_sorted, LengthMultiset, NxLength};
pub use summary::{AssemblySummary, SummaryAccumulator};
