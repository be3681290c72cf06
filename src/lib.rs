//! Length and composition metrics for sequence assemblies.
//!
//! The engine lives in [`metrics`]: per-sequence [`metrics::Composition`],
//! a [`metrics::SummaryAccumulator`] folded over a single pass, and the
//! N-x calculator over the resulting [`metrics::LengthMultiset`].

pub mod cli;
pub mod error;
pub mod io;
pub mod metrics;
pub mod stats;

pub use error::{AsmError, Result};
