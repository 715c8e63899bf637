//! The consensus engine (C7): pairwise component comparison across a
//! season's runs, agreement-graph derivation, and golden selection.
//!
//! The enforcement that at least two runs are required before a consensus
//! build is attempted lives in `goldmatch-quality`, which is the caller
//! that knows how many runs are on disk; this crate is a pure function of
//! whatever runs it is handed.

mod build;
mod comparator;
mod golden;

pub use build::build_season_consensus;
pub use comparator::compare_component;
pub use golden::{materialize_golden, select_golden};
