//! Filesystem persistence (C6): the `runs/`, `analysis/`, and `golden/`
//! layout under one season directory, plus the season-level event-list
//! cache, with monotonic numbering and crash-safe writes.
//!
//! Every payload is serialized with `bincode`: it's a compact binary
//! format with no schema evolution story, which is fine here because every
//! writer and reader is this crate itself, on the same `schema` types.

mod analysis_store;
mod atomic;
mod error;
mod events_store;
mod golden_store;
mod layout;
mod run_store;

pub use analysis_store::{load_latest_consensus, save_consensus};
pub use error::StorageError;
pub use events_store::{load_event_list, save_event_list};
pub use golden_store::{load_golden, save_golden};
pub use layout::SeasonLayout;
pub use run_store::{load_all_runs, load_run, save_run};
