//! The quality manager (C8): orchestrates scrape, consensus, retry, and
//! golden-freeze rounds for one (tournament, season) into a repair loop.
//!
//! Every other crate in this workspace is a pure function of its inputs;
//! this one is the only place that decides how many runs are enough,
//! whether a retry round is still worth running, and when to sleep.

mod error;
mod manager;

pub use error::QualityError;
pub use manager::QualityManager;
