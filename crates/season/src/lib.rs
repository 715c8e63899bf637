//! The season scraper (C5): drives full and retry scrapes across a season's
//! match list.
//!
//! A full scrape (see [`full_scrape`]) splits the match list statically
//! across a worker pool, one owned transport handle per worker. A retry
//! scrape (see [`retry_scrape`]) re-attempts a targeted subset of
//! match/component pairs sequentially on a single transport.

mod full_scrape;
mod partition;
mod progress;
mod retry_scrape;

pub use full_scrape::{full_scrape, FetcherFactory};
pub use partition::partition;
pub use progress::{NoopProgressObserver, ProgressObserver, RecordingProgressObserver};
pub use retry_scrape::{retry_scrape, RetryPlan};
