//! Component scrapers (C2) and the per-match scraper (C3).

pub mod component;
pub mod error;
pub mod match_scraper;

pub use component::{component_url, scrape_component, ComponentValue};
pub use error::ComponentError;
pub use match_scraper::scrape_match;
