//! Saving and loading a season's [`SeasonEventList`], cached once at
//! `season_event_details.bin` under the season root (not in a subdirectory:
//! there is exactly one per season, written on the first scrape and read by
//! every run after that).

use crate::atomic::{read_bincode, write_bincode};
use crate::error::StorageError;
use crate::layout::SeasonLayout;
use schema::SeasonEventList;

pub fn save_event_list(layout: &SeasonLayout, events: &SeasonEventList) -> Result<(), StorageError> {
    write_bincode(&layout.event_details_path, events)?;
    tracing::info!(path = %layout.event_details_path.display(), "cached season event list");
    Ok(())
}

/// Returns `None` if no event list has been cached for this season yet,
/// rather than an error: the caller (the quality manager) is expected to
/// fetch and cache it on the first scrape of a season.
pub fn load_event_list(layout: &SeasonLayout) -> Result<Option<SeasonEventList>, StorageError> {
    if !layout.event_details_path.exists() {
        return Ok(None);
    }
    read_bincode(&layout.event_details_path).map(Some)
}
