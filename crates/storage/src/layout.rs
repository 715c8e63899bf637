//! The on-disk directory layout for one (tournament, season).
//!
//! ```text
//! <base_dir>/tournament_<tid>/season_<sid>/
//!   runs/                   <n>_full_<timestamp>.bin or <n>_part_<timestamp>.bin
//!   analysis/               consensus_<m>_<timestamp>.bin
//!   golden/                 golden_data.bin
//!   season_event_details.bin
//!   logs/
//! ```

use crate::error::StorageError;
use schema::StorageConfig;
use std::path::{Path, PathBuf};

/// Resolved directory paths for a single season, created on [`SeasonLayout::ensure`].
#[derive(Debug, Clone)]
pub struct SeasonLayout {
    pub season_dir: PathBuf,
    pub runs_dir: PathBuf,
    pub analysis_dir: PathBuf,
    pub golden_dir: PathBuf,
    pub logs_dir: PathBuf,
    /// `season_event_details.bin` lives directly under `season_dir`, not in
    /// a subdirectory: there is exactly one per season, cached on first
    /// scrape and otherwise immutable.
    pub event_details_path: PathBuf,
}

impl SeasonLayout {
    pub fn new(config: &StorageConfig, tournament_id: u64, season_id: u64) -> Self {
        let base = Path::new(&config.base_dir);
        let season_dir = base
            .join(format!("tournament_{tournament_id}"))
            .join(format!("season_{season_id}"));
        SeasonLayout {
            runs_dir: season_dir.join(&config.runs_subdir),
            analysis_dir: season_dir.join(&config.analysis_subdir),
            golden_dir: season_dir.join(&config.golden_subdir),
            logs_dir: season_dir.join(&config.logs_subdir),
            event_details_path: season_dir.join("season_event_details.bin"),
            season_dir,
        }
    }

    /// Creates every directory in the layout that doesn't already exist.
    pub fn ensure(&self) -> Result<(), StorageError> {
        for dir in [
            &self.season_dir,
            &self.runs_dir,
            &self.analysis_dir,
            &self.golden_dir,
            &self.logs_dir,
        ] {
            std::fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
                path: dir.display().to_string(),
                source,
            })?;
        }
        Ok(())
    }
}

/// Parses the leading integer up to the first `_` in a file name, e.g.
/// `"3_run.bin"` -> `3`. Files that don't match this shape are ignored by
/// callers rather than treated as an error, so a stray non-data file in a
/// runs directory doesn't break numbering.
pub fn leading_number(file_stem: &str) -> Option<u32> {
    let digits: String = file_stem.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// The next monotonic number to use in `dir`, i.e. `max(existing) + 1`, or
/// `1` if `dir` has no numbered entries yet.
pub fn next_number(dir: &Path) -> Result<u32, StorageError> {
    let mut max_seen = 0u32;
    let entries = std::fs::read_dir(dir).map_err(|source| StorageError::Read {
        path: dir.display().to_string(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| StorageError::Read {
            path: dir.display().to_string(),
            source,
        })?;
        let stem = entry.file_name();
        let stem = stem.to_string_lossy();
        if let Some(n) = leading_number(&stem) {
            max_seen = max_seen.max(n);
        }
    }
    Ok(max_seen + 1)
}

/// Like [`leading_number`] but for file names that carry a fixed label
/// before the number, e.g. `"consensus_12_1700000000000.bin"` -> `12`.
/// Used by the analysis directory, whose files are named
/// `consensus_<m>_<timestamp>.bin` rather than `<m>_...` so that a listing
/// of `analysis/` reads as consensus files at a glance.
pub fn numbered_after_label(file_stem: &str, label: &str) -> Option<u32> {
    let rest = file_stem.strip_prefix(label)?.strip_prefix('_')?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// The next monotonic number for a `label`-prefixed directory, analogous to
/// [`next_number`] but for file names parsed by [`numbered_after_label`].
pub fn next_number_after_label(dir: &Path, label: &str) -> Result<u32, StorageError> {
    let mut max_seen = 0u32;
    let entries = std::fs::read_dir(dir).map_err(|source| StorageError::Read {
        path: dir.display().to_string(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| StorageError::Read {
            path: dir.display().to_string(),
            source,
        })?;
        let stem = entry.file_name();
        let stem = stem.to_string_lossy();
        if let Some(n) = numbered_after_label(&stem, label) {
            max_seen = max_seen.max(n);
        }
    }
    Ok(max_seen + 1)
}
