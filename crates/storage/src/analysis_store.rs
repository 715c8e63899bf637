//! Saving and loading [`SeasonConsensusResult`]s under a season's
//! `analysis/` directory.

use crate::atomic::{read_bincode, write_bincode};
use crate::error::StorageError;
use crate::layout::{next_number_after_label, numbered_after_label, SeasonLayout};
use schema::{ConsensusId, SeasonConsensusResult};

const LABEL: &str = "consensus";

/// Saves `consensus` under the next available id and returns it. The file
/// name is `consensus_<id>_<timestamp>.bin`, per the storage layout
/// contract; `now_ms` is only used for that observability-facing timestamp
/// and plays no role in numbering or loading.
pub fn save_consensus(
    layout: &SeasonLayout,
    consensus: &SeasonConsensusResult,
    now_ms: i64,
) -> Result<ConsensusId, StorageError> {
    let number = next_number_after_label(&layout.analysis_dir, LABEL)?;
    let path = layout
        .analysis_dir
        .join(format!("{LABEL}_{number}_{now_ms}.bin"));
    write_bincode(&path, consensus)?;
    tracing::info!(consensus_id = number, path = %path.display(), "saved consensus analysis");
    Ok(ConsensusId(number))
}

/// Loads the consensus analysis with the highest id, i.e. the most recent
/// one built for this season.
pub fn load_latest_consensus(
    layout: &SeasonLayout,
) -> Result<Option<(ConsensusId, SeasonConsensusResult)>, StorageError> {
    let entries = std::fs::read_dir(&layout.analysis_dir).map_err(|source| StorageError::Read {
        path: layout.analysis_dir.display().to_string(),
        source,
    })?;

    let mut highest: Option<u32> = None;
    for entry in entries {
        let entry = entry.map_err(|source| StorageError::Read {
            path: layout.analysis_dir.display().to_string(),
            source,
        })?;
        if let Some(n) = numbered_after_label(&entry.file_name().to_string_lossy(), LABEL) {
            highest = Some(highest.map_or(n, |h| h.max(n)));
        }
    }

    let Some(n) = highest else {
        return Ok(None);
    };
    let path = find_consensus_file(layout, n)?;
    let consensus = read_bincode(&path)?;
    Ok(Some((ConsensusId(n), consensus)))
}

fn find_consensus_file(layout: &SeasonLayout, id: u32) -> Result<std::path::PathBuf, StorageError> {
    let entries = std::fs::read_dir(&layout.analysis_dir).map_err(|source| StorageError::Read {
        path: layout.analysis_dir.display().to_string(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| StorageError::Read {
            path: layout.analysis_dir.display().to_string(),
            source,
        })?;
        if numbered_after_label(&entry.file_name().to_string_lossy(), LABEL) == Some(id) {
            return Ok(entry.path());
        }
    }
    Err(StorageError::ConsensusNotFound(ConsensusId(id)))
}
