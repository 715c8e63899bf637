//! Saving and loading [`SeasonRun`]s under a season's `runs/` directory.

use crate::atomic::{read_bincode, write_bincode};
use crate::error::StorageError;
use crate::layout::{leading_number, next_number, SeasonLayout};
use schema::{RunId, RunKind, SeasonRun};

/// Saves `run` under the next available run number and returns the id it
/// was assigned. The file name encodes both the run number and its kind
/// (`full`/`part`), e.g. `3_full_1700000000000.bin`, per the storage
/// layout contract; `now_ms` is only used for that observability-facing
/// timestamp and plays no role in numbering or loading.
pub fn save_run(layout: &SeasonLayout, run: &SeasonRun, now_ms: i64) -> Result<RunId, StorageError> {
    let number = next_number(&layout.runs_dir)?;
    let kind = match run.kind {
        RunKind::Full => "full",
        RunKind::Partial => "part",
    };
    let path = layout
        .runs_dir
        .join(format!("{number}_{kind}_{now_ms}.bin"));
    write_bincode(&path, run)?;
    tracing::info!(run_id = number, path = %path.display(), "saved scraping run");
    Ok(RunId(number))
}

/// Loads exactly one run by id.
pub fn load_run(layout: &SeasonLayout, run_id: RunId) -> Result<SeasonRun, StorageError> {
    let path = run_file_path(layout, run_id)?;
    read_bincode(&path)
}

fn run_file_path(layout: &SeasonLayout, run_id: RunId) -> Result<std::path::PathBuf, StorageError> {
    let entries = std::fs::read_dir(&layout.runs_dir).map_err(|source| StorageError::Read {
        path: layout.runs_dir.display().to_string(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| StorageError::Read {
            path: layout.runs_dir.display().to_string(),
            source,
        })?;
        let name = entry.file_name();
        let stem = name.to_string_lossy();
        if leading_number(&stem) == Some(run_id.0) {
            return Ok(entry.path());
        }
    }
    Err(StorageError::RunNotFound(run_id))
}

/// Loads every run currently saved for this season, in ascending run-id
/// order. A run file that fails to decode is skipped with a warning rather
/// than aborting the whole load — a season with 9 good runs and 1
/// corrupted one should still drive consensus off the 9.
pub fn load_all_runs(layout: &SeasonLayout) -> Result<Vec<(RunId, SeasonRun)>, StorageError> {
    let entries = std::fs::read_dir(&layout.runs_dir).map_err(|source| StorageError::Read {
        path: layout.runs_dir.display().to_string(),
        source,
    })?;

    let mut numbers = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StorageError::Read {
            path: layout.runs_dir.display().to_string(),
            source,
        })?;
        let name = entry.file_name();
        if let Some(n) = leading_number(&name.to_string_lossy()) {
            numbers.push(n);
        }
    }
    numbers.sort_unstable();

    let mut runs = Vec::with_capacity(numbers.len());
    for n in numbers {
        let run_id = RunId(n);
        match load_run(layout, run_id) {
            Ok(run) => runs.push((run_id, run)),
            Err(err) => tracing::warn!(run_id = n, error = %err, "skipping unreadable run"),
        }
    }
    Ok(runs)
}
