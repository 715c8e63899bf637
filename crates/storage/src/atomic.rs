//! Write-to-temp-then-rename persistence, so a crash mid-write never leaves
//! a run/consensus/golden file half-written where a loader could see it.

use crate::error::StorageError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

pub fn write_bincode<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let encoded = bincode::serialize(value).map_err(|source| StorageError::Encode {
        path: path.display().to_string(),
        source,
    })?;

    let parent = path.parent().expect("storage paths always have a parent directory");
    let mut tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));
    // Guard against two concurrent writers racing on the same temp name; the
    // final rename is still what makes the write visible.
    let mut suffix = 0u32;
    while tmp_path.exists() {
        suffix += 1;
        tmp_path = parent.join(format!(
            ".{}.{suffix}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));
    }

    std::fs::write(&tmp_path, &encoded).map_err(|source| StorageError::Write {
        path: tmp_path.display().to_string(),
        source,
    })?;
    std::fs::rename(&tmp_path, path).map_err(|source| StorageError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

pub fn read_bincode<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let bytes = std::fs::read(path).map_err(|source| StorageError::Read {
        path: path.display().to_string(),
        source,
    })?;
    bincode::deserialize(&bytes).map_err(|source| StorageError::Decode {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1_run.bin");
        write_bincode(&path, &vec![1u32, 2, 3]).unwrap();
        let back: Vec<u32> = read_bincode(&path).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn write_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1_run.bin");
        write_bincode(&path, &42u32).unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("1_run.bin")]);
    }

    #[test]
    fn reading_a_corrupted_file_reports_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1_run.bin");
        std::fs::write(&path, b"not a valid bincode payload at all, too short").unwrap();
        let result: Result<Vec<u32>, _> = read_bincode(&path);
        assert!(matches!(result, Err(StorageError::Decode { .. })));
    }
}
