//! Saving and loading the frozen [`GoldenDataset`] under a season's
//! `golden/` directory. Unlike runs and analyses, there is at most one
//! golden dataset per season, so it lives at a fixed file name and each
//! freeze overwrites the previous one.

use crate::atomic::{read_bincode, write_bincode};
use crate::error::StorageError;
use crate::layout::SeasonLayout;
use schema::GoldenDataset;

const GOLDEN_FILE_NAME: &str = "golden_data.bin";

pub fn save_golden(layout: &SeasonLayout, golden: &GoldenDataset) -> Result<(), StorageError> {
    let path = layout.golden_dir.join(GOLDEN_FILE_NAME);
    write_bincode(&path, golden)?;
    tracing::info!(path = %path.display(), "froze golden dataset");
    Ok(())
}

pub fn load_golden(layout: &SeasonLayout) -> Result<GoldenDataset, StorageError> {
    let path = layout.golden_dir.join(GOLDEN_FILE_NAME);
    if !path.exists() {
        return Err(StorageError::GoldenNotFound);
    }
    read_bincode(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{SeasonId, StorageConfig, TournamentId};

    fn layout() -> (tempfile::TempDir, SeasonLayout) {
        let base = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            base_dir: base.path().display().to_string(),
            ..StorageConfig::default()
        };
        let layout = SeasonLayout::new(&config, 54, 62408);
        layout.ensure().unwrap();
        (base, layout)
    }

    fn empty_golden() -> GoldenDataset {
        GoldenDataset {
            tournament_id: TournamentId(54),
            season_id: SeasonId(62408),
            matches: Default::default(),
        }
    }

    #[test]
    fn missing_golden_reports_not_found() {
        let (_base, layout) = layout();
        assert!(matches!(load_golden(&layout), Err(StorageError::GoldenNotFound)));
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_base, layout) = layout();
        save_golden(&layout, &empty_golden()).unwrap();
        assert_eq!(load_golden(&layout).unwrap(), empty_golden());
    }

    #[test]
    fn re_freezing_overwrites_the_previous_golden_dataset() {
        let (_base, layout) = layout();
        save_golden(&layout, &empty_golden()).unwrap();
        let mut second = empty_golden();
        second.matches.insert(
            schema::MatchId(1),
            schema::MatchRecord::empty(schema::MatchId(1), 0),
        );
        save_golden(&layout, &second).unwrap();
        assert_eq!(load_golden(&layout).unwrap(), second);
    }
}
