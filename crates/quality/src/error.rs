use events::EventsError;
use schema::{SeasonId, TournamentId};
use storage::StorageError;
use thiserror::Error;

/// Errors raised by [`crate::QualityManager`] operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QualityError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Events(#[from] EventsError),

    #[error(
        "need at least 2 runs to build consensus for tournament {tournament_id} season {season_id}, have {available}"
    )]
    InsufficientRuns {
        tournament_id: TournamentId,
        season_id: SeasonId,
        available: usize,
    },
}
