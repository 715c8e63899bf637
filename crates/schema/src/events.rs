//! The cached list of a season's match-ids and their upstream status codes.

use crate::ids::{MatchId, SeasonId, TournamentId};
use serde::{Deserialize, Serialize};

/// One row of the upstream events list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    pub match_id: MatchId,
    pub status_code: i32,
}

/// The full events list for one (tournament, season), as returned upstream
/// and cached on first scrape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonEventList {
    pub tournament_id: TournamentId,
    pub season_id: SeasonId,
    /// Upstream order is preserved.
    pub entries: Vec<EventEntry>,
}

impl SeasonEventList {
    /// Returns match-ids whose status code equals `completed_status_code`,
    /// in upstream order.
    pub fn completed_match_ids(&self, completed_status_code: i32) -> Vec<MatchId> {
        self.entries
            .iter()
            .filter(|e| e.status_code == completed_status_code)
            .map(|e| e.match_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_filter_preserves_upstream_order() {
        let list = SeasonEventList {
            tournament_id: TournamentId(1),
            season_id: SeasonId(2),
            entries: vec![
                EventEntry {
                    match_id: MatchId(101),
                    status_code: 100,
                },
                EventEntry {
                    match_id: MatchId(102),
                    status_code: 60,
                },
                EventEntry {
                    match_id: MatchId(103),
                    status_code: 100,
                },
            ],
        };
        assert_eq!(
            list.completed_match_ids(100),
            vec![MatchId(101), MatchId(103)]
        );
    }

    #[test]
    fn no_completed_matches_returns_empty() {
        let list = SeasonEventList {
            tournament_id: TournamentId(1),
            season_id: SeasonId(2),
            entries: vec![],
        };
        assert!(list.completed_match_ids(100).is_empty());
    }
}
