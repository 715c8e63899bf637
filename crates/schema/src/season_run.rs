//! One scraping sweep over a season: full or partial.

use crate::ids::{MatchId, SeasonId, TournamentId};
use crate::match_record::MatchRecord;
use serde::{Deserialize, Serialize};

/// Whether a run attempted every match with the full component set, or only
/// a retry-plan subset of matches and components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunKind {
    Full,
    Partial,
}

/// The result of one scraping sweep over a (tournament, season).
///
/// Invariant: `matches` contains at most one entry per [`MatchId`] — see
/// [`SeasonRun::check_unique_match_ids`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRun {
    pub tournament_id: TournamentId,
    pub season_id: SeasonId,
    pub kind: RunKind,
    pub total_matches: usize,
    pub successful_matches: usize,
    pub failed_matches: usize,
    pub matches: Vec<MatchRecord>,
    pub scraping_duration_ms: u64,
    pub errors_summary: Vec<String>,
}

impl SeasonRun {
    /// Returns the first duplicated match id, if any.
    pub fn check_unique_match_ids(&self) -> Result<(), MatchId> {
        let mut seen = std::collections::HashSet::with_capacity(self.matches.len());
        for m in &self.matches {
            if !seen.insert(m.match_id) {
                return Err(m.match_id);
            }
        }
        Ok(())
    }

    /// Sorts `matches` by match id, as required after worker-pool
    /// aggregation so the run is deterministic.
    pub fn sort_matches(&mut self) {
        self.matches.sort_by_key(|m| m.match_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_run() -> SeasonRun {
        SeasonRun {
            tournament_id: TournamentId(1),
            season_id: SeasonId(2),
            kind: RunKind::Full,
            total_matches: 0,
            successful_matches: 0,
            failed_matches: 0,
            matches: vec![],
            scraping_duration_ms: 0,
            errors_summary: vec![],
        }
    }

    #[test]
    fn unique_match_ids_pass_on_empty_run() {
        assert!(empty_run().check_unique_match_ids().is_ok());
    }

    #[test]
    fn duplicate_match_ids_are_detected() {
        let mut run = empty_run();
        run.matches.push(MatchRecord::empty(MatchId(101), 0));
        run.matches.push(MatchRecord::empty(MatchId(101), 1));
        assert_eq!(run.check_unique_match_ids(), Err(MatchId(101)));
    }

    #[test]
    fn sort_matches_orders_by_match_id() {
        let mut run = empty_run();
        run.matches.push(MatchRecord::empty(MatchId(102), 0));
        run.matches.push(MatchRecord::empty(MatchId(101), 0));
        run.sort_matches();
        assert_eq!(run.matches[0].match_id, MatchId(101));
        assert_eq!(run.matches[1].match_id, MatchId(102));
    }
}
