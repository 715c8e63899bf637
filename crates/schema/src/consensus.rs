//! Consensus result types. The algorithm that produces these lives in
//! `goldmatch-consensus`; this crate only defines the persisted shape.

use crate::component::ComponentKind;
use crate::ids::{MatchId, RunId, SeasonId, TournamentId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// An unordered pair of runs, always stored with the smaller id first so
/// that equality and sorting are well-defined regardless of discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunPair(pub RunId, pub RunId);

impl RunPair {
    pub fn new(a: RunId, b: RunId) -> Self {
        if a <= b {
            RunPair(a, b)
        } else {
            RunPair(b, a)
        }
    }
}

/// Agreement outcome for one component of one match across a set of runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConsensusResult {
    /// Sorted by `(RunId, RunId)`.
    pub agreed_pairs: Vec<RunPair>,
    /// Sorted by `(RunId, RunId)`.
    pub disagreed_pairs: Vec<RunPair>,
    pub has_consensus: bool,
}

impl ComponentConsensusResult {
    /// Runs that appear in at least one agreed pair.
    pub fn consensus_runs(&self) -> BTreeSet<RunId> {
        self.agreed_pairs
            .iter()
            .flat_map(|p| [p.0, p.1])
            .collect()
    }

    /// Runs that appear only in disagreed pairs, never in an agreed one.
    pub fn outlier_runs(&self) -> BTreeSet<RunId> {
        let consensus = self.consensus_runs();
        self.disagreed_pairs
            .iter()
            .flat_map(|p| [p.0, p.1])
            .filter(|r| !consensus.contains(r))
            .collect()
    }

    /// The lowest-numbered run among the consensus runs, used by golden
    /// selection. `None` when there is no consensus.
    pub fn lowest_consensus_run(&self) -> Option<RunId> {
        self.consensus_runs().into_iter().min()
    }
}

/// Per-match consensus outcome: one [`ComponentConsensusResult`] per active
/// component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConsensusResult {
    pub components: BTreeMap<ComponentKind, ComponentConsensusResult>,
    pub has_consensus: bool,
    /// Components without consensus, i.e. the per-match retry set.
    pub retry_components: BTreeSet<ComponentKind>,
}

/// The full season-level consensus report, as persisted under `analysis/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonConsensusResult {
    pub tournament_id: TournamentId,
    pub season_id: SeasonId,
    pub matches: BTreeMap<MatchId, MatchConsensusResult>,
    /// Matches present in fewer than two runs; excluded from consensus
    /// analysis but still carried for retry-plan purposes.
    pub matches_in_single_run_only: BTreeSet<MatchId>,
}

impl SeasonConsensusResult {
    pub fn total_matches(&self) -> usize {
        self.matches.len() + self.matches_in_single_run_only.len()
    }

    /// Matches where every active component agreed across every run pair
    /// that contains it (no outliers at all).
    pub fn perfect_consensus_matches(&self) -> BTreeSet<MatchId> {
        self.matches
            .iter()
            .filter(|(_, m)| {
                m.has_consensus
                    && m.components
                        .values()
                        .all(|c| c.outlier_runs().is_empty())
            })
            .map(|(id, _)| *id)
            .collect()
    }

    /// Matches with consensus on every component but at least one outlier
    /// run on some component.
    pub fn consensus_with_outliers_matches(&self) -> BTreeSet<MatchId> {
        self.matches
            .iter()
            .filter(|(_, m)| {
                m.has_consensus
                    && m.components
                        .values()
                        .any(|c| !c.outlier_runs().is_empty())
            })
            .map(|(id, _)| *id)
            .collect()
    }

    /// Matches that failed to reach consensus on at least one component.
    pub fn failed_matches(&self) -> BTreeSet<MatchId> {
        self.matches
            .iter()
            .filter(|(_, m)| !m.has_consensus)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Consensus rate: fraction of analysed (multi-run) matches with full
    /// consensus. Defined as `0.0`, not `NaN`, when there are no analysed
    /// matches.
    pub fn consensus_rate(&self) -> f64 {
        if self.matches.is_empty() {
            return 0.0;
        }
        let consensus_count = self.matches.values().filter(|m| m.has_consensus).count();
        consensus_count as f64 / self.matches.len() as f64
    }

    /// The minimal retry plan: for analysed matches, only the components
    /// still lacking consensus; for single-run-only matches, the full
    /// component set (we cannot know what would agree).
    pub fn retry_plan(&self) -> BTreeMap<MatchId, Vec<ComponentKind>> {
        let mut plan = BTreeMap::new();
        for (match_id, result) in &self.matches {
            if !result.retry_components.is_empty() {
                plan.insert(
                    *match_id,
                    result.retry_components.iter().copied().collect(),
                );
            }
        }
        for match_id in &self.matches_in_single_run_only {
            plan.insert(*match_id, ComponentKind::ALL.to_vec());
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consensus(agreed: &[(u32, u32)], disagreed: &[(u32, u32)]) -> ComponentConsensusResult {
        let agreed_pairs: Vec<RunPair> = agreed
            .iter()
            .map(|(a, b)| RunPair::new(RunId(*a), RunId(*b)))
            .collect();
        ComponentConsensusResult {
            has_consensus: !agreed_pairs.is_empty(),
            agreed_pairs,
            disagreed_pairs: disagreed
                .iter()
                .map(|(a, b)| RunPair::new(RunId(*a), RunId(*b)))
                .collect(),
        }
    }

    #[test]
    fn outlier_runs_excludes_consensus_runs() {
        let result = consensus(&[(2, 3)], &[(1, 2), (1, 3)]);
        assert_eq!(
            result.consensus_runs(),
            [RunId(2), RunId(3)].into_iter().collect()
        );
        assert_eq!(result.outlier_runs(), [RunId(1)].into_iter().collect());
    }

    #[test]
    fn lowest_consensus_run_picks_minimum() {
        let result = consensus(&[(3, 5), (2, 5)], &[]);
        assert_eq!(result.lowest_consensus_run(), Some(RunId(2)));
    }

    #[test]
    fn consensus_rate_is_zero_not_nan_when_empty() {
        let report = SeasonConsensusResult {
            tournament_id: TournamentId(1),
            season_id: SeasonId(1),
            matches: BTreeMap::new(),
            matches_in_single_run_only: BTreeSet::new(),
        };
        assert_eq!(report.consensus_rate(), 0.0);
    }

    #[test]
    fn retry_plan_includes_full_set_for_single_run_matches() {
        let mut report = SeasonConsensusResult {
            tournament_id: TournamentId(1),
            season_id: SeasonId(1),
            matches: BTreeMap::new(),
            matches_in_single_run_only: BTreeSet::new(),
        };
        report.matches_in_single_run_only.insert(MatchId(102));
        let plan = report.retry_plan();
        assert_eq!(
            plan.get(&MatchId(102)).cloned(),
            Some(ComponentKind::ALL.to_vec())
        );
    }
}
