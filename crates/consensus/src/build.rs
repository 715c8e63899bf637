//! Building a [`SeasonConsensusResult`] from a set of loaded runs.

use crate::comparator::compare_component;
use schema::{
    ComponentConsensusResult, ComponentKind, MatchConsensusResult, MatchId, QualityConfig, RunId,
    RunPair, SeasonConsensusResult, SeasonId, SeasonRun, TournamentId,
};
use std::collections::{BTreeMap, BTreeSet};

/// Builds a season-level consensus report from every currently available
/// run. Every pair of runs that both contain a given match is compared
/// component-by-component; a component reaches consensus when at least one
/// pair of runs agrees on it.
///
/// Determinism: run ids, match ids, and component kinds are all totally
/// ordered, and every collection here is a `BTreeMap`/`BTreeSet` or
/// explicitly sorted, so two calls over the same input always produce byte-
/// identical output.
pub fn build_season_consensus(
    tournament_id: TournamentId,
    season_id: SeasonId,
    runs: &[(RunId, SeasonRun)],
    config: &QualityConfig,
) -> SeasonConsensusResult {
    // Every attempted match is grouped by id regardless of which components
    // actually came back: a retry run only re-fetches the components named
    // in its plan, so requiring `base` to be present here would silently
    // drop retry records (and full-scrape records where only the base
    // fetch failed) out of consensus entirely. The pairwise comparator
    // already treats a missing component as disagreement.
    let mut records_by_match: BTreeMap<MatchId, Vec<(RunId, &schema::MatchRecord)>> = BTreeMap::new();
    for (run_id, run) in runs {
        for record in &run.matches {
            records_by_match
                .entry(record.match_id)
                .or_default()
                .push((*run_id, record));
        }
    }

    let mut matches = BTreeMap::new();
    let mut matches_in_single_run_only = BTreeSet::new();

    for (match_id, mut present) in records_by_match {
        present.sort_by_key(|(run_id, _)| *run_id);
        if present.len() < 2 {
            matches_in_single_run_only.insert(match_id);
            continue;
        }
        matches.insert(match_id, build_match_consensus(&present, config));
    }

    tracing::debug!(
        tournament_id = %tournament_id,
        season_id = %season_id,
        runs = runs.len(),
        matches_analysed = matches.len(),
        matches_single_run_only = matches_in_single_run_only.len(),
        "built season consensus"
    );

    SeasonConsensusResult {
        tournament_id,
        season_id,
        matches,
        matches_in_single_run_only,
    }
}

fn build_match_consensus(
    present: &[(RunId, &schema::MatchRecord)],
    config: &QualityConfig,
) -> MatchConsensusResult {
    let mut components = BTreeMap::new();
    let mut retry_components = BTreeSet::new();
    let mut has_consensus = true;

    for &kind in &config.active_components {
        let result = build_component_consensus(present, kind, config);
        if !result.has_consensus {
            has_consensus = false;
            retry_components.insert(kind);
        }
        components.insert(kind, result);
    }

    MatchConsensusResult {
        components,
        has_consensus,
        retry_components,
    }
}

fn build_component_consensus(
    present: &[(RunId, &schema::MatchRecord)],
    kind: ComponentKind,
    config: &QualityConfig,
) -> ComponentConsensusResult {
    let mut agreed_pairs = Vec::new();
    let mut disagreed_pairs = Vec::new();

    for i in 0..present.len() {
        for j in (i + 1)..present.len() {
            let (run_a, record_a) = present[i];
            let (run_b, record_b) = present[j];
            let pair = RunPair::new(run_a, run_b);
            if compare_component(record_a, record_b, kind, config) {
                agreed_pairs.push(pair);
            } else {
                disagreed_pairs.push(pair);
            }
        }
    }

    agreed_pairs.sort();
    disagreed_pairs.sort();

    ComponentConsensusResult {
        has_consensus: !agreed_pairs.is_empty(),
        agreed_pairs,
        disagreed_pairs,
    }
}
