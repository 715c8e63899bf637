//! Golden selection: picking, for every match and component with
//! consensus, the lowest-numbered run that participates in that consensus.

use schema::{
    ComponentKind, GoldenDataset, GoldenSelection, MatchId, MatchRecord, RunId,
    SeasonConsensusResult, SeasonId, SeasonRun, TournamentId,
};
use std::collections::BTreeMap;

/// Builds the per-match, per-component run selection. Only matches with
/// full consensus (every active component agreeing) are selected: a match
/// missing consensus on even one component still needs a retry round
/// before any golden value is chosen for it, so it is left out entirely
/// rather than assembled with gaps.
pub fn select_golden(consensus: &SeasonConsensusResult) -> GoldenSelection {
    let mut selections: BTreeMap<MatchId, BTreeMap<ComponentKind, RunId>> = BTreeMap::new();

    for (match_id, result) in &consensus.matches {
        if !result.has_consensus {
            continue;
        }
        let mut per_component = BTreeMap::new();
        for (kind, component_result) in &result.components {
            if let Some(run_id) = component_result.lowest_consensus_run() {
                per_component.insert(*kind, run_id);
            }
        }
        if !per_component.is_empty() {
            selections.insert(*match_id, per_component);
        }
    }

    GoldenSelection {
        tournament_id: consensus.tournament_id,
        season_id: consensus.season_id,
        selections,
    }
}

/// Materializes a [`GoldenDataset`] from a [`GoldenSelection`] by pulling
/// each chosen component's value out of the run that won it.
pub fn materialize_golden(
    tournament_id: TournamentId,
    season_id: SeasonId,
    selection: &GoldenSelection,
    runs: &[(RunId, SeasonRun)],
) -> GoldenDataset {
    let records_by_run: BTreeMap<RunId, BTreeMap<MatchId, &MatchRecord>> = runs
        .iter()
        .map(|(run_id, run)| {
            let by_match = run.matches.iter().map(|m| (m.match_id, m)).collect();
            (*run_id, by_match)
        })
        .collect();

    let mut matches = BTreeMap::new();
    for (match_id, per_component) in &selection.selections {
        let mut record = MatchRecord::empty(*match_id, 0);
        for (kind, run_id) in per_component {
            let Some(source) = records_by_run
                .get(run_id)
                .and_then(|by_match| by_match.get(match_id))
            else {
                continue;
            };
            apply_component(&mut record, *kind, source);
        }
        matches.insert(*match_id, record);
    }

    GoldenDataset {
        tournament_id,
        season_id,
        matches,
    }
}

fn apply_component(record: &mut MatchRecord, kind: ComponentKind, source: &MatchRecord) {
    match kind {
        ComponentKind::Base => {
            if let Some(v) = &source.base {
                record.base = Some(v.clone());
                record.errors.insert(kind, schema::ComponentError::success(source.scraped_at));
            }
        }
        ComponentKind::Stats => {
            if let Some(v) = &source.stats {
                record.stats = Some(v.clone());
                record.errors.insert(kind, schema::ComponentError::success(source.scraped_at));
            }
        }
        ComponentKind::Lineup => {
            if let Some(v) = &source.lineup {
                record.lineup = Some(v.clone());
                record.errors.insert(kind, schema::ComponentError::success(source.scraped_at));
            }
        }
        ComponentKind::Incidents => {
            if let Some(v) = &source.incidents {
                record.incidents = Some(v.clone());
                record.errors.insert(kind, schema::ComponentError::success(source.scraped_at));
            }
        }
        ComponentKind::Graph => {
            if let Some(v) = &source.graph {
                record.graph = Some(v.clone());
                record.errors.insert(kind, schema::ComponentError::success(source.scraped_at));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{ComponentConsensusResult, MatchConsensusResult, RunKind, RunPair};
    use std::collections::BTreeSet;

    #[test]
    fn golden_selection_picks_lowest_consensus_run() {
        let mut components = BTreeMap::new();
        components.insert(
            ComponentKind::Base,
            ComponentConsensusResult {
                agreed_pairs: vec![RunPair::new(RunId(2), RunId(3))],
                disagreed_pairs: vec![],
                has_consensus: true,
            },
        );
        let mut matches = BTreeMap::new();
        matches.insert(
            MatchId(101),
            MatchConsensusResult {
                components,
                has_consensus: true,
                retry_components: BTreeSet::new(),
            },
        );
        let consensus = SeasonConsensusResult {
            tournament_id: TournamentId(1),
            season_id: SeasonId(1),
            matches,
            matches_in_single_run_only: BTreeSet::new(),
        };

        let selection = select_golden(&consensus);
        assert_eq!(
            selection.selections[&MatchId(101)][&ComponentKind::Base],
            RunId(2)
        );
    }

    #[test]
    fn components_without_consensus_are_omitted_from_selection() {
        let mut components = BTreeMap::new();
        components.insert(
            ComponentKind::Base,
            ComponentConsensusResult {
                agreed_pairs: vec![],
                disagreed_pairs: vec![RunPair::new(RunId(1), RunId(2))],
                has_consensus: false,
            },
        );
        let mut matches = BTreeMap::new();
        matches.insert(
            MatchId(101),
            MatchConsensusResult {
                components,
                has_consensus: false,
                retry_components: [ComponentKind::Base].into_iter().collect(),
            },
        );
        let consensus = SeasonConsensusResult {
            tournament_id: TournamentId(1),
            season_id: SeasonId(1),
            matches,
            matches_in_single_run_only: BTreeSet::new(),
        };

        let selection = select_golden(&consensus);
        assert!(!selection.selections.contains_key(&MatchId(101)));
    }

    #[test]
    fn materialize_pulls_component_values_from_the_selected_run() {
        use schema::component::{BaseComponent, Team};

        let base_component = BaseComponent {
            home_team: Team { id: 1, name: "Home".into(), short_name: None },
            away_team: Team { id: 2, name: "Away".into(), short_name: None },
            venue: None,
            referee: None,
            start_timestamp: 0,
            status_code: 100,
            round: None,
            season_name: None,
        };
        let mut source_record = MatchRecord::empty(MatchId(101), 5);
        source_record.base = Some(base_component.clone());
        source_record.errors.insert(ComponentKind::Base, schema::ComponentError::success(5));

        let run = SeasonRun {
            tournament_id: TournamentId(1),
            season_id: SeasonId(1),
            kind: RunKind::Full,
            total_matches: 1,
            successful_matches: 1,
            failed_matches: 0,
            matches: vec![source_record],
            scraping_duration_ms: 0,
            errors_summary: vec![],
        };

        let mut per_component = BTreeMap::new();
        per_component.insert(ComponentKind::Base, RunId(1));
        let mut selections = BTreeMap::new();
        selections.insert(MatchId(101), per_component);
        let selection = GoldenSelection {
            tournament_id: TournamentId(1),
            season_id: SeasonId(1),
            selections,
        };

        let golden = materialize_golden(TournamentId(1), SeasonId(1), &selection, &[(RunId(1), run)]);
        assert_eq!(golden.matches[&MatchId(101)].base, Some(base_component));
    }
}
