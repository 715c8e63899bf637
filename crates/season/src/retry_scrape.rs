//! Retry scrape: sequential, single-transport re-attempt of a retry plan.

use schema::{ComponentKind, LinksConfig, MatchId, MatchRecord, RunKind, SeasonRun, SeasonId, TournamentId};
use scraper::scrape_match;
use std::collections::BTreeMap;
use std::time::Instant;
use transport::Fetcher;

/// A retry plan: for each match that needs re-attempting, the ordered
/// subset of components to re-fetch. Produced by
/// `SeasonConsensusResult::retry_plan` in `goldmatch-consensus`.
pub type RetryPlan = BTreeMap<MatchId, Vec<ComponentKind>>;

/// Re-scrapes exactly the matches and components named in `plan`, on a
/// single transport, sequentially. Unlike [`crate::full_scrape::full_scrape`]
/// this never spawns workers: a retry round is expected to be small, and
/// correctness (never hammering the same match concurrently) matters more
/// than throughput here.
///
/// A match is only counted as a retry success if at least
/// `success_threshold` of its re-attempted components succeeded (the
/// season-level quality loop uses this to decide whether a match still
/// needs another round).
pub fn retry_scrape(
    tournament_id: TournamentId,
    season_id: SeasonId,
    plan: &RetryPlan,
    links: &LinksConfig,
    fetcher: &mut dyn Fetcher,
    success_threshold: f64,
    now: i64,
) -> SeasonRun {
    let started = Instant::now();
    let mut matches: Vec<MatchRecord> = Vec::with_capacity(plan.len());
    let mut successful_matches = 0usize;

    for (&match_id, components) in plan {
        let record = scrape_match(match_id, components, links, fetcher, now);
        if retry_met_threshold(&record, components, success_threshold) {
            successful_matches += 1;
        }
        matches.push(record);
    }

    matches.sort_by_key(|m| m.match_id);
    let failed_matches = matches.len() - successful_matches;

    SeasonRun {
        tournament_id,
        season_id,
        kind: RunKind::Partial,
        total_matches: matches.len(),
        successful_matches,
        failed_matches,
        matches,
        scraping_duration_ms: started.elapsed().as_millis() as u64,
        errors_summary: Vec::new(),
    }
}

fn retry_met_threshold(record: &MatchRecord, attempted: &[ComponentKind], threshold: f64) -> bool {
    if attempted.is_empty() {
        return true;
    }
    let succeeded = attempted
        .iter()
        .filter(|kind| {
            record
                .errors
                .get(kind)
                .map(|e| e.status == schema::ComponentStatus::Success)
                .unwrap_or(false)
        })
        .count();
    (succeeded as f64) / (attempted.len() as f64) >= threshold
}
