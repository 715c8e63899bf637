//! Full scrape: drives a partition-per-worker pool over a match-id list.

use crate::partition::partition;
use crate::progress::ProgressObserver;
use schema::{ComponentKind, LinksConfig, MatchId, RunKind, SeasonId, SeasonRun, TournamentId};
use scraper::scrape_match;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;
use transport::Fetcher;

/// Builds one worker's private transport handle. Called once per worker at
/// pool startup; the returned handle is owned by that worker for its
/// lifetime and never shared, matching the isolated-transport-state design
/// note.
pub trait FetcherFactory: Send + Sync {
    fn build(&self) -> Box<dyn Fetcher>;
}

impl<F> FetcherFactory for F
where
    F: Fn() -> Box<dyn Fetcher> + Send + Sync,
{
    fn build(&self) -> Box<dyn Fetcher> {
        self()
    }
}

/// Drives a full scrape: every match id in `match_ids`, every component in
/// [`ComponentKind::ALL`], split across `max_workers` workers.
///
/// `cancel`, when set at any point during the scrape, stops workers from
/// picking up further matches once their in-flight match completes; the
/// returned run is then marked [`RunKind::Partial`].
#[allow(clippy::too_many_arguments)]
pub fn full_scrape(
    tournament_id: TournamentId,
    season_id: SeasonId,
    match_ids: Vec<MatchId>,
    max_workers: usize,
    links: &LinksConfig,
    fetcher_factory: &dyn FetcherFactory,
    observer: &dyn ProgressObserver,
    cancel: &AtomicBool,
    now: i64,
) -> SeasonRun {
    let started = Instant::now();
    let total_matches = match_ids.len();
    let chunks = partition(&match_ids, max_workers.max(1));

    let results = Mutex::new(Vec::with_capacity(total_matches));
    let was_cancelled = AtomicBool::new(false);

    std::thread::scope(|scope| {
        for chunk in &chunks {
            scope.spawn(|| {
                let mut fetcher = fetcher_factory.build();
                for &match_id in chunk {
                    if cancel.load(Ordering::Relaxed) {
                        was_cancelled.store(true, Ordering::Relaxed);
                        break;
                    }
                    let record = scrape_match(
                        match_id,
                        &ComponentKind::ALL,
                        links,
                        fetcher.as_mut(),
                        now,
                    );
                    let succeeded = record.has_identity();
                    observer.on_match_done(match_id, succeeded);
                    results.lock().expect("results list poisoned").push(record);
                }
            });
        }
    });

    let mut matches = results.into_inner().expect("results list poisoned");
    matches.sort_by_key(|m| m.match_id);

    let successful_matches = matches.iter().filter(|m| m.has_identity()).count();
    let failed_matches = matches.len() - successful_matches;
    let kind = if was_cancelled.load(Ordering::Relaxed) {
        RunKind::Partial
    } else {
        RunKind::Full
    };

    SeasonRun {
        tournament_id,
        season_id,
        kind,
        total_matches,
        successful_matches,
        failed_matches,
        matches,
        scraping_duration_ms: started.elapsed().as_millis() as u64,
        errors_summary: Vec::new(),
    }
}
