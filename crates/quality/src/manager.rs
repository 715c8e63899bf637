//! [`QualityManager`]: the quality manager (C8), orchestrating scrape,
//! consensus, retry, and golden-freeze rounds for one (tournament, season).

use crate::error::QualityError;
use consensus::{build_season_consensus, materialize_golden, select_golden};
use schema::{
    ConsensusId, LinksConfig, QualityConfig, QualityLoopConfig, RunId, ScraperConfig,
    SeasonConsensusResult, SeasonId, StorageConfig, TournamentId,
};
use season::{full_scrape, retry_scrape, FetcherFactory, NoopProgressObserver, ProgressObserver, RetryPlan};
use std::sync::atomic::AtomicBool;
use std::time::Duration;
use storage::SeasonLayout;

/// Everything a [`QualityManager`] needs to drive one season end to end.
/// Bundled rather than passed piecemeal to every method, matching how the
/// teacher's stage configs travel together through its pipeline.
pub struct QualityManager {
    tournament_id: TournamentId,
    season_id: SeasonId,
    layout: SeasonLayout,
    links: LinksConfig,
    scraper_config: ScraperConfig,
    quality_config: QualityConfig,
    loop_config: QualityLoopConfig,
    fetcher_factory: Box<dyn FetcherFactory>,
}

impl QualityManager {
    pub fn new(
        tournament_id: TournamentId,
        season_id: SeasonId,
        storage_config: &StorageConfig,
        links: LinksConfig,
        scraper_config: ScraperConfig,
        quality_config: QualityConfig,
        loop_config: QualityLoopConfig,
        fetcher_factory: Box<dyn FetcherFactory>,
    ) -> Result<Self, QualityError> {
        let layout = SeasonLayout::new(storage_config, tournament_id.0, season_id.0);
        layout.ensure()?;
        Ok(QualityManager {
            tournament_id,
            season_id,
            layout,
            links,
            scraper_config,
            quality_config,
            loop_config,
            fetcher_factory,
        })
    }

    /// Fetches and caches the season's event list on first use; every later
    /// call reuses the on-disk cache rather than refetching.
    fn ensure_event_list(&self) -> Result<schema::SeasonEventList, QualityError> {
        if let Some(cached) = storage::load_event_list(&self.layout)? {
            return Ok(cached);
        }
        let mut fetcher = self.fetcher_factory.build();
        let list = events::fetch_season_events(
            self.tournament_id,
            self.season_id,
            &self.links,
            fetcher.as_mut(),
        )?;
        storage::save_event_list(&self.layout, &list)?;
        Ok(list)
    }

    /// Runs one full scrape of every completed match in the season and
    /// persists it as a new run. `cancel`, if observed mid-scrape, yields a
    /// partial run rather than aborting outright.
    pub fn run_scrape(
        &self,
        observer: &dyn ProgressObserver,
        cancel: &AtomicBool,
        now_ms: i64,
    ) -> Result<RunId, QualityError> {
        let events = self.ensure_event_list()?;
        let match_ids = events.completed_match_ids(self.scraper_config.completed_status_code);
        tracing::info!(
            tournament_id = %self.tournament_id,
            season_id = %self.season_id,
            match_count = match_ids.len(),
            "starting full scrape"
        );

        let run = full_scrape(
            self.tournament_id,
            self.season_id,
            match_ids,
            self.scraper_config.max_workers,
            &self.links,
            self.fetcher_factory.as_ref(),
            observer,
            cancel,
            now_ms,
        );
        let run_id = storage::save_run(&self.layout, &run, now_ms)?;
        Ok(run_id)
    }

    /// Re-attempts exactly the match/component pairs named in `plan`.
    pub fn run_retry(&self, plan: &RetryPlan, now_ms: i64) -> Result<RunId, QualityError> {
        let mut fetcher = self.fetcher_factory.build();
        tracing::info!(
            tournament_id = %self.tournament_id,
            season_id = %self.season_id,
            match_count = plan.len(),
            "starting retry scrape"
        );
        let run = retry_scrape(
            self.tournament_id,
            self.season_id,
            plan,
            &self.links,
            fetcher.as_mut(),
            self.scraper_config.retry_success_threshold as f64,
            now_ms,
        );
        let run_id = storage::save_run(&self.layout, &run, now_ms)?;
        Ok(run_id)
    }

    /// Builds and persists a fresh consensus analysis over every run on
    /// disk. Requires at least two runs: consensus is a pairwise-agreement
    /// property and is undefined for a single run.
    pub fn build_consensus(
        &self,
        now_ms: i64,
    ) -> Result<(ConsensusId, SeasonConsensusResult), QualityError> {
        let runs = storage::load_all_runs(&self.layout)?;
        if runs.len() < 2 {
            return Err(QualityError::InsufficientRuns {
                tournament_id: self.tournament_id,
                season_id: self.season_id,
                available: runs.len(),
            });
        }

        let result = build_season_consensus(
            self.tournament_id,
            self.season_id,
            &runs,
            &self.quality_config,
        );
        log_consensus_summary(self.tournament_id, self.season_id, &result);
        let consensus_id = storage::save_consensus(&self.layout, &result, now_ms)?;
        Ok((consensus_id, result))
    }

    /// Freezes a [`schema::GoldenDataset`] from `consensus` and writes it to
    /// the `golden/` directory, overwriting any previous freeze.
    pub fn build_golden(&self, consensus: &SeasonConsensusResult) -> Result<(), QualityError> {
        let runs = storage::load_all_runs(&self.layout)?;
        let selection = select_golden(consensus);
        let golden = materialize_golden(self.tournament_id, self.season_id, &selection, &runs);
        storage::save_golden(&self.layout, &golden)?;
        tracing::info!(
            tournament_id = %self.tournament_id,
            season_id = %self.season_id,
            matches = golden.matches.len(),
            "froze golden dataset"
        );
        Ok(())
    }

    /// The fixed-shape repair loop: two full scrapes, a consensus build,
    /// then retry rounds (each followed by a fresh consensus build) until
    /// either the retry plan is empty or `loop_config.max_retry_rounds` is
    /// exhausted, finishing with a golden freeze.
    ///
    /// `now_ms` is called once per round rather than taken as a fixed
    /// argument, since a long-running loop needs a fresh timestamp at each
    /// step.
    pub fn run_repair_loop(
        &self,
        observer: &dyn ProgressObserver,
        cancel: &AtomicBool,
        now_ms: impl Fn() -> i64,
    ) -> Result<SeasonConsensusResult, QualityError> {
        self.run_scrape(observer, cancel, now_ms())?;
        sleep_between_scrapes(self.loop_config.sleep_between_scrapes_secs);
        self.run_scrape(observer, cancel, now_ms())?;

        let (_, mut result) = self.build_consensus(now_ms())?;
        let mut round = 0u32;

        while round < self.loop_config.max_retry_rounds {
            let plan = result.retry_plan();
            if plan.is_empty() {
                break;
            }
            round += 1;
            tracing::info!(
                tournament_id = %self.tournament_id,
                season_id = %self.season_id,
                round,
                matches_to_retry = plan.len(),
                "starting retry round"
            );
            self.run_retry(&plan, now_ms())?;
            let (_, rebuilt) = self.build_consensus(now_ms())?;
            result = rebuilt;
        }

        self.build_golden(&result)?;
        Ok(result)
    }
}

fn sleep_between_scrapes(secs: u64) {
    if secs > 0 {
        std::thread::sleep(Duration::from_secs(secs));
    }
}

fn log_consensus_summary(
    tournament_id: TournamentId,
    season_id: SeasonId,
    result: &SeasonConsensusResult,
) {
    tracing::info!(
        tournament_id = %tournament_id,
        season_id = %season_id,
        total_matches = result.total_matches(),
        perfect = result.perfect_consensus_matches().len(),
        consensus_with_outliers = result.consensus_with_outliers_matches().len(),
        failed = result.failed_matches().len(),
        single_run_only = result.matches_in_single_run_only.len(),
        consensus_rate = result.consensus_rate(),
        "consensus analysis complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{ComponentKind, MatchId};
    use serde_json::json;
    use transport::{Fetcher, StaticFetcher};

    fn links() -> LinksConfig {
        LinksConfig {
            tournament: "https://x/t/{tournament_id}".into(),
            season_list: "https://x/t/{tournament_id}/seasons".into(),
            events: "https://x/t/{tournament_id}/s/{season_id}/events".into(),
            base: "https://x/match/{match_id}".into(),
            stats: "https://x/match/{match_id}/stats".into(),
            lineup: "https://x/match/{match_id}/lineup".into(),
            incidents: "https://x/match/{match_id}/incidents".into(),
            graph: "https://x/match/{match_id}/graph".into(),
        }
    }

    fn base_json(home: &str) -> serde_json::Value {
        json!({
            "home_team": {"id": 1, "name": home, "short_name": null},
            "away_team": {"id": 2, "name": "Away", "short_name": null},
            "venue": null, "referee": null, "start_timestamp": 1000,
            "status_code": 100, "round": null, "season_name": null
        })
    }

    fn events_json() -> serde_json::Value {
        json!({
            "events": [
                {"id": 101, "status": {"code": 100}},
                {"id": 102, "status": {"code": 60}},
            ]
        })
    }

    fn fixed_fetcher_factory(home: &str) -> impl FetcherFactory {
        let fetcher = StaticFetcher::new()
            .with_response("https://x/t/1/s/2/events", events_json())
            .with_response("https://x/match/101", base_json(home));
        move || -> Box<dyn Fetcher> { Box::new(fetcher.clone()) }
    }

    fn storage_config(base: &std::path::Path) -> StorageConfig {
        StorageConfig {
            base_dir: base.display().to_string(),
            ..StorageConfig::default()
        }
    }

    fn quality_config() -> QualityConfig {
        QualityConfig {
            active_components: vec![ComponentKind::Base],
            comparator_exclusions: Default::default(),
        }
    }

    #[test]
    fn build_consensus_rejects_a_single_run() {
        let base = tempfile::tempdir().unwrap();
        let manager = QualityManager::new(
            TournamentId(1),
            SeasonId(2),
            &storage_config(base.path()),
            links(),
            ScraperConfig::default(),
            quality_config(),
            QualityLoopConfig::default(),
            Box::new(fixed_fetcher_factory("Home")),
        )
        .unwrap();

        manager.run_scrape(&NoopProgressObserver, &AtomicBool::new(false), 0).unwrap();
        let err = manager.build_consensus(0).unwrap_err();
        assert!(matches!(err, QualityError::InsufficientRuns { available: 1, .. }));
    }

    #[test]
    fn two_identical_scrapes_reach_perfect_consensus() {
        let base = tempfile::tempdir().unwrap();
        let manager = QualityManager::new(
            TournamentId(1),
            SeasonId(2),
            &storage_config(base.path()),
            links(),
            ScraperConfig::default(),
            quality_config(),
            QualityLoopConfig::default(),
            Box::new(fixed_fetcher_factory("Home")),
        )
        .unwrap();

        manager.run_scrape(&NoopProgressObserver, &AtomicBool::new(false), 0).unwrap();
        manager.run_scrape(&NoopProgressObserver, &AtomicBool::new(false), 0).unwrap();
        let (_, result) = manager.build_consensus(0).unwrap();
        assert!(result.perfect_consensus_matches().contains(&MatchId(101)));
        assert_eq!(result.retry_plan().len(), 0);
    }

    #[test]
    fn repair_loop_freezes_a_golden_dataset_with_no_retries_needed() {
        let base = tempfile::tempdir().unwrap();
        let manager = QualityManager::new(
            TournamentId(1),
            SeasonId(2),
            &storage_config(base.path()),
            links(),
            ScraperConfig {
                max_workers: 1,
                ..ScraperConfig::default()
            },
            quality_config(),
            QualityLoopConfig {
                sleep_between_scrapes_secs: 0,
                max_retry_rounds: 3,
            },
            Box::new(fixed_fetcher_factory("Home")),
        )
        .unwrap();

        let mut tick = 0i64;
        let result = manager
            .run_repair_loop(&NoopProgressObserver, &AtomicBool::new(false), || {
                tick += 1;
                tick
            })
            .unwrap();

        assert!(result.retry_plan().is_empty());
        let golden = storage::load_golden(&manager.layout).unwrap();
        assert!(golden.matches.contains_key(&MatchId(101)));
    }

    #[test]
    fn event_list_is_cached_after_the_first_scrape() {
        let base = tempfile::tempdir().unwrap();
        let manager = QualityManager::new(
            TournamentId(1),
            SeasonId(2),
            &storage_config(base.path()),
            links(),
            ScraperConfig::default(),
            quality_config(),
            QualityLoopConfig::default(),
            Box::new(fixed_fetcher_factory("Home")),
        )
        .unwrap();

        manager.run_scrape(&NoopProgressObserver, &AtomicBool::new(false), 0).unwrap();
        assert!(storage::load_event_list(&manager.layout).unwrap().is_some());
    }
}
