//! Exercises the full quality-manager repair loop against the in-memory
//! `StaticFetcher`, end to end: two full scrapes, a consensus build, any
//! retry rounds needed, and a golden freeze — all without a real HTTP
//! client, which is outside this workspace's scope.

use goldmatch::{
    ComponentKind, Fetcher, FetcherFactory, LinksConfig, NoopProgressObserver, QualityConfig,
    QualityLoopConfig, QualityManager, ScraperConfig, StaticFetcher, StorageConfig, TournamentId,
};
use serde_json::json;
use std::sync::atomic::AtomicBool;

fn links() -> LinksConfig {
    LinksConfig {
        tournament: "https://example-provider.test/tournament/{tournament_id}".into(),
        season_list: "https://example-provider.test/tournament/{tournament_id}/seasons".into(),
        events: "https://example-provider.test/tournament/{tournament_id}/season/{season_id}/events"
            .into(),
        base: "https://example-provider.test/match/{match_id}".into(),
        stats: "https://example-provider.test/match/{match_id}/statistics".into(),
        lineup: "https://example-provider.test/match/{match_id}/lineups".into(),
        incidents: "https://example-provider.test/match/{match_id}/incidents".into(),
        graph: "https://example-provider.test/match/{match_id}/graph".into(),
    }
}

fn scripted_fetcher() -> StaticFetcher {
    let events_body = json!({
        "events": [
            {"id": 1001, "status": {"code": 100}},
            {"id": 1002, "status": {"code": 100}},
            {"id": 1003, "status": {"code": 60}},
        ]
    });

    let base_body = |home: &str, away: &str| {
        json!({
            "home_team": {"id": 1, "name": home, "short_name": null},
            "away_team": {"id": 2, "name": away, "short_name": null},
            "venue": null,
            "referee": null,
            "start_timestamp": 1_700_000_000,
            "status_code": 100,
            "round": null,
            "season_name": "2025/26"
        })
    };

    StaticFetcher::new()
        .with_response(
            "https://example-provider.test/tournament/17/season/2025/events",
            events_body,
        )
        .with_response(
            "https://example-provider.test/match/1001",
            base_body("Riverside FC", "Dockside United"),
        )
        .with_response(
            "https://example-provider.test/match/1002",
            base_body("Harborview", "Uplands"),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let base_dir = tempfile::tempdir().expect("create scratch directory for demo run");
    let storage_config = StorageConfig {
        base_dir: base_dir.path().display().to_string(),
        ..StorageConfig::default()
    };
    let quality_config = QualityConfig {
        active_components: vec![ComponentKind::Base],
        comparator_exclusions: Default::default(),
    };

    let fetcher = scripted_fetcher();
    let fetcher_factory = move || -> Box<dyn Fetcher> { Box::new(fetcher.clone()) };

    let manager = QualityManager::new(
        TournamentId(17),
        goldmatch::SeasonId(2025),
        &storage_config,
        links(),
        ScraperConfig::default(),
        quality_config,
        QualityLoopConfig {
            sleep_between_scrapes_secs: 0,
            max_retry_rounds: 3,
        },
        Box::new(fetcher_factory),
    )
    .expect("initialize quality manager");

    let cancel = AtomicBool::new(false);
    let mut tick = 0i64;
    let result = manager
        .run_repair_loop(&NoopProgressObserver, &cancel, || {
            tick += 1;
            tick
        })
        .expect("run repair loop to completion");

    println!(
        "consensus: {} matches analysed, {} perfect, {} with outliers, {} failed, rate {:.2}",
        result.total_matches(),
        result.perfect_consensus_matches().len(),
        result.consensus_with_outliers_matches().len(),
        result.failed_matches().len(),
        result.consensus_rate(),
    );
}
