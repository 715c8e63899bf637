//! goldmatch: a multi-run consensus pipeline for football match data.
//!
//! Scrapes the same season more than once, compares the runs component by
//! component, and freezes a "golden" dataset out of whichever values at
//! least two runs corroborate. Re-exports the public surface of every
//! workspace crate so a caller only needs to depend on `goldmatch` itself.

pub mod config;

pub use schema::{
    component, BaseComponent, CardColor, ComponentConsensusResult, ComponentError,
    ComponentKind, ComponentStatus, ConsensusId, EventEntry, GoldenDataset, GoldenSelection,
    GraphComponent, Incident, IncidentsComponent, LineupComponent, LineupPlayer, LinksConfig,
    MatchConsensusResult, MatchId, MatchRecord, MomentumPoint, QualityConfig, QualityLoopConfig,
    RunId, RunKind, RunPair, ScraperConfig, SeasonConsensusResult, SeasonEventList, SeasonId,
    SeasonRun, StatisticGroup, StatisticItem, StatsComponent, StorageConfig, Team, TeamLineup,
    TournamentId, UnknownComponentKind, Venue,
};

pub use transport::{CountingFetcher, Fetcher, StaticFetcher, TransportError};

pub use scraper::{component_url, scrape_component, scrape_match, ComponentValue};

pub use events::{fetch_season_events, EventsError};

pub use season::{
    full_scrape, partition, retry_scrape, FetcherFactory, NoopProgressObserver, ProgressObserver,
    RecordingProgressObserver, RetryPlan,
};

pub use storage::{
    load_all_runs, load_event_list, load_golden, load_latest_consensus, load_run, save_consensus,
    save_event_list, save_golden, save_run, SeasonLayout, StorageError,
};

pub use consensus::{build_season_consensus, compare_component, materialize_golden, select_golden};

pub use quality::{QualityError, QualityManager};

pub use config::{ConfigLoadError, GoldmatchConfig};

use thiserror::Error;

/// The top-level error type a `goldmatch` caller sees: every sub-crate
/// error folded into one enum, mirroring the teacher workspace's
/// `PipelineError` convention of one umbrella error at the root crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GoldmatchError {
    #[error(transparent)]
    Quality(#[from] QualityError),

    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    #[error(transparent)]
    Events(#[from] EventsError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
