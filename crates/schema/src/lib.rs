//! Shared data model for the goldmatch consensus pipeline.
//!
//! Every other crate in the workspace depends on this one for identifiers,
//! component schemas, run/consensus/golden record shapes, and the
//! configuration data types. No crate re-exports another crate's model
//! types under a different name — `schema` is the single source of truth.

pub mod component;
pub mod config;
pub mod consensus;
pub mod events;
pub mod golden;
pub mod ids;
pub mod match_record;
pub mod season_run;

pub use component::{
    BaseComponent, CardColor, ComponentKind, GraphComponent, Incident, IncidentsComponent,
    LineupComponent, LineupPlayer, MomentumPoint, StatisticGroup, StatisticItem, StatsComponent,
    Team, TeamLineup, UnknownComponentKind, Venue,
};
pub use config::{LinksConfig, QualityConfig, QualityLoopConfig, ScraperConfig, StorageConfig};
pub use consensus::{
    ComponentConsensusResult, MatchConsensusResult, RunPair, SeasonConsensusResult,
};
pub use events::{EventEntry, SeasonEventList};
pub use golden::{GoldenDataset, GoldenSelection};
pub use ids::{ConsensusId, MatchId, RunId, SeasonId, TournamentId};
pub use match_record::{ComponentError, ComponentStatus, MatchRecord};
pub use season_run::{RunKind, SeasonRun};
