//! Opaque identifiers used throughout the pipeline.
//!
//! All ids are thin newtypes over integers so that, e.g., a `MatchId` can
//! never be passed where a `RunId` is expected even though both are
//! numeric on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a tournament/league, assigned by the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentId(pub u64);

/// Identifier for a season within a tournament, assigned by the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonId(pub u64);

/// Identifier for a single match, assigned by the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u64);

/// Monotonically increasing identifier for a scrape run, local to one
/// (tournament, season). Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub u32);

/// Monotonically increasing identifier for a consensus analysis, local to
/// one (tournament, season).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsensusId(pub u32);

macro_rules! impl_display_via_inner {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

impl_display_via_inner!(TournamentId, SeasonId, MatchId, RunId, ConsensusId);
