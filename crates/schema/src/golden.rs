//! The golden dataset: a frozen, corroborated per-match record set.

use crate::component::ComponentKind;
use crate::ids::{MatchId, RunId, SeasonId, TournamentId};
use crate::match_record::MatchRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-match, per-component choice of which run's value to use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenSelection {
    pub tournament_id: TournamentId,
    pub season_id: SeasonId,
    pub selections: BTreeMap<MatchId, BTreeMap<ComponentKind, RunId>>,
}

/// The frozen golden dataset for one (tournament, season).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenDataset {
    pub tournament_id: TournamentId,
    pub season_id: SeasonId,
    pub matches: BTreeMap<MatchId, MatchRecord>,
}
