//! Per-match record and its error carrier.

use crate::component::{
    BaseComponent, ComponentKind, GraphComponent, IncidentsComponent, LineupComponent,
    StatsComponent,
};
use crate::ids::MatchId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of attempting one component for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Success,
    Failed,
    NotAttempted,
}

/// The error carrier for a single component attempt.
///
/// A map of `ComponentKind -> ComponentError` replaces the source's
/// fixed-named per-component error fields, so adding a sixth component kind
/// is additive rather than a breaking schema change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentError {
    pub status: ComponentStatus,
    pub error_message: Option<String>,
    /// Wall-clock observability timestamp; never compared for consensus.
    pub attempted_at: Option<i64>,
}

impl ComponentError {
    pub fn not_attempted() -> Self {
        ComponentError {
            status: ComponentStatus::NotAttempted,
            error_message: None,
            attempted_at: None,
        }
    }

    pub fn success(attempted_at: i64) -> Self {
        ComponentError {
            status: ComponentStatus::Success,
            error_message: None,
            attempted_at: Some(attempted_at),
        }
    }

    pub fn failed(message: impl Into<String>, attempted_at: i64) -> Self {
        ComponentError {
            status: ComponentStatus::Failed,
            error_message: Some(message.into()),
            attempted_at: Some(attempted_at),
        }
    }
}

/// A fully assembled (or partially assembled) match record.
///
/// Invariant: `errors[k].status == Success` iff the corresponding component
/// field is `Some`. This is checked by [`MatchRecord::check_invariant`] and
/// is never violated by the constructors in `goldmatch-scraper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    /// Observability timestamp; excluded from every comparator equality.
    pub scraped_at: i64,
    pub base: Option<BaseComponent>,
    pub stats: Option<StatsComponent>,
    pub lineup: Option<LineupComponent>,
    pub incidents: Option<IncidentsComponent>,
    pub graph: Option<GraphComponent>,
    pub errors: BTreeMap<ComponentKind, ComponentError>,
}

impl MatchRecord {
    /// An empty record with every component marked `not_attempted`.
    pub fn empty(match_id: MatchId, scraped_at: i64) -> Self {
        let mut errors = BTreeMap::new();
        for kind in ComponentKind::ALL {
            errors.insert(kind, ComponentError::not_attempted());
        }
        MatchRecord {
            match_id,
            scraped_at,
            base: None,
            stats: None,
            lineup: None,
            incidents: None,
            graph: None,
            errors,
        }
    }

    /// Whether the match has an identity (a successfully scraped `base`).
    pub fn has_identity(&self) -> bool {
        self.base.is_some()
    }

    /// Validates the success-status/non-null invariant. Returns the first
    /// violating component kind, if any.
    pub fn check_invariant(&self) -> Result<(), ComponentKind> {
        for kind in ComponentKind::ALL {
            let has_value = match kind {
                ComponentKind::Base => self.base.is_some(),
                ComponentKind::Stats => self.stats.is_some(),
                ComponentKind::Lineup => self.lineup.is_some(),
                ComponentKind::Incidents => self.incidents.is_some(),
                ComponentKind::Graph => self.graph.is_some(),
            };
            let is_success = self
                .errors
                .get(&kind)
                .map(|e| e.status == ComponentStatus::Success)
                .unwrap_or(false);
            if has_value != is_success {
                return Err(kind);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Team;

    #[test]
    fn empty_record_has_no_identity_and_satisfies_invariant() {
        let record = MatchRecord::empty(MatchId(101), 0);
        assert!(!record.has_identity());
        assert!(record.check_invariant().is_ok());
    }

    #[test]
    fn invariant_violated_when_value_present_without_success_status() {
        let mut record = MatchRecord::empty(MatchId(101), 0);
        record.base = Some(BaseComponent {
            home_team: Team {
                id: 1,
                name: "Home".into(),
                short_name: None,
            },
            away_team: Team {
                id: 2,
                name: "Away".into(),
                short_name: None,
            },
            venue: None,
            referee: None,
            start_timestamp: 0,
            status_code: 100,
            round: None,
            season_name: None,
        });
        // errors[Base] is still NotAttempted: invariant should be violated.
        assert_eq!(record.check_invariant(), Err(ComponentKind::Base));
    }
}
