//! The closed set of match components and their typed payloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five aspects of a match that a component scraper can fetch.
///
/// The set is closed and ordered; `ALL` is the canonical declaration order
/// used whenever a default component subset is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Base,
    Stats,
    Lineup,
    Incidents,
    Graph,
}

impl ComponentKind {
    /// The full, declaration-ordered set of component kinds.
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Base,
        ComponentKind::Stats,
        ComponentKind::Lineup,
        ComponentKind::Incidents,
        ComponentKind::Graph,
    ];

    /// `true` for the one component without which a match has no identity.
    pub fn is_identity(self) -> bool {
        matches!(self, ComponentKind::Base)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Base => "base",
            ComponentKind::Stats => "stats",
            ComponentKind::Lineup => "lineup",
            ComponentKind::Incidents => "incidents",
            ComponentKind::Graph => "graph",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by [`ComponentKind::from_str`] for an unrecognised name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component kind: {0}")]
pub struct UnknownComponentKind(pub String);

impl FromStr for ComponentKind {
    type Err = UnknownComponentKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(ComponentKind::Base),
            "stats" => Ok(ComponentKind::Stats),
            "lineup" => Ok(ComponentKind::Lineup),
            "incidents" => Ok(ComponentKind::Incidents),
            "graph" => Ok(ComponentKind::Graph),
            other => Err(UnknownComponentKind(other.to_string())),
        }
    }
}

/// A team reference as it appears inside the base component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
    pub short_name: Option<String>,
}

/// Venue metadata, optional because postponed/relocated fixtures sometimes
/// omit it upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: u64,
    pub name: String,
    pub city: Option<String>,
}

/// Core match identity and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseComponent {
    pub home_team: Team,
    pub away_team: Team,
    pub venue: Option<Venue>,
    pub referee: Option<String>,
    pub start_timestamp: i64,
    pub status_code: i32,
    pub round: Option<u32>,
    pub season_name: Option<String>,
}

/// A single named statistic, home/away paired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticItem {
    pub name: String,
    pub home: String,
    pub away: String,
}

/// A named grouping of statistics (e.g. "Possession", "Shots").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticGroup {
    pub group_name: String,
    /// Ordering as returned by the upstream provider is preserved.
    pub items: Vec<StatisticItem>,
}

/// Aggregate match statistics, grouped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsComponent {
    pub groups: Vec<StatisticGroup>,
}

/// One player entry within a team's lineup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupPlayer {
    pub player_id: u64,
    pub name: String,
    pub shirt_number: Option<u32>,
    pub is_starter: bool,
    pub position: Option<String>,
}

/// One team's lineup for the match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamLineup {
    pub formation: Option<String>,
    /// Ordering as returned by the upstream provider is preserved.
    pub players: Vec<LineupPlayer>,
}

/// Starting and substitute lineups for both teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupComponent {
    pub home: TeamLineup,
    pub away: TeamLineup,
}

/// Discriminated incident payload. The discriminator is the `incident_type`
/// tag on the wire; unknown tags are a validation failure, never a silently
/// dropped element — see `goldmatch-scraper` for the eager-validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "incident_type", rename_all = "snake_case")]
pub enum Incident {
    Goal {
        minute: u32,
        player_id: Option<u64>,
        is_home: bool,
        is_penalty: bool,
        is_own_goal: bool,
    },
    Card {
        minute: u32,
        player_id: Option<u64>,
        is_home: bool,
        color: CardColor,
    },
    Substitution {
        minute: u32,
        player_in_id: Option<u64>,
        player_out_id: Option<u64>,
        is_home: bool,
    },
    VarDecision {
        minute: u32,
        is_home: bool,
        outcome: String,
    },
    PeriodEvent {
        minute: u32,
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardColor {
    Yellow,
    Red,
}

/// Match incidents in upstream chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentsComponent {
    /// Ordering as returned by the upstream provider is preserved.
    pub incidents: Vec<Incident>,
}

/// One sample of the momentum/pressure time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumPoint {
    pub minute: f32,
    pub value: f32,
}

/// The momentum graph: a time series sampled across the match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphComponent {
    /// Ordering (by minute) as returned by the upstream provider is preserved.
    pub points: Vec<MomentumPoint>,
}
