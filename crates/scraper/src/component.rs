//! The uniform component-scraping pipeline (C2).
//!
//! Every component kind goes through the same steps: build a URL from a
//! template, fetch it, and validate the JSON against the component's typed
//! schema. Rather than five near-identical scraper types, this module is
//! one generic function parameterised by [`ComponentKind`] — see
//! `goldmatch/SPEC_FULL.md` §4.1 and §9 for why.

use crate::error::ComponentError;
use schema::{
    BaseComponent, ComponentKind, GraphComponent, IncidentsComponent, LineupComponent,
    StatsComponent,
};
use transport::Fetcher;

/// The typed payload produced by a successful component scrape.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    Base(BaseComponent),
    Stats(StatsComponent),
    Lineup(LineupComponent),
    Incidents(IncidentsComponent),
    Graph(GraphComponent),
}

impl ComponentValue {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentValue::Base(_) => ComponentKind::Base,
            ComponentValue::Stats(_) => ComponentKind::Stats,
            ComponentValue::Lineup(_) => ComponentKind::Lineup,
            ComponentValue::Incidents(_) => ComponentKind::Incidents,
            ComponentValue::Graph(_) => ComponentKind::Graph,
        }
    }
}

/// Substitutes `{match_id}` in a URL template. Other placeholders
/// (`{tournament_id}`, `{season_id}`, `{player_id}`) are the caller's
/// responsibility — component URLs only ever need the match id.
pub fn component_url(template: &str, match_id: schema::MatchId) -> String {
    template.replace("{match_id}", &match_id.0.to_string())
}

/// Fetches and validates one component for one match.
///
/// This is the single entry point every component kind funnels through;
/// only `kind`, `url`, and the schema being validated against differ.
pub fn scrape_component(
    kind: ComponentKind,
    url: &str,
    fetcher: &mut dyn Fetcher,
) -> Result<ComponentValue, ComponentError> {
    let span = tracing::debug_span!("scrape_component", component = %kind, url);
    let _enter = span.enter();

    let json = fetcher
        .fetch_json(url)
        .map_err(|source| ComponentError::Transport {
            component: kind,
            source,
        })?;

    let value = match kind {
        ComponentKind::Base => serde_json::from_value::<BaseComponent>(json)
            .map(ComponentValue::Base)
            .map_err(|e| schema_error(kind, &e)),
        ComponentKind::Stats => serde_json::from_value::<StatsComponent>(json)
            .map(ComponentValue::Stats)
            .map_err(|e| schema_error(kind, &e)),
        ComponentKind::Lineup => serde_json::from_value::<LineupComponent>(json)
            .map(ComponentValue::Lineup)
            .map_err(|e| schema_error(kind, &e)),
        ComponentKind::Incidents => serde_json::from_value::<IncidentsComponent>(json)
            .map(ComponentValue::Incidents)
            .map_err(|e| schema_error(kind, &e)),
        ComponentKind::Graph => serde_json::from_value::<GraphComponent>(json)
            .map(ComponentValue::Graph)
            .map_err(|e| schema_error(kind, &e)),
    };

    if let Err(ref e) = value {
        tracing::warn!(component = %kind, error = %e, "component schema validation failed");
    }

    value
}

fn schema_error(kind: ComponentKind, e: &serde_json::Error) -> ComponentError {
    ComponentError::Schema {
        component: kind,
        message: e.to_string(),
    }
}
