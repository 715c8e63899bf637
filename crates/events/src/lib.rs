//! The events lister (C4): for a (tournament, season), fetch the match list
//! and return the ordered list of match-ids, filtered to "completed".

use schema::{EventEntry, LinksConfig, MatchId, SeasonEventList, SeasonId, TournamentId};
use thiserror::Error;
use transport::{Fetcher, TransportError};

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EventsError {
    #[error("transport error fetching events list: {0}")]
    Transport(#[from] TransportError),

    #[error("events response malformed: {0}")]
    Malformed(String),
}

/// The raw shape of the upstream events-list response.
#[derive(Debug, serde::Deserialize)]
struct RawEventsResponse {
    events: Vec<RawEvent>,
}

#[derive(Debug, serde::Deserialize)]
struct RawEvent {
    id: u64,
    status: RawStatus,
}

#[derive(Debug, serde::Deserialize)]
struct RawStatus {
    code: i32,
}

/// Fetches the events list for (tournament, season) from the configured
/// `links.events` template, and returns it in upstream order with no
/// filtering applied — callers who want the completed subset should call
/// [`SeasonEventList::completed_match_ids`] on the result.
pub fn fetch_season_events(
    tournament_id: TournamentId,
    season_id: SeasonId,
    links: &LinksConfig,
    fetcher: &mut dyn Fetcher,
) -> Result<SeasonEventList, EventsError> {
    let url = links
        .events
        .replace("{tournament_id}", &tournament_id.0.to_string())
        .replace("{season_id}", &season_id.0.to_string());

    tracing::debug!(tournament_id = %tournament_id, season_id = %season_id, %url, "fetching season events");

    let json = fetcher.fetch_json(&url)?;
    let raw: RawEventsResponse =
        serde_json::from_value(json).map_err(|e| EventsError::Malformed(e.to_string()))?;

    Ok(SeasonEventList {
        tournament_id,
        season_id,
        entries: raw
            .events
            .into_iter()
            .map(|e| EventEntry {
                match_id: MatchId(e.id),
                status_code: e.status.code,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use transport::StaticFetcher;

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

    #[test]
    fn completed_filter_boundary_scenario() {
        let body = json!({
            "events": [
                {"id": 101, "status": {"code": 100}},
                {"id": 102, "status": {"code": 60}},
                {"id": 103, "status": {"code": 100}},
            ]
        });
        let mut fetcher =
            StaticFetcher::new().with_response("https://x/t/1/s/2/events", body);
        let list =
            fetch_season_events(TournamentId(1), SeasonId(2), &links(), &mut fetcher).unwrap();
        assert_eq!(
            list.completed_match_ids(100),
            vec![MatchId(101), MatchId(103)]
        );
    }

    #[test]
    fn malformed_response_is_reported() {
        let mut fetcher =
            StaticFetcher::new().with_response("https://x/t/1/s/2/events", json!({"bogus": true}));
        let err =
            fetch_season_events(TournamentId(1), SeasonId(2), &links(), &mut fetcher).unwrap_err();
        assert!(matches!(err, EventsError::Malformed(_)));
    }
}
