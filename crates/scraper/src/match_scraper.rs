//! The per-match scraper (C3): attempts a configurable subset of
//! components, isolating each component's failure.

use crate::component::{component_url, scrape_component, ComponentValue};
use schema::{ComponentError as RecordComponentError, ComponentKind, LinksConfig, MatchId, MatchRecord};
use transport::Fetcher;

/// Scrapes one match, attempting exactly the components in `components`, in
/// the given order. Never fails: every failure is captured in
/// `MatchRecord.errors` and the record is always returned.
///
/// `now` is a caller-supplied timestamp (typically `unix millis`) rather
/// than read from the clock here, so tests stay deterministic and callers
/// can batch a consistent `scraped_at` across an entire run.
pub fn scrape_match(
    match_id: MatchId,
    components: &[ComponentKind],
    links: &LinksConfig,
    fetcher: &mut dyn Fetcher,
    now: i64,
) -> MatchRecord {
    let span = tracing::debug_span!("scrape_match", match_id = %match_id);
    let _enter = span.enter();

    let mut record = MatchRecord::empty(match_id, now);

    for &kind in components {
        let url = component_url(links.template_for(kind), match_id);
        match scrape_component(kind, &url, fetcher) {
            Ok(value) => {
                apply_value(&mut record, value);
                record
                    .errors
                    .insert(kind, RecordComponentError::success(now));
            }
            Err(err) => {
                record
                    .errors
                    .insert(kind, RecordComponentError::failed(err.to_string(), now));
            }
        }
    }

    debug_assert!(record.check_invariant().is_ok());
    record
}

fn apply_value(record: &mut MatchRecord, value: ComponentValue) {
    match value {
        ComponentValue::Base(v) => record.base = Some(v),
        ComponentValue::Stats(v) => record.stats = Some(v),
        ComponentValue::Lineup(v) => record.lineup = Some(v),
        ComponentValue::Incidents(v) => record.incidents = Some(v),
        ComponentValue::Graph(v) => record.graph = Some(v),
    }
}
