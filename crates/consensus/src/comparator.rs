//! Field-exclusion equality between two components of the same kind.
//!
//! Each component is serialized to JSON, the excluded top-level fields are
//! stripped from both sides, and the resulting objects are compared for
//! equality. This mirrors comparing two payloads with certain fields
//! masked out, rather than hand-writing an equality method per component
//! type that would need updating every time a field is added.

use schema::component::*;
use schema::{ComponentKind, MatchRecord, QualityConfig};
use std::collections::BTreeSet;

/// No component kind has a mandatory exclusion: the only wall-clock fields
/// in this pipeline (`MatchRecord.scraped_at`, `ComponentError.attempted_at`,
/// `SeasonRun`'s timings) live outside the component payloads compared
/// here, so they are already excluded from equality for free. Anything
/// inside a payload — including `BaseComponent::start_timestamp`, the
/// provider's scheduled kickoff time — is match data and must agree.
fn builtin_excluded_fields(kind: ComponentKind) -> &'static [&'static str] {
    match kind {
        ComponentKind::Base
        | ComponentKind::Stats
        | ComponentKind::Lineup
        | ComponentKind::Incidents
        | ComponentKind::Graph => &[],
    }
}

fn excluded_fields(kind: ComponentKind, config: &QualityConfig) -> BTreeSet<String> {
    let mut fields: BTreeSet<String> = config
        .comparator_exclusions
        .get(&kind)
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    fields.extend(builtin_excluded_fields(kind).iter().map(|s| s.to_string()));
    fields
}

fn masked(value: &serde_json::Value, excluded: &BTreeSet<String>) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let filtered = map
                .iter()
                .filter(|(k, _)| !excluded.contains(*k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            serde_json::Value::Object(filtered)
        }
        other => other.clone(),
    }
}

/// Extracts the named component from `record`, if present, as a masked
/// JSON value ready for equality comparison.
fn extract(record: &MatchRecord, kind: ComponentKind, excluded: &BTreeSet<String>) -> Option<serde_json::Value> {
    let raw = match kind {
        ComponentKind::Base => record.base.as_ref().map(|v| serde_json::to_value(v)),
        ComponentKind::Stats => record.stats.as_ref().map(|v| serde_json::to_value(v)),
        ComponentKind::Lineup => record.lineup.as_ref().map(|v| serde_json::to_value(v)),
        ComponentKind::Incidents => record.incidents.as_ref().map(|v| serde_json::to_value(v)),
        ComponentKind::Graph => record.graph.as_ref().map(|v| serde_json::to_value(v)),
    }?;
    let value = raw.expect("schema types always serialize to JSON");
    Some(masked(&value, excluded))
}

/// Compares one component of two match records, field-exclusions applied.
/// `None` (the component is missing from either side) is never equal to
/// anything, including another `None`.
pub fn compare_component(
    a: &MatchRecord,
    b: &MatchRecord,
    kind: ComponentKind,
    config: &QualityConfig,
) -> bool {
    let excluded = excluded_fields(kind, config);
    match (extract(a, kind, &excluded), extract(b, kind, &excluded)) {
        (Some(va), Some(vb)) => va == vb,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::MatchId;

    fn base(team_name: &str, start_timestamp: i64) -> BaseComponent {
        BaseComponent {
            home_team: Team {
                id: 1,
                name: team_name.to_string(),
                short_name: None,
            },
            away_team: Team {
                id: 2,
                name: "Away".into(),
                short_name: None,
            },
            venue: None,
            referee: None,
            start_timestamp,
            status_code: 100,
            round: None,
            season_name: None,
        }
    }

    fn record_with_base(base_component: BaseComponent) -> MatchRecord {
        let mut record = MatchRecord::empty(MatchId(1), 0);
        record.base = Some(base_component);
        record
    }

    #[test]
    fn identical_components_agree() {
        let config = QualityConfig::default();
        let a = record_with_base(base("Home", 1000));
        let b = record_with_base(base("Home", 1000));
        assert!(compare_component(&a, &b, ComponentKind::Base, &config));
    }

    #[test]
    fn differing_start_timestamp_disagrees() {
        let config = QualityConfig::default();
        let a = record_with_base(base("Home", 1000));
        let b = record_with_base(base("Home", 9999));
        assert!(!compare_component(&a, &b, ComponentKind::Base, &config));
    }

    #[test]
    fn differing_team_name_disagrees() {
        let config = QualityConfig::default();
        let a = record_with_base(base("Home", 1000));
        let b = record_with_base(base("Different Name", 1000));
        assert!(!compare_component(&a, &b, ComponentKind::Base, &config));
    }

    #[test]
    fn missing_component_on_either_side_never_agrees() {
        let config = QualityConfig::default();
        let a = record_with_base(base("Home", 1000));
        let b = MatchRecord::empty(MatchId(1), 0);
        assert!(!compare_component(&a, &b, ComponentKind::Base, &config));
        assert!(!compare_component(&b, &a, ComponentKind::Base, &config));
    }

    #[test]
    fn configured_exclusion_is_applied_on_top_of_builtin() {
        let mut config = QualityConfig::default();
        config
            .comparator_exclusions
            .insert(ComponentKind::Base, vec!["round".to_string()]);
        let mut a = base("Home", 1000);
        let mut b = base("Home", 1000);
        a.round = Some(1);
        b.round = Some(2);
        let a = record_with_base(a);
        let b = record_with_base(b);
        assert!(compare_component(&a, &b, ComponentKind::Base, &config));
    }
}
