//! Configuration data types shared by every stage of the pipeline.
//!
//! Loading these from YAML lives in the root `goldmatch` crate
//! (`goldmatch::config`); this module only defines the shape, since
//! `goldmatch-storage`, `goldmatch-consensus`, and `goldmatch-season` all
//! need to consume fields here without depending on the YAML loader.

use crate::component::ComponentKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filesystem layout knobs for `goldmatch-storage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageConfig {
    pub base_dir: String,
    #[serde(default = "default_runs_subdir")]
    pub runs_subdir: String,
    #[serde(default = "default_analysis_subdir")]
    pub analysis_subdir: String,
    #[serde(default = "default_golden_subdir")]
    pub golden_subdir: String,
    #[serde(default = "default_logs_subdir")]
    pub logs_subdir: String,
}

fn default_runs_subdir() -> String {
    "runs".to_string()
}
fn default_analysis_subdir() -> String {
    "analysis".to_string()
}
fn default_golden_subdir() -> String {
    "golden".to_string()
}
fn default_logs_subdir() -> String {
    "logs".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            base_dir: "./data".to_string(),
            runs_subdir: default_runs_subdir(),
            analysis_subdir: default_analysis_subdir(),
            golden_subdir: default_golden_subdir(),
            logs_subdir: default_logs_subdir(),
        }
    }
}

/// Consensus/comparator knobs for `goldmatch-consensus`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QualityConfig {
    /// Ordered subset of components considered for consensus.
    pub active_components: Vec<ComponentKind>,
    /// Per-component field paths excluded from equality, on top of the
    /// built-in timestamp exclusion (which cannot be disabled).
    #[serde(default)]
    pub comparator_exclusions: BTreeMap<ComponentKind, Vec<String>>,
}

impl Default for QualityConfig {
    fn default() -> Self {
        QualityConfig {
            active_components: ComponentKind::ALL.to_vec(),
            comparator_exclusions: BTreeMap::new(),
        }
    }
}

/// Scraper knobs for `goldmatch-season`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScraperConfig {
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    #[serde(default = "default_completed_status_code")]
    pub completed_status_code: i32,
    #[serde(default = "default_retry_success_threshold")]
    pub retry_success_threshold: f32,
}

fn default_max_workers() -> usize {
    5
}
fn default_completed_status_code() -> i32 {
    100
}
fn default_retry_success_threshold() -> f32 {
    0.5
}

impl Default for ScraperConfig {
    fn default() -> Self {
        ScraperConfig {
            max_workers: default_max_workers(),
            completed_status_code: default_completed_status_code(),
            retry_success_threshold: default_retry_success_threshold(),
        }
    }
}

/// Upstream URL templates, one per logical endpoint. Placeholders are
/// `{tournament_id}`, `{season_id}`, `{match_id}`, `{player_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    pub tournament: String,
    pub season_list: String,
    pub events: String,
    pub base: String,
    pub stats: String,
    pub lineup: String,
    pub incidents: String,
    pub graph: String,
}

impl LinksConfig {
    /// The URL template for a given component kind.
    pub fn template_for(&self, kind: ComponentKind) -> &str {
        match kind {
            ComponentKind::Base => &self.base,
            ComponentKind::Stats => &self.stats,
            ComponentKind::Lineup => &self.lineup,
            ComponentKind::Incidents => &self.incidents,
            ComponentKind::Graph => &self.graph,
        }
    }
}

/// The repair loop's pacing and quota knobs, consumed by `goldmatch-quality`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QualityLoopConfig {
    #[serde(default = "default_sleep_secs")]
    pub sleep_between_scrapes_secs: u64,
    #[serde(default = "default_max_retry_rounds")]
    pub max_retry_rounds: u32,
}

fn default_sleep_secs() -> u64 {
    5
}
fn default_max_retry_rounds() -> u32 {
    3
}

impl Default for QualityLoopConfig {
    fn default() -> Self {
        QualityLoopConfig {
            sleep_between_scrapes_secs: default_sleep_secs(),
            max_retry_rounds: default_max_retry_rounds(),
        }
    }
}
