//! YAML configuration loading for the goldmatch pipeline.
//!
//! A single YAML document carries every stage's configuration (storage,
//! quality/comparator, scraper, upstream links, repair-loop pacing), mirroring
//! how the underlying per-crate config types are already split in
//! `schema::config`. This module is only responsible for parsing and
//! validating that document; the resulting config types are consumed
//! directly by `goldmatch-storage`, `goldmatch-consensus`, and
//! `goldmatch-season`.
//!
//! ```yaml
//! version: "1.0"
//! storage:
//!   base_dir: "./data"
//! quality:
//!   active_components: [base, stats, lineup, incidents, graph]
//!   comparator_exclusions:
//!     base: [scraped_at]
//! scraper:
//!   max_workers: 5
//!   completed_status_code: 100
//!   retry_success_threshold: 0.5
//! links:
//!   tournament: "https://example-provider.test/tournament/{tournament_id}"
//!   season_list: "https://example-provider.test/tournament/{tournament_id}/seasons"
//!   events: "https://example-provider.test/tournament/{tournament_id}/season/{season_id}/events"
//!   base: "https://example-provider.test/match/{match_id}"
//!   stats: "https://example-provider.test/match/{match_id}/statistics"
//!   lineup: "https://example-provider.test/match/{match_id}/lineups"
//!   incidents: "https://example-provider.test/match/{match_id}/incidents"
//!   graph: "https://example-provider.test/match/{match_id}/graph"
//! quality_loop:
//!   sleep_between_scrapes_secs: 5
//!   max_retry_rounds: 3
//! ```

use std::fs;
use std::path::Path;

use schema::{LinksConfig, QualityConfig, QualityLoopConfig, ScraperConfig, StorageConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// The top-level YAML configuration for a goldmatch pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GoldmatchConfig {
    pub version: String,
    pub storage: StorageConfig,
    pub quality: QualityConfig,
    pub scraper: ScraperConfig,
    pub links: LinksConfig,
    pub quality_loop: QualityLoopConfig,
}

impl GoldmatchConfig {
    /// Loads and validates a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parses and validates a configuration document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: GoldmatchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }

        if self.storage.base_dir.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "storage.base_dir must not be empty".to_string(),
            ));
        }

        if self.quality.active_components.is_empty() {
            return Err(ConfigLoadError::Validation(
                "quality.active_components must not be empty".to_string(),
            ));
        }

        if self.scraper.max_workers == 0 {
            return Err(ConfigLoadError::Validation(
                "scraper.max_workers must be >= 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.scraper.retry_success_threshold) {
            return Err(ConfigLoadError::Validation(
                "scraper.retry_success_threshold must be within [0.0, 1.0]".to_string(),
            ));
        }

        if self.quality_loop.max_retry_rounds == 0 {
            return Err(ConfigLoadError::Validation(
                "quality_loop.max_retry_rounds must be >= 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::ComponentKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_yaml() -> &'static str {
        r#"
version: "1.0"
storage:
  base_dir: "./data"
quality:
  active_components: [base, stats]
  comparator_exclusions:
    base: [scraped_at]
scraper:
  max_workers: 5
  completed_status_code: 100
  retry_success_threshold: 0.5
links:
  tournament: "https://x/tournament/{tournament_id}"
  season_list: "https://x/tournament/{tournament_id}/seasons"
  events: "https://x/tournament/{tournament_id}/season/{season_id}/events"
  base: "https://x/match/{match_id}"
  stats: "https://x/match/{match_id}/statistics"
  lineup: "https://x/match/{match_id}/lineups"
  incidents: "https://x/match/{match_id}/incidents"
  graph: "https://x/match/{match_id}/graph"
quality_loop:
  sleep_between_scrapes_secs: 5
  max_retry_rounds: 3
"#
    }

    #[test]
    fn loads_a_valid_document() {
        let config = GoldmatchConfig::from_yaml(sample_yaml()).unwrap();
        assert_eq!(config.storage.base_dir, "./data");
        assert_eq!(
            config.quality.active_components,
            vec![ComponentKind::Base, ComponentKind::Stats]
        );
        assert_eq!(config.scraper.max_workers, 5);
    }

    #[test]
    fn loads_from_a_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(sample_yaml().as_bytes()).unwrap();
        let config = GoldmatchConfig::from_file(file.path()).unwrap();
        assert_eq!(config.version, "1.0");
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let yaml = sample_yaml().replacen("1.0", "2.0", 1);
        let err = GoldmatchConfig::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedVersion(_)));
    }

    #[test]
    fn empty_active_components_is_rejected() {
        let yaml = sample_yaml().replace("[base, stats]", "[]");
        let err = GoldmatchConfig::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)));
    }

    #[test]
    fn zero_max_workers_is_rejected() {
        let yaml = sample_yaml().replace("max_workers: 5", "max_workers: 0");
        let err = GoldmatchConfig::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)));
    }

    #[test]
    fn out_of_range_retry_threshold_is_rejected() {
        let yaml = sample_yaml().replace("retry_success_threshold: 0.5", "retry_success_threshold: 1.5");
        let err = GoldmatchConfig::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)));
    }
}
