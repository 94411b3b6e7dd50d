use crate::error::MonitorError;
use crate::ports::Result;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TOPICS: [&str; 4] = [
    "\"Russian Navy\" OR \"VMF\"",
    "\"Chinese Navy\" OR \"PLAN Navy\" OR \"PLA Navy\"",
    "\"Northern Fleet\" Russia",
    "\"South Sea Fleet\" China",
];
pub const DEFAULT_MAX_RESULTS_PER_TOPIC: usize = 5;
pub const DEFAULT_DISPLAY_LIMIT: usize = 50;
pub const DEFAULT_HISTORY_PATH: &str = "data/tweets.json";
pub const DEFAULT_SUMMARY_PATH: &str = "README.md";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.google.com/search";
pub const DEFAULT_SITE_FILTER: &str = "site:twitter.com";

/// Everything a monitoring run needs to know up front
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub topics: Vec<String>,
    pub max_results_per_topic: usize,
    pub display_limit: usize,
    pub history_path: PathBuf,
    pub summary_path: PathBuf,
    pub request_timeout: Duration,
    pub search_endpoint: String,
    pub site_filter: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            topics: DEFAULT_TOPICS.iter().map(|topic| topic.to_string()).collect(),
            max_results_per_topic: DEFAULT_MAX_RESULTS_PER_TOPIC,
            display_limit: DEFAULT_DISPLAY_LIMIT,
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            summary_path: PathBuf::from(DEFAULT_SUMMARY_PATH),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            site_filter: DEFAULT_SITE_FILTER.to_string(),
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.topics.is_empty() {
            return Err(MonitorError::InvalidConfig("no topics configured".into()));
        }
        if self.topics.iter().any(|topic| topic.trim().is_empty()) {
            return Err(MonitorError::InvalidConfig("blank topic".into()));
        }
        if self.max_results_per_topic == 0 {
            return Err(MonitorError::InvalidConfig(
                "max_results_per_topic must be at least 1".into(),
            ));
        }
        if self.display_limit == 0 {
            return Err(MonitorError::InvalidConfig(
                "display_limit must be at least 1".into(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(MonitorError::InvalidConfig(
                "request_timeout must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MonitorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.topics.len(), 4);
        assert_eq!(config.topics[0], "\"Russian Navy\" OR \"VMF\"");
        assert_eq!(config.history_path, PathBuf::from("data/tweets.json"));
    }

    #[test]
    fn test_validate_rejects_empty_topics() {
        let config = MonitorConfig {
            topics: Vec::new(),
            ..MonitorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MonitorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_topic() {
        let config = MonitorConfig {
            topics: vec!["  ".to_string()],
            ..MonitorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_caps() {
        let config = MonitorConfig {
            max_results_per_topic: 0,
            ..MonitorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MonitorConfig {
            display_limit: 0,
            ..MonitorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
