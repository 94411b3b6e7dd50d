use monitor_core::config::MonitorConfig;
use monitor_core::error::MonitorError;
use monitor_core::ports::{Result, SearchClient};
use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

// Plain browser identification; automated-looking clients get blocked
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
/// Past 24 hours
const RECENCY_FILTER: &str = "qdr:d";

/// Builds the result-page URL for a topic, restricted to the configured site and the last day
pub fn build_search_url(endpoint: &str, site_filter: &str, topic: &str) -> Result<Url> {
    let query = format!("{site_filter} {topic}");
    Url::parse_with_params(endpoint, &[("q", query.trim()), ("tbs", RECENCY_FILTER)]).map_err(
        |err| MonitorError::InvalidConfig(format!("invalid search endpoint {endpoint}: {err}")),
    )
}

/// Queries a general search engine for recently indexed posts.
/// One GET per topic, bounded by the configured timeout, never retried.
pub struct GoogleSearchClient {
    client: Client,
    endpoint: String,
    site_filter: String,
}

impl GoogleSearchClient {
    pub fn new(config: &MonitorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|err| MonitorError::Transport(format!("failed to build HTTP client: {err}")))?;

        // Fail on a bad endpoint at startup rather than once per topic
        build_search_url(&config.search_endpoint, &config.site_filter, "")?;

        Ok(Self {
            client,
            endpoint: config.search_endpoint.clone(),
            site_filter: config.site_filter.clone(),
        })
    }
}

impl SearchClient for GoogleSearchClient {
    fn search(&self, topic: &str) -> Result<String> {
        let url = build_search_url(&self.endpoint, &self.site_filter, topic)?;
        debug!(%url, "fetching results");

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .send()
            .map_err(|err| MonitorError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MonitorError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .map_err(|err| MonitorError::Transport(format!("failed to read response body: {err}")))
    }
}
