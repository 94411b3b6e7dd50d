use crate::config::MonitorConfig;
use crate::domain::{KnownUrls, Record};
use crate::ports::{HistoryStore, MarkdownWriter, ResultExtractor, Result, SearchClient};
use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

/// Outcome of searching a single topic
#[derive(Debug, Clone, PartialEq)]
pub struct TopicReport {
    pub topic: String,
    pub candidates: usize,
    pub accepted: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub topics: Vec<TopicReport>,
    pub new_records: usize,
    pub total_records: usize,
    /// False when nothing new was found and no file was touched
    pub persisted: bool,
}

/// Keeps the candidates whose URL is not yet known, recording each accepted URL.
/// Duplicates inside `candidates` are dropped after the first occurrence.
pub fn accept_new(candidates: Vec<Record>, known: &mut KnownUrls) -> Vec<Record> {
    candidates
        .into_iter()
        .filter(|record| known.insert(&record.url))
        .collect()
}

/// Application service that searches every topic, dedupes against history and publishes the summary
pub struct MonitorService {
    config: MonitorConfig,
    search_client: Box<dyn SearchClient>,
    extractor: Box<dyn ResultExtractor>,
    history_store: Box<dyn HistoryStore>,
    markdown_writer: Box<dyn MarkdownWriter>,
}

impl MonitorService {
    /// Creates a new MonitorService with the given dependencies
    pub fn new(
        config: MonitorConfig,
        search_client: Box<dyn SearchClient>,
        extractor: Box<dyn ResultExtractor>,
        history_store: Box<dyn HistoryStore>,
        markdown_writer: Box<dyn MarkdownWriter>,
    ) -> Self {
        Self {
            config,
            search_client,
            extractor,
            history_store,
            markdown_writer,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Runs the pipeline with today's UTC date as the discovery date
    pub fn execute(&self) -> Result<RunSummary> {
        self.execute_on(Utc::now().date_naive())
    }

    /// Runs the pipeline: search each topic in order, keep unseen URLs, then persist and render.
    /// Nothing is written when no new record was accepted.
    pub fn execute_on(&self, date: NaiveDate) -> Result<RunSummary> {
        let existing = self.history_store.load();
        let mut known = self.history_store.known_urls(&existing);
        debug!(known = known.len(), "loaded history");

        let mut new_records = Vec::new();
        let topics = self
            .config
            .topics
            .iter()
            .map(|topic| self.collect_topic(topic, date, &mut known, &mut new_records))
            .collect::<Vec<_>>();

        if new_records.is_empty() {
            info!("No new relevant items found today.");
            return Ok(RunSummary {
                topics,
                new_records: 0,
                total_records: existing.len(),
                persisted: false,
            });
        }

        info!("Found {} new items.", new_records.len());
        let new_count = new_records.len();
        let mut merged = new_records;
        merged.extend(existing);

        self.history_store.save(&merged)?;
        self.markdown_writer.write(&merged)?;

        Ok(RunSummary {
            topics,
            new_records: new_count,
            total_records: merged.len(),
            persisted: true,
        })
    }

    /// Searches one topic and appends its unseen records to `new_records`.
    /// A failed search counts as zero candidates and never aborts the run.
    pub fn collect_topic(
        &self,
        topic: &str,
        date: NaiveDate,
        known: &mut KnownUrls,
        new_records: &mut Vec<Record>,
    ) -> TopicReport {
        info!("Searching for: {topic}...");

        let markup = match self.search_client.search(topic) {
            Ok(markup) => markup,
            Err(err) => {
                warn!(topic, error = %err, "search failed");
                return TopicReport {
                    topic: topic.to_string(),
                    candidates: 0,
                    accepted: 0,
                    error: Some(err.to_string()),
                };
            }
        };

        let candidates = self.extractor.extract(
            &markup,
            topic,
            date,
            self.config.max_results_per_topic,
        );
        let candidate_count = candidates.len();
        let accepted = accept_new(candidates, known);
        debug!(topic, candidates = candidate_count, accepted = accepted.len(), "topic done");

        let accepted_count = accepted.len();
        new_records.extend(accepted);

        TopicReport {
            topic: topic.to_string(),
            candidates: candidate_count,
            accepted: accepted_count,
            error: None,
        }
    }
}
