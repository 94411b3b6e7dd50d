use crate::domain::{known_urls, KnownUrls, Record};
use crate::error::MonitorError;
use chrono::NaiveDate;

pub type Result<T> = std::result::Result<T, MonitorError>;

/// Issues one recency-scoped search for a topic and returns the raw result page.
pub trait SearchClient {
    fn search(&self, topic: &str) -> Result<String>;
}

/// Turns a result page into candidate records, in page order, capped at `max_results`.
pub trait ResultExtractor {
    fn extract(
        &self,
        markup: &str,
        topic: &str,
        date: NaiveDate,
        max_results: usize,
    ) -> Vec<Record>;
}

pub trait HistoryStore {
    // A missing or corrupt history yields an empty collection
    fn load(&self) -> Vec<Record>;

    fn save(&self, records: &[Record]) -> Result<()>;

    fn known_urls(&self, records: &[Record]) -> KnownUrls {
        known_urls(records)
    }
}

/// Trait for writing the markdown summary
/// This is a port (interface) that defines how the core communicates with output adapters
pub trait MarkdownWriter: Send + Sync {
    fn write(&self, records: &[Record]) -> Result<()>;
}
