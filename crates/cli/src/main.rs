use clap::Parser;
use json_adapter::JsonHistoryStore;
use markdown_adapter::MarkdownSummaryRenderer;
use monitor_core::application::{MonitorService, RunSummary, TopicReport};
use monitor_core::config::MonitorConfig;
use monitor_core::ports::{HistoryStore, MarkdownWriter, ResultExtractor, SearchClient};
use search_adapter::{AnchorExtractor, GoogleSearchClient};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Searches for recently indexed posts about naval activity and keeps a deduplicated summary
#[derive(Parser, Debug)]
#[command(name = "naval-monitor")]
#[command(about = "Tracks recently indexed social-media posts on Russian and Chinese naval activity")]
struct Cli {
    /// Path of the persisted history file
    #[arg(long = "history-file")]
    history_file: Option<PathBuf>,

    /// Path where the Markdown summary will be written
    #[arg(long = "summary-file")]
    summary_file: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> MonitorConfig {
        let mut config = MonitorConfig::default();
        if let Some(history_file) = self.history_file {
            config.history_path = history_file;
        }
        if let Some(summary_file) = self.summary_file {
            config.summary_path = summary_file;
        }
        config
    }
}

fn build_service(config: MonitorConfig) -> monitor_core::ports::Result<MonitorService> {
    config.validate()?;

    // Instantiate concrete implementations of secondary adapters
    let search_client: Box<dyn SearchClient> = Box::new(GoogleSearchClient::new(&config)?);
    let extractor: Box<dyn ResultExtractor> = Box::new(AnchorExtractor::new());
    let history_store: Box<dyn HistoryStore> =
        Box::new(JsonHistoryStore::new(config.history_path.clone()));
    let markdown_writer: Box<dyn MarkdownWriter> = Box::new(MarkdownSummaryRenderer::new(
        config.summary_path.clone(),
        config.display_limit,
    ));

    Ok(MonitorService::new(
        config,
        search_client,
        extractor,
        history_store,
        markdown_writer,
    ))
}

// Failed topics were already logged when their search failed
fn searched_topics(summary: &RunSummary) -> impl Iterator<Item = &TopicReport> {
    summary.topics.iter().filter(|topic| topic.error.is_none())
}

fn report(summary: &RunSummary) {
    for topic in searched_topics(summary) {
        tracing::info!(
            topic = %topic.topic,
            candidates = topic.candidates,
            accepted = topic.accepted,
            "topic searched"
        );
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Cli::parse().into_config();

    let service = match build_service(config) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("Error during startup: {}", e);
            std::process::exit(1);
        }
    };

    match service.execute() {
        Ok(summary) => {
            report(&summary);
            if summary.persisted {
                tracing::info!(
                    new = summary.new_records,
                    total = summary.total_records,
                    "Updated {} and {}",
                    service.config().history_path.display(),
                    service.config().summary_path.display()
                );
            }
        }
        Err(e) => {
            tracing::error!("Error during monitoring run: {}", e);
            std::process::exit(1);
        }
    }
}
