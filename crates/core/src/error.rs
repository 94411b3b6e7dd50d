/// Errors raised while monitoring topics.
///
/// Transport and status failures are absorbed per topic by the orchestrator;
/// the rest propagate to the caller and abort the run.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
