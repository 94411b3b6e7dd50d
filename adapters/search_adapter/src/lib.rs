//! Search-engine side of the monitor: fetching result pages and pulling post links out of them.

mod client;
mod extractor;

pub use client::{build_search_url, GoogleSearchClient};
pub use extractor::AnchorExtractor;
