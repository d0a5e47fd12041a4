mod config;
mod phrase;

pub use config::Config;
pub use phrase::{Frequency, Phrase};

/// Response for the completion API.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CompletionResults {
    pub query: String,
    pub results: Vec<String>,
    pub total: usize,
}

/// Corpus stats.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Stats {
    pub phrases: usize,
    pub loaded: bool,
}
