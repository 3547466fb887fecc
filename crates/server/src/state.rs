use docsum_common::{AppConfig, DocsumError, Result};
use docsum_llm::{CohereClient, Summarizer};
use std::sync::Arc;
use tracing::{info, warn};

/// Summarizer availability, decided once at startup
enum SummarizerSlot {
    Ready(Arc<Summarizer>),
    Unavailable(String),
}

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    summarizer: SummarizerSlot,
}

impl AppState {
    /// Create new application state, building the Cohere-backed summarizer
    ///
    /// A missing credential does not fail startup; `/summarize` reports it.
    pub fn new(config: AppConfig) -> Self {
        let summarizer = match CohereClient::from_config(&config) {
            Ok(client) => {
                info!("Summarization enabled");
                SummarizerSlot::Ready(Arc::new(
                    Summarizer::new(Arc::new(client), config.max_chunk_chars)
                        .with_concurrency(config.summary_concurrency),
                ))
            }
            Err(e) => {
                warn!("Summarization disabled: {}", e);
                let reason = match e {
                    DocsumError::Config(msg) => msg,
                    other => other.to_string(),
                };
                SummarizerSlot::Unavailable(reason)
            }
        };

        Self { config, summarizer }
    }

    /// Create application state around an already constructed summarizer
    pub fn with_summarizer(config: AppConfig, summarizer: Summarizer) -> Self {
        Self {
            config,
            summarizer: SummarizerSlot::Ready(Arc::new(summarizer)),
        }
    }

    /// The summarizer, or the configuration error that disabled it
    pub fn summarizer(&self) -> Result<Arc<Summarizer>> {
        match &self.summarizer {
            SummarizerSlot::Ready(summarizer) => Ok(summarizer.clone()),
            SummarizerSlot::Unavailable(reason) => Err(DocsumError::config(reason.clone())),
        }
    }

    /// Whether `/summarize` can serve requests
    pub fn generation_configured(&self) -> bool {
        matches!(self.summarizer, SummarizerSlot::Ready(_))
    }
}
