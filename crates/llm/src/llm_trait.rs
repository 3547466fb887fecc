use async_trait::async_trait;
use docsum_common::Result;

use crate::types::GenerateRequest;

/// Text-completion capability the summarizer delegates to
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate text from a prompt
    async fn generate(&self, request: GenerateRequest) -> Result<String>;

    /// Test connection/availability
    async fn test_connection(&self) -> Result<bool>;
}
