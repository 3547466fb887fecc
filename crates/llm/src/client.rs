use async_trait::async_trait;
use docsum_common::{AppConfig, DocsumError, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::llm_trait::GenerationClient;
use crate::types::{CohereErrorResponse, CohereGenerateRequest, CohereGenerateResponse, GenerateRequest};

/// Cohere text-generation client
#[derive(Debug, Clone)]
pub struct CohereClient {
    base_url: String,
    api_key: String,
    model: Option<String>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct CheckApiKeyResponse {
    valid: bool,
}

impl CohereClient {
    /// Create new Cohere client
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DocsumError::config("Cohere API key cannot be empty"));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| DocsumError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!("Cohere client initialized: {}", base_url);
        Ok(Self {
            base_url,
            api_key,
            model,
            client,
        })
    }

    /// Build a client from configuration, failing when the credential is missing
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api_key = config.cohere_api_key.as_deref().ok_or_else(|| {
            DocsumError::config(
                "Cohere API key not configured properly. Please check server configuration.",
            )
        })?;

        Self::new(
            config.cohere_base_url.clone(),
            api_key,
            config.cohere_model.clone(),
            config.generation_timeout_secs,
        )
    }

    /// Single generate call; no retries
    pub async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let url = format!("{}/v1/generate", self.base_url);
        let body = CohereGenerateRequest::from_request(request, self.model.clone());

        debug!(
            "Sending generate request to Cohere - Model: {}, Prompt length: {}",
            body.model.as_deref().unwrap_or("default"),
            body.prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DocsumError::generation(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DocsumError::generation(api_error_message(status, &text)));
        }

        let result: CohereGenerateResponse = response
            .json()
            .await
            .map_err(|e| DocsumError::generation(format!("Failed to parse response: {}", e)))?;

        let text = result
            .generations
            .into_iter()
            .next()
            .map(|g| g.text)
            .ok_or_else(|| DocsumError::generation("Empty response from Cohere"))?;

        debug!("Received response from Cohere - Length: {}", text.len());
        Ok(text)
    }

    /// Check that the configured credential is accepted
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/v1/check-api-key", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| DocsumError::generation(format!("Failed to connect to Cohere: {}", e)))?;

        if !response.status().is_success() {
            return Ok(false);
        }

        let result: CheckApiKeyResponse = response
            .json()
            .await
            .map_err(|e| DocsumError::generation(format!("Failed to parse response: {}", e)))?;
        Ok(result.valid)
    }
}

#[async_trait]
impl GenerationClient for CohereClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        CohereClient::generate(self, request).await
    }

    async fn test_connection(&self) -> Result<bool> {
        CohereClient::test_connection(self).await
    }
}

fn api_error_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<CohereErrorResponse>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_string());

    if detail.is_empty() {
        format!("Cohere API error: {}", status)
    } else {
        format!("Cohere API error: {}: {}", status, detail)
    }
}
