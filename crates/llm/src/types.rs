use serde::{Deserialize, Serialize};

/// Provider-neutral generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Prompt text
    pub prompt: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Generation stops at the first of these sequences
    pub stop_sequences: Vec<String>,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// Cohere `/v1/generate` request body
#[derive(Debug, Clone, Serialize)]
pub struct CohereGenerateRequest {
    /// Model name (provider default when omitted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Prompt text
    pub prompt: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Stop sequences
    pub stop_sequences: Vec<String>,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Likelihood reporting (always "NONE")
    pub return_likelihoods: String,
}

impl CohereGenerateRequest {
    /// Wrap a generation request for the Cohere wire format
    pub fn from_request(request: GenerateRequest, model: Option<String>) -> Self {
        Self {
            model,
            prompt: request.prompt,
            temperature: request.temperature,
            stop_sequences: request.stop_sequences,
            max_tokens: request.max_tokens,
            return_likelihoods: "NONE".to_string(),
        }
    }
}

/// Cohere `/v1/generate` response body
#[derive(Debug, Clone, Deserialize)]
pub struct CohereGenerateResponse {
    /// Response id
    #[serde(default)]
    pub id: Option<String>,

    /// Generated candidates
    #[serde(default)]
    pub generations: Vec<CohereGeneration>,
}

/// A single generated candidate
#[derive(Debug, Clone, Deserialize)]
pub struct CohereGeneration {
    /// Generated text
    pub text: String,
}

/// Cohere error body
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CohereErrorResponse {
    pub message: String,
}

/// Summary style options
///
/// Values are opaque: they are passed verbatim into the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleParameters {
    /// Summary length (e.g. short, medium, long)
    pub length: String,

    /// Output format (e.g. paragraph, bullet)
    pub format: String,

    /// What content to emphasize
    pub focus: String,

    /// Voice of the summary
    pub tone: String,
}

impl Default for StyleParameters {
    fn default() -> Self {
        Self {
            length: "medium".to_string(),
            format: "paragraph".to_string(),
            focus: "balanced".to_string(),
            tone: "neutral".to_string(),
        }
    }
}
