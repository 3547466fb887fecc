use docsum_llm::StyleParameters;
use serde::{Deserialize, Serialize};

/// Summarize request body
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    /// Text to summarize
    pub text: Option<String>,

    /// Summary length (default: medium)
    pub summary_length: Option<String>,

    /// Summary format (default: paragraph)
    pub summary_type: Option<String>,

    /// Content focus (default: balanced)
    pub focus: Option<String>,

    /// Tone (default: neutral)
    pub tone: Option<String>,
}

impl SummarizeRequest {
    /// Style parameters with defaults for omitted fields
    pub fn style(&self) -> StyleParameters {
        let defaults = StyleParameters::default();
        StyleParameters {
            length: self.summary_length.clone().unwrap_or(defaults.length),
            format: self.summary_type.clone().unwrap_or(defaults.format),
            focus: self.focus.clone().unwrap_or(defaults.focus),
            tone: self.tone.clone().unwrap_or(defaults.tone),
        }
    }
}

/// Summarize response
#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    /// Final summary
    pub summary: String,
}

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Always true
    pub success: bool,

    /// Extracted text
    pub text: String,

    /// Sanitized filename
    pub filename: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub generation_configured: bool,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_defaults_for_missing_fields() {
        let req: SummarizeRequest =
            serde_json::from_str(r#"{"text": "hi", "tone": "casual"}"#).unwrap();
        let style = req.style();

        assert_eq!(style.length, "medium");
        assert_eq!(style.format, "paragraph");
        assert_eq!(style.focus, "balanced");
        assert_eq!(style.tone, "casual");
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let req: SummarizeRequest =
            serde_json::from_str(r#"{"text": "hi", "summary_length": null}"#).unwrap();
        assert_eq!(req.style().length, "medium");
    }
}
