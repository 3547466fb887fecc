use crate::error::DocsumError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default chunk bound in characters
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 15_000;

/// Default upload limit (16 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// docsum application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Credential for the generation capability; `None` disables summarization
    #[serde(skip_serializing)]
    pub cohere_api_key: Option<String>,

    /// Cohere API base URL
    pub cohere_base_url: String,

    /// Cohere model name (provider default when unset)
    pub cohere_model: Option<String>,

    /// HTTP timeout for a single generation call
    pub generation_timeout_secs: u64,

    /// Maximum chunk length in characters
    pub max_chunk_chars: usize,

    /// Number of per-chunk generation calls in flight at once
    pub summary_concurrency: usize,

    /// Directory for transient upload files
    pub upload_dir: PathBuf,

    /// Maximum upload size in bytes
    pub max_upload_bytes: usize,

    /// Static front-end directory
    pub static_dir: PathBuf,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cohere_api_key: None,
            cohere_base_url: "https://api.cohere.ai".to_string(),
            cohere_model: None,
            generation_timeout_secs: 300,
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            summary_concurrency: 1,
            upload_dir: PathBuf::from("./uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            static_dir: PathBuf::from("./static"),
            server_host: "127.0.0.1".to_string(),
            server_port: 5000,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, DocsumError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let config = Self::from_lookup(|key| std::env::var(key).ok());

        // Ensure required directories exist
        config.ensure_directories()?;

        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            cohere_api_key: non_empty("COHERE_API_KEY"),
            cohere_base_url: non_empty("COHERE_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.cohere_base_url),
            cohere_model: non_empty("COHERE_MODEL"),
            generation_timeout_secs: parse_var(&lookup, "GENERATION_TIMEOUT_SECS")
                .unwrap_or(defaults.generation_timeout_secs),
            max_chunk_chars: parse_var(&lookup, "MAX_CHUNK_CHARS").unwrap_or(defaults.max_chunk_chars),
            summary_concurrency: parse_var(&lookup, "SUMMARY_CONCURRENCY")
                .unwrap_or(defaults.summary_concurrency),
            upload_dir: non_empty("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES").unwrap_or(defaults.max_upload_bytes),
            static_dir: non_empty("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            server_host: non_empty("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var(&lookup, "PORT")
                .or_else(|| parse_var(&lookup, "SERVER_PORT"))
                .unwrap_or(defaults.server_port),
            log_dir: non_empty("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: non_empty("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), DocsumError> {
        for dir in [&self.upload_dir, &self.log_dir] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    DocsumError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Whether a generation credential is present
    pub fn has_generation_credential(&self) -> bool {
        self.cohere_api_key.is_some()
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    ///
    /// A missing credential is not a validation failure: the server still
    /// starts and reports the problem on `/summarize`.
    pub fn validate(&self) -> Result<(), DocsumError> {
        if !self.cohere_base_url.starts_with("http://")
            && !self.cohere_base_url.starts_with("https://")
        {
            return Err(DocsumError::config(
                "Cohere base URL must start with http:// or https://",
            ));
        }

        if self.server_port == 0 {
            return Err(DocsumError::config("Server port cannot be 0"));
        }

        if self.max_chunk_chars == 0 {
            return Err(DocsumError::config("MAX_CHUNK_CHARS must be positive"));
        }

        if self.summary_concurrency == 0 {
            return Err(DocsumError::config("SUMMARY_CONCURRENCY must be positive"));
        }

        if self.max_upload_bytes == 0 {
            return Err(DocsumError::config("MAX_UPLOAD_BYTES must be positive"));
        }

        Ok(())
    }
}

/// Parse a numeric variable, ignoring blank or malformed values
fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}
