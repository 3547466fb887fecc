/// docsum error types
#[derive(Debug, thiserror::Error)]
pub enum DocsumError {
    /// Configuration error (e.g. missing generation credential)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or empty required input
    #[error("{0}")]
    InvalidInput(String),

    /// Upload with an extension outside the allowed set
    #[error("File type not supported. Allowed types: {0}")]
    UnsupportedFileType(String),

    /// Text extraction produced nothing usable
    #[error("{0}")]
    Extraction(String),

    /// Upload larger than the configured limit
    #[error("File too large. Maximum size is {limit} bytes")]
    FileTooLarge { limit: usize },

    /// Generation capability failed or returned an unusable result
    #[error("Generation error: {0}")]
    Generation(String),

    /// Orchestrator invoked without any chunk
    #[error("No text chunks to summarize")]
    EmptyInput,

    /// File system error
    #[error("File system error: {0}")]
    FileSystem(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DocsumError {
    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create unsupported file type error from the allowed extensions
    pub fn unsupported_file_type(allowed: &[&str]) -> Self {
        Self::UnsupportedFileType(allowed.join(", "))
    }

    /// Create extraction error
    pub fn extraction<S: Into<String>>(msg: S) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create generation error
    pub fn generation<S: Into<String>>(msg: S) -> Self {
        Self::Generation(msg.into())
    }

    /// Create file system error
    pub fn file_system<S: Into<String>>(msg: S) -> Self {
        Self::FileSystem(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

// HTTP response conversion
impl DocsumError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::UnsupportedFileType(_) => 400,
            Self::Extraction(_) => 400,
            Self::FileTooLarge { .. } => 413,
            Self::Config(_) => 500,
            Self::Generation(_) => 500,
            Self::EmptyInput => 500,
            Self::FileSystem(_) => 500,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 400,
            Self::Other(_) => 500,
        }
    }

    /// Whether the caller is at fault
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}
