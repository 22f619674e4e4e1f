use thiserror::Error;

/// The LLM capability itself failed (transport, auth, rate limit, ...).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Other(String),
}

/// Why one inscription produced no usable extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// No `{ ... }` span, or the span is not valid JSON.
    #[error("JSON parse error: {message}")]
    Parse { message: String, raw_response: String },

    /// Valid JSON, wrong shape.
    #[error("response does not match the extraction schema: {0}")]
    Schema(#[source] serde_json::Error),
}
