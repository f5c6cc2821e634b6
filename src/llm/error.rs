use reqwest::StatusCode;
use thiserror::Error;

/// Result alias for the LLM subsystem.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Unified error for provider calls. Call sites only ever see this type,
/// so providers can be added or reordered without touching them.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The provider's API key is missing from the configuration.
    #[error("{0} API 키가 설정되지 않음")]
    MissingApiKey(&'static str),

    /// Underlying HTTP transport error.
    #[error("transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("HTTP {status} from {model}: {snippet}")]
    HttpStatus {
        status: StatusCode,
        model: String,
        snippet: String,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response shape from {model}")]
    Decode { model: String },

    /// Every model in the fallback chain failed; carries the last cause.
    #[error("모든 AI 모델 호출 실패 (last: {last})")]
    ChainExhausted { last: String },
}
