use reqwest::StatusCode;

/// Failure talking to an external provider (Gemini, Google Cloud TTS, OAuth).
///
/// Variants separate credential problems from transient outages so a retry
/// policy can be added later without touching the pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// Bad or missing credentials, permission denied
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Transport failure, rate limit or provider-side outage
    #[error("transient error: {0}")]
    Transient(String),
    /// The provider refused the request
    #[error("request rejected: {0}")]
    Rejected(String),
    /// Response could not be understood or carried no content
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ProviderError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::Transient(_))
    }

    /// Classify a non-success HTTP status
    pub fn from_status(provider: &str, status: StatusCode, body: &str) -> Self {
        let message = format!("{} returned {}: {}", provider, status.as_u16(), body.trim());
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Configuration(message),
            StatusCode::TOO_MANY_REQUESTS | StatusCode::REQUEST_TIMEOUT => {
                ProviderError::Transient(message)
            }
            s if s.is_server_error() => ProviderError::Transient(message),
            _ => ProviderError::Rejected(message),
        }
    }

    pub fn from_transport(provider: &str, err: reqwest::Error) -> Self {
        ProviderError::Transient(format!("{} request failed: {}", provider, err))
    }
}
