use super::ProviderError;
use async_trait::async_trait;

/// Repository for script generation.
/// Abstracts the underlying text-generation provider (Gemini, ...).
#[async_trait]
pub trait ScriptRepository: Send + Sync {
    /// Generate an ad script for the given prompt
    ///
    /// Returns the generated text with surrounding whitespace removed.
    /// Failures are returned as-is; implementations do not retry.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Model identifier, for logging and readiness checks
    fn model(&self) -> &str;
}
