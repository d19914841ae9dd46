use crate::domain::catalog::CatalogError;
use crate::error::AppError;
use crate::infrastructure::repositories::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum AdServiceError {
    #[error("invalid input: {0}")]
    Invalid(#[from] CatalogError),
    #[error("script generation failed: {0}")]
    Generation(#[source] ProviderError),
    #[error("speech synthesis failed: {0}")]
    Synthesis(#[source] ProviderError),
    #[error("failed to store audio: {0}")]
    Storage(#[from] std::io::Error),
}

impl AdServiceError {
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            AdServiceError::Generation(e) | AdServiceError::Synthesis(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AdServiceError> for AppError {
    fn from(err: AdServiceError) -> Self {
        match &err {
            AdServiceError::Invalid(e) => AppError::BadRequest(e.to_string()),
            AdServiceError::Generation(ProviderError::Configuration(_))
            | AdServiceError::Synthesis(ProviderError::Configuration(_)) => {
                AppError::ServiceUnavailable(err.to_string())
            }
            AdServiceError::Generation(_) | AdServiceError::Synthesis(_) => {
                AppError::ExternalService(err.to_string())
            }
            AdServiceError::Storage(_) => AppError::Internal(err.to_string()),
        }
    }
}
