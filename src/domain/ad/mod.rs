pub mod dto;
pub mod duration;
pub mod error;
pub mod prompt;
pub mod service;

pub use dto::{AdRequest, GeneratedAd};
pub use duration::DurationPolicy;
pub use error::AdServiceError;
pub use prompt::build_marketing_prompt;
pub use service::{AdStudioApi, AdStudioService};
