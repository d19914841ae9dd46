pub mod credentials;
pub mod token_provider;

pub use credentials::{write_credentials_file, CredentialsError, ServiceAccountKey};
pub use token_provider::GoogleTokenProvider;
