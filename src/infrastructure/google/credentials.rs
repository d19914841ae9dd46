use serde::Deserialize;
use std::path::Path;
use tokio::io::AsyncWriteExt;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("failed to write credentials file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to read credentials file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid service account JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The fields of a Google service-account key this service needs
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish()
    }
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> Result<Self, CredentialsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn from_file(path: &Path) -> Result<Self, CredentialsError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CredentialsError::Read {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json(&json)
    }
}

/// Write the service-account blob to `path`, replacing any previous file.
/// On Unix the file is readable by the owner only.
pub async fn write_credentials_file(path: &Path, json: &str) -> Result<(), CredentialsError> {
    let write_err = |source| CredentialsError::Write {
        path: path.display().to_string(),
        source,
    };

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await.map_err(write_err)?;
    file.write_all(json.as_bytes()).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;

    // mode() only applies on creation
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .await
            .map_err(write_err)?;
    }

    Ok(())
}
