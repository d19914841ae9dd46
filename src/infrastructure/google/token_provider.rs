use super::credentials::ServiceAccountKey;
use crate::infrastructure::repositories::ProviderError;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use moka::future::Cache;
use moka::Expiry;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Lifetime assumed when the token endpoint omits `expires_in`
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;
/// Tokens are dropped from the cache this long before Google expires them
const EXPIRY_MARGIN_SECS: u64 = 300;
const PROVIDER: &str = "Google OAuth";

#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    time_to_live: Duration,
}

impl CachedToken {
    fn from_response(token: TokenResponse) -> Self {
        let lifetime = token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        // Short-lived tokens keep at least half their lifetime
        let margin = EXPIRY_MARGIN_SECS.min(lifetime / 2);
        Self {
            access_token: token.access_token,
            time_to_live: Duration::from_secs(lifetime - margin),
        }
    }
}

/// Each cached token lives for its own `expires_in` minus the margin
struct TokenExpiry;

impl Expiry<&'static str, CachedToken> for TokenExpiry {
    fn expire_after_create(
        &self,
        _key: &&'static str,
        value: &CachedToken,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.time_to_live)
    }

    fn expire_after_update(
        &self,
        _key: &&'static str,
        value: &CachedToken,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.time_to_live)
    }
}

/// Mints OAuth access tokens for a service account via the JWT bearer grant
/// and reuses them until shortly before they expire
pub struct GoogleTokenProvider {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    http_client: reqwest::Client,
    cache: Cache<&'static str, CachedToken>,
}

impl GoogleTokenProvider {
    pub fn new(key: ServiceAccountKey) -> Result<Self, ProviderError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            ProviderError::Configuration(format!("Invalid service account private key: {}", e))
        })?;

        let cache = Cache::builder()
            .max_capacity(1)
            .expire_after(TokenExpiry)
            .build();

        Ok(Self {
            key,
            encoding_key,
            http_client: reqwest::Client::new(),
            cache,
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Return a valid bearer token, fetching a new one when none is cached
    pub async fn access_token(&self) -> Result<String, ProviderError> {
        if let Some(token) = self.cache.get(CLOUD_PLATFORM_SCOPE).await {
            return Ok(token.access_token);
        }

        let token = self.fetch_token().await?;
        let access_token = token.access_token.clone();
        self.cache.insert(CLOUD_PLATFORM_SCOPE, token).await;
        Ok(access_token)
    }

    /// Drop the cached token so the next call fetches a fresh one
    pub async fn invalidate(&self) {
        self.cache.invalidate(CLOUD_PLATFORM_SCOPE).await;
    }

    /// Build the signed assertion sent to the token endpoint
    pub fn sign_assertion(&self) -> Result<String, ProviderError> {
        let now = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: CLOUD_PLATFORM_SCOPE.to_string(),
            aud: self.key.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| ProviderError::Configuration(format!("Failed to sign assertion: {}", e)))
    }

    async fn fetch_token(&self) -> Result<CachedToken, ProviderError> {
        let assertion = self.sign_assertion()?;
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

        let response = self
            .http_client
            .post(&self.key.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            // The token endpoint answers 400 for revoked or unknown keys
            return Err(match ProviderError::from_status(PROVIDER, status, &error_text) {
                ProviderError::Rejected(msg) => ProviderError::Configuration(msg),
                other => other,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("Failed to parse token response: {}", e)))?;

        tracing::info!(
            client_email = %self.key.client_email,
            expires_in = ?token.expires_in,
            "Google access token issued"
        );

        Ok(CachedToken::from_response(token))
    }
}
