use crate::domain::ad::DurationPolicy;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const SERVICE_ACCOUNT_JSON: &str = "GCP_VI_SERVICE_ACCOUNT_JSON";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Gemini
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_temperature: f32,
    pub gemini_max_output_tokens: u32,
    pub gemini_base_url: String,
    // Google Cloud Text-to-Speech
    pub service_account_json: String,
    pub tts_base_url: String,
    pub credentials_path: PathBuf,
    // Pipeline
    pub audio_output_path: PathBuf,
    pub duration_policy: DurationPolicy,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    /// Load configuration from the process environment (and `.env` if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let or_default =
            |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let config = Config {
            host: or_default("HOST", "0.0.0.0"),
            port: parse("PORT", or_default("PORT", "7860"))?,
            environment: match or_default("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match or_default("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            google_api_key: required(GOOGLE_API_KEY)?,
            gemini_model: or_default("GEMINI_MODEL", "gemini-2.5-flash"),
            gemini_temperature: parse("GEMINI_TEMPERATURE", or_default("GEMINI_TEMPERATURE", "0.85"))?,
            gemini_max_output_tokens: parse(
                "GEMINI_MAX_OUTPUT_TOKENS",
                or_default("GEMINI_MAX_OUTPUT_TOKENS", "1024"),
            )?,
            gemini_base_url: or_default(
                "GEMINI_API_BASE_URL",
                "https://generativelanguage.googleapis.com",
            ),
            service_account_json: required(SERVICE_ACCOUNT_JSON)?,
            tts_base_url: or_default(
                "GOOGLE_TTS_BASE_URL",
                "https://texttospeech.googleapis.com",
            ),
            credentials_path: or_default("TTS_CREDENTIALS_PATH", "tts_credentials.json").into(),
            audio_output_path: or_default("AUDIO_OUTPUT_PATH", "audio.mp3").into(),
            duration_policy: {
                let value = or_default("DURATION_POLICY", "proportional");
                DurationPolicy::from_name(&value).ok_or(ConfigError::Invalid {
                    name: "DURATION_POLICY",
                    value,
                })?
            },
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}
