use super::script_repository::ScriptRepository;
use super::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "Gemini";

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Gemini `generateContent` implementation of the script repository
pub struct GeminiScriptRepository {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    settings: GenerationSettings,
}

impl GeminiScriptRepository {
    pub fn new(api_key: String, base_url: String, settings: GenerationSettings) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.settings.model
        )
    }
}

#[async_trait]
impl ScriptRepository for GeminiScriptRepository {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            model = %self.settings.model,
            temperature = self.settings.temperature,
            max_output_tokens = self.settings.max_output_tokens,
            prompt_length = prompt.len(),
            "Calling Gemini generateContent"
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                max_output_tokens: self.settings.max_output_tokens,
            },
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let err = ProviderError::from_status(PROVIDER, status, &error_text);
            tracing::error!(error = %err, model = %self.settings.model, "Gemini call failed");
            return Err(err);
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("Failed to parse Gemini response: {}", e)))?;

        let script = extract_text(body)?;

        tracing::info!(
            provider = "gemini",
            model = %self.settings.model,
            latency_ms = start_time.elapsed().as_millis(),
            script_length = script.len(),
            word_count = script.split_whitespace().count(),
            "Script generated"
        );

        Ok(script)
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}

/// Join the text parts of the first candidate
fn extract_text(body: GenerateContentResponse) -> Result<String, ProviderError> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Malformed("Gemini returned no candidates".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(ProviderError::Malformed(format!(
            "Gemini returned no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text.to_string())
}
