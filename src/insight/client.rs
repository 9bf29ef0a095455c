//! Gemini HTTP client
//!
//! Handles communication with the Gemini generateContent endpoint.
//! See: https://ai.google.dev/api/generate-content
//!
//! The API key travels in the `x-goog-api-key` header, never in the URL,
//! so it cannot leak into logs.

use super::dto;
use super::InsightError;

/// Model used for track commentary
const MODEL: &str = "gemini-2.5-flash";

/// User agent string
const USER_AGENT: &str = concat!("CatalogMinder/", env!("CARGO_PKG_VERSION"));

/// Gemini API client
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let mut client = Self::new(api_key);
        client.base_url = base_url.into();
        client
    }

    /// Generate text for a prompt and return the first candidate.
    pub async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        let response = self.send_generate_request(prompt).await?;
        Ok(response.first_candidate_text())
    }

    /// Send the HTTP request and parse the response
    async fn send_generate_request(
        &self,
        prompt: &str,
    ) -> Result<dto::GenerateContentResponse, InsightError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, MODEL);
        let body = dto::GenerateContentRequest::from_prompt(prompt);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(InsightError::RateLimited);
        }

        if !status.is_success() {
            // Try to parse the structured error body
            if let Ok(parsed) = response.json::<dto::GenerateContentResponse>().await
                && let Some(error) = parsed.error
            {
                return Err(InsightError::ApiError(error.message));
            }
            return Err(InsightError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<dto::GenerateContentResponse>()
            .await
            .map_err(|e| InsightError::Parse(e.to_string()))
    }
}
