//! AI track commentary via the Gemini API.
//!
//! Given a track's metadata, asks the model for a short Traditional
//! Chinese commentary a fan page could quote. The service wrapper
//! [`song_insight`] never fails: every error path collapses into a
//! fixed user-facing placeholder string, because commentary is garnish,
//! not data.

pub mod client;
mod dto;

pub use client::GeminiClient;

use async_trait::async_trait;

use crate::model::Track;

/// Shown when no API key is configured.
pub const KEY_MISSING: &str = "Gemini API Key 缺失，請設定環境變數。";
/// Shown when the model returned an empty candidate.
pub const EMPTY_RESPONSE: &str = "目前無法生成解析。";
/// Shown when the request failed outright.
pub const UNAVAILABLE: &str = "AI 解析暫時不可用。";

/// Insight generation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InsightError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited by the API")]
    RateLimited,

    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

/// Trait for the text-generation backend.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait InsightApi: Send + Sync {
    /// Generate text for a prompt.
    async fn generate(&self, prompt: &str) -> Result<String, InsightError>;
}

#[async_trait]
impl InsightApi for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        self.generate(prompt).await
    }
}

/// Build the commentary prompt from a track's metadata.
pub fn build_prompt(track: &Track) -> String {
    let languages = track
        .languages
        .iter()
        .map(|l| l.label())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a music critic and cultural expert assisting the artist \"{artist}\".\n\
         Analyze the song metadata below and provide a creative, engaging insight \
         about the song's potential meaning, cultural context, or production style.\n\
         Please write the response in Traditional Chinese (繁體中文).\n\
         Keep it brief (under 100 words) and inspiring for fans.\n\
         \n\
         Song Title: {title}\n\
         Artist: {artist}\n\
         Languages: {languages}\n\
         Project Type: {project}\n\
         Description: {description}\n",
        artist = track.artist,
        title = track.title,
        languages = languages,
        project = track.project,
        description = track
            .description
            .as_deref()
            .unwrap_or("No description provided."),
    )
}

/// Ask for commentary on `track`; always yields displayable text.
pub async fn song_insight<A: InsightApi>(api: &A, track: &Track) -> String {
    match api.generate(&build_prompt(track)).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => EMPTY_RESPONSE.to_string(),
        Err(e) => {
            tracing::error!("Insight request failed: {e}");
            UNAVAILABLE.to_string()
        }
    }
}
