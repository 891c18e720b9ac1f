// Gemini API client for structured song recommendations
//
// Implements communication with Google's Gemini generateContent API:
// - Single-shot content generation with a declared response schema
// - JSON extraction and schema-validating decode of the model output

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ai::credentials::ApiCredentials;
use crate::ai::prompt;
use crate::ai::RecommendationSource;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-3-flash-preview";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Song category: domestic (K-POP) or international (GLOBAL)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "K-POP")]
    KPop,
    #[serde(rename = "GLOBAL")]
    Global,
}

/// A single recommended song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub category: Category,
    pub reason: String,
    pub youtube_url: String,
}

/// A full recommendation list as returned by the model.
/// `songs` is in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub date: String,
    pub theme: String,
    pub songs: Vec<Song>,
}

/// Failure modes of a recommendation call. Callers treat all variants as
/// "the call failed"; the distinction is for diagnostic logging.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("model returned no text")]
    EmptyResponse,
    #[error("malformed recommendation payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

// ─── Gemini wire types ───

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

pub struct GeminiClient {
    credentials: ApiCredentials,
    client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client with the given credentials.
    /// Constructed once at startup and shared; see `run()`.
    pub fn new(credentials: ApiCredentials) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            credentials,
            client,
        }
    }

    /// Send one generateContent request and return the model's text output.
    async fn generate(
        &self,
        instruction: String,
        response_schema: serde_json::Value,
    ) -> Result<String, RecommendError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![Part { text: instruction }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema,
            },
        };

        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, GEMINI_MODEL);
        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-goog-api-key", self.credentials.api_key())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RecommendError::Api { status, body });
        }

        let generated: GenerateContentResponse = response.json().await?;

        // Concatenate text parts of the first candidate
        let text = generated
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(RecommendError::EmptyResponse);
        }

        Ok(text)
    }

    /// Strip a markdown code fence if the model wrapped its JSON in one.
    /// With a JSON response MIME type this is rare, but it still happens.
    fn extract_json(text: &str) -> &str {
        if let Some(start) = text.find("```json") {
            let json_start = start + 7;
            if let Some(end) = text[json_start..].find("```") {
                return text[json_start..json_start + end].trim();
            }
        }

        if let Some(start) = text.find("```\n") {
            let json_start = start + 4;
            if let Some(end) = text[json_start..].find("```") {
                return text[json_start..json_start + end].trim();
            }
        }

        text.trim()
    }
}

#[async_trait]
impl RecommendationSource for GeminiClient {
    /// Fetch a 7-song commute list for the given theme.
    /// One outbound call, no retry, no caching.
    async fn fetch_recommendations(
        &self,
        theme: &str,
    ) -> Result<RecommendationResponse, RecommendError> {
        let instruction = prompt::build_recommendation_prompt(theme);
        let schema = prompt::recommendation_schema();

        let text = self.generate(instruction, schema).await?;
        let json_text = Self::extract_json(&text);

        serde_json::from_str::<RecommendationResponse>(json_text).map_err(RecommendError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> &'static str {
        r#"{
          "date": "2024-05-20",
          "theme": "퇴근길 시티팝",
          "songs": [
            {
              "title": "Love Lee",
              "artist": "AKMU",
              "category": "K-POP",
              "reason": "가벼운 발걸음에 어울리는 멜로디",
              "youtubeUrl": "https://www.youtube.com/results?search_query=AKMU+Love+Lee"
            },
            {
              "title": "Plastic Love",
              "artist": "Mariya Takeuchi",
              "category": "GLOBAL",
              "reason": "City pop classic for the ride home",
              "youtubeUrl": "https://www.youtube.com/results?search_query=Mariya+Takeuchi+Plastic+Love"
            }
          ]
        }"#
    }

    #[test]
    fn test_parse_recommendation_payload() {
        let parsed: RecommendationResponse = serde_json::from_str(sample_payload()).unwrap();
        assert_eq!(parsed.theme, "퇴근길 시티팝");
        assert_eq!(parsed.songs.len(), 2);
        assert_eq!(parsed.songs[0].category, Category::KPop);
        assert_eq!(parsed.songs[1].category, Category::Global);
        assert!(parsed.songs[0].youtube_url.contains("search_query=AKMU"));
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        let payload = r#"{
          "date": "2024-05-20",
          "theme": "x",
          "songs": [
            {
              "title": "t",
              "artist": "a",
              "category": "J-POP",
              "reason": "r",
              "youtubeUrl": "u"
            }
          ]
        }"#;
        assert!(serde_json::from_str::<RecommendationResponse>(payload).is_err());
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        // No "songs" field at all: the decode must fail, not default to empty
        let payload = r#"{"date": "2024-05-20", "theme": "x"}"#;
        assert!(serde_json::from_str::<RecommendationResponse>(payload).is_err());
    }

    #[test]
    fn test_response_json_round_trip() {
        let original: RecommendationResponse = serde_json::from_str(sample_payload()).unwrap();
        let json = serde_json::to_string(&original).unwrap();
        let reparsed: RecommendationResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(original, reparsed);
    }

    #[test]
    fn test_song_serializes_camel_case() {
        let song = Song {
            title: "t".to_string(),
            artist: "a".to_string(),
            category: Category::KPop,
            reason: "r".to_string(),
            youtube_url: "https://www.youtube.com/results?search_query=a+t".to_string(),
        };
        let json = serde_json::to_string(&song).unwrap();
        assert!(json.contains("\"youtubeUrl\""));
        assert!(json.contains("\"K-POP\""));
    }

    #[test]
    fn test_extract_json_from_markdown() {
        let text = "Here you go:\n\n```json\n{\"date\": \"d\"}\n```\n";
        assert_eq!(GeminiClient::extract_json(text), "{\"date\": \"d\"}");
    }

    #[test]
    fn test_extract_json_raw() {
        let text = r#"{"date": "d", "theme": "t", "songs": []}"#;
        assert_eq!(GeminiClient::extract_json(text), text);
    }
}
