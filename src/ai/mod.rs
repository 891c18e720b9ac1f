// AI module for Gemini API integration and song recommendations
//
// This module provides:
// - Gemini API client with schema-constrained JSON output
// - API credential loading from the environment
// - Prompt template and response schema for commute playlists

pub mod credentials;
pub mod gemini_client;
pub mod prompt;

use async_trait::async_trait;

use gemini_client::{RecommendError, RecommendationResponse};

/// Source of song recommendations. The Gemini client is the production
/// implementation; tests substitute a mock.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn fetch_recommendations(
        &self,
        theme: &str,
    ) -> Result<RecommendationResponse, RecommendError>;
}

// Re-export commonly used types
pub use credentials::ApiCredentials;
pub use gemini_client::{Category, GeminiClient, Song};
