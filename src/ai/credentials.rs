// API credential loading for the Gemini client
//
// The key is read from the process environment exactly once at startup and
// carried as an immutable value; nothing looks it up again at call time.

const API_KEY_ENV: &str = "GEMINI_API_KEY";
const API_KEY_ENV_FALLBACK: &str = "API_KEY";

#[derive(Debug, Clone)]
pub struct ApiCredentials {
    api_key: String,
}

impl ApiCredentials {
    /// Read the API key from the environment.
    /// A missing key yields empty credentials; the request is still made and
    /// rejected by the provider rather than short-circuited here.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .or_else(|_| std::env::var(API_KEY_ENV_FALLBACK))
            .unwrap_or_default();

        Self { api_key }
    }

    pub fn from_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Whether a non-empty key is present. Used by the frontend to warn
    /// before the first request instead of failing at the provider.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_key() {
        let creds = ApiCredentials::from_key("test-key-123");
        assert_eq!(creds.api_key(), "test-key-123");
        assert!(creds.is_configured());
    }

    #[test]
    fn test_empty_key_is_unconfigured() {
        assert!(!ApiCredentials::from_key("").is_configured());
        assert!(!ApiCredentials::from_key("   ").is_configured());
    }
}
