use std::env;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Process-wide settings for talking to the model API.
///
/// The key is never validated up front; a missing or rejected key shows up as
/// an authentication failure on the first call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenerConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl ScreenerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Reads `GEMINI_API_KEY` (or `API_KEY`) and an optional `GEMINI_MODEL`.
    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .unwrap_or_default();
        let config = Self::new(api_key);
        match env::var("GEMINI_MODEL") {
            Ok(model) if !model.trim().is_empty() => config.with_model(model.trim()),
            _ => config,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
