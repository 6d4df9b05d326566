use crate::config::{ScreenerConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::gateway::{GenerationRequest, GenerativeModel, ModelError};
use crate::llm::types::*;
use log::{debug, warn};
use reqwest::Client;

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the key, keep it out of messages.
        ModelError::Transport(err.without_url().to_string())
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn from_config(config: &ScreenerConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) async fn generate_content(
        &self,
        payload: &GenerateContentRequest,
    ) -> Result<String, ModelError> {
        if self.api_key.trim().is_empty() {
            return Err(ModelError::MissingApiKey);
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        debug!(
            "POST models/{}:generateContent (tools: {}, structured: {})",
            self.model,
            payload.tools.len(),
            payload.generation_config.is_some()
        );

        let res = self.client.post(&url).json(payload).send().await?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await?;
            let message = match serde_json::from_str::<ApiErrorBody>(&err_text) {
                Ok(body) => body.error.message,
                Err(_) => err_text,
            };
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = res.json().await?;
        if let Some(reason) = body
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            warn!("Gemini blocked the prompt: {}", reason);
        }

        Ok(body.text())
    }
}

impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ModelError> {
        let payload = GenerateContentRequest::from(request);
        self.generate_content(&payload).await
    }
}
