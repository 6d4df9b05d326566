use std::future::Future;

use log::{debug, error, info, warn};
use serde_json::Value;
use thiserror::Error;

use crate::error::{Result, ScreenerError};
use crate::parsing::{parse_company_profile, parse_extracted_contact};
use crate::profile::{CompanyProfile, ExtractedContact};
use crate::prompts::{build_search_prompt, CARD_EXTRACTION_PROMPT};

/// Marker the API puts in the message of a rejected key.
pub const INVALID_KEY_MARKER: &str = "API key not valid";

/// Failure reported by a model backend, before the gateway classifies it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Transport(String),
}

impl ModelError {
    pub fn is_authentication(&self) -> bool {
        match self {
            ModelError::MissingApiKey => true,
            ModelError::Api { status, message } => {
                *status == 401 || message.contains(INVALID_KEY_MARKER)
            }
            ModelError::Transport(message) => message.contains(INVALID_KEY_MARKER),
        }
    }
}

/// Base64 image bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl InlineImage {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPart {
    Text(String),
    Image(InlineImage),
}

/// A single backend-agnostic generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub parts: Vec<RequestPart>,
    /// Lets the model run its own web searches before answering.
    pub web_search: bool,
    /// Asks the API to enforce this JSON shape on the reply.
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn grounded_text(prompt: impl Into<String>) -> Self {
        Self {
            parts: vec![RequestPart::Text(prompt.into())],
            web_search: true,
            response_schema: None,
        }
    }

    pub fn structured(parts: Vec<RequestPart>, schema: Value) -> Self {
        Self {
            parts,
            web_search: false,
            response_schema: Some(schema),
        }
    }

    pub fn prompt_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                RequestPart::Text(text) => Some(text.as_str()),
                RequestPart::Image(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The seam between the screener and a hosted model.
///
/// Implementations perform exactly one remote call per `generate` and return
/// the reply text, which may be empty.
pub trait GenerativeModel {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = std::result::Result<String, ModelError>> + Send;
}

pub fn validate_company_name(company_name: &str) -> Result<()> {
    if company_name.trim().is_empty() {
        return Err(ScreenerError::validation("Company name is required."));
    }
    Ok(())
}

fn classify(err: ModelError, fallback: impl FnOnce(ModelError) -> ScreenerError) -> ScreenerError {
    if err.is_authentication() {
        ScreenerError::Authentication(err)
    } else {
        fallback(err)
    }
}

/// Turns model replies into typed company records.
pub struct CompanyGateway<M> {
    model: M,
}

impl<M: GenerativeModel> CompanyGateway<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Looks a company up with web search enabled and decodes the fenced JSON
    /// reply. Every call is a fresh, billed model invocation.
    pub async fn fetch_company_info(
        &self,
        company_name: &str,
        company_address: &str,
    ) -> Result<CompanyProfile> {
        validate_company_name(company_name)?;

        let prompt = build_search_prompt(company_name, company_address);
        info!("Looking up company \"{}\"", company_name);
        debug!("Search prompt is {} chars", prompt.len());

        let request = GenerationRequest::grounded_text(prompt);
        let outcome = match self.model.generate(&request).await {
            Ok(text) => parse_company_profile(&text),
            Err(err) => Err(classify(err, ScreenerError::FetchFailed)),
        };

        match &outcome {
            Ok(profile) => info!(
                "Lookup for \"{}\" returned {} fields",
                company_name,
                profile.present_fields().len()
            ),
            Err(err) => error!("Company lookup failed: {}", err.detail()),
        }
        outcome
    }

    /// Reads company name and prefecture/city from a business-card image,
    /// with the reply shape enforced by a response schema.
    pub async fn extract_info_from_image(
        &self,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<ExtractedContact> {
        if !mime_type.starts_with("image/") {
            return Err(ScreenerError::validation("Please select an image file."));
        }
        if image_base64.is_empty() {
            return Err(ScreenerError::validation("The selected image is empty."));
        }

        info!("Extracting contact details from a {} image", mime_type);
        let request = GenerationRequest::structured(
            vec![
                RequestPart::Image(InlineImage::new(image_base64, mime_type)),
                RequestPart::Text(CARD_EXTRACTION_PROMPT.to_string()),
            ],
            ExtractedContact::response_schema(),
        );

        let outcome = match self.model.generate(&request).await {
            Ok(text) => parse_extracted_contact(&text).map_err(|err| match err {
                ScreenerError::EmptyResponse => ScreenerError::EmptyResponse,
                other => ScreenerError::ExtractionFailed(Box::new(other)),
            }),
            Err(err) => Err(classify(err, |err| {
                ScreenerError::ExtractionFailed(Box::new(err))
            })),
        };

        if let Err(err) = &outcome {
            warn!("Business card extraction failed: {}", err.detail());
        }
        outcome
    }

    pub async fn extract_info_from(&self, image: &InlineImage) -> Result<ExtractedContact> {
        self.extract_info_from_image(&image.data, &image.mime_type)
            .await
    }
}
