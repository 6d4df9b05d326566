use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::{Result, ScreenerError};
use crate::profile::{CompanyProfile, ExtractedContact};

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```json\n([\s\S]*?)\n```").expect("fence pattern is a valid regex")
});

/// Returns the body of the first ```` ```json ```` fenced block, or the whole
/// text trimmed when no such block exists.
pub fn extract_json_payload(text: &str) -> &str {
    match JSON_FENCE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .filter(|body| !body.as_str().is_empty())
    {
        Some(body) => {
            debug!("Found fenced json block ({} bytes)", body.len());
            body.as_str()
        }
        None => {
            debug!("No fenced json block; treating the response as raw JSON");
            text.trim()
        }
    }
}

/// Unwraps and decodes a free-text model reply into a profile.
pub fn parse_company_profile(text: &str) -> Result<CompanyProfile> {
    if text.is_empty() {
        return Err(ScreenerError::EmptyResponse);
    }
    let value: Value =
        serde_json::from_str(extract_json_payload(text)).map_err(ScreenerError::ResponseFormat)?;
    if !value.is_object() {
        return Err(ScreenerError::ResponseFormat(serde::de::Error::custom(
            "expected a JSON object",
        )));
    }
    serde_json::from_value(value).map_err(ScreenerError::ResponseFormat)
}

/// Decodes a schema-constrained business-card reply.
pub fn parse_extracted_contact(text: &str) -> Result<ExtractedContact> {
    if text.is_empty() {
        return Err(ScreenerError::EmptyResponse);
    }
    let contact: ExtractedContact =
        serde_json::from_str(text.trim()).map_err(ScreenerError::ResponseFormat)?;
    Ok(ExtractedContact {
        company_name: contact.company_name.trim().to_string(),
        company_address: contact.company_address.trim().to_string(),
    })
}
