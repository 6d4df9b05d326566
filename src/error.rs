use thiserror::Error;

use crate::gateway::ModelError;

/// Failures surfaced to the screener. The `Display` text of every variant is
/// the message shown to the user; causes travel through `source()`.
#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("{0}")]
    Validation(String),

    #[error("API returned an empty response. The company might not be found or the website is not accessible.")]
    EmptyResponse,

    #[error("Failed to parse the response from the AI model. It may have returned an invalid format.")]
    ResponseFormat(#[source] serde_json::Error),

    #[error("Invalid API Key. Please check your configuration.")]
    Authentication(#[source] ModelError),

    #[error("Failed to fetch company information from the AI model.")]
    FetchFailed(#[source] ModelError),

    #[error("Failed to extract company information from the image.")]
    ExtractionFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("A search is already in progress.")]
    SearchInProgress,

    #[error("An image is already being scanned.")]
    ScanInProgress,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ScreenerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Walks the source chain into a single line for logs.
    pub fn detail(&self) -> String {
        let mut detail = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        detail
    }
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            ScreenerError::validation("Company name is required.").to_string(),
            "Company name is required."
        );
        let err = ScreenerError::Authentication(ModelError::MissingApiKey);
        assert_eq!(
            err.to_string(),
            "Invalid API Key. Please check your configuration."
        );
    }

    #[test]
    fn test_detail_includes_cause() {
        let err = ScreenerError::FetchFailed(ModelError::Api {
            status: 503,
            message: "backend overloaded".to_string(),
        });
        let detail = err.detail();
        assert!(detail.starts_with("Failed to fetch company information"));
        assert!(detail.contains("backend overloaded"));
        assert!(detail.contains("503"));
    }
}
