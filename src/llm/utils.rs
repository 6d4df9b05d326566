use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::fs;

use crate::error::{Result, ScreenerError};
use crate::gateway::InlineImage;

pub fn encode_image(bytes: &[u8], mime_type: impl Into<String>) -> InlineImage {
    InlineImage::new(STANDARD.encode(bytes), mime_type)
}

/// Reads a business-card picture from disk for inline upload.
pub async fn load_card_image(path: &Path) -> Result<InlineImage> {
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();
    if !mime_type.starts_with("image/") {
        return Err(ScreenerError::validation("Please select an image file."));
    }

    let bytes = fs::read(path).await?;
    Ok(encode_image(&bytes, mime_type))
}
