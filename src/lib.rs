//! # Company Screener
//!
//! Looks up a company's public profile through a hosted Gemini model with web
//! search grounding, and can pre-fill the lookup from a photographed
//! business card.
//!
//! ## Core Concepts
//!
//! - **Prompt**: a deterministic instruction naming the company (and optional
//!   location) and listing the exact JSON keys to return
//! - **Gateway**: sends one request per lookup through a [`GenerativeModel`],
//!   unwraps the fenced JSON reply and maps failures onto [`ScreenerError`]
//! - **Sentinel**: the model writes `"-"` for unknown values; these become `None`
//! - **Screener**: the form/result state machine a front end renders
//!
//! The HTTP backend ([`llm::GeminiClient`]) lives behind the `gemini` feature.
//!
//! ## Example
//!
//! ```rust,ignore
//! use company_screener::*;
//! use company_screener::llm::GeminiClient;
//!
//! let config = ScreenerConfig::from_env();
//! let gateway = CompanyGateway::new(GeminiClient::from_config(&config));
//!
//! let mut screener = Screener::new();
//! screener.set_company_name("トヨタ自動車株式会社");
//! screener.search(&gateway).await;
//! print!("{}", render_search_state(screener.search_state()));
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod parsing;
pub mod profile;
pub mod prompts;
pub mod render;
pub mod screener;

#[cfg(feature = "gemini")]
pub mod llm;

pub use config::ScreenerConfig;
pub use error::{Result, ScreenerError};
pub use gateway::{
    CompanyGateway, GenerationRequest, GenerativeModel, InlineImage, ModelError, RequestPart,
};
pub use parsing::{extract_json_payload, parse_company_profile, parse_extracted_contact};
pub use profile::{CompanyProfile, ExtractedContact, FieldSpec, PROFILE_FIELDS, SENTINEL};
pub use prompts::{build_search_prompt, CARD_EXTRACTION_PROMPT};
pub use render::{render_profile, render_search_state};
pub use screener::{ScanState, Screener, SearchForm, SearchQuery, SearchState, SCAN_ERROR_DISPLAY};
