use std::time::{Duration, Instant};

use log::{debug, info};

use crate::error::{Result, ScreenerError};
use crate::gateway::{validate_company_name, CompanyGateway, GenerativeModel, InlineImage};
use crate::profile::{CompanyProfile, ExtractedContact};

/// How long a failed business-card scan keeps its banner on screen.
pub const SCAN_ERROR_DISPLAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Result(CompanyProfile),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Ready,
    Extracting,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub company_name: String,
    pub company_address: String,
}

/// A validated submission, ready to hand to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub company_name: String,
    pub company_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanBanner {
    pub message: String,
    pub expires_at: Instant,
}

/// Presentation state for the screener form and result panel.
///
/// The main search and the business-card scan are tracked separately. Each
/// flow goes through a `begin_*` call that flips its control to busy and a
/// `complete_*` call with the gateway outcome; `search` and `scan_card` run
/// both halves around the gateway call.
#[derive(Debug, Clone, Default)]
pub struct Screener {
    pub form: SearchForm,
    search: SearchState,
    scan: ScanState,
    banner: Option<ScanBanner>,
}

impl Screener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    pub fn scan_state(&self) -> ScanState {
        self.scan
    }

    pub fn result(&self) -> Option<&CompanyProfile> {
        match &self.search {
            SearchState::Result(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.search {
            SearchState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.search == SearchState::Loading
    }

    /// Whether the search button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    /// Whether the image upload control is enabled.
    pub fn can_upload(&self) -> bool {
        !self.is_loading() && self.scan == ScanState::Ready
    }

    pub fn set_company_name(&mut self, name: impl Into<String>) {
        self.form.company_name = name.into();
    }

    pub fn set_company_address(&mut self, address: impl Into<String>) {
        self.form.company_address = address.into();
    }

    /// Validates the form and moves to `Loading`, dropping any previous
    /// result or error. An empty name moves to `Error` without a query.
    pub fn begin_search(&mut self) -> Result<SearchQuery> {
        if !self.can_submit() {
            return Err(ScreenerError::SearchInProgress);
        }

        let company_name = self.form.company_name.trim().to_string();
        if let Err(err) = validate_company_name(&company_name) {
            self.search = SearchState::Error(err.to_string());
            return Err(err);
        }

        self.search = SearchState::Loading;
        Ok(SearchQuery {
            company_name,
            company_address: self.form.company_address.trim().to_string(),
        })
    }

    /// Applies a gateway outcome. Ignored unless a search is in flight.
    pub fn complete_search(&mut self, outcome: Result<CompanyProfile>) {
        if !self.is_loading() {
            debug!("Dropping search outcome received outside of Loading");
            return;
        }
        self.search = match outcome {
            Ok(profile) => SearchState::Result(profile),
            Err(err) => SearchState::Error(err.to_string()),
        };
    }

    /// Submits the current form through `gateway`.
    pub async fn search<M: GenerativeModel>(
        &mut self,
        gateway: &CompanyGateway<M>,
    ) -> &SearchState {
        let query = match self.begin_search() {
            Ok(query) => query,
            Err(err) => {
                info!("Search not submitted: {}", err);
                return &self.search;
            }
        };
        let outcome = gateway
            .fetch_company_info(&query.company_name, &query.company_address)
            .await;
        self.complete_search(outcome);
        &self.search
    }

    pub fn begin_scan(&mut self) -> Result<()> {
        if self.is_loading() {
            return Err(ScreenerError::SearchInProgress);
        }
        if self.scan == ScanState::Extracting {
            return Err(ScreenerError::ScanInProgress);
        }
        self.scan = ScanState::Extracting;
        self.banner = None;
        Ok(())
    }

    /// Fills the form from a successful scan, or raises a banner that expires
    /// `SCAN_ERROR_DISPLAY` after `now`. The search state is never touched.
    pub fn complete_scan(&mut self, outcome: Result<ExtractedContact>, now: Instant) {
        if self.scan != ScanState::Extracting {
            debug!("Dropping scan outcome received while no scan was running");
            return;
        }
        self.scan = ScanState::Ready;
        match outcome {
            Ok(contact) => {
                self.form.company_name = contact.company_name;
                self.form.company_address = contact.company_address;
            }
            Err(err) => {
                self.banner = Some(ScanBanner {
                    message: err.to_string(),
                    expires_at: now + SCAN_ERROR_DISPLAY,
                });
            }
        }
    }

    /// Pre-fills the form from a business-card image.
    pub async fn scan_card<M: GenerativeModel>(
        &mut self,
        gateway: &CompanyGateway<M>,
        image: &InlineImage,
    ) -> Result<()> {
        self.begin_scan()?;
        let outcome = gateway.extract_info_from(image).await;
        self.complete_scan(outcome, Instant::now());
        Ok(())
    }

    /// The scan error banner, if it has not expired by `now`.
    pub fn banner(&self, now: Instant) -> Option<&str> {
        self.banner
            .as_ref()
            .filter(|banner| now < banner.expires_at)
            .map(|banner| banner.message.as_str())
    }

    pub fn clear_expired_banner(&mut self, now: Instant) {
        if matches!(&self.banner, Some(banner) if now >= banner.expires_at) {
            self.banner = None;
        }
    }
}
