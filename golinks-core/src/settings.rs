//! The persisted Configuration entity and its write-time validation
//!
//! The whole system is driven by a single synced setting: the base URL
//! that go-links expand against. Validation happens on the save path
//! only; readers trust whatever the store returns.

use url::Url;

use crate::error::{GoLinksError, Result};

/// Storage key for the base URL setting.
pub const BASE_URL_KEY: &str = "baseUrl";

/// Storage namespace for synced settings.
pub const SYNC_NAMESPACE: &str = "sync";

/// The single persisted entity: an optional base URL.
///
/// Absent or blank means unconfigured (the redirect feature is disabled).
/// When present, the value is an absolute URL ending in `/`, guaranteed
/// by [`normalize_base_url`] at write time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    pub base_url: Option<String>,
}

impl Configuration {
    pub fn new(base_url: Option<String>) -> Self {
        Self { base_url }
    }

    /// The base URL if it is non-blank, `None` otherwise.
    pub fn effective_base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Whether a usable base URL is set.
    pub fn is_configured(&self) -> bool {
        self.effective_base_url().is_some()
    }
}

/// Validate and normalize a base URL entered by the user.
///
/// Trims surrounding whitespace, requires a well-formed absolute URL,
/// and appends a trailing `/` when absent.
///
/// # Errors
///
/// Returns [`GoLinksError::EmptyBaseUrl`] for blank input and
/// [`GoLinksError::InvalidBaseUrl`] when the input fails absolute-URL
/// parsing.
pub fn normalize_base_url(input: &str) -> Result<String> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(GoLinksError::EmptyBaseUrl);
    }

    Url::parse(trimmed).map_err(|_| GoLinksError::InvalidBaseUrl(trimmed.to_string()))?;

    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}/", trimmed))
    }
}

/// Compose the destination for a keyword-triggered navigation.
///
/// Plain concatenation, no separator and no encoding; the host platform
/// applies whatever escaping it normally does to navigations.
pub fn compose_destination(base_url: &str, text: &str) -> String {
    format!("{}{}", base_url, text)
}
