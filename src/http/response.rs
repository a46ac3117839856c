//! Profile response headers.
//!
//! # Responsibilities
//! - Build the four profile headers once, at startup
//! - Attach them to every successful document response
//!
//! # Design Decisions
//! - Header values are checked when the server is built, not per request
//! - The title is sent as `base64:<encoded>` so any text is allowed

use axum::http::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::ProfileConfig;

pub const PROFILE_TITLE: HeaderName = HeaderName::from_static("profile-title");
pub const PROFILE_UPDATE_INTERVAL: HeaderName = HeaderName::from_static("profile-update-interval");
pub const PROFILE_WEB_PAGE_URL: HeaderName = HeaderName::from_static("profile-web-page-url");
pub const SUPPORT_URL: HeaderName = HeaderName::from_static("support-url");

/// `base64:<b64(title)>`
pub fn encode_title(title: &str) -> String {
    format!("base64:{}", STANDARD.encode(title))
}

/// Precomputed profile header values.
#[derive(Debug, Clone)]
pub struct ProfileHeaders {
    profile: ProfileConfig,
    title: HeaderValue,
    update_interval: HeaderValue,
    web_page_url: HeaderValue,
    support_url: HeaderValue,
}

impl ProfileHeaders {
    pub fn from_config(profile: &ProfileConfig) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            profile: profile.clone(),
            title: HeaderValue::from_str(&encode_title(&profile.title))?,
            update_interval: HeaderValue::from_str(&profile.update_interval)?,
            web_page_url: HeaderValue::from_str(&profile.web_page_url)?,
            support_url: HeaderValue::from_str(&profile.support_url)?,
        })
    }

    /// The configured values, as plain text.
    pub fn profile(&self) -> &ProfileConfig {
        &self.profile
    }

    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(PROFILE_TITLE, self.title.clone());
        headers.insert(PROFILE_UPDATE_INTERVAL, self.update_interval.clone());
        headers.insert(PROFILE_WEB_PAGE_URL, self.web_page_url.clone());
        headers.insert(SUPPORT_URL, self.support_url.clone());
    }
}
