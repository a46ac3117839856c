//! Remote subscription list fetching.
//!
//! # Responsibilities
//! - GET a remote list with a fixed timeout
//! - Accept only `200 OK`
//! - Decode base64 bodies, falling back to the raw text
//! - Reject a list with a line over `MAX_LINE_BYTES`, like a local document
//!
//! # Design Decisions
//! - One attempt per URL; failures are reported to the caller, never retried
//! - Fetched lines are returned as-is and never classified again

use std::time::Duration;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use reqwest::StatusCode;
use thiserror::Error;

use crate::assembler::MAX_LINE_BYTES;

/// Deadline for a single remote fetch, body included.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Standard alphabet; bodies are accepted with or without padding.
const BODY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Why a remote list contributed nothing.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to fetch URL: {0}")]
    Request(#[from] reqwest::Error),

    #[error("bad status code: {0}")]
    Status(StatusCode),

    #[error("error reading content: line {line} is {len} bytes, over the 64 KiB limit")]
    LineTooLong { line: usize, len: usize },
}

/// HTTP client for remote subscription lists.
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    client: reqwest::Client,
}

impl RemoteFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("subs-server/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Use a preconfigured client. It should carry its own timeout.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch `url` and return its trimmed, non-blank lines.
    pub async fn fetch_lines(&self, url: &str) -> Result<Vec<String>, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        split_lines(&decode_body(&body))
    }
}

/// Trimmed, non-blank lines of a fetched list.
pub fn split_lines(text: &str) -> Result<Vec<String>, FetchError> {
    let mut lines = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.len() > MAX_LINE_BYTES {
            return Err(FetchError::LineTooLong {
                line: index + 1,
                len: line.len(),
            });
        }
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    Ok(lines)
}

/// Base64-decode a response body, or return it as text if it is not base64.
///
/// Line breaks inside the encoded body are ignored.
pub fn decode_body(body: &[u8]) -> String {
    let compact: Vec<u8> = body
        .iter()
        .copied()
        .filter(|b| *b != b'\r' && *b != b'\n')
        .collect();

    match BODY_ENGINE
        .decode(&compact)
        .ok()
        .and_then(|decoded| String::from_utf8(decoded).ok())
    {
        Some(decoded) => decoded,
        None => String::from_utf8_lossy(body).into_owned(),
    }
}
