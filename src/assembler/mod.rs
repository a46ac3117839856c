//! Content assembly pipeline.
//!
//! # Data Flow
//! ```text
//! raw file bytes
//!     → split on '\n', line length check (the only failure that aborts)
//!     → per-line UTF-8 decode, trim, drop blank lines
//!     → classify.rs (DirectLink / RemoteList / Unsupported)
//!         DirectLink  → kept verbatim
//!         RemoteList  → fetch.rs, lines spliced in place
//!         Unsupported → warning, dropped (so are undecodable lines)
//!     → join with '\n'
//!     → base64 (standard, padded)
//! ```
//!
//! # Design Decisions
//! - No access to the registry; assembly is a function of its input
//! - Fetches run sequentially on the caller's task so output order is stable
//! - A failed fetch only drops that line's contribution

pub mod classify;
pub mod fetch;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

pub use classify::{classify_line, LineKind};
pub use fetch::{FetchError, RemoteFetcher, FETCH_TIMEOUT};

/// Longest accepted input line, in bytes.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Input that cannot be scanned into lines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    #[error("error scanning content: line {line} is {len} bytes, over the 64 KiB limit")]
    LineTooLong { line: usize, len: usize },
}

/// Turns raw documents into encoded subscription payloads.
#[derive(Debug, Clone)]
pub struct ContentAssembler {
    fetcher: RemoteFetcher,
}

impl ContentAssembler {
    pub fn new(fetcher: RemoteFetcher) -> Self {
        Self { fetcher }
    }

    /// Assemble `raw` into a base64 payload.
    pub async fn assemble(&self, raw: &[u8]) -> Result<String, AssembleError> {
        let lines = scan_lines(raw)?;
        let mut output: Vec<String> = Vec::with_capacity(lines.len());

        for scanned in lines {
            let line = match scanned {
                ScannedLine::Text(line) => line,
                ScannedLine::Undecodable(number) => {
                    tracing::warn!(line = number, "Skipping line that is not valid UTF-8");
                    continue;
                }
            };

            match classify_line(line) {
                LineKind::DirectLink => output.push(line.to_string()),
                LineKind::RemoteList => match self.fetcher.fetch_lines(line).await {
                    Ok(fetched) => {
                        tracing::debug!(url = %line, lines = fetched.len(), "Merged remote list");
                        output.extend(fetched);
                    }
                    Err(err) => {
                        tracing::warn!(url = %line, error = %err, "Failed to fetch remote list");
                    }
                },
                LineKind::Unsupported => {
                    tracing::warn!(line = %line, "Skipping line with unsupported protocol");
                }
            }
        }

        Ok(encode_lines(&output))
    }
}

/// A non-blank input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannedLine<'a> {
    /// Trimmed line text.
    Text(&'a str),
    /// 1-based number of a line that is not UTF-8.
    Undecodable(usize),
}

/// Split `raw` into non-blank lines.
///
/// Lines end at `\n` with an optional `\r`. Each line is decoded on its own,
/// so one bad line does not affect the rest. Fails only when a line is longer
/// than `MAX_LINE_BYTES`.
pub fn scan_lines(raw: &[u8]) -> Result<Vec<ScannedLine<'_>>, AssembleError> {
    let mut lines = Vec::new();
    for (index, line) in raw.split(|b| *b == b'\n').enumerate() {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.len() > MAX_LINE_BYTES {
            return Err(AssembleError::LineTooLong {
                line: index + 1,
                len: line.len(),
            });
        }

        match std::str::from_utf8(line) {
            Ok(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    lines.push(ScannedLine::Text(text));
                }
            }
            Err(_) => lines.push(ScannedLine::Undecodable(index + 1)),
        }
    }
    Ok(lines)
}

/// Join lines with '\n' and base64 encode the result.
pub fn encode_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let joined = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    STANDARD.encode(joined)
}
