// Play-probability retrieval.
//
// The probability source is a fantasy stats site that renders each player's
// start probability inside an element with class `pct`. The production
// lookup fetches the player page over HTTP and pulls that element's text out
// of the raw HTML; tests substitute the trait with an in-memory stub. Every
// failure mode collapses to "unavailable for this player" at the call site.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

// The original scraper presented a desktop browser identity; some pages
// serve a different layout (without the pct element) to unknown agents.
const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("no percentage element found at {url}")]
    MissingElement { url: String },
}

// ---------------------------------------------------------------------------
// Lookup trait
// ---------------------------------------------------------------------------

/// External probability source, keyed by a player's reference URL.
///
/// Returns the raw percentage string as rendered by the source (e.g. `"87%"`);
/// parsing and range validation happen in [`parse_percent`].
#[async_trait]
pub trait ProbabilityLookup: Send + Sync {
    async fn lookup(&self, reference: &str) -> Result<String, LookupError>;
}

// ---------------------------------------------------------------------------
// HTTP page lookup
// ---------------------------------------------------------------------------

/// Fetches player pages over HTTP and extracts the `pct` element text.
pub struct FantasyPageLookup {
    http: reqwest::Client,
}

impl FantasyPageLookup {
    /// Build the lookup with a per-request timeout. A timed-out request is
    /// indistinguishable from any other unavailable probability downstream.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(DESKTOP_USER_AGENT)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ProbabilityLookup for FantasyPageLookup {
    async fn lookup(&self, reference: &str) -> Result<String, LookupError> {
        let response = self
            .http
            .get(reference)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| LookupError::Http {
                url: reference.to_string(),
                source: e,
            })?;

        let body = response.text().await.map_err(|e| LookupError::Http {
            url: reference.to_string(),
            source: e,
        })?;

        let text = extract_pct(&body).ok_or_else(|| LookupError::MissingElement {
            url: reference.to_string(),
        })?;
        debug!(reference, text = %text, "fetched probability");
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// HTML extraction + percent parsing
// ---------------------------------------------------------------------------

/// Extract the text content of the first element carrying the `pct` class.
///
/// Deliberately not a full HTML parse: the target element is a plain
/// `<div class="pct">87%</div>` and a class-attribute scan is enough.
fn extract_pct(html: &str) -> Option<String> {
    for quote in ['"', '\''] {
        let marker = format!("class={quote}");
        let mut from = 0;
        while let Some(pos) = html[from..].find(&marker) {
            let attr_start = from + pos + marker.len();
            let Some(attr_len) = html[attr_start..].find(quote) else {
                break;
            };
            let classes = &html[attr_start..attr_start + attr_len];
            if classes.split_whitespace().any(|c| c == "pct") {
                let rest = &html[attr_start + attr_len..];
                if let Some(open) = rest.find('>') {
                    let content = &rest[open + 1..];
                    if let Some(close) = content.find('<') {
                        let text = content[..close].trim();
                        if !text.is_empty() {
                            return Some(text.to_string());
                        }
                    }
                }
            }
            from = attr_start + attr_len;
        }
    }
    None
}

/// Parse a trailing-`%` percentage string into a float in [0, 100].
///
/// Any other shape (missing suffix, non-numeric, non-finite, out of range)
/// is `None`, which callers treat as "probability unavailable".
pub fn parse_percent(text: &str) -> Option<f64> {
    let number = text.trim().strip_suffix('%')?.trim();
    let value: f64 = number.parse().ok()?;
    (value.is_finite() && (0.0..=100.0).contains(&value)).then_some(value)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
