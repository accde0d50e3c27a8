//! Shared HTTP client construction for provider calls and page fetches.
//!
//! Page fetches use browser-like User-Agent strings, rotated per client,
//! since many sites refuse requests from obvious bots.

use crate::error::SearchError;
use rand::seq::SliceRandom;
use std::time::Duration;

/// Realistic browser User-Agent strings, rotated per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Maximum number of redirects followed for any request.
const MAX_REDIRECTS: usize = 10;

/// Build a [`reqwest::Client`] with the given timeout.
///
/// The client has:
/// - Timeout covering connect, send, and body read
/// - `user_agent` if given, else a random entry from the rotation list
/// - Brotli and gzip decompression
/// - At most 10 redirects
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(
    timeout_seconds: u64,
    user_agent: Option<&str>,
) -> Result<reqwest::Client, SearchError> {
    let ua = match user_agent {
        Some(custom) => custom.to_owned(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // USER_AGENTS is non-empty, so the fallback is never taken.
        .unwrap_or(USER_AGENTS[0])
}
