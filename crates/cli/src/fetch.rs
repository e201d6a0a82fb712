//! Peer collection fetch — URL or local path to CSV text.

use std::time::Duration;

use crate::CliError;

const FETCH_TIMEOUT_SECS: u64 = 15;

/// Retrieve the peer store bytes. `https?://` locations go over HTTP
/// (blocking, no retry — a transport error aborts the comparison);
/// anything else is read as a local file.
pub fn fetch_peer(location: &str) -> Result<String, CliError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        fetch_url(location)
    } else {
        std::fs::read_to_string(location)
            .map_err(|e| CliError::fetch(format!("cannot read {location}: {e}")))
    }
}

fn fetch_url(url: &str) -> Result<String, CliError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(format!("album/{}", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .map_err(|e| CliError::fetch(format!("cannot build HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| CliError::fetch(format!("cannot fetch {url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CliError::fetch(format!("{url} returned HTTP {status}")));
    }

    response
        .text()
        .map_err(|e| CliError::fetch(format!("cannot read response from {url}: {e}")))
}
