use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Process-wide blocking client. Timeout overridable via `CHL_HTTP_TIMEOUT_SECS`.
pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        let timeout = env::var("CHL_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, 120);
        Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .context("failed to build http client")
    })
}

/// Fetch a feed URL and return the raw body. The cluster replies 200 with a
/// JSON error payload on bad parameters, so callers validate content, not
/// status alone.
pub fn get_json(url: &str) -> Result<String> {
    let client = http_client()?;
    let resp = client
        .get(url)
        .send()
        .with_context(|| format!("request failed: {url}"))?;
    let resp = resp
        .error_for_status()
        .with_context(|| format!("bad status from {url}"))?;
    resp.text().context("failed to read response body")
}
