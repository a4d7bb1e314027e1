use anyhow::{Context as _, Result};
use tracing::info;

/// The documentation page the stubs are generated from.
pub const REFERENCE_URL: &str =
    "https://heroiclabs.com/docs/nakama/server-framework/lua-runtime/function-reference";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetch the reference page body. Transport failures and non-success
/// statuses abort the run here, before the output file is touched.
pub fn fetch_page(url: &str) -> Result<String> {
    info!("Fetching {}", url);

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Request to {} failed", url))?
        .error_for_status()
        .context("Reference page returned an error status")?;

    let body = response
        .text()
        .context("Failed to read reference page body")?;
    info!("Fetched {} bytes", body.len());
    Ok(body)
}
