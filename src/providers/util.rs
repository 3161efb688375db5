use anyhow::{Result, anyhow};
use reqwest::{Client, Url};
use tracing::debug;

const USER_AGENT: &str = "tradeserver/0.1";

/// Client shared by every request a provider makes. No timeout is set: a
/// slow upstream holds the request that asked for it.
pub fn http_client() -> Result<Client> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}

/// Fetches `url` and returns the body, failing on transport errors and
/// non-2xx statuses. Parsing is left to the caller.
pub async fn get_text(client: &Client, url: Url) -> Result<String> {
    debug!("Requesting {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| anyhow!("Request error: {} URL: {}", e, url))?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("HTTP error: {} URL: {}", status, url));
    }

    Ok(response.text().await?)
}

/// Joins `base` and `path` and appends `params` as an encoded query string.
pub fn endpoint(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url> {
    let url = format!("{}{}", base.trim_end_matches('/'), path);
    Url::parse_with_params(&url, params).map_err(|e| anyhow!("Invalid URL {}: {}", url, e))
}
