use crate::error::{Result, ScrapeError};
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use url::Url;

pub fn default_headers(user_agent: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(user_agent)
        .map_err(|e| ScrapeError::Config(format!("invalid user agent: {}", e)))?;
    headers.insert(USER_AGENT, value);
    Ok(headers)
}

/// The detail endpoint rejects requests that do not appear to come from the
/// card list page.
pub fn detail_headers(referer: &Url) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(referer.as_str())
        .map_err(|e| ScrapeError::Config(format!("invalid referer: {}", e)))?;
    headers.insert(REFERER, value);
    Ok(headers)
}
