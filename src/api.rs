use crate::config::{Config, Endpoints};
use crate::error::{Result, ScrapeError};
use crate::headers;
use crate::rate_limit::{self, SharedRateLimiter};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;

/// Outcome of one search results request.
#[derive(Debug, PartialEq, Eq)]
pub enum SearchPage {
    Found(String),
    /// The site answers 404 once the page number runs past the last page.
    NotFound,
}

/// HTTP client for the card site. Every request waits on the shared rate
/// limiter before it is sent; clones share the same limiter.
#[derive(Clone)]
pub struct SiteClient {
    http: Client,
    limiter: SharedRateLimiter,
    endpoints: Endpoints,
}

impl SiteClient {
    pub fn new(config: &Config) -> Result<SiteClient> {
        let http = Client::builder()
            .default_headers(headers::default_headers(&config.user_agent)?)
            .timeout(config.timeout)
            .build()?;

        Ok(SiteClient {
            http,
            limiter: rate_limit::per_second(config.rate_limit)?,
            endpoints: config.endpoints.clone(),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        self.limiter.until_ready().await;
        let response = request.send().await?;
        debug!("{} {}", response.status(), response.url());
        Ok(response)
    }

    pub async fn get_cardlist_page(&self) -> Result<String> {
        let request = self.http.get(self.endpoints.catalog.clone());
        let response = error_for_status(self.send(request).await?)?;
        Ok(response.text().await?)
    }

    pub async fn get_search_page(&self, expansion: &str, page: u32) -> Result<SearchPage> {
        let page = page.to_string();
        let request = self
            .http
            .get(self.endpoints.search.clone())
            .query(&[("expansion", expansion), ("page", page.as_str())]);

        let response = self.send(request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(SearchPage::NotFound);
        }
        let response = error_for_status(response)?;
        Ok(SearchPage::Found(response.text().await?))
    }

    /// Returns `None` when the site answers with an empty body, which it does
    /// for unknown card numbers.
    pub async fn post_card_details(&self, card_number: &str) -> Result<Option<String>> {
        let request = self
            .http
            .post(self.endpoints.detail.clone())
            .headers(headers::detail_headers(&self.endpoints.referer)?)
            .form(&[("cardno", card_number)]);

        let response = error_for_status(self.send(request).await?)?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(body))
        }
    }
}

fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ScrapeError::Status {
            url: response.url().to_string(),
            status,
        })
    }
}
