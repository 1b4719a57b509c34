use crate::error::{Result, ScrapeError};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://llofficial-cardgame.com/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_RATE_LIMIT: u32 = 10;
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;
pub const DEFAULT_PAGE_DELAY_MS: u64 = 1000;
pub const DEFAULT_MAX_CONCURRENT_DETAILS: usize = 10;
pub const DEFAULT_OUTPUT_FILE: &str = "card_data.json";
pub const DEFAULT_LOG_FILE: &str = "scraper.log";

/// Site URLs, all resolved against one base so tests can point them at a mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub base: Url,
    pub catalog: Url,
    pub search: Url,
    pub detail: Url,
    pub referer: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Endpoints> {
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base = Url::parse(&base_url)
            .map_err(|e| ScrapeError::Config(format!("invalid base url {}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ScrapeError::Config(format!(
                "base url {} cannot have paths joined to it",
                base_url
            )));
        }

        let join = |path: &str| {
            base.join(path)
                .map_err(|e| ScrapeError::Config(format!("invalid endpoint {}: {}", path, e)))
        };

        Ok(Endpoints {
            catalog: join("cardlist/")?,
            search: join("cardlist/cardsearch_ex")?,
            detail: join("cardlist/detail/")?,
            referer: join("cardlist/")?,
            base,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoints: Endpoints,
    pub user_agent: String,
    /// Outbound requests per second, shared by every fetch.
    pub rate_limit: u32,
    pub timeout: Duration,
    pub page_delay: Duration,
    pub max_concurrent_details: usize,
    pub translations: Option<PathBuf>,
}

impl Config {
    pub fn new(base_url: &str) -> Result<Config> {
        Ok(Config {
            endpoints: Endpoints::new(base_url)?,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            rate_limit: DEFAULT_RATE_LIMIT,
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            page_delay: Duration::from_millis(DEFAULT_PAGE_DELAY_MS),
            max_concurrent_details: DEFAULT_MAX_CONCURRENT_DETAILS,
            translations: None,
        })
    }

    pub fn with_timeout_secs(mut self, secs: f64) -> Result<Config> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(ScrapeError::Config(format!(
                "timeout must be a positive number of seconds, got {}",
                secs
            )));
        }
        self.timeout = Duration::try_from_secs_f64(secs).map_err(|e| {
            ScrapeError::Config(format!("timeout of {} seconds is out of range: {}", secs, e))
        })?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rate_limit == 0 {
            return Err(ScrapeError::Config(
                "rate limit must be at least 1 request per second".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ScrapeError::Config("timeout must be positive".to_string()));
        }
        if self.max_concurrent_details == 0 {
            return Err(ScrapeError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
