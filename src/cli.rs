use clap::Parser;
use llcard_scraper::config::{
    Config, DEFAULT_BASE_URL, DEFAULT_LOG_FILE, DEFAULT_MAX_CONCURRENT_DETAILS,
    DEFAULT_PAGE_DELAY_MS, DEFAULT_RATE_LIMIT, DEFAULT_TIMEOUT_SECS,
};
use llcard_scraper::error::Result;
use llcard_scraper::output::FileAction;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(about = "Scrape card data from the Love Live! TCG official website.")]
pub struct Cli {
    #[arg(
        long,
        default_value = "INFO",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"],
        env = "LLCARD_LOG_LEVEL",
        hide = true
    )]
    pub log_level: String,

    /// File the log is written to (truncated on every run).
    #[arg(long, default_value = DEFAULT_LOG_FILE, env = "LLCARD_LOG_FILE")]
    pub log_file: PathBuf,

    /// Log to stderr instead of the log file.
    #[arg(long, env = "LLCARD_LOG_STDERR")]
    pub log_stderr: bool,

    /// Maximum requests per second to the server.
    #[arg(long, default_value_t = DEFAULT_RATE_LIMIT, env = "LLCARD_RATE_LIMIT")]
    pub rate_limit: u32,

    /// Timeout in seconds for network requests.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "LLCARD_TIMEOUT")]
    pub timeout: f64,

    #[arg(long, default_value = DEFAULT_BASE_URL, env = "LLCARD_BASE_URL", hide = true)]
    pub base_url: String,

    /// Pause between search result pages, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_PAGE_DELAY_MS, env = "LLCARD_PAGE_DELAY_MS")]
    pub page_delay_ms: u64,

    /// Card detail requests in flight per expansion.
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT_DETAILS, env = "LLCARD_CONCURRENCY")]
    pub concurrency: usize,

    /// JSON object of extra `label -> field` translations.
    #[arg(long, env = "LLCARD_TRANSLATIONS")]
    pub translations: Option<PathBuf>,

    /// Expansion code to scrape; skips the selection prompt. Repeatable.
    #[arg(short = 'e', long = "expansion")]
    pub expansions: Vec<String>,

    /// Output file; skips the filename prompt.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Merge into an existing output file.
    #[arg(long, conflicts_with = "overwrite")]
    pub merge: bool,

    /// Replace an existing output file.
    #[arg(long)]
    pub overwrite: bool,

    /// Start scraping without asking for confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

impl Cli {
    pub fn to_config(&self) -> Result<Config> {
        let mut config = Config::new(&self.base_url)?.with_timeout_secs(self.timeout)?;
        config.rate_limit = self.rate_limit;
        config.page_delay = Duration::from_millis(self.page_delay_ms);
        config.max_concurrent_details = self.concurrency;
        config.translations = self.translations.clone();
        config.validate()?;
        Ok(config)
    }

    /// Where the log goes; `None` means stderr.
    pub fn log_destination(&self) -> Option<&Path> {
        if self.log_stderr {
            None
        } else {
            Some(self.log_file.as_path())
        }
    }

    pub fn file_action(&self) -> Option<FileAction> {
        if self.merge {
            Some(FileAction::Merge)
        } else if self.overwrite {
            Some(FileAction::Overwrite)
        } else {
            None
        }
    }
}
